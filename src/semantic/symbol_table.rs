//! Scoped symbol table with a building phase and a navigation phase
//!
//! Scopes are persistent: `exit_scope` moves the building cursor but never
//! destroys anything, so later passes can navigate the full scope tree.
//! Scope ids are creation-ordered indices into the scope vector and are
//! never recycled. The building cursor and the navigation stack are
//! independent; building writes through `building_scope` while read-side
//! consumers (codegen, type queries) drive the navigation stack.

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{error, info};

use crate::ast::{Ast, NodeId};
use crate::errors::{LoamError, LoamResult};
use crate::ir::{IrType, StructLayout};
use crate::semantic::resolver::extract_dependencies;

/// Stable index of a scope in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The global scope
    pub const GLOBAL: ScopeId = ScopeId(0);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

/// The kind of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Class,
    Parameter,
    Enum,
}

/// Progress of deferred-type inference for a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    /// Type not yet determined
    Unresolved,
    /// Currently being resolved; used solely for cycle detection
    Resolving,
    /// Type fully resolved
    Resolved,
}

/// A symbol in the table
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ir_type: IrType,
    /// Display type name, e.g. `"Shape"`, `"string"`, `"i32"`
    pub type_name: String,
    /// Owning scope
    pub scope_id: ScopeId,
    pub state: ResolutionState,
    /// Initializer expression awaiting inference; non-owning arena index
    pub initializer: Option<NodeId>,
    /// Names this symbol's type depends on, in source order
    pub dependencies: Vec<String>,
}

impl Symbol {
    /// A fully typed symbol
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        ir_type: IrType,
        type_name: impl Into<String>,
        scope_id: ScopeId,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            ir_type,
            type_name: type_name.into(),
            scope_id,
            state: ResolutionState::Resolved,
            initializer: None,
            dependencies: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.state == ResolutionState::Resolved
    }
}

/// One scope: a name, a parent link, and its symbols in declaration order
#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    /// `None` only for the global scope
    pub parent: Option<ScopeId>,
    symbols: IndexMap<String, Symbol>,
}

impl Scope {
    fn new(name: impl Into<String>, parent: Option<ScopeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            symbols: IndexMap::new(),
        }
    }

    /// Insert a symbol; fails if the name is already bound in this scope
    fn define(&mut self, symbol: Symbol) -> Result<(), String> {
        if self.symbols.contains_key(&symbol.name) {
            return Err(format!(
                "symbol '{}' is already defined in this scope",
                symbol.name
            ));
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Symbols in declaration order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}

/// The symbol table of one compilation
#[derive(Debug)]
pub struct SymbolTable {
    /// Persistent storage of all scopes, indexed by id
    scopes: Vec<Scope>,
    scope_names: HashMap<String, ScopeId>,
    /// Navigation stack for read-side traversal
    navigation: Vec<ScopeId>,
    /// Cursor of the building phase
    building_scope: ScopeId,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            scopes: Vec::new(),
            scope_names: HashMap::new(),
            navigation: Vec::new(),
            building_scope: ScopeId::GLOBAL,
        };
        table.install_global();
        table
    }

    fn install_global(&mut self) {
        self.scopes.push(Scope::new("global", None));
        self.scope_names.insert("global".to_string(), ScopeId::GLOBAL);
        self.navigation.push(ScopeId::GLOBAL);
        self.building_scope = ScopeId::GLOBAL;
    }

    /// Drop everything and recreate the global scope
    pub fn clear(&mut self) {
        self.scopes.clear();
        self.scope_names.clear();
        self.navigation.clear();
        self.install_global();
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.to_raw() as usize)
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    // === Building phase ===

    /// Create an anonymous child of the current building scope
    pub fn enter_scope(&mut self) -> ScopeId {
        let name = format!("scope_{}", self.scopes.len());
        self.enter_named_scope(name)
    }

    /// Create a named child of the current building scope and move the
    /// cursor into it. Scope names are lookup keys and must be unique; a
    /// collision is logged and leaves the index pointing at the first scope.
    pub fn enter_named_scope(&mut self, name: impl Into<String>) -> ScopeId {
        let name = name.into();
        let id = ScopeId::from_raw(self.scopes.len() as u32);
        self.scopes
            .push(Scope::new(name.clone(), Some(self.building_scope)));
        if self.scope_names.contains_key(&name) {
            error!(target: "semantic", "scope name '{}' is already in use", name);
        } else {
            self.scope_names.insert(name, id);
        }
        self.building_scope = id;
        id
    }

    /// Move the building cursor to the parent; the scope itself persists
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.building_scope.to_raw() as usize].parent {
            self.building_scope = parent;
        }
    }

    /// The scope currently being written into
    pub fn building_scope_id(&self) -> ScopeId {
        self.building_scope
    }

    /// Insert a fully typed symbol at the current building scope
    pub fn declare_symbol(
        &mut self,
        name: impl Into<String>,
        kind: SymbolKind,
        ir_type: IrType,
        type_name: impl Into<String>,
    ) -> LoamResult<()> {
        let scope_id = self.building_scope;
        let symbol = Symbol::new(name, kind, ir_type, type_name, scope_id);
        self.scopes[scope_id.to_raw() as usize]
            .define(symbol)
            .map_err(LoamError::resolution)
    }

    /// Insert a symbol whose type will be inferred from its initializer.
    /// Dependencies are seeded by scanning the initializer expression.
    pub fn declare_unresolved_symbol(
        &mut self,
        name: impl Into<String>,
        kind: SymbolKind,
        initializer: Option<NodeId>,
        ast: &Ast,
    ) -> LoamResult<()> {
        let scope_id = self.building_scope;
        // Placeholder type until resolution runs.
        let mut symbol = Symbol::new(name, kind, IrType::I32, "unresolved", scope_id);
        symbol.state = ResolutionState::Unresolved;
        symbol.initializer = initializer;
        if let Some(expr) = initializer {
            symbol.dependencies = extract_dependencies(ast, expr);
        }
        self.scopes[scope_id.to_raw() as usize]
            .define(symbol)
            .map_err(LoamError::resolution)
    }

    // === Navigation phase ===

    /// Push a previously created scope by name; `None` if unknown
    pub fn push_scope_named(&mut self, name: &str) -> Option<ScopeId> {
        let id = self.find_scope_by_name(name)?;
        self.navigation.push(id);
        Some(id)
    }

    /// Push a previously created scope by id; `None` if out of range
    pub fn push_scope(&mut self, id: ScopeId) -> Option<ScopeId> {
        if (id.to_raw() as usize) < self.scopes.len() {
            self.navigation.push(id);
            Some(id)
        } else {
            None
        }
    }

    /// Pop, but never below the global scope
    pub fn pop_scope(&mut self) {
        if self.navigation.len() > 1 {
            self.navigation.pop();
        }
    }

    /// Reset the navigation stack to just the global scope
    pub fn reset_navigation(&mut self) {
        self.navigation.clear();
        self.navigation.push(ScopeId::GLOBAL);
    }

    /// Top of the navigation stack
    pub fn current_scope_id(&self) -> ScopeId {
        *self.navigation.last().unwrap_or(&ScopeId::GLOBAL)
    }

    pub fn current_scope_name(&self) -> &str {
        &self.scopes[self.current_scope_id().to_raw() as usize].name
    }

    /// Search the navigation stack from its top downward.
    ///
    /// At the topmost scope only: a scope named `Owner::method` is a member
    /// function scope, and the owning type scope `Owner` is also searched
    /// for *variable* symbols, realizing unqualified field access from
    /// within methods.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        for (depth, &scope_id) in self.navigation.iter().enumerate().rev() {
            let scope = &self.scopes[scope_id.to_raw() as usize];
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            if depth == self.navigation.len() - 1 {
                if let Some((owner, _)) = scope.name.split_once("::") {
                    if let Some(type_scope) = self.find_scope_by_name(owner) {
                        if let Some(field) =
                            self.scopes[type_scope.to_raw() as usize].get(name)
                        {
                            if field.kind == SymbolKind::Variable {
                                return Some(field);
                            }
                        }
                    }
                }
            }
        }
        None
    }

    /// Single-scope lookup in the top navigation scope
    pub fn lookup_in_current_scope(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.current_scope_id().to_raw() as usize].get(name)
    }

    /// Single-scope lookup by id
    pub fn lookup_in_scope(&self, scope_id: ScopeId, name: &str) -> Option<&Symbol> {
        self.scope(scope_id)?.get(name)
    }

    /// Parent-chain lookup rooted at an arbitrary scope; used by the
    /// resolver, which does not rely on the navigation stack
    pub fn lookup_in_context(&self, name: &str, context: ScopeId) -> Option<&Symbol> {
        let mut cursor = Some(context);
        while let Some(scope_id) = cursor {
            let scope = self.scope(scope_id)?;
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            cursor = scope.parent;
        }
        None
    }

    pub fn symbol_exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn symbol_exists_in_current_scope(&self, name: &str) -> bool {
        self.lookup_in_current_scope(name).is_some()
    }

    /// Resolve a scope name to its id
    pub fn find_scope_by_name(&self, name: &str) -> Option<ScopeId> {
        self.scope_names.get(name).copied()
    }

    /// All symbols of one scope, in declaration order
    pub fn symbols_in_scope(&self, scope_id: ScopeId) -> impl Iterator<Item = &Symbol> {
        self.scope(scope_id)
            .into_iter()
            .flat_map(|scope| scope.symbols())
    }

    /// Mutable access for the resolver
    pub(crate) fn symbol_mut(&mut self, scope_id: ScopeId, name: &str) -> Option<&mut Symbol> {
        self.scopes
            .get_mut(scope_id.to_raw() as usize)?
            .symbols
            .get_mut(name)
    }

    /// First scope (in id order) containing `name`
    pub(crate) fn find_symbol_scope(&self, name: &str) -> Option<ScopeId> {
        self.scopes
            .iter()
            .position(|scope| scope.get(name).is_some())
            .map(|index| ScopeId::from_raw(index as u32))
    }

    // === Type conversion ===

    /// Map a display type name to its IR type.
    ///
    /// Arrays and strings lower to pointers. Class names build a struct
    /// layout from the class scope's variable symbols in declaration order;
    /// enums lower to `i32`. Unknown names are an error that aborts the
    /// current call chain.
    pub fn ir_type_for_name(&self, type_name: &str) -> LoamResult<IrType> {
        if type_name.len() > 2 && type_name.ends_with("[]") {
            // Arrays are represented as pointers to the element storage.
            return Ok(IrType::Ptr);
        }

        match type_name {
            "i8" => Ok(IrType::I8),
            "i16" => Ok(IrType::I16),
            "i32" => Ok(IrType::I32),
            "i64" => Ok(IrType::I64),
            "bool" => Ok(IrType::Bool),
            "f32" => Ok(IrType::F32),
            "f64" => Ok(IrType::F64),
            "void" => Ok(IrType::Void),
            "ptr" => Ok(IrType::Ptr),
            "string" => Ok(IrType::Ptr),
            _ => {
                if let Some(symbol) = self.lookup(type_name) {
                    match symbol.kind {
                        SymbolKind::Class => {
                            let Some(type_scope) = self.find_scope_by_name(type_name) else {
                                error!(
                                    target: "semantic",
                                    "cannot find scope for class type '{}'", type_name
                                );
                                return Ok(IrType::Ptr);
                            };
                            let mut layout = StructLayout::new(type_name);
                            for field in self.symbols_in_scope(type_scope) {
                                if field.kind == SymbolKind::Variable {
                                    layout.add_field(field.name.clone(), field.ir_type.clone());
                                }
                            }
                            layout.calculate_layout();
                            return Ok(IrType::struct_type(layout));
                        }
                        SymbolKind::Enum => return Ok(IrType::I32),
                        _ => {}
                    }
                }
                error!(target: "semantic", "unknown type name '{}'", type_name);
                Err(LoamError::type_error(format!(
                    "unknown type: {}",
                    type_name
                )))
            }
        }
    }

    // === Debug dumps ===

    /// Log every scope and its symbols
    pub fn log_symbol_table(&self) {
        info!(target: "semantic", "total scopes: {}", self.scopes.len());
        for (id, scope) in self.scopes.iter().enumerate() {
            match scope.parent {
                Some(parent) => info!(
                    target: "semantic",
                    "scope {}: \"{}\" (parent: {})", id, scope.name, parent.to_raw()
                ),
                None => info!(target: "semantic", "scope {}: \"{}\"", id, scope.name),
            }
            if scope.symbols.is_empty() {
                info!(target: "semantic", "  (empty)");
            }
            for symbol in scope.symbols() {
                info!(
                    target: "semantic",
                    "  {:<20} {:<12} {:<15}",
                    symbol.name,
                    format!("{:?}", symbol.kind),
                    symbol.type_name
                );
            }
        }
    }

    /// Log the navigation stack
    pub fn log_navigation_state(&self) {
        let stack = self
            .navigation
            .iter()
            .map(|id| {
                format!(
                    "{}(\"{}\")",
                    id.to_raw(),
                    self.scopes[id.to_raw() as usize].name
                )
            })
            .collect::<Vec<_>>()
            .join(" -> ");
        info!(target: "semantic", "active scope stack: {}", stack);
        info!(
            target: "semantic",
            "current scope: {} (id: {})",
            self.current_scope_name(),
            self.current_scope_id().to_raw()
        );
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_scope_is_zero() {
        let table = SymbolTable::new();
        assert_eq!(table.find_scope_by_name("global"), Some(ScopeId::GLOBAL));
        let global = table.scope(ScopeId::GLOBAL).unwrap();
        assert_eq!(global.name, "global");
        assert_eq!(global.parent, None);
    }

    #[test]
    fn test_scope_ids_are_creation_ordered_and_stable() {
        let mut table = SymbolTable::new();
        let outer = table.enter_named_scope("outer");
        let inner = table.enter_scope();
        table.exit_scope();
        table.exit_scope();
        let sibling = table.enter_named_scope("sibling");

        assert_eq!(outer, ScopeId(1));
        assert_eq!(inner, ScopeId(2));
        assert_eq!(sibling, ScopeId(3));
        assert_eq!(table.scope(inner).unwrap().name, "scope_2");
        assert_eq!(table.find_scope_by_name("outer"), Some(outer));
        assert_eq!(table.find_scope_by_name("sibling"), Some(sibling));
        // Parents are always lower-numbered.
        assert_eq!(table.scope(inner).unwrap().parent, Some(outer));
        assert_eq!(table.scope(sibling).unwrap().parent, Some(ScopeId::GLOBAL));
    }

    #[test]
    fn test_exit_scope_never_destroys() {
        let mut table = SymbolTable::new();
        let scope = table.enter_named_scope("f");
        table
            .declare_symbol("x", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        table.exit_scope();
        assert_eq!(table.building_scope_id(), ScopeId::GLOBAL);
        assert!(table.lookup_in_scope(scope, "x").is_some());
    }

    #[test]
    fn test_no_shadow_within_one_scope() {
        let mut table = SymbolTable::new();
        table
            .declare_symbol("x", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        let duplicate = table.declare_symbol("x", SymbolKind::Variable, IrType::I64, "i64");
        assert!(duplicate.is_err());
        // The first symbol is intact.
        let symbol = table.lookup_in_scope(ScopeId::GLOBAL, "x").unwrap();
        assert_eq!(symbol.ir_type, IrType::I32);
        assert_eq!(symbol.type_name, "i32");
    }

    #[test]
    fn test_shadowing_across_scopes_is_allowed() {
        let mut table = SymbolTable::new();
        table
            .declare_symbol("x", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        let inner = table.enter_named_scope("f");
        table
            .declare_symbol("x", SymbolKind::Variable, IrType::Bool, "bool")
            .unwrap();
        table.exit_scope();

        table.push_scope(inner);
        assert_eq!(table.lookup("x").unwrap().type_name, "bool");
        table.pop_scope();
        assert_eq!(table.lookup("x").unwrap().type_name, "i32");
    }

    #[test]
    fn test_lookup_finds_innermost_enclosing_scope() {
        let mut table = SymbolTable::new();
        table
            .declare_symbol("g", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        let outer = table.enter_named_scope("outer");
        table
            .declare_symbol("o", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        let inner = table.enter_scope();
        table
            .declare_symbol("i", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        table.exit_scope();
        table.exit_scope();

        // Navigation mirrors the lexical nesting.
        table.push_scope(outer);
        table.push_scope(inner);
        assert!(table.lookup("i").is_some());
        assert!(table.lookup("o").is_some());
        assert!(table.lookup("g").is_some());
        assert!(table.lookup("missing").is_none());
        // Single-scope lookup does not search the rest of the stack.
        assert!(table.lookup_in_current_scope("o").is_none());
    }

    #[test]
    fn test_pop_never_leaves_global() {
        let mut table = SymbolTable::new();
        table.pop_scope();
        table.pop_scope();
        assert_eq!(table.current_scope_id(), ScopeId::GLOBAL);
    }

    #[test]
    fn test_member_function_scope_sees_fields() {
        let mut table = SymbolTable::new();
        table
            .declare_symbol("C", SymbolKind::Class, IrType::Ptr, "type")
            .unwrap();
        table.enter_named_scope("C");
        table
            .declare_symbol("x", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        table
            .declare_symbol("helper", SymbolKind::Function, IrType::Void, "void")
            .unwrap();
        table.enter_named_scope("C::f");
        table.exit_scope();
        table.exit_scope();

        table.push_scope_named("C::f").unwrap();
        // Field is visible without qualification…
        assert!(table.lookup("x").is_some());
        // …but only variable symbols come through the special case.
        assert!(table.lookup("helper").is_none());
        table.pop_scope();

        // Outside the member scope the field stays hidden.
        assert!(table.lookup("x").is_none());
    }

    #[test]
    fn test_field_special_case_applies_to_top_scope_only() {
        let mut table = SymbolTable::new();
        table
            .declare_symbol("C", SymbolKind::Class, IrType::Ptr, "type")
            .unwrap();
        table.enter_named_scope("C");
        table
            .declare_symbol("x", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        let method = table.enter_named_scope("C::f");
        let block = table.enter_scope();
        table.exit_scope();
        table.exit_scope();
        table.exit_scope();

        // With a block on top of the stack the method scope is no longer
        // topmost, so the member-scope special case does not fire.
        table.push_scope(method);
        table.push_scope(block);
        assert!(table.lookup("x").is_none());
        table.pop_scope();
        assert!(table.lookup("x").is_some());
    }

    #[test]
    fn test_ir_type_for_primitive_and_sugar_names() {
        let table = SymbolTable::new();
        assert_eq!(table.ir_type_for_name("i32").unwrap(), IrType::I32);
        assert_eq!(table.ir_type_for_name("bool").unwrap(), IrType::Bool);
        assert_eq!(table.ir_type_for_name("string").unwrap(), IrType::Ptr);
        assert_eq!(table.ir_type_for_name("i64[]").unwrap(), IrType::Ptr);
        assert!(table.ir_type_for_name("Mystery").is_err());
    }

    #[test]
    fn test_ir_type_for_class_builds_layout_in_declaration_order() {
        let mut table = SymbolTable::new();
        table
            .declare_symbol("Player", SymbolKind::Class, IrType::Ptr, "type")
            .unwrap();
        table.enter_named_scope("Player");
        table
            .declare_symbol("hp", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        table
            .declare_symbol("speed", SymbolKind::Variable, IrType::F64, "f64")
            .unwrap();
        table
            .declare_symbol("update", SymbolKind::Function, IrType::Void, "void")
            .unwrap();
        table.exit_scope();

        let ty = table.ir_type_for_name("Player").unwrap();
        let IrType::Struct(layout) = ty else {
            panic!("expected struct type");
        };
        assert_eq!(layout.name, "Player");
        // Functions are not fields; field order follows declaration order.
        assert_eq!(layout.fields.len(), 2);
        assert_eq!(layout.fields[0].name, "hp");
        assert_eq!(layout.fields[1].name, "speed");
        assert_eq!(layout.fields[1].offset, 8);
        assert_eq!(layout.size, 16);
    }

    #[test]
    fn test_ir_type_for_enum_is_i32() {
        let mut table = SymbolTable::new();
        table
            .declare_symbol("Color", SymbolKind::Enum, IrType::I32, "enum")
            .unwrap();
        assert_eq!(table.ir_type_for_name("Color").unwrap(), IrType::I32);
    }

    #[test]
    fn test_clear_recreates_global() {
        let mut table = SymbolTable::new();
        table.enter_named_scope("f");
        table
            .declare_symbol("x", SymbolKind::Variable, IrType::I32, "i32")
            .unwrap();
        table.clear();
        assert_eq!(table.scope_count(), 1);
        assert_eq!(table.current_scope_id(), ScopeId::GLOBAL);
        assert!(table.find_scope_by_name("f").is_none());
    }
}
