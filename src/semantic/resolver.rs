//! Iterative, dependency-aware type resolution
//!
//! Runs after the whole AST has been walked so forward references between
//! unresolved symbols are visible. Resolution is a fixpoint over every
//! unresolved symbol; resolving one symbol first resolves its dependencies
//! recursively, with the `Resolving` state detecting cycles.

use tracing::{debug, error};

use crate::ast::{Ast, NodeData, NodeId, NodeKind};
use crate::errors::{LoamError, LoamResult};
use crate::semantic::symbol_table::{ResolutionState, ScopeId, Symbol, SymbolKind, SymbolTable};

/// Bound on fixpoint iterations; reaching it is reported as failure
pub const MAX_ITERATIONS: usize = 10;

/// How identifier names are looked up during inference
#[derive(Clone, Copy)]
enum Lookup {
    /// Parent-chain lookup rooted at a fixed scope
    Context(ScopeId),
    /// The navigation stack
    Navigation,
}

fn lookup_symbol<'t>(table: &'t SymbolTable, mode: Lookup, name: &str) -> Option<&'t Symbol> {
    match mode {
        Lookup::Context(scope) => table.lookup_in_context(name, scope),
        Lookup::Navigation => table.lookup(name),
    }
}

/// Infer the display type name of an expression in a scope context.
/// `None` means the type cannot be determined yet.
pub fn infer_type_in_context(
    table: &SymbolTable,
    ast: &Ast,
    expr: NodeId,
    context: ScopeId,
) -> Option<String> {
    infer(table, ast, expr, Lookup::Context(context))
}

/// Inference variant that resolves names through the navigation stack
pub fn infer_type(table: &SymbolTable, ast: &Ast, expr: NodeId) -> Option<String> {
    infer(table, ast, expr, Lookup::Navigation)
}

fn infer(table: &SymbolTable, ast: &Ast, expr: NodeId, mode: Lookup) -> Option<String> {
    match &ast.node(expr).data {
        NodeData::Literal(literal) => {
            use crate::ast::LiteralKind;
            match literal.kind {
                LiteralKind::Integer => Some("i32".to_string()),
                LiteralKind::Boolean => Some("bool".to_string()),
                LiteralKind::String => Some("string".to_string()),
                LiteralKind::Float => Some("f32".to_string()),
                _ => None,
            }
        }
        NodeData::Binary(binary) => {
            if binary.op.yields_bool() {
                return Some("bool".to_string());
            }
            // Arithmetic takes the type of whichever operand is known.
            if ast.cast_or_error(binary.left, NodeKind::Expression).is_some() {
                if let Some(ty) = infer(table, ast, binary.left, mode) {
                    return Some(ty);
                }
            }
            if ast.cast_or_error(binary.right, NodeKind::Expression).is_some() {
                if let Some(ty) = infer(table, ast, binary.right, mode) {
                    return Some(ty);
                }
            }
            None
        }
        NodeData::Unary(unary) => {
            use crate::ast::UnaryOp;
            match unary.op {
                UnaryOp::Not => Some("bool".to_string()),
                UnaryOp::Plus | UnaryOp::Minus => {
                    ast.cast_or_error(unary.operand, NodeKind::Expression)?;
                    infer(table, ast, unary.operand, mode)
                }
            }
        }
        NodeData::IdentifierExpr { identifier } => {
            let name = ast.identifier_name(*identifier)?;
            let symbol = lookup_symbol(table, mode, name)?;
            if symbol.is_resolved() {
                Some(symbol.type_name.clone())
            } else {
                None
            }
        }
        NodeData::Call(call) => {
            match &ast.node(call.target).data {
                NodeData::IdentifierExpr { identifier } => {
                    // Plain function call: the declared return type.
                    let name = ast.identifier_name(*identifier)?;
                    let symbol = lookup_symbol(table, mode, name)?;
                    if symbol.kind == SymbolKind::Function && symbol.is_resolved() {
                        return Some(symbol.type_name.clone());
                    }
                    None
                }
                NodeData::MemberAccess(access) => {
                    // Method call: look the method up in the receiver's type
                    // scope.
                    let target_type = infer(table, ast, access.target, mode)?;
                    let type_scope = table.find_scope_by_name(&target_type)?;
                    let method_name = ast.identifier_name(access.member)?;
                    let method = table.lookup_in_scope(type_scope, method_name)?;
                    if method.kind == SymbolKind::Function && method.is_resolved() {
                        return Some(method.type_name.clone());
                    }
                    None
                }
                _ => None,
            }
        }
        NodeData::Assignment(assignment) => {
            ast.cast_or_error(assignment.source, NodeKind::Expression)?;
            infer(table, ast, assignment.source, mode)
        }
        NodeData::New(new_expr) => {
            let NodeData::TypeName { identifier } = &ast.node(new_expr.type_name).data else {
                return None;
            };
            let name = ast.identifier_name(*identifier)?;
            let symbol = lookup_symbol(table, mode, name)?;
            if matches!(symbol.kind, SymbolKind::Class | SymbolKind::Enum) {
                Some(name.to_string())
            } else {
                None
            }
        }
        NodeData::MemberAccess(access) => {
            // Field access: the field's type in the receiver's type scope.
            let target_type = infer(table, ast, access.target, mode)?;
            let type_scope = table.find_scope_by_name(&target_type)?;
            let field_name = ast.identifier_name(access.member)?;
            let field = table.lookup_in_scope(type_scope, field_name)?;
            if field.is_resolved() {
                Some(field.type_name.clone())
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Names an expression's type depends on, in source order. Duplicates are
/// kept.
pub fn extract_dependencies(ast: &Ast, expr: NodeId) -> Vec<String> {
    let mut dependencies = Vec::new();
    collect_dependencies(ast, expr, &mut dependencies);
    dependencies
}

fn collect_dependencies(ast: &Ast, expr: NodeId, out: &mut Vec<String>) {
    match &ast.node(expr).data {
        NodeData::IdentifierExpr { identifier } => {
            if let Some(name) = ast.identifier_name(*identifier) {
                out.push(name.to_string());
            }
        }
        NodeData::Binary(binary) => {
            if ast.cast_or_error(binary.left, NodeKind::Expression).is_some() {
                collect_dependencies(ast, binary.left, out);
            }
            if ast.cast_or_error(binary.right, NodeKind::Expression).is_some() {
                collect_dependencies(ast, binary.right, out);
            }
        }
        NodeData::Unary(unary) => {
            if ast.cast_or_error(unary.operand, NodeKind::Expression).is_some() {
                collect_dependencies(ast, unary.operand, out);
            }
        }
        NodeData::Call(call) => {
            match &ast.node(call.target).data {
                NodeData::IdentifierExpr { identifier } => {
                    if let Some(name) = ast.identifier_name(*identifier) {
                        out.push(name.to_string());
                    }
                }
                NodeData::MemberAccess(access) => {
                    collect_dependencies(ast, access.target, out);
                }
                _ => {}
            }
            for &arg in &call.arguments {
                if ast.cast_or_error(arg, NodeKind::Expression).is_some() {
                    collect_dependencies(ast, arg, out);
                }
            }
        }
        NodeData::Assignment(assignment) => {
            if ast
                .cast_or_error(assignment.source, NodeKind::Expression)
                .is_some()
            {
                collect_dependencies(ast, assignment.source, out);
            }
        }
        NodeData::New(new_expr) => {
            if let NodeData::TypeName { identifier } = &ast.node(new_expr.type_name).data {
                if let Some(name) = ast.identifier_name(*identifier) {
                    out.push(name.to_string());
                }
            }
            for &arg in &new_expr.arguments {
                if ast.cast_or_error(arg, NodeKind::Expression).is_some() {
                    collect_dependencies(ast, arg, out);
                }
            }
        }
        NodeData::MemberAccess(access) => {
            // The receiver carries the type; the struct type itself is
            // reached transitively through the receiver's type.
            collect_dependencies(ast, access.target, out);
        }
        _ => {}
    }
}

/// Fixpoint driver over every unresolved symbol in the table
pub struct TypeResolver<'a> {
    table: &'a mut SymbolTable,
    ast: &'a Ast,
    errors: Vec<LoamError>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(table: &'a mut SymbolTable, ast: &'a Ast) -> Self {
        Self {
            table,
            ast,
            errors: Vec::new(),
        }
    }

    /// Resolve until no progress is made or the iteration bound is reached;
    /// then report every symbol still unresolved
    pub fn resolve_all(mut self) -> LoamResult<()> {
        debug!(target: "semantic", "starting type resolution for all unresolved symbols");

        let mut progress = true;
        let mut iteration = 0;
        while progress && iteration < MAX_ITERATIONS {
            progress = false;
            iteration += 1;
            debug!(target: "semantic", "type resolution iteration {}", iteration);

            for (scope_id, name) in self.unresolved_symbols() {
                // The state may have changed while a dependency was resolved.
                let still_unresolved = self
                    .table
                    .lookup_in_scope(scope_id, &name)
                    .map(|symbol| symbol.state == ResolutionState::Unresolved)
                    .unwrap_or(false);
                if still_unresolved && self.resolve_symbol(&name) {
                    progress = true;
                }
            }
        }

        let mut all_resolved = true;
        for scope_index in 0..self.table.scope_count() {
            let scope_id = ScopeId::from_raw(scope_index as u32);
            let unresolved: Vec<String> = self
                .table
                .symbols_in_scope(scope_id)
                .filter(|symbol| symbol.state == ResolutionState::Unresolved)
                .map(|symbol| symbol.name.clone())
                .collect();
            for name in unresolved {
                error!(target: "semantic", "failed to resolve type for symbol '{}'", name);
                self.errors.push(LoamError::resolution(format!(
                    "failed to resolve type for symbol '{}'",
                    name
                )));
                all_resolved = false;
            }
        }

        if iteration >= MAX_ITERATIONS {
            error!(
                target: "semantic",
                "type resolution exceeded maximum iterations, possible circular dependencies"
            );
            return Err(LoamError::resolution(
                "type resolution exceeded maximum iterations",
            ));
        }

        if all_resolved {
            debug!(target: "semantic", "type resolution completed successfully");
            Ok(())
        } else {
            Err(self.errors.remove(0))
        }
    }

    fn unresolved_symbols(&self) -> Vec<(ScopeId, String)> {
        let mut pending = Vec::new();
        for scope_index in 0..self.table.scope_count() {
            let scope_id = ScopeId::from_raw(scope_index as u32);
            for symbol in self.table.symbols_in_scope(scope_id) {
                if symbol.state == ResolutionState::Unresolved {
                    pending.push((scope_id, symbol.name.clone()));
                }
            }
        }
        pending
    }

    fn set_state(&mut self, scope_id: ScopeId, name: &str, state: ResolutionState) {
        if let Some(symbol) = self.table.symbol_mut(scope_id, name) {
            symbol.state = state;
        }
    }

    /// Resolve one symbol by name, recursively resolving its dependencies
    /// first. Failure reverts the symbol to unresolved so a later iteration
    /// can retry.
    fn resolve_symbol(&mut self, name: &str) -> bool {
        let Some(scope_id) = self.table.find_symbol_scope(name) else {
            error!(target: "semantic", "cannot resolve type for unknown symbol '{}'", name);
            return false;
        };
        let symbol = self
            .table
            .lookup_in_scope(scope_id, name)
            .expect("scope was just found by name");

        match symbol.state {
            ResolutionState::Resolved => return true,
            ResolutionState::Resolving => {
                error!(
                    target: "semantic",
                    "circular dependency detected while resolving symbol '{}'", name
                );
                return false;
            }
            ResolutionState::Unresolved => {}
        }

        self.set_state(scope_id, name, ResolutionState::Resolving);

        let dependencies = self
            .table
            .lookup_in_scope(scope_id, name)
            .map(|symbol| symbol.dependencies.clone())
            .unwrap_or_default();
        for dependency in &dependencies {
            if !self.resolve_symbol_in_context(dependency, scope_id) {
                error!(
                    target: "semantic",
                    "failed to resolve dependency '{}' for symbol '{}'", dependency, name
                );
                self.set_state(scope_id, name, ResolutionState::Unresolved);
                return false;
            }
        }

        let initializer = self
            .table
            .lookup_in_scope(scope_id, name)
            .and_then(|symbol| symbol.initializer);
        let Some(initializer) = initializer else {
            error!(target: "semantic", "cannot infer type for symbol '{}'", name);
            self.set_state(scope_id, name, ResolutionState::Unresolved);
            return false;
        };

        let Some(inferred) = infer_type_in_context(self.table, self.ast, initializer, scope_id)
        else {
            error!(target: "semantic", "cannot infer type for symbol '{}'", name);
            self.set_state(scope_id, name, ResolutionState::Unresolved);
            return false;
        };

        match self.table.ir_type_for_name(&inferred) {
            Ok(ir_type) => {
                let symbol = self
                    .table
                    .symbol_mut(scope_id, name)
                    .expect("symbol present since resolution started");
                symbol.ir_type = ir_type;
                symbol.type_name = inferred.clone();
                symbol.state = ResolutionState::Resolved;
                debug!(target: "semantic", "resolved symbol '{}' to type '{}'", name, inferred);
                true
            }
            Err(err) => {
                error!(
                    target: "semantic",
                    "error converting inferred type '{}' for symbol '{}': {}", inferred, name, err
                );
                self.set_state(scope_id, name, ResolutionState::Unresolved);
                false
            }
        }
    }

    /// Resolution rooted at a scope context. The context is currently not
    /// consulted: symbols are found by name alone, in scope-id order.
    fn resolve_symbol_in_context(&mut self, name: &str, _context: ScopeId) -> bool {
        self.resolve_symbol(name)
    }
}
