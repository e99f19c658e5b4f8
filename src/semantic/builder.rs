//! Symbol-table construction from the AST
//!
//! Walks a compilation unit's top-level statements and populates the table:
//! type declarations open named scopes, member functions get `Owner::method`
//! scopes with an implicit `this` parameter, functions double as their body
//! scope, and variable declarations without an explicit type become
//! unresolved symbols bound to their initializer.

use tracing::{debug, error};

use crate::ast::{Ast, NodeData, NodeId, NodeKind, TypeDecl};
use crate::errors::{LoamError, LoamResult};
use crate::ir::IrType;
use crate::parser::{AstHandle, CompilationUnitId};
use crate::semantic::symbol_table::{SymbolKind, SymbolTable};

/// One-shot AST walker that fills a [`SymbolTable`]
pub struct SymbolTableBuilder<'a> {
    table: &'a mut SymbolTable,
    ast: &'a Ast,
}

impl<'a> SymbolTableBuilder<'a> {
    pub fn new(table: &'a mut SymbolTable, ast: &'a Ast) -> Self {
        Self { table, ast }
    }

    /// Clear the table and repopulate it from `unit`
    pub fn build(&mut self, unit: CompilationUnitId) -> LoamResult<()> {
        self.table.clear();

        let NodeData::CompilationUnit { statements } = &self.ast.node(unit.node_id()).data else {
            return Err(LoamError::invalid_ast("expected a compilation unit"));
        };
        for &statement in &statements.clone() {
            if self.ast.is_a(statement, NodeKind::Declaration) {
                self.visit_declaration(statement)?;
            } else if self.ast.cast_or_error(statement, NodeKind::Statement).is_some() {
                self.visit_statement(statement)?;
            }
        }
        Ok(())
    }

    /// Identifier text of a name node; logs and yields `None` on anything
    /// else
    fn name_of(&self, id: NodeId) -> Option<String> {
        self.ast.cast_or_error(id, NodeKind::Identifier)?;
        self.ast.identifier_name(id).map(str::to_string)
    }

    /// Render a type-name node to its display string, e.g. `i32`, `T[]`,
    /// `A::B`, `T*`, `Map<K, V>`
    fn type_string(&self, id: NodeId) -> LoamResult<String> {
        match &self.ast.node(id).data {
            NodeData::TypeName { identifier } => match self.ast.identifier_name(*identifier) {
                Some(name) => Ok(name.to_string()),
                None => {
                    error!(target: "semantic", "type name has no identifier");
                    Ok("unknown".to_string())
                }
            },
            NodeData::ArrayTypeName { element } => {
                Ok(format!("{}[]", self.type_string(*element)?))
            }
            NodeData::PointerTypeName { inner } => Ok(format!("{}*", self.type_string(*inner)?)),
            NodeData::QualifiedTypeName { left, right } => {
                let right_name = self.name_of(*right).unwrap_or_else(|| "unknown".to_string());
                Ok(format!("{}::{}", self.type_string(*left)?, right_name))
            }
            NodeData::GenericTypeName(generic) => {
                let mut rendered = format!("{}<", self.type_string(generic.base)?);
                for (i, &argument) in generic.arguments.iter().enumerate() {
                    if i > 0 {
                        rendered.push_str(", ");
                    }
                    if self
                        .ast
                        .cast_or_error(argument, NodeKind::TypeName)
                        .is_some()
                    {
                        rendered.push_str(&self.type_string(argument)?);
                    }
                }
                rendered.push('>');
                Ok(rendered)
            }
            _ => {
                error!(
                    target: "semantic",
                    "unexpected {} in type position", self.ast.kind(id).name()
                );
                Err(LoamError::invalid_ast(format!(
                    "unexpected {} in type position",
                    self.ast.kind(id).name()
                )))
            }
        }
    }

    /// Declare into the building scope, logging duplicate names
    fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        ir_type: IrType,
        type_name: impl Into<String>,
    ) {
        if let Err(err) = self.table.declare_symbol(name, kind, ir_type, type_name) {
            error!(target: "semantic", "{}", err);
        }
    }

    fn visit_declaration(&mut self, id: NodeId) -> LoamResult<()> {
        match &self.ast.node(id).data {
            NodeData::Class(decl) => self.visit_type_declaration(&decl.clone(), "ref type"),
            NodeData::Struct(decl) => self.visit_type_declaration(&decl.clone(), "type"),
            NodeData::Interface(decl) => self.visit_interface_declaration(&decl.clone()),
            NodeData::Enum(_) => self.visit_enum_declaration(id),
            NodeData::Function(_) => self.visit_function_declaration(id),
            NodeData::Variable(_) | NodeData::Field(_) => self.visit_variable_declaration(id),
            NodeData::Namespace(_) => self.visit_namespace_declaration(id),
            _ => Ok(()),
        }
    }

    fn visit_type_declaration(&mut self, decl: &TypeDecl, tag: &str) -> LoamResult<()> {
        let Some(type_name) = self.name_of(decl.name) else {
            return Ok(());
        };
        // Classes and structs are reference-shaped at the symbol level.
        self.declare(&type_name, SymbolKind::Class, IrType::Ptr, tag);

        self.table.enter_named_scope(type_name.clone());
        for &member in &decl.members {
            if self.ast.cast_or_error(member, NodeKind::Declaration).is_some() {
                if self.ast.is_a(member, NodeKind::FunctionDeclaration) {
                    self.visit_member_function_declaration(member, &type_name)?;
                } else {
                    self.visit_declaration(member)?;
                }
            }
        }
        self.table.exit_scope();
        Ok(())
    }

    fn visit_interface_declaration(&mut self, decl: &TypeDecl) -> LoamResult<()> {
        let Some(interface_name) = self.name_of(decl.name) else {
            return Ok(());
        };
        self.declare(&interface_name, SymbolKind::Class, IrType::Ptr, "interface");

        self.table.enter_named_scope(interface_name.clone());
        for &member in &decl.members {
            if self.ast.cast_or_error(member, NodeKind::Declaration).is_some() {
                self.visit_declaration(member)?;
            }
        }
        self.table.exit_scope();
        Ok(())
    }

    fn visit_enum_declaration(&mut self, id: NodeId) -> LoamResult<()> {
        let Some(decl) = self.ast.node(id).as_enum().cloned() else {
            return Ok(());
        };
        let Some(enum_name) = self.name_of(decl.name) else {
            return Ok(());
        };
        self.declare(&enum_name, SymbolKind::Enum, IrType::I32, "enum");

        self.table.enter_named_scope(enum_name.clone());
        for &case in &decl.cases {
            if let Some(case_name) = self.name_of(case) {
                self.declare(&case_name, SymbolKind::Variable, IrType::I32, "enum case");
            }
        }
        for &method in &decl.methods {
            if self
                .ast
                .cast_or_error(method, NodeKind::FunctionDeclaration)
                .is_some()
            {
                self.visit_function_declaration(method)?;
            }
        }
        self.table.exit_scope();
        Ok(())
    }

    fn visit_member_function_declaration(
        &mut self,
        id: NodeId,
        owner_type: &str,
    ) -> LoamResult<()> {
        let Some(decl) = self.ast.node(id).as_function().cloned() else {
            return Ok(());
        };
        let Some(function_name) = self.name_of(decl.name) else {
            return Ok(());
        };
        let return_type_name = match decl.return_type {
            Some(type_node) => self.type_string(type_node)?,
            None => "void".to_string(),
        };
        let return_ir_type = self.table.ir_type_for_name(&return_type_name)?;

        // The member function is visible inside the type scope.
        self.declare(
            &function_name,
            SymbolKind::Function,
            return_ir_type,
            return_type_name.clone(),
        );

        let scope_name = format!("{}::{}", owner_type, function_name);
        self.table.enter_named_scope(scope_name);

        debug!(
            target: "semantic",
            "member function '{}' in type '{}' has {} parameters",
            function_name,
            owner_type,
            decl.parameters.len()
        );

        // Implicit receiver: a pointer to the owning type.
        let this_type = IrType::ptr_to(self.table.ir_type_for_name(owner_type)?);
        self.declare(
            "this",
            SymbolKind::Parameter,
            this_type,
            format!("{}*", owner_type),
        );

        self.declare_parameters(&decl.parameters)?;
        self.visit_body_statements(decl.body)?;

        self.table.exit_scope();
        Ok(())
    }

    fn visit_function_declaration(&mut self, id: NodeId) -> LoamResult<()> {
        let Some(decl) = self.ast.node(id).as_function().cloned() else {
            return Ok(());
        };
        let Some(function_name) = self.name_of(decl.name) else {
            return Ok(());
        };
        let return_type_name = match decl.return_type {
            Some(type_node) => self.type_string(type_node)?,
            None => "void".to_string(),
        };
        let return_ir_type = self.table.ir_type_for_name(&return_type_name)?;
        self.declare(
            &function_name,
            SymbolKind::Function,
            return_ir_type,
            return_type_name.clone(),
        );

        self.table.enter_named_scope(function_name.clone());
        debug!(
            target: "semantic",
            "function '{}' has {} parameters", function_name, decl.parameters.len()
        );
        self.declare_parameters(&decl.parameters)?;
        // The function scope doubles as the body's scope.
        self.visit_body_statements(decl.body)?;
        self.table.exit_scope();
        Ok(())
    }

    fn declare_parameters(&mut self, parameters: &[NodeId]) -> LoamResult<()> {
        for &parameter in parameters {
            if self.ast.cast_or_error(parameter, NodeKind::Parameter).is_none() {
                continue;
            }
            let Some(decl) = self.ast.node(parameter).as_parameter().cloned() else {
                continue;
            };
            let Some(parameter_name) = self.name_of(decl.name) else {
                continue;
            };
            let type_name = self.type_string(decl.type_name)?;
            let ir_type = self.table.ir_type_for_name(&type_name)?;
            self.declare(&parameter_name, SymbolKind::Parameter, ir_type, type_name);
        }
        Ok(())
    }

    /// Visit a function body's statements without opening an extra scope
    fn visit_body_statements(&mut self, body: Option<NodeId>) -> LoamResult<()> {
        let Some(body) = body else {
            return Ok(());
        };
        let NodeData::Block { statements } = &self.ast.node(body).data else {
            error!(target: "semantic", "function body is not a block statement");
            return Ok(());
        };
        for &statement in &statements.clone() {
            if self.ast.cast_or_error(statement, NodeKind::Statement).is_some() {
                self.visit_statement(statement)?;
            }
        }
        Ok(())
    }

    fn visit_variable_declaration(&mut self, id: NodeId) -> LoamResult<()> {
        let Some(decl) = self.ast.node(id).as_variable().cloned() else {
            return Ok(());
        };
        if let Some(type_node) = decl.type_name {
            // Explicit type: one fully typed symbol per declared name.
            let type_name = self.type_string(type_node)?;
            let ir_type = self.table.ir_type_for_name(&type_name)?;
            for &name_node in &decl.names {
                if let Some(name) = self.name_of(name_node) {
                    self.declare(&name, SymbolKind::Variable, ir_type.clone(), type_name.clone());
                }
            }
        } else {
            // Inferred type: each name becomes an unresolved symbol bound to
            // the shared initializer.
            for &name_node in &decl.names {
                let Some(name) = self.name_of(name_node) else {
                    continue;
                };
                if let Err(err) = self.table.declare_unresolved_symbol(
                    name.clone(),
                    SymbolKind::Variable,
                    decl.initializer,
                    self.ast,
                ) {
                    error!(target: "semantic", "{}", err);
                }
            }
        }
        Ok(())
    }

    fn visit_namespace_declaration(&mut self, id: NodeId) -> LoamResult<()> {
        let Some(body) = (match &self.ast.node(id).data {
            NodeData::Namespace(decl) => Some(decl.body),
            _ => None,
        }) else {
            return Ok(());
        };
        self.table.enter_scope();
        self.visit_statement(body)?;
        self.table.exit_scope();
        Ok(())
    }

    fn visit_statement(&mut self, id: NodeId) -> LoamResult<()> {
        match &self.ast.node(id).data {
            NodeData::Block { statements } => {
                self.table.enter_scope();
                for &statement in &statements.clone() {
                    if self.ast.cast_or_error(statement, NodeKind::Statement).is_some() {
                        self.visit_statement(statement)?;
                    }
                }
                self.table.exit_scope();
                Ok(())
            }
            NodeData::Variable(_) | NodeData::Field(_) => self.visit_variable_declaration(id),
            NodeData::If(stmt) => {
                let stmt = stmt.clone();
                self.visit_statement(stmt.then_branch)?;
                if let Some(else_branch) = stmt.else_branch {
                    self.visit_statement(else_branch)?;
                }
                Ok(())
            }
            NodeData::While(stmt) => {
                let body = stmt.body;
                self.visit_statement(body)
            }
            NodeData::For(stmt) => {
                let stmt = stmt.clone();
                // One scope wraps the initializer and the body.
                self.table.enter_scope();
                if let Some(initializer) = stmt.initializer {
                    self.visit_statement(initializer)?;
                }
                self.visit_statement(stmt.body)?;
                self.table.exit_scope();
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::LiteralKind;
    use crate::errors::Span;
    use crate::semantic::symbol_table::ScopeId;

    fn span() -> Span {
        Span::default()
    }

    fn unit_of(ast: &mut Ast, statements: Vec<NodeId>) -> CompilationUnitId {
        let id = ast.compilation_unit(statements, Span::default());
        CompilationUnitId::new(ast, id).unwrap()
    }

    fn build(ast: &Ast, unit: CompilationUnitId) -> SymbolTable {
        let mut table = SymbolTable::new();
        SymbolTableBuilder::new(&mut table, ast).build(unit).unwrap();
        table
    }

    #[test]
    fn test_function_scope_holds_parameters_and_locals() {
        // i32 add(i32 a, i32 b) { i32 sum; }
        let mut ast = Ast::new();
        let a_name = ast.identifier("a", span());
        let a_ty = ast.type_name("i32", span());
        let a = ast.parameter(a_name, a_ty, span());
        let b_name = ast.identifier("b", span());
        let b_ty = ast.type_name("i32", span());
        let b = ast.parameter(b_name, b_ty, span());
        let sum_name = ast.identifier("sum", span());
        let sum_ty = ast.type_name("i32", span());
        let sum = ast.variable_decl(vec![sum_name], Some(sum_ty), None, span());
        let body = ast.block(vec![sum], span());
        let fn_name = ast.identifier("add", span());
        let ret = ast.type_name("i32", span());
        let func = ast.function_decl(fn_name, vec![a, b], Some(ret), Some(body), span());
        let unit = unit_of(&mut ast, vec![func]);

        let table = build(&ast, unit);

        let func_symbol = table.lookup_in_scope(ScopeId::GLOBAL, "add").unwrap();
        assert_eq!(func_symbol.kind, SymbolKind::Function);
        assert_eq!(func_symbol.type_name, "i32");

        let scope = table.find_scope_by_name("add").unwrap();
        assert_eq!(table.lookup_in_scope(scope, "a").unwrap().kind, SymbolKind::Parameter);
        assert_eq!(table.lookup_in_scope(scope, "b").unwrap().kind, SymbolKind::Parameter);
        // The function scope is the body's scope: no extra block scope.
        assert_eq!(table.lookup_in_scope(scope, "sum").unwrap().kind, SymbolKind::Variable);
    }

    #[test]
    fn test_omitted_return_type_defaults_to_void() {
        let mut ast = Ast::new();
        let name = ast.identifier("run", span());
        let body = ast.block(vec![], span());
        let func = ast.function_decl(name, vec![], None, Some(body), span());
        let unit = unit_of(&mut ast, vec![func]);

        let table = build(&ast, unit);
        let symbol = table.lookup_in_scope(ScopeId::GLOBAL, "run").unwrap();
        assert_eq!(symbol.type_name, "void");
        assert_eq!(symbol.ir_type, IrType::Void);
    }

    #[test]
    fn test_class_members_and_method_scope() {
        // class C { i32 x; f() {} }
        let mut ast = Ast::new();
        let x_name = ast.identifier("x", span());
        let x_ty = ast.type_name("i32", span());
        let field = ast.field_decl(vec![x_name], Some(x_ty), None, span());
        let f_name = ast.identifier("f", span());
        let f_body = ast.block(vec![], span());
        let method = ast.function_decl(f_name, vec![], None, Some(f_body), span());
        let c_name = ast.identifier("C", span());
        let class = ast.class_decl(c_name, vec![field, method], span());
        let unit = unit_of(&mut ast, vec![class]);

        let table = build(&ast, unit);

        let class_symbol = table.lookup_in_scope(ScopeId::GLOBAL, "C").unwrap();
        assert_eq!(class_symbol.kind, SymbolKind::Class);
        assert_eq!(class_symbol.ir_type, IrType::Ptr);
        assert_eq!(class_symbol.type_name, "ref type");

        let class_scope = table.find_scope_by_name("C").unwrap();
        assert_eq!(
            table.lookup_in_scope(class_scope, "x").unwrap().kind,
            SymbolKind::Variable
        );
        assert_eq!(
            table.lookup_in_scope(class_scope, "f").unwrap().kind,
            SymbolKind::Function
        );

        // The method scope carries the implicit receiver.
        let method_scope = table.find_scope_by_name("C::f").unwrap();
        let this = table.lookup_in_scope(method_scope, "this").unwrap();
        assert_eq!(this.kind, SymbolKind::Parameter);
        assert_eq!(this.type_name, "C*");
        assert_eq!(this.ir_type.pointee().map(|t| t.to_string()), Some("C".to_string()));
    }

    #[test]
    fn test_unqualified_field_access_inside_method() {
        // class C { i32 x; f() { return x; } }
        let mut ast = Ast::new();
        let x_name = ast.identifier("x", span());
        let x_ty = ast.type_name("i32", span());
        let field = ast.field_decl(vec![x_name], Some(x_ty), None, span());
        let x_ref = ast.identifier_expr("x", span());
        let ret = ast.return_stmt(Some(x_ref), span());
        let f_body = ast.block(vec![ret], span());
        let f_name = ast.identifier("f", span());
        let method = ast.function_decl(f_name, vec![], None, Some(f_body), span());
        let c_name = ast.identifier("C", span());
        let class = ast.class_decl(c_name, vec![field, method], span());
        let unit = unit_of(&mut ast, vec![class]);

        let mut table = build(&ast, unit);

        table.push_scope_named("C::f").unwrap();
        let found = table.lookup("x").expect("field should be visible in method scope");
        assert_eq!(found.kind, SymbolKind::Variable);
        assert_eq!(found.type_name, "i32");
        table.pop_scope();

        // Any non-method scope does not see the field.
        assert!(table.lookup("x").is_none());
    }

    #[test]
    fn test_interface_tagged_as_interface() {
        let mut ast = Ast::new();
        let m_name = ast.identifier("area", span());
        let ret = ast.type_name("f64", span());
        let method = ast.function_decl(m_name, vec![], Some(ret), None, span());
        let name = ast.identifier("Shape", span());
        let interface = ast.interface_decl(name, vec![method], span());
        let unit = unit_of(&mut ast, vec![interface]);

        let table = build(&ast, unit);
        let symbol = table.lookup_in_scope(ScopeId::GLOBAL, "Shape").unwrap();
        assert_eq!(symbol.kind, SymbolKind::Class);
        assert_eq!(symbol.type_name, "interface");

        let scope = table.find_scope_by_name("Shape").unwrap();
        assert_eq!(
            table.lookup_in_scope(scope, "area").unwrap().type_name,
            "f64"
        );
    }

    #[test]
    fn test_enum_cases_are_i32_variables() {
        let mut ast = Ast::new();
        let red = ast.identifier("Red", span());
        let green = ast.identifier("Green", span());
        let name = ast.identifier("Color", span());
        let decl = ast.enum_decl(name, vec![red, green], vec![], span());
        let unit = unit_of(&mut ast, vec![decl]);

        let table = build(&ast, unit);
        let symbol = table.lookup_in_scope(ScopeId::GLOBAL, "Color").unwrap();
        assert_eq!(symbol.kind, SymbolKind::Enum);
        assert_eq!(symbol.ir_type, IrType::I32);

        let scope = table.find_scope_by_name("Color").unwrap();
        for case in ["Red", "Green"] {
            let case_symbol = table.lookup_in_scope(scope, case).unwrap();
            assert_eq!(case_symbol.kind, SymbolKind::Variable);
            assert_eq!(case_symbol.ir_type, IrType::I32);
            assert_eq!(case_symbol.type_name, "enum case");
        }
    }

    #[test]
    fn test_comma_separated_names_share_one_type() {
        // i64 x, y;
        let mut ast = Ast::new();
        let x = ast.identifier("x", span());
        let y = ast.identifier("y", span());
        let ty = ast.type_name("i64", span());
        let decl = ast.variable_decl(vec![x, y], Some(ty), None, span());
        let unit = unit_of(&mut ast, vec![decl]);

        let table = build(&ast, unit);
        for name in ["x", "y"] {
            let symbol = table.lookup_in_scope(ScopeId::GLOBAL, name).unwrap();
            assert_eq!(symbol.ir_type, IrType::I64);
            assert_eq!(symbol.type_name, "i64");
            assert!(symbol.is_resolved());
        }
    }

    #[test]
    fn test_inferred_names_share_the_initializer() {
        // var x, y = 1;
        let mut ast = Ast::new();
        let x = ast.identifier("x", span());
        let y = ast.identifier("y", span());
        let one = ast.literal(LiteralKind::Integer, "1", span());
        let decl = ast.variable_decl(vec![x, y], None, Some(one), span());
        let unit = unit_of(&mut ast, vec![decl]);

        let table = build(&ast, unit);
        for name in ["x", "y"] {
            let symbol = table.lookup_in_scope(ScopeId::GLOBAL, name).unwrap();
            assert!(!symbol.is_resolved());
            assert_eq!(symbol.initializer, Some(one));
        }
    }

    #[test]
    fn test_block_and_for_statements_open_scopes() {
        // fn f() { { i32 a; } for (i32 i;;) { } }
        let mut ast = Ast::new();
        let a_name = ast.identifier("a", span());
        let a_ty = ast.type_name("i32", span());
        let a_decl = ast.variable_decl(vec![a_name], Some(a_ty), None, span());
        let inner_block = ast.block(vec![a_decl], span());

        let i_name = ast.identifier("i", span());
        let i_ty = ast.type_name("i32", span());
        let i_decl = ast.variable_decl(vec![i_name], Some(i_ty), None, span());
        let for_body = ast.block(vec![], span());
        let for_stmt = ast.for_stmt(Some(i_decl), None, vec![], for_body, span());

        let body = ast.block(vec![inner_block, for_stmt], span());
        let f_name = ast.identifier("f", span());
        let func = ast.function_decl(f_name, vec![], None, Some(body), span());
        let unit = unit_of(&mut ast, vec![func]);

        let table = build(&ast, unit);
        let function_scope = table.find_scope_by_name("f").unwrap();

        // Neither local leaked into the function scope.
        assert!(table.lookup_in_scope(function_scope, "a").is_none());
        assert!(table.lookup_in_scope(function_scope, "i").is_none());

        // Both landed in anonymous child scopes of the function scope.
        for name in ["a", "i"] {
            let holder = (0..table.scope_count() as u32)
                .map(ScopeId::from_raw)
                .find(|&id| table.lookup_in_scope(id, name).is_some())
                .unwrap_or_else(|| panic!("'{}' was not declared anywhere", name));
            let scope = table.scope(holder).unwrap();
            assert!(scope.name.starts_with("scope_"));
            assert_eq!(scope.parent, Some(function_scope));
        }
    }

    #[test]
    fn test_namespace_opens_anonymous_scope() {
        let mut ast = Ast::new();
        let v_name = ast.identifier("hidden", span());
        let v_ty = ast.type_name("bool", span());
        let decl = ast.variable_decl(vec![v_name], Some(v_ty), None, span());
        let body = ast.block(vec![decl], span());
        let ns_name = ast.identifier("util", span());
        let ns = ast.namespace_decl(ns_name, body, span());
        let unit = unit_of(&mut ast, vec![ns]);

        let table = build(&ast, unit);
        assert!(table.lookup_in_scope(ScopeId::GLOBAL, "hidden").is_none());
        // The namespace has no named scope: its body lives in anonymous ones.
        assert!(table.find_scope_by_name("util").is_none());
    }

    #[test]
    fn test_type_string_rendering() {
        let mut ast = Ast::new();
        let element = ast.type_name("i32", span());
        let array = ast.array_type_name(element, span());
        let base = ast.type_name("List", span());
        let arg = ast.type_name("bool", span());
        let generic = ast.generic_type_name(base, vec![arg], span());
        let left = ast.type_name("sys", span());
        let right = ast.identifier("Clock", span());
        let qualified = ast.qualified_type_name(left, right, span());
        let inner = ast.type_name("C", span());
        let pointer = ast.pointer_type_name(inner, span());

        let mut table = SymbolTable::new();
        let builder = SymbolTableBuilder::new(&mut table, &ast);
        assert_eq!(builder.type_string(array).unwrap(), "i32[]");
        assert_eq!(builder.type_string(generic).unwrap(), "List<bool>");
        assert_eq!(builder.type_string(qualified).unwrap(), "sys::Clock");
        assert_eq!(builder.type_string(pointer).unwrap(), "C*");
    }
}
