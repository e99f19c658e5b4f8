//! Structural visitor over the AST
//!
//! One method per node kind, abstract bases included. Every default
//! implementation delegates to the base kind's method, forming a chain up to
//! the no-op [`Visitor::visit_node`], so a visitor that overrides only
//! `visit_expression` observes every expression regardless of its concrete
//! variant. [`dispatch`] routes a node to the method for its dynamic kind;
//! [`walk`] does so for a whole subtree in pre-order.

use crate::ast::node::{Ast, NodeData, NodeId};

/// Visitor over the node hierarchy with base-kind fallback
pub trait Visitor {
    /// Root fallback: do nothing
    fn visit_node(&mut self, _ast: &Ast, _id: NodeId) {}

    fn visit_token(&mut self, ast: &Ast, id: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_identifier(&mut self, ast: &Ast, id: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_error(&mut self, ast: &Ast, id: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_literal_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_identifier_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_parenthesized_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_unary_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_binary_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_assignment_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_call_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_member_access_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_new_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_this_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_cast_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_indexer_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_type_of_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_size_of_expression(&mut self, ast: &Ast, id: NodeId) {
        self.visit_expression(ast, id);
    }

    fn visit_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_empty_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_block_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_expression_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_if_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_while_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_for_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_return_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_break_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_continue_statement(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_using_directive(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_statement(ast, id);
    }

    fn visit_parameter(&mut self, ast: &Ast, id: NodeId) {
        self.visit_declaration(ast, id);
    }

    fn visit_variable_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_declaration(ast, id);
    }

    fn visit_member_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_declaration(ast, id);
    }

    fn visit_field_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_member_declaration(ast, id);
    }

    fn visit_function_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_member_declaration(ast, id);
    }

    fn visit_generic_parameter(&mut self, ast: &Ast, id: NodeId) {
        self.visit_declaration(ast, id);
    }

    fn visit_type_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_declaration(ast, id);
    }

    fn visit_class_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_type_declaration(ast, id);
    }

    fn visit_struct_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_type_declaration(ast, id);
    }

    fn visit_interface_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_type_declaration(ast, id);
    }

    fn visit_enum_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_type_declaration(ast, id);
    }

    fn visit_namespace_declaration(&mut self, ast: &Ast, id: NodeId) {
        self.visit_declaration(ast, id);
    }

    fn visit_type_name(&mut self, ast: &Ast, id: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_qualified_type_name(&mut self, ast: &Ast, id: NodeId) {
        self.visit_type_name(ast, id);
    }

    fn visit_pointer_type_name(&mut self, ast: &Ast, id: NodeId) {
        self.visit_type_name(ast, id);
    }

    fn visit_array_type_name(&mut self, ast: &Ast, id: NodeId) {
        self.visit_type_name(ast, id);
    }

    fn visit_generic_type_name(&mut self, ast: &Ast, id: NodeId) {
        self.visit_type_name(ast, id);
    }

    fn visit_compilation_unit(&mut self, ast: &Ast, id: NodeId) {
        self.visit_node(ast, id);
    }
}

/// Invoke the visitor method for the node's dynamic kind
pub fn dispatch<V: Visitor + ?Sized>(ast: &Ast, id: NodeId, visitor: &mut V) {
    match &ast.node(id).data {
        NodeData::Token => visitor.visit_token(ast, id),
        NodeData::Identifier { .. } => visitor.visit_identifier(ast, id),
        NodeData::Error { .. } => visitor.visit_error(ast, id),
        NodeData::Literal(_) => visitor.visit_literal_expression(ast, id),
        NodeData::IdentifierExpr { .. } => visitor.visit_identifier_expression(ast, id),
        NodeData::Paren { .. } => visitor.visit_parenthesized_expression(ast, id),
        NodeData::Unary(_) => visitor.visit_unary_expression(ast, id),
        NodeData::Binary(_) => visitor.visit_binary_expression(ast, id),
        NodeData::Assignment(_) => visitor.visit_assignment_expression(ast, id),
        NodeData::Call(_) => visitor.visit_call_expression(ast, id),
        NodeData::MemberAccess(_) => visitor.visit_member_access_expression(ast, id),
        NodeData::New(_) => visitor.visit_new_expression(ast, id),
        NodeData::This => visitor.visit_this_expression(ast, id),
        NodeData::Cast(_) => visitor.visit_cast_expression(ast, id),
        NodeData::Indexer(_) => visitor.visit_indexer_expression(ast, id),
        NodeData::TypeOf { .. } => visitor.visit_type_of_expression(ast, id),
        NodeData::SizeOf { .. } => visitor.visit_size_of_expression(ast, id),
        NodeData::Empty => visitor.visit_empty_statement(ast, id),
        NodeData::Block { .. } => visitor.visit_block_statement(ast, id),
        NodeData::ExpressionStmt { .. } => visitor.visit_expression_statement(ast, id),
        NodeData::If(_) => visitor.visit_if_statement(ast, id),
        NodeData::While(_) => visitor.visit_while_statement(ast, id),
        NodeData::For(_) => visitor.visit_for_statement(ast, id),
        NodeData::Return { .. } => visitor.visit_return_statement(ast, id),
        NodeData::Break => visitor.visit_break_statement(ast, id),
        NodeData::Continue => visitor.visit_continue_statement(ast, id),
        NodeData::UsingDirective { .. } => visitor.visit_using_directive(ast, id),
        NodeData::Parameter(_) => visitor.visit_parameter(ast, id),
        NodeData::Variable(_) => visitor.visit_variable_declaration(ast, id),
        NodeData::Field(_) => visitor.visit_field_declaration(ast, id),
        NodeData::Function(_) => visitor.visit_function_declaration(ast, id),
        NodeData::GenericParameter { .. } => visitor.visit_generic_parameter(ast, id),
        NodeData::Class(_) => visitor.visit_class_declaration(ast, id),
        NodeData::Struct(_) => visitor.visit_struct_declaration(ast, id),
        NodeData::Interface(_) => visitor.visit_interface_declaration(ast, id),
        NodeData::Enum(_) => visitor.visit_enum_declaration(ast, id),
        NodeData::Namespace(_) => visitor.visit_namespace_declaration(ast, id),
        NodeData::TypeName { .. } => visitor.visit_type_name(ast, id),
        NodeData::QualifiedTypeName { .. } => visitor.visit_qualified_type_name(ast, id),
        NodeData::PointerTypeName { .. } => visitor.visit_pointer_type_name(ast, id),
        NodeData::ArrayTypeName { .. } => visitor.visit_array_type_name(ast, id),
        NodeData::GenericTypeName(_) => visitor.visit_generic_type_name(ast, id),
        NodeData::CompilationUnit { .. } => visitor.visit_compilation_unit(ast, id),
    }
}

/// Dispatch the node, then its children, in pre-order
pub fn walk<V: Visitor + ?Sized>(ast: &Ast, id: NodeId, visitor: &mut V) {
    dispatch(ast, id, visitor);
    let mut children = Vec::new();
    ast.node(id).children(&mut children);
    for child in children {
        walk(ast, child, visitor);
    }
}
