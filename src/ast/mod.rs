//! AST object model: arena-owned nodes, flat RTTI, and the structural visitor

mod node;
mod rtti;
mod visitor;

pub use node::{
    AssignmentExpr, Ast, BinaryExpr, BinaryOp, CallExpr, CastExpr, EnumDecl, ForStmt,
    FunctionDecl, GenericTypeName, IfStmt, IndexerExpr, LiteralExpr, LiteralKind,
    MemberAccessExpr, NamespaceDecl, NewExpr, Node, NodeData, NodeId, ParameterDecl, TokenKind,
    TypeDecl, UnaryExpr, UnaryOp, VariableDecl, WhileStmt,
};
pub use rtti::{initialize, NodeKind, KIND_COUNT};
pub use visitor::{dispatch, walk, Visitor};
