//! Three-state result of a parser production
//!
//! `Success` carries the produced node, `Error` carries a recovered error
//! node that is a first-class citizen of the tree, and `Fatal` signals early
//! termination without attaching further diagnostics (the diagnostic that
//! caused it was already recorded at the point of failure).

use crate::ast::{Ast, NodeId, NodeKind};

/// A typed handle to a node in the arena.
///
/// Stands in for "T derives from the AST base": any handle can be projected
/// down to its raw [`NodeId`].
pub trait AstHandle: Copy {
    fn node_id(self) -> NodeId;
}

impl AstHandle for NodeId {
    fn node_id(self) -> NodeId {
        self
    }
}

/// Handle guaranteed by construction to refer to a compilation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilationUnitId(NodeId);

impl CompilationUnitId {
    /// Wrap `id` after checking its kind; `None` if it is not a compilation
    /// unit
    pub fn new(ast: &Ast, id: NodeId) -> Option<Self> {
        if ast.is_a(id, NodeKind::CompilationUnit) {
            Some(Self(id))
        } else {
            None
        }
    }
}

impl AstHandle for CompilationUnitId {
    fn node_id(self) -> NodeId {
        self.0
    }
}

/// Outcome of one parser production
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseResult<T: AstHandle> {
    /// The production succeeded and built `T`
    Success(T),
    /// The production recovered; the id refers to an error node
    Error(NodeId),
    /// The production aborted; propagate without further diagnostics
    Fatal,
}

impl<T: AstHandle> ParseResult<T> {
    pub fn success(node: T) -> Self {
        ParseResult::Success(node)
    }

    pub fn error(error_node: NodeId) -> Self {
        ParseResult::Error(error_node)
    }

    pub fn fatal() -> Self {
        ParseResult::Fatal
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ParseResult::Error(_))
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseResult::Fatal)
    }

    /// The success payload, only in the success state
    pub fn node(&self) -> Option<T> {
        match self {
            ParseResult::Success(node) => Some(*node),
            _ => None,
        }
    }

    /// The error node, only in the error state
    pub fn error_node(&self) -> Option<NodeId> {
        match self {
            ParseResult::Error(id) => Some(*id),
            _ => None,
        }
    }

    /// Uniform projection to the underlying AST node: the success payload or
    /// the error node; nothing for fatal
    pub fn ast_node(&self) -> Option<NodeId> {
        match self {
            ParseResult::Success(node) => Some(node.node_id()),
            ParseResult::Error(id) => Some(*id),
            ParseResult::Fatal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Span;

    #[test]
    fn test_states_are_mutually_exclusive() {
        let mut ast = Ast::new();
        let unit = ast.compilation_unit(vec![], Span::default());
        let handle = CompilationUnitId::new(&ast, unit).unwrap();

        let ok = ParseResult::success(handle);
        assert!(ok.is_success() && !ok.is_error() && !ok.is_fatal());
        assert_eq!(ok.node(), Some(handle));
        assert_eq!(ok.error_node(), None);
        assert_eq!(ok.ast_node(), Some(unit));

        let err_node = ast.error_node("expected declaration", Span::default());
        let err: ParseResult<CompilationUnitId> = ParseResult::error(err_node);
        assert!(err.is_error() && !err.is_success());
        assert_eq!(err.node(), None);
        assert_eq!(err.error_node(), Some(err_node));
        assert_eq!(err.ast_node(), Some(err_node));

        let fatal: ParseResult<CompilationUnitId> = ParseResult::fatal();
        assert!(fatal.is_fatal());
        assert_eq!(fatal.node(), None);
        assert_eq!(fatal.error_node(), None);
        assert_eq!(fatal.ast_node(), None);
    }

    #[test]
    fn test_typed_handle_rejects_wrong_kind() {
        let mut ast = Ast::new();
        let ident = ast.identifier("x", Span::default());
        assert!(CompilationUnitId::new(&ast, ident).is_none());
    }
}
