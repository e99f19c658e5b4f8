//! Parser output contract
//!
//! The parser itself is an external collaborator; this module specifies the
//! shape of what it hands to semantic analysis: an AST arena rooted at a
//! compilation unit, wrapped in a [`ParseResult`].

mod parse_result;

pub use parse_result::{AstHandle, CompilationUnitId, ParseResult};
