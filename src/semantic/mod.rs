//! Semantic analysis: symbol table construction and type resolution

mod builder;
mod resolver;
mod symbol_table;

pub use builder::SymbolTableBuilder;
pub use resolver::{
    extract_dependencies, infer_type, infer_type_in_context, TypeResolver, MAX_ITERATIONS,
};
pub use symbol_table::{ResolutionState, Scope, ScopeId, Symbol, SymbolKind, SymbolTable};

use crate::ast::Ast;
use crate::errors::LoamResult;
use crate::parser::CompilationUnitId;

/// Run both semantic passes on a parsed compilation unit: build the symbol
/// table, then resolve every deferred type to a fixpoint.
pub fn analyze(ast: &Ast, unit: CompilationUnitId) -> LoamResult<SymbolTable> {
    let mut table = SymbolTable::new();
    SymbolTableBuilder::new(&mut table, ast).build(unit)?;
    TypeResolver::new(&mut table, ast).resolve_all()?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::LiteralKind;
    use crate::errors::Span;
    use crate::ir::IrType;

    fn span() -> Span {
        Span::default()
    }

    #[test]
    fn test_analyze_builds_and_resolves() {
        // var x = 1 + 2; at global scope
        let mut ast = Ast::new();
        let one = ast.literal(LiteralKind::Integer, "1", span());
        let two = ast.literal(LiteralKind::Integer, "2", span());
        let sum = ast.binary(one, crate::ast::BinaryOp::Add, two, span());
        let x = ast.identifier("x", span());
        let decl = ast.variable_decl(vec![x], None, Some(sum), span());
        let unit_node = ast.compilation_unit(vec![decl], span());
        let unit = CompilationUnitId::new(&ast, unit_node).unwrap();

        let table = analyze(&ast, unit).unwrap();
        let symbol = table.lookup_in_scope(ScopeId::GLOBAL, "x").unwrap();
        assert!(symbol.is_resolved());
        assert_eq!(symbol.type_name, "i32");
        assert_eq!(symbol.ir_type, IrType::I32);
        assert!(symbol.dependencies.is_empty());
    }

    #[test]
    fn test_analyze_reports_unresolvable_program() {
        // var a = b; var b = a;
        let mut ast = Ast::new();
        let b_ref = ast.identifier_expr("b", span());
        let a = ast.identifier("a", span());
        let decl_a = ast.variable_decl(vec![a], None, Some(b_ref), span());
        let a_ref = ast.identifier_expr("a", span());
        let b = ast.identifier("b", span());
        let decl_b = ast.variable_decl(vec![b], None, Some(a_ref), span());
        let unit_node = ast.compilation_unit(vec![decl_a, decl_b], span());
        let unit = CompilationUnitId::new(&ast, unit_node).unwrap();

        assert!(analyze(&ast, unit).is_err());
    }

    #[test]
    fn test_analyze_member_access_scenario() {
        // class Player { i32 b; }  var p = new Player();  var q = p.b;
        let mut ast = Ast::new();
        let b_name = ast.identifier("b", span());
        let b_ty = ast.type_name("i32", span());
        let field = ast.field_decl(vec![b_name], Some(b_ty), None, span());
        let player_name = ast.identifier("Player", span());
        let class = ast.class_decl(player_name, vec![field], span());

        let player_ty = ast.type_name("Player", span());
        let new_player = ast.new_expr(player_ty, vec![], span());
        let p = ast.identifier("p", span());
        let decl_p = ast.variable_decl(vec![p], None, Some(new_player), span());

        let p_ref = ast.identifier_expr("p", span());
        let b_ident = ast.identifier("b", span());
        let p_dot_b = ast.member_access(p_ref, b_ident, span());
        let q = ast.identifier("q", span());
        let decl_q = ast.variable_decl(vec![q], None, Some(p_dot_b), span());

        let unit_node = ast.compilation_unit(vec![class, decl_p, decl_q], span());
        let unit = CompilationUnitId::new(&ast, unit_node).unwrap();

        let table = analyze(&ast, unit).unwrap();

        let p_symbol = table.lookup_in_scope(ScopeId::GLOBAL, "p").unwrap();
        assert_eq!(p_symbol.type_name, "Player");
        let IrType::Struct(layout) = &p_symbol.ir_type else {
            panic!("expected struct type for p");
        };
        assert_eq!(layout.fields[0].name, "b");

        let q_symbol = table.lookup_in_scope(ScopeId::GLOBAL, "q").unwrap();
        assert_eq!(q_symbol.type_name, "i32");
        assert_eq!(q_symbol.ir_type, IrType::I32);
    }
}
