//! Flat runtime type information for the AST hierarchy
//!
//! Every node kind (abstract bases included) is registered in [`NodeKind`],
//! declared in depth-first pre-order of the inheritance tree. The enum
//! discriminant is the compact type-id, so a kind and all of its descendants
//! occupy the contiguous id range `[id, id + descendant_count]` and `is_a`
//! reduces to one subtraction and one comparison.

use std::sync::OnceLock;

/// Compact type-id for every node kind in the hierarchy.
///
/// Declaration order is the depth-first pre-order walk from the root, which
/// is what makes the descendant ranges contiguous. Do not reorder variants
/// without updating [`BASES`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// Abstract root of the hierarchy
    Node = 0,
    Token,
    Identifier,
    Error,
    /// Abstract base of all expressions
    Expression,
    LiteralExpression,
    IdentifierExpression,
    ParenthesizedExpression,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    CallExpression,
    MemberAccessExpression,
    NewExpression,
    ThisExpression,
    CastExpression,
    IndexerExpression,
    TypeOfExpression,
    SizeOfExpression,
    /// Abstract base of all statements
    Statement,
    EmptyStatement,
    BlockStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    ForStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    UsingDirective,
    /// Abstract base of all declarations (declarations are statements)
    Declaration,
    Parameter,
    VariableDeclaration,
    /// Abstract base of type members
    MemberDeclaration,
    FieldDeclaration,
    FunctionDeclaration,
    GenericParameter,
    /// Abstract base of class/struct/interface/enum declarations
    TypeDeclaration,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    NamespaceDeclaration,
    /// Simple (named) type name; also the base of the other type names
    TypeName,
    QualifiedTypeName,
    PointerTypeName,
    ArrayTypeName,
    GenericTypeName,
    CompilationUnit,
}

/// Number of registered node kinds.
pub const KIND_COUNT: usize = NodeKind::CompilationUnit as usize + 1;

/// Base kind of each registered kind, indexed by type-id. The root lists
/// itself.
const BASES: [NodeKind; KIND_COUNT] = {
    use NodeKind::*;
    [
        Node,            // Node
        Node,            // Token
        Node,            // Identifier
        Node,            // Error
        Node,            // Expression
        Expression,      // LiteralExpression
        Expression,      // IdentifierExpression
        Expression,      // ParenthesizedExpression
        Expression,      // UnaryExpression
        Expression,      // BinaryExpression
        Expression,      // AssignmentExpression
        Expression,      // CallExpression
        Expression,      // MemberAccessExpression
        Expression,      // NewExpression
        Expression,      // ThisExpression
        Expression,      // CastExpression
        Expression,      // IndexerExpression
        Expression,      // TypeOfExpression
        Expression,      // SizeOfExpression
        Node,            // Statement
        Statement,       // EmptyStatement
        Statement,       // BlockStatement
        Statement,       // ExpressionStatement
        Statement,       // IfStatement
        Statement,       // WhileStatement
        Statement,       // ForStatement
        Statement,       // ReturnStatement
        Statement,       // BreakStatement
        Statement,       // ContinueStatement
        Statement,       // UsingDirective
        Statement,       // Declaration
        Declaration,     // Parameter
        Declaration,     // VariableDeclaration
        Declaration,     // MemberDeclaration
        MemberDeclaration, // FieldDeclaration
        MemberDeclaration, // FunctionDeclaration
        Declaration,     // GenericParameter
        Declaration,     // TypeDeclaration
        TypeDeclaration, // ClassDeclaration
        TypeDeclaration, // StructDeclaration
        TypeDeclaration, // InterfaceDeclaration
        TypeDeclaration, // EnumDeclaration
        Declaration,     // NamespaceDeclaration
        Node,            // TypeName
        TypeName,        // QualifiedTypeName
        TypeName,        // PointerTypeName
        TypeName,        // ArrayTypeName
        TypeName,        // GenericTypeName
        Node,            // CompilationUnit
    ]
};

const NAMES: [&str; KIND_COUNT] = [
    "Node",
    "Token",
    "Identifier",
    "Error",
    "Expression",
    "LiteralExpression",
    "IdentifierExpression",
    "ParenthesizedExpression",
    "UnaryExpression",
    "BinaryExpression",
    "AssignmentExpression",
    "CallExpression",
    "MemberAccessExpression",
    "NewExpression",
    "ThisExpression",
    "CastExpression",
    "IndexerExpression",
    "TypeOfExpression",
    "SizeOfExpression",
    "Statement",
    "EmptyStatement",
    "BlockStatement",
    "ExpressionStatement",
    "IfStatement",
    "WhileStatement",
    "ForStatement",
    "ReturnStatement",
    "BreakStatement",
    "ContinueStatement",
    "UsingDirective",
    "Declaration",
    "Parameter",
    "VariableDeclaration",
    "MemberDeclaration",
    "FieldDeclaration",
    "FunctionDeclaration",
    "GenericParameter",
    "TypeDeclaration",
    "ClassDeclaration",
    "StructDeclaration",
    "InterfaceDeclaration",
    "EnumDeclaration",
    "NamespaceDeclaration",
    "TypeName",
    "QualifiedTypeName",
    "PointerTypeName",
    "ArrayTypeName",
    "GenericTypeName",
    "CompilationUnit",
];

/// Every kind in id order, for raw-id recovery.
const ALL: [NodeKind; KIND_COUNT] = {
    use NodeKind::*;
    [
        Node, Token, Identifier, Error, Expression, LiteralExpression,
        IdentifierExpression, ParenthesizedExpression, UnaryExpression,
        BinaryExpression, AssignmentExpression, CallExpression,
        MemberAccessExpression, NewExpression, ThisExpression, CastExpression,
        IndexerExpression, TypeOfExpression, SizeOfExpression, Statement,
        EmptyStatement, BlockStatement, ExpressionStatement, IfStatement,
        WhileStatement, ForStatement, ReturnStatement, BreakStatement,
        ContinueStatement, UsingDirective, Declaration, Parameter,
        VariableDeclaration, MemberDeclaration, FieldDeclaration,
        FunctionDeclaration, GenericParameter, TypeDeclaration,
        ClassDeclaration, StructDeclaration, InterfaceDeclaration,
        EnumDeclaration, NamespaceDeclaration, TypeName, QualifiedTypeName,
        PointerTypeName, ArrayTypeName, GenericTypeName, CompilationUnit,
    ]
};

static DESCENDANT_COUNTS: OnceLock<[u8; KIND_COUNT]> = OnceLock::new();

/// One-shot computation of per-kind descendant counts from the base table.
///
/// Idempotent; the query paths call it on demand, so explicit initialization
/// is optional. Verifies that the declaration order really is pre-order,
/// i.e. that every subtree occupies a contiguous id range.
pub fn initialize() -> &'static [u8; KIND_COUNT] {
    DESCENDANT_COUNTS.get_or_init(|| {
        let mut counts = [0u8; KIND_COUNT];
        for id in 1..KIND_COUNT {
            // Every kind contributes one descendant to each ancestor.
            let mut ancestor = BASES[id] as usize;
            loop {
                counts[ancestor] += 1;
                if ancestor == 0 {
                    break;
                }
                ancestor = BASES[ancestor] as usize;
            }
        }
        // Contiguity: a kind must fall inside each ancestor's range.
        for id in 1..KIND_COUNT {
            let mut ancestor = BASES[id] as usize;
            loop {
                debug_assert!(
                    id > ancestor && id <= ancestor + counts[ancestor] as usize,
                    "NodeKind declaration order is not pre-order at {}",
                    NAMES[id]
                );
                if ancestor == 0 {
                    break;
                }
                ancestor = BASES[ancestor] as usize;
            }
        }
        counts
    })
}

impl NodeKind {
    /// The compact type-id
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Registered name, for messages and dumps
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Base kind; `None` for the root
    pub fn base(self) -> Option<NodeKind> {
        if self == NodeKind::Node {
            None
        } else {
            Some(BASES[self as usize])
        }
    }

    /// Number of descendant kinds (direct and transitive)
    pub fn descendant_count(self) -> u8 {
        initialize()[self as usize]
    }

    /// Range test: is this kind `target` or a descendant of it?
    pub fn is_a(self, target: NodeKind) -> bool {
        let id = self as u8;
        let base = target as u8;
        id.wrapping_sub(base) <= target.descendant_count()
    }

    /// Recover a kind from a raw type-id
    pub fn from_id(id: u8) -> Option<NodeKind> {
        ALL.get(id as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_preorder_contiguous() {
        // initialize() debug-asserts contiguity for every kind.
        initialize();
        assert_eq!(NodeKind::Node.descendant_count() as usize, KIND_COUNT - 1);
    }

    #[test]
    fn test_is_a_reflexive_and_root() {
        initialize();
        assert!(NodeKind::BinaryExpression.is_a(NodeKind::BinaryExpression));
        assert!(NodeKind::BinaryExpression.is_a(NodeKind::Expression));
        assert!(NodeKind::BinaryExpression.is_a(NodeKind::Node));
        assert!(!NodeKind::BinaryExpression.is_a(NodeKind::Statement));
    }

    #[test]
    fn test_declarations_are_statements() {
        assert!(NodeKind::ClassDeclaration.is_a(NodeKind::TypeDeclaration));
        assert!(NodeKind::ClassDeclaration.is_a(NodeKind::Declaration));
        assert!(NodeKind::ClassDeclaration.is_a(NodeKind::Statement));
        assert!(NodeKind::FieldDeclaration.is_a(NodeKind::MemberDeclaration));
        assert!(!NodeKind::Parameter.is_a(NodeKind::MemberDeclaration));
    }

    #[test]
    fn test_type_name_is_its_own_base() {
        // Simple type names are concrete and the base of the derived forms.
        assert!(NodeKind::ArrayTypeName.is_a(NodeKind::TypeName));
        assert!(NodeKind::TypeName.is_a(NodeKind::TypeName));
        assert!(!NodeKind::TypeName.is_a(NodeKind::ArrayTypeName));
    }

    #[test]
    fn test_range_test_matches_ancestor_walk() {
        initialize();
        // Exhaustive: the O(1) range test agrees with walking the base chain.
        for a in 0..KIND_COUNT as u8 {
            for b in 0..KIND_COUNT as u8 {
                let kind = NodeKind::from_id(a).unwrap();
                let target = NodeKind::from_id(b).unwrap();
                let mut chain = Some(kind);
                let mut by_chain = false;
                while let Some(k) = chain {
                    if k == target {
                        by_chain = true;
                        break;
                    }
                    chain = k.base();
                }
                assert_eq!(kind.is_a(target), by_chain, "{:?} is_a {:?}", kind, target);
            }
        }
    }

    #[test]
    fn test_from_id_bounds() {
        assert_eq!(NodeKind::from_id(0), Some(NodeKind::Node));
        assert_eq!(
            NodeKind::from_id(KIND_COUNT as u8 - 1),
            Some(NodeKind::CompilationUnit)
        );
        assert_eq!(NodeKind::from_id(KIND_COUNT as u8), None);
    }
}
