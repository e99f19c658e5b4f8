//! Arena-backed AST node storage
//!
//! All nodes live in the [`Ast`] arena that produced them; child links are
//! [`NodeId`] indices, so ownership is strictly tree-shaped and ends when the
//! compilation unit's arena is dropped. The optional parent back-reference is
//! a non-owning index table computed in a post-build pass.

use tracing::error;

use crate::ast::rtti::NodeKind;
use crate::errors::Span;

/// Stable index of a node inside its [`Ast`] arena
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Construct an id from a raw index
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw index
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Token kind attached to a node (the token that introduced it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenKind {
    #[default]
    None,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    BooleanLiteral,
    CharLiteral,
    NullLiteral,
    Class,
    Struct,
    Interface,
    Enum,
    Namespace,
    Fn,
    Var,
    New,
    This,
    Using,
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    EqEq,
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AmpAmp,
    PipePipe,
    Dot,
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Eof,
}

/// Literal variants carried by a literal expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Float,
    Boolean,
    String,
    Char,
    Null,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// Comparison and logical operators yield `bool` regardless of operands
    pub fn yields_bool(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::And
                | BinaryOp::Or
        )
    }
}

/// A literal expression: kind plus the source lexeme
#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub kind: LiteralKind,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: NodeId,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: NodeId,
    pub op: BinaryOp,
    pub right: NodeId,
}

/// `target = source`
#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub target: NodeId,
    pub source: NodeId,
}

/// `target(arguments…)`
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub target: NodeId,
    pub arguments: Vec<NodeId>,
}

/// `target.member`
#[derive(Debug, Clone)]
pub struct MemberAccessExpr {
    pub target: NodeId,
    /// Identifier node naming the member
    pub member: NodeId,
}

/// `new T(arguments…)`
#[derive(Debug, Clone)]
pub struct NewExpr {
    /// Type-name node of the constructed type
    pub type_name: NodeId,
    pub arguments: Vec<NodeId>,
}

/// `(T)expression`
#[derive(Debug, Clone)]
pub struct CastExpr {
    pub target_type: NodeId,
    pub expression: NodeId,
}

/// `target[index]`
#[derive(Debug, Clone)]
pub struct IndexerExpr {
    pub target: NodeId,
    pub index: NodeId,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: NodeId,
    pub then_branch: NodeId,
    pub else_branch: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    pub initializer: Option<NodeId>,
    pub condition: Option<NodeId>,
    pub increments: Vec<NodeId>,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct ParameterDecl {
    /// Identifier node
    pub name: NodeId,
    /// Type-name node
    pub type_name: NodeId,
}

/// One declaration statement covering one or more names, e.g. `i32 x, y;`
/// or `var z = expr;` when the type is omitted and must be inferred.
#[derive(Debug, Clone)]
pub struct VariableDecl {
    /// Identifier nodes, in source order
    pub names: Vec<NodeId>,
    /// Explicit type-name node; absent for inferred declarations
    pub type_name: Option<NodeId>,
    /// Shared initializer expression
    pub initializer: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    /// Identifier node
    pub name: NodeId,
    /// Parameter nodes, in source order
    pub parameters: Vec<NodeId>,
    /// Return type-name node; absent means `void`
    pub return_type: Option<NodeId>,
    /// Block statement; absent for bodiless declarations
    pub body: Option<NodeId>,
}

/// Class, struct or interface declaration
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Identifier node
    pub name: NodeId,
    /// Member declarations, in source order
    pub members: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    /// Identifier node
    pub name: NodeId,
    /// Identifier nodes of the cases, in source order
    pub cases: Vec<NodeId>,
    /// Function declarations
    pub methods: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct NamespaceDecl {
    /// Identifier node
    pub name: NodeId,
    /// Block statement
    pub body: NodeId,
}

/// `Base<Arg, …>`
#[derive(Debug, Clone)]
pub struct GenericTypeName {
    pub base: NodeId,
    pub arguments: Vec<NodeId>,
}

/// Per-variant payload of a node. One variant per concrete node kind; the
/// discriminant determines the RTTI type-id via [`Node::kind`].
#[derive(Debug, Clone)]
pub enum NodeData {
    Token,
    Identifier { name: String },
    /// Parser-produced error node; a first-class citizen of the tree
    Error { message: String },
    Literal(LiteralExpr),
    /// Expression position reference to an identifier node
    IdentifierExpr { identifier: NodeId },
    Paren { inner: NodeId },
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    MemberAccess(MemberAccessExpr),
    New(NewExpr),
    This,
    Cast(CastExpr),
    Indexer(IndexerExpr),
    TypeOf { target_type: NodeId },
    SizeOf { target_type: NodeId },
    Empty,
    Block { statements: Vec<NodeId> },
    ExpressionStmt { expression: NodeId },
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return { value: Option<NodeId> },
    Break,
    Continue,
    UsingDirective { namespace: NodeId },
    Parameter(ParameterDecl),
    Variable(VariableDecl),
    Field(VariableDecl),
    Function(FunctionDecl),
    GenericParameter { name: NodeId },
    Class(TypeDecl),
    Struct(TypeDecl),
    Interface(TypeDecl),
    Enum(EnumDecl),
    Namespace(NamespaceDecl),
    /// Simple named type, e.g. `i32` or `Player`
    TypeName { identifier: NodeId },
    /// `left::right`
    QualifiedTypeName { left: NodeId, right: NodeId },
    /// `T*`
    PointerTypeName { inner: NodeId },
    /// `T[]`
    ArrayTypeName { element: NodeId },
    GenericTypeName(GenericTypeName),
    CompilationUnit { statements: Vec<NodeId> },
}

impl NodeData {
    /// Concrete RTTI kind of this payload
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Token => NodeKind::Token,
            NodeData::Identifier { .. } => NodeKind::Identifier,
            NodeData::Error { .. } => NodeKind::Error,
            NodeData::Literal(_) => NodeKind::LiteralExpression,
            NodeData::IdentifierExpr { .. } => NodeKind::IdentifierExpression,
            NodeData::Paren { .. } => NodeKind::ParenthesizedExpression,
            NodeData::Unary(_) => NodeKind::UnaryExpression,
            NodeData::Binary(_) => NodeKind::BinaryExpression,
            NodeData::Assignment(_) => NodeKind::AssignmentExpression,
            NodeData::Call(_) => NodeKind::CallExpression,
            NodeData::MemberAccess(_) => NodeKind::MemberAccessExpression,
            NodeData::New(_) => NodeKind::NewExpression,
            NodeData::This => NodeKind::ThisExpression,
            NodeData::Cast(_) => NodeKind::CastExpression,
            NodeData::Indexer(_) => NodeKind::IndexerExpression,
            NodeData::TypeOf { .. } => NodeKind::TypeOfExpression,
            NodeData::SizeOf { .. } => NodeKind::SizeOfExpression,
            NodeData::Empty => NodeKind::EmptyStatement,
            NodeData::Block { .. } => NodeKind::BlockStatement,
            NodeData::ExpressionStmt { .. } => NodeKind::ExpressionStatement,
            NodeData::If(_) => NodeKind::IfStatement,
            NodeData::While(_) => NodeKind::WhileStatement,
            NodeData::For(_) => NodeKind::ForStatement,
            NodeData::Return { .. } => NodeKind::ReturnStatement,
            NodeData::Break => NodeKind::BreakStatement,
            NodeData::Continue => NodeKind::ContinueStatement,
            NodeData::UsingDirective { .. } => NodeKind::UsingDirective,
            NodeData::Parameter(_) => NodeKind::Parameter,
            NodeData::Variable(_) => NodeKind::VariableDeclaration,
            NodeData::Field(_) => NodeKind::FieldDeclaration,
            NodeData::Function(_) => NodeKind::FunctionDeclaration,
            NodeData::GenericParameter { .. } => NodeKind::GenericParameter,
            NodeData::Class(_) => NodeKind::ClassDeclaration,
            NodeData::Struct(_) => NodeKind::StructDeclaration,
            NodeData::Interface(_) => NodeKind::InterfaceDeclaration,
            NodeData::Enum(_) => NodeKind::EnumDeclaration,
            NodeData::Namespace(_) => NodeKind::NamespaceDeclaration,
            NodeData::TypeName { .. } => NodeKind::TypeName,
            NodeData::QualifiedTypeName { .. } => NodeKind::QualifiedTypeName,
            NodeData::PointerTypeName { .. } => NodeKind::PointerTypeName,
            NodeData::ArrayTypeName { .. } => NodeKind::ArrayTypeName,
            NodeData::GenericTypeName(_) => NodeKind::GenericTypeName,
            NodeData::CompilationUnit { .. } => NodeKind::CompilationUnit,
        }
    }
}

/// A node in the tree: RTTI-tagged payload plus source bookkeeping
#[derive(Debug, Clone)]
pub struct Node {
    /// Kind of the token that introduced this node
    pub token: TokenKind,
    /// Source span (start offset + length)
    pub span: Span,
    /// Offset where this node's leading trivia begins
    pub trivia_start: u32,
    pub data: NodeData,
}

impl Node {
    /// Concrete (dynamic) RTTI kind
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// Range-based hierarchy test against any kind, abstract or concrete
    pub fn is_a(&self, target: NodeKind) -> bool {
        self.kind().is_a(target)
    }

    /// Append this node's children to `out`, in source order
    pub fn children(&self, out: &mut Vec<NodeId>) {
        match &self.data {
            NodeData::Token
            | NodeData::Identifier { .. }
            | NodeData::Error { .. }
            | NodeData::Literal(_)
            | NodeData::This
            | NodeData::Empty
            | NodeData::Break
            | NodeData::Continue => {}
            NodeData::IdentifierExpr { identifier } => out.push(*identifier),
            NodeData::Paren { inner } => out.push(*inner),
            NodeData::Unary(u) => out.push(u.operand),
            NodeData::Binary(b) => {
                out.push(b.left);
                out.push(b.right);
            }
            NodeData::Assignment(a) => {
                out.push(a.target);
                out.push(a.source);
            }
            NodeData::Call(c) => {
                out.push(c.target);
                out.extend_from_slice(&c.arguments);
            }
            NodeData::MemberAccess(m) => {
                out.push(m.target);
                out.push(m.member);
            }
            NodeData::New(n) => {
                out.push(n.type_name);
                out.extend_from_slice(&n.arguments);
            }
            NodeData::Cast(c) => {
                out.push(c.target_type);
                out.push(c.expression);
            }
            NodeData::Indexer(i) => {
                out.push(i.target);
                out.push(i.index);
            }
            NodeData::TypeOf { target_type } | NodeData::SizeOf { target_type } => {
                out.push(*target_type)
            }
            NodeData::Block { statements } | NodeData::CompilationUnit { statements } => {
                out.extend_from_slice(statements)
            }
            NodeData::ExpressionStmt { expression } => out.push(*expression),
            NodeData::If(i) => {
                out.push(i.condition);
                out.push(i.then_branch);
                if let Some(e) = i.else_branch {
                    out.push(e);
                }
            }
            NodeData::While(w) => {
                out.push(w.condition);
                out.push(w.body);
            }
            NodeData::For(f) => {
                if let Some(init) = f.initializer {
                    out.push(init);
                }
                if let Some(cond) = f.condition {
                    out.push(cond);
                }
                out.extend_from_slice(&f.increments);
                out.push(f.body);
            }
            NodeData::Return { value } => {
                if let Some(v) = value {
                    out.push(*v);
                }
            }
            NodeData::UsingDirective { namespace } => out.push(*namespace),
            NodeData::Parameter(p) => {
                out.push(p.name);
                out.push(p.type_name);
            }
            NodeData::Variable(v) | NodeData::Field(v) => {
                out.extend_from_slice(&v.names);
                if let Some(t) = v.type_name {
                    out.push(t);
                }
                if let Some(init) = v.initializer {
                    out.push(init);
                }
            }
            NodeData::Function(f) => {
                out.push(f.name);
                out.extend_from_slice(&f.parameters);
                if let Some(r) = f.return_type {
                    out.push(r);
                }
                if let Some(b) = f.body {
                    out.push(b);
                }
            }
            NodeData::GenericParameter { name } => out.push(*name),
            NodeData::Class(t) | NodeData::Struct(t) | NodeData::Interface(t) => {
                out.push(t.name);
                out.extend_from_slice(&t.members);
            }
            NodeData::Enum(e) => {
                out.push(e.name);
                out.extend_from_slice(&e.cases);
                out.extend_from_slice(&e.methods);
            }
            NodeData::Namespace(n) => {
                out.push(n.name);
                out.push(n.body);
            }
            NodeData::TypeName { identifier } => out.push(*identifier),
            NodeData::QualifiedTypeName { left, right } => {
                out.push(*left);
                out.push(*right);
            }
            NodeData::PointerTypeName { inner } => out.push(*inner),
            NodeData::ArrayTypeName { element } => out.push(*element),
            NodeData::GenericTypeName(g) => {
                out.push(g.base);
                out.extend_from_slice(&g.arguments);
            }
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralExpr> {
        match &self.data {
            NodeData::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_unary(&self) -> Option<&UnaryExpr> {
        match &self.data {
            NodeData::Unary(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryExpr> {
        match &self.data {
            NodeData::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_assignment(&self) -> Option<&AssignmentExpr> {
        match &self.data {
            NodeData::Assignment(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&CallExpr> {
        match &self.data {
            NodeData::Call(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_member_access(&self) -> Option<&MemberAccessExpr> {
        match &self.data {
            NodeData::MemberAccess(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_new(&self) -> Option<&NewExpr> {
        match &self.data {
            NodeData::New(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableDecl> {
        match &self.data {
            NodeData::Variable(v) | NodeData::Field(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.data {
            NodeData::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&ParameterDecl> {
        match &self.data {
            NodeData::Parameter(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_type_decl(&self) -> Option<&TypeDecl> {
        match &self.data {
            NodeData::Class(t) | NodeData::Struct(t) | NodeData::Interface(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDecl> {
        match &self.data {
            NodeData::Enum(e) => Some(e),
            _ => None,
        }
    }
}

/// The AST arena: owns every node of one compilation
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    /// Non-owning parent links; empty until [`Ast::compute_parents`] runs
    parents: Vec<Option<NodeId>>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node with explicit token kind and span
    pub fn add_node(&mut self, data: NodeData, token: TokenKind, span: Span) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(Node {
            token,
            span,
            trivia_start: span.start,
            data,
        });
        id
    }

    /// Allocate a node with default token bookkeeping
    pub fn add(&mut self, data: NodeData) -> NodeId {
        self.add_node(data, TokenKind::None, Span::default())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at `id`; panics on an id from a different arena
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.to_raw() as usize]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.to_raw() as usize)
    }

    /// Concrete kind of the node at `id`
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    /// Range-based hierarchy test
    pub fn is_a(&self, id: NodeId, target: NodeKind) -> bool {
        self.node(id).is_a(target)
    }

    /// Checked downcast to a hierarchy kind. On mismatch, logs an error and
    /// returns `None`; it never aborts, so callers must handle the miss.
    pub fn cast_or_error(&self, id: NodeId, target: NodeKind) -> Option<&Node> {
        let node = self.node(id);
        if node.is_a(target) {
            Some(node)
        } else {
            error!(
                target: "semantic",
                "expected {} but found {} at offset {}",
                target.name(),
                node.kind().name(),
                node.span.start
            );
            None
        }
    }

    /// Name of the identifier node at `id`, if it is one
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Identifier { name } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Fill the non-owning parent table in one pass over the tree.
    ///
    /// Roots (and unreferenced nodes) keep `None`.
    pub fn compute_parents(&mut self) {
        let mut parents = vec![None; self.nodes.len()];
        let mut children = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            children.clear();
            node.children(&mut children);
            for &child in &children {
                parents[child.to_raw() as usize] = Some(NodeId::from_raw(index as u32));
            }
        }
        self.parents = parents;
    }

    /// Parent of `id`, if parent links have been computed
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.to_raw() as usize).copied().flatten()
    }

    // Construction helpers: the surface a parser (and the tests) build
    // trees through.

    pub fn identifier(&mut self, name: impl Into<String>, span: Span) -> NodeId {
        self.add_node(
            NodeData::Identifier { name: name.into() },
            TokenKind::Identifier,
            span,
        )
    }

    pub fn error_node(&mut self, message: impl Into<String>, span: Span) -> NodeId {
        self.add_node(
            NodeData::Error {
                message: message.into(),
            },
            TokenKind::None,
            span,
        )
    }

    pub fn literal(&mut self, kind: LiteralKind, text: impl Into<String>, span: Span) -> NodeId {
        let token = match kind {
            LiteralKind::Integer => TokenKind::IntegerLiteral,
            LiteralKind::Float => TokenKind::FloatLiteral,
            LiteralKind::Boolean => TokenKind::BooleanLiteral,
            LiteralKind::String => TokenKind::StringLiteral,
            LiteralKind::Char => TokenKind::CharLiteral,
            LiteralKind::Null => TokenKind::NullLiteral,
        };
        self.add_node(
            NodeData::Literal(LiteralExpr {
                kind,
                text: text.into(),
            }),
            token,
            span,
        )
    }

    pub fn identifier_expr(&mut self, name: impl Into<String>, span: Span) -> NodeId {
        let identifier = self.identifier(name, span);
        self.add_node(NodeData::IdentifierExpr { identifier }, TokenKind::Identifier, span)
    }

    pub fn paren(&mut self, inner: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::Paren { inner }, TokenKind::LParen, span)
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::Unary(UnaryExpr { op, operand }), TokenKind::None, span)
    }

    pub fn binary(&mut self, left: NodeId, op: BinaryOp, right: NodeId, span: Span) -> NodeId {
        self.add_node(
            NodeData::Binary(BinaryExpr { left, op, right }),
            TokenKind::None,
            span,
        )
    }

    pub fn assignment(&mut self, target: NodeId, source: NodeId, span: Span) -> NodeId {
        self.add_node(
            NodeData::Assignment(AssignmentExpr { target, source }),
            TokenKind::Assign,
            span,
        )
    }

    pub fn call(&mut self, target: NodeId, arguments: Vec<NodeId>, span: Span) -> NodeId {
        self.add_node(NodeData::Call(CallExpr { target, arguments }), TokenKind::None, span)
    }

    pub fn member_access(&mut self, target: NodeId, member: NodeId, span: Span) -> NodeId {
        self.add_node(
            NodeData::MemberAccess(MemberAccessExpr { target, member }),
            TokenKind::Dot,
            span,
        )
    }

    pub fn new_expr(&mut self, type_name: NodeId, arguments: Vec<NodeId>, span: Span) -> NodeId {
        self.add_node(
            NodeData::New(NewExpr {
                type_name,
                arguments,
            }),
            TokenKind::New,
            span,
        )
    }

    pub fn this_expr(&mut self, span: Span) -> NodeId {
        self.add_node(NodeData::This, TokenKind::This, span)
    }

    pub fn cast(&mut self, target_type: NodeId, expression: NodeId, span: Span) -> NodeId {
        self.add_node(
            NodeData::Cast(CastExpr {
                target_type,
                expression,
            }),
            TokenKind::None,
            span,
        )
    }

    pub fn indexer(&mut self, target: NodeId, index: NodeId, span: Span) -> NodeId {
        self.add_node(
            NodeData::Indexer(IndexerExpr { target, index }),
            TokenKind::LBracket,
            span,
        )
    }

    pub fn type_of(&mut self, target_type: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::TypeOf { target_type }, TokenKind::None, span)
    }

    pub fn size_of(&mut self, target_type: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::SizeOf { target_type }, TokenKind::None, span)
    }

    pub fn empty_stmt(&mut self, span: Span) -> NodeId {
        self.add_node(NodeData::Empty, TokenKind::Semicolon, span)
    }

    pub fn block(&mut self, statements: Vec<NodeId>, span: Span) -> NodeId {
        self.add_node(NodeData::Block { statements }, TokenKind::LBrace, span)
    }

    pub fn expression_stmt(&mut self, expression: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::ExpressionStmt { expression }, TokenKind::None, span)
    }

    pub fn if_stmt(
        &mut self,
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
        span: Span,
    ) -> NodeId {
        self.add_node(
            NodeData::If(IfStmt {
                condition,
                then_branch,
                else_branch,
            }),
            TokenKind::If,
            span,
        )
    }

    pub fn while_stmt(&mut self, condition: NodeId, body: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::While(WhileStmt { condition, body }), TokenKind::While, span)
    }

    pub fn for_stmt(
        &mut self,
        initializer: Option<NodeId>,
        condition: Option<NodeId>,
        increments: Vec<NodeId>,
        body: NodeId,
        span: Span,
    ) -> NodeId {
        self.add_node(
            NodeData::For(ForStmt {
                initializer,
                condition,
                increments,
                body,
            }),
            TokenKind::For,
            span,
        )
    }

    pub fn return_stmt(&mut self, value: Option<NodeId>, span: Span) -> NodeId {
        self.add_node(NodeData::Return { value }, TokenKind::Return, span)
    }

    pub fn break_stmt(&mut self, span: Span) -> NodeId {
        self.add_node(NodeData::Break, TokenKind::Break, span)
    }

    pub fn continue_stmt(&mut self, span: Span) -> NodeId {
        self.add_node(NodeData::Continue, TokenKind::Continue, span)
    }

    pub fn using_directive(&mut self, namespace: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::UsingDirective { namespace }, TokenKind::Using, span)
    }

    pub fn parameter(&mut self, name: NodeId, type_name: NodeId, span: Span) -> NodeId {
        self.add_node(
            NodeData::Parameter(ParameterDecl { name, type_name }),
            TokenKind::Identifier,
            span,
        )
    }

    pub fn variable_decl(
        &mut self,
        names: Vec<NodeId>,
        type_name: Option<NodeId>,
        initializer: Option<NodeId>,
        span: Span,
    ) -> NodeId {
        self.add_node(
            NodeData::Variable(VariableDecl {
                names,
                type_name,
                initializer,
            }),
            TokenKind::Var,
            span,
        )
    }

    pub fn field_decl(
        &mut self,
        names: Vec<NodeId>,
        type_name: Option<NodeId>,
        initializer: Option<NodeId>,
        span: Span,
    ) -> NodeId {
        self.add_node(
            NodeData::Field(VariableDecl {
                names,
                type_name,
                initializer,
            }),
            TokenKind::Identifier,
            span,
        )
    }

    pub fn function_decl(
        &mut self,
        name: NodeId,
        parameters: Vec<NodeId>,
        return_type: Option<NodeId>,
        body: Option<NodeId>,
        span: Span,
    ) -> NodeId {
        self.add_node(
            NodeData::Function(FunctionDecl {
                name,
                parameters,
                return_type,
                body,
            }),
            TokenKind::Fn,
            span,
        )
    }

    pub fn generic_parameter(&mut self, name: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::GenericParameter { name }, TokenKind::Identifier, span)
    }

    pub fn class_decl(&mut self, name: NodeId, members: Vec<NodeId>, span: Span) -> NodeId {
        self.add_node(NodeData::Class(TypeDecl { name, members }), TokenKind::Class, span)
    }

    pub fn struct_decl(&mut self, name: NodeId, members: Vec<NodeId>, span: Span) -> NodeId {
        self.add_node(NodeData::Struct(TypeDecl { name, members }), TokenKind::Struct, span)
    }

    pub fn interface_decl(&mut self, name: NodeId, members: Vec<NodeId>, span: Span) -> NodeId {
        self.add_node(
            NodeData::Interface(TypeDecl { name, members }),
            TokenKind::Interface,
            span,
        )
    }

    pub fn enum_decl(
        &mut self,
        name: NodeId,
        cases: Vec<NodeId>,
        methods: Vec<NodeId>,
        span: Span,
    ) -> NodeId {
        self.add_node(
            NodeData::Enum(EnumDecl {
                name,
                cases,
                methods,
            }),
            TokenKind::Enum,
            span,
        )
    }

    pub fn namespace_decl(&mut self, name: NodeId, body: NodeId, span: Span) -> NodeId {
        self.add_node(
            NodeData::Namespace(NamespaceDecl { name, body }),
            TokenKind::Namespace,
            span,
        )
    }

    pub fn type_name(&mut self, name: impl Into<String>, span: Span) -> NodeId {
        let identifier = self.identifier(name, span);
        self.add_node(NodeData::TypeName { identifier }, TokenKind::Identifier, span)
    }

    pub fn qualified_type_name(&mut self, left: NodeId, right: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::QualifiedTypeName { left, right }, TokenKind::None, span)
    }

    pub fn pointer_type_name(&mut self, inner: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::PointerTypeName { inner }, TokenKind::Star, span)
    }

    pub fn array_type_name(&mut self, element: NodeId, span: Span) -> NodeId {
        self.add_node(NodeData::ArrayTypeName { element }, TokenKind::LBracket, span)
    }

    pub fn generic_type_name(&mut self, base: NodeId, arguments: Vec<NodeId>, span: Span) -> NodeId {
        self.add_node(
            NodeData::GenericTypeName(GenericTypeName { base, arguments }),
            TokenKind::None,
            span,
        )
    }

    pub fn compilation_unit(&mut self, statements: Vec<NodeId>, span: Span) -> NodeId {
        self.add_node(NodeData::CompilationUnit { statements }, TokenKind::None, span)
    }
}
