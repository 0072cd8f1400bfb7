use serde::Serialize;

use crate::position::Position;

// =============================================================================
// Node
// =============================================================================

/// A single PHP AST node.
///
/// The tree is fully owned: every child is held by `Box` or `Vec`, there are
/// no back-pointers and no sharing. Rule engines dispatch on the stable tag
/// returned by [`Node::node_kind`], so renaming a tag is a breaking change
/// for downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    // ----- literals -----
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    StringLit(StringLiteral),
    InterpolatedString(InterpolatedStringLiteral),
    Boolean(BooleanLiteral),
    Null(NullLiteral),

    // ----- expressions -----
    Variable(VariableNode),
    Identifier(IdentifierNode),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Ternary(TernaryExpr),
    Assignment(AssignmentNode),
    Array(ArrayNode),
    ArrayItem(ArrayItemNode),
    ArrayAccess(ArrayAccessNode),
    PropertyFetch(PropertyFetchNode),
    MethodCall(MethodCallNode),
    FunctionCall(FunctionCallNode),
    New(NewNode),
    ClassConstFetch(ClassConstFetchNode),
    Match(MatchNode),
    MatchArm(MatchArmNode),
    Throw(ThrowNode),
    Cast(CastNode),
    UnpackedArgument(UnpackedArgumentNode),
    MagicConst(MagicConstNode),

    // ----- type markers -----
    UnionType(UnionTypeNode),
    IntersectionType(IntersectionTypeNode),

    // ----- statements -----
    ExpressionStmt(ExpressionStmtNode),
    Block(BlockNode),
    If(IfNode),
    ElseIf(ElseIfNode),
    Else(ElseNode),
    While(WhileNode),
    For(ForNode),
    Foreach(ForeachNode),
    Return(ReturnNode),
    Echo(EchoNode),
    Unset(UnsetNode),
    Comment(CommentNode),
    StaticVarDecl(StaticVarDeclNode),
    Declare(DeclareNode),
    Namespace(NamespaceNode),

    // ----- declarations -----
    Function(FunctionNode),
    Param(ParamNode),
    Class(ClassNode),
    Property(PropertyNode),
    Interface(InterfaceNode),
    InterfaceMethod(InterfaceMethodNode),
    Trait(TraitNode),
    Enum(EnumNode),
    EnumCase(EnumCaseNode),
    Constant(ConstantNode),
}

/// Generates the tag/position accessors from one variant list so the three
/// dispatch tables cannot drift apart.
macro_rules! node_dispatch {
    ($(($variant:ident, $tag:literal)),+ $(,)?) => {
        impl Node {
            /// Stable tag used by rule engines to type-switch on nodes.
            pub fn node_kind(&self) -> &'static str {
                match self {
                    $(Node::$variant(_) => $tag,)+
                }
            }

            pub fn pos(&self) -> Position {
                match self {
                    $(Node::$variant(n) => n.pos,)+
                }
            }

            pub fn set_pos(&mut self, pos: Position) {
                match self {
                    $(Node::$variant(n) => n.pos = pos,)+
                }
            }
        }
    };
}

node_dispatch!(
    (Integer, "Integer"),
    (Float, "Float"),
    (StringLit, "String"),
    (InterpolatedString, "InterpolatedString"),
    (Boolean, "Boolean"),
    (Null, "Null"),
    (Variable, "Variable"),
    (Identifier, "Identifier"),
    (Binary, "BinaryExpr"),
    (Unary, "UnaryExpr"),
    (Ternary, "Ternary"),
    (Assignment, "Assignment"),
    (Array, "Array"),
    (ArrayItem, "ArrayItem"),
    (ArrayAccess, "ArrayAccess"),
    (PropertyFetch, "PropertyFetch"),
    (MethodCall, "MethodCall"),
    (FunctionCall, "FunctionCall"),
    (New, "New"),
    (ClassConstFetch, "ClassConstFetch"),
    (Match, "MatchNode"),
    (MatchArm, "MatchArmNode"),
    (Throw, "Throw"),
    (Cast, "Cast"),
    (UnpackedArgument, "UnpackedArgument"),
    (MagicConst, "MagicConst"),
    (UnionType, "UnionType"),
    (IntersectionType, "IntersectionType"),
    (ExpressionStmt, "ExpressionStmt"),
    (Block, "Block"),
    (If, "If"),
    (ElseIf, "ElseIf"),
    (Else, "Else"),
    (While, "While"),
    (For, "For"),
    (Foreach, "Foreach"),
    (Return, "Return"),
    (Echo, "Echo"),
    (Unset, "Unset"),
    (Comment, "Comment"),
    (StaticVarDecl, "StaticVarDecl"),
    (Declare, "Declare"),
    (Namespace, "Namespace"),
    (Function, "Function"),
    (Param, "Param"),
    (Class, "Class"),
    (Property, "Property"),
    (Interface, "Interface"),
    (InterfaceMethod, "InterfaceMethod"),
    (Trait, "Trait"),
    (Enum, "Enum"),
    (EnumCase, "EnumCase"),
    (Constant, "Constant"),
);

// =============================================================================
// Literals
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegerLiteral {
    pub value: i64,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatLiteral {
    pub value: f64,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringLiteral {
    pub value: String,
    pub pos: Position,
}

/// A double-quoted string containing interpolated expressions. Parts are
/// `StringLit` and `Variable`/`PropertyFetch`/`ArrayAccess` nodes in source
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpolatedStringLiteral {
    pub parts: Vec<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanLiteral {
    pub value: bool,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullLiteral {
    pub pos: Position,
}

// =============================================================================
// Expressions
// =============================================================================

/// `$name` — the name is stored without the leading `$`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableNode {
    pub name: String,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierNode {
    pub value: String,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub operator: String,
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub operator: String,
    pub operand: Box<Node>,
    /// Distinguishes `$i++` from `++$i`.
    pub is_postfix: bool,
    pub pos: Position,
}

/// `cond ? a : b`; the elvis form `cond ?: b` has no `then_branch`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TernaryExpr {
    pub condition: Box<Node>,
    pub then_branch: Option<Box<Node>>,
    pub else_branch: Box<Node>,
    pub pos: Position,
}

/// Assignment is an expression in PHP. `operator` is the verbatim operator
/// text (`=`, `+=`, `??=`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentNode {
    pub target: Box<Node>,
    pub operator: String,
    pub value: Box<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayNode {
    pub elements: Vec<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayItemNode {
    pub key: Option<Box<Node>>,
    pub value: Box<Node>,
    pub by_ref: bool,
    pub unpack: bool,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayAccessNode {
    pub array: Box<Node>,
    /// `None` for the push form `$arr[] = ...`.
    pub index: Option<Box<Node>>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyFetchNode {
    pub object: Box<Node>,
    pub property: String,
    pub nullsafe: bool,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCallNode {
    pub object: Box<Node>,
    pub method: String,
    pub args: Vec<Node>,
    pub nullsafe: bool,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCallNode {
    /// Identifier for a plain call, Variable for `$fn(...)`.
    pub name: Box<Node>,
    pub args: Vec<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNode {
    pub class_name: String,
    pub args: Vec<Node>,
    pub pos: Position,
}

/// `Foo::BAR`, `self::BAZ`, `Foo::class`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassConstFetchNode {
    pub class: String,
    pub constant: String,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchNode {
    pub condition: Box<Node>,
    pub arms: Vec<Node>,
    pub pos: Position,
}

/// One `cond[, cond]* => body` arm. The `default` arm carries a single
/// `Identifier("default")` condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchArmNode {
    pub conditions: Vec<Node>,
    pub body: Box<Node>,
    pub pos: Position,
}

/// `throw` is an expression since PHP 8; the same node serves statement
/// position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowNode {
    pub expr: Box<Node>,
    pub pos: Position,
}

/// `(int) $x`, `(array) $x`, ... — `cast_type` is the bare type word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastNode {
    pub cast_type: String,
    pub expr: Box<Node>,
    pub pos: Position,
}

/// `...$values` in an argument list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnpackedArgumentNode {
    pub expr: Box<Node>,
    pub pos: Position,
}

/// `__LINE__`, `__FILE__`, `__CLASS__`, ...
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagicConstNode {
    pub name: String,
    pub pos: Position,
}

// =============================================================================
// Type markers
// =============================================================================

/// `A|B|C` — order is exactly as written; consumers rely on it, so this is a
/// list, never a set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionTypeNode {
    pub types: Vec<String>,
    pub pos: Position,
}

/// `A&B&C` — order preserved like unions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntersectionTypeNode {
    pub types: Vec<String>,
    pub pos: Position,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStmtNode {
    pub expr: Box<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockNode {
    pub statements: Vec<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfNode {
    pub condition: Box<Node>,
    pub consequence: Box<Node>,
    pub else_ifs: Vec<Node>,
    pub alternative: Option<Box<Node>>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElseIfNode {
    pub condition: Box<Node>,
    pub body: Box<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElseNode {
    pub body: Box<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileNode {
    pub condition: Box<Node>,
    pub body: Box<Node>,
    pub pos: Position,
}

/// `for (init; cond; update) body`. All three header slots are expression
/// lists (each may be empty or comma-separated).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForNode {
    pub init: Vec<Node>,
    pub condition: Vec<Node>,
    pub update: Vec<Node>,
    pub body: Box<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForeachNode {
    pub expr: Box<Node>,
    pub key_var: Option<Box<Node>>,
    pub value_var: Box<Node>,
    pub by_ref: bool,
    pub body: Box<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnNode {
    pub expr: Option<Box<Node>>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EchoNode {
    pub values: Vec<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsetNode {
    pub vars: Vec<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
    pub text: String,
    pub pos: Position,
}

/// A single entry of a `static $a = 1, $b;` declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticVar {
    pub name: String,
    pub init: Option<Node>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticVarDeclNode {
    pub vars: Vec<StaticVar>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclareDirective {
    pub name: String,
    pub value: Node,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclareNode {
    pub directives: Vec<DeclareDirective>,
    pub body: Option<Box<Node>>,
    pub pos: Position,
}

/// `namespace Foo\Bar;` (no body) or `namespace Foo\Bar { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceNode {
    pub name: Option<String>,
    pub body: Option<Vec<Node>>,
    pub pos: Position,
}

// =============================================================================
// Declarations
// =============================================================================

/// A named function or a class method; methods carry their modifiers
/// (`public`, `static`, `final`, ...) in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionNode {
    pub name: String,
    pub modifiers: Vec<String>,
    pub params: Vec<Node>,
    pub return_type: Option<String>,
    pub body: Vec<Node>,
    pub doc_comment: Option<String>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamNode {
    /// Name without the leading `$`.
    pub name: String,
    /// Rendered type (includes a leading `?` when nullable).
    pub type_hint: Option<String>,
    /// Structured form when the hint is a union, kept alongside the string.
    pub union_type: Option<Box<Node>>,
    pub default: Option<Box<Node>>,
    pub visibility: Option<String>,
    pub is_promoted: bool,
    pub is_variadic: bool,
    pub is_by_ref: bool,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassNode {
    pub name: String,
    /// `final`, `abstract`, or `None`.
    pub modifier: Option<String>,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    /// Properties, methods and constants in source order.
    pub body: Vec<Node>,
    pub doc_comment: Option<String>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyNode {
    pub name: String,
    pub type_hint: Option<String>,
    pub default: Option<Box<Node>>,
    pub visibility: Option<String>,
    pub is_static: bool,
    pub is_readonly: bool,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceNode {
    pub name: String,
    pub extends: Vec<String>,
    pub members: Vec<Node>,
    pub doc_comment: Option<String>,
    pub pos: Position,
}

/// A method signature inside an interface (no body).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceMethodNode {
    pub name: String,
    pub visibility: Option<String>,
    pub params: Vec<Node>,
    pub return_type: Option<String>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitNode {
    pub name: String,
    pub body: Vec<Node>,
    pub doc_comment: Option<String>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumNode {
    pub name: String,
    pub backed_by: Option<String>,
    /// Cases, methods and constants in source order.
    pub body: Vec<Node>,
    pub doc_comment: Option<String>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumCaseNode {
    pub name: String,
    pub value: Option<Box<Node>>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantNode {
    pub name: String,
    pub value: Box<Node>,
    pub visibility: Option<String>,
    pub type_hint: Option<String>,
    pub doc_comment: Option<String>,
    pub pos: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> Node {
        Node::Integer(IntegerLiteral {
            value,
            pos: Position::new(1, 1, 0),
        })
    }

    #[test]
    fn test_node_kind_tags() {
        assert_eq!(int(1).node_kind(), "Integer");

        let m = Node::Match(MatchNode {
            condition: Box::new(int(1)),
            arms: vec![],
            pos: Position::DUMMY,
        });
        assert_eq!(m.node_kind(), "MatchNode");

        let u = Node::UnionType(UnionTypeNode {
            types: vec!["string".into(), "int".into()],
            pos: Position::DUMMY,
        });
        assert_eq!(u.node_kind(), "UnionType");
    }

    #[test]
    fn test_set_pos_repositions_node() {
        let mut node = int(7);
        assert_eq!(node.pos().line, 1);
        node.set_pos(Position::new(9, 3, 120));
        assert_eq!(node.pos(), Position::new(9, 3, 120));
    }

    #[test]
    fn test_union_type_order_is_preserved() {
        let u = UnionTypeNode {
            types: vec!["string".into(), "int".into(), "null".into()],
            pos: Position::DUMMY,
        };
        assert_eq!(u.types, vec!["string", "int", "null"]);
    }

    #[test]
    fn test_nodes_serialize_to_json() {
        let node = Node::Binary(BinaryExpr {
            operator: "+".into(),
            left: Box::new(int(1)),
            right: Box::new(int(2)),
            pos: Position::new(1, 7, 6),
        });
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"Binary\""));
        assert!(json.contains("\"operator\":\"+\""));
    }
}
