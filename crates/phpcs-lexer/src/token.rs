use phpcs_ast::Position;

/// Token kinds produced by the lexer.
///
/// `Display` renders the conventional PHP `T_*` name; the token-dump debug
/// path and several tests print these, so the names are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    Illegal,
    Eof,
    Comment,
    DocComment,
    OpenTag,
    CloseTag,
    InlineHtml,
    Attribute,

    // Identifiers and literals
    Variable,
    Identifier,
    IntNumber,
    FloatNumber,
    /// Double-quoted string (interpolation candidate).
    DoubleQuotedString,
    /// Single-quoted string (never interpolated).
    SingleQuotedString,
    /// Heredoc/nowdoc body.
    EncapsedAndWhitespace,
    StartHeredoc,
    EndHeredoc,
    /// Nowdoc markers get their own kinds; nowdoc bodies never interpolate.
    StartNowdoc,
    EndNowdoc,

    // Arithmetic
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Inc,
    Dec,

    // Assignment
    Assign,
    PlusEqual,
    MinusEqual,
    MulEqual,
    DivEqual,
    ModEqual,
    ConcatEqual,
    AndEqual,
    OrEqual,
    XorEqual,
    CoalesceEqual,

    // Comparison
    IsEqual,
    IsNotEqual,
    IsIdentical,
    IsNotIdentical,
    IsSmaller,
    IsGreater,
    IsSmallerOrEqual,
    IsGreaterOrEqual,
    Spaceship,

    // Logical / bitwise
    BooleanAnd,
    BooleanOr,
    Not,
    Ampersand,
    Pipe,
    Caret,

    // Structure operators
    Coalesce,
    Question,
    Colon,
    DoubleColon,
    /// `::class`, lexed as a single token.
    ClassConst,
    ObjectOperator,
    NullsafeObjectOperator,
    DoubleArrow,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Backslash,
    Dot,
    Ellipsis,

    // Casts
    ArrayCast,
    BoolCast,
    FloatCast,
    IntCast,
    ObjectCast,
    StringCast,
    UnsetCast,

    // Keywords
    Abstract,
    Array,
    As,
    Break,
    Callable,
    Case,
    Catch,
    Class,
    Clone,
    Const,
    Continue,
    Declare,
    Default,
    Do,
    Echo,
    Else,
    ElseIf,
    Empty,
    Enum,
    Extends,
    Final,
    Finally,
    Fn,
    For,
    Foreach,
    Function,
    Global,
    Goto,
    If,
    Implements,
    Include,
    IncludeOnce,
    Instanceof,
    Insteadof,
    Interface,
    Isset,
    List,
    Match,
    Mixed,
    Namespace,
    New,
    Parent_,
    Private,
    Protected,
    Public,
    Readonly,
    Require,
    RequireOnce,
    Return,
    Self_,
    Static,
    Switch,
    Throw,
    Trait,
    Try,
    Unset,
    Use,
    Var,
    While,
    Yield,

    // Value keywords
    True,
    False,
    Null,

    // Magic constants
    MagicClass,
    MagicDir,
    MagicFile,
    MagicFunction,
    MagicLine,
    MagicMethod,
    MagicNamespace,
    MagicTrait,
}

impl TokenKind {
    pub fn is_assignment_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::MulEqual
                | TokenKind::DivEqual
                | TokenKind::ModEqual
                | TokenKind::ConcatEqual
                | TokenKind::AndEqual
                | TokenKind::OrEqual
                | TokenKind::XorEqual
                | TokenKind::CoalesceEqual
        )
    }

    pub fn is_cast(&self) -> bool {
        matches!(
            self,
            TokenKind::ArrayCast
                | TokenKind::BoolCast
                | TokenKind::FloatCast
                | TokenKind::IntCast
                | TokenKind::ObjectCast
                | TokenKind::StringCast
                | TokenKind::UnsetCast
        )
    }

    pub fn is_magic_const(&self) -> bool {
        matches!(
            self,
            TokenKind::MagicClass
                | TokenKind::MagicDir
                | TokenKind::MagicFile
                | TokenKind::MagicFunction
                | TokenKind::MagicLine
                | TokenKind::MagicMethod
                | TokenKind::MagicNamespace
                | TokenKind::MagicTrait
        )
    }

    /// Modifier keywords that may precede a class member or a promoted
    /// constructor parameter.
    pub fn is_member_modifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private
                | TokenKind::Static
                | TokenKind::Final
                | TokenKind::Abstract
                | TokenKind::Readonly
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Illegal => "T_ILLEGAL",
            TokenKind::Eof => "T_EOF",
            TokenKind::Comment => "T_COMMENT",
            TokenKind::DocComment => "T_DOC_COMMENT",
            TokenKind::OpenTag => "T_OPEN_TAG",
            TokenKind::CloseTag => "T_CLOSE_TAG",
            TokenKind::InlineHtml => "T_INLINE_HTML",
            TokenKind::Attribute => "T_ATTRIBUTE",
            TokenKind::Variable => "T_VARIABLE",
            TokenKind::Identifier => "T_STRING",
            TokenKind::IntNumber => "T_LNUMBER",
            TokenKind::FloatNumber => "T_DNUMBER",
            TokenKind::DoubleQuotedString => "T_CONSTANT_ENCAPSED_STRING",
            TokenKind::SingleQuotedString => "T_CONSTANT_STRING",
            TokenKind::EncapsedAndWhitespace => "T_ENCAPSED_AND_WHITESPACE",
            TokenKind::StartHeredoc => "T_START_HEREDOC",
            TokenKind::EndHeredoc => "T_END_HEREDOC",
            TokenKind::StartNowdoc => "T_START_NOWDOC",
            TokenKind::EndNowdoc => "T_END_NOWDOC",
            TokenKind::Plus => "T_PLUS",
            TokenKind::Minus => "T_MINUS",
            TokenKind::Asterisk => "T_MULTIPLY",
            TokenKind::Slash => "T_DIVIDE",
            TokenKind::Percent => "T_MODULO",
            TokenKind::Inc => "T_INC",
            TokenKind::Dec => "T_DEC",
            TokenKind::Assign => "T_ASSIGN",
            TokenKind::PlusEqual => "T_PLUS_EQUAL",
            TokenKind::MinusEqual => "T_MINUS_EQUAL",
            TokenKind::MulEqual => "T_MUL_EQUAL",
            TokenKind::DivEqual => "T_DIV_EQUAL",
            TokenKind::ModEqual => "T_MOD_EQUAL",
            TokenKind::ConcatEqual => "T_CONCAT_EQUAL",
            TokenKind::AndEqual => "T_AND_EQUAL",
            TokenKind::OrEqual => "T_OR_EQUAL",
            TokenKind::XorEqual => "T_XOR_EQUAL",
            TokenKind::CoalesceEqual => "T_COALESCE_EQUAL",
            TokenKind::IsEqual => "T_IS_EQUAL",
            TokenKind::IsNotEqual => "T_IS_NOT_EQUAL",
            TokenKind::IsIdentical => "T_IS_IDENTICAL",
            TokenKind::IsNotIdentical => "T_IS_NOT_IDENTICAL",
            TokenKind::IsSmaller => "T_IS_SMALLER",
            TokenKind::IsGreater => "T_IS_GREATER",
            TokenKind::IsSmallerOrEqual => "T_IS_SMALLER_OR_EQUAL",
            TokenKind::IsGreaterOrEqual => "T_IS_GREATER_OR_EQUAL",
            TokenKind::Spaceship => "T_SPACESHIP",
            TokenKind::BooleanAnd => "T_BOOLEAN_AND",
            TokenKind::BooleanOr => "T_BOOLEAN_OR",
            TokenKind::Not => "T_NOT",
            TokenKind::Ampersand => "T_AMPERSAND",
            TokenKind::Pipe => "T_PIPE",
            TokenKind::Caret => "T_CARET",
            TokenKind::Coalesce => "T_COALESCE",
            TokenKind::Question => "T_QUESTION",
            TokenKind::Colon => "T_COLON",
            TokenKind::DoubleColon => "T_DOUBLE_COLON",
            TokenKind::ClassConst => "T_CLASS_CONST",
            TokenKind::ObjectOperator => "T_OBJECT_OPERATOR",
            TokenKind::NullsafeObjectOperator => "T_NULLSAFE_OBJECT_OPERATOR",
            TokenKind::DoubleArrow => "T_DOUBLE_ARROW",
            TokenKind::LeftParen => "T_LPAREN",
            TokenKind::RightParen => "T_RPAREN",
            TokenKind::LeftBrace => "T_LBRACE",
            TokenKind::RightBrace => "T_RBRACE",
            TokenKind::LeftBracket => "T_LBRACKET",
            TokenKind::RightBracket => "T_RBRACKET",
            TokenKind::Semicolon => "T_SEMICOLON",
            TokenKind::Comma => "T_COMMA",
            TokenKind::Backslash => "T_NS_SEPARATOR",
            TokenKind::Dot => "T_DOT",
            TokenKind::Ellipsis => "T_ELLIPSIS",
            TokenKind::ArrayCast => "T_ARRAY_CAST",
            TokenKind::BoolCast => "T_BOOL_CAST",
            TokenKind::FloatCast => "T_DOUBLE_CAST",
            TokenKind::IntCast => "T_INT_CAST",
            TokenKind::ObjectCast => "T_OBJECT_CAST",
            TokenKind::StringCast => "T_STRING_CAST",
            TokenKind::UnsetCast => "T_UNSET_CAST",
            TokenKind::Abstract => "T_ABSTRACT",
            TokenKind::Array => "T_ARRAY",
            TokenKind::As => "T_AS",
            TokenKind::Break => "T_BREAK",
            TokenKind::Callable => "T_CALLABLE",
            TokenKind::Case => "T_CASE",
            TokenKind::Catch => "T_CATCH",
            TokenKind::Class => "T_CLASS",
            TokenKind::Clone => "T_CLONE",
            TokenKind::Const => "T_CONST",
            TokenKind::Continue => "T_CONTINUE",
            TokenKind::Declare => "T_DECLARE",
            TokenKind::Default => "T_DEFAULT",
            TokenKind::Do => "T_DO",
            TokenKind::Echo => "T_ECHO",
            TokenKind::Else => "T_ELSE",
            TokenKind::ElseIf => "T_ELSEIF",
            TokenKind::Empty => "T_EMPTY",
            TokenKind::Enum => "T_ENUM",
            TokenKind::Extends => "T_EXTENDS",
            TokenKind::Final => "T_FINAL",
            TokenKind::Finally => "T_FINALLY",
            TokenKind::Fn => "T_FN",
            TokenKind::For => "T_FOR",
            TokenKind::Foreach => "T_FOREACH",
            TokenKind::Function => "T_FUNCTION",
            TokenKind::Global => "T_GLOBAL",
            TokenKind::Goto => "T_GOTO",
            TokenKind::If => "T_IF",
            TokenKind::Implements => "T_IMPLEMENTS",
            TokenKind::Include => "T_INCLUDE",
            TokenKind::IncludeOnce => "T_INCLUDE_ONCE",
            TokenKind::Instanceof => "T_INSTANCEOF",
            TokenKind::Insteadof => "T_INSTEADOF",
            TokenKind::Interface => "T_INTERFACE",
            TokenKind::Isset => "T_ISSET",
            TokenKind::List => "T_LIST",
            TokenKind::Match => "T_MATCH",
            TokenKind::Mixed => "T_MIXED",
            TokenKind::Namespace => "T_NAMESPACE",
            TokenKind::New => "T_NEW",
            TokenKind::Parent_ => "T_PARENT",
            TokenKind::Private => "T_PRIVATE",
            TokenKind::Protected => "T_PROTECTED",
            TokenKind::Public => "T_PUBLIC",
            TokenKind::Readonly => "T_READONLY",
            TokenKind::Require => "T_REQUIRE",
            TokenKind::RequireOnce => "T_REQUIRE_ONCE",
            TokenKind::Return => "T_RETURN",
            TokenKind::Self_ => "T_SELF",
            TokenKind::Static => "T_STATIC",
            TokenKind::Switch => "T_SWITCH",
            TokenKind::Throw => "T_THROW",
            TokenKind::Trait => "T_TRAIT",
            TokenKind::Try => "T_TRY",
            TokenKind::Unset => "T_UNSET",
            TokenKind::Use => "T_USE",
            TokenKind::Var => "T_VAR",
            TokenKind::While => "T_WHILE",
            TokenKind::Yield => "T_YIELD",
            TokenKind::True => "T_TRUE",
            TokenKind::False => "T_FALSE",
            TokenKind::Null => "T_NULL",
            TokenKind::MagicClass => "T_CLASS_C",
            TokenKind::MagicDir => "T_DIR",
            TokenKind::MagicFile => "T_FILE",
            TokenKind::MagicFunction => "T_FUNC_C",
            TokenKind::MagicLine => "T_LINE",
            TokenKind::MagicMethod => "T_METHOD_C",
            TokenKind::MagicNamespace => "T_NS_C",
            TokenKind::MagicTrait => "T_TRAIT_C",
        };
        f.write_str(name)
    }
}

/// One lexed token: kind, verbatim-or-normalized literal text, and the
/// position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, pos: Position) -> Self {
        Token {
            kind,
            literal: literal.into(),
            pos,
        }
    }
}
