use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::token::TokenKind;

lazy_static! {
    /// Identifier text (lowercased) to keyword kind. Anything not in here
    /// lexes as a generic identifier.
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut m = HashMap::new();
        m.insert("abstract", TokenKind::Abstract);
        m.insert("array", TokenKind::Array);
        m.insert("as", TokenKind::As);
        m.insert("break", TokenKind::Break);
        m.insert("callable", TokenKind::Callable);
        m.insert("case", TokenKind::Case);
        m.insert("catch", TokenKind::Catch);
        m.insert("class", TokenKind::Class);
        m.insert("clone", TokenKind::Clone);
        m.insert("const", TokenKind::Const);
        m.insert("continue", TokenKind::Continue);
        m.insert("declare", TokenKind::Declare);
        m.insert("default", TokenKind::Default);
        m.insert("do", TokenKind::Do);
        m.insert("echo", TokenKind::Echo);
        m.insert("else", TokenKind::Else);
        m.insert("elseif", TokenKind::ElseIf);
        m.insert("empty", TokenKind::Empty);
        m.insert("enum", TokenKind::Enum);
        m.insert("extends", TokenKind::Extends);
        m.insert("false", TokenKind::False);
        m.insert("final", TokenKind::Final);
        m.insert("finally", TokenKind::Finally);
        m.insert("fn", TokenKind::Fn);
        m.insert("for", TokenKind::For);
        m.insert("foreach", TokenKind::Foreach);
        m.insert("function", TokenKind::Function);
        m.insert("global", TokenKind::Global);
        m.insert("goto", TokenKind::Goto);
        m.insert("if", TokenKind::If);
        m.insert("implements", TokenKind::Implements);
        m.insert("include", TokenKind::Include);
        m.insert("include_once", TokenKind::IncludeOnce);
        m.insert("instanceof", TokenKind::Instanceof);
        m.insert("insteadof", TokenKind::Insteadof);
        m.insert("interface", TokenKind::Interface);
        m.insert("isset", TokenKind::Isset);
        m.insert("list", TokenKind::List);
        m.insert("match", TokenKind::Match);
        m.insert("mixed", TokenKind::Mixed);
        m.insert("namespace", TokenKind::Namespace);
        m.insert("new", TokenKind::New);
        m.insert("null", TokenKind::Null);
        m.insert("parent", TokenKind::Parent_);
        m.insert("private", TokenKind::Private);
        m.insert("protected", TokenKind::Protected);
        m.insert("public", TokenKind::Public);
        m.insert("readonly", TokenKind::Readonly);
        m.insert("require", TokenKind::Require);
        m.insert("require_once", TokenKind::RequireOnce);
        m.insert("return", TokenKind::Return);
        m.insert("self", TokenKind::Self_);
        m.insert("static", TokenKind::Static);
        m.insert("switch", TokenKind::Switch);
        m.insert("throw", TokenKind::Throw);
        m.insert("trait", TokenKind::Trait);
        m.insert("true", TokenKind::True);
        m.insert("try", TokenKind::Try);
        m.insert("unset", TokenKind::Unset);
        m.insert("use", TokenKind::Use);
        m.insert("var", TokenKind::Var);
        m.insert("while", TokenKind::While);
        m.insert("yield", TokenKind::Yield);
        m
    };

    static ref MAGIC_CONSTS: HashMap<&'static str, TokenKind> = {
        let mut m = HashMap::new();
        m.insert("__CLASS__", TokenKind::MagicClass);
        m.insert("__DIR__", TokenKind::MagicDir);
        m.insert("__FILE__", TokenKind::MagicFile);
        m.insert("__FUNCTION__", TokenKind::MagicFunction);
        m.insert("__LINE__", TokenKind::MagicLine);
        m.insert("__METHOD__", TokenKind::MagicMethod);
        m.insert("__NAMESPACE__", TokenKind::MagicNamespace);
        m.insert("__TRAIT__", TokenKind::MagicTrait);
        m
    };
}

/// Map an identifier to its keyword kind, if it is one. PHP keywords are
/// case-insensitive; magic constants are not.
pub fn resolve_keyword(ident: &str) -> Option<TokenKind> {
    if let Some(kind) = MAGIC_CONSTS.get(ident) {
        return Some(*kind);
    }
    let lowered = ident.to_ascii_lowercase();
    KEYWORDS.get(lowered.as_str()).copied()
}
