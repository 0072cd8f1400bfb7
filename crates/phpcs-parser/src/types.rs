//! Type-hint grammar: nullable, union, intersection, DNF groups, qualified
//! names and `callable(...)` signatures.

use phpcs_ast::{IntersectionTypeNode, Node, UnionTypeNode};
use phpcs_lexer::TokenKind;

use crate::diagnostics::ParseError;
use crate::parser::Parser;

/// A parsed hint. The rendered string is what declaration nodes store; the
/// structured node is filled in for unions and intersections so rule engines
/// do not have to re-split the string.
pub(crate) struct TypeHint {
    pub rendered: String,
    pub structured: Option<Node>,
}

/// True when the current token can open a type hint.
pub(crate) fn at_type_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Question | TokenKind::LeftParen | TokenKind::Backslash
    ) || is_type_name(kind)
}

fn is_type_name(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::Array
            | TokenKind::Callable
            | TokenKind::Static
            | TokenKind::Self_
            | TokenKind::Parent_
            | TokenKind::Mixed
            | TokenKind::Null
            | TokenKind::True
            | TokenKind::False
    )
}

/// Parses a complete hint at the current token. Emits diagnostics for empty
/// union/intersection members and keeps going, so `int||string` yields one
/// error and the hint `int|string`.
pub(crate) fn parse_type_hint(p: &mut Parser) -> Option<TypeHint> {
    let pos = p.tok.pos;
    let nullable = p.eat(TokenKind::Question);

    let first = parse_type_atom(p)?;

    if p.check(TokenKind::Pipe) || p.check(TokenKind::BooleanOr) {
        let mut members = vec![first];
        loop {
            // `int||string` lexes the doubled separator as one `||` token;
            // either spelling means an empty member.
            if p.check(TokenKind::BooleanOr) {
                p.error(ParseError::Message {
                    message: "empty union type member".into(),
                    pos: p.tok.pos,
                });
                p.advance();
            } else if !p.eat(TokenKind::Pipe) {
                break;
            } else if p.check(TokenKind::Pipe) || p.check(TokenKind::BooleanOr) {
                p.error(ParseError::Message {
                    message: "empty union type member".into(),
                    pos: p.tok.pos,
                });
                continue;
            }
            match parse_type_atom(p) {
                Some(member) => members.push(member),
                None => break,
            }
        }
        let rendered = render(nullable, &members.join("|"));
        let structured = Node::UnionType(UnionTypeNode {
            types: members,
            pos,
        });
        return Some(TypeHint {
            rendered,
            structured: Some(structured),
        });
    }

    // `&` only continues a type when followed by another type name; in a
    // parameter list it otherwise marks by-reference.
    if p.check(TokenKind::Ampersand) && is_type_name(p.peek_kind()) {
        let mut members = vec![first];
        while p.check(TokenKind::Ampersand) && is_type_name(p.peek_kind()) {
            p.advance();
            match parse_type_atom(p) {
                Some(member) => members.push(member),
                None => break,
            }
        }
        let rendered = render(nullable, &members.join("&"));
        let structured = Node::IntersectionType(IntersectionTypeNode {
            types: members,
            pos,
        });
        return Some(TypeHint {
            rendered,
            structured: Some(structured),
        });
    }

    Some(TypeHint {
        rendered: render(nullable, &first),
        structured: None,
    })
}

fn render(nullable: bool, base: &str) -> String {
    if nullable {
        format!("?{base}")
    } else {
        base.to_string()
    }
}

/// One union/intersection member: a qualified name, a parenthesized DNF
/// group, or a `callable` signature.
fn parse_type_atom(p: &mut Parser) -> Option<String> {
    if p.eat(TokenKind::LeftParen) {
        let mut members = Vec::new();
        if let Some(first) = parse_type_atom(p) {
            members.push(first);
        }
        while p.eat(TokenKind::Ampersand) {
            match parse_type_atom(p) {
                Some(member) => members.push(member),
                None => break,
            }
        }
        p.expect(TokenKind::RightParen, "')'");
        return Some(format!("({})", members.join("&")));
    }

    if p.check(TokenKind::Callable) {
        return Some(parse_callable_type(p));
    }

    parse_type_name(p)
}

/// `callable` with an optional `(T, U): R` signature.
fn parse_callable_type(p: &mut Parser) -> String {
    p.advance(); // callable
    if !p.eat(TokenKind::LeftParen) {
        return "callable".to_string();
    }
    let mut params = Vec::new();
    while !p.check(TokenKind::RightParen) && !p.check(TokenKind::Eof) {
        match parse_type_hint(p) {
            Some(hint) => params.push(hint.rendered),
            None => break,
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RightParen, "')'");
    let mut rendered = format!("callable({})", params.join(", "));
    if p.eat(TokenKind::Colon) {
        if let Some(ret) = parse_type_hint(p) {
            rendered.push_str(": ");
            rendered.push_str(&ret.rendered);
        }
    }
    rendered
}

/// A possibly fully-qualified name: `Foo`, `\Foo\Bar`, `self`, `mixed`, ...
fn parse_type_name(p: &mut Parser) -> Option<String> {
    let mut name = String::new();
    if p.check(TokenKind::Backslash) {
        name.push('\\');
        p.advance();
    }
    if !is_type_name(p.tok.kind) {
        p.error(ParseError::Expected {
            expected: "type name".into(),
            found: p.tok.kind.to_string(),
            pos: p.tok.pos,
        });
        return None;
    }
    name.push_str(&p.tok.literal);
    p.advance();
    while p.check(TokenKind::Backslash) && p.peek_kind() == TokenKind::Identifier {
        p.advance();
        name.push('\\');
        name.push_str(&p.tok.literal);
        p.advance();
    }
    Some(name)
}
