//! Declaration grammar: functions and parameter lists, classes and their
//! members, interfaces, traits, enums, constants.

use phpcs_ast::{
    ClassNode, ConstantNode, EnumCaseNode, EnumNode, FunctionNode, InterfaceMethodNode,
    InterfaceNode, Node, ParamNode, PropertyNode, TraitNode,
};
use phpcs_lexer::TokenKind;

use crate::diagnostics::ParseError;
use crate::expr;
use crate::parser::Parser;
use crate::stmt;
use crate::types;

// =============================================================================
// Functions
// =============================================================================

/// Parses a named function or method at the `function` keyword. `modifiers`
/// carries whatever member modifiers were consumed before it. A semicolon
/// instead of a body is accepted for abstract methods.
pub(crate) fn parse_function(
    p: &mut Parser,
    modifiers: Vec<String>,
    doc: Option<String>,
) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // function
    p.eat(TokenKind::Ampersand); // by-ref return marker

    if !p.check(TokenKind::Identifier) {
        p.error(ParseError::Expected {
            expected: "function name".into(),
            found: p.tok.kind.to_string(),
            pos: p.tok.pos,
        });
        p.recover_statement();
        return None;
    }
    let name = p.tok.literal.clone();
    p.advance();

    if !p.expect(TokenKind::LeftParen, "'('") {
        p.recover_statement();
        return None;
    }
    let params = parse_params(p);
    let return_type = parse_return_type(p);

    let body = if p.eat(TokenKind::Semicolon) {
        Vec::new()
    } else if p.expect(TokenKind::LeftBrace, "'{'") {
        let body = stmt::parse_statements_until(p, TokenKind::RightBrace);
        p.expect(TokenKind::RightBrace, "'}'");
        body
    } else {
        p.recover_statement();
        return None;
    };

    Some(Node::Function(FunctionNode {
        name,
        modifiers,
        params,
        return_type,
        body,
        doc_comment: doc,
        pos,
    }))
}

fn parse_return_type(p: &mut Parser) -> Option<String> {
    if !p.eat(TokenKind::Colon) {
        return None;
    }
    types::parse_type_hint(p).map(|hint| hint.rendered)
}

/// The parameter list; the opening `(` is already consumed. Trailing commas
/// and comments between parameters are allowed. A malformed parameter
/// resynchronizes to the next `,` or `)`.
pub(crate) fn parse_params(p: &mut Parser) -> Vec<Node> {
    let mut params = Vec::new();
    while !p.check(TokenKind::RightParen) && !p.check(TokenKind::Eof) {
        match p.tok.kind {
            TokenKind::Comment | TokenKind::DocComment => {
                p.advance();
                continue;
            }
            TokenKind::Attribute => {
                stmt::skip_attribute(p);
                continue;
            }
            _ => {}
        }
        match parse_param(p) {
            Some(param) => params.push(param),
            None => {
                while !matches!(
                    p.tok.kind,
                    TokenKind::Comma | TokenKind::RightParen | TokenKind::Eof
                ) {
                    p.advance();
                }
            }
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RightParen, "')'");
    params
}

fn parse_param(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;

    // Constructor property promotion: a visibility or readonly modifier
    // turns the parameter into a property declaration.
    let mut visibility = None;
    let mut is_promoted = false;
    loop {
        match p.tok.kind {
            TokenKind::Public | TokenKind::Protected | TokenKind::Private => {
                visibility = Some(p.tok.literal.to_ascii_lowercase());
                is_promoted = true;
                p.advance();
            }
            TokenKind::Readonly => {
                is_promoted = true;
                p.advance();
            }
            _ => break,
        }
    }

    let (type_hint, union_type) = if types::at_type_start(p.tok.kind) {
        match types::parse_type_hint(p) {
            Some(hint) => (Some(hint.rendered), hint.structured.map(Box::new)),
            None => (None, None),
        }
    } else {
        (None, None)
    };

    let is_by_ref = p.eat(TokenKind::Ampersand);
    let is_variadic = p.eat(TokenKind::Ellipsis);

    if !p.check(TokenKind::Variable) {
        p.error(ParseError::Expected {
            expected: "parameter variable".into(),
            found: p.tok.kind.to_string(),
            pos: p.tok.pos,
        });
        return None;
    }
    let name = p.tok.literal.trim_start_matches('$').to_string();
    p.advance();

    let default = if p.eat(TokenKind::Assign) {
        expr::parse_expression(p).map(Box::new)
    } else {
        None
    };

    Some(Node::Param(ParamNode {
        name,
        type_hint,
        union_type,
        default,
        visibility,
        is_promoted,
        is_variadic,
        is_by_ref,
        pos,
    }))
}

// =============================================================================
// Classes, traits, enums
// =============================================================================

pub(crate) fn parse_class(p: &mut Parser, modifier: Option<String>) -> Option<Node> {
    let doc = p.take_doc();
    let pos = p.tok.pos;
    p.advance(); // class

    let Some(name) = declaration_name(p, "class name") else {
        return None;
    };

    let extends = if p.eat(TokenKind::Extends) {
        Some(expr::parse_qualified_name(p))
    } else {
        None
    };

    let mut implements = Vec::new();
    if p.eat(TokenKind::Implements) {
        loop {
            let interface = expr::parse_qualified_name(p);
            if interface.is_empty() {
                p.error(ParseError::Expected {
                    expected: "interface name".into(),
                    found: p.tok.kind.to_string(),
                    pos: p.tok.pos,
                });
                break;
            }
            implements.push(interface);
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    if !p.expect(TokenKind::LeftBrace, "'{'") {
        p.recover_statement();
        return None;
    }
    let body = parse_class_body(p);
    p.expect(TokenKind::RightBrace, "'}'");

    Some(Node::Class(ClassNode {
        name,
        modifier,
        extends,
        implements,
        body,
        doc_comment: doc,
        pos,
    }))
}

pub(crate) fn parse_trait(p: &mut Parser) -> Option<Node> {
    let doc = p.take_doc();
    let pos = p.tok.pos;
    p.advance(); // trait

    let Some(name) = declaration_name(p, "trait name") else {
        return None;
    };
    if !p.expect(TokenKind::LeftBrace, "'{'") {
        p.recover_statement();
        return None;
    }
    let body = parse_class_body(p);
    p.expect(TokenKind::RightBrace, "'}'");

    Some(Node::Trait(TraitNode {
        name,
        body,
        doc_comment: doc,
        pos,
    }))
}

pub(crate) fn parse_enum(p: &mut Parser) -> Option<Node> {
    let doc = p.take_doc();
    let pos = p.tok.pos;
    p.advance(); // enum

    let Some(name) = declaration_name(p, "enum name") else {
        return None;
    };

    let backed_by = if p.eat(TokenKind::Colon) {
        types::parse_type_hint(p).map(|hint| hint.rendered)
    } else {
        None
    };

    // `implements` is legal on enums; the list carries no weight here.
    if p.eat(TokenKind::Implements) {
        loop {
            expr::parse_qualified_name(p);
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    if !p.expect(TokenKind::LeftBrace, "'{'") {
        p.recover_statement();
        return None;
    }
    let body = parse_class_body(p);
    p.expect(TokenKind::RightBrace, "'}'");

    Some(Node::Enum(EnumNode {
        name,
        backed_by,
        body,
        doc_comment: doc,
        pos,
    }))
}

/// Shared body loop for classes, traits and enums. Guarantees forward
/// progress the same way the statement loop does.
fn parse_class_body(p: &mut Parser) -> Vec<Node> {
    let mut members = Vec::new();
    while !p.check(TokenKind::RightBrace) && !p.check(TokenKind::Eof) {
        match p.tok.kind {
            TokenKind::DocComment => {
                p.current_doc = Some(p.tok.literal.clone());
                p.advance();
            }
            TokenKind::Comment => p.advance(),
            TokenKind::Attribute => stmt::skip_attribute(p),
            TokenKind::Use => {
                // Trait usage inside a class body.
                p.recover_statement();
            }
            _ => {
                let before = (p.tok.pos.offset, p.tok.kind);
                match parse_member(p) {
                    Some(member) => members.push(member),
                    None => {
                        if (p.tok.pos.offset, p.tok.kind) == before {
                            p.advance();
                        }
                    }
                }
            }
        }
    }
    members
}

fn parse_member(p: &mut Parser) -> Option<Node> {
    // Every member consumes the buffered doc block, even the kinds that do
    // not store one, so it cannot attach to a later declaration.
    let doc = p.take_doc();
    let mut modifiers = Vec::new();
    while p.tok.kind.is_member_modifier() {
        modifiers.push(p.tok.literal.to_ascii_lowercase());
        p.advance();
    }

    match p.tok.kind {
        TokenKind::Const => parse_const(p, visibility_of(&modifiers), doc),
        TokenKind::Function => parse_function(p, modifiers, doc),
        TokenKind::Case => parse_enum_case(p),
        TokenKind::Var => {
            p.advance();
            parse_property(p, modifiers)
        }
        TokenKind::Variable => parse_property(p, modifiers),
        kind if types::at_type_start(kind) => parse_property(p, modifiers),
        _ => {
            p.error(ParseError::Unexpected {
                found: p.tok.kind.to_string(),
                pos: p.tok.pos,
            });
            p.recover_statement();
            None
        }
    }
}

fn parse_property(p: &mut Parser, modifiers: Vec<String>) -> Option<Node> {
    let pos = p.tok.pos;

    let type_hint = if p.check(TokenKind::Variable) {
        None
    } else {
        types::parse_type_hint(p).map(|hint| hint.rendered)
    };

    if !p.check(TokenKind::Variable) {
        p.error(ParseError::Expected {
            expected: "property name".into(),
            found: p.tok.kind.to_string(),
            pos: p.tok.pos,
        });
        p.recover_statement();
        return None;
    }
    let name = p.tok.literal.trim_start_matches('$').to_string();
    p.advance();

    let default = if p.eat(TokenKind::Assign) {
        expr::parse_expression(p).map(Box::new)
    } else {
        None
    };
    p.expect(TokenKind::Semicolon, "';'");

    Some(Node::Property(PropertyNode {
        name,
        type_hint,
        default,
        visibility: visibility_of(&modifiers),
        is_static: modifiers.iter().any(|m| m == "static"),
        is_readonly: modifiers.iter().any(|m| m == "readonly"),
        pos,
    }))
}

/// `const [type] NAME = expr;` at top level or inside a class body.
pub(crate) fn parse_const(
    p: &mut Parser,
    visibility: Option<String>,
    doc: Option<String>,
) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // const

    // `const FOO = 1` vs `const int FOO = 1`: an identifier directly
    // followed by `=` is the constant name, not a type.
    let type_hint = if types::at_type_start(p.tok.kind)
        && !(p.check(TokenKind::Identifier) && p.peek_kind() == TokenKind::Assign)
    {
        types::parse_type_hint(p).map(|hint| hint.rendered)
    } else {
        None
    };

    if !p.check(TokenKind::Identifier) {
        p.error(ParseError::Expected {
            expected: "constant name".into(),
            found: p.tok.kind.to_string(),
            pos: p.tok.pos,
        });
        p.recover_statement();
        return None;
    }
    let name = p.tok.literal.clone();
    p.advance();

    if !p.expect(TokenKind::Assign, "'='") {
        p.recover_statement();
        return None;
    }
    let value = match expr::parse_expression(p) {
        Some(value) => value,
        None => {
            p.recover_statement();
            return None;
        }
    };
    p.expect(TokenKind::Semicolon, "';'");

    Some(Node::Constant(ConstantNode {
        name,
        value: Box::new(value),
        visibility,
        type_hint,
        doc_comment: doc,
        pos,
    }))
}

fn parse_enum_case(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // case

    let Some(name) = declaration_name(p, "case name") else {
        return None;
    };
    let value = if p.eat(TokenKind::Assign) {
        expr::parse_expression(p).map(Box::new)
    } else {
        None
    };
    p.expect(TokenKind::Semicolon, "';'");

    Some(Node::EnumCase(EnumCaseNode { name, value, pos }))
}

fn visibility_of(modifiers: &[String]) -> Option<String> {
    modifiers
        .iter()
        .find(|m| matches!(m.as_str(), "public" | "protected" | "private"))
        .cloned()
}

fn declaration_name(p: &mut Parser, what: &str) -> Option<String> {
    if !p.check(TokenKind::Identifier) {
        p.error(ParseError::Expected {
            expected: what.into(),
            found: p.tok.kind.to_string(),
            pos: p.tok.pos,
        });
        p.recover_statement();
        return None;
    }
    let name = p.tok.literal.clone();
    p.advance();
    Some(name)
}

// =============================================================================
// Interfaces
// =============================================================================

pub(crate) fn parse_interface(p: &mut Parser) -> Option<Node> {
    let doc = p.take_doc();
    let pos = p.tok.pos;
    p.advance(); // interface

    let Some(name) = declaration_name(p, "interface name") else {
        return None;
    };

    let mut extends = Vec::new();
    if p.eat(TokenKind::Extends) {
        loop {
            let parent = expr::parse_qualified_name(p);
            if parent.is_empty() {
                break;
            }
            extends.push(parent);
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    if !p.expect(TokenKind::LeftBrace, "'{'") {
        p.recover_statement();
        return None;
    }

    let mut members = Vec::new();
    while !p.check(TokenKind::RightBrace) && !p.check(TokenKind::Eof) {
        match p.tok.kind {
            TokenKind::Comment | TokenKind::DocComment => p.advance(),
            TokenKind::Attribute => stmt::skip_attribute(p),
            _ => {
                let before = (p.tok.pos.offset, p.tok.kind);
                match parse_interface_member(p) {
                    Some(member) => members.push(member),
                    None => {
                        if (p.tok.pos.offset, p.tok.kind) == before {
                            p.advance();
                        }
                    }
                }
            }
        }
    }
    p.expect(TokenKind::RightBrace, "'}'");

    Some(Node::Interface(InterfaceNode {
        name,
        extends,
        members,
        doc_comment: doc,
        pos,
    }))
}

fn parse_interface_member(p: &mut Parser) -> Option<Node> {
    let mut modifiers = Vec::new();
    while p.tok.kind.is_member_modifier() {
        modifiers.push(p.tok.literal.to_ascii_lowercase());
        p.advance();
    }

    match p.tok.kind {
        TokenKind::Const => parse_const(p, visibility_of(&modifiers), None),
        TokenKind::Function => parse_interface_method(p, visibility_of(&modifiers)),
        _ => {
            p.error(ParseError::Unexpected {
                found: p.tok.kind.to_string(),
                pos: p.tok.pos,
            });
            p.recover_statement();
            None
        }
    }
}

/// A bodyless method signature terminated by `;`.
fn parse_interface_method(p: &mut Parser, visibility: Option<String>) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // function

    let Some(name) = declaration_name(p, "method name") else {
        return None;
    };
    if !p.expect(TokenKind::LeftParen, "'('") {
        p.recover_statement();
        return None;
    }
    let params = parse_params(p);
    let return_type = parse_return_type(p);
    p.expect(TokenKind::Semicolon, "';'");

    Some(Node::InterfaceMethod(InterfaceMethodNode {
        name,
        visibility,
        params,
        return_type,
        pos,
    }))
}
