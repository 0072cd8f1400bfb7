//! Expression parsing: precedence climbing over a single operator table,
//! with prefix operators, postfix chains, and all the literal forms.

use phpcs_ast::{
    ArrayAccessNode, ArrayItemNode, ArrayNode, AssignmentNode, BinaryExpr, BooleanLiteral,
    CastNode, ClassConstFetchNode, FloatLiteral, FunctionCallNode, IdentifierNode,
    IntegerLiteral, InterpolatedStringLiteral, MagicConstNode, MatchArmNode, MatchNode,
    MethodCallNode, NewNode, Node, NullLiteral, PropertyFetchNode, StringLiteral, TernaryExpr,
    ThrowNode, UnaryExpr, UnpackedArgumentNode, VariableNode,
};
use phpcs_lexer::TokenKind;

use crate::diagnostics::ParseError;
use crate::interpolation;
use crate::parser::Parser;
use crate::precedence::{is_right_assoc, precedence, ASSIGNMENT_PRECEDENCE, TERNARY_PRECEDENCE};

/// Parse a full expression at the lowest precedence level, where assignment
/// is legal. Returns `None` after recording a diagnostic; the caller decides
/// how far to resynchronize.
pub(crate) fn parse_expression(p: &mut Parser) -> Option<Node> {
    parse_with_precedence(p, ASSIGNMENT_PRECEDENCE)
}

pub(crate) fn parse_with_precedence(p: &mut Parser, min_prec: u8) -> Option<Node> {
    let mut left = parse_unary(p)?;

    loop {
        let kind = p.tok.kind;

        if kind == TokenKind::Question {
            if TERNARY_PRECEDENCE < min_prec {
                break;
            }
            left = parse_ternary(p, left)?;
            continue;
        }

        let Some(prec) = precedence(kind) else { break };
        if prec < min_prec {
            break;
        }

        let pos = p.tok.pos;
        let operator = p.tok.literal.clone();

        if kind.is_assignment_op() {
            if !is_assignment_target(&left) {
                p.error(ParseError::InvalidAssignmentTarget { pos: left.pos() });
                return None;
            }
            p.advance();
            let value = parse_with_precedence(p, ASSIGNMENT_PRECEDENCE)?;
            left = Node::Assignment(AssignmentNode {
                target: Box::new(left),
                operator,
                value: Box::new(value),
                pos,
            });
            continue;
        }

        p.advance();
        let next_min = if is_right_assoc(kind) { prec } else { prec + 1 };
        let right = parse_with_precedence(p, next_min)?;
        left = Node::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            pos,
        });
    }

    Some(left)
}

/// Only variables, property fetches and array accesses are writable.
fn is_assignment_target(node: &Node) -> bool {
    matches!(
        node,
        Node::Variable(_) | Node::PropertyFetch(_) | Node::ArrayAccess(_)
    )
}

/// `cond ? a : b` and the elvis form `cond ?: b`. The else branch parses at
/// the ternary level, making chained ternaries right-associative.
fn parse_ternary(p: &mut Parser, condition: Node) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // ?

    let then_branch = if p.check(TokenKind::Colon) {
        None
    } else {
        Some(Box::new(parse_with_precedence(p, ASSIGNMENT_PRECEDENCE)?))
    };
    if !p.expect(TokenKind::Colon, "':'") {
        return None;
    }
    let else_branch = parse_with_precedence(p, TERNARY_PRECEDENCE)?;

    Some(Node::Ternary(TernaryExpr {
        condition: Box::new(condition),
        then_branch,
        else_branch: Box::new(else_branch),
        pos,
    }))
}

// =============================================================================
// Prefix operators
// =============================================================================

fn parse_unary(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    match p.tok.kind {
        TokenKind::Not => {
            p.advance();
            let operand = parse_unary(p)?;
            Some(unary("!", operand, pos))
        }
        TokenKind::Minus => {
            p.advance();
            // Fold a negation directly into a numeric literal.
            match p.tok.kind {
                TokenKind::IntNumber => {
                    let value = parse_int_literal(p)?;
                    Some(Node::Integer(IntegerLiteral { value: -value, pos }))
                }
                TokenKind::FloatNumber => {
                    let value = parse_float_literal(p)?;
                    Some(Node::Float(FloatLiteral { value: -value, pos }))
                }
                _ => {
                    let operand = parse_unary(p)?;
                    Some(unary("-", operand, pos))
                }
            }
        }
        TokenKind::Plus => {
            p.advance();
            match p.tok.kind {
                TokenKind::IntNumber => {
                    let value = parse_int_literal(p)?;
                    Some(Node::Integer(IntegerLiteral { value, pos }))
                }
                TokenKind::FloatNumber => {
                    let value = parse_float_literal(p)?;
                    Some(Node::Float(FloatLiteral { value, pos }))
                }
                _ => {
                    let operand = parse_unary(p)?;
                    Some(unary("+", operand, pos))
                }
            }
        }
        TokenKind::Inc | TokenKind::Dec => {
            let operator = p.tok.literal.clone();
            p.advance();
            let operand = parse_unary(p)?;
            Some(unary(&operator, operand, pos))
        }
        TokenKind::Throw => {
            p.advance();
            let expr = parse_with_precedence(p, ASSIGNMENT_PRECEDENCE)?;
            Some(Node::Throw(ThrowNode {
                expr: Box::new(expr),
                pos,
            }))
        }
        TokenKind::Clone => {
            p.advance();
            let operand = parse_unary(p)?;
            Some(unary("clone", operand, pos))
        }
        kind if kind.is_cast() => {
            let cast_type = p
                .tok
                .literal
                .trim_matches(|c| c == '(' || c == ')')
                .trim()
                .to_string();
            p.advance();
            let expr = parse_unary(p)?;
            Some(Node::Cast(CastNode {
                cast_type,
                expr: Box::new(expr),
                pos,
            }))
        }
        _ => parse_postfix(p),
    }
}

fn unary(operator: &str, operand: Node, pos: phpcs_ast::Position) -> Node {
    Node::Unary(UnaryExpr {
        operator: operator.to_string(),
        operand: Box::new(operand),
        is_postfix: false,
        pos,
    })
}

// =============================================================================
// Postfix chains
// =============================================================================

fn parse_postfix(p: &mut Parser) -> Option<Node> {
    let mut node = parse_primary(p)?;

    loop {
        match p.tok.kind {
            TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator => {
                let nullsafe = p.tok.kind == TokenKind::NullsafeObjectOperator;
                let pos = p.tok.pos;
                p.advance();
                let Some(member) = member_name(p) else {
                    p.error(ParseError::ExpectedAfter {
                        expected: "member name".into(),
                        after: if nullsafe { "'?->'" } else { "'->'" }.into(),
                        found: p.tok.kind.to_string(),
                        pos: p.tok.pos,
                    });
                    return None;
                };
                if p.eat(TokenKind::LeftParen) {
                    let args = parse_args(p);
                    node = Node::MethodCall(MethodCallNode {
                        object: Box::new(node),
                        method: member,
                        args,
                        nullsafe,
                        pos,
                    });
                } else {
                    node = Node::PropertyFetch(PropertyFetchNode {
                        object: Box::new(node),
                        property: member,
                        nullsafe,
                        pos,
                    });
                }
            }
            TokenKind::LeftBracket => {
                let pos = p.tok.pos;
                p.advance();
                let index = if p.check(TokenKind::RightBracket) {
                    None
                } else {
                    Some(Box::new(parse_expression(p)?))
                };
                p.expect(TokenKind::RightBracket, "']'");
                node = Node::ArrayAccess(ArrayAccessNode {
                    array: Box::new(node),
                    index,
                    pos,
                });
            }
            TokenKind::LeftParen if is_callable_value(&node) => {
                let pos = p.tok.pos;
                p.advance();
                let args = parse_args(p);
                node = Node::FunctionCall(FunctionCallNode {
                    name: Box::new(node),
                    args,
                    pos,
                });
            }
            TokenKind::Inc | TokenKind::Dec => {
                let operator = p.tok.literal.clone();
                let pos = p.tok.pos;
                p.advance();
                node = Node::Unary(UnaryExpr {
                    operator,
                    operand: Box::new(node),
                    is_postfix: true,
                    pos,
                });
            }
            _ => break,
        }
    }

    Some(node)
}

/// Values that a trailing `(` turns into a call: `$fn()`, `$ops['add']()`,
/// `$obj->handler()` is a method call already, but `($obj->handler)()` and
/// `$obj->prop` fetched first both land here.
fn is_callable_value(node: &Node) -> bool {
    matches!(
        node,
        Node::Variable(_) | Node::ArrayAccess(_) | Node::PropertyFetch(_)
    )
}

/// Method and property names: identifiers plus the semi-reserved keywords
/// PHP allows after `->`.
fn member_name(p: &mut Parser) -> Option<String> {
    let ok = p.tok.kind == TokenKind::Identifier
        || (!p.tok.literal.is_empty()
            && p.tok
                .literal
                .chars()
                .all(|c| c == '_' || c.is_alphanumeric())
            && !p.tok.literal.starts_with(|c: char| c.is_ascii_digit()));
    if !ok {
        return None;
    }
    let name = p.tok.literal.clone();
    p.advance();
    Some(name)
}

// =============================================================================
// Primaries
// =============================================================================

fn parse_primary(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    match p.tok.kind {
        TokenKind::Variable => {
            let name = p.tok.literal.trim_start_matches('$').to_string();
            p.advance();
            Some(Node::Variable(VariableNode { name, pos }))
        }
        TokenKind::IntNumber => {
            let value = parse_int_literal(p)?;
            Some(Node::Integer(IntegerLiteral { value, pos }))
        }
        TokenKind::FloatNumber => {
            let value = parse_float_literal(p)?;
            Some(Node::Float(FloatLiteral { value, pos }))
        }
        TokenKind::True | TokenKind::False => {
            let value = p.tok.kind == TokenKind::True;
            p.advance();
            Some(Node::Boolean(BooleanLiteral { value, pos }))
        }
        TokenKind::Null => {
            p.advance();
            Some(Node::Null(NullLiteral { pos }))
        }
        TokenKind::SingleQuotedString => {
            let value = p.tok.literal.clone();
            p.advance();
            Some(Node::StringLit(StringLiteral { value, pos }))
        }
        TokenKind::DoubleQuotedString => {
            let value = p.tok.literal.clone();
            p.advance();
            Some(string_or_interpolated(value, pos))
        }
        TokenKind::StartHeredoc => {
            p.advance();
            let body = if p.check(TokenKind::EncapsedAndWhitespace) {
                let body = p.tok.literal.clone();
                p.advance();
                body
            } else {
                String::new()
            };
            p.expect(TokenKind::EndHeredoc, "heredoc terminator");
            Some(string_or_interpolated(body, pos))
        }
        TokenKind::StartNowdoc => {
            p.advance();
            let value = if p.check(TokenKind::EncapsedAndWhitespace) {
                let body = p.tok.literal.clone();
                p.advance();
                body
            } else {
                String::new()
            };
            p.expect(TokenKind::EndNowdoc, "nowdoc terminator");
            Some(Node::StringLit(StringLiteral { value, pos }))
        }
        kind if kind.is_magic_const() => {
            let name = p.tok.literal.clone();
            p.advance();
            Some(Node::MagicConst(MagicConstNode { name, pos }))
        }
        TokenKind::New => parse_new(p),
        TokenKind::Match => parse_match(p),
        TokenKind::LeftParen => {
            p.advance();
            let inner = parse_expression(p)?;
            p.expect(TokenKind::RightParen, "')'");
            Some(inner)
        }
        TokenKind::LeftBracket => {
            p.advance();
            parse_array_literal(p, pos, TokenKind::RightBracket)
        }
        TokenKind::Array => {
            if p.peek_kind() != TokenKind::LeftParen {
                p.error(ParseError::ExpectedExpression {
                    found: p.tok.kind.to_string(),
                    pos,
                });
                return None;
            }
            p.advance(); // array
            p.advance(); // (
            parse_array_literal(p, pos, TokenKind::RightParen)
        }
        TokenKind::Isset | TokenKind::Empty | TokenKind::List => {
            let name = p.tok.literal.clone();
            p.advance();
            if !p.expect(TokenKind::LeftParen, "'('") {
                return None;
            }
            let args = parse_args(p);
            Some(Node::FunctionCall(FunctionCallNode {
                name: Box::new(Node::Identifier(IdentifierNode { value: name, pos })),
                args,
                pos,
            }))
        }
        TokenKind::Identifier
        | TokenKind::Backslash
        | TokenKind::Self_
        | TokenKind::Parent_
        | TokenKind::Static => parse_name_expression(p),
        TokenKind::Illegal => {
            p.error(ParseError::IllegalToken {
                literal: p.tok.literal.clone(),
                pos,
            });
            p.advance();
            None
        }
        _ => {
            p.error(ParseError::ExpectedExpression {
                found: p.tok.kind.to_string(),
                pos,
            });
            None
        }
    }
}

fn string_or_interpolated(value: String, pos: phpcs_ast::Position) -> Node {
    if interpolation::has_interpolation(&value) {
        Node::InterpolatedString(InterpolatedStringLiteral {
            parts: interpolation::parse_parts(&value, pos),
            pos,
        })
    } else {
        Node::StringLit(StringLiteral { value, pos })
    }
}

fn parse_int_literal(p: &mut Parser) -> Option<i64> {
    let literal = &p.tok.literal;
    let parsed = if let Some(digits) = literal.strip_prefix("0o") {
        i64::from_str_radix(digits, 8)
    } else {
        literal.parse::<i64>()
    };
    match parsed {
        Ok(value) => {
            p.advance();
            Some(value)
        }
        Err(_) => {
            p.error(ParseError::Message {
                message: format!("invalid integer literal {}", p.tok.literal),
                pos: p.tok.pos,
            });
            p.advance();
            None
        }
    }
}

fn parse_float_literal(p: &mut Parser) -> Option<f64> {
    match p.tok.literal.parse::<f64>() {
        Ok(value) => {
            p.advance();
            Some(value)
        }
        Err(_) => {
            p.error(ParseError::Message {
                message: format!("invalid float literal {}", p.tok.literal),
                pos: p.tok.pos,
            });
            p.advance();
            None
        }
    }
}

/// `new Name(args)`, `new \Fq\Name`, `new $class(...)`, `new static`.
fn parse_new(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // new

    let class_name = match p.tok.kind {
        TokenKind::Identifier | TokenKind::Backslash => parse_qualified_name(p),
        TokenKind::Self_ | TokenKind::Parent_ | TokenKind::Static => {
            let name = p.tok.literal.clone();
            p.advance();
            name
        }
        TokenKind::Variable => {
            let name = p.tok.literal.clone();
            p.advance();
            name
        }
        _ => {
            p.error(ParseError::ExpectedAfter {
                expected: "class name".into(),
                after: "'new'".into(),
                found: p.tok.kind.to_string(),
                pos: p.tok.pos,
            });
            return None;
        }
    };

    let args = if p.eat(TokenKind::LeftParen) {
        parse_args(p)
    } else {
        Vec::new()
    };

    Some(Node::New(NewNode {
        class_name,
        args,
        pos,
    }))
}

/// A bare name in expression position: plain constant/identifier, function
/// call, `Name::CONST`, `Name::class`, `Name::$staticProp`, `Name::method()`.
fn parse_name_expression(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    let name = match p.tok.kind {
        TokenKind::Self_ | TokenKind::Parent_ | TokenKind::Static => {
            let name = p.tok.literal.clone();
            p.advance();
            name
        }
        _ => parse_qualified_name(p),
    };

    if p.check(TokenKind::ClassConst) {
        p.advance();
        return Some(Node::ClassConstFetch(ClassConstFetchNode {
            class: name,
            constant: "class".into(),
            pos,
        }));
    }

    if p.eat(TokenKind::DoubleColon) {
        match p.tok.kind {
            TokenKind::Class => {
                p.advance();
                return Some(Node::ClassConstFetch(ClassConstFetchNode {
                    class: name,
                    constant: "class".into(),
                    pos,
                }));
            }
            TokenKind::Variable => {
                let property = p.tok.literal.trim_start_matches('$').to_string();
                p.advance();
                return Some(Node::PropertyFetch(PropertyFetchNode {
                    object: Box::new(Node::Identifier(IdentifierNode { value: name, pos })),
                    property,
                    nullsafe: false,
                    pos,
                }));
            }
            _ => {
                let Some(member) = member_name(p) else {
                    p.error(ParseError::ExpectedAfter {
                        expected: "constant or method name".into(),
                        after: "'::'".into(),
                        found: p.tok.kind.to_string(),
                        pos: p.tok.pos,
                    });
                    return None;
                };
                if p.eat(TokenKind::LeftParen) {
                    let args = parse_args(p);
                    return Some(Node::MethodCall(MethodCallNode {
                        object: Box::new(Node::Identifier(IdentifierNode { value: name, pos })),
                        method: member,
                        args,
                        nullsafe: false,
                        pos,
                    }));
                }
                return Some(Node::ClassConstFetch(ClassConstFetchNode {
                    class: name,
                    constant: member,
                    pos,
                }));
            }
        }
    }

    if p.eat(TokenKind::LeftParen) {
        let args = parse_args(p);
        return Some(Node::FunctionCall(FunctionCallNode {
            name: Box::new(Node::Identifier(IdentifierNode { value: name, pos })),
            args,
            pos,
        }));
    }

    Some(Node::Identifier(IdentifierNode { value: name, pos }))
}

/// `Foo`, `Foo\Bar`, `\Foo\Bar` — rendered with backslashes as written.
pub(crate) fn parse_qualified_name(p: &mut Parser) -> String {
    let mut name = String::new();
    if p.check(TokenKind::Backslash) {
        name.push('\\');
        p.advance();
    }
    if p.check(TokenKind::Identifier) {
        name.push_str(&p.tok.literal);
        p.advance();
    }
    while p.check(TokenKind::Backslash) && p.peek_kind() == TokenKind::Identifier {
        p.advance();
        name.push('\\');
        name.push_str(&p.tok.literal);
        p.advance();
    }
    name
}

// =============================================================================
// Argument lists and array literals
// =============================================================================

/// Parses a call argument list; the opening `(` is already consumed. A
/// malformed argument resynchronizes to the next `,` or `)` so the rest of
/// the list still parses.
pub(crate) fn parse_args(p: &mut Parser) -> Vec<Node> {
    let mut args = Vec::new();
    while !p.check(TokenKind::RightParen) && !p.check(TokenKind::Eof) {
        if p.check(TokenKind::Ellipsis) {
            let pos = p.tok.pos;
            p.advance();
            match parse_expression(p) {
                Some(expr) => args.push(Node::UnpackedArgument(UnpackedArgumentNode {
                    expr: Box::new(expr),
                    pos,
                })),
                None => sync_list_item(p, TokenKind::RightParen),
            }
        } else {
            match parse_expression(p) {
                Some(expr) => args.push(expr),
                None => sync_list_item(p, TokenKind::RightParen),
            }
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RightParen, "')'");
    args
}

fn sync_list_item(p: &mut Parser, closing: TokenKind) {
    while !p.check(TokenKind::Comma) && !p.check(closing) && !p.check(TokenKind::Eof) {
        p.advance();
    }
}

/// Both literal forms; the opening token is consumed, `closing` is `]` or `)`.
fn parse_array_literal(
    p: &mut Parser,
    pos: phpcs_ast::Position,
    closing: TokenKind,
) -> Option<Node> {
    let mut elements = Vec::new();
    while !p.check(closing) && !p.check(TokenKind::Eof) {
        match parse_array_item(p) {
            Some(item) => elements.push(item),
            None => sync_list_item(p, closing),
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.expect(closing, if closing == TokenKind::RightBracket { "']'" } else { "')'" });
    Some(Node::Array(ArrayNode { elements, pos }))
}

fn parse_array_item(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;

    if p.eat(TokenKind::Ellipsis) {
        let value = parse_expression(p)?;
        return Some(Node::ArrayItem(ArrayItemNode {
            key: None,
            value: Box::new(value),
            by_ref: false,
            unpack: true,
            pos,
        }));
    }

    let by_ref = p.eat(TokenKind::Ampersand);
    let first = parse_expression(p)?;

    if p.eat(TokenKind::DoubleArrow) {
        let value_by_ref = p.eat(TokenKind::Ampersand);
        let value = parse_expression(p)?;
        return Some(Node::ArrayItem(ArrayItemNode {
            key: Some(Box::new(first)),
            value: Box::new(value),
            by_ref: value_by_ref,
            unpack: false,
            pos,
        }));
    }

    Some(Node::ArrayItem(ArrayItemNode {
        key: None,
        value: Box::new(first),
        by_ref,
        unpack: false,
        pos,
    }))
}

// =============================================================================
// match
// =============================================================================

fn parse_match(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // match

    if !p.expect(TokenKind::LeftParen, "'('") {
        return None;
    }
    let condition = match parse_expression(p) {
        Some(expr) => expr,
        None => {
            sync_list_item(p, TokenKind::RightParen);
            p.eat(TokenKind::RightParen);
            return None;
        }
    };
    p.expect(TokenKind::RightParen, "')'");
    if !p.expect(TokenKind::LeftBrace, "'{'") {
        return None;
    }

    let mut arms = Vec::new();
    while !p.check(TokenKind::RightBrace) && !p.check(TokenKind::Eof) {
        match parse_match_arm(p) {
            Some(arm) => arms.push(arm),
            None => {
                while !matches!(
                    p.tok.kind,
                    TokenKind::Comma | TokenKind::RightBrace | TokenKind::Eof
                ) {
                    p.advance();
                }
            }
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RightBrace, "'}'");

    Some(Node::Match(MatchNode {
        condition: Box::new(condition),
        arms,
        pos,
    }))
}

/// One `cond[, cond]* => body` arm. `default` becomes a single identifier
/// condition so rule engines can spot it without a dedicated flag.
fn parse_match_arm(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    let mut conditions = Vec::new();

    if p.check(TokenKind::Default) {
        conditions.push(Node::Identifier(IdentifierNode {
            value: "default".into(),
            pos: p.tok.pos,
        }));
        p.advance();
    } else {
        loop {
            conditions.push(parse_expression(p)?);
            if !p.eat(TokenKind::Comma) {
                break;
            }
            // Trailing comma before the arrow is allowed.
            if p.check(TokenKind::DoubleArrow) {
                break;
            }
        }
    }

    if !p.expect(TokenKind::DoubleArrow, "'=>'") {
        return None;
    }
    let body = parse_expression(p)?;

    Some(Node::MatchArm(MatchArmNode {
        conditions,
        body: Box::new(body),
        pos,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpcs_lexer::Lexer;

    fn parse_one(source: &str) -> (Node, Vec<String>) {
        let full = format!("<?php {source};");
        let mut p = Parser::new(Lexer::new(&full));
        let program = p.parse();
        let errors = p.errors().to_vec();
        assert_eq!(program.len(), 1, "expected one statement for {source:?}");
        let node = match program.into_iter().next() {
            Some(Node::ExpressionStmt(stmt)) => *stmt.expr,
            Some(other) => other,
            None => unreachable!(),
        };
        (node, errors)
    }

    fn expr(source: &str) -> Node {
        let (node, errors) = parse_one(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        node
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let node = expr("20 + 5 * 2");
        match node {
            Node::Binary(add) => {
                assert_eq!(add.operator, "+");
                match *add.right {
                    Node::Binary(mul) => assert_eq!(mul.operator, "*"),
                    other => panic!("expected nested product, got {other:?}"),
                }
            }
            other => panic!("expected sum, got {other:?}"),
        }
    }

    #[test]
    fn test_left_associative_subtraction() {
        // (10 - 4) - 3
        match expr("10 - 4 - 3") {
            Node::Binary(outer) => {
                assert_eq!(outer.operator, "-");
                assert!(matches!(*outer.left, Node::Binary(_)));
                assert!(matches!(*outer.right, Node::Integer(_)));
            }
            other => panic!("expected difference, got {other:?}"),
        }
    }

    #[test]
    fn test_coalesce_is_right_associative() {
        // $a ?? ($b ?? $c)
        match expr("$a ?? $b ?? $c") {
            Node::Binary(outer) => {
                assert_eq!(outer.operator, "??");
                assert!(matches!(*outer.left, Node::Variable(_)));
                assert!(matches!(*outer.right, Node::Binary(_)));
            }
            other => panic!("expected coalesce, got {other:?}"),
        }
    }

    #[test]
    fn test_assignment_is_an_expression() {
        match expr("$a = $b = 1") {
            Node::Assignment(outer) => {
                assert_eq!(outer.operator, "=");
                assert!(matches!(*outer.value, Node::Assignment(_)));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_compound_assignment_operator_text() {
        match expr("$total ??= 0") {
            Node::Assignment(a) => assert_eq!(a.operator, "??="),
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_assignment_target_is_rejected() {
        let mut p = Parser::new(Lexer::new("<?php 1 + 2 = 3;"));
        let program = p.parse();
        assert!(
            p.errors().iter().any(|e| e.contains("invalid assignment target")),
            "{:?}",
            p.errors()
        );
        assert!(program.iter().all(|n| n.node_kind() != "Assignment"));
    }

    #[test]
    fn test_array_access_and_property_targets_are_accepted() {
        assert!(matches!(expr("$arr[0] = 3"), Node::Assignment(_)));
        assert!(matches!(expr("$this->x = 3"), Node::Assignment(_)));
    }

    #[test]
    fn test_ternary_and_elvis() {
        match expr("$ok ? 1 : 2") {
            Node::Ternary(t) => assert!(t.then_branch.is_some()),
            other => panic!("expected ternary, got {other:?}"),
        }
        match expr("$name ?: 'anon'") {
            Node::Ternary(t) => assert!(t.then_branch.is_none()),
            other => panic!("expected elvis, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_number_folds_into_literal() {
        match expr("-42") {
            Node::Integer(i) => assert_eq!(i.value, -42),
            other => panic!("expected integer, got {other:?}"),
        }
    }

    #[test]
    fn test_not_and_spaceship() {
        match expr("!$done") {
            Node::Unary(u) => assert_eq!(u.operator, "!"),
            other => panic!("expected unary, got {other:?}"),
        }
        match expr("$a <=> $b") {
            Node::Binary(b) => assert_eq!(b.operator, "<=>"),
            other => panic!("expected comparison, got {other:?}"),
        }
    }

    #[test]
    fn test_octal_literal_value() {
        match expr("0o17") {
            Node::Integer(i) => assert_eq!(i.value, 15),
            other => panic!("expected integer, got {other:?}"),
        }
    }

    #[test]
    fn test_method_call_chain() {
        match expr("$db->table('users')->where('id', 1)") {
            Node::MethodCall(outer) => {
                assert_eq!(outer.method, "where");
                assert_eq!(outer.args.len(), 2);
                assert!(matches!(*outer.object, Node::MethodCall(_)));
            }
            other => panic!("expected method call, got {other:?}"),
        }
    }

    #[test]
    fn test_nullsafe_property_fetch() {
        match expr("$user?->profile") {
            Node::PropertyFetch(f) => {
                assert!(f.nullsafe);
                assert_eq!(f.property, "profile");
            }
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_class_const_and_class_name_resolution() {
        match expr("Status::ACTIVE") {
            Node::ClassConstFetch(c) => {
                assert_eq!(c.class, "Status");
                assert_eq!(c.constant, "ACTIVE");
            }
            other => panic!("expected const fetch, got {other:?}"),
        }
        match expr("\\App\\User::class") {
            Node::ClassConstFetch(c) => {
                assert_eq!(c.class, "\\App\\User");
                assert_eq!(c.constant, "class");
            }
            other => panic!("expected ::class fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_static_method_call() {
        match expr("Factory::create(1)") {
            Node::MethodCall(m) => {
                assert_eq!(m.method, "create");
                assert!(matches!(*m.object, Node::Identifier(_)));
            }
            other => panic!("expected static call, got {other:?}"),
        }
    }

    #[test]
    fn test_new_with_and_without_args() {
        match expr("new User('ada')") {
            Node::New(n) => {
                assert_eq!(n.class_name, "User");
                assert_eq!(n.args.len(), 1);
            }
            other => panic!("expected new, got {other:?}"),
        }
        match expr("new \\DateTimeImmutable") {
            Node::New(n) => assert!(n.args.is_empty()),
            other => panic!("expected new, got {other:?}"),
        }
    }

    #[test]
    fn test_array_literal_forms() {
        match expr("[1, 'k' => 2, ...$rest]") {
            Node::Array(a) => {
                assert_eq!(a.elements.len(), 3);
                match &a.elements[1] {
                    Node::ArrayItem(item) => assert!(item.key.is_some()),
                    other => panic!("expected item, got {other:?}"),
                }
                match &a.elements[2] {
                    Node::ArrayItem(item) => assert!(item.unpack),
                    other => panic!("expected item, got {other:?}"),
                }
            }
            other => panic!("expected array, got {other:?}"),
        }
        assert!(matches!(expr("array(1, 2)"), Node::Array(_)));
    }

    #[test]
    fn test_match_arms_and_conditions() {
        match expr("match ($v) { 1, 2 => 'a', default => 'b' }") {
            Node::Match(m) => {
                assert_eq!(m.arms.len(), 2);
                match &m.arms[0] {
                    Node::MatchArm(arm) => assert_eq!(arm.conditions.len(), 2),
                    other => panic!("expected arm, got {other:?}"),
                }
                match &m.arms[1] {
                    Node::MatchArm(arm) => {
                        assert_eq!(arm.conditions.len(), 1);
                        match &arm.conditions[0] {
                            Node::Identifier(id) => assert_eq!(id.value, "default"),
                            other => panic!("expected default marker, got {other:?}"),
                        }
                    }
                    other => panic!("expected arm, got {other:?}"),
                }
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_interpolated_string_splits_into_parts() {
        match expr("\"Hello $name!\"") {
            Node::InterpolatedString(s) => assert_eq!(s.parts.len(), 3),
            other => panic!("expected interpolated string, got {other:?}"),
        }
        assert!(matches!(expr("\"plain\""), Node::StringLit(_)));
    }

    #[test]
    fn test_cast_expression() {
        match expr("(int) $raw") {
            Node::Cast(c) => assert_eq!(c.cast_type, "int"),
            other => panic!("expected cast, got {other:?}"),
        }
    }

    #[test]
    fn test_instanceof_binds_tighter_than_boolean_and() {
        match expr("$a instanceof Foo && $ok") {
            Node::Binary(outer) => {
                assert_eq!(outer.operator, "&&");
                match *outer.left {
                    Node::Binary(inner) => assert_eq!(inner.operator, "instanceof"),
                    other => panic!("expected instanceof, got {other:?}"),
                }
            }
            other => panic!("expected boolean and, got {other:?}"),
        }
    }

    #[test]
    fn test_prefix_and_postfix_increment() {
        match expr("++$i") {
            Node::Unary(u) => {
                assert_eq!(u.operator, "++");
                assert!(!u.is_postfix);
            }
            other => panic!("expected unary, got {other:?}"),
        }
        match expr("$i++") {
            Node::Unary(u) => {
                assert_eq!(u.operator, "++");
                assert!(u.is_postfix);
                assert!(matches!(*u.operand, Node::Variable(_)));
            }
            other => panic!("expected unary, got {other:?}"),
        }
    }

    #[test]
    fn test_heredoc_becomes_string_literal() {
        let full = "<?php $s = <<<EOT\nline one\nline two\nEOT;";
        let mut p = Parser::new(Lexer::new(full));
        let program = p.parse();
        assert!(p.errors().is_empty(), "{:?}", p.errors());
        match &program[0] {
            Node::ExpressionStmt(stmt) => match &*stmt.expr {
                Node::Assignment(a) => match &*a.value {
                    Node::StringLit(s) => assert_eq!(s.value, "line one\nline two\n"),
                    other => panic!("expected string, got {other:?}"),
                },
                other => panic!("expected assignment, got {other:?}"),
            },
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_nowdoc_is_never_interpolated() {
        let full = "<?php $s = <<<'RAW'\nhi $name\nRAW;";
        let mut p = Parser::new(Lexer::new(full));
        let program = p.parse();
        assert!(p.errors().is_empty(), "{:?}", p.errors());
        match &program[0] {
            Node::ExpressionStmt(stmt) => match &*stmt.expr {
                Node::Assignment(a) => match &*a.value {
                    Node::StringLit(s) => assert_eq!(s.value, "hi $name\n"),
                    other => panic!("expected plain string, got {other:?}"),
                },
                other => panic!("expected assignment, got {other:?}"),
            },
            other => panic!("expected expression statement, got {other:?}"),
        }
    }
}
