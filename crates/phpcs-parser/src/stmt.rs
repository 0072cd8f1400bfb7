//! Statement-level parsing and dispatch into the declaration grammar.

use phpcs_ast::{
    BlockNode, CommentNode, DeclareDirective, DeclareNode, EchoNode, ElseIfNode, ElseNode,
    ExpressionStmtNode, ForNode, ForeachNode, IfNode, NamespaceNode, Node, ReturnNode,
    StaticVar, StaticVarDeclNode, UnsetNode, VariableNode, WhileNode,
};
use phpcs_lexer::TokenKind;

use crate::decl;
use crate::diagnostics::ParseError;
use crate::expr;
use crate::parser::Parser;

pub(crate) fn parse_statement(p: &mut Parser) -> Option<Node> {
    match p.tok.kind {
        TokenKind::DocComment => {
            // Buffered; attaches to the next declaration, never emitted as a
            // statement of its own.
            p.current_doc = Some(p.tok.literal.clone());
            p.advance();
            None
        }
        TokenKind::Comment => {
            let node = Node::Comment(CommentNode {
                text: p.tok.literal.clone(),
                pos: p.tok.pos,
            });
            p.advance();
            Some(node)
        }
        TokenKind::Attribute => {
            skip_attribute(p);
            None
        }
        TokenKind::Semicolon => {
            p.advance();
            None
        }
        TokenKind::Namespace => parse_namespace(p),
        TokenKind::Use => {
            // Import statements carry no analysis weight here; consume
            // through the terminating semicolon.
            p.recover_statement();
            None
        }
        TokenKind::LeftBrace => Some(parse_block(p)),
        TokenKind::Declare => parse_declare(p),
        TokenKind::Return => parse_return(p),
        TokenKind::Function => {
            let doc = p.take_doc();
            decl::parse_function(p, Vec::new(), doc)
        }
        TokenKind::If => parse_if(p),
        TokenKind::While => parse_while(p),
        TokenKind::For => parse_for(p),
        TokenKind::Foreach => parse_foreach(p),
        TokenKind::Abstract | TokenKind::Final => {
            let modifier = p.tok.literal.to_ascii_lowercase();
            p.advance();
            if p.check(TokenKind::Class) {
                decl::parse_class(p, Some(modifier))
            } else {
                p.error(ParseError::ExpectedAfter {
                    expected: "'class'".into(),
                    after: format!("'{modifier}'"),
                    found: p.tok.kind.to_string(),
                    pos: p.tok.pos,
                });
                p.recover_statement();
                None
            }
        }
        TokenKind::Class => decl::parse_class(p, None),
        TokenKind::Interface => decl::parse_interface(p),
        TokenKind::Trait => decl::parse_trait(p),
        TokenKind::Enum => decl::parse_enum(p),
        TokenKind::Const => {
            let doc = p.take_doc();
            decl::parse_const(p, None, doc)
        }
        TokenKind::Echo => parse_echo(p),
        TokenKind::Unset => parse_unset(p),
        TokenKind::Static => {
            // `static $x` declares a variable; `static::...` starts an
            // expression.
            if p.peek_kind() == TokenKind::Variable {
                parse_static_decl(p)
            } else {
                parse_expression_statement(p)
            }
        }
        _ => parse_expression_statement(p),
    }
}

/// Statement loop shared by the program level, blocks and namespace bodies.
/// Guarantees forward progress: a statement parse that neither produces a
/// node nor consumes a token costs exactly one token.
pub(crate) fn parse_statements_until(p: &mut Parser, end: TokenKind) -> Vec<Node> {
    let mut statements = Vec::new();
    while !p.check(end) && !p.check(TokenKind::Eof) {
        if matches!(
            p.tok.kind,
            TokenKind::OpenTag | TokenKind::CloseTag | TokenKind::InlineHtml
        ) {
            p.advance();
            continue;
        }
        let before = (p.tok.pos.offset, p.tok.kind);
        match parse_statement(p) {
            Some(node) => statements.push(node),
            None => {
                if (p.tok.pos.offset, p.tok.kind) == before {
                    p.advance();
                }
            }
        }
    }
    statements
}

pub(crate) fn parse_block(p: &mut Parser) -> Node {
    let pos = p.tok.pos;
    p.expect(TokenKind::LeftBrace, "'{'");
    let statements = parse_statements_until(p, TokenKind::RightBrace);
    p.expect(TokenKind::RightBrace, "'}'");
    Node::Block(BlockNode { statements, pos })
}

/// `#[...]` — the lexer hands us the marker; skip the balanced bracket run.
pub(crate) fn skip_attribute(p: &mut Parser) {
    p.advance(); // #[
    let mut depth = 1usize;
    while depth > 0 && !p.check(TokenKind::Eof) {
        match p.tok.kind {
            TokenKind::LeftBracket => depth += 1,
            TokenKind::RightBracket => depth -= 1,
            _ => {}
        }
        p.advance();
    }
}

fn parse_expression_statement(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    match expr::parse_expression(p) {
        Some(node) => {
            if !p.eat(TokenKind::Semicolon) {
                p.error(ParseError::Expected {
                    expected: "';'".into(),
                    found: p.tok.kind.to_string(),
                    pos: p.tok.pos,
                });
            }
            // `throw` reads as a statement of its own.
            if matches!(node, Node::Throw(_)) {
                return Some(node);
            }
            Some(Node::ExpressionStmt(ExpressionStmtNode {
                expr: Box::new(node),
                pos,
            }))
        }
        None => {
            p.recover_expression();
            None
        }
    }
}

// =============================================================================
// Control flow
// =============================================================================

/// `( expr )` for if/while headers. On a bad condition, skips to the closing
/// parenthesis so the branch body still parses (and is discarded).
fn parse_paren_condition(p: &mut Parser) -> Option<Node> {
    if !p.expect(TokenKind::LeftParen, "'('") {
        return None;
    }
    match expr::parse_expression(p) {
        Some(condition) => {
            p.expect(TokenKind::RightParen, "')'");
            Some(condition)
        }
        None => {
            while !matches!(
                p.tok.kind,
                TokenKind::RightParen | TokenKind::LeftBrace | TokenKind::Eof
            ) {
                p.advance();
            }
            p.eat(TokenKind::RightParen);
            None
        }
    }
}

/// A branch body: a braced block, or a single statement.
fn parse_branch_body(p: &mut Parser) -> Node {
    if p.check(TokenKind::LeftBrace) {
        return parse_block(p);
    }
    let pos = p.tok.pos;
    match parse_statement(p) {
        Some(node) => node,
        None => Node::Block(BlockNode {
            statements: Vec::new(),
            pos,
        }),
    }
}

fn parse_if(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // if

    let condition = match parse_paren_condition(p) {
        Some(condition) => condition,
        None => {
            // Parse and drop the body so recovery lands after the branch.
            if p.check(TokenKind::LeftBrace) {
                parse_block(p);
            }
            return None;
        }
    };
    let consequence = parse_branch_body(p);

    let mut else_ifs = Vec::new();
    let mut alternative = None;
    loop {
        if p.check(TokenKind::ElseIf) {
            let elseif_pos = p.tok.pos;
            p.advance();
            let Some(condition) = parse_paren_condition(p) else {
                if p.check(TokenKind::LeftBrace) {
                    parse_block(p);
                }
                continue;
            };
            let body = parse_branch_body(p);
            else_ifs.push(Node::ElseIf(ElseIfNode {
                condition: Box::new(condition),
                body: Box::new(body),
                pos: elseif_pos,
            }));
        } else if p.check(TokenKind::Else) {
            let else_pos = p.tok.pos;
            p.advance();
            if p.check(TokenKind::If) {
                // `else if` — the alternative is a nested if statement.
                let nested = parse_if(p)?;
                alternative = Some(Box::new(Node::Else(ElseNode {
                    body: Box::new(nested),
                    pos: else_pos,
                })));
            } else {
                let body = parse_branch_body(p);
                alternative = Some(Box::new(Node::Else(ElseNode {
                    body: Box::new(body),
                    pos: else_pos,
                })));
            }
            break;
        } else {
            break;
        }
    }

    Some(Node::If(IfNode {
        condition: Box::new(condition),
        consequence: Box::new(consequence),
        else_ifs,
        alternative,
        pos,
    }))
}

fn parse_while(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // while
    let condition = parse_paren_condition(p)?;
    let body = parse_branch_body(p);
    Some(Node::While(WhileNode {
        condition: Box::new(condition),
        body: Box::new(body),
        pos,
    }))
}

fn parse_for(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // for
    if !p.expect(TokenKind::LeftParen, "'('") {
        return None;
    }
    let init = parse_expr_list_until(p, TokenKind::Semicolon);
    p.expect(TokenKind::Semicolon, "';'");
    let condition = parse_expr_list_until(p, TokenKind::Semicolon);
    p.expect(TokenKind::Semicolon, "';'");
    let update = parse_expr_list_until(p, TokenKind::RightParen);
    p.expect(TokenKind::RightParen, "')'");
    let body = parse_branch_body(p);
    Some(Node::For(ForNode {
        init,
        condition,
        update,
        body: Box::new(body),
        pos,
    }))
}

fn parse_foreach(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // foreach
    if !p.expect(TokenKind::LeftParen, "'('") {
        return None;
    }
    let subject = match expr::parse_expression(p) {
        Some(subject) => subject,
        None => {
            while !matches!(
                p.tok.kind,
                TokenKind::As | TokenKind::RightParen | TokenKind::Eof
            ) {
                p.advance();
            }
            if !p.check(TokenKind::As) {
                p.eat(TokenKind::RightParen);
                return None;
            }
            Node::Null(phpcs_ast::NullLiteral { pos })
        }
    };
    if !p.expect(TokenKind::As, "'as'") {
        p.recover_statement();
        return None;
    }

    let first_by_ref = p.eat(TokenKind::Ampersand);
    let first = parse_foreach_target(p)?;

    let (key_var, value_var, by_ref) = if p.eat(TokenKind::DoubleArrow) {
        let value_by_ref = p.eat(TokenKind::Ampersand);
        let value = parse_foreach_target(p)?;
        (Some(Box::new(first)), value, value_by_ref)
    } else {
        (None, first, first_by_ref)
    };

    p.expect(TokenKind::RightParen, "')'");
    let body = parse_branch_body(p);

    Some(Node::Foreach(ForeachNode {
        expr: Box::new(subject),
        key_var,
        value_var: Box::new(value_var),
        by_ref,
        body: Box::new(body),
        pos,
    }))
}

fn parse_foreach_target(p: &mut Parser) -> Option<Node> {
    if !p.check(TokenKind::Variable) {
        p.error(ParseError::Expected {
            expected: "variable".into(),
            found: p.tok.kind.to_string(),
            pos: p.tok.pos,
        });
        p.recover_statement();
        return None;
    }
    let node = Node::Variable(VariableNode {
        name: p.tok.literal.trim_start_matches('$').to_string(),
        pos: p.tok.pos,
    });
    p.advance();
    Some(node)
}

/// Comma-separated expressions terminated by `end` (used for `for` headers,
/// `echo` and `unset` argument lists). The list may be empty.
fn parse_expr_list_until(p: &mut Parser, end: TokenKind) -> Vec<Node> {
    let mut out = Vec::new();
    while !p.check(end) && !p.check(TokenKind::Eof) {
        match expr::parse_expression(p) {
            Some(node) => out.push(node),
            None => {
                while !p.check(end) && !p.check(TokenKind::Comma) && !p.check(TokenKind::Eof) {
                    p.advance();
                }
            }
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    out
}

// =============================================================================
// Simple statements
// =============================================================================

fn parse_return(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // return
    let expr = if p.check(TokenKind::Semicolon) {
        None
    } else {
        match expr::parse_expression(p) {
            Some(node) => Some(Box::new(node)),
            None => {
                p.recover_expression();
                return None;
            }
        }
    };
    p.expect(TokenKind::Semicolon, "';'");
    Some(Node::Return(ReturnNode { expr, pos }))
}

fn parse_echo(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // echo
    let values = parse_expr_list_until(p, TokenKind::Semicolon);
    p.expect(TokenKind::Semicolon, "';'");
    if values.is_empty() {
        p.error(ParseError::ExpectedAfter {
            expected: "expression".into(),
            after: "'echo'".into(),
            found: p.tok.kind.to_string(),
            pos,
        });
        return None;
    }
    Some(Node::Echo(EchoNode { values, pos }))
}

fn parse_unset(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // unset
    if !p.expect(TokenKind::LeftParen, "'('") {
        p.recover_statement();
        return None;
    }
    let vars = parse_expr_list_until(p, TokenKind::RightParen);
    p.expect(TokenKind::RightParen, "')'");
    p.expect(TokenKind::Semicolon, "';'");
    Some(Node::Unset(UnsetNode { vars, pos }))
}

/// `static $a = 1, $b;` inside a function body.
fn parse_static_decl(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // static

    let mut vars = Vec::new();
    loop {
        if !p.check(TokenKind::Variable) {
            p.error(ParseError::Expected {
                expected: "variable".into(),
                found: p.tok.kind.to_string(),
                pos: p.tok.pos,
            });
            p.recover_statement();
            break;
        }
        let var_pos = p.tok.pos;
        let name = p.tok.literal.trim_start_matches('$').to_string();
        p.advance();

        let init = if p.eat(TokenKind::Assign) {
            match expr::parse_expression(p) {
                Some(node) => Some(node),
                None => {
                    while !matches!(
                        p.tok.kind,
                        TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof
                    ) {
                        p.advance();
                    }
                    None
                }
            }
        } else {
            None
        };
        vars.push(StaticVar {
            name,
            init,
            pos: var_pos,
        });

        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.eat(TokenKind::Semicolon);
    Some(Node::StaticVarDecl(StaticVarDeclNode { vars, pos }))
}

// =============================================================================
// namespace / declare
// =============================================================================

fn parse_namespace(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // namespace

    let name = if p.check(TokenKind::Identifier) || p.check(TokenKind::Backslash) {
        Some(expr::parse_qualified_name(p))
    } else {
        None
    };

    if p.eat(TokenKind::Semicolon) {
        return Some(Node::Namespace(NamespaceNode {
            name,
            body: None,
            pos,
        }));
    }
    if p.eat(TokenKind::LeftBrace) {
        let statements = parse_statements_until(p, TokenKind::RightBrace);
        p.expect(TokenKind::RightBrace, "'}'");
        return Some(Node::Namespace(NamespaceNode {
            name,
            body: Some(statements),
            pos,
        }));
    }

    p.error(ParseError::Expected {
        expected: "';' or '{'".into(),
        found: p.tok.kind.to_string(),
        pos: p.tok.pos,
    });
    None
}

fn parse_declare(p: &mut Parser) -> Option<Node> {
    let pos = p.tok.pos;
    p.advance(); // declare
    if !p.expect(TokenKind::LeftParen, "'('") {
        p.recover_statement();
        return None;
    }

    let mut directives = Vec::new();
    while !p.check(TokenKind::RightParen) && !p.check(TokenKind::Eof) {
        let directive_pos = p.tok.pos;
        if !p.check(TokenKind::Identifier) {
            p.error(ParseError::Expected {
                expected: "directive name".into(),
                found: p.tok.kind.to_string(),
                pos: p.tok.pos,
            });
            while !matches!(
                p.tok.kind,
                TokenKind::Comma | TokenKind::RightParen | TokenKind::Eof
            ) {
                p.advance();
            }
        } else {
            let name = p.tok.literal.clone();
            p.advance();
            if p.expect(TokenKind::Assign, "'='") {
                if let Some(value) = expr::parse_expression(p) {
                    directives.push(DeclareDirective {
                        name,
                        value,
                        pos: directive_pos,
                    });
                }
            }
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RightParen, "')'");

    let body = if p.check(TokenKind::LeftBrace) {
        Some(Box::new(parse_block(p)))
    } else {
        p.eat(TokenKind::Semicolon);
        None
    };

    Some(Node::Declare(DeclareNode {
        directives,
        body,
        pos,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpcs_lexer::Lexer;

    fn parse_ok(source: &str) -> Vec<Node> {
        let mut p = Parser::new(Lexer::new(source));
        let program = p.parse();
        assert!(p.errors().is_empty(), "unexpected errors: {:?}", p.errors());
        program
    }

    fn parse_with_errors(source: &str) -> (Vec<Node>, Vec<String>) {
        let mut p = Parser::new(Lexer::new(source));
        let program = p.parse();
        let errors = p.errors().to_vec();
        (program, errors)
    }

    #[test]
    fn test_if_elseif_else_chain() {
        let program = parse_ok(
            "<?php if ($a) { echo 1; } elseif ($b) { echo 2; } else { echo 3; }",
        );
        match &program[0] {
            Node::If(node) => {
                assert_eq!(node.else_ifs.len(), 1);
                assert!(node.alternative.is_some());
            }
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_else_if_split_keyword() {
        let program = parse_ok("<?php if ($a) { } else if ($b) { }");
        match &program[0] {
            Node::If(node) => match node.alternative.as_deref() {
                Some(Node::Else(alt)) => assert!(matches!(*alt.body, Node::If(_))),
                other => panic!("expected else branch, got {other:?}"),
            },
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_if_condition_recovers() {
        let (program, errors) = parse_with_errors("<?php if () { echo \"x\"; } echo 1;");
        assert!(!errors.is_empty());
        // The parse keeps going past the broken statement.
        assert!(program.iter().any(|n| n.node_kind() == "Echo"));
    }

    #[test]
    fn test_while_loop() {
        let program = parse_ok("<?php while ($i < 10) { $i = $i + 1; }");
        assert!(matches!(&program[0], Node::While(_)));
    }

    #[test]
    fn test_for_header_slots() {
        let program = parse_ok("<?php for ($i = 0; $i < 3; $i++) { echo $i; }");
        match &program[0] {
            Node::For(node) => {
                assert_eq!(node.init.len(), 1);
                assert_eq!(node.condition.len(), 1);
                assert_eq!(node.update.len(), 1);
            }
            other => panic!("expected for, got {other:?}"),
        }
    }

    #[test]
    fn test_for_with_empty_header() {
        let program = parse_ok("<?php for (;;) { }");
        match &program[0] {
            Node::For(node) => {
                assert!(node.init.is_empty());
                assert!(node.condition.is_empty());
                assert!(node.update.is_empty());
            }
            other => panic!("expected for, got {other:?}"),
        }
    }

    #[test]
    fn test_foreach_key_value_by_ref() {
        let program = parse_ok("<?php foreach ($rows as $k => &$v) { }");
        match &program[0] {
            Node::Foreach(node) => {
                assert!(node.key_var.is_some());
                assert!(node.by_ref);
            }
            other => panic!("expected foreach, got {other:?}"),
        }
    }

    #[test]
    fn test_echo_multiple_values() {
        let program = parse_ok("<?php echo $a, ' ', $b;");
        match &program[0] {
            Node::Echo(node) => assert_eq!(node.values.len(), 3),
            other => panic!("expected echo, got {other:?}"),
        }
    }

    #[test]
    fn test_throw_statement() {
        let program = parse_ok("<?php throw new RuntimeException('boom');");
        assert!(matches!(&program[0], Node::Throw(_)));
    }

    #[test]
    fn test_return_with_and_without_value() {
        let program = parse_ok("<?php function f() { return 1; } function g() { return; }");
        let bodies: Vec<_> = program
            .iter()
            .filter_map(|n| match n {
                Node::Function(f) => Some(&f.body),
                _ => None,
            })
            .collect();
        match &bodies[0][0] {
            Node::Return(r) => assert!(r.expr.is_some()),
            other => panic!("expected return, got {other:?}"),
        }
        match &bodies[1][0] {
            Node::Return(r) => assert!(r.expr.is_none()),
            other => panic!("expected return, got {other:?}"),
        }
    }

    #[test]
    fn test_namespace_inline_and_braced() {
        let program = parse_ok("<?php namespace App\\Services;");
        match &program[0] {
            Node::Namespace(n) => {
                assert_eq!(n.name.as_deref(), Some("App\\Services"));
                assert!(n.body.is_none());
            }
            other => panic!("expected namespace, got {other:?}"),
        }

        let program = parse_ok("<?php namespace App { echo 1; }");
        match &program[0] {
            Node::Namespace(n) => assert_eq!(n.body.as_ref().map(Vec::len), Some(1)),
            other => panic!("expected namespace, got {other:?}"),
        }
    }

    #[test]
    fn test_declare_strict_types() {
        let program = parse_ok("<?php declare(strict_types=1);");
        match &program[0] {
            Node::Declare(d) => {
                assert_eq!(d.directives.len(), 1);
                assert_eq!(d.directives[0].name, "strict_types");
            }
            other => panic!("expected declare, got {other:?}"),
        }
    }

    #[test]
    fn test_static_variable_declaration() {
        let program = parse_ok("<?php function f() { static $count = 0, $last; }");
        match &program[0] {
            Node::Function(f) => match &f.body[0] {
                Node::StaticVarDecl(s) => {
                    assert_eq!(s.vars.len(), 2);
                    assert!(s.vars[0].init.is_some());
                    assert!(s.vars[1].init.is_none());
                }
                other => panic!("expected static decl, got {other:?}"),
            },
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_static_call_is_an_expression_statement() {
        let program = parse_ok("<?php static::create();");
        match &program[0] {
            Node::ExpressionStmt(stmt) => assert_eq!(stmt.expr.node_kind(), "MethodCall"),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_unset_statement() {
        let program = parse_ok("<?php unset($a, $b['k']);");
        match &program[0] {
            Node::Unset(u) => assert_eq!(u.vars.len(), 2),
            other => panic!("expected unset, got {other:?}"),
        }
    }

    #[test]
    fn test_doc_comment_is_buffered_not_emitted() {
        let program = parse_ok("<?php /** doc */ function f() { }");
        assert_eq!(program.len(), 1);
        match &program[0] {
            Node::Function(f) => assert_eq!(f.doc_comment.as_deref(), Some("/** doc */")),
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_line_comment_is_a_statement() {
        let program = parse_ok("<?php // note\necho 1;");
        assert_eq!(program[0].node_kind(), "Comment");
    }

    #[test]
    fn test_use_import_is_skipped() {
        let program = parse_ok("<?php use App\\User; echo 1;");
        assert_eq!(program.len(), 1);
        assert_eq!(program[0].node_kind(), "Echo");
    }

    #[test]
    fn test_missing_semicolon_reports_and_continues() {
        let (program, errors) = parse_with_errors("<?php $a = 1 $b = 2;");
        assert!(!errors.is_empty());
        assert!(errors[0].contains("expected ';'"), "{errors:?}");
        assert!(!program.is_empty());
    }
}
