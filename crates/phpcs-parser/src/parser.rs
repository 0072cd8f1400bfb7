use phpcs_ast::Node;
use phpcs_lexer::{Lexer, Token, TokenKind};

use crate::diagnostics::ParseError;
use crate::stmt;

/// Recursive-descent parser over a streaming lexer. Holds exactly one token
/// of lookahead in `tok`; a second token is available through the lexer's
/// `peek_token`. Diagnostics accumulate as formatted strings and never abort
/// the parse.
pub struct Parser<'src> {
    pub(crate) lexer: Lexer<'src>,
    pub(crate) tok: Token,
    pub(crate) errors: Vec<String>,
    /// Most recent doc-comment, waiting to be attached to the next
    /// function, class, or method declaration.
    pub(crate) current_doc: Option<String>,
}

impl<'src> Parser<'src> {
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let tok = lexer.next_token();
        Parser {
            lexer,
            tok,
            errors: Vec::new(),
            current_doc: None,
        }
    }

    /// Parse the whole input as a sequence of top-level statements. Tag
    /// boundary tokens and inline HTML between PHP regions are skipped.
    /// Always terminates: when a statement parse neither produces a node
    /// nor consumes input, the current token is dropped.
    pub fn parse(&mut self) -> Vec<Node> {
        stmt::parse_statements_until(self, TokenKind::Eof)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    // ========================================================================
    // Token plumbing
    // ========================================================================

    pub(crate) fn advance(&mut self) {
        self.tok = self.lexer.next_token();
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.tok.kind == kind
    }

    pub(crate) fn peek_kind(&mut self) -> TokenKind {
        self.lexer.peek_token().kind
    }

    /// Consume the current token if it matches.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.tok.kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a required token, recording a diagnostic if it is missing.
    /// Does not consume on mismatch so the caller's recovery sees the
    /// offending token.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> bool {
        if self.tok.kind == kind {
            self.advance();
            true
        } else {
            self.error(ParseError::Expected {
                expected: expected.to_string(),
                found: self.tok.kind.to_string(),
                pos: self.tok.pos,
            });
            false
        }
    }

    pub(crate) fn error(&mut self, err: ParseError) {
        self.errors.push(err.to_string());
    }

    /// Take the buffered doc-comment, if any. Declarations call this so a
    /// doc block only ever attaches to the construct directly below it.
    pub(crate) fn take_doc(&mut self) -> Option<String> {
        self.current_doc.take()
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Skip to the nearest expression boundary: `;` (consumed), `)` (left
    /// for the caller), or end of input.
    pub(crate) fn recover_expression(&mut self) {
        loop {
            match self.tok.kind {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::RightParen | TokenKind::Eof => return,
                _ => self.advance(),
            }
        }
    }

    /// Skip to the next statement boundary. Used after a malformed
    /// declaration header where expression recovery would stop too early.
    pub(crate) fn recover_statement(&mut self) {
        loop {
            match self.tok.kind {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::RightBrace | TokenKind::Eof => return,
                _ => self.advance(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(Lexer::new(source))
    }

    #[test]
    fn test_expect_does_not_consume_on_mismatch() {
        let mut p = parser("<?php }");
        p.advance(); // past open tag
        assert!(!p.expect(TokenKind::Semicolon, "';'"));
        assert_eq!(p.tok.kind, TokenKind::RightBrace);
        assert_eq!(p.errors().len(), 1);
        assert!(p.errors()[0].starts_with("line 1:"));
    }

    #[test]
    fn test_recover_expression_consumes_semicolon() {
        let mut p = parser("<?php 1 2 3; echo");
        p.advance();
        p.recover_expression();
        assert_eq!(p.tok.kind, TokenKind::Echo);
    }

    #[test]
    fn test_recover_expression_stops_at_paren() {
        let mut p = parser("<?php 1 2 ) ;");
        p.advance();
        p.recover_expression();
        assert_eq!(p.tok.kind, TokenKind::RightParen);
    }

    #[test]
    fn test_parse_always_terminates_on_garbage() {
        let mut p = parser("<?php ) ) ) }");
        let program = p.parse();
        assert!(program.is_empty());
        assert!(!p.errors().is_empty());
    }
}
