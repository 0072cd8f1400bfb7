use phpcs_ast::Position;
use thiserror::Error;

/// A syntactic diagnostic. `Display` renders the exact `line L:C: <message>`
/// form consumers print verbatim, so the parser can push `err.to_string()`
/// and nothing else needs to know the format.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("line {}:{}: expected {expected}, got {found}", pos.line, pos.column)]
    Expected {
        expected: String,
        found: String,
        pos: Position,
    },

    #[error("line {}:{}: expected {expected} after {after}, got {found}", pos.line, pos.column)]
    ExpectedAfter {
        expected: String,
        after: String,
        found: String,
        pos: Position,
    },

    #[error("line {}:{}: expected expression, got {found}", pos.line, pos.column)]
    ExpectedExpression { found: String, pos: Position },

    #[error("line {}:{}: unexpected token {found}", pos.line, pos.column)]
    Unexpected { found: String, pos: Position },

    #[error("line {}:{}: invalid assignment target", pos.line, pos.column)]
    InvalidAssignmentTarget { pos: Position },

    #[error("line {}:{}: illegal token {literal:?}", pos.line, pos.column)]
    IllegalToken { literal: String, pos: Position },

    #[error("line {}:{}: unclosed {what}", pos.line, pos.column)]
    Unclosed { what: String, pos: Position },

    #[error("line {}:{}: {message}", pos.line, pos.column)]
    Message { message: String, pos: Position },
}

impl ParseError {
    pub fn pos(&self) -> Position {
        match self {
            ParseError::Expected { pos, .. }
            | ParseError::ExpectedAfter { pos, .. }
            | ParseError::ExpectedExpression { pos, .. }
            | ParseError::Unexpected { pos, .. }
            | ParseError::InvalidAssignmentTarget { pos }
            | ParseError::IllegalToken { pos, .. }
            | ParseError::Unclosed { pos, .. }
            | ParseError::Message { pos, .. } => *pos,
        }
    }
}
