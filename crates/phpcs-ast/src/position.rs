use serde::Serialize;

/// Source location of a token or AST node.
///
/// `line` and `column` are 1-based and meant for humans; `offset` is the
/// 0-based byte offset into the source string. There is no end position:
/// consumers that need a range derive it from neighbouring nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }

    /// Position used for synthesized nodes in tests.
    pub const DUMMY: Position = Position {
        line: 0,
        column: 0,
        offset: 0,
    };
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1, 0)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
