//! Error-tolerant PHP parser producing the position-annotated tree from
//! `phpcs-ast`. Syntax errors become formatted diagnostics; the parse always
//! runs to the end of input.

pub mod diagnostics;
pub mod precedence;

mod decl;
mod expr;
mod interpolation;
mod parser;
mod stmt;
mod types;

pub use diagnostics::ParseError;
pub use parser::Parser;

use phpcs_ast::Node;
use phpcs_lexer::Lexer;

/// Parse a full source file. Returns every top-level statement that could be
/// recovered plus the diagnostics collected along the way, each formatted as
/// `line L:C: message`.
pub fn parse(source: &str) -> (Vec<Node>, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse();
    let errors = parser.into_errors();
    (program, errors)
}
