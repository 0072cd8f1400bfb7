pub mod ast;
pub mod display;
pub mod position;
pub mod visitor;

pub use ast::*;
pub use position::Position;
pub use visitor::Visitor;
