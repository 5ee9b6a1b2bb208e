//! CSS syntax tree, its parser and its printer.

pub mod node;
mod parser;
mod stringify;

pub use node::{AtRule, Comment, Declaration, Node, Position, RawValue, Raws, Root, Rule};
pub use parser::{SyntaxError, parse_stylesheet};
