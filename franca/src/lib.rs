use ast::Definition;
use error::ParseError;
use lexer::Lexer;
use parser::Parser;

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pos;
mod scanner;
pub mod token;
pub mod types;

/// Parses one Franca IDL compilation unit into its top-level definitions,
/// in source order. Stops at the first syntactic or structural violation.
pub fn parse(buf: &str) -> Result<Vec<Definition>, ParseError> {
    Parser::new(Lexer::new(buf).tokenize()?).parse()
}
