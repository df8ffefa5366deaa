#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod token;

pub use lexer::{LexError, LexErrorKind, LexResult};
pub use parser::{ParseError, ParseResult, MAX_EXPR_DEPTH};

use ast::Program;
use lexer::Lexer;
use parser::Parser;
use token::Token;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)];
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Splits `source` into tokens. The result always ends with a single
/// [`token::TokenKind::Eof`].
pub fn lex(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).lex()
}

/// Parses a token sequence produced by [`lex`] into a program.
pub fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
    Parser::new(tokens).parse()
}

pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    let tokens = lex(source)?;
    Ok(parse(tokens)?)
}
