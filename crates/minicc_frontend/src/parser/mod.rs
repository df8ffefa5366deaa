#[cfg(test)]
mod tests;

mod expr;

pub use self::expr::MAX_EXPR_DEPTH;

use crate::ast::*;
use crate::token::{Token, TokenKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "expected {expected}, found {} '{}' at offset {}",
    .found.kind.name(),
    .found.lexeme,
    .found.offset
)]
pub struct ParseError {
    pub expected: String,
    pub found: Token,
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,

    /// Parenthesized and call-argument expressions currently open.
    nesting: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span().end);
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }

        Self {
            tokens,
            cursor: 0,
            nesting: 0,
        }
    }

    pub fn parse(mut self) -> ParseResult<Program> {
        let mut functions = vec![];

        while !self.at(TokenKind::Eof) {
            functions.push(self.parse_func_decl()?);
        }

        Ok(Program { functions })
    }

    fn parse_func_decl(&mut self) -> ParseResult<Function> {
        self.expect_in(TokenKind::Int, "at the start of a function")?;
        let name = self.parse_ident("a function name")?;

        self.expect(TokenKind::LParen)?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;

        let mut body = vec![];
        while !self.at(TokenKind::RBrace) {
            if self.at(TokenKind::Eof) {
                return Err(self.error_expected_in(
                    TokenKind::RBrace,
                    "at the end of the function body",
                ));
            }
            body.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace)?;

        Ok(Function { name, body })
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        if self.eat_kind(TokenKind::Int) {
            let name = self.parse_ident("a variable name")?;
            let init = if self.eat_kind(TokenKind::Assign) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.expect_in(TokenKind::Semicolon, "after a declaration")?;

            return Ok(Stmt::VarDecl { name, init });
        }

        if self.eat_kind(TokenKind::Return) {
            let value = if self.at(TokenKind::Semicolon) {
                None
            } else {
                Some(self.parse_expr()?)
            };
            self.expect_in(TokenKind::Semicolon, "after a return statement")?;

            return Ok(Stmt::Return(value));
        }

        // `x = ...` needs a second token of lookahead to tell apart from `x;`
        if self.at(TokenKind::Ident) && self.peek_nth(1).kind == TokenKind::Assign {
            let name = self.next().lexeme;
            self.expect(TokenKind::Assign)?;
            let value = self.parse_expr()?;
            self.expect_in(TokenKind::Semicolon, "after an assignment")?;

            return Ok(Stmt::Assign { name, value });
        }

        let expr = self.parse_expr()?;
        self.expect_in(TokenKind::Semicolon, "after an expression")?;

        Ok(Stmt::Expr(expr))
    }

    fn parse_ident(&mut self, what: &str) -> ParseResult<String> {
        if self.at(TokenKind::Ident) {
            Ok(self.next().lexeme)
        } else {
            Err(self.error_expected(what))
        }
    }

    fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Looks `n` tokens ahead without consuming. Past the end this is the
    /// final `Eof`.
    fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.cursor + n).min(last)]
    }

    /// Consumes the current token. The cursor never moves past `Eof`.
    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.next())
        } else {
            Err(self.error_expected(kind.token_name()))
        }
    }

    fn expect_in(&mut self, kind: TokenKind, context: &str) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.next())
        } else {
            Err(self.error_expected_in(kind, context))
        }
    }

    fn error_expected_in(&self, kind: TokenKind, context: &str) -> ParseError {
        self.error_expected(format!("{} {context}", kind.token_name()))
    }

    fn error_expected(&self, expected: impl Into<String>) -> ParseError {
        ParseError {
            expected: expected.into(),
            found: self.peek().clone(),
        }
    }
}
