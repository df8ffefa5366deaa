#[cfg(test)]
mod tests;

use std::str::Chars;

use minicc_diagnostic::span::Span;
use minicc_utils::peek::Peek;

use crate::token::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
}

impl LexError {
    pub fn span(&self) -> Span {
        match self.kind {
            LexErrorKind::UnexpectedChar(ch) => Span::new(self.offset, self.offset + ch.len_utf8()),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
}

pub type LexResult<T> = Result<T, LexError>;

pub struct Lexer<'src> {
    all: &'src str,
    chars: Chars<'src>,

    token_start: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            all: source,
            chars: source.chars(),

            token_start: 0,
        }
    }

    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = vec![];
        while let Some(token) = self.lex_token()? {
            tokens.push(token);
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.all.len()));

        Ok(tokens)
    }

    fn lex_token(&mut self) -> LexResult<Option<Token>> {
        loop {
            self.token_start = self.byte_pos();

            let Some(ch) = self.chars.next() else {
                return Ok(None);
            };

            let kind = match ch {
                // preprocessor directive
                '#' => {
                    self.chars.skip_until(|&ch| ch == '\n');
                    continue;
                }

                // comment
                '/' if self.chars.eat('/') => {
                    self.chars.skip_until(|&ch| ch == '\n');
                    continue;
                }

                ' ' | '\t' | '\r' | '\n' => continue,

                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                ';' => TokenKind::Semicolon,
                ',' => TokenKind::Comma,
                '=' => TokenKind::Assign,

                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,

                '"' => {
                    let value = self.lex_string();
                    return Ok(Some(Token::new(TokenKind::String, value, self.token_start)));
                }

                '0'..='9' => {
                    self.chars.skip_until(|ch| !ch.is_ascii_digit());
                    TokenKind::Number
                }

                ch if is_ident_start(ch) => self.lex_alpha(),

                ch => {
                    return Err(LexError {
                        kind: LexErrorKind::UnexpectedChar(ch),
                        offset: self.token_start,
                    });
                }
            };

            let lexeme = &self.all[self.token_start..self.byte_pos()];
            return Ok(Some(Token::new(kind, lexeme, self.token_start)));
        }
    }

    /// Lexes the rest of a string literal after its opening quote, returning
    /// the decoded value. An unterminated literal runs to the end of input.
    fn lex_string(&mut self) -> String {
        let mut value = String::new();

        while let Some(ch) = self.chars.next() {
            match ch {
                '"' => break,

                '\\' => match self.chars.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),

                    // unknown escapes keep the escaped character
                    Some(other) => value.push(other),
                    None => break,
                },

                ch => value.push(ch),
            }
        }

        value
    }

    fn lex_alpha(&mut self) -> TokenKind {
        self.chars.skip_until(|&ch| !is_ident(ch));

        let s = &self.all[self.token_start..self.byte_pos()];
        TokenKind::keyword(s).unwrap_or(TokenKind::Ident)
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_ident(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
