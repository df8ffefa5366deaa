use std::fmt;

use minicc_diagnostic::span::Span;

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,

    /// Byte offset of the token's first character.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }

    /// The source range to point at when reporting this token.
    ///
    /// String lexemes are escape-decoded, so only their opening quote is
    /// covered.
    pub fn span(&self) -> Span {
        let len = match self.kind {
            TokenKind::String => 1,
            _ => self.lexeme.len(),
        };
        Span::new(self.offset, self.offset + len)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token({}, '{}', pos={})",
            self.kind.name(),
            self.lexeme,
            self.offset
        )
    }
}

#[derive(NodeCopy!)]
pub enum TokenKind {
    Int,
    Ident,
    Number,
    String,

    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,

    Assign,
    Plus,
    Minus,
    Star,
    Slash,

    Return,
    Eof,
}

impl TokenKind {
    /// Looks up a keyword spelling.
    pub fn keyword(s: &str) -> Option<Self> {
        match s {
            "int" => Some(TokenKind::Int),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// Upper-case name used by the token dump.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Int => "INT",
            TokenKind::Ident => "IDENT",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Return => "RETURN",
            TokenKind::Eof => "EOF",
        }
    }

    /// Human-readable name used in diagnostics.
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Int => "keyword `int`",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "integer literal",
            TokenKind::String => "string literal",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Assign => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Return => "keyword `return`",
            TokenKind::Eof => "end of input",
        }
    }
}
