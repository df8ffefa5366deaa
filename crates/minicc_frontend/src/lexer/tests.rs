use minicc_utils::assert_snapshot_with_source;

use super::{LexError, LexErrorKind, Lexer};
use crate::token::{Token, TokenKind};

fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).lex().unwrap()
}

fn lex_kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|token| token.kind).collect()
}

fn lex_err(source: &str) -> LexError {
    Lexer::new(source).lex().unwrap_err()
}

fn dump(source: &str) -> String {
    lex(source)
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn return_0() {
    let source = "int main() {\n    return 0;\n}\n";
    assert_snapshot_with_source!(source => dump(source), @r###"
    Token(INT, 'int', pos=0)
    Token(IDENT, 'main', pos=4)
    Token(LPAREN, '(', pos=8)
    Token(RPAREN, ')', pos=9)
    Token(LBRACE, '{', pos=11)
    Token(RETURN, 'return', pos=17)
    Token(NUMBER, '0', pos=24)
    Token(SEMICOLON, ';', pos=25)
    Token(RBRACE, '}', pos=27)
    Token(EOF, '', pos=29)
    "###);
}

#[test]
fn no_spaces() {
    assert_eq!(
        lex_kinds("int main(){return 0;}"),
        lex_kinds("  int  main  (  )  {  return  0  ;  }  ")
    );
}

#[test]
fn keywords_and_identifiers() {
    use TokenKind::*;

    assert_eq!(
        lex_kinds("int integer return returned _x x1 RETURN"),
        vec![Int, Ident, Return, Ident, Ident, Ident, Ident, Eof]
    );
}

#[test]
fn number_keeps_lexeme() {
    let tokens = lex("007 42");

    assert_eq!(tokens[0], Token::new(TokenKind::Number, "007", 0));
    assert_eq!(tokens[1], Token::new(TokenKind::Number, "42", 4));
}

#[test]
fn digits_then_letters_split() {
    use TokenKind::*;

    assert_eq!(lex_kinds("12ab"), vec![Number, Ident, Eof]);
}

#[test]
fn punctuation() {
    use TokenKind::*;

    assert_eq!(
        lex_kinds("( ) { } ; , = + - * /"),
        vec![
            LParen, RParen, LBrace, RBrace, Semicolon, Comma, Assign, Plus, Minus, Star, Slash,
            Eof
        ]
    );
}

#[test]
fn directives_and_comments_are_skipped() {
    use TokenKind::*;

    let source = "#include <stdio.h>\n// int @ `comment`\nint x; // trailing $\n# define $$$";
    assert_eq!(lex_kinds(source), vec![Int, Ident, Semicolon, Eof]);
}

#[test]
fn slash_is_not_a_comment() {
    use TokenKind::*;

    assert_eq!(lex_kinds("a / b // c"), vec![Ident, Slash, Ident, Eof]);
}

#[test]
fn string_escapes() {
    let tokens = lex(r#""a\nb""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "a\nb");
    assert_eq!(tokens[0].lexeme.chars().count(), 3);
}

#[test]
fn string_escape_fallback() {
    let tokens = lex(r#""\t\"\\\q""#);
    assert_eq!(tokens[0].lexeme, "\t\"\\q");
}

#[test]
fn unterminated_string_runs_to_end() {
    let tokens = lex("\"abc");

    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::String, "abc", 0),
            Token::new(TokenKind::Eof, "", 4),
        ]
    );
}

#[test]
fn empty_source() {
    assert_eq!(lex(""), vec![Token::new(TokenKind::Eof, "", 0)]);
    assert_eq!(lex("  // nothing\n"), vec![Token::new(TokenKind::Eof, "", 13)]);
}

#[test]
fn single_eof_at_end() {
    let source = "int x = 1 + 2;";
    let tokens = lex(source);

    let eofs: Vec<_> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Eof)
        .collect();

    assert_eq!(eofs.len(), 1);
    assert_eq!(tokens.last().map(|token| token.offset), Some(source.len()));
}

#[test]
fn unexpected_char() {
    let source = "int main() { return 0 @ }";
    let err = lex_err(source);

    assert_eq!(err.kind, LexErrorKind::UnexpectedChar('@'));
    assert_eq!(err.offset, source.find('@').unwrap());
    assert_eq!(err.to_string(), "unexpected character '@' at offset 22");
}

#[test]
fn offsets_are_bytes() {
    let err = lex_err("\"é\" @");
    assert_eq!(err.offset, 5);
    assert_eq!(err.span().len(), 1);
}

#[test]
fn deterministic() {
    let source = "int f() { int y = g(1, \"s\"); y = y * 2; return y; }";
    assert_eq!(lex(source), lex(source));
}

#[test]
fn only_space_tab_and_newlines_are_whitespace() {
    assert_eq!(lex_kinds("\r\n\t x"), [TokenKind::Ident, TokenKind::Eof]);

    for ch in ['\x0b', '\x0c'] {
        let err = lex_err(&format!("int {ch}x"));
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar(ch));
        assert_eq!(err.offset, 4);
    }
}
