use minicc_utils::assert_snapshot_with_source;

use super::{ParseError, Parser, MAX_EXPR_DEPTH};
use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(source).lex().unwrap();
    Parser::new(tokens).parse()
}

fn parse_body(body: &str) -> Vec<Stmt> {
    let source = format!("int main() {{ {body} }}");
    let mut program = parse(&source).unwrap();
    program.functions.remove(0).body
}

fn parse_expr(expr: &str) -> Expr {
    match parse_body(&format!("{expr};")).remove(0) {
        Stmt::Expr(expr) => expr,
        other => panic!("expected an expression statement, got {other}"),
    }
}

fn num(n: i64) -> Expr {
    Expr::Number(n)
}

fn name(ident: &str) -> Expr {
    Expr::Name(ident.to_owned())
}

#[test]
fn return_0() {
    let source = "int main() {\n    return 0;\n}\n";
    let program = parse(source).unwrap();

    assert_eq!(
        program,
        Program {
            functions: vec![Function {
                name: "main".to_owned(),
                body: vec![Stmt::Return(Some(num(0)))],
            }],
        }
    );

    assert_snapshot_with_source!(source => program.to_string(), @r###"Program([Function("main", [Return(Number(0))])])"###);
}

#[test]
fn empty_program() {
    assert_eq!(parse("").unwrap(), Program { functions: vec![] });
    assert_eq!(parse("// nothing here\n").unwrap().functions.len(), 0);
}

#[test]
fn functions_keep_source_order() {
    let program = parse("int b() {} int a() { return; } int c() {}").unwrap();

    let names: Vec<_> = program.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["b", "a", "c"]);

    assert!(program.functions[0].body.is_empty());
    assert_eq!(program.functions[1].body, vec![Stmt::Return(None)]);
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(
        parse_expr("1-2-3"),
        Expr::binary(Expr::binary(num(1), BinOp::Sub, num(2)), BinOp::Sub, num(3))
    );
    assert_eq!(
        parse_expr("8 / 4 / 2"),
        Expr::binary(Expr::binary(num(8), BinOp::Div, num(4)), BinOp::Div, num(2))
    );
}

#[test]
fn multiplication_binds_tighter() {
    assert_eq!(
        parse_expr("1+2*3"),
        Expr::binary(num(1), BinOp::Add, Expr::binary(num(2), BinOp::Mul, num(3)))
    );
    assert_eq!(
        parse_expr("1*2+3"),
        Expr::binary(Expr::binary(num(1), BinOp::Mul, num(2)), BinOp::Add, num(3))
    );
}

#[test]
fn parens_override_precedence() {
    assert_eq!(
        parse_expr("(1+2)*3"),
        Expr::binary(Expr::binary(num(1), BinOp::Add, num(2)), BinOp::Mul, num(3))
    );
    assert_eq!(
        parse_expr("1-(2-3)"),
        Expr::binary(num(1), BinOp::Sub, Expr::binary(num(2), BinOp::Sub, num(3)))
    );
}

#[test]
fn mixed_expression_display() {
    let source = "a * (b - 1) / f(2, \"x\") + c";
    assert_snapshot_with_source!(source => parse_expr(source).to_string(), @r###"Binary("+", Binary("/", Binary("*", Name("a"), Binary("-", Name("b"), Number(1))), Call("f", [Number(2), String("x")])), Name("c"))"###);
}

#[test]
fn assignment_vs_expression_statement() {
    assert_eq!(
        parse_body("x = 5;"),
        vec![Stmt::Assign {
            name: "x".to_owned(),
            value: num(5),
        }]
    );
    assert_eq!(parse_body("x;"), vec![Stmt::Expr(name("x"))]);
    assert_eq!(
        parse_body("x + 1;"),
        vec![Stmt::Expr(Expr::binary(name("x"), BinOp::Add, num(1)))]
    );
}

#[test]
fn assignment_display() {
    let stmts = parse_body("x = 5; x;");

    assert_eq!(stmts[0].to_string(), r#"Assign("x", Number(5))"#);
    assert_eq!(stmts[1].to_string(), r#"ExprStmt(Name("x"))"#);
}

#[test]
fn variable_declarations() {
    assert_eq!(
        parse_body("int x; int y = x * 2;"),
        vec![
            Stmt::VarDecl {
                name: "x".to_owned(),
                init: None,
            },
            Stmt::VarDecl {
                name: "y".to_owned(),
                init: Some(Expr::binary(name("x"), BinOp::Mul, num(2))),
            },
        ]
    );
}

#[test]
fn calls() {
    assert_eq!(
        parse_expr("f()"),
        Expr::Call {
            func: "f".to_owned(),
            args: vec![],
        }
    );
    assert_eq!(
        parse_expr("printf(\"%d\\n\", g(), 1 + 2)"),
        Expr::Call {
            func: "printf".to_owned(),
            args: vec![
                Expr::String("%d\n".to_owned()),
                Expr::Call {
                    func: "g".to_owned(),
                    args: vec![],
                },
                Expr::binary(num(1), BinOp::Add, num(2)),
            ],
        }
    );
}

#[test]
fn call_as_assignment_value() {
    assert_eq!(
        parse_body("x = f();"),
        vec![Stmt::Assign {
            name: "x".to_owned(),
            value: Expr::Call {
                func: "f".to_owned(),
                args: vec![],
            },
        }]
    );
}

#[test]
fn missing_semicolon() {
    let err = parse("int main() { return 0 }").unwrap_err();

    assert!(err.expected.contains("`;`"), "{}", err.expected);
    assert_eq!(err.found.kind, TokenKind::RBrace);
    assert_eq!(err.found.offset, 22);
    assert_eq!(
        err.to_string(),
        "expected `;` after a return statement, found RBRACE '}' at offset 22"
    );
}

#[test]
fn missing_paren() {
    let err = parse("int main( { return 0; }").unwrap_err();

    assert_eq!(err.expected, "`)`");
    assert_eq!(err.found.kind, TokenKind::LBrace);
}

#[test]
fn missing_closing_brace() {
    let err = parse("int main() { return 0;").unwrap_err();

    assert!(err.expected.contains("`}`"), "{}", err.expected);
    assert_eq!(err.found.kind, TokenKind::Eof);
    assert_eq!(err.found.offset, 22);
}

#[test]
fn missing_expression() {
    let err = parse("int main() { x = ; }").unwrap_err();

    assert_eq!(err.expected, "an expression");
    assert_eq!(err.found.kind, TokenKind::Semicolon);
}

#[test]
fn no_space_after_return() {
    // `return0` is an identifier, so this is an expression statement missing its `;`
    let err = parse("int main() { return0 1; }").unwrap_err();
    assert_eq!(err.found, Token::new(TokenKind::Number, "1", 21));
}

#[test]
fn wrong_case_keyword() {
    let err = parse("int main() { RETURN 0; }").unwrap_err();
    assert_eq!(err.found.kind, TokenKind::Number);
}

#[test]
fn function_must_start_with_int() {
    let err = parse("main() {}").unwrap_err();

    assert!(err.expected.contains("keyword `int`"), "{}", err.expected);
    assert_eq!(err.found.lexeme, "main");
}

#[test]
fn integer_overflow() {
    let err = parse("int main() { return 100000000000000000000; }").unwrap_err();

    assert_eq!(err.expected, "an integer literal that fits in 64 bits");
    assert_eq!(err.found.kind, TokenKind::Number);
}

#[test]
fn missing_eof_is_supplied() {
    let tokens = Lexer::new("int main() {}").lex().unwrap();
    let without_eof = tokens[..tokens.len() - 1].to_vec();

    assert_eq!(
        Parser::new(without_eof).parse(),
        Parser::new(tokens).parse()
    );
}

#[test]
fn deterministic() {
    let source = "int main() { int a = 1; a = a + 2 * 3; print(a); return a; }";
    assert_eq!(parse(source), parse(source));
}

#[test]
fn long_chain_is_rejected_before_it_gets_too_deep() {
    let source = format!("int main() {{ return 1{}; }}", "+1".repeat(100_000));
    let err = parse(&source).unwrap_err();

    assert_eq!(err.expected, "an expression nested at most 256 levels deep");
    assert_eq!(err.found.kind, TokenKind::Plus);
    assert_eq!(err.found.offset, 20 + 2 * MAX_EXPR_DEPTH + 1);
}

#[test]
fn chain_at_depth_limit() {
    let terms = |n: usize| vec!["x"; n].join(" * ");

    assert_eq!(parse_body(&format!("return {};", terms(MAX_EXPR_DEPTH))).len(), 1);
    assert!(parse(&format!("int main() {{ return {}; }}", terms(MAX_EXPR_DEPTH + 1))).is_err());
}

#[test]
fn deeply_nested_parens_are_rejected() {
    let n = 100_000;
    let source = format!("int main() {{ return {}1{}; }}", "(".repeat(n), ")".repeat(n));
    let err = parse(&source).unwrap_err();

    assert_eq!(err.expected, "an expression nested at most 256 levels deep");
    assert_eq!(err.found.kind, TokenKind::LParen);
    assert_eq!(err.found.offset, 20 + MAX_EXPR_DEPTH);

    let n = MAX_EXPR_DEPTH - 1;
    let source = format!("int main() {{ return {}1{}; }}", "(".repeat(n), ")".repeat(n));
    assert_eq!(
        parse(&source).unwrap().functions[0].body,
        vec![Stmt::Return(Some(num(1)))]
    );
}

#[test]
fn nested_calls_count_towards_depth() {
    let n = MAX_EXPR_DEPTH + 1;
    let source = format!("int main() {{ {}x{}; }}", "f(".repeat(n), ")".repeat(n));
    let err = parse(&source).unwrap_err();

    assert_eq!(err.expected, "an expression nested at most 256 levels deep");
}
