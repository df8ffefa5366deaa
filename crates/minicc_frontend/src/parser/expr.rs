use super::{ParseError, ParseResult, Parser};
use crate::ast::*;
use crate::token::*;

/// Binding strength of the binary operator layers, loosest first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Term,
    Factor,
}

impl Prec {
    fn tighter(self) -> Option<Prec> {
        match self {
            Prec::Term => Some(Prec::Factor),
            Prec::Factor => None,
        }
    }
}

fn binop_prec(binop: BinOp) -> Prec {
    match binop {
        BinOp::Add | BinOp::Sub => Prec::Term,
        BinOp::Mul | BinOp::Div => Prec::Factor,
    }
}

/// Limit on both the depth of an expression tree and the nesting of
/// parenthesized sub-expressions and call arguments.
pub const MAX_EXPR_DEPTH: usize = 256;

impl Parser {
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_nested().map(|(expr, _)| expr)
    }

    /// Parses a full expression, returning it along with its tree depth.
    fn parse_nested(&mut self) -> ParseResult<(Expr, usize)> {
        if self.nesting >= MAX_EXPR_DEPTH {
            return Err(self.error_too_deep());
        }

        self.nesting += 1;
        let result = self.parse_prec(Prec::Term);
        self.nesting -= 1;

        result
    }

    /// Parses one operator layer. Operators of the same layer fold to the
    /// left, so `1 - 2 - 3` is `(1 - 2) - 3`.
    fn parse_prec(&mut self, prec: Prec) -> ParseResult<(Expr, usize)> {
        let (mut expr, mut depth) = self.parse_operand(prec)?;

        while let Some(op) = self.peek_bin_op(prec) {
            self.next();

            let (rhs, rhs_depth) = self.parse_operand(prec)?;
            depth = self.check_depth(depth.max(rhs_depth) + 1)?;
            expr = Expr::binary(expr, op, rhs);
        }

        Ok((expr, depth))
    }

    fn parse_operand(&mut self, prec: Prec) -> ParseResult<(Expr, usize)> {
        match prec.tighter() {
            Some(tighter) => self.parse_prec(tighter),
            None => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> ParseResult<(Expr, usize)> {
        match self.peek().kind {
            TokenKind::Number => {
                let value = self
                    .peek()
                    .lexeme
                    .parse()
                    .map_err(|_| self.error_expected("an integer literal that fits in 64 bits"))?;
                self.next();

                Ok((Expr::Number(value), 1))
            }

            TokenKind::String => Ok((Expr::String(self.next().lexeme), 1)),

            TokenKind::Ident => {
                let name = self.next().lexeme;

                if self.eat_kind(TokenKind::LParen) {
                    let (args, args_depth) = self.parse_call_args()?;
                    let depth = self.check_depth(args_depth + 1)?;

                    Ok((Expr::Call { func: name, args }, depth))
                } else {
                    Ok((Expr::Name(name), 1))
                }
            }

            TokenKind::LParen => {
                self.next();

                let inner = self.parse_nested()?;
                self.expect(TokenKind::RParen)?;

                Ok(inner)
            }

            _ => Err(self.error_expected("an expression")),
        }
    }

    /// Parses call arguments after the opening paren, up to and including
    /// the closing one.
    /// Also returns the depth of the deepest argument.
    fn parse_call_args(&mut self) -> ParseResult<(Vec<Expr>, usize)> {
        let mut args = vec![];
        let mut depth = 0;

        if !self.at(TokenKind::RParen) {
            loop {
                let (arg, arg_depth) = self.parse_nested()?;
                args.push(arg);
                depth = depth.max(arg_depth);

                if !self.eat_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_in(TokenKind::RParen, "after call arguments")?;

        Ok((args, depth))
    }

    fn check_depth(&self, depth: usize) -> ParseResult<usize> {
        if depth > MAX_EXPR_DEPTH {
            Err(self.error_too_deep())
        } else {
            Ok(depth)
        }
    }

    fn error_too_deep(&self) -> ParseError {
        self.error_expected(format!(
            "an expression nested at most {MAX_EXPR_DEPTH} levels deep"
        ))
    }

    fn peek_bin_op(&self, prec: Prec) -> Option<BinOp> {
        let op = match self.peek().kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,

            _ => return None,
        };

        (binop_prec(op) == prec).then_some(op)
    }
}
