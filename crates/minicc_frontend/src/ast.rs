//! Syntax tree produced by the parser.
//!
//! `Display` renders nodes in constructor notation, e.g.
//! `Binary("-", Number(1), Number(2))`.

use std::fmt;

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Program {
    pub functions: Vec<Function>,
}

#[derive(Node!)]
pub struct Function {
    pub name: String,
    pub body: Vec<Stmt>,
}

#[derive(Node!)]
pub enum Stmt {
    VarDecl { name: String, init: Option<Expr> },
    Assign { name: String, value: Expr },
    Return(Option<Expr>),
    Expr(Expr),
}

#[derive(Node!)]
pub enum Expr {
    Number(i64),
    Name(String),

    /// Escape-decoded string literal.
    String(String),

    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },

    Call {
        func: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

#[derive(NodeCopy!)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

struct List<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for List<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({})", List(&self.functions))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:?}, {})", self.name, List(&self.body))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::VarDecl { name, init: None } => write!(f, "VarDecl({name:?})"),
            Stmt::VarDecl {
                name,
                init: Some(init),
            } => write!(f, "VarDecl({name:?}, {init})"),
            Stmt::Assign { name, value } => write!(f, "Assign({name:?}, {value})"),
            Stmt::Return(None) => write!(f, "Return()"),
            Stmt::Return(Some(value)) => write!(f, "Return({value})"),
            Stmt::Expr(expr) => write!(f, "ExprStmt({expr})"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "Number({n})"),
            Expr::Name(ident) => write!(f, "Name({ident:?})"),
            Expr::String(value) => write!(f, "String({value:?})"),
            Expr::Binary { left, op, right } => {
                write!(f, "Binary({:?}, {left}, {right})", op.as_str())
            }
            Expr::Call { func, args } => write!(f, "Call({func:?}, {})", List(args)),
        }
    }
}
