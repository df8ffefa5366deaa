use minicc_frontend::ast::*;

const INDENT: &str = "    ";

// Only reaches outside through `_builtins` and `_sys`, so user functions
// named `abs`, `len` or `sys` cannot break it.
const PRELUDE: &str = r#"import builtins as _builtins
import sys as _sys


def printf(fmt, *args):
    text = fmt % args
    _sys.stdout.write(text)
    return _builtins.len(text)


def _c_div(lhs, rhs):
    quotient = _builtins.abs(lhs) // _builtins.abs(rhs)
    return quotient if (lhs < 0) == (rhs < 0) else -quotient
"#;

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "try", "while",
    "with", "yield",
];

/// Names the prelude and the entry point rely on.
const RESERVED: &[&str] = &["_builtins", "_sys", "_c_div", "__name__"];

pub struct Codegen {
    out: String,
    indent: usize,
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    pub fn gen_program(mut self, program: &Program) -> String {
        self.out.push_str(PRELUDE);

        for func in &program.functions {
            self.out.push_str("\n\n");
            self.gen_func(func);
        }

        if program.functions.iter().any(|func| func.name == "main") {
            self.out.push_str("\n\n");
            self.line("if __name__ == \"__main__\":");
            self.indent += 1;
            self.line(&format!("_sys.exit({}())", ident("main")));
            self.indent -= 1;
        }

        self.out
    }

    fn gen_func(&mut self, func: &Function) {
        self.line(&format!("def {}():", ident(&func.name)));
        self.indent += 1;

        if func.body.is_empty() {
            self.line("pass");
        }

        for stmt in &func.body {
            self.gen_stmt(stmt);
        }

        self.indent -= 1;
    }

    fn gen_stmt(&mut self, stmt: &Stmt) {
        let line = match stmt {
            Stmt::VarDecl { name, init } => {
                let init = init.as_ref().map_or_else(|| "0".to_owned(), gen_expr);
                format!("{} = {init}", ident(name))
            }
            Stmt::Assign { name, value } => format!("{} = {}", ident(name), gen_expr(value)),
            Stmt::Return(None) => "return".to_owned(),
            Stmt::Return(Some(value)) => format!("return {}", gen_expr(value)),
            Stmt::Expr(expr) => gen_expr(expr),
        };

        self.line(&line);
    }

    fn line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(line);
        self.out.push('\n');
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

fn gen_expr(expr: &Expr) -> String {
    match expr {
        Expr::Number(n) => n.to_string(),
        Expr::Name(name) => ident(name),
        Expr::String(value) => string_literal(value),

        // C division truncates towards zero, Python's `//` floors
        Expr::Binary {
            left,
            op: BinOp::Div,
            right,
        } => format!("_c_div({}, {})", gen_expr(left), gen_expr(right)),

        Expr::Binary { left, op, right } => {
            format!("({} {} {})", gen_expr(left), op.as_str(), gen_expr(right))
        }

        Expr::Call { func, args } => {
            let args: Vec<_> = args.iter().map(gen_expr).collect();
            format!("{}({})", ident(func), args.join(", "))
        }
    }
}

fn ident(name: &str) -> String {
    if PYTHON_KEYWORDS.contains(&name) || RESERVED.contains(&name) {
        format!("{name}_")
    } else {
        name.to_owned()
    }
}

fn string_literal(value: &str) -> String {
    let mut s = String::with_capacity(value.len() + 2);
    s.push('"');

    for ch in value.chars() {
        match ch {
            '\\' => s.push_str("\\\\"),
            '"' => s.push_str("\\\""),
            '\n' => s.push_str("\\n"),
            '\t' => s.push_str("\\t"),
            '\r' => s.push_str("\\r"),
            ch if ch.is_control() => s.push_str(&format!("\\x{:02x}", ch as u32)),
            ch => s.push(ch),
        }
    }

    s.push('"');
    s
}
