//! Turns a parsed program into an equivalent Python 3 script.

pub mod codegen;

use minicc_frontend::ast::Program;

pub fn generate(program: &Program) -> String {
    codegen::Codegen::new().gen_program(program)
}
