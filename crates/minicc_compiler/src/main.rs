mod cli;
mod compiler;
mod diagnostics;


use std::path::Path;
use std::process::ExitCode;

use clap::Parser as _;
use cli::{Cli, Command, Input};
use temp_dir::TempDir;

use crate::compiler::Compiler;
use crate::diagnostics::{DiagnosticEmitter, PrettyDiagnosticEmitter, SourceId};

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to run `{interpreter}`: {source}")]
    Interpreter {
        interpreter: String,
        source: std::io::Error,
    },

    #[error("errors while compiling")]
    HadErrors,
}

type CompilerResult<T> = Result<T, CompilerError>;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CompilerResult<ExitCode> {
    let cli = Cli::parse();
    let mut compiler = Compiler::new(PrettyDiagnosticEmitter::new(cli.color.into()));

    match cli.command {
        Command::Tokens { input } => {
            let source_id = load(&mut compiler, &input)?;

            for token in compiler.tokens(source_id)? {
                println!("{token}");
            }
        }

        Command::Parse { input } => {
            let source_id = load(&mut compiler, &input)?;
            println!("{}", compiler.parse(source_id)?);
        }

        Command::Compile { input, output } => {
            let source_id = load(&mut compiler, &input)?;

            println!("compiling {} to {}...", input.name(), output.display());

            let python = compiler.compile(source_id)?;

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, python)?;
        }

        Command::Run { input, python } => {
            let source_id = load(&mut compiler, &input)?;
            let script = compiler.compile(source_id)?;

            // removed on drop, so it has to outlive the child process
            let dir = TempDir::new()?;
            let path = dir.child(format!("{}.py", input.stem()));
            std::fs::write(&path, script)?;

            let status = std::process::Command::new(&python)
                .arg(&path)
                .status()
                .map_err(|source| CompilerError::Interpreter {
                    interpreter: python.clone(),
                    source,
                })?;

            let code = status
                .code()
                .and_then(|code| u8::try_from(code).ok())
                .map_or(ExitCode::FAILURE, ExitCode::from);

            return Ok(code);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load<D: DiagnosticEmitter>(
    compiler: &mut Compiler<D>,
    input: &Input,
) -> CompilerResult<SourceId> {
    let source = if input.source {
        input.input.clone()
    } else {
        std::fs::read_to_string(&input.input)?
    };

    Ok(compiler.add_source(input.name(), source))
}

impl Input {
    fn name(&self) -> &str {
        if self.source {
            "<unnamed>"
        } else {
            &self.input
        }
    }

    fn stem(&self) -> &str {
        if self.source {
            return "main";
        }

        Path::new(&self.input)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("main")
    }
}
