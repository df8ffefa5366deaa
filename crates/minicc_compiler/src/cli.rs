use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use minicc_diagnostic::termcolor::ColorChoice;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// When to color diagnostics.
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: Color,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the tokens of a program, one per line.
    Tokens {
        #[command(flatten)]
        input: Input,
    },

    /// Print the syntax tree of a program.
    Parse {
        #[command(flatten)]
        input: Input,
    },

    /// Compile a program to Python.
    Compile {
        #[command(flatten)]
        input: Input,

        /// The output file.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compile a program and run it.
    Run {
        #[command(flatten)]
        input: Input,

        /// The Python interpreter to run the program with.
        #[arg(long, env = "MINICC_PYTHON", default_value = "python3")]
        python: String,
    },
}

#[derive(Args)]
pub struct Input {
    /// The input file.
    pub input: String,

    /// Whether the given input should be used directly as the source instead
    /// of as the source file path.
    #[arg(long, short, action)]
    pub source: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Auto,
    Always,
    Never,
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => ColorChoice::Auto,
            Color::Always => ColorChoice::Always,
            Color::Never => ColorChoice::Never,
        }
    }
}
