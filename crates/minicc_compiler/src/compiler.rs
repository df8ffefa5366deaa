use minicc_diagnostic::sources::{Cached, Source as _};
use minicc_diagnostic::DiagnosticKind;
use minicc_frontend::ast::Program;
use minicc_frontend::token::Token;

use crate::diagnostics::{Diagnostic, DiagnosticEmitter, IntoDiagnostic, SourceId, Sources};
use crate::{CompilerError, CompilerResult};

pub struct Compiler<D: DiagnosticEmitter> {
    pub sources: Sources,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Compiler<D> {
    pub fn new(diagnostics: D) -> Self {
        Self {
            sources: Sources::new(),
            diagnostics,
        }
    }

    pub fn add_source(&mut self, name: impl Into<String>, source: impl Into<String>) -> SourceId {
        self.sources.push(Cached::new((name.into(), source.into())));
        self.sources.len() - 1
    }

    pub fn tokens(&mut self, source_id: SourceId) -> CompilerResult<Vec<Token>> {
        match minicc_frontend::lex(self.source_str(source_id)) {
            Ok(tokens) => Ok(tokens),
            Err(error) => {
                self.report(error.into_diagnostic(source_id))?;
                Err(CompilerError::HadErrors)
            }
        }
    }

    pub fn parse(&mut self, source_id: SourceId) -> CompilerResult<Program> {
        let tokens = self.tokens(source_id)?;

        match minicc_frontend::parse(tokens) {
            Ok(program) => Ok(program),
            Err(error) => {
                self.report(error.into_diagnostic(source_id))?;
                Err(CompilerError::HadErrors)
            }
        }
    }

    /// Compiles a source to Python.
    pub fn compile(&mut self, source_id: SourceId) -> CompilerResult<String> {
        let program = self.parse(source_id)?;

        if !program.functions.iter().any(|func| func.name == "main") {
            let name = self.sources[source_id].name_str();
            let warning = Diagnostic::warning()
                .with_message(format!("`{name}` has no `main` function"))
                .with_note("the generated program will do nothing when run");

            self.report(warning)?;
        }

        Ok(minicc_backend::generate(&program))
    }

    fn source_str(&self, source_id: SourceId) -> &str {
        // ids are only handed out by `add_source`
        self.sources[source_id].source_str()
    }

    fn report(&mut self, diagnostic: Diagnostic) -> CompilerResult<()> {
        let kind = diagnostic.kind;
        self.diagnostics.emit_diagnostic(diagnostic, &self.sources);

        if kind >= DiagnosticKind::Error {
            Err(CompilerError::HadErrors)
        } else {
            Ok(())
        }
    }
}
