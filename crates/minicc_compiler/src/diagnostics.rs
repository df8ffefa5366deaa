use minicc_diagnostic::sources::Cached;
use minicc_diagnostic::termcolor::{ColorChoice, StandardStream};
use minicc_diagnostic::{Config, Snippet};
use minicc_frontend::token::TokenKind;
use minicc_frontend::{LexError, ParseError};

pub type Sources = Vec<Cached<(String, String)>>;

pub type SourceId = usize;

pub type Diagnostic = minicc_diagnostic::Diagnostic<Sources>;

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &Sources);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _sources: &Sources) {
        self.push(diagnostic);
    }
}

pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl PrettyDiagnosticEmitter {
    pub fn new(color: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stderr(color),
            config: Config::default(),
        }
    }
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &Sources) {
        if let Err(err) = diagnostic.write_to_stream(sources, &self.config, &mut self.stream) {
            eprintln!("failed to emit diagnostic: {err}");
        }
    }
}

pub trait IntoDiagnostic {
    fn into_diagnostic(self, source_id: SourceId) -> Diagnostic;
}

impl IntoDiagnostic for LexError {
    fn into_diagnostic(self, source_id: SourceId) -> Diagnostic {
        Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_snippet(Snippet::primary("this character", source_id, self.span()))
            .with_note(format!("at byte offset {}", self.offset))
    }
}

impl IntoDiagnostic for ParseError {
    fn into_diagnostic(self, source_id: SourceId) -> Diagnostic {
        let found = self.found;

        let label = match found.kind {
            TokenKind::Eof => "reached end of input".to_owned(),
            kind => format!("found {}", kind.token_name()),
        };

        Diagnostic::error()
            .with_message(format!("expected {}", self.expected))
            .with_snippet(Snippet::primary(label, source_id, found.span()))
            .with_note(format!(
                "found {} '{}' at offset {}",
                found.kind.name(),
                found.lexeme,
                found.offset
            ))
    }
}
