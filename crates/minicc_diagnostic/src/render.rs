use std::io;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::span::Span;
use super::{Config, Diagnostic, DiagnosticKind, SnippetKind};

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor, S: Sources> DiagnosticWriter<'_, 'a, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        let context = self.config.context_size;

        for source_data in self.snippets_by_source() {
            let num_lines = source_data.source.num_lines();

            let groups = get_overlapping_groups(source_data.snippets, |snippet| {
                Span::new(
                    snippet.line.saturating_sub(context),
                    (snippet.line + 1 + context).min(num_lines),
                )
            });

            for (snippets, lines) in groups {
                self.draw_group(source_data.source, &snippets, lines)?;
            }
        }

        self.draw_notes()
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.get_primary_color())?;
        write!(self.stream, "{}:", self.diagnostic.kind.as_str())?;
        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_group(
        &mut self,
        source: &Cached<S::Source>,
        snippets: &[SnippetData],
        lines: Span,
    ) -> io::Result<()> {
        let line_num_width = 1 + lines.end.max(1).ilog10() as usize;

        // all groups have at least one snippet
        let (line_num, col_num) = source
            .byte_to_line_col(snippets[0].bytes.start)
            .unwrap_or((1, 1));

        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, "In {}:{line_num}:{col_num}", source.name_str())?;

        if let Some(path) = source.path() {
            write!(self.stream, " ({}:{line_num}:{col_num})", path.display())?;
        }

        writeln!(self.stream)?;
        self.stream.reset()?;

        for line in lines.start..lines.end {
            let (Some(line_str), Some(line_start)) = (source.line_str(line), source.line_to_byte(line))
            else {
                break;
            };

            self.draw_gutter(Some(line + 1), line_num_width)?;
            writeln!(self.stream, "{}", line_str.replace('\t', TAB))?;

            for snippet in snippets.iter().filter(|snippet| snippet.line == line) {
                self.draw_underline(snippet, line_str, line_start, line_num_width)?;
            }
        }

        writeln!(self.stream)?;

        Ok(())
    }

    fn draw_underline(
        &mut self,
        snippet: &SnippetData,
        line_str: &str,
        line_start: usize,
        line_num_width: usize,
    ) -> io::Result<()> {
        self.draw_gutter(None, line_num_width)?;

        let start = (snippet.bytes.start - line_start).min(line_str.len());
        let end = snippet
            .bytes
            .end
            .saturating_sub(line_start)
            .clamp(start, line_str.len());

        let offset = str_width(&line_str[..start]);
        let width = str_width(&line_str[start..end]).max(1);

        self.stream.set_color(self.get_snippet_color(snippet.kind))?;

        write!(self.stream, "{:offset$}", "")?;
        write!(self.stream, "{}", self.config.underline.repeat(width))?;
        writeln!(
            self.stream,
            "{}{}",
            self.config.underline_after, snippet.label
        )?;

        self.stream.reset()
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        match line {
            Some(line) => write!(self.stream, "{line:>line_num_width$}")?,
            None => write!(self.stream, "{:>line_num_width$}", "")?,
        }

        write!(self.stream, " {} ", self.config.gutter)?;

        self.stream.reset()
    }

    fn draw_notes(&mut self) -> io::Result<()> {
        for note in &self.diagnostic.notes {
            self.stream.set_color(&self.config.emphasis)?;
            write!(self.stream, "{}", self.config.note_prefix)?;
            self.stream.reset()?;

            writeln!(self.stream, " {note}")?;
        }

        Ok(())
    }

    fn snippets_by_source(&self) -> Vec<SourceData<'a, S>> {
        let diagnostic = self.diagnostic;
        let sources = self.sources;

        let mut source_datas: Vec<SourceData<'a, S>> = vec![];

        for snippet in &diagnostic.snippets {
            let Some(source) = sources.get_source(snippet.source_id) else {
                continue;
            };
            let Some(line) = source.byte_to_line_index(snippet.span.start) else {
                continue;
            };

            let snippet_data = SnippetData {
                label: &snippet.label,
                kind: snippet.kind,

                bytes: snippet.span,
                line,
            };

            match source_datas
                .iter_mut()
                .find(|data| data.source_id == snippet.source_id)
            {
                Some(data) => data.snippets.push(snippet_data),
                None => source_datas.push(SourceData {
                    source_id: snippet.source_id,
                    source,
                    snippets: vec![snippet_data],
                }),
            }
        }

        source_datas
    }

    fn get_primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.kind {
            DiagnosticKind::Warning => &self.config.warning_color,
            DiagnosticKind::Error => &self.config.error_color,
        }
    }

    fn get_snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.get_primary_color(),
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

struct SourceData<'a, S: Sources> {
    source_id: S::SourceId,
    source: &'a Cached<S::Source>,
    snippets: Vec<SnippetData<'a>>,
}

#[derive(Clone)]
struct SnippetData<'a> {
    label: &'a str,
    kind: SnippetKind,

    bytes: Span,
    line: usize,
}

fn get_overlapping_groups<T, F>(mut items: Vec<T>, get_range: F) -> Vec<(Vec<T>, Span)>
where
    F: Fn(&T) -> Span,
{
    items.sort_by_key(|item| get_range(item).start);

    let mut groups = vec![];

    let mut group = vec![];
    let mut group_start = 0;
    let mut group_end = 0;

    for item in items {
        let range = get_range(&item);

        if range.start > group_end {
            if !group.is_empty() {
                groups.push((
                    std::mem::take(&mut group),
                    Span::new(group_start, group_end),
                ));
            }

            group_start = range.start;
        }

        group_end = group_end.max(range.end);
        group.push(item);
    }

    if !group.is_empty() {
        groups.push((group, Span::new(group_start, group_end)));
    }

    groups
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}
