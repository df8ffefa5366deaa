use std::path::{Path, PathBuf};

pub trait Sources {
    type SourceId: Copy + Eq;
    type Source: Source;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>>;
}

pub trait Source {
    fn name_str(&self) -> &str;
    fn path(&self) -> Option<&Path>;

    fn source_str(&self) -> &str;
}

impl<S: Source> Sources for Vec<Cached<S>> {
    type SourceId = usize;
    type Source = S;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>> {
        self.get(id)
    }
}

/// A source given directly as text, e.g. with `--source`.
impl Source for (String, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        None
    }

    fn source_str(&self) -> &str {
        &self.1
    }
}

/// A source read from a file.
impl Source for (String, PathBuf, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.1)
    }

    fn source_str(&self) -> &str {
        &self.2
    }
}

/// A source along with the byte offsets of its line breaks.
#[derive(Debug)]
pub struct Cached<S: Source> {
    source: S,
    line_breaks: Vec<usize>,
}

impl<S: Source> Cached<S> {
    pub fn new(source: S) -> Self {
        let line_breaks = source
            .source_str()
            .match_indices('\n')
            .map(|(i, _)| i)
            .collect();

        Self {
            source,
            line_breaks,
        }
    }

    pub fn as_source(&self) -> &S {
        &self.source
    }

    /// One-based line and column of a byte offset.
    pub fn byte_to_line_col(&self, byte: usize) -> Option<(usize, usize)> {
        let line = self.byte_to_line_index(byte)?;
        let col = byte - self.line_to_byte(line)?;

        Some((line + 1, col + 1))
    }

    pub fn byte_to_line_index(&self, byte: usize) -> Option<usize> {
        if byte > self.source_str().len() {
            return None;
        }

        match self.line_breaks.binary_search(&byte) {
            Ok(line) | Err(line) => Some(line),
        }
    }

    pub fn line_to_byte(&self, line: usize) -> Option<usize> {
        if line == 0 {
            Some(0)
        } else {
            self.line_breaks.get(line - 1).map(|&byte| byte + 1)
        }
    }

    /// The text of a line, without its line ending.
    pub fn line_str(&self, index: usize) -> Option<&str> {
        let start = self.line_to_byte(index)?;
        let end = self
            .line_to_byte(index + 1)
            .unwrap_or(self.source_str().len());

        let s = &self.source_str()[start..end];
        let s = s.strip_suffix('\n').unwrap_or(s);
        let s = s.strip_suffix('\r').unwrap_or(s);

        Some(s)
    }

    pub fn num_lines(&self) -> usize {
        1 + self.line_breaks.len()
    }
}

impl<S: Source> Source for Cached<S> {
    fn name_str(&self) -> &str {
        self.source.name_str()
    }

    fn path(&self) -> Option<&Path> {
        self.source.path()
    }

    fn source_str(&self) -> &str {
        self.source.source_str()
    }
}

#[cfg(test)]
mod tests {
    use super::Cached;

    fn cached_str(s: impl Into<String>) -> Cached<(String, String)> {
        Cached::new(("sample".to_owned(), s.into()))
    }

    #[test]
    fn line_index_of_bytes() {
        let cached = cached_str("");
        assert_eq!(cached.byte_to_line_index(0), Some(0));
        assert_eq!(cached.byte_to_line_index(1), None);

        let cached = cached_str("x\n");
        assert_eq!(cached.byte_to_line_index(0), Some(0));
        assert_eq!(cached.byte_to_line_index(1), Some(0));
        assert_eq!(cached.byte_to_line_index(2), Some(1));
        assert_eq!(cached.byte_to_line_index(3), None);
    }

    #[test]
    fn line_col_of_bytes() {
        let cached = cached_str("int main() {\n    return 0\n}");
        assert_eq!(cached.byte_to_line_col(0), Some((1, 1)));
        assert_eq!(cached.byte_to_line_col(12), Some((1, 13)));
        assert_eq!(cached.byte_to_line_col(17), Some((2, 5)));
        assert_eq!(cached.byte_to_line_col(26), Some((3, 1)));
        assert_eq!(cached.num_lines(), 3);
    }

    #[test]
    fn line_strings() {
        let cached = cached_str("a\r\nb\n");
        assert_eq!(cached.line_str(0), Some("a"));
        assert_eq!(cached.line_str(1), Some("b"));
        assert_eq!(cached.line_str(2), Some(""));
        assert_eq!(cached.line_str(3), None);
    }
}
