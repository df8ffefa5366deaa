use std::ops::Range;

/// A half-open byte range into a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn union(self, other: Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn contains(&self, n: usize) -> bool {
        n >= self.start && n < self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait AsSpan {
    fn as_span(&self) -> Span;
}

impl AsSpan for Span {
    fn as_span(&self) -> Span {
        *self
    }
}

impl AsSpan for Range<usize> {
    fn as_span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::Span;

    #[test]
    fn union_covers_both() {
        let span = Span::new(4, 6).union(Span::new(1, 2));
        assert_eq!(span, Span::new(1, 6));
        assert!(span.contains(5));
        assert!(!span.contains(6));
    }

    #[test]
    fn empty_span() {
        let span = Span::empty(10);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }
}
