//! Byte ranges into a source buffer.

use std::fmt;
use std::ops::Range;

/// Half-open byte range `start..end` into the buffer a token was lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past its end {end}");
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::Span;

    #[test]
    fn empty_span_has_no_length() {
        let span = Span::empty(4);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
        assert_eq!(span.to_string(), "4..4");
    }

    #[test]
    fn converts_into_range() {
        let range: std::ops::Range<usize> = Span::new(2, 7).into();
        assert_eq!(range, 2..7);
    }
}
