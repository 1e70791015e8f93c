//! Byte spans into source text.

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Span of `len` bytes starting at `start`.
    #[inline]
    pub const fn at(start: u32, len: u32) -> Self {
        Span {
            start,
            end: start + len,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `offset` touches this span. The end is inclusive so a cursor
    /// placed right after a token still selects it.
    #[inline]
    pub const fn touches(&self, offset: u32) -> bool {
        self.start <= offset && offset <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches_is_end_inclusive() {
        let span = Span::at(4, 3);
        assert_eq!(span, Span::new(4, 7));
        assert!(span.touches(4));
        assert!(span.touches(7));
        assert!(!span.touches(3));
        assert!(!span.touches(8));
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
        assert!(Span::new(5, 5).is_empty());
    }
}
