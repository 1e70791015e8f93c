//! Line/character positions.
//!
//! Checkers address source text by byte offset; type objects report
//! provenance as 0-indexed (line, character) pairs where `character` counts
//! UTF-16 code units, the convention editors and the TypeScript checker use.

use serde::{Deserialize, Serialize};

/// A position in a source file (0-indexed line and character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    /// UTF-16 code units from the start of the line.
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// A half-open range: `end` is one past the last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// Offset <-> position table for one source text.
///
/// Stores the byte offset at which every line begins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push((i + 1) as u32),
                // lone \r ends a line, \r\n is handled by the \n
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => line_starts.push((i + 1) as u32),
                _ => {}
            }
            i += 1;
        }
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }

    /// Convert a byte offset into a position. Offsets past the end clamp to
    /// the end of the text; offsets inside a multi-byte character snap back
    /// to that character's start.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line] as usize;
        let end = floor_char_boundary(source, offset as usize);
        let character = source
            .get(line_start.min(end)..end)
            .unwrap_or("")
            .chars()
            .map(|ch| ch.len_utf16() as u32)
            .sum();

        Position::new(line as u32, character)
    }

    /// Convert a position back into a byte offset.
    ///
    /// Returns `None` for a line past the end of the text. A character past
    /// the end of its line clamps to the line terminator.
    pub fn position_to_offset(&self, position: Position, source: &str) -> Option<u32> {
        let line = position.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(source.len() as u32);
        let text = source
            .get(line_start as usize..line_end as usize)
            .unwrap_or("");

        let mut units = 0u32;
        let mut bytes = 0u32;
        for ch in text.chars() {
            if ch == '\n' || ch == '\r' || units >= position.character {
                break;
            }
            let width = ch.len_utf16() as u32;
            if units + width > position.character {
                break;
            }
            units += width;
            bytes += ch.len_utf8() as u32;
        }

        Some(line_start + bytes)
    }
}

/// Largest char boundary at or below `index`, clamped to the text length.
fn floor_char_boundary(source: &str, index: usize) -> usize {
    let mut index = index.min(source.len());
    while !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}
