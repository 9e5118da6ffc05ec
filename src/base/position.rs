//! Line/column conversion for source positions
//!
//! Diagnostics carry byte-offset [`TextRange`]s; editors and terminal output
//! want line/column pairs. [`LineIndex`] converts between the two.

pub use text_size::{TextRange, TextSize};

/// A line/column position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets to lines and columns for one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first character of each line
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position
    ///
    /// Columns are byte columns within the line.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Convert a line/column position back to a byte offset
    ///
    /// Returns `None` if the line does not exist.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(line_col.line as usize)?;
        Some(start + TextSize::new(line_col.col))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_single_line() {
        let index = LineIndex::new("hello");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(4)), LineCol { line: 0, col: 4 });
    }

    #[test]
    fn test_line_col_multi_line() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(3)), LineCol { line: 1, col: 0 });
        assert_eq!(index.line_col(TextSize::new(4)), LineCol { line: 1, col: 1 });
        assert_eq!(index.line_col(TextSize::new(6)), LineCol { line: 2, col: 0 });
        assert_eq!(index.line_col(TextSize::new(7)), LineCol { line: 3, col: 0 });
        assert_eq!(index.line_count(), 4);
    }

    #[test]
    fn test_offset_round_trip() {
        let text = "namespace Pets;\nmodel Pet {}\n";
        let index = LineIndex::new(text);
        for offset in 0..text.len() as u32 {
            let offset = TextSize::new(offset);
            assert_eq!(index.offset(index.line_col(offset)), Some(offset));
        }
    }

    #[test]
    fn test_offset_missing_line() {
        let index = LineIndex::new("one line");
        assert_eq!(index.offset(LineCol { line: 5, col: 0 }), None);
    }
}
