//! Text spans and line/column conversion.
//!
//! All positions inside the engine are byte offsets ([`TextSize`]) and byte
//! ranges ([`TextRange`]). Line/column conversion only happens at the edges,
//! through a [`LineIndex`] built once per document text.

pub use text_size::{TextRange, TextSize};

/// A `{start, length}` range of source text.
pub type Span = TextRange;

/// Returns true if the two spans share at least one position.
///
/// Touching spans intersect, and so does a zero-length span lying on the
/// boundary of the other one. A caret-position query therefore still sees the
/// elements on both sides of the caret.
#[inline]
pub fn intersects(a: TextRange, b: TextRange) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

/// A 0-indexed line/column position. Columns count bytes from the line start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// Maps offsets to line/column positions and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line.
    line_starts: Vec<TextSize>,
    /// Offset one past the last content byte of every line (line break excluded).
    line_ends: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        let mut line_ends = Vec::new();
        let bytes = text.as_bytes();

        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    line_ends.push(TextSize::from(i as u32));
                    line_starts.push(TextSize::from(i as u32 + 1));
                }
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    line_ends.push(TextSize::from(i as u32));
                    line_starts.push(TextSize::from(i as u32 + 2));
                    i += 1;
                }
                _ => {}
            }
            i += 1;
        }
        line_ends.push(TextSize::of(text));

        Self {
            line_starts,
            line_ends,
            len: TextSize::of(text),
        }
    }

    /// Number of lines (a trailing line break starts one more, empty line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Length of the indexed text.
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::from(0)
    }

    /// Line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: TextSize) -> u32 {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        line as u32
    }

    /// Convert an offset into a line/column. The offset is clamped to the text.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        let col = offset - self.line_starts[line as usize];
        LineCol::new(line, col.into())
    }

    /// Convert a line/column back into an offset, if the line exists.
    pub fn offset(&self, pos: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(pos.line as usize)?;
        let end = self.line_ends[pos.line as usize];
        let offset = start + TextSize::from(pos.col);
        (offset <= end).then_some(offset)
    }

    /// Range of `line` without its line break.
    pub fn line_range(&self, line: u32) -> Option<TextRange> {
        let start = *self.line_starts.get(line as usize)?;
        Some(TextRange::new(start, self.line_ends[line as usize]))
    }
}
