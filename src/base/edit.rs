use text_size::{TextRange, TextSize};

/// A byte-range edit: `start..old_end` of the old text became
/// `start..new_end` of the new text.
///
/// A list of edits is applied in order; the offsets of each edit refer to the
/// text produced by the edits before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextEdit {
    pub start: TextSize,
    pub old_end: TextSize,
    pub new_end: TextSize,
}

impl TextEdit {
    pub fn new(start: TextSize, old_end: TextSize, new_end: TextSize) -> Self {
        Self {
            start,
            old_end,
            new_end,
        }
    }

    /// Replace `range` with `replacement`
    pub fn replace(range: TextRange, replacement: &str) -> Self {
        Self::new(
            range.start(),
            range.end(),
            range.start() + TextSize::of(replacement),
        )
    }

    /// Insert `text` at `offset`
    pub fn insert(offset: TextSize, text: &str) -> Self {
        Self::replace(TextRange::empty(offset), text)
    }

    /// Delete `range`
    pub fn delete(range: TextRange) -> Self {
        Self::replace(range, "")
    }

    /// The replaced range of the old text
    pub fn old_range(&self) -> TextRange {
        TextRange::new(self.start, self.old_end.max(self.start))
    }

    /// The inserted range of the new text
    pub fn new_range(&self) -> TextRange {
        TextRange::new(self.start, self.new_end.max(self.start))
    }
}
