//! Token representation.

/// A single token produced by a tokenizer.
///
/// Indexing only keeps `text`. Position and offsets survive every filter so
/// callers of [`Analyzer::analyze`](crate::analysis::Analyzer::analyze) can
/// highlight a match in the text they analyzed. With NFKC normalization on,
/// offsets refer to the normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text.
    pub text: String,
    /// Position of the token in the token stream.
    pub position: u32,
    /// Byte offset of the token start in the (normalized) input.
    pub start_offset: usize,
    /// Byte offset of the token end in the (normalized) input.
    pub end_offset: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, position: u32, start_offset: usize, end_offset: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Replace the token text, keeping position and offsets.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Number of characters in the token text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
