use serde::{Deserialize, Serialize};

/// A single content unit of the corpus (one page of the documentation site).
///
/// Documents are immutable once handed to the index builder. The `id` is the
/// stable page name (for example `Unit4-BetaPriors`), `filename` is the
/// source file the page was rendered from, if known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable document identifier.
    pub id: String,

    /// Title supplied by the caller. Empty when the document has none; only a
    /// non-empty title is indexed.
    #[serde(default)]
    pub title: String,

    /// Source file name relative to the documentation root.
    #[serde(default)]
    pub filename: Option<String>,

    /// Raw text content.
    #[serde(default)]
    pub text: String,
}

impl Document {
    /// Create a new untitled document with the given id and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            filename: None,
            text: text.into(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the source file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Title used for display: the title, or the id for untitled documents.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Check if the document has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl<I: Into<String>, T: Into<String>> From<(I, T)> for Document {
    fn from((id, text): (I, T)) -> Self {
        Document::new(id, text)
    }
}
