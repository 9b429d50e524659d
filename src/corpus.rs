//! Corpus loading.
//!
//! A corpus can be read from:
//!
//! - a JSON file, either an object mapping ids to text or an array of
//!   [`Document`] objects,
//! - a CSV file with a header row (`id`, `text`, and optionally `title` and
//!   `filename`),
//! - a directory of Markdown (`.md`), reStructuredText (`.rst`), plain text
//!   (`.txt`) and Jupyter notebook (`.ipynb`) sources.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::Document;
use crate::error::{LecternError, Result};

/// Source file extensions picked up by [`Corpus::from_dir`].
pub const SOURCE_EXTENSIONS: &[&str] = &["md", "rst", "txt", "ipynb"];

/// An ordered collection of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCorpus {
    Texts(BTreeMap<String, String>),
    Documents(Vec<Document>),
}

#[derive(Deserialize)]
struct CsvRecord {
    id: String,
    text: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    filename: Option<String>,
}

impl Corpus {
    pub fn new() -> Self {
        Corpus::default()
    }

    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    /// Parse a JSON corpus.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let parsed: JsonCorpus = serde_json::from_str(json).map_err(|e| {
            LecternError::corpus(format!(
                "expected an object of id → text or an array of documents: {e}"
            ))
        })?;
        let documents = match parsed {
            JsonCorpus::Texts(texts) => texts
                .into_iter()
                .map(|(id, text)| Document::new(id, text))
                .collect(),
            JsonCorpus::Documents(docs) => docs,
        };
        Ok(Corpus { documents })
    }

    /// Read a CSV corpus with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut corpus = Corpus::new();
        for record in csv_reader.deserialize::<CsvRecord>() {
            let record = record?;
            let mut doc = Document::new(record.id, record.text);
            if let Some(title) = record.title.filter(|t| !t.is_empty()) {
                doc = doc.with_title(title);
            }
            if let Some(filename) = record.filename.filter(|f| !f.is_empty()) {
                doc = doc.with_filename(filename);
            }
            corpus.push(doc);
        }
        Ok(corpus)
    }

    /// Load every source file below `root`, in sorted path order.
    ///
    /// Entries whose name starts with `.` or `_` (build output, hidden
    /// directories) are skipped.
    pub fn from_dir<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let mut files = Vec::new();
        collect_sources(root, &mut files)?;
        files.sort();

        let mut corpus = Corpus::new();
        for path in files {
            corpus.push(load_source(root, &path)?);
        }
        log::info!(
            "loaded {} documents from {}",
            corpus.len(),
            root.display()
        );
        Ok(corpus)
    }

    /// Load a corpus from a directory, a `.json` file or a `.csv` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Self::from_dir(path);
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?),
            Some("csv") => Self::from_csv_reader(fs::File::open(path)?),
            _ => Err(LecternError::corpus(format!(
                "unsupported corpus source {}: expected a directory, .json or .csv",
                path.display()
            ))),
        }
    }
}

impl Deref for Corpus {
    type Target = [Document];

    fn deref(&self) -> &[Document] {
        &self.documents
    }
}

impl From<Vec<Document>> for Corpus {
    fn from(documents: Vec<Document>) -> Self {
        Corpus { documents }
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Corpus {
            documents: iter.into_iter().collect(),
        }
    }
}

fn collect_sources(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_sources(&path, files)?;
        } else if is_source(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn load_source(root: &Path, path: &Path) -> Result<Document> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| LecternError::corpus(format!("{} is outside the corpus root", path.display())))?;
    let filename = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let id = match filename.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => filename.clone(),
    };

    let raw = fs::read_to_string(path)?;
    let is_notebook = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ipynb"));
    let text = if is_notebook {
        notebook_text(&raw)
            .map_err(|e| LecternError::corpus(format!("{}: {e}", path.display())))?
    } else {
        raw
    };

    let mut doc = Document::new(id, text).with_filename(filename);
    if let Some(title) = first_heading(&doc.text) {
        doc.title = title.to_string();
    }
    log::debug!("loaded '{}' ({} bytes)", doc.id, doc.text.len());
    Ok(doc)
}

#[derive(Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<NotebookCell>,
}

#[derive(Deserialize)]
struct NotebookCell {
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellSource {
    Lines(Vec<String>),
    Text(String),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Text(String::new())
    }
}

impl CellSource {
    fn into_text(self) -> String {
        match self {
            CellSource::Lines(lines) => lines.concat(),
            CellSource::Text(text) => text,
        }
    }
}

/// Markdown and code cell sources of a notebook, one cell per paragraph.
fn notebook_text(raw: &str) -> std::result::Result<String, serde_json::Error> {
    let notebook: Notebook = serde_json::from_str(raw)?;
    let cells: Vec<String> = notebook
        .cells
        .into_iter()
        .filter(|cell| cell.cell_type == "markdown" || cell.cell_type == "code")
        .map(|cell| cell.source.into_text())
        .collect();
    Ok(cells.join("\n\n"))
}

/// First level-one Markdown heading.
fn first_heading(text: &str) -> Option<&str> {
    text.lines()
        .filter_map(|line| line.trim_start().strip_prefix("# "))
        .map(str::trim)
        .find(|title| !title.is_empty())
}
