//! Serialization of a [`SearchIndex`] into the static search artifact.
//!
//! The artifact is a JSON object. For direct inclusion in a static site it can
//! be wrapped as `Search.setIndex(<json>)`, which a front-end loads as a
//! script. Output is deterministic: maps are ordered and the struct layout is
//! fixed, so building the same corpus twice gives byte-identical artifacts.
//!
//! Reading also accepts the `searchindex.js` Sphinx writes. Its object keys
//! are bare JavaScript identifiers (`{docnames:[..],terms:{prior:1}}`) and it
//! carries no analyzer, so the English analyzer is assumed.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::AnalyzerConfig;
use crate::error::{LecternError, Result};
use crate::index::SearchIndex;

const JS_PREFIX: &str = "Search.setIndex(";
const JS_SUFFIX: &str = ")";

/// Artifact encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Plain JSON object.
    #[default]
    Json,
    /// JSON wrapped in `Search.setIndex(...)`.
    Js,
}

impl ArtifactFormat {
    /// Pick the format from a file extension: `.js` is [`ArtifactFormat::Js`],
    /// anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("js") => ArtifactFormat::Js,
            _ => ArtifactFormat::Json,
        }
    }
}

impl SearchIndex {
    /// Compact JSON encoding.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON encoding.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `Search.setIndex(<json>)` encoding.
    pub fn to_js(&self) -> Result<String> {
        Ok(format!("{JS_PREFIX}{}{JS_SUFFIX}", self.to_json()?))
    }

    /// Encode in the given format.
    pub fn encode(&self, format: ArtifactFormat) -> Result<String> {
        match format {
            ArtifactFormat::Json => self.to_json(),
            ArtifactFormat::Js => self.to_js(),
        }
    }

    /// Decode an artifact in either format and validate it.
    pub fn from_artifact_str(artifact: &str) -> Result<Self> {
        let literal = strip_js_wrapper(artifact.trim());
        let mut value = serde_json::from_str::<Value>(literal)
            .or_else(|_| serde_json::from_str::<Value>(&quote_bare_keys(literal)))
            .map_err(|e| LecternError::malformed_index(format!("failed to parse index: {e}")))?;

        if let Some(object) = value.as_object_mut() {
            if object.contains_key("envversion") {
                adapt_sphinx_artifact(object)?;
            }
        }

        let index: SearchIndex = serde_json::from_value(value)
            .map_err(|e| LecternError::malformed_index(format!("failed to parse index: {e}")))?;
        index.validate()?;
        Ok(index)
    }

    /// Decode an artifact from a reader.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut artifact = String::new();
        reader.read_to_string(&mut artifact)?;
        Self::from_artifact_str(&artifact)
    }

    /// Encode into a writer.
    pub fn write_to<W: Write>(&self, mut writer: W, format: ArtifactFormat) -> Result<()> {
        writer.write_all(self.encode(format)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Read and validate an artifact file.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::read_from(BufReader::new(file))
    }

    /// Write the artifact file, choosing the format from the extension.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = ArtifactFormat::from_path(path);
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file), format)?;
        log::info!("wrote {format:?} index to {}", path.display());
        Ok(())
    }
}

fn strip_js_wrapper(artifact: &str) -> &str {
    let Some(body) = artifact.strip_prefix(JS_PREFIX) else {
        return artifact;
    };
    let body = body.trim_end();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();
    body.strip_suffix(JS_SUFFIX).unwrap_or(body)
}

/// Quote the bare keys of a JavaScript object literal. String contents are
/// left alone.
fn quote_bare_keys(literal: &str) -> String {
    let bytes = literal.as_bytes();
    let mut out = String::with_capacity(literal.len() + literal.len() / 8);
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    // Last significant byte opened an object or separated its members.
    let mut key_position = false;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                key_position = false;
            }
            b'{' | b',' => key_position = true,
            _ if b.is_ascii_whitespace() => {}
            _ if key_position && is_identifier_byte(b) => {
                let end = i + bytes[i..].iter().take_while(|&&c| is_identifier_byte(c)).count();
                let colon = end
                    + bytes[end..]
                        .iter()
                        .take_while(|c| c.is_ascii_whitespace())
                        .count();
                if bytes.get(colon) == Some(&b':') {
                    out.push_str(&literal[copied..i]);
                    out.push('"');
                    out.push_str(&literal[i..end]);
                    out.push('"');
                    copied = end;
                }
                key_position = false;
                i = end;
                continue;
            }
            _ => key_position = false,
        }
        i += 1;
    }

    out.push_str(&literal[copied..]);
    out
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Sphinx stems English and can leave a term with an empty posting list
/// after documents are removed from its environment.
fn adapt_sphinx_artifact(object: &mut Map<String, Value>) -> Result<()> {
    if !object.contains_key("analyzer") {
        object.insert(
            "analyzer".to_string(),
            serde_json::to_value(AnalyzerConfig::english())?,
        );
    }

    for section in ["terms", "titleterms"] {
        if let Some(Value::Object(terms)) = object.get_mut(section) {
            let empty: Vec<String> = terms
                .iter()
                .filter(|(_, postings)| postings.as_array().is_some_and(Vec::is_empty))
                .map(|(term, _)| term.clone())
                .collect();
            for term in empty {
                log::debug!("dropping {section} entry '{term}' with no documents");
                terms.remove(&term);
            }
        }
    }
    Ok(())
}
