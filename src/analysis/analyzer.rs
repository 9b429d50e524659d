//! Analyzers combine a tokenizer and a chain of token filters.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::analysis::token::Token;
use crate::analysis::token_filter::{
    Filter, LengthFilter, LowercaseFilter, StemFilter, StopFilter,
};
use crate::analysis::tokenizer::{Tokenizer, TokenizerKind};
use crate::error::{LecternError, Result};

/// Languages supported by the stopword and stemming filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
}

/// Serializable description of an analysis pipeline.
///
/// The builder records this configuration in the index so that queries are
/// analyzed with exactly the same rule the index was built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Tokenizer to split text with.
    pub tokenizer: TokenizerKind,

    /// Apply NFKC normalization before tokenizing.
    pub normalize: bool,

    /// Lower-case tokens.
    pub lowercase: bool,

    /// Minimum token length in characters.
    pub min_token_length: usize,

    /// Maximum token length in characters.
    pub max_token_length: Option<usize>,

    /// Stopword list to remove, if any.
    pub stopwords: Option<Language>,

    /// Stemmer to apply, if any.
    pub stemmer: Option<Language>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            tokenizer: TokenizerKind::Regex,
            normalize: false,
            lowercase: true,
            min_token_length: 1,
            max_token_length: None,
            stopwords: None,
            stemmer: None,
        }
    }
}

impl AnalyzerConfig {
    /// English analysis: lower-casing, English stopwords and Snowball stemming.
    pub fn english() -> Self {
        AnalyzerConfig {
            stopwords: Some(Language::English),
            stemmer: Some(Language::English),
            ..Default::default()
        }
    }

    /// Check the configuration for inconsistent values.
    pub fn validate(&self) -> Result<()> {
        if self.min_token_length == 0 {
            return Err(LecternError::invalid_config(
                "min_token_length must be at least 1",
            ));
        }
        if let Some(max) = self.max_token_length {
            if max < self.min_token_length {
                return Err(LecternError::invalid_config(format!(
                    "max_token_length {max} is smaller than min_token_length {}",
                    self.min_token_length
                )));
            }
        }
        Ok(())
    }
}

/// Trait for analyzers.
pub trait Analyzer: Send + Sync + std::fmt::Debug {
    /// Analyze text into tokens. Never fails.
    fn analyze(&self, text: &str) -> Vec<Token>;

    /// The configuration describing this analyzer.
    fn config(&self) -> &AnalyzerConfig;

    /// Analyzer name.
    fn name(&self) -> &'static str;

    /// Analyze text and return only the term strings, in stream order.
    fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).into_iter().map(|t| t.text).collect()
    }
}

/// Analyzer assembled from an [`AnalyzerConfig`].
#[derive(Debug)]
pub struct PipelineAnalyzer {
    config: AnalyzerConfig,
    tokenizer: Box<dyn Tokenizer>,
    filters: Vec<Box<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Build the pipeline described by `config`.
    ///
    /// Filters run in a fixed order: lowercase, length, stopwords, stemming.
    pub fn from_config(config: AnalyzerConfig) -> Self {
        let tokenizer = config.tokenizer.build();

        let mut filters: Vec<Box<dyn Filter>> = Vec::new();
        if config.lowercase {
            filters.push(Box::new(LowercaseFilter));
        }
        if config.min_token_length > 1 || config.max_token_length.is_some() {
            filters.push(Box::new(LengthFilter::new(
                config.min_token_length,
                config.max_token_length,
            )));
        }
        if let Some(language) = config.stopwords {
            filters.push(Box::new(StopFilter::for_language(language)));
        }
        if let Some(language) = config.stemmer {
            filters.push(Box::new(StemFilter::for_language(language)));
        }

        PipelineAnalyzer {
            config,
            tokenizer,
            filters,
        }
    }

    /// Names of the pipeline stages, tokenizer first.
    pub fn stages(&self) -> Vec<&'static str> {
        std::iter::once(self.tokenizer.name())
            .chain(self.filters.iter().map(|f| f.name()))
            .collect()
    }
}

impl Default for PipelineAnalyzer {
    fn default() -> Self {
        Self::from_config(AnalyzerConfig::default())
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Vec<Token> {
        let tokens = if self.config.normalize {
            let normalized: String = text.nfkc().collect();
            self.tokenizer.tokenize(&normalized)
        } else {
            self.tokenizer.tokenize(text)
        };

        self.filters
            .iter()
            .fold(tokens, |tokens, filter| filter.filter(tokens))
    }

    fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}
