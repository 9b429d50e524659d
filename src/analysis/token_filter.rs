//! Token filters transform or drop tokens after tokenization.

use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};
use stop_words::{LANGUAGE, get};

use crate::analysis::analyzer::Language;
use crate::analysis::token::Token;

/// Trait for token filters.
pub trait Filter: Send + Sync + std::fmt::Debug {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token>;

    /// Filter name, used in debug output.
    fn name(&self) -> &'static str;
}

/// Lower-cases every token.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseFilter;

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|token| {
                let lower = token.text.to_lowercase();
                token.with_text(lower)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

/// Drops tokens whose character length falls outside `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct LengthFilter {
    min: usize,
    max: Option<usize>,
}

impl LengthFilter {
    pub fn new(min: usize, max: Option<usize>) -> Self {
        LengthFilter { min, max }
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| {
                let len = token.char_len();
                len >= self.min && self.max.is_none_or(|max| len <= max)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

/// Removes stopwords. Comparison is case-insensitive.
#[derive(Debug, Clone)]
pub struct StopFilter {
    stopwords: HashSet<String>,
}

impl StopFilter {
    /// Stopword filter for the given language.
    pub fn for_language(language: Language) -> Self {
        let list = match language {
            Language::English => get(LANGUAGE::English),
        };
        Self::from_words(list)
    }

    /// Stopword filter over an explicit word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StopFilter {
            stopwords: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| !self.is_stopword(&token.text))
            .collect()
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

/// Snowball stemming filter.
pub struct StemFilter {
    stemmer: Stemmer,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter").finish_non_exhaustive()
    }
}

impl StemFilter {
    pub fn for_language(language: Language) -> Self {
        let algorithm = match language {
            Language::English => Algorithm::English,
        };
        StemFilter {
            stemmer: Stemmer::create(algorithm),
        }
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|token| {
                let stemmed = self.stemmer.stem(&token.text).into_owned();
                token.with_text(stemmed)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
