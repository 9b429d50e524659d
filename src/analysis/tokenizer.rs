//! Tokenizers split raw text into tokens.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::Token;

lazy_static! {
    /// Runs of Unicode word characters: letters, marks, digits and connector
    /// punctuation such as `_`.
    static ref WORD_RUN: Regex = Regex::new(r"\w+").expect("static word pattern");
}

/// Trait for tokenizers.
pub trait Tokenizer: Send + Sync + std::fmt::Debug {
    /// Split text into tokens. Never fails; any input yields zero or more tokens.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Tokenizer name, used in debug output.
    fn name(&self) -> &'static str;
}

/// Which tokenizer an analyzer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Runs of word characters (`\w+`). Everything else is a delimiter.
    #[default]
    Regex,
    /// UAX#29 word boundaries, keeping only segments that contain an
    /// alphanumeric character.
    UnicodeWords,
}

impl TokenizerKind {
    /// Instantiate the tokenizer.
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            TokenizerKind::Regex => Box::new(RegexTokenizer),
            TokenizerKind::UnicodeWords => Box::new(UnicodeWordTokenizer),
        }
    }
}

/// Tokenizer emitting maximal runs of word characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTokenizer;

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        WORD_RUN
            .find_iter(text)
            .enumerate()
            .map(|(position, m)| Token::new(m.as_str(), position as u32, m.start(), m.end()))
            .collect()
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

/// Tokenizer following Unicode word boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.unicode_word_indices()
            .enumerate()
            .map(|(position, (start, word))| {
                Token::new(word, position as u32, start, start + word.len())
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "unicode_words"
    }
}
