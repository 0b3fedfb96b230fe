//! Text Normalizer
//!
//! Cleans raw text into a canonical comparable form: lower-cased, punctuation
//! removed, whitespace collapsed, split into word tokens.
//!
//! Apostrophes and hyphens survive only between two alphanumeric characters
//! (`don't`, `light-dependent`). Typographic apostrophes fold to `'`.

use thiserror::Error;

/// Normalizer errors
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    /// No word tokens remain after normalization
    #[error("contains no words")]
    Empty,
}

/// Normalized text
///
/// Derived from raw input and never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedText {
    raw: String,
    tokens: Vec<String>,
}

impl NormalizedText {
    /// Original input text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Word tokens in input order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of word tokens (always > 0)
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    /// Tokens joined by single spaces
    pub fn canonical(&self) -> String {
        self.tokens.join(" ")
    }
}

fn is_joiner(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '\u{2018}' | '-' | '\u{2010}' | '\u{2011}')
}

/// Normalize text into tokens
///
/// # Errors
/// Returns `NormalizeError::Empty` if no tokens remain (empty, whitespace-only
/// or punctuation-only input).
pub fn normalize(text: &str) -> Result<NormalizedText, NormalizeError> {
    let chars: Vec<char> = text.chars().collect();
    let mut cleaned = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() {
            cleaned.extend(c.to_lowercase());
        } else if is_joiner(c) {
            let prev_alnum = i > 0 && chars[i - 1].is_alphanumeric();
            let next_alnum = chars.get(i + 1).is_some_and(|n| n.is_alphanumeric());
            if prev_alnum && next_alnum {
                cleaned.push(if c == '-' || c == '\u{2010}' || c == '\u{2011}' {
                    '-'
                } else {
                    '\''
                });
            } else {
                cleaned.push(' ');
            }
        } else {
            cleaned.push(' ');
        }
    }

    let tokens: Vec<String> = cleaned.split_whitespace().map(str::to_string).collect();

    if tokens.is_empty() {
        return Err(NormalizeError::Empty);
    }

    Ok(NormalizedText {
        raw: text.to_string(),
        tokens,
    })
}
