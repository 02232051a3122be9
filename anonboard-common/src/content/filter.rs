//! Masking of filtered words in content that passed the pattern checks.
//!
//! Word list file format, one entry per line:
//!
//! ```text
//! # comment
//! word replacement
//! word
//! !word replacement
//! ```
//!
//! A missing replacement defaults to `***`. A leading `!` keeps the entry but
//! marks it inactive.

use crate::content::{Violations, validate};
use regex::{NoExpand, Regex, RegexBuilder};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use thiserror::Error;

pub const FILTERED_WORD_MAX_LEN: usize = 100;
pub const DEFAULT_REPLACEMENT: &str = "***";

const BUILTIN_WORDS: [(&str, &str); 8] = [
    ("fuck", "f**k"),
    ("shit", "s**t"),
    ("bitch", "b***h"),
    ("damn", "d**n"),
    ("ass", "a**"),
    ("hell", "h**l"),
    ("bastard", "b*****d"),
    ("crap", "c**p"),
];

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct FilteredWord {
    word: String,
    replacement: String,
    is_active: bool,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum InvalidFilteredWordError {
    #[error("A filtered word must not be empty")]
    Empty,
    #[error("The filtered word is too long: {0}")]
    TooLong(String),
    #[error("The replacement is too long: {0}")]
    ReplacementTooLong(String),
    #[error("The filtered word could not be compiled: {0}")]
    Pattern(String),
}

#[derive(Debug, Error)]
pub enum FilteredWordsLoadError {
    #[error("Reading the filtered word list failed: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid filtered word on line {line}: {source}")]
    InvalidWord {
        line: usize,
        source: InvalidFilteredWordError,
    },
}

#[derive(Clone, Debug)]
struct CompiledWord {
    word: FilteredWord,
    pattern: Regex,
}

#[derive(Clone, Debug)]
pub struct ContentFilter {
    words: Vec<CompiledWord>,
}

impl FilteredWord {
    pub fn new(
        word: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<Self, InvalidFilteredWordError> {
        let word = word.into();
        let replacement = replacement.into();

        if word.trim().is_empty() {
            return Err(InvalidFilteredWordError::Empty);
        }
        if word.chars().count() > FILTERED_WORD_MAX_LEN {
            return Err(InvalidFilteredWordError::TooLong(word));
        }
        if replacement.chars().count() > FILTERED_WORD_MAX_LEN {
            return Err(InvalidFilteredWordError::ReplacementTooLong(replacement));
        }

        Ok(Self {
            word,
            replacement,
            is_active: true,
        })
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    fn parse_line(line: &str) -> Result<Option<Self>, InvalidFilteredWordError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (active, entry) = match line.strip_prefix('!') {
            Some(entry) => (false, entry.trim_start()),
            None => (true, line),
        };
        let (word, replacement) = entry
            .split_once(char::is_whitespace)
            .map_or((entry, DEFAULT_REPLACEMENT), |(word, replacement)| {
                (word, replacement.trim())
            });

        let filtered_word = Self::new(word, replacement)?;
        Ok(Some(if active {
            filtered_word
        } else {
            filtered_word.inactive()
        }))
    }
}

impl CompiledWord {
    fn compile(word: FilteredWord) -> Result<Self, InvalidFilteredWordError> {
        let pattern = RegexBuilder::new(&regex::escape(&word.word))
            .case_insensitive(true)
            .build()
            .map_err(|err| InvalidFilteredWordError::Pattern(err.to_string()))?;

        Ok(Self { word, pattern })
    }
}

impl ContentFilter {
    pub fn new(
        words: impl IntoIterator<Item = FilteredWord>,
    ) -> Result<Self, InvalidFilteredWordError> {
        let words = words
            .into_iter()
            .map(CompiledWord::compile)
            .collect::<Result<_, _>>()?;

        Ok(Self { words })
    }

    /// The default word list.
    #[must_use]
    pub fn builtin() -> Self {
        let words = BUILTIN_WORDS.map(|(word, replacement)| {
            FilteredWord::new(word, replacement).expect("Builtin filtered word is invalid")
        });

        Self::new(words).expect("Builtin filtered word does not compile")
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self, FilteredWordsLoadError> {
        let mut words = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let invalid = |source| FilteredWordsLoadError::InvalidWord {
                line: index + 1,
                source,
            };

            if let Some(word) = FilteredWord::parse_line(&line).map_err(invalid)? {
                words.push(CompiledWord::compile(word).map_err(invalid)?);
            }
        }

        Ok(Self { words })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FilteredWordsLoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn words(&self) -> impl Iterator<Item = &FilteredWord> {
        self.words.iter().map(|compiled| &compiled.word)
    }

    /// Number of entries that are applied when masking.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.words().filter(|word| word.is_active).count()
    }

    /// Replaces every active word, ignoring case, in list order.
    #[must_use]
    pub fn mask(&self, text: &str) -> String {
        self.words
            .iter()
            .filter(|compiled| compiled.word.is_active)
            .fold(text.to_owned(), |masked, compiled| {
                compiled
                    .pattern
                    .replace_all(&masked, NoExpand(&compiled.word.replacement))
                    .into_owned()
            })
    }

    /// Full validation followed by masking, as done for a submitted post.
    /// Prohibited patterns are refused rather than masked.
    pub fn accept(&self, text: &str) -> Result<String, Violations> {
        let violations = validate(text);
        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(self.mask(text))
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::builtin()
    }
}
