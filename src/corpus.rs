//! Corpus records.
//!
//! The input is a Tatoeba style export with one record per line:
//!
//! ```text
//! <id>\t<language>\t<text>
//! ```
//!
//! A [`Line`] is what the reader produces, a [`Record`] is the parsed view a
//! worker uses while deciding what to do with it, and a [`Sentence`] is what
//! reaches the index builder.

use serde::{Deserialize, Serialize};

use crate::config::IdSource;
use crate::error::{LookupError, Result};

/// Identifier of a sentence in the index.
pub type SentenceId = i64;

/// A raw input line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: u64,
    pub content: String,
}

impl Line {
    pub fn new<S: Into<String>>(number: u64, content: S) -> Self {
        Self {
            number,
            content: content.into(),
        }
    }
}

/// The three fields of a record, borrowed from its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub line: u64,
    pub id_field: &'a str,
    pub language: &'a str,
    pub text: &'a str,
}

impl<'a> Record<'a> {
    /// Split a line into its fields.
    ///
    /// The line is split on tabs into at most three parts, so the text may
    /// itself contain tabs. Fewer than three parts is an error.
    pub fn parse(line: &'a Line) -> Result<Self> {
        let mut parts = line.content.splitn(3, '\t');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(id_field), Some(language), Some(text)) => Ok(Record {
                line: line.number,
                id_field,
                language,
                text,
            }),
            _ => Err(LookupError::malformed_record(line.number, &line.content)),
        }
    }

    pub fn is_language(&self, language: &str) -> bool {
        self.language == language
    }

    /// Resolve the sentence id for this record.
    pub fn sentence_id(&self, source: IdSource) -> Result<SentenceId> {
        match source {
            IdSource::LineNumber => Ok(self.line as SentenceId - 1),
            IdSource::Field => self
                .id_field
                .parse::<SentenceId>()
                .map_err(|_| LookupError::invalid_id(self.line, self.id_field)),
        }
    }
}

/// A tokenized sentence ready to be indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: SentenceId,
    pub tokens: Vec<String>,
}

impl Sentence {
    pub fn new(id: SentenceId, tokens: Vec<String>) -> Self {
        Self { id, tokens }
    }
}
