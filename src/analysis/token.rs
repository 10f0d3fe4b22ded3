//! Token types produced by tokenizers.
//!
//! A [`Token`] carries the literal surface text, the normalized (lemma) form
//! when the tokenizer knows one, and a [`TokenKind`] that marks sentence
//! boundary sentinels. Index building only ever looks at
//! [`Token::normalized`], which falls back to the surface form whenever the
//! lemma is missing or is the [`WILDCARD`] placeholder.
//!
//! # Examples
//!
//! ```
//! use sentence_lookup::analysis::token::Token;
//!
//! let token = Token::new("食べた", 0).with_lemma("食べる");
//! assert_eq!(token.normalized(), "食べる");
//!
//! let unknown = Token::new("ニャー", 1).with_lemma("*");
//! assert_eq!(unknown.normalized(), "ニャー");
//! ```

use serde::{Deserialize, Serialize};

/// Placeholder that morphological dictionaries use for an unknown field.
pub const WILDCARD: &str = "*";

/// Classification of a token in the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenKind {
    /// A regular word.
    #[default]
    Word,
    /// Beginning-of-sentence sentinel
    SentenceStart,
    /// End-of-sentence sentinel
    SentenceEnd,
}

/// A single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text exactly as it appears in the input
    pub surface: String,

    /// The dictionary form, if the tokenizer reports one
    pub lemma: Option<String>,

    /// The position of the token in the stream (0-based)
    pub position: usize,

    /// Whether this is a word or a boundary sentinel
    pub kind: TokenKind,
}

/// A boxed iterator of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

impl Token {
    /// Create a new word token with no lemma.
    pub fn new<S: Into<String>>(surface: S, position: usize) -> Self {
        Token {
            surface: surface.into(),
            lemma: None,
            position,
            kind: TokenKind::Word,
        }
    }

    /// Create a boundary sentinel token.
    pub fn sentinel(kind: TokenKind, position: usize) -> Self {
        Token {
            surface: String::new(),
            lemma: None,
            position,
            kind,
        }
    }

    /// Attach a lemma to this token.
    pub fn with_lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Check if this token is a sentence boundary sentinel.
    pub fn is_boundary(&self) -> bool {
        !matches!(self.kind, TokenKind::Word)
    }

    /// The normalized form, or the surface form when no usable lemma exists.
    pub fn normalized(&self) -> &str {
        match self.lemma.as_deref() {
            Some(lemma) if !lemma.is_empty() && lemma != WILDCARD => lemma,
            _ => &self.surface,
        }
    }

    /// Consume the token and return its normalized form.
    pub fn into_normalized(self) -> String {
        match self.lemma {
            Some(lemma) if !lemma.is_empty() && lemma != WILDCARD => lemma,
            _ => self.surface,
        }
    }
}
