//! Tokenizer implementations for sentence analysis.
//!
//! Tokenizers turn the text of a sentence into a stream of [`Token`]s. The
//! pipeline never shares a tokenizer between threads: every worker asks a
//! [`TokenizerFactory`] for its own instance and holds it in a
//! [`TokenizerLease`] until the worker exits.
//!
//! # Available Tokenizers
//!
//! - [`lindera::LinderaTokenizer`] - Japanese morphological analysis with lemmas
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//!
//! # Examples
//!
//! ```
//! use sentence_lookup::analysis::tokenizer::{Tokenizer, TokenizerFactory};
//! use sentence_lookup::analysis::tokenizer::whitespace::WhitespaceTokenizerFactory;
//!
//! let factory = WhitespaceTokenizerFactory;
//! let tokenizer = factory.create().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("I like cats").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! ```

use std::fmt;
use std::ops::Deref;

use log::debug;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// Instances are owned by a single worker, so only `Send` is required.
pub trait Tokenizer: Send {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for logging and configuration).
    fn name(&self) -> &'static str;
}

/// Creates tokenizer instances, one per worker.
///
/// The factory itself is shared by all workers for the duration of a run.
pub trait TokenizerFactory: Send + Sync {
    /// Initialize a new tokenizer instance.
    fn create(&self) -> Result<Box<dyn Tokenizer>>;

    /// Name of the tokenizers this factory produces.
    fn name(&self) -> &'static str;
}

impl<F: TokenizerFactory + ?Sized> TokenizerFactory for &F {
    fn create(&self) -> Result<Box<dyn Tokenizer>> {
        (**self).create()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// A tokenizer acquired for the lifetime of one pipeline worker.
///
/// The tokenizer is released when the lease is dropped, which happens on
/// every exit path of the worker, including errors and unwinding.
pub struct TokenizerLease {
    inner: Box<dyn Tokenizer>,
    owner: String,
}

impl TokenizerLease {
    /// Acquire a tokenizer from the factory on behalf of `owner`.
    pub fn acquire<F: TokenizerFactory + ?Sized>(factory: &F, owner: &str) -> Result<Self> {
        let inner = factory.create()?;
        debug!("{owner} acquired {} tokenizer", inner.name());
        Ok(Self {
            inner,
            owner: owner.to_string(),
        })
    }

    /// Tokenize the text and keep only the normalized forms of word tokens.
    ///
    /// Boundary sentinels are dropped.
    pub fn words(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .inner
            .tokenize(text)?
            .filter(|token: &Token| !token.is_boundary())
            .map(Token::into_normalized)
            .collect())
    }
}

impl Deref for TokenizerLease {
    type Target = dyn Tokenizer;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl Drop for TokenizerLease {
    fn drop(&mut self) {
        debug!("{} released {} tokenizer", self.owner, self.inner.name());
    }
}

impl fmt::Debug for TokenizerLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerLease")
            .field("tokenizer", &self.inner.name())
            .field("owner", &self.owner)
            .finish()
    }
}

// Individual tokenizer modules
pub mod lindera;
pub mod whitespace;

// Re-export all tokenizers for convenient access
pub use lindera::{LinderaTokenizer, LinderaTokenizerFactory};
pub use whitespace::{WhitespaceTokenizer, WhitespaceTokenizerFactory};
