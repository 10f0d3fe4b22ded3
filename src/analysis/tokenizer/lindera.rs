use std::borrow::Cow;
use std::str::FromStr;

use lindera::dictionary::{load_dictionary, load_user_dictionary};
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;
use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenStream};
use crate::error::{LookupError, Result};

use super::{Tokenizer, TokenizerFactory};

/// Dictionary used when none is configured.
pub const DEFAULT_DICTIONARY: &str = "embedded://ipadic";

/// Column of the IPADIC feature string that holds the base form.
pub const IPADIC_LEMMA_FIELD: usize = 6;

/// Settings needed to initialize a Lindera segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinderaSettings {
    /// Segmentation mode ("normal" or "decompose")
    pub mode: String,

    /// Dictionary URI (`embedded://…`) or path
    pub dictionary: String,

    /// Optional user dictionary URI or path
    pub user_dictionary: Option<String>,

    /// Index of the lemma column in the token details
    pub lemma_field: usize,
}

impl Default for LinderaSettings {
    fn default() -> Self {
        Self {
            mode: "normal".to_string(),
            dictionary: DEFAULT_DICTIONARY.to_string(),
            user_dictionary: None,
            lemma_field: IPADIC_LEMMA_FIELD,
        }
    }
}

pub struct LinderaTokenizer {
    inner: Segmenter,
    lemma_field: usize,
}

impl LinderaTokenizer {
    /// Create a new Lindera tokenizer.
    pub fn new(settings: &LinderaSettings) -> Result<Self> {
        let mode = Mode::from_str(&settings.mode).map_err(|e| {
            LookupError::analysis(format!("Invalid mode '{}': {}", settings.mode, e))
        })?;
        let dict = load_dictionary(&settings.dictionary).map_err(|e| {
            let mut msg = format!("Failed to load dictionary '{}': {}", settings.dictionary, e);
            if settings.dictionary == DEFAULT_DICTIONARY && !cfg!(feature = "embedded-ipadic") {
                msg.push_str(
                    " (this build has no embedded IPADIC; enable the `embedded-ipadic` feature or pass a dictionary path)",
                );
            }
            LookupError::analysis(msg)
        })?;
        let metadata = &dict.metadata;
        let user_dict = match settings.user_dictionary.as_deref() {
            Some(uri) => Some(load_user_dictionary(uri, metadata).map_err(|e| {
                LookupError::analysis(format!("Failed to load user dictionary '{uri}': {e}"))
            })?),
            None => None,
        };
        let inner = Segmenter::new(mode, dict, user_dict);

        Ok(Self {
            inner,
            lemma_field: settings.lemma_field,
        })
    }
}

impl Tokenizer for LinderaTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();

        for (position, mut token) in self
            .inner
            .segment(Cow::Borrowed(text))
            .map_err(|e| LookupError::analysis(format!("Failed to segment text: {}", e)))?
            .into_iter()
            .enumerate()
        {
            // Unknown words may carry fewer columns than the dictionary's own entries.
            let lemma = token.details().get(self.lemma_field).map(|s| s.to_string());
            let mut converted = Token::new(token.surface, position);
            converted.lemma = lemma;
            tokens.push(converted);
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}

/// Builds one [`LinderaTokenizer`] per worker from shared settings.
#[derive(Debug, Clone, Default)]
pub struct LinderaTokenizerFactory {
    settings: LinderaSettings,
}

impl LinderaTokenizerFactory {
    pub fn new(settings: LinderaSettings) -> Self {
        Self { settings }
    }}

impl TokenizerFactory for LinderaTokenizerFactory {
    fn create(&self) -> Result<Box<dyn Tokenizer>> {
        Ok(Box::new(LinderaTokenizer::new(&self.settings)?))
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}
