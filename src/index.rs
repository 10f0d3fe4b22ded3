//! The word to sentence-id lookup table.
//!
//! An [`InvertedIndex`] maps every normalized word form to the ids of the
//! sentences it occurs in. A word that occurs twice in one sentence lists
//! that sentence twice; list order is the order in which sentences were
//! added unless [`InvertedIndex::sort_postings`] is called.
//!
//! The index serializes as a single JSON object whose keys are emitted in
//! sorted order:
//!
//! ```
//! use sentence_lookup::corpus::Sentence;
//! use sentence_lookup::index::InvertedIndex;
//!
//! let mut index = InvertedIndex::new();
//! index.add_sentence(&Sentence::new(5, vec!["猫".into(), "好き".into()]));
//! index.add_sentence(&Sentence::new(9, vec!["猫".into()]));
//!
//! assert_eq!(index.get("猫"), Some(&[5, 9][..]));
//! assert_eq!(
//!     serde_json::to_string(&index).unwrap(),
//!     r#"{"好き":[5],"猫":[5,9]}"#
//! );
//! ```

pub mod writer;

use std::collections::{BTreeMap, HashMap};

use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::corpus::{Sentence, SentenceId};

/// In-memory inverted index from word to sentence ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: AHashMap<String, Vec<SentenceId>>,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` to the posting list of `word`.
    pub fn insert(&mut self, word: &str, id: SentenceId) {
        match self.postings.get_mut(word) {
            Some(ids) => ids.push(id),
            None => {
                self.postings.insert(word.to_string(), vec![id]);
            }
        }
    }

    /// Add every token of a sentence, repeats included, in token order.
    pub fn add_sentence(&mut self, sentence: &Sentence) {
        for word in &sentence.tokens {
            self.insert(word, sentence.id);
        }
    }

    /// Get the posting list of a word.
    pub fn get(&self, word: &str) -> Option<&[SentenceId]> {
        self.postings.get(word).map(Vec::as_slice)
    }

    /// Check if the index has an entry for a word.
    pub fn contains(&self, word: &str) -> bool {
        self.postings.contains_key(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total number of (word, id) occurrences.
    pub fn total_postings(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    /// Iterate over entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SentenceId])> {
        self.postings
            .iter()
            .map(|(word, ids)| (word.as_str(), ids.as_slice()))
    }

    /// Sort every posting list ascending.
    ///
    /// Duplicates are kept.
    pub fn sort_postings(&mut self) {
        for ids in self.postings.values_mut() {
            ids.sort_unstable();
        }
    }
}

impl Extend<Sentence> for InvertedIndex {
    fn extend<I: IntoIterator<Item = Sentence>>(&mut self, iter: I) {
        for sentence in iter {
            self.add_sentence(&sentence);
        }
    }
}

impl FromIterator<Sentence> for InvertedIndex {
    fn from_iter<I: IntoIterator<Item = Sentence>>(iter: I) -> Self {
        let mut index = InvertedIndex::new();
        index.extend(iter);
        index
    }
}

impl Serialize for InvertedIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, &Vec<SentenceId>> = self
            .postings
            .iter()
            .map(|(word, ids)| (word.as_str(), ids))
            .collect();
        sorted.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InvertedIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = HashMap::<String, Vec<SentenceId>>::deserialize(deserializer)?;
        Ok(Self {
            postings: map.into_iter().collect(),
        })
    }
}
