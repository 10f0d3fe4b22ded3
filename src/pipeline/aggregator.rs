//! Building the index from the sentence stream.

use crossbeam_channel::{Receiver, Sender};
use log::debug;

use crate::corpus::Sentence;
use crate::index::InvertedIndex;
use crate::pipeline::control::PipelineControl;

/// Counters kept by the index builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Sentences added to the index.
    pub sentences: u64,
    /// (word, id) occurrences added to the index.
    pub postings: u64,
}

/// What the index builder hands back through the result slot.
pub(crate) type BuildResult = (InvertedIndex, AggregateStats);

/// The single consumer of the sentence queue.
///
/// The index is owned by this value alone while it is being built, so no
/// locking is involved.
pub(crate) struct IndexBuilder {
    index: InvertedIndex,
    stats: AggregateStats,
    sort_ids: bool,
}

impl IndexBuilder {
    pub(crate) fn new(sort_ids: bool) -> Self {
        Self {
            index: InvertedIndex::new(),
            stats: AggregateStats::default(),
            sort_ids,
        }
    }

    fn add(&mut self, sentence: Sentence) {
        self.stats.sentences += 1;
        self.stats.postings += sentence.tokens.len() as u64;
        self.index.add_sentence(&sentence);
    }

    /// Drain the queue, then deliver the index once through `result`.
    ///
    /// Nothing is delivered if the run was aborted.
    pub(crate) fn run(
        mut self,
        sentences: Receiver<Sentence>,
        result: Sender<BuildResult>,
        control: &PipelineControl,
    ) {
        for sentence in sentences.iter() {
            self.add(sentence);
        }
        debug!(
            "sentence queue drained: {} sentences, {} words",
            self.stats.sentences,
            self.index.len()
        );

        if control.is_aborted() {
            debug!("index builder discarding result: pipeline aborted");
            return;
        }
        if self.sort_ids {
            self.index.sort_postings();
        }
        if control.finish() {
            // The slot holds one value and has exactly one sender, so this cannot block.
            let _ = result.send((self.index, self.stats));
        }
    }
}
