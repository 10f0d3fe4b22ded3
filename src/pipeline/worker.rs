//! Tokenizing workers.
//!
//! A worker turns raw [`Line`]s into [`Sentence`]s: it splits the record,
//! drops lines in other languages, resolves the sentence id and tokenizes the
//! text with the tokenizer it owns.

use std::ops::AddAssign;

use crossbeam_channel::{Receiver, Sender};
use log::debug;

use crate::analysis::tokenizer::{TokenizerFactory, TokenizerLease};
use crate::config::PipelineConfig;
use crate::corpus::{Line, Record, Sentence};
use crate::error::Result;
use crate::pipeline::control::PipelineControl;

/// Counters kept by one worker, or summed over all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Lines taken from the line queue.
    pub lines: u64,
    /// Sentences handed to the index builder.
    pub sentences: u64,
    /// Lines dropped because of their language tag.
    pub skipped: u64,
}

impl AddAssign for WorkerStats {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.sentences += other.sentences;
        self.skipped += other.skipped;
    }
}

/// Turn one line into a sentence.
///
/// Returns `Ok(None)` for records in another language. The language is
/// checked before the id, so a bad id in a skipped record is not an error.
pub fn process_line(
    line: &Line,
    config: &PipelineConfig,
    tokenizer: &TokenizerLease,
) -> Result<Option<Sentence>> {
    let record = Record::parse(line)?;
    if !record.is_language(&config.language) {
        return Ok(None);
    }

    let id = record.sentence_id(config.id_source)?;
    let tokens = tokenizer.words(record.text)?;

    Ok(Some(Sentence::new(id, tokens)))
}

/// One member of the worker pool.
pub(crate) struct Worker<'a, F: ?Sized> {
    name: String,
    config: &'a PipelineConfig,
    factory: &'a F,
}

impl<'a, F: TokenizerFactory + ?Sized> Worker<'a, F> {
    pub(crate) fn new(index: usize, config: &'a PipelineConfig, factory: &'a F) -> Self {
        Self {
            name: format!("lookup-worker-{index}"),
            config,
            factory,
        }
    }

    /// Process lines until the line queue is closed or the run is aborted.
    ///
    /// The tokenizer is acquired first and released when this returns.
    pub(crate) fn run(
        self,
        lines: Receiver<Line>,
        sentences: Sender<Sentence>,
        control: &PipelineControl,
    ) -> Result<WorkerStats> {
        let tokenizer = TokenizerLease::acquire(self.factory, &self.name)?;
        let mut stats = WorkerStats::default();

        for line in lines.iter() {
            if control.is_aborted() {
                debug!("{} stopping: pipeline aborted", self.name);
                break;
            }
            stats.lines += 1;

            match process_line(&line, self.config, &tokenizer)? {
                Some(sentence) => {
                    if sentences.send(sentence).is_err() {
                        debug!("{} stopping: index builder is gone", self.name);
                        break;
                    }
                    stats.sentences += 1;
                }
                None => stats.skipped += 1,
            }
        }

        debug!(
            "{} finished: {} lines, {} sentences, {} skipped",
            self.name, stats.lines, stats.sentences, stats.skipped
        );
        Ok(stats)
    }
}
