//! The concurrent indexing pipeline.
//!
//! ```text
//! input ─▶ LineSource ─▶ [lines] ─▶ Worker × N ─▶ [sentences] ─▶ IndexBuilder ─▶ [result]
//!                                        │                ▲
//!                                        └─ join ─ ShutdownCoordinator (closes queue)
//! ```
//!
//! Every stage runs on its own named thread inside a [`std::thread::scope`].
//! The two queues are bounded `crossbeam-channel`s; with the default capacity
//! of zero they are rendezvous channels, so the reader cannot get ahead of
//! the workers and the workers cannot get ahead of the index builder.
//!
//! The first fatal error raised anywhere aborts the run: the reader stops
//! feeding, workers stop at their next line, the index builder withholds its
//! result and [`Pipeline::run`] returns that error.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! use sentence_lookup::analysis::tokenizer::whitespace::WhitespaceTokenizerFactory;
//! use sentence_lookup::config::PipelineConfig;
//! use sentence_lookup::pipeline::{LineSource, Pipeline};
//!
//! let input = "1\tjpn\t猫 が 好き\n2\teng\tI like cats\n3\tjpn\t猫\n";
//! let pipeline = Pipeline::new(
//!     PipelineConfig::new().with_workers(2).with_sort_ids(true),
//!     WhitespaceTokenizerFactory,
//! )
//! .unwrap();
//!
//! let output = pipeline.run(LineSource::new(Cursor::new(input))).unwrap();
//! assert_eq!(output.index.get("猫"), Some(&[1, 3][..]));
//! assert!(!output.index.contains("cats"));
//! assert_eq!(output.stats.lines_read, 3);
//! ```

pub mod aggregator;
pub mod control;
pub mod coordinator;
pub mod source;
pub mod worker;

use std::io::BufRead;
use std::path::Path;
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::bounded;
use log::info;

use crate::analysis::tokenizer::TokenizerFactory;
use crate::config::PipelineConfig;
use crate::corpus::{Line, Sentence};
use crate::error::{LookupError, Result};
use crate::index::InvertedIndex;
use crate::pipeline::aggregator::{BuildResult, IndexBuilder};
use crate::pipeline::coordinator::ShutdownCoordinator;
use crate::pipeline::worker::{Worker, WorkerStats};

pub use control::{PipelineControl, PipelineState};
pub use source::LineSource;
pub use worker::process_line;

/// Counters for one completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    /// Lines read from the input.
    pub lines_read: u64,
    /// Sentences that made it into the index.
    pub sentences_indexed: u64,
    /// Lines dropped because of their language tag.
    pub lines_skipped: u64,
    /// (word, id) occurrences in the index.
    pub postings: u64,
    /// Distinct words in the index.
    pub words: usize,
    /// Size of the worker pool.
    pub workers: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// The finished index and the counters of the run that built it.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub index: InvertedIndex,
    pub stats: PipelineStats,
}

/// A configured indexing pipeline.
pub struct Pipeline<F> {
    config: PipelineConfig,
    factory: F,
}

impl<F: TokenizerFactory> Pipeline<F> {
    /// Create a pipeline. The configuration is validated here.
    pub fn new(config: PipelineConfig, factory: F) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, factory })
    }

    /// Open `path` and run the pipeline over it.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<PipelineOutput> {
        self.run(LineSource::open(path)?)
    }

    /// Run the pipeline over `source` and return the finished index.
    pub fn run<R: BufRead + Send>(&self, source: LineSource<R>) -> Result<PipelineOutput> {
        let start = Instant::now();
        let control = PipelineControl::new();
        let worker_count = self.config.workers;
        let capacity = self.config.channel_capacity;

        info!(
            "indexing '{}' sentences with {} {} workers",
            self.config.language,
            worker_count,
            self.factory.name()
        );

        let (line_tx, line_rx) = bounded::<Line>(capacity);
        let (sentence_tx, sentence_rx) = bounded::<Sentence>(capacity);
        let (result_tx, result_rx) = bounded::<BuildResult>(1);

        let (delivered, lines_read, worker_stats) = thread::scope(|scope| -> Result<_> {
            let control = &control;

            let reader = spawn_stage(scope, "lookup-reader".to_string(), control, move || {
                source.feed(line_tx, control)
            })?;

            let mut workers = Vec::with_capacity(worker_count);
            for i in 0..worker_count {
                let lines = line_rx.clone();
                let sentences = sentence_tx.clone();
                let worker = Worker::new(i, &self.config, &self.factory);
                workers.push(spawn_stage(
                    scope,
                    format!("lookup-worker-{i}"),
                    control,
                    move || control.guard(|| worker.run(lines, sentences, control)),
                )?);
            }
            drop(line_rx);

            let coordinator = spawn_stage(
                scope,
                "lookup-coordinator".to_string(),
                control,
                move || ShutdownCoordinator::new(workers).run(sentence_tx, control),
            )?;

            let builder = IndexBuilder::new(self.config.sort_ids);
            let indexer = spawn_stage(scope, "lookup-indexer".to_string(), control, move || {
                builder.run(sentence_rx, result_tx, control)
            })?;

            let delivered = result_rx.recv().ok();

            let lines_read = join_stage(reader, control);
            let worker_stats = join_stage(coordinator, control);
            join_stage(indexer, control);

            Ok((delivered, lines_read, worker_stats))
        })?;

        if let Some(err) = control.take_error() {
            return Err(err);
        }
        let (index, aggregate) = delivered.ok_or_else(|| {
            LookupError::internal("index builder finished without delivering an index")
        })?;
        let worker_stats: WorkerStats = worker_stats.unwrap_or_default();

        let stats = PipelineStats {
            lines_read: lines_read.unwrap_or_default(),
            sentences_indexed: aggregate.sentences,
            lines_skipped: worker_stats.skipped,
            postings: aggregate.postings,
            words: index.len(),
            workers: worker_count,
            elapsed: start.elapsed(),
        };
        info!(
            "pipeline {}: {} lines, {} sentences, {} words in {:?}",
            control.state(),
            stats.lines_read,
            stats.sentences_indexed,
            stats.words,
            stats.elapsed
        );

        Ok(PipelineOutput { index, stats })
    }
}

/// Spawn a named stage thread. A spawn failure aborts the run.
fn spawn_stage<'scope, 'env, T, F>(
    scope: &'scope Scope<'scope, 'env>,
    name: String,
    control: &PipelineControl,
    f: F,
) -> Result<ScopedJoinHandle<'scope, T>>
where
    F: FnOnce() -> T + Send + 'scope,
    T: Send + 'scope,
{
    thread::Builder::new()
        .name(name.clone())
        .spawn_scoped(scope, f)
        .map_err(|e| {
            let msg = format!("failed to spawn {name}: {e}");
            control.abort(LookupError::internal(msg.clone()));
            LookupError::internal(msg)
        })
}

/// Join a stage thread. A panic aborts the run.
fn join_stage<T>(handle: ScopedJoinHandle<'_, T>, control: &PipelineControl) -> Option<T> {
    let name = handle.thread().name().unwrap_or("stage").to_string();
    match handle.join() {
        Ok(value) => Some(value),
        Err(_) => {
            control.abort(LookupError::thread_join(format!("{name} panicked")));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::analysis::token::{Token, TokenKind, TokenStream};
    use crate::analysis::tokenizer::Tokenizer;
    use crate::analysis::tokenizer::whitespace::WhitespaceTokenizerFactory;
    use crate::config::IdSource;

    fn run(input: &str, config: PipelineConfig) -> Result<PipelineOutput> {
        Pipeline::new(config, WhitespaceTokenizerFactory)?.run(LineSource::new(Cursor::new(input)))
    }

    struct FailingFactory;

    impl TokenizerFactory for FailingFactory {
        fn create(&self) -> Result<Box<dyn Tokenizer>> {
            Err(LookupError::analysis("no dictionary"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// Emits sentinels around every sentence and a wildcard lemma on words.
    struct MecabLikeTokenizer;

    impl Tokenizer for MecabLikeTokenizer {
        fn tokenize(&self, text: &str) -> Result<TokenStream> {
            let mut tokens = vec![Token::sentinel(TokenKind::SentenceStart, 0)];
            for (i, word) in text.split_whitespace().enumerate() {
                let token = Token::new(word, i + 1);
                tokens.push(match word.strip_suffix("た") {
                    Some(stem) => token.with_lemma(format!("{stem}る")),
                    None => token.with_lemma("*"),
                });
            }
            tokens.push(Token::sentinel(TokenKind::SentenceEnd, tokens.len()));
            Ok(Box::new(tokens.into_iter()))
        }

        fn name(&self) -> &'static str {
            "mecab-like"
        }
    }

    struct MecabLikeFactory;

    impl TokenizerFactory for MecabLikeFactory {
        fn create(&self) -> Result<Box<dyn Tokenizer>> {
            Ok(Box::new(MecabLikeTokenizer))
        }

        fn name(&self) -> &'static str {
            "mecab-like"
        }
    }

    /// Counts tokenizers created and dropped; panics on the word "boom".
    #[derive(Clone, Default)]
    struct CountingFactory {
        created: Arc<AtomicUsize>,
        dropped: Arc<AtomicUsize>,
    }

    struct CountingTokenizer {
        dropped: Arc<AtomicUsize>,
    }

    impl Drop for CountingTokenizer {
        fn drop(&mut self) {
            self.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Tokenizer for CountingTokenizer {
        fn tokenize(&self, text: &str) -> Result<TokenStream> {
            if text.contains("boom") {
                panic!("tokenizer blew up on '{text}'");
            }
            let tokens: Vec<Token> = text
                .split_whitespace()
                .enumerate()
                .map(|(i, word)| Token::new(word, i))
                .collect();
            Ok(Box::new(tokens.into_iter()))
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    impl TokenizerFactory for CountingFactory {
        fn create(&self) -> Result<Box<dyn Tokenizer>> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingTokenizer {
                dropped: Arc::clone(&self.dropped),
            }))
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn numbered_lines(range: std::ops::Range<usize>) -> String {
        range.map(|i| format!("{i}\tjpn\tw{} common\n", i % 11)).collect()
    }

    #[test]
    fn test_empty_input() {
        let output = run("", PipelineConfig::new().with_workers(3)).unwrap();
        assert!(output.index.is_empty());
        assert_eq!(output.stats.lines_read, 0);
        assert_eq!(output.stats.sentences_indexed, 0);
    }

    #[test]
    fn test_field_and_line_ids() {
        let input = "5\tjpn\t猫 が 好き\n6\teng\tI like cats";

        let output = run(input, PipelineConfig::new().with_workers(2)).unwrap();
        assert_eq!(output.index.len(), 3);
        for word in ["猫", "が", "好き"] {
            assert_eq!(output.index.get(word), Some(&[5][..]));
        }

        let output = run(
            input,
            PipelineConfig::new()
                .with_workers(2)
                .with_id_source(IdSource::LineNumber),
        )
        .unwrap();
        assert_eq!(output.index.get("猫"), Some(&[0][..]));
        assert_eq!(output.stats.lines_skipped, 1);
    }

    #[test]
    fn test_malformed_record_aborts() {
        let input = "1\tjpn\ta\n2\tjpn\n3\tjpn\tb\n";
        let err = run(input, PipelineConfig::new().with_workers(4)).unwrap_err();
        assert!(matches!(err, LookupError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_tokenizer_init_failure_aborts() {
        let pipeline = Pipeline::new(PipelineConfig::new().with_workers(2), FailingFactory).unwrap();
        let err = pipeline
            .run(LineSource::new(Cursor::new("1\tjpn\ta\n")))
            .unwrap_err();
        assert!(matches!(err, LookupError::Analysis(_)));
    }

    #[test]
    fn test_sentinels_and_wildcards() {
        let pipeline = Pipeline::new(PipelineConfig::new().with_workers(1), MecabLikeFactory).unwrap();
        let output = pipeline
            .run(LineSource::new(Cursor::new("7\tjpn\t食べた パン\n")))
            .unwrap();

        assert_eq!(output.index.get("食べる"), Some(&[7][..]));
        assert_eq!(output.index.get("パン"), Some(&[7][..]));
        assert!(!output.index.contains(""));
        assert!(!output.index.contains("*"));
        assert_eq!(output.index.len(), 2);
    }

    #[test]
    fn test_buffered_channels() {
        let input: String = (0..200).map(|i| format!("{i}\tjpn\tw{} common\n", i % 7)).collect();
        let output = run(
            &input,
            PipelineConfig::new()
                .with_workers(4)
                .with_channel_capacity(32)
                .with_sort_ids(true),
        )
        .unwrap();

        let common = output.index.get("common").unwrap();
        assert_eq!(common.len(), 200);
        assert!(common.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(output.stats.postings, 400);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Pipeline::new(PipelineConfig::new().with_workers(0), WhitespaceTokenizerFactory).is_err());
    }

    #[test]
    fn test_tokenizers_released_after_error() {
        let mut input = numbered_lines(1..201);
        input.push_str("bad\n");
        input.push_str(&numbered_lines(202..400));

        let factory = CountingFactory::default();
        let pipeline = Pipeline::new(PipelineConfig::new().with_workers(8), factory.clone()).unwrap();
        let err = pipeline
            .run(LineSource::new(Cursor::new(input)))
            .unwrap_err();

        assert!(matches!(err, LookupError::MalformedRecord { line: 201, .. }));
        assert_eq!(factory.created.load(Ordering::SeqCst), 8);
        assert_eq!(factory.dropped.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_worker_panic_becomes_error() {
        let mut input = numbered_lines(1..50);
        input.push_str("50\tjpn\tboom\n");
        input.push_str(&numbered_lines(51..100));

        let factory = CountingFactory::default();
        let pipeline = Pipeline::new(PipelineConfig::new().with_workers(3), factory.clone()).unwrap();
        let result = pipeline.run(LineSource::new(Cursor::new(input)));

        match result {
            Err(LookupError::ThreadJoin(stage)) => assert!(stage.contains("panicked")),
            other => panic!("expected a thread join error, got {other:?}"),
        }
        assert_eq!(
            factory.created.load(Ordering::SeqCst),
            factory.dropped.load(Ordering::SeqCst)
        );
    }

    #[test]
    fn test_read_failure_mid_input() {
        let data: &[u8] = b"1\tjpn\ta\n2\tjpn\t\xff\xfe\n3\tjpn\tc\n";
        let pipeline = Pipeline::new(
            PipelineConfig::new().with_workers(2),
            WhitespaceTokenizerFactory,
        )
        .unwrap();

        match pipeline.run(LineSource::new(Cursor::new(data))) {
            Err(LookupError::InputRead { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a read error, got {other:?}"),
        }
    }
}
