//! Closing the sentence queue once every worker is done.

use std::thread::ScopedJoinHandle;

use crossbeam_channel::Sender;
use log::debug;

use crate::corpus::Sentence;
use crate::error::LookupError;
use crate::pipeline::control::PipelineControl;
use crate::pipeline::worker::WorkerStats;

/// Waits for the worker pool and then closes the sentence queue.
///
/// The coordinator owns the last sender of the sentence queue. Dropping it
/// after all workers have been joined is what lets the index builder's
/// receive loop end.
pub(crate) struct ShutdownCoordinator<'scope> {
    workers: Vec<ScopedJoinHandle<'scope, Option<WorkerStats>>>,
}

impl<'scope> ShutdownCoordinator<'scope> {
    pub(crate) fn new(workers: Vec<ScopedJoinHandle<'scope, Option<WorkerStats>>>) -> Self {
        Self { workers }
    }

    /// Join all workers, close the queue and return the summed counters.
    pub(crate) fn run(self, sentences: Sender<Sentence>, control: &PipelineControl) -> WorkerStats {
        let mut total = WorkerStats::default();

        for handle in self.workers {
            let name = handle
                .thread()
                .name()
                .unwrap_or("lookup-worker")
                .to_string();
            match handle.join() {
                Ok(Some(stats)) => total += stats,
                // The worker already recorded its error.
                Ok(None) => {}
                Err(_) => control.abort(LookupError::thread_join(format!("{name} panicked"))),
            }
        }

        control.begin_draining();
        drop(sentences);
        debug!("all workers finished, sentence queue closed");

        total
    }
}
