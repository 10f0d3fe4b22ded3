//! Shared run state of a pipeline.
//!
//! Every stage holds a reference to one [`PipelineControl`]. It records the
//! lifecycle state and the first fatal error raised by any stage; once that
//! happens the pipeline is aborted and the stages wind down.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use log::{debug, error};
use parking_lot::Mutex;

use crate::error::{LookupError, Result};

/// Lifecycle of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Reader and workers are active.
    Running,
    /// Every worker has exited; the index builder is finishing.
    Draining,
    /// The index has been delivered.
    Done,
    /// A fatal error stopped the run. No index is delivered.
    Aborted,
}

impl PipelineState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => PipelineState::Running,
            1 => PipelineState::Draining,
            2 => PipelineState::Done,
            _ => PipelineState::Aborted,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            PipelineState::Running => 0,
            PipelineState::Draining => 1,
            PipelineState::Done => 2,
            PipelineState::Aborted => 3,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Running => "running",
            PipelineState::Draining => "draining",
            PipelineState::Done => "done",
            PipelineState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// State and first-error slot shared by all stages of one run.
pub struct PipelineControl {
    state: AtomicU8,
    error: Mutex<Option<LookupError>>,
}

impl Default for PipelineControl {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineControl {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(PipelineState::Running.as_u8()),
            error: Mutex::new(None),
        }
    }

    pub fn state(&self) -> PipelineState {
        PipelineState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_aborted(&self) -> bool {
        self.state() == PipelineState::Aborted
    }

    /// Abort the run. Only the first error is kept.
    pub fn abort(&self, err: LookupError) {
        let mut slot = self.error.lock();
        if slot.is_none() {
            error!("aborting pipeline: {err}");
            *slot = Some(err);
        } else {
            debug!("ignoring error after abort: {err}");
        }
        self.state
            .store(PipelineState::Aborted.as_u8(), Ordering::Release);
    }

    /// Run a stage body, turning an error into an abort.
    pub fn guard<T>(&self, f: impl FnOnce() -> Result<T>) -> Option<T> {
        match f() {
            Ok(value) => Some(value),
            Err(err) => {
                self.abort(err);
                None
            }
        }
    }

    /// Move from `Running` to `Draining`.
    pub fn begin_draining(&self) -> bool {
        self.transition(PipelineState::Running, PipelineState::Draining)
    }

    /// Move from `Draining` to `Done`.
    pub fn finish(&self) -> bool {
        self.transition(PipelineState::Draining, PipelineState::Done)
    }

    /// Take the recorded error, if any.
    pub fn take_error(&self) -> Option<LookupError> {
        self.error.lock().take()
    }

    fn transition(&self, from: PipelineState, to: PipelineState) -> bool {
        let moved = self
            .state
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if moved {
            debug!("pipeline {from} -> {to}");
        }
        moved
    }
}

impl fmt::Debug for PipelineControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineControl")
            .field("state", &self.state())
            .finish()
    }
}
