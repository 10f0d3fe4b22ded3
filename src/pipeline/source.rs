//! Reading numbered lines from the input.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crossbeam_channel::Sender;
use log::debug;

use crate::corpus::Line;
use crate::error::{LookupError, Result};
use crate::pipeline::control::PipelineControl;

/// A one-shot source of numbered input lines.
///
/// Lines are numbered from 1. `\n` and `\r\n` terminators are stripped.
pub struct LineSource<R> {
    reader: R,
}

impl LineSource<BufReader<File>> {
    /// Open a file as a line source.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LookupError::input_open(path, e))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Iterate over the lines. A read failure is reported with the number
    /// of the line that could not be read.
    pub fn lines(self) -> Lines<R> {
        Lines {
            inner: self.reader.lines(),
            number: 0,
        }
    }

    /// Push every line into `queue`, then close it by dropping the sender.
    ///
    /// Stops early when the pipeline is aborted or every receiver is gone.
    /// A read failure aborts the pipeline before the queue is closed, so
    /// no stage ever sees a clean end of input after a failed read.
    /// Returns the number of lines handed to the queue.
    pub(crate) fn feed(self, queue: Sender<Line>, control: &PipelineControl) -> u64 {
        let mut sent = 0;
        for line in self.lines() {
            if control.is_aborted() {
                debug!("line source stopping after {sent} lines: pipeline aborted");
                break;
            }
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    control.abort(err);
                    break;
                }
            };
            if queue.send(line).is_err() {
                debug!("line source stopping after {sent} lines: no workers left");
                break;
            }
            sent += 1;
        }
        debug!("line source finished, {sent} lines read");
        sent
    }
}

/// Iterator returned by [`LineSource::lines`].
pub struct Lines<R> {
    inner: io::Lines<R>,
    number: u64,
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.next()?;
        self.number += 1;
        Some(match next {
            Ok(content) => Ok(Line::new(self.number, content)),
            Err(e) => Err(LookupError::input_read(self.number, e)),
        })
    }
}
