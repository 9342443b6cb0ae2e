//! Recording [`TrackPublisher`] for forwarder tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::TrackRecord;
use crate::error::Result;
use crate::port::TrackPublisher;

/// A publisher with scripted results.
///
/// Each call to `send_position()` pops the next result from the queue
/// (defaults to `Ok(())` when exhausted). Accepted records are kept.
pub struct RecordingPublisher {
    results: Mutex<VecDeque<Result<()>>>,
    sent: Mutex<Vec<TrackRecord>>,
    attempts: AtomicU32,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            attempts: AtomicU32::new(0),
        }
    }

    pub fn with_results(self, results: Vec<Result<()>>) -> Self {
        *self.results.lock() = results.into();
        self
    }

    /// Records that were accepted.
    pub fn sent(&self) -> Vec<TrackRecord> {
        self.sent.lock().clone()
    }

    /// Number of publish calls, accepted or not.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for RecordingPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrackPublisher for RecordingPublisher {
    async fn send_position(&self, record: &TrackRecord) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let result = self.results.lock().pop_front().unwrap_or(Ok(()));
        if result.is_ok() {
            self.sent.lock().push(record.clone());
        }
        result
    }
}
