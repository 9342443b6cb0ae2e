//! Tracker port for publishing position reports.

use async_trait::async_trait;

use crate::domain::TrackRecord;
use crate::error::Result;

/// Delivers position reports to the flight tracking service.
#[async_trait]
pub trait TrackPublisher: Send + Sync {
    /// Publish one position report.
    ///
    /// # Errors
    ///
    /// Returns an error if the publisher is not authenticated, the request
    /// cannot be delivered, or the service rejects it.
    async fn send_position(&self, record: &TrackRecord) -> Result<()>;
}
