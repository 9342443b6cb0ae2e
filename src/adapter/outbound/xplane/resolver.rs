//! Dataref id resolution over the X-Plane REST API.
//!
//! X-Plane assigns dataref ids per simulator session, so the WebSocket
//! subscription cannot use names directly. Each required dataref is looked
//! up with `GET /api/v3/datarefs?filter[name]=<name>` before dialing.

use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};

use super::dto::DatarefResponse;
use crate::domain::{DatarefId, Instrument, InstrumentMap};
use crate::error::ResolveError;

/// Longest response body excerpt included in logs.
const BODY_PREVIEW_LEN: usize = 200;

/// Resolves dataref names to session ids, one request at a time.
pub struct DatarefResolver {
    http: HttpClient,
    /// REST base, e.g. `http://localhost:8086`.
    base_url: String,
}

impl DatarefResolver {
    /// Create a resolver with a per-request timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve every instrument, in order.
    ///
    /// All-or-nothing: the first failure aborts the pass and no partial map
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolveError`], naming the dataref that failed.
    pub async fn resolve_all(&self, instruments: &[Instrument]) -> Result<InstrumentMap, ResolveError> {
        let mut map = InstrumentMap::new();
        for &instrument in instruments {
            let id = self.resolve(instrument).await?;
            map.insert(instrument, id);
        }
        info!(count = map.len(), "Resolved dataref ids");
        Ok(map)
    }

    /// Resolve a single instrument, taking the first matching record.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-200 responses, undecodable bodies and
    /// empty result sets.
    pub async fn resolve(&self, instrument: Instrument) -> Result<DatarefId, ResolveError> {
        let dataref = instrument.dataref();
        // X-Plane does not accept percent-encoded brackets in the filter key.
        let url = format!("{}/api/v3/datarefs?filter[name]={}", self.base_url, dataref);

        debug!(url = %url, "Requesting dataref");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ResolveError::Request { dataref, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(BODY_PREVIEW_LEN).collect();
            warn!(dataref, status = status.as_u16(), body = %preview, "Dataref lookup rejected");
            return Err(ResolveError::Status {
                dataref,
                status: status.as_u16(),
            });
        }

        let body: DatarefResponse = response
            .json()
            .await
            .map_err(|source| ResolveError::Request { dataref, source })?;

        body.data
            .first()
            .map(|info| DatarefId::new(info.id))
            .ok_or(ResolveError::NotFound { dataref })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let resolver = DatarefResolver::new("http://localhost:8086/", Duration::from_secs(5));
        assert_eq!(resolver.base_url, "http://localhost:8086");
    }

    #[tokio::test]
    async fn unreachable_simulator_fails_with_first_dataref() {
        // Port 9 (discard) on loopback is not expected to accept HTTP.
        let resolver = DatarefResolver::new("http://127.0.0.1:9", Duration::from_millis(200));

        let err = resolver.resolve_all(&Instrument::ALL).await.unwrap_err();

        assert_eq!(err.dataref(), Instrument::Latitude.dataref());
        assert!(matches!(err, ResolveError::Request { .. }));
    }
}
