//! Bushtalk Radio REST API client.
//!
//! Two endpoints:
//! - `POST /api/authenticate` exchanges a username/password for a bearer token
//! - `POST /api/track` publishes one position report
//!
//! Every request carries the client identity headers the service uses to
//! tell simulator integrations apart.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{debug, info, warn};

use super::dto::{AuthRequest, AuthResponse, TrackPayload};
use crate::domain::TrackRecord;
use crate::error::{Result, TrackerError};
use crate::port::TrackPublisher;

/// Value of the `X-BTR-CLIENT-NAME` header.
pub const CLIENT_NAME: &str = "XPLANE-12";

/// Value of the `X-BTR-CLIENT-VERSION` header.
pub const CLIENT_VERSION: &str = "1.0.0";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CLIENT_NAME_HEADER: &str = "x-btr-client-name";
const CLIENT_VERSION_HEADER: &str = "x-btr-client-version";

/// HTTP client for the Bushtalk Radio API.
///
/// The bearer token outlives any simulator session; it is only replaced by
/// a new login or cleared on sign-out.
pub struct BushtalkClient {
    http: HttpClient,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl BushtalkClient {
    /// Create a client with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .default_headers(identity_headers())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Adopt a token, e.g. one persisted from an earlier login.
    ///
    /// An empty token clears authentication.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        *self.token.write() = (!token.is_empty()).then_some(token);
    }

    /// The current bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Log in and adopt the returned `id_token`.
    ///
    /// The full response is returned; only the id token is kept.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::AuthFailed`] on any status other than 200, or
    /// an HTTP/JSON error if the request or decoding fails.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/api/authenticate", self.base_url);
        info!(url = %url, username, "Authenticating");

        let response = self
            .http
            .post(&url)
            .json(&AuthRequest { username, password })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Authentication rejected");
            return Err(TrackerError::AuthFailed {
                status: status.as_u16(),
            }
            .into());
        }

        let auth: AuthResponse = response.json().await?;
        self.set_token(auth.id_token.clone());
        info!(user_id = %auth.user_id, "Authenticated");

        Ok(auth)
    }

    /// Publish one position report.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotAuthenticated`] without touching the
    /// network when no token is set, and [`TrackerError::PublishFailed`]
    /// for any status other than 200 or 201.
    pub async fn send_track(&self, payload: &TrackPayload) -> Result<()> {
        let token = self.token().ok_or(TrackerError::NotAuthenticated)?;

        let url = format!("{}/api/track", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(TrackerError::PublishFailed {
                status: status.as_u16(),
            }
            .into());
        }

        debug!(status = status.as_u16(), "Track accepted");
        Ok(())
    }
}

#[async_trait]
impl TrackPublisher for BushtalkClient {
    async fn send_position(&self, record: &TrackRecord) -> Result<()> {
        self.send_track(&TrackPayload::from(record)).await
    }
}

fn identity_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CLIENT_NAME_HEADER, HeaderValue::from_static(CLIENT_NAME));
    headers.insert(CLIENT_VERSION_HEADER, HeaderValue::from_static(CLIENT_VERSION));
    headers
}
