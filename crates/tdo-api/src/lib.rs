//! # tdo-api
//!
//! HTTP client for the task service.
//!
//! Two endpoint families are used:
//! - REST reads (`/projects`, `/sections`, `/tasks`) returning whole
//!   collections
//! - the sync endpoint, which accepts a batch of typed write commands and
//!   reports a status per command
//!
//! Every request carries the configured timeout. Transient failures
//! (timeouts, connection errors, 429, 5xx) are retried with bounded
//! exponential backoff; sync commands keep their idempotency token across
//! retries.

pub mod commands;
pub mod rest;
pub mod sync;

mod error;
mod http;

pub use commands::{Command, SyncCommand};
pub use error::ApiError;
pub use rest::TaskQuery;
pub use sync::{CommandFailure, CommandResult, SyncOutcome};

use tdo_config::ApiSettings;
use tdo_core::Snapshot;

use crate::http::{backoff_delay, check_response};

const USER_AGENT: &str = concat!("tdo/", env!("CARGO_PKG_VERSION"));

/// Client for the task service's REST and sync endpoints.
pub struct TodoClient {
    http: reqwest::Client,
    token: String,
    rest_base_url: String,
    sync_base_url: String,
    timeout_secs: u64,
    max_retries: u32,
}

impl TodoClient {
    /// Build a client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` fails to
    /// build.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http,
            token: settings.token.clone(),
            rest_base_url: settings.rest_base_url.clone(),
            sync_base_url: settings.sync_base_url.clone(),
            timeout_secs: settings.timeout.as_secs(),
            max_retries: settings.max_retries,
        })
    }

    /// Fetch projects, sections, and tasks concurrently into one snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiError`] among the three reads.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, ApiError> {
        let query = TaskQuery::default();
        let (projects, sections, tasks) = tokio::try_join!(
            self.list_projects(),
            self.list_sections(None),
            self.list_tasks(&query),
        )?;
        tracing::debug!(
            projects = projects.len(),
            sections = sections.len(),
            tasks = tasks.len(),
            "fetched snapshot"
        );
        Ok(Snapshot::new(projects, sections, tasks))
    }

    /// Submit commands to the sync endpoint.
    ///
    /// Commands are sent in order, at most
    /// [`sync::MAX_COMMANDS_PER_REQUEST`] per request. A rejected command does
    /// not stop the others; inspect the returned [`SyncOutcome`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if a request fails as a whole. Chunks submitted
    /// before the failing one stay applied; their count is logged.
    pub async fn submit(&self, commands: &[SyncCommand]) -> Result<SyncOutcome, ApiError> {
        let mut outcome = SyncOutcome::default();
        let url = format!("{}/sync", self.sync_base_url);

        for (index, chunk) in commands.chunks(sync::MAX_COMMANDS_PER_REQUEST).enumerate() {
            let body = sync::encode_commands(chunk)?;
            let label = format!("POST /sync ({} commands)", chunk.len());
            let request = self.execute(&label, || {
                self.http
                    .post(&url)
                    .header(
                        reqwest::header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(body.clone())
            });
            let response = match request.await {
                Ok(response) => response,
                Err(error) => {
                    let applied = index * sync::MAX_COMMANDS_PER_REQUEST;
                    if applied > 0 {
                        tracing::error!(applied, %error, "sync request failed after earlier chunks were applied");
                    }
                    return Err(error);
                }
            };
            outcome.extend(sync::parse_outcome(&response, chunk)?);
        }

        Ok(outcome)
    }

    /// GET a REST path (with query string) and return the body.
    async fn get(&self, path: &str) -> Result<String, ApiError> {
        let url = format!("{}{path}", self.rest_base_url);
        self.execute(&format!("GET {path}"), || self.http.get(&url))
            .await
    }

    /// Send a request, retrying transient failures up to `max_retries`.
    async fn execute<F>(&self, label: &str, build: F) -> Result<String, ApiError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            match self.attempt(label, &build).await {
                Ok(body) => return Ok(body),
                Err(error) if attempt < self.max_retries && error.is_transient() => {
                    let delay = backoff_delay(attempt, &error);
                    tracing::warn!(
                        request = label,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn attempt<F>(&self, label: &str, build: &F) -> Result<String, ApiError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        tracing::debug!(request = label, "sending request");
        let resp = build()
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| self.transport_error(label, e))?;
        let resp = check_response(resp).await?;
        resp.text()
            .await
            .map_err(|e| self.transport_error(label, e))
    }

    fn transport_error(&self, label: &str, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout {
                request: label.to_string(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            ApiError::Http(error)
        }
    }
}
