//! Sync endpoint: batched command submission and per-command status.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tdo_core::entities::id::RawId;

use crate::commands::SyncCommand;
use crate::error::ApiError;
use crate::http::decode;

/// Most commands the service accepts in one request.
pub const MAX_COMMANDS_PER_REQUEST: usize = 100;

#[derive(Debug, Deserialize)]
struct SyncResponse {
    #[serde(default)]
    sync_status: HashMap<String, RawStatus>,
    #[serde(default)]
    temp_id_mapping: HashMap<String, RawId>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Text(String),
    Failed {
        #[serde(default)]
        error_code: Option<i64>,
        #[serde(default)]
        error: Option<String>,
    },
}

/// Why the service rejected one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandFailure {
    pub code: Option<i64>,
    pub message: String,
}

/// Status of one submitted command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Record the command acted on, or the id it created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandFailure>,
}

/// Results of a submission, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub results: Vec<CommandResult>,
}

impl SyncOutcome {
    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.results.iter().all(|result| result.ok)
    }

    #[must_use]
    pub fn failed(&self) -> Vec<&CommandResult> {
        self.results.iter().filter(|result| !result.ok).collect()
    }

    /// `Ok` when every command was applied.
    ///
    /// # Errors
    ///
    /// [`ApiError::CommandFailed`] with the failure count otherwise.
    pub fn ensure_ok(&self) -> Result<(), ApiError> {
        let failed = self.failed().len();
        if failed == 0 {
            Ok(())
        } else {
            Err(ApiError::CommandFailed {
                failed,
                total: self.results.len(),
            })
        }
    }

    /// Id created by the command with `uuid`, if any.
    #[must_use]
    pub fn created_id(&self, uuid: &uuid::Uuid) -> Option<&str> {
        let uuid = uuid.to_string();
        self.results
            .iter()
            .find(|result| result.uuid == uuid)
            .and_then(|result| result.id.as_deref())
    }

    pub(crate) fn extend(&mut self, other: Self) {
        self.results.extend(other.results);
    }
}

/// Form body for one sync request.
pub(crate) fn encode_commands(commands: &[SyncCommand]) -> Result<String, ApiError> {
    let json = serde_json::to_string(commands)
        .map_err(|e| ApiError::Parse(format!("commands: {e}")))?;
    Ok(format!("commands={}", urlencoding::encode(&json)))
}

/// Pair each submitted command with its status in the response body.
///
/// A command missing from `sync_status` is reported as failed.
pub(crate) fn parse_outcome(body: &str, commands: &[SyncCommand]) -> Result<SyncOutcome, ApiError> {
    let response: SyncResponse = decode(body, "sync response")?;

    let results = commands
        .iter()
        .map(|command| {
            let uuid = command.uuid.to_string();
            let created = command
                .temp_id
                .and_then(|temp_id| response.temp_id_mapping.get(&temp_id.to_string()))
                .cloned()
                .map(String::from);
            let id = created.or_else(|| command.command.target_id().map(str::to_string));

            let error = match response.sync_status.get(&uuid) {
                Some(RawStatus::Text(text)) if text == "ok" => None,
                Some(RawStatus::Text(text)) => Some(CommandFailure {
                    code: None,
                    message: text.clone(),
                }),
                Some(RawStatus::Failed { error_code, error }) => Some(CommandFailure {
                    code: *error_code,
                    message: error.clone().unwrap_or_else(|| String::from("unknown error")),
                }),
                None => Some(CommandFailure {
                    code: None,
                    message: String::from("no status returned for command"),
                }),
            };

            CommandResult {
                uuid,
                kind: command.command.kind(),
                id,
                ok: error.is_none(),
                error,
            }
        })
        .collect();

    Ok(SyncOutcome { results })
}
