use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use watch_core::{UNKNOWN_MODEL, UsageRecord, UsageTotals};

use crate::types::ParseFailure;

/// Message type written for assistant turns; the only one with token accounting.
const ASSISTANT_MESSAGE_TYPE: &str = "gemini";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionLog {
    session_id: String,
    #[serde(default)]
    messages: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SessionMessage {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    tokens: Option<MessageTokens>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageTokens {
    #[serde(default, deserialize_with = "lenient")]
    input: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    output: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    cached: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    thoughts: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    total: Option<u64>,
}

/// A field of the wrong type reads as absent instead of failing the file.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl From<MessageTokens> for UsageTotals {
    fn from(tokens: MessageTokens) -> Self {
        Self {
            input_tokens: tokens.input.unwrap_or(0),
            output_tokens: tokens.output.unwrap_or(0),
            cached_tokens: tokens.cached.unwrap_or(0),
            thought_tokens: tokens.thoughts.unwrap_or(0),
            total_tokens: tokens.total.unwrap_or(0),
        }
    }
}

fn message_to_record(session_id: &str, message: serde_json::Value) -> Option<UsageRecord> {
    // Elements that are not objects carry no turn.
    if !message.is_object() {
        return None;
    }
    let message = SessionMessage::deserialize(message).ok()?;
    if message.kind.as_deref() != Some(ASSISTANT_MESSAGE_TYPE) {
        return None;
    }
    // Without an id or timestamp the turn has no identity to dedup on.
    let message_id = message.id?;
    let timestamp = message.timestamp?;
    Some(UsageRecord {
        session_id: session_id.to_string(),
        message_id,
        timestamp,
        model: message.model.unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
        usage: message.tokens.unwrap_or_default().into(),
    })
}

/// Parses the contents of one session log. The root must be an object with a
/// `sessionId` and, if present, a `messages` array; otherwise nothing is
/// returned. Inside the array, odd messages and mistyped fields are tolerated.
pub fn parse_session_str(contents: &str) -> serde_json::Result<Vec<UsageRecord>> {
    let log: SessionLog = serde_json::from_str(contents)?;
    let session_id = log.session_id;
    Ok(log
        .messages
        .into_iter()
        .filter_map(|message| message_to_record(&session_id, message))
        .collect())
}

pub fn parse_session_file(path: &Path) -> Result<Vec<UsageRecord>, ParseFailure> {
    let file_path = path.to_string_lossy().to_string();
    let contents = fs::read_to_string(path).map_err(|err| ParseFailure {
        file_path: file_path.clone(),
        reason: err.to_string(),
    })?;
    parse_session_str(&contents).map_err(|err| ParseFailure {
        file_path,
        reason: format!("invalid session log: {}", err),
    })
}
