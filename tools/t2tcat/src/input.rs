//! Recorded messages, one JSON object per line.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rayon::prelude::*;
use serde::Deserialize;
use topic2table::core::Message;

/// One recorded message.
///
/// `payload` holding a JSON string is taken as the raw text; any other JSON is
/// serialized back to text. `payload_base64` carries binary payloads.
#[derive(Debug, Deserialize)]
struct MessageLine {
    topic: String,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    payload: Option<serde_json::Value>,
    #[serde(default)]
    payload_base64: Option<String>,
    #[serde(default)]
    properties: BTreeMap<String, Option<String>>,
}

impl MessageLine {
    fn into_message(self) -> Result<Message> {
        let payload = match (self.payload_base64, self.payload) {
            (Some(encoded), _) => Some(BASE64.decode(encoded).context("invalid payload_base64")?),
            (None, Some(serde_json::Value::String(text))) => Some(text.into_bytes()),
            (None, Some(other)) => Some(other.to_string().into_bytes()),
            (None, None) => None,
        };
        Ok(Message {
            topic: self.topic,
            key: self.key,
            payload,
            properties: self.properties,
        })
    }
}

/// Parse every non-blank line of `data` into a message, in order.
pub fn parse_messages(data: &[u8]) -> Result<Vec<Message>> {
    let lines: Vec<(usize, &[u8])> = data
        .split(|b| *b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
        .collect();

    lines
        .into_par_iter()
        .map(|(index, line)| {
            serde_json::from_slice::<MessageLine>(line)
                .map_err(anyhow::Error::from)
                .and_then(MessageLine::into_message)
                .with_context(|| format!("line {}", index + 1))
        })
        .collect()
}
