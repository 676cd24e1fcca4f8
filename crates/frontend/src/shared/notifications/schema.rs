use super::message::{Message, MessageKind, StatusMessage};
use serde::Deserialize;
use std::collections::HashMap;

/// Message texts embedded in the bundle
const DEFAULT_SCHEMA: &str = r#"
[messages.loadError]
kind = "error"
summary = "Record not loaded"
detail = "The record could not be loaded. Default values are shown."

[messages.saveSuccess]
kind = "success"
summary = "Saved"
detail = "The registration was saved."

[messages.saveError]
kind = "error"
summary = "Save failed"
detail = "The registration could not be saved."

[messages.deleteSuccess]
kind = "success"
summary = "Deleted"
detail = "The registration was deleted."

[messages.deleteError]
kind = "error"
summary = "Delete failed"
detail = "The registration could not be deleted."

[errors]
networkError = "The server could not be reached. Check your connection and try again."
notAuthorized = "You are not authorized to perform this action."
invalidData = "The server rejected the submitted data."
serverError = "The server encountered an error. Try again later."
"#;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageSchema {
    #[serde(default)]
    messages: HashMap<String, Message>,
    /// Detail line per error kind key
    #[serde(default)]
    errors: HashMap<String, String>,
}

impl MessageSchema {
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_toml(DEFAULT_SCHEMA)
    }

    /// Text shown for `message`. Keys missing from the schema fall back to
    /// an info message titled by the key.
    pub fn resolve(&self, message: &StatusMessage) -> Message {
        if let StatusMessage::Custom(custom) = message {
            return custom.clone();
        }
        let mut resolved = self.messages.get(message.key()).cloned().unwrap_or_else(|| {
            log::warn!("no message text for `{}`", message.key());
            Message {
                kind: MessageKind::Info,
                summary: message.key().to_string(),
                detail: String::new(),
            }
        });
        if let Some(detail) = message.error_kind().and_then(|k| self.errors.get(k.key())) {
            resolved.detail = detail.clone();
        }
        resolved
    }
}
