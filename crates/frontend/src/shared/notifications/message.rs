use contracts::shared::api_error::ErrorKind;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl MessageKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageKind::Success => "toast--success",
            MessageKind::Info => "toast--info",
            MessageKind::Warning => "toast--warning",
            MessageKind::Error => "toast--error",
        }
    }
}

/// User-facing text of a notification
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub kind: MessageKind,
    pub summary: String,
    #[serde(default)]
    pub detail: String,
}

/// What happened, published by the form orchestrator and resolved to text
/// by the message schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    LoadError,
    SaveSuccess,
    SaveError(ErrorKind),
    DeleteSuccess,
    DeleteError(ErrorKind),
    /// Ready-made message, shown as is
    Custom(Message),
}

impl StatusMessage {
    pub fn key(&self) -> &'static str {
        match self {
            StatusMessage::LoadError => "loadError",
            StatusMessage::SaveSuccess => "saveSuccess",
            StatusMessage::SaveError(_) => "saveError",
            StatusMessage::DeleteSuccess => "deleteSuccess",
            StatusMessage::DeleteError(_) => "deleteError",
            StatusMessage::Custom(_) => "custom",
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            StatusMessage::SaveError(kind) | StatusMessage::DeleteError(kind) => Some(*kind),
            _ => None,
        }
    }
}
