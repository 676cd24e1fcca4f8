use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed taxonomy of failures crossing the REST boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    NetworkError,
    NotAuthorized,
    InvalidData,
    ServerError,
}

impl ErrorKind {
    /// Message schema key of this kind
    pub fn key(&self) -> &'static str {
        match self {
            ErrorKind::NetworkError => "networkError",
            ErrorKind::NotAuthorized => "notAuthorized",
            ErrorKind::InvalidData => "invalidData",
            ErrorKind::ServerError => "serverError",
        }
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::NotAuthorized,
            400..=499 => ErrorKind::InvalidData,
            _ => ErrorKind::ServerError,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkError, message)
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidData, message)
    }

    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::from_status(status), message)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::invalid_data(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::NotAuthorized);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::NotAuthorized);
        assert_eq!(ErrorKind::from_status(400), ErrorKind::InvalidData);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::InvalidData);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::ServerError);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ServerError);
    }

    #[test]
    fn test_display() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.to_string(), "networkError: connection refused");
    }
}
