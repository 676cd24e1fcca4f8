//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use crate::shared::config::ApiConfig;

/// Get the base URL for API requests
///
/// A configured `base_url` wins; otherwise the URL is built from the current
/// window location and the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base(config: &ApiConfig) -> String {
    if let Some(base) = &config.base_url {
        return base.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_from_location(&protocol, &hostname, config.port)
}

fn base_from_location(protocol: &str, hostname: &str, port: u16) -> String {
    format!("{}//{}:{}", protocol, hostname, port)
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `base` - Result of [`api_base`]
/// * `path` - The API path (should start with "/api/")
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_base_wins() {
        let config = ApiConfig {
            base_url: Some("https://lsa.example.gov.bc.ca/".to_string()),
            port: 3000,
        };
        assert_eq!(api_base(&config), "https://lsa.example.gov.bc.ca");
        assert_eq!(
            api_url(&api_base(&config), "/api/recipients/1"),
            "https://lsa.example.gov.bc.ca/api/recipients/1"
        );
    }

    #[test]
    fn test_base_from_location() {
        assert_eq!(base_from_location("https:", "example.com", 3000), "https://example.com:3000");
    }
}
