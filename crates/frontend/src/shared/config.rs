use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub toast: ToastConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Fixed REST base URL; when absent it is derived from the page location
    #[serde(default)]
    pub base_url: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ToastConfig {
    pub duration_ms: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[toast]
duration_ms = 5000
"#;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: None,
                port: 3000,
            },
            toast: ToastConfig { duration_ms: 5000 },
        }
    }
}

impl AppConfig {
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

/// Load the embedded configuration
pub fn load_config() -> anyhow::Result<AppConfig> {
    log::debug!("Using default embedded configuration");
    AppConfig::from_toml(DEFAULT_CONFIG)
}
