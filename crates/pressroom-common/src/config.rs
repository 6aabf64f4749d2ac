//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > .env file > pressroom.toml > defaults

use serde::Deserialize;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Bitly v3 shortening endpoint.
pub const DEFAULT_SHORTEN_URL: &str = "https://api-ssl.bitly.com/v3/shorten";

/// Get the global application configuration.
///
/// # Panics
/// Panics if config has not been initialized via [`init`].
pub fn get() -> &'static AppConfig {
    CONFIG.get().expect("Config not initialized. Call pressroom_common::config::init() first.")
}

/// Initialize the global configuration from environment.
///
/// Should be called once at application startup, before any other code accesses config.
pub fn init() -> Result<&'static AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let app_config = load()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

/// Build the configuration without touching the global slot.
pub fn load() -> Result<AppConfig, config::ConfigError> {
    let cfg = config::Config::builder()
        // Defaults
        .set_default("api.base_url", "http://localhost:3000")?
        .set_default("api.publisher_id", "1")?
        .set_default("analytics.shorten_url", DEFAULT_SHORTEN_URL)?
        .set_default("analytics.bitly_token", "")?
        .set_default("http.connect_timeout_secs", 10)?
        .set_default("log.filter", "pressroom=info")?
        // Optional config file
        .add_source(config::File::with_name("pressroom").required(false))
        // Environment variables (PRESSROOM__API__BASE_URL, PRESSROOM__API__PUBLISHER_ID, etc.)
        .add_source(
            config::Environment::with_prefix("PRESSROOM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    cfg.try_deserialize()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub analytics: AnalyticsConfig,
    pub http: HttpConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend root, e.g. `https://api.example.com/v1`. Every endpoint is a
    /// path under it.
    pub base_url: String,
    /// Publisher (tenant) id every publisher-scoped path is built with.
    pub publisher_id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Bitly access token. Empty disables nothing; the shortener just answers
    /// with a non-200 status and the fallback kicks in.
    pub bitly_token: String,
    pub shorten_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    pub filter: String,
}

impl AppConfig {
    /// Configuration pointing at a local backend, used by tests and tooling.
    pub fn local(base_url: &str, publisher_id: &str) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_owned(),
                publisher_id: publisher_id.to_owned(),
            },
            analytics: AnalyticsConfig {
                bitly_token: String::new(),
                shorten_url: DEFAULT_SHORTEN_URL.to_owned(),
            },
            http: HttpConfig { connect_timeout_secs: 10 },
            log: LogConfig { filter: "pressroom=debug".to_owned() },
        }
    }
}
