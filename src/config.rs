use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub commentary: CommentarySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u32,
    #[serde(default = "default_max_overlaps")]
    pub max_overlaps: usize,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_inactive_after_days")]
    pub inactive_after_days: u32,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            lookahead_days: default_lookahead_days(),
            max_overlaps: default_max_overlaps(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            inactive_after_days: default_inactive_after_days(),
        }
    }
}

fn default_lookahead_days() -> u32 { 3 }
fn default_max_overlaps() -> usize { 5 }
fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }
fn default_inactive_after_days() -> u32 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> u64 { 10_000 }
fn default_cache_ttl() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct CommentarySettings {
    #[serde(default = "default_commentary_command")]
    pub command: String,
    #[serde(default = "default_commentary_args")]
    pub args: Vec<String>,
    #[serde(default = "default_commentary_timeout")]
    pub timeout_secs: u64,
}

impl Default for CommentarySettings {
    fn default() -> Self {
        Self {
            command: default_commentary_command(),
            args: default_commentary_args(),
            timeout_secs: default_commentary_timeout(),
        }
    }
}

fn default_commentary_command() -> String { "node".to_string() }
fn default_commentary_args() -> Vec<String> { vec!["dev/ollama_cli.mjs".to_string()] }
fn default_commentary_timeout() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SOULTRIBE__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SOULTRIBE__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SOULTRIBE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
