//! Tool configuration.
//!
//! Settings resolve in layers: built-in defaults, an optional JSON config
//! file, environment overrides, then CLI flags. The enrichment core never
//! reads any of these itself; `main` hands it the resolved values.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the HTTP `User-Agent`.
pub const USER_AGENT_ENV: &str = "VOCAB_ENRICH_USER_AGENT";

const CONFIG_DIR_NAME: &str = "vocab-enrich";
const CONFIG_FILE_NAME: &str = "config.json";

/// Resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub checkpoint_every: usize,
    pub delay_ms: u64,
    pub jitter_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub endpoints: Endpoints,
}

/// Base URLs of the lookup services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Endpoints {
    pub datamuse: String,
    pub dictionary_api: String,
    pub youdao: String,
    pub pollinations: String,
    pub openverse: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            checkpoint_every: 20,
            delay_ms: 100,
            jitter_ms: 0,
            timeout_secs: 5,
            user_agent: "Mozilla/5.0 (vocab-enrich/0.1)".to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            datamuse: "https://api.datamuse.com".to_string(),
            dictionary_api: "https://api.dictionaryapi.dev".to_string(),
            youdao: "http://dict.youdao.com".to_string(),
            pollinations: "https://image.pollinations.ai".to_string(),
            openverse: "https://api.openverse.org".to_string(),
        }
    }
}

/// Values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub checkpoint_every: Option<usize>,
    pub delay_ms: Option<u64>,
    pub jitter_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl ToolConfig {
    /// Apply overrides; unset fields keep the current value.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(value) = overrides.checkpoint_every {
            self.checkpoint_every = value;
        }
        if let Some(value) = overrides.delay_ms {
            self.delay_ms = value;
        }
        if let Some(value) = overrides.jitter_ms {
            self.jitter_ms = value;
        }
        if let Some(value) = overrides.timeout_secs {
            self.timeout_secs = value;
        }
        if let Some(value) = &overrides.user_agent {
            self.user_agent = value.clone();
        }
        self
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn jitter(&self) -> Duration {
        Duration::from_millis(self.jitter_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Default config location (`<config dir>/vocab-enrich/config.json`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load config from an explicit path, or from the default path when present.
///
/// An explicit path must exist; a missing default file yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<ToolConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => read_config(&path),
        _ => Ok(ToolConfig::default()),
    }
}

fn read_config(path: &Path) -> Result<ToolConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ToolConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Validate resolved settings before any work starts.
pub fn validate_config(config: &ToolConfig) -> Result<()> {
    if config.checkpoint_every == 0 {
        return Err(anyhow!("checkpoint_every must be at least 1"));
    }
    if config.timeout_secs == 0 {
        return Err(anyhow!("timeout_secs must be at least 1"));
    }
    if config.user_agent.trim().is_empty() {
        return Err(anyhow!("user_agent must be non-empty"));
    }
    let endpoints = [
        ("datamuse", &config.endpoints.datamuse),
        ("dictionary_api", &config.endpoints.dictionary_api),
        ("youdao", &config.endpoints.youdao),
        ("pollinations", &config.endpoints.pollinations),
        ("openverse", &config.endpoints.openverse),
    ];
    for (name, url) in endpoints {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!(
                "endpoints.{name} must be an http(s) URL (got {url:?})"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
