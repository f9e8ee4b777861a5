//! Configuration for dialer, read from `.dialer/dialer.toml`.
//!
//! Values are layered file → environment → CLI.
//!
//! # Configuration File Format
//!
//! ```toml
//! [backend]
//! base_url = "https://voice-marketing-backend.onrender.com"
//! request_timeout_secs = 30
//!
//! [calls]
//! max_parallel_calls = 1
//!
//! [customers]
//! name_field = "Ad"
//! phone_field = "Telefon"
//! ```
//!
//! Environment overrides: `DIALER_BACKEND_URL`, `DIALER_MAX_PARALLEL_CALLS`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::campaign::{CustomerFields, DEFAULT_BACKEND_URL, OrchestratorConfig};

/// The name of the dialer configuration directory.
pub const DIALER_DIR: &str = ".dialer";
pub const CONFIG_FILE: &str = "dialer.toml";

pub const ENV_BACKEND_URL: &str = "DIALER_BACKEND_URL";
pub const ENV_MAX_PARALLEL_CALLS: &str = "DIALER_MAX_PARALLEL_CALLS";

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Call step settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallsSection {
    /// Calls in flight at once. 1 places calls strictly one after another.
    #[serde(default = "default_max_parallel_calls")]
    pub max_parallel_calls: usize,
}

fn default_max_parallel_calls() -> usize {
    1
}

impl Default for CallsSection {
    fn default() -> Self {
        Self {
            max_parallel_calls: default_max_parallel_calls(),
        }
    }
}

/// The complete dialer.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialerToml {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub calls: CallsSection,
    #[serde(default)]
    pub customers: CustomerFields,
}

impl DialerToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse dialer.toml")
    }

    /// Load `<dialer_dir>/dialer.toml`, or defaults when it does not exist.
    pub fn load_or_default(dialer_dir: &Path) -> Result<Self> {
        let config_path = dialer_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize dialer.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let url = self.backend.base_url.trim();
        if url.is_empty() {
            warnings.push("backend.base_url is empty".to_string());
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            warnings.push(format!(
                "Invalid backend.base_url '{}': should start with http:// or https://",
                url
            ));
        }

        if self.calls.max_parallel_calls == 0 {
            warnings.push("calls.max_parallel_calls is 0; 1 will be used".to_string());
        }

        if self.customers.name_field.is_empty() || self.customers.phone_field.is_empty() {
            warnings.push("customers.name_field and customers.phone_field must not be empty".into());
        }

        warnings
    }
}

/// Overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub backend_url: Option<String>,
    pub max_parallel_calls: Option<usize>,
}

/// Effective configuration after layering.
#[derive(Debug, Clone)]
pub struct DialerConfig {
    pub toml: DialerToml,
    pub backend_url: String,
    pub max_parallel_calls: usize,
}

impl DialerConfig {
    /// Resolve configuration for `project_dir` using the process environment.
    pub fn resolve(project_dir: &Path, cli: &CliOverrides) -> Result<Self> {
        Self::resolve_with_env(project_dir, cli, |key| std::env::var(key).ok())
    }

    /// Resolve configuration with an explicit environment lookup.
    pub fn resolve_with_env(
        project_dir: &Path,
        cli: &CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let toml = DialerToml::load_or_default(&project_dir.join(DIALER_DIR))?;

        let mut backend_url = toml.backend.base_url.clone();
        let mut max_parallel_calls = toml.calls.max_parallel_calls;

        if let Some(url) = env(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            backend_url = url;
        }
        if let Some(raw) = env(ENV_MAX_PARALLEL_CALLS).filter(|v| !v.trim().is_empty()) {
            max_parallel_calls = raw.trim().parse().with_context(|| {
                format!("{} must be a positive integer, got '{}'", ENV_MAX_PARALLEL_CALLS, raw)
            })?;
        }

        if let Some(url) = &cli.backend_url {
            backend_url = url.clone();
        }
        if let Some(max) = cli.max_parallel_calls {
            max_parallel_calls = max;
        }

        Ok(Self {
            toml,
            backend_url,
            max_parallel_calls: max_parallel_calls.max(1),
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.toml.backend.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig::default()
            .with_max_parallel_calls(self.max_parallel_calls)
            .with_customer_fields(self.toml.customers.clone())
    }
}
