//! TOML configuration file loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use flowsmith_compiler::CompilerConfig;
use flowsmith_web::WebConfig;

/// Top-level layout of `flowsmith.toml`.
///
/// ```toml
/// [server]
/// bind_addr = "0.0.0.0"
/// port = 8080
///
/// [compiler]
/// timezone = "Europe/Berlin"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: WebConfig,
    pub compiler: CompilerConfig,
}

impl AppConfig {
    /// Load the config at `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("failed to parse TOML")?;
        config.compiler.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[compiler]
timezone = "Europe/Berlin"
created_by = "ops-team"
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_addr, "127.0.0.1");
        assert_eq!(config.compiler.timezone, "Europe/Berlin");
        assert_eq!(config.compiler.created_by, "ops-team");
        assert_eq!(config.compiler.workflow_name, "AI Generated Workflow");
    }

    #[test]
    fn webhook_headers_table() {
        let config = AppConfig::parse(
            r#"
[compiler.webhook_headers]
Authorization = "Bearer abc"
"#,
        )
        .unwrap();
        assert_eq!(
            config.compiler.webhook_headers.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(AppConfig::load(file.path()).is_err());
    }

    #[test]
    fn blank_timezone_is_rejected() {
        assert!(AppConfig::parse("[compiler]\ntimezone = \"\"\n").is_err());
    }
}
