//! Configuration management for host-audit.
//!
//! This module handles loading, merging, and validating configuration from
//! files and CLI arguments. It supports YAML, JSON, and TOML formats.
//!
//! Everything the tool needs to know about its environment lives here: the
//! home-directory root to scan, the external tool paths, and the full mail
//! submission settings. None of these are embedded as literals elsewhere.

use crate::cli::{Args, ConfigFormat, LogLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

// Default configuration constants
pub const DEFAULT_HOME_ROOT: &str = "/home";
pub const DEFAULT_HISTORY_LINES: usize = 10;
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SUBJECT_PREFIX: &str = "Server Audit Report";

/// Environment variable consulted for the SMTP password, so the credential
/// never has to appear in a config file.
pub const SMTP_PASSWORD_ENV: &str = "HOST_AUDIT_SMTP_PASSWORD";

/// Paths of the external tools the collectors shell out to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Socket-state listing tool (default: ss)
    #[serde(default = "default_ss_path")]
    pub ss_path: String,

    /// Service manager CLI (default: systemctl)
    #[serde(default = "default_systemctl_path")]
    pub systemctl_path: String,

    /// Process-status query tool (default: ps)
    #[serde(default = "default_ps_path")]
    pub ps_path: String,

    /// Login-session listing tool (default: who)
    #[serde(default = "default_who_path")]
    pub who_path: String,
}

fn default_ss_path() -> String {
    "ss".to_string()
}
fn default_systemctl_path() -> String {
    "systemctl".to_string()
}
fn default_ps_path() -> String {
    "ps".to_string()
}
fn default_who_path() -> String {
    "who".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ss_path: default_ss_path(),
            systemctl_path: default_systemctl_path(),
            ps_path: default_ps_path(),
            who_path: default_who_path(),
        }
    }
}

/// Mail submission settings. All fields except port and subject prefix must
/// be provided before delivery is attempted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(alias = "smtp-host")]
    pub smtp_host: Option<String>,
    #[serde(alias = "smtp-port")]
    pub smtp_port: Option<u16>,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub username: Option<String>,
    /// Prefer the HOST_AUDIT_SMTP_PASSWORD environment variable over this.
    pub password: Option<String>,
    #[serde(alias = "subject-prefix")]
    pub subject_prefix: Option<String>,
}

/// Enhanced configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Collection
    #[serde(alias = "home-root")]
    pub home_root: Option<PathBuf>,
    #[serde(alias = "history-lines")]
    pub history_lines: Option<usize>,

    // Logging
    pub log_level: Option<String>,

    // External tools
    #[serde(default)]
    pub tools: ToolsConfig,

    // Mail delivery
    #[serde(default)]
    pub mail: MailConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_root: Some(PathBuf::from(DEFAULT_HOME_ROOT)),
            history_lines: Some(DEFAULT_HISTORY_LINES),
            log_level: Some("info".into()),
            tools: ToolsConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

/// Effective log level: a CLI flag wins, otherwise the config file's
/// `log_level` applies, otherwise info.
pub fn effective_log_level(cli_level: Option<&LogLevel>, cfg: &Config) -> Level {
    if let Some(level) = cli_level {
        return match level {
            LogLevel::Off | LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        };
    }

    cfg.log_level
        .as_deref()
        .and_then(parse_level_name)
        .unwrap_or(Level::INFO)
}

fn parse_level_name(name: &str) -> Option<Level> {
    match name.to_ascii_lowercase().as_str() {
        "off" | "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if cfg.history_lines == Some(0) {
        return Err("history_lines must be at least 1".into());
    }

    if let Some(port) = cfg.mail.smtp_port {
        if port == 0 {
            return Err("mail.smtp_port must be a valid port number".into());
        }
    }

    // An address without a host is a config mistake worth failing early on
    let mail = &cfg.mail;
    if (mail.sender.is_some() || mail.receiver.is_some()) && mail.smtp_host.is_none() {
        return Err("mail.sender/receiver set but mail.smtp_host is missing".into());
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref().and_then(|p| p.to_str()))?
    };

    // Override with CLI args
    if let Some(home_root) = &args.home_root {
        config.home_root = Some(home_root.clone());
    }

    if let Some(history_lines) = args.history_lines {
        config.history_lines = Some(history_lines);
    }

    // Credentials from the environment win over any file-provided value
    if let Ok(password) = std::env::var(SMTP_PASSWORD_ENV) {
        if !password.is_empty() {
            config.mail.password = Some(password);
        }
    }

    Ok(config)
}

/// Enhanced configuration loading with multiple format support
pub fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = if let Some(p) = path {
        PathBuf::from(p)
    } else {
        // Try default locations
        let defaults = [
            "/etc/host-audit/config.yaml",
            "/etc/host-audit/config.yml",
            "/etc/host-audit/config.json",
            "./host-audit.yaml",
            "./host-audit.yml",
            "./host-audit.json",
        ];

        defaults
            .iter()
            .find(|p| Path::new(p).exists())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(""))
    };

    if !path.exists() || path.to_string_lossy().is_empty() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

/// Shows the effective configuration in the requested format, with the SMTP
/// password redacted.
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut printable = config.clone();
    if printable.mail.password.is_some() {
        printable.mail.password = Some("<redacted>".to_string());
    }

    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&printable)?,
        ConfigFormat::Toml => toml::to_string(&printable)?,
        ConfigFormat::Yaml => serde_yaml::to_string(&printable)?,
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate_effective_config(&config).is_ok());
        assert_eq!(config.home_root.as_deref(), Some(Path::new("/home")));
        assert_eq!(config.history_lines, Some(10));
    }

    #[test]
    fn test_zero_history_lines_rejected() {
        let config = Config {
            history_lines: Some(0),
            ..Config::default()
        };
        assert!(validate_effective_config(&config).is_err());
    }

    #[test]
    fn test_mail_addresses_require_host() {
        let mut config = Config::default();
        config.mail.sender = Some("audit@example.com".to_string());
        assert!(validate_effective_config(&config).is_err());

        config.mail.smtp_host = Some("mail.example.com".to_string());
        assert!(validate_effective_config(&config).is_ok());
    }

    #[test]
    fn test_config_log_level_applies_without_cli_flag() {
        let config = Config {
            log_level: Some("debug".to_string()),
            ..Config::default()
        };
        assert_eq!(effective_log_level(None, &config), Level::DEBUG);
    }

    #[test]
    fn test_cli_log_level_wins_over_config() {
        let config = Config {
            log_level: Some("debug".to_string()),
            ..Config::default()
        };
        assert_eq!(effective_log_level(Some(&LogLevel::Warn), &config), Level::WARN);
    }

    #[test]
    fn test_unknown_config_level_falls_back_to_info() {
        let config = Config {
            log_level: Some("loud".to_string()),
            ..Config::default()
        };
        assert_eq!(effective_log_level(None, &config), Level::INFO);
    }

    #[test]
    fn test_yaml_roundtrip_with_mail_section() {
        let yaml = "\
home_root: /srv/homes
history_lines: 5
mail:
  smtp_host: mail.example.com
  sender: audit@example.com
  receiver: admin@example.com
  username: audit@example.com
tools:
  ss_path: /usr/sbin/ss
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.home_root.as_deref(), Some(Path::new("/srv/homes")));
        assert_eq!(config.history_lines, Some(5));
        assert_eq!(config.mail.smtp_host.as_deref(), Some("mail.example.com"));
        assert_eq!(config.tools.ss_path, "/usr/sbin/ss");
        // Untouched tool paths keep their defaults
        assert_eq!(config.tools.ps_path, "ps");
        assert!(validate_effective_config(&config).is_ok());
    }
}
