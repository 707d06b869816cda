//! `dockgrep config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use dockgrep_container_logs::LogWatchConfig;
use dockgrep_core::config::DockgrepConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Loads the file strictly (it must exist) and checks both the core rules
/// and the watch bounds.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = validation_report(config_path).await;
    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

async fn validation_report(config_path: &Path) -> ConfigValidationReport {
    let mut errors = Vec::new();
    match DockgrepConfig::load(config_path).await {
        Ok(config) => {
            if let Err(e) = LogWatchConfig::from_core(&config.watch).validate() {
                errors.push(e.to_string());
            }
        }
        Err(e) => errors.push(e.to_string()),
    }

    ConfigValidationReport {
        source: config_path.display().to_string(),
        valid: errors.is_empty(),
        errors,
    }
}

/// Shows the effective configuration (file + env overrides + defaults).
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = DockgrepConfig::load_or_default(config_path).await?;
    let report = build_config_report(config_path, &config, section)?;
    writer.render(&report)
}

fn build_config_report(
    config_path: &Path,
    config: &DockgrepConfig,
    section: Option<String>,
) -> Result<ConfigReport, CliError> {
    let config_toml = match section.as_deref() {
        None => toml::to_string_pretty(config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("watch") => toml::to_string_pretty(&config.watch),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section '{other}' (expected: general, watch)"
            )));
        }
    }
    .map_err(|e| CliError::Command(format!("failed to serialize config: {e}")))?;

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section,
        config: serde_json::to_value(config)?,
        config_toml,
    })
}

/// Effective configuration.
///
/// Text output prints the TOML; JSON output carries the full structure.
#[derive(Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub config: serde_json::Value,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{section}]");
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)
    }
}

/// Result of `config validate`.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Empty when valid
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(report: &impl Render) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_config_report_full() {
        let config = DockgrepConfig::default();
        let report =
            build_config_report(Path::new("dockgrep.toml"), &config, None).expect("report");
        let output = render(&report);
        assert!(output.contains("Configuration (source: dockgrep.toml)"));
        assert!(output.contains("[general]"));
        assert!(output.contains("[watch]"));
        assert!(output.contains("poll_interval_ms = 500"));
    }

    #[test]
    fn test_config_report_section() {
        let config = DockgrepConfig::default();
        let report = build_config_report(
            Path::new("dockgrep.toml"),
            &config,
            Some("watch".to_owned()),
        )
        .expect("report");
        let output = render(&report);
        assert!(output.contains("[watch]"));
        assert!(output.contains("docker_socket"));
        assert!(!output.contains("log_level"));
    }

    #[test]
    fn test_config_report_unknown_section() {
        let config = DockgrepConfig::default();
        let result = build_config_report(
            Path::new("dockgrep.toml"),
            &config,
            Some("ebpf".to_owned()),
        );
        let err = result.err().expect("unknown section");
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("ebpf"));
    }

    #[test]
    fn test_config_report_json_serialization() {
        let config = DockgrepConfig::default();
        let report = build_config_report(
            Path::new("dockgrep.toml"),
            &config,
            Some("general".to_owned()),
        )
        .expect("report");

        let parsed = serde_json::to_value(&report).expect("serialize");
        assert_eq!(parsed["source"].as_str(), Some("dockgrep.toml"));
        assert_eq!(parsed["section"].as_str(), Some("general"));
        assert_eq!(parsed["config"]["watch"]["wait_timeout_secs"].as_u64(), Some(30));
        assert!(parsed.get("config_toml").is_none(), "config_toml should be skipped");
    }

    #[test]
    fn test_config_validation_report_valid() {
        let report = ConfigValidationReport {
            source: "dockgrep.toml".to_owned(),
            valid: true,
            errors: Vec::new(),
        };
        let output = render(&report);
        assert!(output.contains("VALID"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_config_validation_report_invalid() {
        let report = ConfigValidationReport {
            source: "bad.toml".to_owned(),
            valid: false,
            errors: vec![
                "general.log_format: must be one of: json, pretty".to_owned(),
                "poll_interval_ms: must be 10-60000".to_owned(),
            ],
        };
        let output = render(&report);
        assert!(output.contains("INVALID"));
        assert!(output.contains("general.log_format"));
        assert!(output.contains("poll_interval_ms"));
    }

    #[tokio::test]
    async fn test_validation_report_checks_watch_bounds() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("dockgrep.toml");
        std::fs::write(&path, "[watch]\npoll_interval_ms = 1\n").expect("write");

        let report = validation_report(&path).await;
        assert!(!report.valid);
        assert!(report.errors[0].contains("poll_interval_ms"));
    }

    #[tokio::test]
    async fn test_validation_report_missing_file() {
        let report = validation_report(Path::new("/nonexistent/dockgrep.toml")).await;
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }
}
