//! `dockgrep watch` command handler

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use dockgrep_container_logs::{
    BollardDockerClient, ContainerLogWatch, ContainerLogsError, LogWatchConfig,
};
use dockgrep_core::config::DockgrepConfig;
use dockgrep_log_scanner::MatchRecord;

use crate::cli::WatchArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `watch` command.
pub async fn execute(
    args: WatchArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = DockgrepConfig::load_or_default(config_path).await?;
    let watch_config = watch_config(&config, &args)?;

    let docker = Arc::new(BollardDockerClient::connect_with_socket(
        &watch_config.docker_socket,
    )?);
    let mut watch = ContainerLogWatch::attach(docker, &args.container, watch_config).await?;

    let matches = match watch.wait_for(&args.pattern).await {
        Ok(matches) => matches,
        Err(e @ ContainerLogsError::WaitTimeout { .. }) if args.quiet => {
            return Err(CliError::NoMatch {
                reason: e.to_string(),
                quiet: true,
            });
        }
        Err(e) => return Err(e.into()),
    };

    debug!(container = %watch.container(), matches = matches.len(), "watch satisfied");
    if args.quiet {
        return Ok(());
    }

    writer.render(&WatchReport {
        container: args.container,
        pattern: args.pattern,
        matches,
    })
}

/// Builds the watch configuration: file/env values, then CLI overrides.
fn watch_config(config: &DockgrepConfig, args: &WatchArgs) -> Result<LogWatchConfig, CliError> {
    let mut watch_config = LogWatchConfig::from_core(&config.watch);
    if let Some(secs) = args.timeout {
        watch_config.wait_timeout_secs = secs;
    }
    if let Some(ms) = args.poll_ms {
        watch_config.poll_interval_ms = ms;
    }
    watch_config.validate()?;
    Ok(watch_config)
}

/// Lines that satisfied the wait.
#[derive(Serialize)]
pub struct WatchReport {
    pub container: String,
    pub pattern: String,
    pub matches: Vec<MatchRecord>,
}

impl Render for WatchReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        for record in &self.matches {
            writeln!(w, "{}: {record}", self.container)?;
        }
        Ok(())
    }
}
