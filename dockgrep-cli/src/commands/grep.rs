//! `dockgrep grep` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use dockgrep_log_scanner::{CapturedLogs, MatchRecord};

use crate::cli::GrepArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `grep` command.
pub async fn execute(args: GrepArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let text = read_input(&args.input).await?;
    let logs = CapturedLogs::from_output(&text);
    debug!(source = %args.input.display(), lines = logs.len(), "input loaded");

    if args.quiet {
        return if logs.contains_match(&args.pattern)? {
            Ok(())
        } else {
            Err(no_match(&args.pattern, true))
        };
    }

    let matches = logs.grep(&args.pattern)?;
    info!(pattern = %args.pattern, matches = matches.len(), "grep finished");

    let report = GrepReport {
        source: args.input.display().to_string(),
        pattern: args.pattern.clone(),
        matches,
    };
    writer.render(&report)?;

    if report.matches.is_empty() {
        return Err(no_match(&args.pattern, false));
    }
    Ok(())
}

async fn read_input(input: &Path) -> Result<String, CliError> {
    if input == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }
    Ok(tokio::fs::read_to_string(input).await?)
}

fn no_match(pattern: &str, quiet: bool) -> CliError {
    CliError::NoMatch {
        reason: format!("no line matched '{pattern}'"),
        quiet,
    }
}

/// Matched lines of one input.
#[derive(Serialize)]
pub struct GrepReport {
    pub source: String,
    pub pattern: String,
    pub matches: Vec<MatchRecord>,
}

impl Render for GrepReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        for record in &self.matches {
            writeln!(w, "{record}")?;
        }
        Ok(())
    }
}
