//! dockgrep -- incremental grep over command output and container logs.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use dockgrep_core::config::DockgrepConfig;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 설정 파일 오류는 각 명령이 보고함 -- 로깅은 기본값으로 시작
    let mut general = DockgrepConfig::load_or_default(&cli.config)
        .await
        .map(|config| config.general)
        .unwrap_or_default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("warning: {e}");
    }

    let writer = OutputWriter::new(cli.output);

    let result = match cli.command {
        Commands::Grep(args) => commands::grep::execute(args, &writer).await,
        Commands::Watch(args) => commands::watch::execute(args, &cli.config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        if !e.is_silent() {
            eprintln!("error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
