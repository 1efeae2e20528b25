//! packroot CLI 진입점
//!
//! 설정 로드 → 로깅 초기화 → 하위 명령 디스패치 순서로 동작합니다.
//! 에러는 [`CliError::exit_code`]에 따라 종료 코드로 매핑됩니다.

mod cli;
mod commands;
mod error;
mod output;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use packroot_core::config::PackrootConfig;
use packroot_core::error::{ConfigError, PackrootError};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_effective_config(&cli).await?;

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.general.log_level.clone());
    init_tracing(&log_level, &config.general.log_format);

    tracing::debug!(config = %cli.config.display(), "packroot starting");

    let writer = OutputWriter::new(cli.output);

    match &cli.command {
        Commands::Convert(args) => commands::convert::run_convert(&config, args, &writer).await,
        Commands::Ingest(args) => commands::convert::run_ingest(&config, args, &writer).await,
        Commands::Types => commands::types::run_types(&config, &writer),
        Commands::Config(args) => {
            commands::config::run_config(&cli.config, &args.action, &writer).await
        }
    }
}

/// 실효 설정을 로드합니다.
///
/// 기본 경로(`packroot.toml`)의 파일이 없으면 기본값 + 환경변수로
/// 동작합니다. 사용자가 `-c`로 지정한 파일이 없으면 에러입니다.
async fn load_effective_config(cli: &Cli) -> Result<PackrootConfig, CliError> {
    match PackrootConfig::load(&cli.config).await {
        Ok(config) => Ok(config),
        Err(PackrootError::Config(ConfigError::FileNotFound { .. }))
            if cli.config == Path::new("packroot.toml") =>
        {
            let mut config = PackrootConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        Err(e) => Err(e.into()),
    }
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::new(level);
    if format == "pretty" {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    }
}
