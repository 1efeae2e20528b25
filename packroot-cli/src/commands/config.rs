//! `packroot config` — 설정 검증 및 표시

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use packroot_core::config::PackrootConfig;

use crate::cli::ConfigAction;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// `config` 하위 명령을 처리합니다.
///
/// `convert`와 달리 설정 파일 부재를 기본값으로 대체하지 않습니다 —
/// 검증/표시 대상은 실제 파일이어야 합니다.
pub async fn run_config(
    config_path: &Path,
    action: &ConfigAction,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match action {
        ConfigAction::Validate => {
            PackrootConfig::load(config_path).await?;
            writer.render(&ValidateReport {
                path: config_path.display().to_string(),
                valid: true,
            })
        }
        ConfigAction::Show { section } => {
            let config = PackrootConfig::load(config_path).await?;
            let full = serde_json::to_value(&config)?;
            let shown = match section {
                None => full,
                Some(name) => full
                    .get(name.as_str())
                    .cloned()
                    .ok_or_else(|| {
                        CliError::Config(format!(
                            "unknown config section '{name}' (expected: general, catalog, convert)"
                        ))
                    })?,
            };
            writer.render(&ShowReport {
                section: section.clone(),
                config: shown,
            })
        }
    }
}

/// `config validate` 출력 페이로드
#[derive(Serialize)]
struct ValidateReport {
    path: String,
    valid: bool,
}

impl Render for ValidateReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            w,
            "{} {} is valid",
            "✓".green().bold(),
            self.path.bold(),
        )
    }
}

/// `config show` 출력 페이로드
#[derive(Serialize)]
struct ShowReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    config: serde_json::Value,
}

impl Render for ShowReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let rendered = toml::to_string_pretty(&self.config).map_err(std::io::Error::other)?;
        write!(w, "{rendered}")
    }
}
