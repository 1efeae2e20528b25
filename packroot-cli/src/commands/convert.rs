//! `packroot convert` / `packroot ingest` — 카탈로그 변환 실행

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use packroot_converter::cataloger::{CommandCataloger, parse_catalog};
use packroot_converter::{ConverterBuilder, ConverterConfig, ConvertOutcome};
use packroot_core::config::PackrootConfig;
use packroot_core::types::ConversionSummary;

use crate::cli::{ConvertArgs, IngestArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// 외부 카탈로거를 실행한 뒤 출력을 findings 문서로 변환합니다.
pub async fn run_convert(
    config: &PackrootConfig,
    args: &ConvertArgs,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    if !args.path.exists() {
        return Err(CliError::Command(format!(
            "scan target '{}' does not exist",
            args.path.display()
        )));
    }

    // 수신단은 변환이 끝날 때까지 살려둬야 이벤트 전송이 성공함
    let (converter, _event_rx) = build_converter(config)?;

    let mut catalog_config = config.catalog.clone();
    if let Some(ref binary) = args.cataloger {
        catalog_config.binary = binary.clone();
    }
    let cataloger = CommandCataloger::from_config(&catalog_config);

    let outcome = converter.run(&cataloger, &args.path).await?;
    render_outcome(writer, outcome, args.summary_only)
}

/// 기존 카탈로그 JSON 문서를 변환합니다 (카탈로거 호출 없음).
pub async fn run_ingest(
    config: &PackrootConfig,
    args: &IngestArgs,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let (converter, _event_rx) = build_converter(config)?;

    let raw = tokio::fs::read(&args.file).await?;
    let catalog = parse_catalog(&raw)
        .map_err(|e| CliError::Catalog(format!("{}: {e}", args.file.display())))?;

    let outcome = converter.convert(&catalog, &args.file.display().to_string())?;
    render_outcome(writer, outcome, args.summary_only)
}

type EventReceiver = tokio::sync::mpsc::Receiver<packroot_converter::ConvertEvent>;

fn build_converter(
    config: &PackrootConfig,
) -> Result<(packroot_converter::Converter, Option<EventReceiver>), CliError> {
    let converter_config = ConverterConfig::from_core(&config.convert);
    let built = ConverterBuilder::new().config(converter_config).build()?;
    Ok(built)
}

fn render_outcome(
    writer: &OutputWriter,
    outcome: ConvertOutcome,
    summary_only: bool,
) -> Result<(), CliError> {
    let findings = if summary_only {
        None
    } else {
        Some(outcome.document.to_value())
    };
    writer.render(&ConvertReport {
        summary: outcome.summary,
        findings,
    })
}

/// 변환 결과 출력 페이로드
#[derive(Serialize)]
struct ConvertReport {
    summary: ConversionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    findings: Option<serde_json::Value>,
}

impl Render for ConvertReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            w,
            "{} {}",
            "✓".green().bold(),
            format!("converted {}", self.summary.source).bold(),
        )?;
        writeln!(w, "  run id:     {}", self.summary.run_id)?;
        writeln!(w, "  schema:     {}", self.summary.schema)?;
        if let Some(ref distro) = self.summary.distro {
            writeln!(w, "  distro:     {}", distro)?;
        }
        writeln!(w, "  artifacts:  {}", self.summary.artifacts_total)?;
        writeln!(
            w,
            "  roots:      {}",
            self.summary.roots_kept.to_string().green(),
        )?;
        writeln!(
            w,
            "  suppressed: {}",
            self.summary.artifacts_suppressed.to_string().yellow(),
        )?;

        if let Some(ref findings) = self.findings {
            let rendered =
                serde_json::to_string_pretty(findings).map_err(std::io::Error::other)?;
            writeln!(w)?;
            writeln!(w, "{rendered}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    use crate::cli::OutputFormat;

    fn sample_report(findings: Option<serde_json::Value>) -> ConvertReport {
        ConvertReport {
            summary: ConversionSummary {
                run_id: "run-42".to_owned(),
                source: "/images/centos".to_owned(),
                schema: "embedded".to_owned(),
                distro: Some("centos".to_owned()),
                artifacts_total: 10,
                roots_kept: 8,
                artifacts_suppressed: 2,
                completed_at: SystemTime::now(),
            },
            findings,
        }
    }

    #[test]
    fn text_report_contains_summary_fields() {
        let writer = OutputWriter::new(OutputFormat::Text);
        let mut buffer = Vec::new();
        writer
            .render_to(&sample_report(None), &mut buffer)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("/images/centos"));
        assert!(text.contains("run-42"));
        assert!(text.contains("embedded"));
        assert!(text.contains("centos"));
    }

    #[test]
    fn text_report_includes_findings_when_present() {
        let writer = OutputWriter::new(OutputFormat::Text);
        let mut buffer = Vec::new();
        let findings = serde_json::json!({"package_list": {"pkgs.all": {}}});
        writer
            .render_to(&sample_report(Some(findings)), &mut buffer)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("package_list"));
    }

    #[test]
    fn json_report_omits_absent_findings() {
        let writer = OutputWriter::new(OutputFormat::Json);
        let mut buffer = Vec::new();
        writer
            .render_to(&sample_report(None), &mut buffer)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert!(value.get("findings").is_none());
        assert_eq!(value["summary"]["run_id"], "run-42");
    }
}
