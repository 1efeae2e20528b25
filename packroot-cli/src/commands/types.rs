//! `packroot types` — 지원 패키지 타입 목록

use std::io::Write;

use serde::Serialize;

use packroot_converter::HandlerRegistry;
use packroot_core::config::PackrootConfig;
use packroot_core::types::PackageClass;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// 설정의 허용 목록을 반영한 지원 타입 목록을 출력합니다.
pub fn run_types(config: &PackrootConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let registry = HandlerRegistry::with_defaults_restricted(&config.convert.package_types);

    let types = registry
        .types()
        .into_iter()
        .map(|name| TypeEntry {
            name: name.to_owned(),
            class: PackageClass::of(name).to_string(),
        })
        .collect();

    writer.render(&TypesReport { types })
}

/// `types` 출력 페이로드
#[derive(Serialize)]
struct TypesReport {
    types: Vec<TypeEntry>,
}

#[derive(Serialize)]
struct TypeEntry {
    name: String,
    class: String,
}

impl Render for TypesReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        for entry in &self.types {
            writeln!(w, "{:<16} {}", entry.name, entry.class)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cli::OutputFormat;

    #[test]
    fn types_report_lists_all_builtin_types() {
        let config = PackrootConfig::default();
        let writer = OutputWriter::new(OutputFormat::Text);

        let registry = HandlerRegistry::with_defaults_restricted(&config.convert.package_types);
        let report = TypesReport {
            types: registry
                .types()
                .into_iter()
                .map(|name| TypeEntry {
                    name: name.to_owned(),
                    class: PackageClass::of(name).to_string(),
                })
                .collect(),
        };

        let mut buffer = Vec::new();
        writer.render_to(&report, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("rpm"));
        assert!(text.contains("os"));
        assert!(text.contains("python"));
        assert!(text.contains("language"));
    }
}
