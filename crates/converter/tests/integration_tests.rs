//! Integration tests for the catalog-to-findings converter
//!
//! Tests the full pipeline against fixture catalog documents:
//! parse -> distro marker -> filter -> handler dispatch -> findings document

use std::path::{Path, PathBuf};

use serde_json::json;

use packroot_converter::cataloger::{Cataloger, parse_catalog};
use packroot_converter::findings::{BASE, PACKAGE_LIST, PKGS_ALL, PKGS_ALLINFO};
use packroot_converter::handler::npm::PKGS_NPM;
use packroot_converter::handler::python::PKGS_PYTHON;
use packroot_converter::{ConverterBuilder, ConverterConfig, ConverterError, RawCatalog};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> RawCatalog {
    let raw = std::fs::read(fixture_path(name)).expect("fixture should be readable");
    parse_catalog(&raw).expect("fixture should parse")
}

/// Fixture-backed cataloger standing in for the external binary.
struct FixtureCataloger {
    fixture: &'static str,
}

impl Cataloger for FixtureCataloger {
    async fn catalog(&self, _image_dir: &Path) -> Result<RawCatalog, ConverterError> {
        let path = fixture_path(self.fixture);
        let raw = tokio::fs::read(&path)
            .await
            .map_err(|e| ConverterError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
        parse_catalog(&raw)
    }
}

#[test]
fn embedded_schema_catalog_end_to_end() {
    let catalog = load_fixture("centos_embedded.json");
    let (converter, _rx) = ConverterBuilder::new().build().unwrap();

    let outcome = converter.convert(&catalog, "centos_embedded.json").unwrap();
    let document = &outcome.document;

    // rpm 루트 패키지는 pkgs.all에 기록됨
    assert_eq!(
        document.get(&[PACKAGE_LIST, PKGS_ALL, BASE, "bash"]),
        Some(&json!("4.4.20-4.el8_6"))
    );
    assert_eq!(
        document.get(&[PACKAGE_LIST, PKGS_ALL, BASE, "python3-libs"]),
        Some(&json!("3.6.8-51.el8"))
    );

    // rpm에 소유된 python 패키지(pip)는 억제됨
    assert!(document.get(&[PACKAGE_LIST, PKGS_PYTHON, BASE, "pip"]).is_none());

    // 소유자 없는 python 패키지는 유지됨
    assert_eq!(
        document.get(&[PACKAGE_LIST, PKGS_PYTHON, BASE, "flask"]),
        Some(&json!("2.0.1"))
    );

    // 부모 id가 해석되지 않는 npm 패키지는 소유자 없음으로 유지됨
    assert_eq!(
        document.get(&[PACKAGE_LIST, PKGS_NPM, BASE, "left-pad"]),
        Some(&json!("1.3.0"))
    );

    // 미지원 타입은 어디에도 없음
    assert_eq!(outcome.summary.artifacts_total, 6);
    assert_eq!(outcome.summary.roots_kept, 4);
    assert_eq!(outcome.summary.artifacts_suppressed, 2);
    assert_eq!(outcome.summary.schema, "embedded");
    assert_eq!(outcome.summary.distro.as_deref(), Some("centos"));

    // 이름 있는 배포판이므로 베이스 마커 없음
    assert!(document.get(&[PACKAGE_LIST, PKGS_ALL, BASE, "Unknown"]).is_none());
    assert!(document.get(&[PACKAGE_LIST, PKGS_ALL, BASE, "BusyBox"]).is_none());
}

#[test]
fn embedded_schema_records_os_detail_entries() {
    let catalog = load_fixture("centos_embedded.json");
    let (converter, _rx) = ConverterBuilder::new().build().unwrap();

    let outcome = converter.convert(&catalog, "centos_embedded.json").unwrap();
    let detail = outcome
        .document
        .get(&[PACKAGE_LIST, PKGS_ALLINFO, BASE, "bash"])
        .expect("bash detail should exist");

    assert_eq!(detail["version"], "4.4.20-4.el8_6");
    assert_eq!(detail["type"], "rpm");
    assert_eq!(detail["license"], "GPL-3.0");
}

#[test]
fn edge_list_schema_catalog_end_to_end() {
    let catalog = load_fixture("debian_edge_list.json");
    let (converter, _rx) = ConverterBuilder::new().build().unwrap();

    let outcome = converter.convert(&catalog, "debian_edge_list.json").unwrap();
    let document = &outcome.document;

    assert_eq!(outcome.summary.schema, "edge-list");

    // ownership-by-files 간선의 child(six)는 무조건 억제
    assert!(document.get(&[PACKAGE_LIST, PKGS_PYTHON, BASE, "six"]).is_none());

    // "contains" 간선은 필터에 영향 없음
    assert_eq!(
        document.get(&[PACKAGE_LIST, PKGS_NPM, BASE, "gyp-helper"]),
        Some(&json!("0.1.0"))
    );

    // deb 루트들은 유지
    assert_eq!(
        document.get(&[PACKAGE_LIST, PKGS_ALL, BASE, "coreutils"]),
        Some(&json!("8.32-4"))
    );
    assert_eq!(
        document.get(&[PACKAGE_LIST, PKGS_ALL, BASE, "python3-six"]),
        Some(&json!("1.16.0-2"))
    );

    assert_eq!(outcome.summary.roots_kept, 3);
}

#[test]
fn busybox_catalog_records_base_marker() {
    let catalog = load_fixture("busybox.json");
    let (converter, _rx) = ConverterBuilder::new().build().unwrap();

    let outcome = converter.convert(&catalog, "busybox.json").unwrap();

    assert_eq!(
        outcome
            .document
            .get(&[PACKAGE_LIST, PKGS_ALL, BASE, "BusyBox"]),
        Some(&json!("1.35.0"))
    );
    assert_eq!(outcome.summary.artifacts_total, 0);
}

#[test]
fn empty_document_records_unknown_marker() {
    let catalog = parse_catalog(b"{}").unwrap();
    let (converter, _rx) = ConverterBuilder::new().build().unwrap();

    let outcome = converter.convert(&catalog, "(empty)").unwrap();
    assert_eq!(
        outcome
            .document
            .get(&[PACKAGE_LIST, PKGS_ALL, BASE, "Unknown"]),
        Some(&json!("0"))
    );
}

#[test]
fn allowlist_restricts_converted_types() {
    let catalog = load_fixture("centos_embedded.json");
    let (converter, _rx) = ConverterBuilder::new()
        .config(ConverterConfig {
            package_types: vec!["rpm".to_owned()],
            ..Default::default()
        })
        .build()
        .unwrap();

    let outcome = converter.convert(&catalog, "centos_embedded.json").unwrap();

    // rpm만 변환되고 python/npm은 미지원 타입으로 제외됨
    assert!(outcome
        .document
        .get(&[PACKAGE_LIST, PKGS_ALL, BASE, "bash"])
        .is_some());
    assert!(outcome
        .document
        .get(&[PACKAGE_LIST, PKGS_PYTHON, BASE, "flask"])
        .is_none());
    assert_eq!(outcome.summary.roots_kept, 2);
}

#[tokio::test]
async fn run_with_fixture_cataloger_emits_event() {
    let cataloger = FixtureCataloger {
        fixture: "centos_embedded.json",
    };
    let (converter, rx) = ConverterBuilder::new().build().unwrap();
    let mut rx = rx.unwrap();

    let outcome = converter
        .run(&cataloger, Path::new("/images/centos"))
        .await
        .unwrap();

    assert_eq!(outcome.summary.source, "/images/centos");

    let event = rx.try_recv().expect("convert event should be queued");
    assert_eq!(event.summary.run_id, outcome.summary.run_id);
    assert_eq!(event.summary.roots_kept, outcome.summary.roots_kept);
}

#[tokio::test]
async fn run_propagates_cataloger_failure_untouched() {
    struct FailingCataloger;
    impl Cataloger for FailingCataloger {
        async fn catalog(&self, _image_dir: &Path) -> Result<RawCatalog, ConverterError> {
            Err(ConverterError::CatalogFailed {
                status: "1".to_owned(),
                stderr: "image not found".to_owned(),
            })
        }
    }

    let (converter, _rx) = ConverterBuilder::new().build().unwrap();
    let result = converter.run(&FailingCataloger, Path::new("/nope")).await;

    assert!(matches!(
        result,
        Err(ConverterError::CatalogFailed { ref stderr, .. }) if stderr == "image not found"
    ));
}

#[test]
fn findings_document_serializes_to_plain_nested_json() {
    let catalog = load_fixture("busybox.json");
    let (converter, _rx) = ConverterBuilder::new().build().unwrap();

    let outcome = converter.convert(&catalog, "busybox.json").unwrap();
    let value = serde_json::to_value(&outcome.document).unwrap();

    assert_eq!(
        value,
        json!({"package_list": {"pkgs.all": {"base": {"BusyBox": "1.35.0"}}}})
    );
}
