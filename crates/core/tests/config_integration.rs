//! packroot.toml 통합 설정 테스트
//!
//! - packroot.toml.example 파싱 테스트
//! - 부분 설정 (일부 섹션만) 로딩 테스트
//! - 환경변수 우선순위 테스트
//! - 빈 파일 / 잘못된 형식 에러 테스트

use packroot_core::config::PackrootConfig;
use packroot_core::error::{ConfigError, PackrootError};
use serial_test::serial;

// =============================================================================
// packroot.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../packroot.toml.example");
    let config = PackrootConfig::parse(content).expect("example config should parse");

    // general 기본값 확인
    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "json");
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../packroot.toml.example");
    let config = PackrootConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_has_correct_catalog_defaults() {
    let content = include_str!("../../../packroot.toml.example");
    let config = PackrootConfig::parse(content).expect("should parse");

    assert_eq!(config.catalog.binary, "syft");
    assert_eq!(config.catalog.args, vec!["-o", "json"]);
    assert_eq!(config.catalog.timeout_secs, 300);
    assert_eq!(config.catalog.max_output_mb, 64);
}

#[test]
fn example_config_has_correct_convert_defaults() {
    let content = include_str!("../../../packroot.toml.example");
    let config = PackrootConfig::parse(content).expect("should parse");

    assert!(config.convert.package_types.is_empty());
    assert_eq!(config.convert.max_artifacts, 50_000);
}

#[test]
fn example_config_matches_code_defaults() {
    let content = include_str!("../../../packroot.toml.example");
    let from_file = PackrootConfig::parse(content).expect("should parse");
    let from_code = PackrootConfig::default();

    // 모든 기본값이 코드 Default 구현과 일치하는지 확인
    assert_eq!(from_file.general.log_level, from_code.general.log_level);
    assert_eq!(from_file.general.log_format, from_code.general.log_format);
    assert_eq!(from_file.catalog.binary, from_code.catalog.binary);
    assert_eq!(from_file.catalog.args, from_code.catalog.args);
    assert_eq!(from_file.catalog.timeout_secs, from_code.catalog.timeout_secs);
    assert_eq!(
        from_file.catalog.max_output_mb,
        from_code.catalog.max_output_mb
    );
    assert_eq!(
        from_file.convert.package_types,
        from_code.convert.package_types
    );
    assert_eq!(
        from_file.convert.max_artifacts,
        from_code.convert.max_artifacts
    );
}

// =============================================================================
// 파일 로딩 테스트
// =============================================================================

#[tokio::test]
async fn load_missing_file_returns_not_found() {
    let result = PackrootConfig::load("/nonexistent/packroot.toml").await;
    assert!(matches!(
        result,
        Err(PackrootError::Config(ConfigError::FileNotFound { .. }))
    ));
}

#[tokio::test]
async fn load_file_with_partial_sections() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("packroot.toml");
    tokio::fs::write(&path, "[general]\nlog_level = \"debug\"\n")
        .await
        .expect("should write config");

    let config = PackrootConfig::from_file(&path)
        .await
        .expect("partial config should load");
    assert_eq!(config.general.log_level, "debug");
    // 다른 섹션은 기본값 유지
    assert_eq!(config.catalog.binary, "syft");
}

#[tokio::test]
async fn load_file_with_invalid_value_fails_validation() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("packroot.toml");
    tokio::fs::write(&path, "[catalog]\ntimeout_secs = 0\n")
        .await
        .expect("should write config");

    let result = PackrootConfig::from_file(&path).await;
    assert!(matches!(
        result,
        Err(PackrootError::Config(ConfigError::InvalidValue { .. }))
    ));
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial]
fn env_override_takes_precedence_over_defaults() {
    unsafe {
        std::env::set_var("PACKROOT_CATALOG_BINARY", "/usr/local/bin/syft");
        std::env::set_var("PACKROOT_CATALOG_TIMEOUT_SECS", "600");
    }

    let mut config = PackrootConfig::default();
    config.apply_env_overrides();

    assert_eq!(config.catalog.binary, "/usr/local/bin/syft");
    assert_eq!(config.catalog.timeout_secs, 600);

    unsafe {
        std::env::remove_var("PACKROOT_CATALOG_BINARY");
        std::env::remove_var("PACKROOT_CATALOG_TIMEOUT_SECS");
    }
}

#[test]
#[serial]
fn env_override_csv_splits_package_types() {
    unsafe {
        std::env::set_var("PACKROOT_CONVERT_PACKAGE_TYPES", "rpm, deb,python");
    }

    let mut config = PackrootConfig::default();
    config.apply_env_overrides();

    assert_eq!(config.convert.package_types, vec!["rpm", "deb", "python"]);

    unsafe {
        std::env::remove_var("PACKROOT_CONVERT_PACKAGE_TYPES");
    }
}

#[test]
#[serial]
fn env_override_ignores_non_numeric_value() {
    unsafe {
        std::env::set_var("PACKROOT_CONVERT_MAX_ARTIFACTS", "not-a-number");
    }

    let mut config = PackrootConfig::default();
    config.apply_env_overrides();

    // 잘못된 값은 무시되고 기본값 유지
    assert_eq!(config.convert.max_artifacts, 50_000);

    unsafe {
        std::env::remove_var("PACKROOT_CONVERT_MAX_ARTIFACTS");
    }
}

#[test]
#[serial]
fn env_override_without_env_keeps_file_values() {
    let mut config = PackrootConfig::parse("[catalog]\nbinary = \"grype\"").expect("should parse");
    config.apply_env_overrides();
    assert_eq!(config.catalog.binary, "grype");
}
