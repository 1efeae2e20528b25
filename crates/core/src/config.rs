//! 설정 관리 — packroot.toml 파싱 및 런타임 설정
//!
//! [`PackrootConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`PACKROOT_CATALOG_BINARY=syft` 형식)
//! 3. 설정 파일 (`packroot.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), packroot_core::error::PackrootError> {
//! use packroot_core::config::PackrootConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = PackrootConfig::load("packroot.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = PackrootConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, PackrootError};

/// Packroot 통합 설정
///
/// `packroot.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackrootConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 카탈로거 호출 설정
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// 변환 파이프라인 설정
    #[serde(default)]
    pub convert: ConvertConfig,
}

impl PackrootConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, PackrootError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, PackrootError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PackrootError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                PackrootError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, PackrootError> {
        toml::from_str(toml_str).map_err(|e| {
            PackrootError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `PACKROOT_{SECTION}_{FIELD}`
    /// 예: `PACKROOT_CATALOG_TIMEOUT_SECS=600`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "PACKROOT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "PACKROOT_GENERAL_LOG_FORMAT");

        // Catalog
        override_string(&mut self.catalog.binary, "PACKROOT_CATALOG_BINARY");
        override_csv(&mut self.catalog.args, "PACKROOT_CATALOG_ARGS");
        override_u64(
            &mut self.catalog.timeout_secs,
            "PACKROOT_CATALOG_TIMEOUT_SECS",
        );
        override_usize(
            &mut self.catalog.max_output_mb,
            "PACKROOT_CATALOG_MAX_OUTPUT_MB",
        );

        // Convert
        override_csv(
            &mut self.convert.package_types,
            "PACKROOT_CONVERT_PACKAGE_TYPES",
        );
        override_usize(
            &mut self.convert.max_artifacts,
            "PACKROOT_CONVERT_MAX_ARTIFACTS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PackrootError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // 카탈로거 바이너리 검증
        if self.catalog.binary.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "catalog.binary".to_owned(),
                reason: "cataloger binary must not be empty".to_owned(),
            }
            .into());
        }

        if self.catalog.timeout_secs == 0 || self.catalog.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue {
                field: "catalog.timeout_secs".to_owned(),
                reason: format!("must be 1-{MAX_TIMEOUT_SECS}"),
            }
            .into());
        }

        if self.catalog.max_output_mb == 0 || self.catalog.max_output_mb > MAX_OUTPUT_MB {
            return Err(ConfigError::InvalidValue {
                field: "catalog.max_output_mb".to_owned(),
                reason: format!("must be 1-{MAX_OUTPUT_MB}"),
            }
            .into());
        }

        if self.convert.max_artifacts == 0 || self.convert.max_artifacts > MAX_ARTIFACTS_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "convert.max_artifacts".to_owned(),
                reason: format!("must be 1-{MAX_ARTIFACTS_LIMIT}"),
            }
            .into());
        }

        // 허용 목록 항목은 비어있으면 안 됨
        for package_type in &self.convert.package_types {
            if package_type.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "convert.package_types".to_owned(),
                    reason: "package type entries must not be empty".to_owned(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// 설정 상한값 상수
const MAX_TIMEOUT_SECS: u64 = 3_600; // 1 hour
const MAX_OUTPUT_MB: usize = 1_024; // 1 GB
const MAX_ARTIFACTS_LIMIT: usize = 1_000_000;

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 외부 카탈로거 호출 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// 카탈로거 바이너리 경로 또는 이름
    pub binary: String,
    /// 바이너리에 전달할 인자 (스캔 대상 디렉토리는 마지막에 덧붙음)
    pub args: Vec<String>,
    /// 실행 제한 시간 (초)
    pub timeout_secs: u64,
    /// 출력 최대 크기 (MB)
    pub max_output_mb: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            binary: "syft".to_owned(),
            args: vec!["-o".to_owned(), "json".to_owned()],
            timeout_secs: 300,
            max_output_mb: 64,
        }
    }
}

/// 변환 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// 변환 대상 패키지 타입 허용 목록 (빈 목록 = 내장 핸들러 전체)
    pub package_types: Vec<String>,
    /// 단일 카탈로그의 최대 아티팩트 수
    pub max_artifacts: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            package_types: vec![],
            max_artifacts: 50_000,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(value) = std::env::var(env_key) {
        *target = value;
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(value) = std::env::var(env_key) {
        match value.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(env = env_key, value = %value, "ignoring non-numeric env override"),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(value) = std::env::var(env_key) {
        match value.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(env = env_key, value = %value, "ignoring non-numeric env override"),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(value) = std::env::var(env_key) {
        *target = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
    }
}
