//! 변환기 설정
//!
//! [`ConverterConfig`]는 core의 [`ConvertConfig`](packroot_core::config::ConvertConfig)에서
//! 파생되는 변환 파이프라인 고유 설정입니다.
//!
//! # 사용 예시
//!
//! ```
//! use packroot_converter::ConverterConfig;
//!
//! // 기본값으로 생성
//! let config = ConverterConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! use packroot_converter::ConverterConfigBuilder;
//!
//! let config = ConverterConfigBuilder::new()
//!     .package_types(vec!["rpm".to_owned(), "python".to_owned()])
//!     .max_artifacts(10_000)
//!     .build()
//!     .unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConverterError;

/// 변환 파이프라인 설정
///
/// # 필드
///
/// - **package_types**: 변환 대상 타입 허용 목록 (빈 목록 = 내장 전체)
/// - **max_artifacts**: 단일 카탈로그의 최대 아티팩트 수
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// 변환 대상 패키지 타입 허용 목록 (빈 목록 = 내장 핸들러 전체)
    pub package_types: Vec<String>,
    /// 단일 카탈로그의 최대 아티팩트 수
    pub max_artifacts: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            package_types: vec![],
            max_artifacts: 50_000,
        }
    }
}

/// 설정 상한값 상수
const MAX_ARTIFACTS_LIMIT: usize = 1_000_000;

impl ConverterConfig {
    /// core의 `ConvertConfig`에서 변환기 설정을 생성합니다.
    pub fn from_core(core: &packroot_core::config::ConvertConfig) -> Self {
        Self {
            package_types: core.package_types.clone(),
            max_artifacts: core.max_artifacts,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `max_artifacts`: 1-1000000
    /// - `package_types`: 항목은 비어있지 않은 문자열
    pub fn validate(&self) -> Result<(), ConverterError> {
        if self.max_artifacts == 0 || self.max_artifacts > MAX_ARTIFACTS_LIMIT {
            return Err(ConverterError::Config {
                field: "max_artifacts".to_owned(),
                reason: format!("must be 1-{MAX_ARTIFACTS_LIMIT}"),
            });
        }

        for package_type in &self.package_types {
            if package_type.is_empty() {
                return Err(ConverterError::Config {
                    field: "package_types".to_owned(),
                    reason: "package type entries must not be empty".to_owned(),
                });
            }
        }

        Ok(())
    }
}

/// [`ConverterConfig`] 빌더
#[derive(Default)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 패키지 타입 허용 목록을 설정합니다.
    pub fn package_types(mut self, types: Vec<String>) -> Self {
        self.config.package_types = types;
        self
    }

    /// 최대 아티팩트 수를 설정합니다.
    pub fn max_artifacts(mut self, max: usize) -> Self {
        self.config.max_artifacts = max;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ConverterError::Config` 반환
    pub fn build(self) -> Result<ConverterConfig, ConverterError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
