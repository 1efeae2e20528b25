//! 변환기 에러 타입
//!
//! [`ConverterError`]는 변환기 모듈 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ConverterError> for PackrootError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **카탈로거 호출**: `CatalogSpawn`, `CatalogFailed`, `CatalogTimeout`,
//!   `CatalogOutputTooLarge`, `CatalogParse`
//! - **변환**: `MissingHandler`, `PathConflict`, `TooManyArtifacts`
//! - **설정**: `Config`
//! - **파일 I/O**: `Io`

use packroot_core::error::{CatalogError, ConvertError, PackrootError};

/// 변환기 도메인 에러
///
/// 변환기 내부의 모든 에러 시나리오를 포함합니다.
///
/// # 에러 변환
///
/// `From<ConverterError> for PackrootError` 구현으로
/// CLI에서 사용하는 최상위 에러 타입으로 자동 변환됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    /// 카탈로거 프로세스 실행 실패
    #[error("failed to spawn cataloger '{binary}': {reason}")]
    CatalogSpawn {
        /// 실행하려던 바이너리
        binary: String,
        /// 실패 사유
        reason: String,
    },

    /// 카탈로거가 실패 상태로 종료
    #[error("cataloger exited with status {status}: {stderr}")]
    CatalogFailed {
        /// 종료 상태 (시그널 종료 시 "signal")
        status: String,
        /// stderr 끝부분
        stderr: String,
    },

    /// 카탈로거 실행 제한 시간 초과
    #[error("cataloger timed out after {secs}s")]
    CatalogTimeout {
        /// 제한 시간 (초)
        secs: u64,
    },

    /// 카탈로거 출력 크기 초과
    #[error("cataloger output too large: {size} bytes (max: {max})")]
    CatalogOutputTooLarge {
        /// 실제 출력 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 카탈로그 문서 파싱 실패
    #[error("failed to parse catalog document: {0}")]
    CatalogParse(String),

    /// 입력 카탈로그의 아티팩트 수가 허용 한도 초과
    #[error("catalog has too many artifacts: {count} (max: {max})")]
    TooManyArtifacts {
        /// 실제 아티팩트 수
        count: usize,
        /// 최대 허용 수
        max: usize,
    },

    /// 필터를 통과한 아티팩트의 타입에 핸들러가 없음
    ///
    /// 필터가 미지원 타입을 구조적으로 걸러내므로 정상 경로에서는 발생할 수
    /// 없습니다. 발생 시 필터/레지스트리 불일치를 뜻하는 프로그래밍 결함이며
    /// 실행 전체를 중단시킵니다.
    #[error("no handler registered for surviving package type '{package_type}'")]
    MissingHandler {
        /// 핸들러가 없는 패키지 타입
        package_type: String,
    },

    /// findings 경로 충돌 — 객체가 아닌 중간 노드를 통과해 기록하려 함
    #[error("findings path conflict at '{path}'")]
    PathConflict {
        /// 충돌이 발생한 경로
        path: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },
}

impl From<ConverterError> for PackrootError {
    fn from(err: ConverterError) -> Self {
        match err {
            ConverterError::CatalogSpawn { binary, reason } => {
                PackrootError::Catalog(CatalogError::Spawn { binary, reason })
            }
            ConverterError::CatalogFailed { status, stderr } => {
                PackrootError::Catalog(CatalogError::Failed { status, stderr })
            }
            ConverterError::CatalogTimeout { secs } => {
                PackrootError::Catalog(CatalogError::Timeout { secs })
            }
            ConverterError::CatalogOutputTooLarge { size, max } => {
                PackrootError::Catalog(CatalogError::OutputTooLarge { size, max })
            }
            ConverterError::CatalogParse(msg) => PackrootError::Catalog(CatalogError::Parse(msg)),
            ConverterError::TooManyArtifacts { count, max } => PackrootError::Convert(
                ConvertError::TooLarge(format!("{count} artifacts (max: {max})")),
            ),
            ConverterError::MissingHandler { package_type } => {
                PackrootError::Convert(ConvertError::HandlerMissing(package_type))
            }
            ConverterError::PathConflict { path } => PackrootError::Convert(
                ConvertError::Findings(format!("path conflict at '{path}'")),
            ),
            ConverterError::Config { field, reason } => PackrootError::Convert(
                ConvertError::Failed(format!("config error: {field}: {reason}")),
            ),
            ConverterError::Io { path, source } => PackrootError::Convert(ConvertError::Failed(
                format!("io error: {path}: {source}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_spawn_error_display() {
        let err = ConverterError::CatalogSpawn {
            binary: "syft".to_owned(),
            reason: "No such file or directory".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("syft"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn catalog_failed_error_display() {
        let err = ConverterError::CatalogFailed {
            status: "1".to_owned(),
            stderr: "could not read image".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("status 1"));
        assert!(msg.contains("could not read image"));
    }

    #[test]
    fn catalog_timeout_error_display() {
        let err = ConverterError::CatalogTimeout { secs: 300 };
        assert!(err.to_string().contains("300s"));
    }

    #[test]
    fn too_many_artifacts_error_display() {
        let err = ConverterError::TooManyArtifacts {
            count: 60_000,
            max: 50_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("60000"));
        assert!(msg.contains("50000"));
    }

    #[test]
    fn missing_handler_error_display() {
        let err = ConverterError::MissingHandler {
            package_type: "rpm".to_owned(),
        };
        assert!(err.to_string().contains("'rpm'"));
    }

    #[test]
    fn path_conflict_error_display() {
        let err = ConverterError::PathConflict {
            path: "package_list/pkgs.all".to_owned(),
        };
        assert!(err.to_string().contains("package_list/pkgs.all"));
    }

    #[test]
    fn converts_to_packroot_error_catalog_parse() {
        let err = ConverterError::CatalogParse("unexpected end of input".to_owned());
        let top: PackrootError = err.into();
        assert!(matches!(
            top,
            PackrootError::Catalog(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn converts_to_packroot_error_missing_handler() {
        let err = ConverterError::MissingHandler {
            package_type: "deb".to_owned(),
        };
        let top: PackrootError = err.into();
        assert!(matches!(
            top,
            PackrootError::Convert(ConvertError::HandlerMissing(_))
        ));
    }

    #[test]
    fn converts_to_packroot_error_path_conflict() {
        let err = ConverterError::PathConflict {
            path: "a/b".to_owned(),
        };
        let top: PackrootError = err.into();
        assert!(matches!(
            top,
            PackrootError::Convert(ConvertError::Findings(_))
        ));
    }

    #[test]
    fn converts_to_packroot_error_too_many() {
        let err = ConverterError::TooManyArtifacts { count: 2, max: 1 };
        let top: PackrootError = err.into();
        assert!(matches!(
            top,
            PackrootError::Convert(ConvertError::TooLarge(_))
        ));
    }
}
