//! 에러 타입 — 도메인별 에러 정의

/// Packroot 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum PackrootError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 카탈로거 호출 에러
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// 변환 파이프라인 에러
    #[error("convert error: {0}")]
    Convert(#[from] ConvertError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 외부 카탈로거 호출 에러
///
/// 카탈로거 실패는 변환 코어에서 가공하지 않고 호출자에게 그대로 전파됩니다.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// 카탈로거 프로세스 실행 실패
    #[error("failed to spawn cataloger '{binary}': {reason}")]
    Spawn { binary: String, reason: String },

    /// 카탈로거가 실패 상태로 종료
    #[error("cataloger exited with status {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// 실행 제한 시간 초과
    #[error("cataloger timed out after {secs}s")]
    Timeout { secs: u64 },

    /// 출력 크기 초과
    #[error("cataloger output too large: {size} bytes (max: {max})")]
    OutputTooLarge { size: usize, max: usize },

    /// 카탈로그 문서 파싱 실패
    #[error("failed to parse catalog document: {0}")]
    Parse(String),
}

/// 변환 파이프라인 에러
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// 필터를 통과한 아티팩트에 핸들러가 없음 — 프로그래밍 결함
    #[error("no handler registered for surviving package type '{0}'")]
    HandlerMissing(String),

    /// findings 문서 조립 실패
    #[error("findings error: {0}")]
    Findings(String),

    /// 입력 카탈로그가 허용 한도를 초과
    #[error("catalog too large: {0}")]
    TooLarge(String),

    /// 변환 실패 (기타)
    #[error("conversion failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = PackrootError::Config(ConfigError::InvalidValue {
            field: "general.log_level".to_owned(),
            reason: "must be one of: trace, debug, info, warn, error".to_owned(),
        });
        let msg = err.to_string();
        assert!(msg.contains("general.log_level"));
        assert!(msg.contains("config error"));
    }

    #[test]
    fn catalog_error_display() {
        let err = PackrootError::Catalog(CatalogError::Timeout { secs: 300 });
        assert!(err.to_string().contains("300"));
    }

    #[test]
    fn convert_error_display() {
        let err = PackrootError::Convert(ConvertError::HandlerMissing("rpm".to_owned()));
        let msg = err.to_string();
        assert!(msg.contains("rpm"));
        assert!(msg.contains("no handler registered"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: PackrootError = io_err.into();
        assert!(matches!(err, PackrootError::Io(_)));
    }

    #[test]
    fn catalog_failed_carries_stderr() {
        let err = CatalogError::Failed {
            status: "1".to_owned(),
            stderr: "unknown image source".to_owned(),
        };
        assert!(err.to_string().contains("unknown image source"));
    }
}
