//! Python 패키지 핸들러
//!
//! pip/egg/wheel로 설치된 패키지를 `pkgs.python` 버킷에 기록합니다.

use super::{PackageHandler, UNKNOWN_VERSION};
use crate::error::ConverterError;
use crate::findings::{BASE, FindingsBuilder, PACKAGE_LIST};
use crate::types::Artifact;

/// Python 생태계 버킷 키
pub const PKGS_PYTHON: &str = "pkgs.python";

/// python 타입 핸들러
pub struct PythonHandler;

impl PackageHandler for PythonHandler {
    fn package_type(&self) -> &str {
        "python"
    }

    fn record(
        &self,
        findings: &mut FindingsBuilder,
        artifact: &Artifact,
    ) -> Result<(), ConverterError> {
        let version = artifact.version.as_deref().unwrap_or(UNKNOWN_VERSION);
        findings.put(
            &[PACKAGE_LIST, PKGS_PYTHON, BASE, artifact.name.as_str()],
            version,
        )
    }
}
