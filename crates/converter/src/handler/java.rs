//! Java 아카이브 핸들러 — java-archive / jenkins-plugin
//!
//! JAR/WAR/EAR와 Jenkins 플러그인(HPI)은 카탈로거가 다른 타입 태그로
//! 보고하지만 기록 형태가 같아 하나의 핸들러로 처리합니다. 둘 다
//! `pkgs.java` 버킷에 모입니다.

use super::{PackageHandler, UNKNOWN_VERSION};
use crate::error::ConverterError;
use crate::findings::{BASE, FindingsBuilder, PACKAGE_LIST};
use crate::types::Artifact;

/// Java 생태계 버킷 키
pub const PKGS_JAVA: &str = "pkgs.java";

/// java-archive / jenkins-plugin 공용 핸들러
pub struct JavaArchiveHandler {
    package_type: &'static str,
}

impl JavaArchiveHandler {
    /// 일반 Java 아카이브(JAR/WAR/EAR) 핸들러를 생성합니다.
    pub const fn java_archive() -> Self {
        Self {
            package_type: "java-archive",
        }
    }

    /// Jenkins 플러그인 핸들러를 생성합니다.
    pub const fn jenkins_plugin() -> Self {
        Self {
            package_type: "jenkins-plugin",
        }
    }
}

impl PackageHandler for JavaArchiveHandler {
    fn package_type(&self) -> &str {
        self.package_type
    }

    fn record(
        &self,
        findings: &mut FindingsBuilder,
        artifact: &Artifact,
    ) -> Result<(), ConverterError> {
        let version = artifact.version.as_deref().unwrap_or(UNKNOWN_VERSION);
        findings.put(
            &[PACKAGE_LIST, PKGS_JAVA, BASE, artifact.name.as_str()],
            version,
        )
    }
}
