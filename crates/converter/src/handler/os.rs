//! OS 패키징 핸들러 — apk / deb / rpm
//!
//! 배포판 수준 패키지는 공통 버킷(`pkgs.all`)에 이름→버전으로 기록되고,
//! 상세 레코드가 `pkgs.allinfo`에 함께 남습니다. 세 형식 모두 기록 방식이
//! 동일하므로 타입 태그만 다른 하나의 핸들러로 처리합니다.

use serde_json::{Value, json};

use super::{PackageHandler, UNKNOWN_VERSION};
use crate::error::ConverterError;
use crate::findings::{BASE, FindingsBuilder, PACKAGE_LIST, PKGS_ALL, PKGS_ALLINFO};
use crate::types::Artifact;

/// apk / deb / rpm 공용 핸들러
pub struct OsPackageHandler {
    package_type: &'static str,
}

impl OsPackageHandler {
    /// Alpine apk 핸들러를 생성합니다.
    pub const fn apk() -> Self {
        Self {
            package_type: "apk",
        }
    }

    /// Debian dpkg 핸들러를 생성합니다.
    pub const fn deb() -> Self {
        Self {
            package_type: "deb",
        }
    }

    /// RPM 핸들러를 생성합니다.
    pub const fn rpm() -> Self {
        Self {
            package_type: "rpm",
        }
    }
}

impl PackageHandler for OsPackageHandler {
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
            &[PACKAGE_LIST, PKGS_ALL, BASE, artifact.name.as_str()],
            version,
        )?;

        let mut detail = json!({
            "name": artifact.name,
            "version": version,
            "type": self.package_type,
        });
        if let Some(licenses) = license_string(artifact) {
            detail["license"] = Value::String(licenses);
        }
        findings.put(
            &[PACKAGE_LIST, PKGS_ALLINFO, BASE, artifact.name.as_str()],
            detail,
        )
    }
}

/// 아티팩트의 불투명 `licenses` 필드를 공백 구분 문자열로 합칩니다.
fn license_string(artifact: &Artifact) -> Option<String> {
    let licenses = artifact.extra.get("licenses")?.as_array()?;
    let names: Vec<&str> = licenses.iter().filter_map(Value::as_str).collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(" "))
    }
}
