//! NPM 패키지 핸들러

use super::{PackageHandler, UNKNOWN_VERSION};
use crate::error::ConverterError;
use crate::findings::{BASE, FindingsBuilder, PACKAGE_LIST};
use crate::types::Artifact;

/// NPM 생태계 버킷 키
pub const PKGS_NPM: &str = "pkgs.npm";

/// npm 타입 핸들러
pub struct NpmHandler;

impl PackageHandler for NpmHandler {
    fn package_type(&self) -> &str {
        "npm"
    }

    fn record(
        &self,
        findings: &mut FindingsBuilder,
        artifact: &Artifact,
    ) -> Result<(), ConverterError> {
        let version = artifact.version.as_deref().unwrap_or(UNKNOWN_VERSION);
        findings.put(
            &[PACKAGE_LIST, PKGS_NPM, BASE, artifact.name.as_str()],
            version,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_under_npm_bucket() {
        let artifact: Artifact = serde_json::from_value(json!({
            "id": "n1",
            "name": "lodash",
            "version": "4.17.21",
            "type": "npm"
        }))
        .unwrap();

        let mut findings = FindingsBuilder::new();
        NpmHandler.record(&mut findings, &artifact).unwrap();

        assert_eq!(
            findings.get(&[PACKAGE_LIST, PKGS_NPM, BASE, "lodash"]),
            Some(&json!("4.17.21"))
        );
    }

    #[test]
    fn scoped_package_name_is_preserved() {
        let artifact: Artifact = serde_json::from_value(json!({
            "name": "@types/node",
            "version": "20.1.0",
            "type": "npm"
        }))
        .unwrap();

        let mut findings = FindingsBuilder::new();
        NpmHandler.record(&mut findings, &artifact).unwrap();

        assert_eq!(
            findings.get(&[PACKAGE_LIST, PKGS_NPM, BASE, "@types/node"]),
            Some(&json!("20.1.0"))
        );
    }
}
