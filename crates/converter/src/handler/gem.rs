//! Ruby gem 패키지 핸들러

use super::{PackageHandler, UNKNOWN_VERSION};
use crate::error::ConverterError;
use crate::findings::{BASE, FindingsBuilder, PACKAGE_LIST};
use crate::types::Artifact;

/// gem 생태계 버킷 키
pub const PKGS_GEM: &str = "pkgs.gem";

/// gem 타입 핸들러
pub struct GemHandler;

impl PackageHandler for GemHandler {
    fn package_type(&self) -> &str {
        "gem"
    }

    fn record(
        &self,
        findings: &mut FindingsBuilder,
        artifact: &Artifact,
    ) -> Result<(), ConverterError> {
        let version = artifact.version.as_deref().unwrap_or(UNKNOWN_VERSION);
        findings.put(
            &[PACKAGE_LIST, PKGS_GEM, BASE, artifact.name.as_str()],
            version,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_under_gem_bucket() {
        let artifact: Artifact = serde_json::from_value(json!({
            "id": "g1",
            "name": "rake",
            "version": "13.0.6",
            "type": "gem"
        }))
        .unwrap();

        let mut findings = FindingsBuilder::new();
        GemHandler.record(&mut findings, &artifact).unwrap();

        assert_eq!(
            findings.get(&[PACKAGE_LIST, PKGS_GEM, BASE, "rake"]),
            Some(&json!("13.0.6"))
        );
    }
}
