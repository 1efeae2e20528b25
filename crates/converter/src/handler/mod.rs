//! 패키지 핸들러 — 타입별 translate-and-record 주입점
//!
//! [`PackageHandler`] trait은 필터를 통과한 아티팩트 하나를 findings 문서에
//! 기록하는 방법을 정의합니다. [`HandlerRegistry`]는 패키지 타입 문자열을
//! 핸들러 능력 객체에 매핑하며, 변환기 생성 시점에 명시적으로 주입됩니다 —
//! 전역 상태가 아니므로 테스트 더블 교체가 자유롭습니다.
//!
//! 레지스트리에 없는 타입의 아티팩트는 필터 단계에서 제외되므로,
//! 핸들러는 자신이 담당하는 타입만 받는다고 가정할 수 있습니다.
//!
//! # 확장
//!
//! 새로운 생태계를 지원하려면 `PackageHandler`를 구현하고
//! [`HandlerRegistry::register`]로 등록합니다.

pub mod gem;
pub mod java;
pub mod npm;
pub mod os;
pub mod python;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ConverterError;
use crate::findings::FindingsBuilder;
use crate::types::Artifact;

/// 패키지 타입 하나의 translate-and-record 능력
pub trait PackageHandler: Send + Sync {
    /// 이 핸들러가 담당하는 패키지 타입 태그를 반환합니다.
    fn package_type(&self) -> &str;

    /// 아티팩트 하나를 findings 문서에 기록합니다.
    ///
    /// 기록 위치와 형태는 전적으로 핸들러 소관입니다.
    fn record(
        &self,
        findings: &mut FindingsBuilder,
        artifact: &Artifact,
    ) -> Result<(), ConverterError>;
}

/// 패키지 타입 → 핸들러 매핑
///
/// 프로세스 시작 시 한 번 구성되어 변환기에 주입되고, 이후 읽기
/// 전용으로 사용됩니다.
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn PackageHandler>>,
}

impl HandlerRegistry {
    /// 빈 레지스트리를 생성합니다.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// 내장 핸들러가 모두 등록된 레지스트리를 생성합니다.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(os::OsPackageHandler::apk()));
        registry.register(Arc::new(os::OsPackageHandler::deb()));
        registry.register(Arc::new(os::OsPackageHandler::rpm()));
        registry.register(Arc::new(python::PythonHandler));
        registry.register(Arc::new(npm::NpmHandler));
        registry.register(Arc::new(gem::GemHandler));
        registry.register(Arc::new(java::JavaArchiveHandler::java_archive()));
        registry.register(Arc::new(java::JavaArchiveHandler::jenkins_plugin()));
        registry
    }

    /// 내장 핸들러 중 허용 목록에 있는 타입만 남긴 레지스트리를 생성합니다.
    ///
    /// 빈 허용 목록은 전체 내장 핸들러를 뜻합니다. 목록에 있지만 내장
    /// 핸들러가 없는 타입은 경고 후 무시됩니다.
    pub fn with_defaults_restricted(package_types: &[String]) -> Self {
        let mut registry = Self::with_defaults();
        if package_types.is_empty() {
            return registry;
        }
        for unknown in package_types
            .iter()
            .filter(|t| !registry.supports(t))
        {
            tracing::warn!(package_type = %unknown, "no built-in handler for allowlisted type");
        }
        registry
            .handlers
            .retain(|package_type, _| package_types.iter().any(|t| t == package_type));
        registry
    }

    /// 핸들러를 등록합니다. 같은 타입의 기존 핸들러는 대체됩니다.
    pub fn register(&mut self, handler: Arc<dyn PackageHandler>) {
        self.handlers
            .insert(handler.package_type().to_owned(), handler);
    }

    /// 주어진 패키지 타입에 핸들러가 있는지 확인합니다.
    pub fn supports(&self, package_type: &str) -> bool {
        self.handlers.contains_key(package_type)
    }

    /// 패키지 타입의 핸들러를 조회합니다.
    pub fn get(&self, package_type: &str) -> Option<&Arc<dyn PackageHandler>> {
        self.handlers.get(package_type)
    }

    /// 등록된 패키지 타입 목록을 정렬하여 반환합니다.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// 등록된 핸들러 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// 레지스트리가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// 핸들러가 버전 없는 아티팩트에 기록하는 대체 버전 값
pub(crate) const UNKNOWN_VERSION: &str = "0";
