//! 도메인 타입 — 카탈로그 문서 전용 데이터 구조
//!
//! 외부 카탈로거의 JSON 출력을 나타내는 타입을 정의합니다.
//! 관계 데이터는 두 세대의 스키마가 관찰됩니다:
//!
//! - **edge-list** (레거시): 최상위 `artifactRelationships` 배열에
//!   `{parent, child, type}` 간선이 나열됨
//! - **embedded** (현행): 각 아티팩트가 `relations.parentsByFileOwnership`에
//!   자신을 소유한 부모 id 목록을 직접 가짐
//!
//! 두 스키마 모두 생략될 수 있으며, 생략은 "관계 없음"으로 취급합니다.
//! 아티팩트와 관계 데이터는 변환 실행마다 한 번 읽기 전용으로 구성됩니다.

use std::fmt;

use serde::Deserialize;

use packroot_core::types::PackageClass;

/// 필터에 의미 있는 유일한 관계 종류
///
/// 한 패키지의 파일들이 다른 패키지의 설치 파일에 포함되는 관계입니다
/// (예: RPM 안에 함께 설치된 python 패키지). 다른 종류의 간선은 모두
/// 무시됩니다.
pub const OWNERSHIP_BY_FILES: &str = "ownership-by-files";

/// 카탈로거 원시 출력 문서
///
/// 최소 구성: 선택적 `distro`, `artifacts` 목록, 그리고 스키마 세대에 따라
/// 선택적 `artifactRelationships` 목록. 모든 필드는 생략을 허용합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCatalog {
    /// 카탈로거가 감지한 베이스 배포판 (없을 수 있음)
    #[serde(default)]
    pub distro: Option<Distro>,
    /// 발견된 아티팩트 목록
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    /// 아티팩트 간 관계 간선 목록 (edge-list 스키마에서만 존재)
    #[serde(default, rename = "artifactRelationships")]
    pub relationships: Vec<Relationship>,
}

impl RawCatalog {
    /// 이 문서가 따르는 관계 스키마 세대를 판별합니다.
    ///
    /// 간선 목록이 하나라도 있으면 edge-list 세대, 없으면 embedded 세대로
    /// 봅니다. embedded 필드까지 없는 문서는 "관계 없음"이므로 어느 쪽으로
    /// 처리해도 결과가 같고, embedded 경로로 수렴합니다.
    pub fn schema(&self) -> RelationSchema {
        if self.relationships.is_empty() {
            RelationSchema::Embedded
        } else {
            RelationSchema::EdgeList
        }
    }
}

/// 카탈로거가 보고한 베이스 배포판 정보
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Distro {
    /// 배포판 이름 (예: "alpine", "busybox")
    #[serde(default)]
    pub name: Option<String>,
    /// 배포판 버전
    #[serde(default)]
    pub version: Option<String>,
}

impl Distro {
    /// 이름이 보고되었는지 확인합니다 (빈 문자열은 미보고로 취급).
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// BusyBox 베이스 여부를 대소문자 구분 없이 판별합니다.
    pub fn is_busybox(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case("busybox"))
    }
}

/// 발견된 패키지 아티팩트 하나
///
/// `id`는 스키마에 따라 없을 수 있는 불투명 식별자입니다. 핸들러가 사용하는
/// 생태계별 필드는 `extra`에 원형 그대로 보존되며 변환 코어는 해석하지
/// 않습니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artifact {
    /// 불투명 고유 식별자 (스키마에 따라 없을 수 있음)
    #[serde(default)]
    pub id: Option<String>,
    /// 패키지 이름
    #[serde(default)]
    pub name: String,
    /// 패키지 버전
    #[serde(default)]
    pub version: Option<String>,
    /// 생태계 타입 태그 (rpm, deb, apk, npm, python, ...)
    #[serde(rename = "type", default)]
    pub package_type: String,
    /// embedded 스키마의 소유 관계
    #[serde(default)]
    pub relations: Option<Relations>,
    /// 생태계별 나머지 필드 (핸들러 전용, 코어에는 불투명)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Artifact {
    /// 이 아티팩트 타입의 소유권 분류를 반환합니다.
    pub fn class(&self) -> PackageClass {
        PackageClass::of(&self.package_type)
    }

    /// 파일 소유 관계의 부모 id 목록을 반환합니다 (없으면 빈 슬라이스).
    pub fn parent_ids(&self) -> &[String] {
        self.relations
            .as_ref()
            .map(|r| r.parents_by_file_ownership.as_slice())
            .unwrap_or(&[])
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) version={}",
            self.name,
            self.package_type,
            self.version.as_deref().unwrap_or("?"),
        )
    }
}

/// embedded 스키마에서 아티팩트에 내장되는 소유 관계
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relations {
    /// 이 아티팩트를 파일 소유로 가진 부모 아티팩트 id 목록
    ///
    /// 생략 또는 빈 목록은 "알려진 소유자 없음"을 뜻합니다.
    #[serde(default, rename = "parentsByFileOwnership")]
    pub parents_by_file_ownership: Vec<String>,
}

/// edge-list 스키마의 방향 간선
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    /// 소유하는 쪽 아티팩트 id
    #[serde(default)]
    pub parent: String,
    /// 소유되는 쪽 아티팩트 id
    #[serde(default)]
    pub child: String,
    /// 관계 종류 — `ownership-by-files`만 필터에 의미가 있음
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Relationship {
    /// 파일 소유 관계 여부를 반환합니다.
    pub fn is_file_ownership(&self) -> bool {
        self.kind == OWNERSHIP_BY_FILES
    }
}

/// 관계 데이터 스키마 세대
///
/// 변환 파이프라인 경계에서 한 번 판별되며, 한 실행 안에서 두 세대가
/// 섞이지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationSchema {
    /// 최상위 간선 목록 기반 (레거시)
    EdgeList,
    /// 아티팩트 내장 부모 id 목록 기반 (현행)
    Embedded,
}

impl RelationSchema {
    /// 요약/메트릭 레이블용 문자열 표현을 반환합니다.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EdgeList => "edge-list",
            Self::Embedded => "embedded",
        }
    }
}

impl fmt::Display for RelationSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
