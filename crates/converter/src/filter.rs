//! 아티팩트 필터 — 루트 패키지 선별
//!
//! 카탈로거가 발견한 아티팩트 전체에서 SBOM에 올라갈 루트 패키지만
//! 남깁니다. 두 가지 판정이 적용됩니다:
//!
//! 1. 핸들러가 등록되지 않은 타입은 소유 관계와 무관하게 제외
//! 2. 다른 패키지에 파일 소유된 아티팩트는 소유권 정책에 따라 억제
//!
//! 관계 스키마 세대별로 별도 모드가 있으며, 한 실행에서 하나만 적용됩니다.
//! 어느 모드든 생존자의 상대 순서는 입력 순서를 유지하고, 아티팩트를
//! 복사하지 않고 참조만 반환합니다.

use std::collections::{HashMap, HashSet};

use packroot_core::types::PackageClass;

use crate::handler::HandlerRegistry;
use crate::ownership::is_ownership_allowed;
use crate::types::{Artifact, RawCatalog, RelationSchema, Relationship};

/// edge-list 스키마 모드 필터 (레거시)
///
/// `ownership-by-files` 간선의 child로 한 번이라도 등장한 아티팩트는 부모
/// 타입과 무관하게 무조건 억제됩니다. 다른 종류의 간선이나 다른 child id를
/// 가리키는 간선은 영향이 없습니다.
pub fn filter_by_relationships<'a>(
    artifacts: &'a [Artifact],
    relationships: &[Relationship],
    registry: &HandlerRegistry,
) -> Vec<&'a Artifact> {
    let owned_children: HashSet<&str> = relationships
        .iter()
        .filter(|r| r.is_file_ownership())
        .map(|r| r.child.as_str())
        .collect();

    artifacts
        .iter()
        .filter(|artifact| {
            if !registry.supports(&artifact.package_type) {
                return false;
            }
            // id 없는 아티팩트는 어떤 간선과도 매칭될 수 없음
            !artifact
                .id
                .as_deref()
                .is_some_and(|id| owned_children.contains(id))
        })
        .collect()
}

/// embedded 스키마 모드 필터 (현행, 분류 인지)
///
/// 각 아티팩트의 내장 부모 id를 해석해 소유권 정책을 적용합니다.
/// 해석되지 않는 부모 id는 조용히 건너뛰며, 부모 id가 하나도 해석되지
/// 않으면 "소유자 없음"과 동일하게 아티팩트를 유지합니다 — 빈 부모
/// 집합으로 정책을 호출하는 일은 없습니다.
pub fn filter_by_embedded_parents<'a>(
    artifacts: &'a [Artifact],
    registry: &HandlerRegistry,
) -> Vec<&'a Artifact> {
    let by_id: HashMap<&str, &Artifact> = artifacts
        .iter()
        .filter_map(|artifact| artifact.id.as_deref().map(|id| (id, artifact)))
        .collect();

    artifacts
        .iter()
        .filter(|artifact| {
            if !registry.supports(&artifact.package_type) {
                return false;
            }

            let parent_ids = artifact.parent_ids();
            if parent_ids.is_empty() {
                return true;
            }

            let parent_classes: Vec<PackageClass> = parent_ids
                .iter()
                .filter_map(|id| by_id.get(id.as_str()))
                .map(|parent| parent.class())
                .collect();
            if parent_classes.is_empty() {
                return true;
            }

            !is_ownership_allowed(artifact.class(), &parent_classes)
        })
        .collect()
}

/// 카탈로그의 스키마 세대를 판별하고 해당 모드 필터를 적용합니다.
pub fn select_roots<'a>(
    catalog: &'a RawCatalog,
    registry: &HandlerRegistry,
) -> (RelationSchema, Vec<&'a Artifact>) {
    let schema = catalog.schema();
    let roots = match schema {
        RelationSchema::EdgeList => {
            filter_by_relationships(&catalog.artifacts, &catalog.relationships, registry)
        }
        RelationSchema::Embedded => filter_by_embedded_parents(&catalog.artifacts, registry),
    };
    (schema, roots)
}
