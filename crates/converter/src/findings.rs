//! findings 문서 조립 — 명시적 중첩 맵 빌더
//!
//! [`FindingsBuilder`]는 "중간 경로를 보장한 뒤 리프 값을 기록"하는 작업을
//! 단일 연산으로 제공합니다. 읽기 전용 조회는 절대 엔트리를 만들지 않으며,
//! 객체가 아닌 중간 노드를 통과해 기록하려는 시도는 에러로 드러납니다.
//!
//! 빌더는 실행당 하나 생성되고, [`FindingsBuilder::freeze`]로 불변
//! [`FindingsDocument`]가 되어 호출자에게 반환됩니다.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConverterError;

/// findings 루트의 패키지 목록 카테고리 키
pub const PACKAGE_LIST: &str = "package_list";
/// 전체 패키지 버킷 키
pub const PKGS_ALL: &str = "pkgs.all";
/// 패키지 상세 버킷 키
pub const PKGS_ALLINFO: &str = "pkgs.allinfo";
/// 버킷 내부의 기본 섹션 키
pub const BASE: &str = "base";

/// 조립 중인 findings 문서
///
/// 일반적인 중첩 `serde_json::Map`을 기반으로 하며, 자동 생성은
/// [`put`](Self::put) 호출 시에만 일어납니다.
#[derive(Debug, Default)]
pub struct FindingsBuilder {
    root: Map<String, Value>,
}

impl FindingsBuilder {
    /// 빈 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 경로의 중간 객체를 보장한 뒤 마지막 세그먼트에 리프 값을 기록합니다.
    ///
    /// `path`의 마지막 세그먼트가 리프 키이며, 그 앞 세그먼트들은 객체로
    /// 생성(또는 재사용)됩니다.
    ///
    /// # Errors
    ///
    /// - 빈 경로, 또는 객체가 아닌 기존 중간 노드를 통과하려는 경우
    ///   `ConverterError::PathConflict`. 둘 다 핸들러 쪽 프로그래밍 결함을
    ///   뜻합니다.
    pub fn put(
        &mut self,
        path: &[&str],
        value: impl Into<Value>,
    ) -> Result<(), ConverterError> {
        let Some((leaf, dirs)) = path.split_last() else {
            return Err(ConverterError::PathConflict {
                path: "(empty path)".to_owned(),
            });
        };

        let mut cursor = &mut self.root;
        for (depth, segment) in dirs.iter().enumerate() {
            let entry = cursor
                .entry((*segment).to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            cursor = match entry.as_object_mut() {
                Some(map) => map,
                None => {
                    return Err(ConverterError::PathConflict {
                        path: path[..=depth].join("/"),
                    });
                }
            };
        }

        cursor.insert((*leaf).to_owned(), value.into());
        Ok(())
    }

    /// 경로의 값을 조회합니다. 엔트리를 생성하지 않습니다.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.root, path)
    }

    /// 빌더를 불변 findings 문서로 확정합니다.
    pub fn freeze(self) -> FindingsDocument {
        FindingsDocument { root: self.root }
    }
}

/// 확정된 findings 문서
///
/// 유한한 중첩 key-value 구조이며, 루트 키 공간에 패키지 목록 카테고리
/// ([`PACKAGE_LIST`])를 포함합니다. 추가 자동 생성은 불가능합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FindingsDocument {
    root: Map<String, Value>,
}

impl FindingsDocument {
    /// 경로의 값을 조회합니다.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.root, path)
    }

    /// 루트에 엔트리가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// 문서 전체를 `serde_json::Value`로 반환합니다.
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

fn lookup<'a>(root: &'a Map<String, Value>, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = root.get(*first)?;
    for segment in rest {
        current = current.as_object()?.get(*segment)?;
    }
    Some(current)
}
