//! 메트릭 상수 및 설명 등록
//!
//! 모든 Prometheus 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()`, `metrics::gauge!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `packroot_`
//! - 모듈명: `converter_`, `cataloger_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency), 없음 (gauge)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(packroot_core::metrics::CONVERTER_RUNS_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 패키지 타입 레이블 키 (rpm, deb, apk, npm, ...)
pub const LABEL_PACKAGE_TYPE: &str = "package_type";

/// 관계 스키마 레이블 키 (edge-list, embedded)
pub const LABEL_SCHEMA: &str = "schema";

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

// ─── Converter 메트릭 ──────────────────────────────────────────────

/// Converter: 완료된 변환 실행 수 (counter)
pub const CONVERTER_RUNS_TOTAL: &str = "packroot_converter_runs_total";

/// Converter: 입력으로 받은 아티팩트 수 (counter)
pub const CONVERTER_ARTIFACTS_SEEN_TOTAL: &str = "packroot_converter_artifacts_seen_total";

/// Converter: 억제된 아티팩트 수 (counter)
pub const CONVERTER_ARTIFACTS_SUPPRESSED_TOTAL: &str =
    "packroot_converter_artifacts_suppressed_total";

/// Converter: findings에 기록된 패키지 수 (counter, label: package_type)
pub const CONVERTER_PACKAGES_RECORDED_TOTAL: &str = "packroot_converter_packages_recorded_total";

/// Converter: 변환 소요 시간 (histogram, 초)
pub const CONVERTER_RUN_DURATION_SECONDS: &str = "packroot_converter_run_duration_seconds";

// ─── Cataloger 메트릭 ──────────────────────────────────────────────

/// Cataloger: 외부 카탈로거 호출 수 (counter, label: result)
pub const CATALOGER_INVOCATIONS_TOTAL: &str = "packroot_cataloger_invocations_total";

/// Cataloger: 카탈로거 실행 소요 시간 (histogram, 초)
pub const CATALOGER_DURATION_SECONDS: &str = "packroot_cataloger_duration_seconds";

/// Cataloger: 마지막 카탈로그 문서 크기 (gauge, 바이트)
pub const CATALOGER_OUTPUT_BYTES: &str = "packroot_cataloger_output_bytes";

// ─── 히스토그램 버킷 정의 ────────────────────────────────────────────

/// 변환 소요 시간 히스토그램 버킷 (초)
///
/// 1ms ~ 30s 범위 (순수 연산, I/O 없음)
pub const RUN_DURATION_BUCKETS: [f64; 9] =
    [0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 10.0, 30.0];

/// 카탈로거 실행 시간 히스토그램 버킷 (초)
///
/// 100ms ~ 600s 범위 (컨테이너 파일시스템 전체 탐색 포함)
pub const CATALOG_DURATION_BUCKETS: [f64; 9] =
    [0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0, 300.0, 600.0];

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// `metrics::describe_counter!()`, `describe_gauge!()`, `describe_histogram!()`을
/// 호출하여 Prometheus HELP 텍스트를 설정합니다.
///
/// 이 함수는 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    // Converter
    describe_counter!(
        CONVERTER_RUNS_TOTAL,
        "Total number of catalog-to-findings conversion runs completed"
    );
    describe_counter!(
        CONVERTER_ARTIFACTS_SEEN_TOTAL,
        "Total number of artifacts read from cataloger output"
    );
    describe_counter!(
        CONVERTER_ARTIFACTS_SUPPRESSED_TOTAL,
        "Total number of artifacts suppressed (unsupported type or ownership)"
    );
    describe_counter!(
        CONVERTER_PACKAGES_RECORDED_TOTAL,
        "Packages recorded into findings documents, per package type"
    );
    describe_histogram!(
        CONVERTER_RUN_DURATION_SECONDS,
        "Time to convert one catalog document in seconds"
    );

    // Cataloger
    describe_counter!(
        CATALOGER_INVOCATIONS_TOTAL,
        "Total number of external cataloger invocations"
    );
    describe_histogram!(
        CATALOGER_DURATION_SECONDS,
        "External cataloger wall-clock time in seconds"
    );
    describe_gauge!(
        CATALOGER_OUTPUT_BYTES,
        "Size of the most recent catalog document in bytes"
    );
}
