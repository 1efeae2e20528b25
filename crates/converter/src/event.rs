//! 변환 완료 이벤트
//!
//! [`ConvertEvent`]는 카탈로그 변환 한 건의 완료를 나타내는 이벤트입니다.
//! core의 [`Event`] trait을 구현하여 `tokio::mpsc` 채널을 통한 전송이
//! 가능합니다.
//!
//! # 사용 예시
//!
//! ```
//! use std::time::SystemTime;
//!
//! use packroot_converter::ConvertEvent;
//! use packroot_core::event::Event;
//! use packroot_core::types::ConversionSummary;
//!
//! let summary = ConversionSummary {
//!     run_id: "run-001".to_owned(),
//!     source: "/images/alpine".to_owned(),
//!     schema: "embedded".to_owned(),
//!     distro: Some("alpine".to_owned()),
//!     artifacts_total: 42,
//!     roots_kept: 40,
//!     artifacts_suppressed: 2,
//!     completed_at: SystemTime::now(),
//! };
//!
//! let event = ConvertEvent::new(summary);
//! assert_eq!(event.event_type(), "convert");
//! ```

use std::fmt;

use packroot_core::event::{EVENT_TYPE_CONVERT, Event, EventMetadata, MODULE_CONVERTER};
use packroot_core::types::ConversionSummary;

/// 변환 완료 이벤트
///
/// 변환 완료 시 생성되어 다운스트림 소비자에게 전달됩니다.
/// `Send + Sync + 'static` 바운드를 만족하여 `tokio::mpsc` 전송이 가능합니다.
#[derive(Debug, Clone)]
pub struct ConvertEvent {
    /// 이벤트 고유 ID
    pub id: String,
    /// 이벤트 메타데이터
    pub metadata: EventMetadata,
    /// 변환 실행 요약
    pub summary: ConversionSummary,
}

impl ConvertEvent {
    /// 새로운 trace를 시작하는 변환 이벤트를 생성합니다.
    pub fn new(summary: ConversionSummary) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            metadata: EventMetadata::with_new_trace(MODULE_CONVERTER),
            summary,
        }
    }

    /// 기존 trace에 연결된 변환 이벤트를 생성합니다.
    pub fn with_trace(summary: ConversionSummary, trace_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            metadata: EventMetadata::new(MODULE_CONVERTER, trace_id),
            summary,
        }
    }
}

impl Event for ConvertEvent {
    fn event_id(&self) -> &str {
        &self.id
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    fn event_type(&self) -> &str {
        EVENT_TYPE_CONVERT
    }
}

impl fmt::Display for ConvertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConvertEvent[{}] source={} artifacts={} roots={}",
            &self.id[..8.min(self.id.len())],
            self.summary.source,
            self.summary.artifacts_total,
            self.summary.roots_kept,
        )
    }
}
