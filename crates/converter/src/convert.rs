//! 변환 오케스트레이터 — 카탈로그 → findings 흐름 관리
//!
//! [`Converter`]는 카탈로그 문서 하나를 findings 문서로 바꾸는 전체 흐름을
//! 관장합니다:
//!
//! ```text
//! image_dir --> Cataloger --> RawCatalog
//!                                │
//!                     배포판 마커 기록 (1회)
//!                                │
//!                      스키마 판별 + 필터
//!                                │
//!                 survivor --> HandlerRegistry --> FindingsBuilder
//!                                │
//!                        FindingsDocument + ConversionSummary
//!                                │
//!                        mpsc --> downstream (선택)
//! ```
//!
//! 한 실행은 완전한 문서를 반환하거나 에러로 끝납니다 — 부분 문서는
//! 의미 있는 출력이 아닙니다. 실행 간 공유 상태는 없으므로 동시 변환은
//! 실행마다 독립 입력을 쓰면 됩니다.

use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use metrics::{counter, histogram};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use packroot_core::metrics::{
    CONVERTER_ARTIFACTS_SEEN_TOTAL, CONVERTER_ARTIFACTS_SUPPRESSED_TOTAL,
    CONVERTER_PACKAGES_RECORDED_TOTAL, CONVERTER_RUNS_TOTAL, CONVERTER_RUN_DURATION_SECONDS,
    LABEL_PACKAGE_TYPE,
};
use packroot_core::types::ConversionSummary;

use crate::cataloger::Cataloger;
use crate::config::ConverterConfig;
use crate::error::ConverterError;
use crate::event::ConvertEvent;
use crate::filter::select_roots;
use crate::findings::{BASE, FindingsBuilder, FindingsDocument, PACKAGE_LIST, PKGS_ALL};
use crate::handler::HandlerRegistry;
use crate::types::RawCatalog;

/// 변환 한 건의 결과
#[derive(Debug)]
pub struct ConvertOutcome {
    /// 확정된 findings 문서
    pub document: FindingsDocument,
    /// 실행 요약
    pub summary: ConversionSummary,
}

/// 변환 오케스트레이터
///
/// 핸들러 레지스트리는 생성 시점에 주입되어 읽기 전용으로 쓰입니다.
/// 이벤트 채널이 설정되어 있으면 변환 완료마다 [`ConvertEvent`]를
/// 전송합니다 (채널이 가득 차면 경고 후 버림).
pub struct Converter {
    /// 변환기 설정
    config: ConverterConfig,
    /// 타입별 핸들러 매핑
    registry: Arc<HandlerRegistry>,
    /// 변환 완료 이벤트 전송 채널
    event_tx: Option<mpsc::Sender<ConvertEvent>>,
}

impl Converter {
    /// 주입된 핸들러 레지스트리를 반환합니다.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// 카탈로그 문서 하나를 findings 문서로 변환합니다.
    ///
    /// `source`는 요약/이벤트에 기록될 입력 출처 표시용 문자열입니다.
    ///
    /// # Errors
    ///
    /// - `TooManyArtifacts`: 입력이 설정 한도를 초과
    /// - `MissingHandler`: 필터 생존자에 핸들러가 없음 (필터/레지스트리
    ///   불일치 — 프로그래밍 결함, 실행 중단)
    /// - `PathConflict`: 핸들러가 findings 경로를 잘못 사용
    pub fn convert(
        &self,
        catalog: &RawCatalog,
        source: &str,
    ) -> Result<ConvertOutcome, ConverterError> {
        let started = Instant::now();

        if catalog.artifacts.len() > self.config.max_artifacts {
            return Err(ConverterError::TooManyArtifacts {
                count: catalog.artifacts.len(),
                max: self.config.max_artifacts,
            });
        }

        let mut findings = FindingsBuilder::new();

        // 베이스 배포판 마커 — 아티팩트 경로와 무관하게 실행당 정확히 1회.
        // 이름 있는 비-busybox 배포판은 마커 없이 일반 아티팩트 경로로 처리됨.
        record_base_distro(&mut findings, catalog)?;

        let (schema, roots) = select_roots(catalog, &self.registry);
        let artifacts_total = catalog.artifacts.len();
        let roots_kept = roots.len();

        debug!(
            source = %source,
            schema = %schema,
            artifacts = artifacts_total,
            roots = roots_kept,
            "artifact filter applied"
        );

        for artifact in roots {
            let handler = self
                .registry
                .get(&artifact.package_type)
                .ok_or_else(|| ConverterError::MissingHandler {
                    package_type: artifact.package_type.clone(),
                })?;
            handler.record(&mut findings, artifact)?;
            counter!(
                CONVERTER_PACKAGES_RECORDED_TOTAL,
                LABEL_PACKAGE_TYPE => artifact.package_type.clone()
            )
            .increment(1);
        }

        let summary = ConversionSummary {
            run_id: uuid::Uuid::new_v4().to_string(),
            source: source.to_owned(),
            schema: schema.as_str().to_owned(),
            distro: catalog
                .distro
                .as_ref()
                .and_then(|d| d.name.clone())
                .filter(|n| !n.is_empty()),
            artifacts_total,
            roots_kept,
            artifacts_suppressed: artifacts_total - roots_kept,
            completed_at: SystemTime::now(),
        };

        counter!(CONVERTER_RUNS_TOTAL).increment(1);
        counter!(CONVERTER_ARTIFACTS_SEEN_TOTAL).increment(artifacts_total as u64);
        counter!(CONVERTER_ARTIFACTS_SUPPRESSED_TOTAL)
            .increment(summary.artifacts_suppressed as u64);
        histogram!(CONVERTER_RUN_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        info!(
            run_id = %summary.run_id,
            source = %source,
            artifacts = artifacts_total,
            roots = roots_kept,
            "conversion completed"
        );

        if let Some(ref tx) = self.event_tx {
            let event = ConvertEvent::new(summary.clone());
            if let Err(e) = tx.try_send(event) {
                warn!(
                    run_id = %summary.run_id,
                    error = %e,
                    "failed to send convert event (channel full or closed)"
                );
            }
        }

        Ok(ConvertOutcome {
            document: findings.freeze(),
            summary,
        })
    }

    /// 외부 카탈로거를 호출한 뒤 그 출력을 변환합니다.
    ///
    /// 카탈로거 실패는 가공 없이 그대로 전파됩니다.
    pub async fn run<C: Cataloger>(
        &self,
        cataloger: &C,
        image_dir: &Path,
    ) -> Result<ConvertOutcome, ConverterError> {
        let catalog = cataloger.catalog(image_dir).await?;
        self.convert(&catalog, &image_dir.display().to_string())
    }
}

/// 베이스 배포판 마커를 기록합니다.
///
/// - busybox (대소문자 무관): `BusyBox -> <version>` (버전 누락 시 "0")
/// - 배포판 미보고 또는 이름 없음: `Unknown -> "0"`
/// - 그 외 이름 있는 배포판: 마커 없음
fn record_base_distro(
    findings: &mut FindingsBuilder,
    catalog: &RawCatalog,
) -> Result<(), ConverterError> {
    match &catalog.distro {
        Some(distro) if distro.is_busybox() => {
            let version = distro.version.clone().unwrap_or_else(|| "0".to_owned());
            findings.put(&[PACKAGE_LIST, PKGS_ALL, BASE, "BusyBox"], version)
        }
        Some(distro) if distro.has_name() => Ok(()),
        _ => findings.put(&[PACKAGE_LIST, PKGS_ALL, BASE, "Unknown"], "0"),
    }
}

/// [`Converter`] 빌더
///
/// 레지스트리와 이벤트 채널을 구성합니다. 외부 이벤트 채널을 설정하지
/// 않으면 빌더가 새 채널을 생성해 수신단을 돌려줍니다.
pub struct ConverterBuilder {
    config: ConverterConfig,
    registry: Option<Arc<HandlerRegistry>>,
    event_tx: Option<mpsc::Sender<ConvertEvent>>,
    event_channel_capacity: usize,
}

impl ConverterBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: ConverterConfig::default(),
            registry: None,
            event_tx: None,
            event_channel_capacity: 256,
        }
    }

    /// 변환기 설정을 지정합니다.
    pub fn config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// 핸들러 레지스트리를 직접 주입합니다.
    ///
    /// 지정하지 않으면 설정의 `package_types` 허용 목록을 반영한 내장
    /// 레지스트리가 사용됩니다.
    pub fn registry(mut self, registry: Arc<HandlerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 외부 이벤트 전송 채널을 설정합니다.
    ///
    /// 설정하지 않으면 빌더가 새 채널을 생성합니다.
    pub fn event_sender(mut self, tx: mpsc::Sender<ConvertEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// 이벤트 채널 용량을 설정합니다 (외부 채널 미사용 시).
    pub fn event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity;
        self
    }

    /// 변환기를 빌드합니다.
    ///
    /// # Returns
    ///
    /// - `Converter`: 변환기 인스턴스
    /// - `Option<mpsc::Receiver<ConvertEvent>>`: 이벤트 수신 채널
    ///   (외부 event_sender를 설정한 경우 None)
    pub fn build(
        self,
    ) -> Result<(Converter, Option<mpsc::Receiver<ConvertEvent>>), ConverterError> {
        self.config.validate()?;

        let registry = match self.registry {
            Some(registry) => registry,
            None => Arc::new(HandlerRegistry::with_defaults_restricted(
                &self.config.package_types,
            )),
        };

        let (event_tx, event_rx) = if let Some(tx) = self.event_tx {
            (tx, None)
        } else {
            let (tx, rx) = mpsc::channel(self.event_channel_capacity);
            (tx, Some(rx))
        };

        let converter = Converter {
            config: self.config,
            registry,
            event_tx: Some(event_tx),
        };

        Ok((converter, event_rx))
    }
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
