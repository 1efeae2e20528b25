//! Cataloger invocation boundary.
//!
//! The [`Cataloger`] trait abstracts the external package cataloger process,
//! allowing production code to use [`CommandCataloger`] while tests use
//! fixture-backed implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐
//! │ Converter  │
//! └─────┬──────┘
//!       │
//!       ▼
//! ┌────────────┐
//! │ Cataloger  │ (trait)
//! └────────────┘
//!     │     │
//!     ▼     ▼
//! ┌───────┐ ┌────────┐
//! │Command│ │Fixture │
//! └───┬───┘ └────────┘
//!     │
//!     ▼
//! external binary (syft by default)
//! ```
//!
//! # Failure semantics
//!
//! Cataloger failures (spawn error, non-zero exit, timeout, oversized or
//! unparseable output) are propagated to the caller untouched. The converter
//! never retries or degrades — a run either gets a catalog document or fails.

use std::future::Future;
use std::path::Path;
use std::time::{Duration, Instant};

use bytes::Bytes;
use metrics::{counter, gauge, histogram};
use tokio::process::Command;
use tracing::{debug, info, warn};

use packroot_core::metrics::{
    CATALOGER_DURATION_SECONDS, CATALOGER_INVOCATIONS_TOTAL, CATALOGER_OUTPUT_BYTES, LABEL_RESULT,
};

use crate::error::ConverterError;
use crate::types::RawCatalog;

/// Parses raw cataloger output into a [`RawCatalog`].
///
/// Missing `distro`, `artifacts`, or relationship fields are treated as
/// empty; any other malformation is a parse error.
pub fn parse_catalog(raw: &[u8]) -> Result<RawCatalog, ConverterError> {
    serde_json::from_slice(raw).map_err(|e| ConverterError::CatalogParse(e.to_string()))
}

/// Trait abstracting the external cataloger invocation.
///
/// Implementations take a filesystem directory (an unpacked container
/// image root) and return the raw catalog document describing every
/// package found inside it.
pub trait Cataloger: Send + Sync {
    /// Catalogs the given directory.
    fn catalog(
        &self,
        image_dir: &Path,
    ) -> impl Future<Output = Result<RawCatalog, ConverterError>> + Send;
}

/// Production cataloger that shells out to a configured binary.
///
/// The invocation is `<binary> <args...> <image_dir>`, with the scan target
/// appended as the final argument. Both a wall-clock timeout and an output
/// size cap are enforced; exceeding either fails the run.
pub struct CommandCataloger {
    binary: String,
    args: Vec<String>,
    timeout: Duration,
    max_output_bytes: usize,
}

impl CommandCataloger {
    /// Creates a cataloger with default limits (300s timeout, 64 MB output cap).
    pub fn new(binary: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            binary: binary.into(),
            args,
            timeout: Duration::from_secs(300),
            max_output_bytes: 64 * 1024 * 1024,
        }
    }

    /// Creates a cataloger from the converter configuration section.
    pub fn from_config(config: &packroot_core::config::CatalogConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            args: config.args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_output_bytes: config.max_output_mb * 1024 * 1024,
        }
    }

    /// Overrides the wall-clock timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the output size cap in bytes.
    pub fn max_output_bytes(mut self, max: usize) -> Self {
        self.max_output_bytes = max;
        self
    }

    /// Returns the configured binary name.
    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Cataloger for CommandCataloger {
    async fn catalog(&self, image_dir: &Path) -> Result<RawCatalog, ConverterError> {
        debug!(
            binary = %self.binary,
            dir = %image_dir.display(),
            "invoking external cataloger"
        );

        let started = Instant::now();
        let result = run_command(self, image_dir).await;
        let elapsed = started.elapsed().as_secs_f64();

        histogram!(CATALOGER_DURATION_SECONDS).record(elapsed);
        let label = if result.is_ok() { "success" } else { "failure" };
        counter!(CATALOGER_INVOCATIONS_TOTAL, LABEL_RESULT => label).increment(1);

        match &result {
            Ok(catalog) => {
                info!(
                    dir = %image_dir.display(),
                    artifacts = catalog.artifacts.len(),
                    elapsed_secs = elapsed,
                    "cataloger finished"
                );
            }
            Err(e) => {
                warn!(dir = %image_dir.display(), error = %e, "cataloger failed");
            }
        }

        result
    }
}

async fn run_command(
    cataloger: &CommandCataloger,
    image_dir: &Path,
) -> Result<RawCatalog, ConverterError> {
    let output = tokio::time::timeout(
        cataloger.timeout,
        Command::new(&cataloger.binary)
            .args(&cataloger.args)
            .arg(image_dir)
            .stdin(std::process::Stdio::null())
            .output(),
    )
    .await
    .map_err(|_| ConverterError::CatalogTimeout {
        secs: cataloger.timeout.as_secs(),
    })?
    .map_err(|e| ConverterError::CatalogSpawn {
        binary: cataloger.binary.clone(),
        reason: e.to_string(),
    })?;

    if !output.status.success() {
        let status = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_owned());
        return Err(ConverterError::CatalogFailed {
            status,
            stderr: stderr_tail(&output.stderr),
        });
    }

    if output.stdout.len() > cataloger.max_output_bytes {
        return Err(ConverterError::CatalogOutputTooLarge {
            size: output.stdout.len(),
            max: cataloger.max_output_bytes,
        });
    }

    gauge!(CATALOGER_OUTPUT_BYTES).set(output.stdout.len() as f64);

    let raw = Bytes::from(output.stdout);
    parse_catalog(&raw)
}

/// Keeps the last part of stderr for error messages.
fn stderr_tail(stderr: &[u8]) -> String {
    const MAX_STDERR: usize = 512;
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.len() <= MAX_STDERR {
        trimmed.to_owned()
    } else {
        let start = trimmed.len() - MAX_STDERR;
        // 문자 경계에 맞춰 자름
        let boundary = (start..trimmed.len())
            .find(|i| trimmed.is_char_boundary(*i))
            .unwrap_or(start);
        trimmed[boundary..].to_owned()
    }
}
