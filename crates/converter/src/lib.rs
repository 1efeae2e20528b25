#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ConverterError`)
//! - [`config`]: Converter configuration (`ConverterConfig`, builder)
//! - [`event`]: Conversion result events (`ConvertEvent`)
//! - [`types`]: Catalog document model (`RawCatalog`, `Artifact`, `Relationship`)
//! - [`ownership`]: Cross-ecosystem suppression policy (`is_ownership_allowed`)
//! - [`filter`]: Root-package selection over both relationship schemas
//! - [`findings`]: Findings document builder (`FindingsBuilder`, `FindingsDocument`)
//! - [`handler`]: Per-type translate-and-record capabilities (`PackageHandler`,
//!   `HandlerRegistry`)
//! - [`cataloger`]: External cataloger boundary (`Cataloger`, `CommandCataloger`)
//! - [`convert`]: Main orchestrator (`Converter`, `ConverterBuilder`)

pub mod cataloger;
pub mod config;
pub mod convert;
pub mod error;
pub mod event;
pub mod filter;
pub mod findings;
pub mod handler;
pub mod ownership;
pub mod types;

// --- Public API Re-exports ---

// Converter (main orchestrator)
pub use convert::{ConvertOutcome, Converter, ConverterBuilder};

// Configuration
pub use config::{ConverterConfig, ConverterConfigBuilder};

// Error
pub use error::ConverterError;

// Events
pub use event::ConvertEvent;

// Types
pub use types::{Artifact, Distro, RawCatalog, RelationSchema, Relations, Relationship};

// Ownership policy + filter
pub use filter::{filter_by_embedded_parents, filter_by_relationships, select_roots};
pub use ownership::is_ownership_allowed;

// Findings
pub use findings::{FindingsBuilder, FindingsDocument};

// Handler registry
pub use handler::{HandlerRegistry, PackageHandler};

// Cataloger
pub use cataloger::{Cataloger, CommandCataloger, parse_catalog};
