//! CLI-specific error types and exit code mapping

use packroot_core::error::PackrootError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The external cataloger failed or produced unusable output.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from packroot-core.
    #[error("{0}")]
    Core(PackrootError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                    |
    /// |------|----------------------------|
    /// | 0    | Success                    |
    /// | 1    | General / command error    |
    /// | 2    | Configuration error        |
    /// | 3    | Cataloger failure          |
    /// | 10   | IO error                   |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Catalog(_) => 3,
            Self::Io(_) => 10,
            Self::Core(PackrootError::Config(_)) => 2,
            Self::Core(PackrootError::Catalog(_)) => 3,
            Self::Core(PackrootError::Io(_)) => 10,
            _ => 1,
        }
    }
}

impl From<PackrootError> for CliError {
    fn from(err: PackrootError) -> Self {
        Self::Core(err)
    }
}

impl From<packroot_converter::ConverterError> for CliError {
    fn from(err: packroot_converter::ConverterError) -> Self {
        Self::Core(err.into())
    }
}
