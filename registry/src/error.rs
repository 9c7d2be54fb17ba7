//! Error types for contract file and registry operations.

use contract_guard_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading contracts or looking them up.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Contract file structure problem (e.g., empty version or function name).
    #[error("invalid contract: {0}")]
    InvalidContract(String),

    /// Two contracts declare the same function name.
    #[error("duplicate function contract: {0}")]
    DuplicateFunction(String),

    /// A function's argument schema could not be built.
    #[error("function {function}: {source}")]
    Schema {
        function: String,
        #[source]
        source: SchemaError,
    },

    /// No contract is registered under the requested name.
    #[error("unknown function: {0}")]
    UnknownFunction(String),
}

/// Convenience alias for results with [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
