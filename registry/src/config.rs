//! Contract files.
//!
//! A contract file declares the argument schema of each named function. YAML
//! is the primary format; files with a `.json` extension are read and
//! written as JSON.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! functions:
//!   - name: funky
//!     description: Builds a job result
//!     arguments:
//!       - name: type
//!         types: [String]
//!       - name: ret
//!         types: [Object, String]
//!       - name: obj
//!         types: [Object]
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use contract_guard_core::ArgumentSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Current contract file format version.
pub const CONTRACT_FORMAT_VERSION: &str = "1.0";

/// Declared contract for one function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionContract {
    /// Function name, also used as the display name in diagnostics.
    pub name: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Positional arguments in call order.
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
}

impl FunctionContract {
    pub fn new(name: impl Into<String>, arguments: Vec<ArgumentSpec>) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments,
        }
    }
}

/// Top-level contract file.
///
/// # Examples
///
/// ```
/// use contract_guard_registry::ContractFile;
///
/// let file: ContractFile = serde_yaml::from_str(r#"
/// version: "1.0"
/// functions:
///   - name: greet
///     arguments:
///       - name: who
///         types: [String]
/// "#).unwrap();
/// assert_eq!(file.functions[0].arguments[0].name, "who");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractFile {
    /// Format version (e.g., `"1.0"`).
    pub version: String,
    /// Declared function contracts.
    #[serde(default)]
    pub functions: Vec<FunctionContract>,
}

impl Default for ContractFile {
    fn default() -> Self {
        Self {
            version: CONTRACT_FORMAT_VERSION.to_string(),
            functions: Vec::new(),
        }
    }
}

impl ContractFile {
    /// Loads a contract file, choosing JSON or YAML by extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::RegistryError::IoError) if the file cannot
    /// be read, or [`JsonError`](crate::RegistryError::JsonError) /
    /// [`YamlError`](crate::RegistryError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let file: Self = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        debug!(path = %path.display(), functions = file.functions.len(), "Loaded contract file");
        Ok(file)
    }

    /// Saves the contract file, choosing JSON or YAML by extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::RegistryError::IoError) if the file cannot
    /// be written, or a serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        Ok(())
    }

    /// Returns the contract declared for `name`, if any.
    pub fn find(&self, name: &str) -> Option<&FunctionContract> {
        self.functions.iter().find(|f| f.name == name)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
