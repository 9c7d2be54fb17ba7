//! Named argument schemas.
//!
//! [`ContractRegistry`] validates the contracts of a [`ContractFile`] into
//! [`ArgumentSchema`]s and hands out [`ValidatedFunction`]s by name.
//!
//! ```no_run
//! use contract_guard_core::curry;
//! use contract_guard_registry::ContractRegistry;
//!
//! let registry = ContractRegistry::load("contracts.yml").unwrap();
//! let funky = registry.wrap("funky", curry(3, |_| "done")).unwrap();
//! println!("{} takes {} arguments", funky.display_name(), funky.arity());
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use contract_guard_core::{ArgumentSchema, Callable, ValidatedFunction, wrap};
use tracing::{debug, info};

use crate::config::{ContractFile, FunctionContract};
use crate::error::{RegistryError, Result};

/// Describes where a [`ContractRegistry`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// Loaded from a contract file on disk.
    File(PathBuf),
    /// Built in memory.
    Inline,
}

/// Collects every structural problem in a contract file.
///
/// Unlike [`ContractRegistry::from_contracts`], this does not stop at the
/// first problem, which makes it suitable for linting.
///
/// # Examples
///
/// ```
/// use contract_guard_registry::{ContractFile, FunctionContract, validate_contracts};
///
/// let mut file = ContractFile::default();
/// file.functions.push(FunctionContract::new("f", Vec::new()));
/// file.functions.push(FunctionContract::new("f", Vec::new()));
/// assert_eq!(validate_contracts(&file).len(), 1);
/// ```
pub fn validate_contracts(file: &ContractFile) -> Vec<RegistryError> {
    let mut errors = Vec::new();

    if file.version.trim().is_empty() {
        errors.push(RegistryError::InvalidContract(
            "contract version cannot be empty".to_string(),
        ));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for contract in &file.functions {
        let name = contract.name.trim();
        if name.is_empty() {
            errors.push(RegistryError::InvalidContract(
                "function name cannot be empty".to_string(),
            ));
            continue;
        }
        if !seen.insert(name) {
            errors.push(RegistryError::DuplicateFunction(name.to_string()));
            continue;
        }
        if let Err(err) = build_schema(contract) {
            errors.push(err);
        }
    }

    errors
}

fn build_schema(contract: &FunctionContract) -> Result<ArgumentSchema> {
    ArgumentSchema::new(contract.arguments.iter().cloned()).map_err(|source| {
        RegistryError::Schema {
            function: contract.name.clone(),
            source,
        }
    })
}

/// In-memory collection of argument schemas keyed by function name.
#[derive(Debug)]
pub struct ContractRegistry {
    schemas: HashMap<String, ArgumentSchema>,
    source: RegistrySource,
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            source: RegistrySource::Inline,
        }
    }

    /// Loads and validates a contract file.
    ///
    /// # Errors
    ///
    /// Returns any load error from [`ContractFile::load`], or the first
    /// problem reported by [`validate_contracts`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = ContractFile::load(path)?;
        let mut registry = Self::from_contracts(&file)?;
        registry.source = RegistrySource::File(path.to_path_buf());
        info!(path = %path.display(), functions = registry.len(), "Loaded contract registry");
        Ok(registry)
    }

    /// Builds a registry from an already parsed contract file.
    ///
    /// # Errors
    ///
    /// Returns the first problem reported by [`validate_contracts`].
    pub fn from_contracts(file: &ContractFile) -> Result<Self> {
        if let Some(err) = validate_contracts(file).into_iter().next() {
            return Err(err);
        }

        let mut registry = Self::new();
        for contract in &file.functions {
            registry.register(contract.name.trim(), build_schema(contract)?)?;
        }
        Ok(registry)
    }

    /// Registers a schema under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateFunction`] if the name is taken, or
    /// [`RegistryError::InvalidContract`] if it is blank.
    pub fn register(&mut self, name: impl Into<String>, schema: ArgumentSchema) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidContract(
                "function name cannot be empty".to_string(),
            ));
        }
        if self.schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateFunction(name));
        }
        debug!(function = %name, arity = schema.len(), "Registered contract");
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Returns the schema registered for `name`.
    pub fn get(&self, name: &str) -> Option<&ArgumentSchema> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns the registered function names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn source(&self) -> &RegistrySource {
        &self.source
    }

    /// Wraps `callable` with the schema registered for `name`, using the name
    /// as the display name in diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownFunction`] for an unregistered name, or
    /// [`RegistryError::Schema`] when the callable's arity does not match.
    pub fn wrap<C: Callable>(&self, name: &str, callable: C) -> Result<ValidatedFunction<C>> {
        let schema = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownFunction(name.to_string()))?;
        wrap(callable, schema.clone(), name).map_err(|source| RegistryError::Schema {
            function: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use contract_guard_core::{ArgumentSpec, SchemaError, TypeDescriptor, TypeSpec, curry};
    use serde_json::json;

    use super::*;

    fn string_arg(name: &str) -> ArgumentSpec {
        ArgumentSpec::new(name, TypeSpec::new([TypeDescriptor::STRING]).unwrap())
    }

    fn sample_file() -> ContractFile {
        let mut file = ContractFile::default();
        file.functions.push(FunctionContract::new(
            "greet",
            vec![string_arg("greeting"), string_arg("who")],
        ));
        file
    }

    #[test]
    fn test_validate_contracts_collects_every_problem() {
        let mut file = sample_file();
        file.version = " ".to_string();
        file.functions
            .push(FunctionContract::new("bad", vec![string_arg("a"), string_arg("a")]));
        file.functions.push(FunctionContract::new("", Vec::new()));

        let errors = validate_contracts(&file);
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], RegistryError::InvalidContract(_)));
        assert!(matches!(
            &errors[1],
            RegistryError::Schema { function, source: SchemaError::DuplicateArgument(arg) }
                if function == "bad" && arg == "a"
        ));
    }

    #[test]
    fn test_register_rejects_duplicate() {
        let mut registry = ContractRegistry::from_contracts(&sample_file()).unwrap();
        let schema = registry.get("greet").unwrap().clone();
        let err = registry.register("greet", schema).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateFunction(name) if name == "greet"));
    }

    #[test]
    fn test_wrap_uses_function_name_in_diagnostics() {
        let registry = ContractRegistry::from_contracts(&sample_file()).unwrap();
        let greet = registry
            .wrap("greet", curry(2, |args| format!("{} {}", args[0], args[1])))
            .unwrap();

        let err = greet.call([json!("hello"), json!(7)]).unwrap_err();
        assert_eq!(
            err.messages(),
            ["Function greet, Requires who as one of String, but got 7"]
        );
    }

    #[test]
    fn test_wrap_unknown_and_mismatched() {
        let registry = ContractRegistry::from_contracts(&sample_file()).unwrap();
        assert!(matches!(
            registry.wrap("missing", curry(0, |_| ())),
            Err(RegistryError::UnknownFunction(_))
        ));
        assert!(matches!(
            registry.wrap("greet", curry(1, |_| ())),
            Err(RegistryError::Schema {
                source: SchemaError::ArityMismatch { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_names_are_sorted() {
        let mut file = sample_file();
        file.functions.push(FunctionContract::new("alpha", Vec::new()));
        let registry = ContractRegistry::from_contracts(&file).unwrap();
        assert_eq!(registry.names(), ["alpha", "greet"]);
        assert_eq!(registry.source(), &RegistrySource::Inline);
    }
}
