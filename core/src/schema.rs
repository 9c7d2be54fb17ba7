//! Positional argument schemas.
//!
//! An [`ArgumentSchema`] is the ordered list of `(name, types)` pairs a
//! wrapped function declares. Index `i` of the schema describes positional
//! argument `i`, and the schema length is the function's arity.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TypeSpec;

/// Errors raised while building a schema or wrapping a function.
///
/// These are configuration problems, reported before any call happens.
/// Runtime violations use [`ValidationFailure`](crate::ValidationFailure).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A type set was declared with no types.
    #[error("type spec must name at least one type")]
    EmptyTypeSpec,
    /// A type name did not match any known descriptor.
    #[error("unknown type name: {0}")]
    UnknownType(String),
    /// An argument at the given position has an empty or blank name.
    #[error("argument {0} has an empty name")]
    EmptyArgumentName(usize),
    /// Two arguments share a name.
    #[error("duplicate argument name: {0}")]
    DuplicateArgument(String),
    /// The schema length differs from the callable's declared arity.
    #[error("schema declares {schema} arguments but the function takes {callable}")]
    ArityMismatch { schema: usize, callable: usize },
}

/// One named argument position and its accepted types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Argument name, used verbatim in diagnostics.
    pub name: String,
    /// Accepted types.
    pub types: TypeSpec,
}

impl ArgumentSpec {
    pub fn new(name: impl Into<String>, types: TypeSpec) -> Self {
        Self {
            name: name.into(),
            types,
        }
    }
}

/// Ordered positional schema for a wrapped function.
///
/// # Examples
///
/// ```
/// use contract_guard_core::*;
///
/// let schema = ArgumentSchema::new([
///     ArgumentSpec::new("type", TypeSpec::new([TypeDescriptor::STRING]).unwrap()),
///     ArgumentSpec::new("obj", TypeSpec::new([TypeDescriptor::OBJECT]).unwrap()),
/// ])
/// .unwrap();
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.get(1).unwrap().name, "obj");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgumentSchema {
    arguments: Vec<ArgumentSpec>,
}

impl ArgumentSchema {
    /// Builds a schema, rejecting blank or duplicate argument names.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyArgumentName`] or
    /// [`SchemaError::DuplicateArgument`] for the first offending argument.
    pub fn new(arguments: impl IntoIterator<Item = ArgumentSpec>) -> Result<Self, SchemaError> {
        let arguments: Vec<ArgumentSpec> = arguments.into_iter().collect();
        let mut seen: HashSet<&str> = HashSet::new();

        for (idx, arg) in arguments.iter().enumerate() {
            let name = arg.name.trim();
            if name.is_empty() {
                return Err(SchemaError::EmptyArgumentName(idx));
            }
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateArgument(name.to_string()));
            }
        }

        Ok(Self { arguments })
    }

    /// Number of positional arguments (the wrapped function's arity).
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Returns the argument declared at `position`.
    pub fn get(&self, position: usize) -> Option<&ArgumentSpec> {
        self.arguments.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.iter()
    }
}

impl<'de> Deserialize<'de> for ArgumentSchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let arguments = Vec::<ArgumentSpec>::deserialize(deserializer)?;
        Self::new(arguments).map_err(serde::de::Error::custom)
    }
}
