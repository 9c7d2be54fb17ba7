//! Type descriptors and per-argument type sets.
//!
//! A [`TypeDescriptor`] names one acceptable kind of runtime value. The set of
//! descriptors is closed: primitive kinds match a single JSON scalar kind,
//! structural kinds match containers with instance-of semantics (an array is
//! also an `Object`). A [`TypeSpec`] is the ordered, non-empty set of
//! descriptors accepted for one argument position.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SchemaError;

/// Primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// A JSON string.
    String,
    /// A JSON number (integer or float).
    Number,
    /// A JSON boolean.
    Boolean,
}

/// Structural (container) value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    /// Any container: maps and arrays both qualify.
    Object,
    /// Arrays only.
    Array,
}

/// One acceptable type for an argument.
///
/// Serialized by name (`"String"`, `"Number"`, `"Boolean"`, `"Object"`,
/// `"Array"`), so contract files can list types as plain strings.
///
/// # Examples
///
/// ```
/// use contract_guard_core::TypeDescriptor;
/// use serde_json::json;
///
/// assert!(TypeDescriptor::STRING.matches(&json!("FOO")));
/// assert!(TypeDescriptor::OBJECT.matches(&json!({"foo": "foo"})));
/// assert!(TypeDescriptor::OBJECT.matches(&json!([1, 2])));
/// assert!(!TypeDescriptor::OBJECT.matches(&json!(null)));
/// assert_eq!("Number".parse::<TypeDescriptor>().unwrap(), TypeDescriptor::NUMBER);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeDescriptor {
    /// Matches one scalar kind.
    Primitive(PrimitiveKind),
    /// Matches containers of the given kind.
    Structural(StructuralKind),
}

impl TypeDescriptor {
    pub const STRING: Self = Self::Primitive(PrimitiveKind::String);
    pub const NUMBER: Self = Self::Primitive(PrimitiveKind::Number);
    pub const BOOLEAN: Self = Self::Primitive(PrimitiveKind::Boolean);
    pub const OBJECT: Self = Self::Structural(StructuralKind::Object);
    pub const ARRAY: Self = Self::Structural(StructuralKind::Array);

    /// Returns the display name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Primitive(PrimitiveKind::String) => "String",
            Self::Primitive(PrimitiveKind::Number) => "Number",
            Self::Primitive(PrimitiveKind::Boolean) => "Boolean",
            Self::Structural(StructuralKind::Object) => "Object",
            Self::Structural(StructuralKind::Array) => "Array",
        }
    }

    /// Returns `true` if `value` is of this kind. `null` matches nothing.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Primitive(PrimitiveKind::String) => value.is_string(),
            Self::Primitive(PrimitiveKind::Number) => value.is_number(),
            Self::Primitive(PrimitiveKind::Boolean) => value.is_boolean(),
            Self::Structural(StructuralKind::Object) => value.is_object() || value.is_array(),
            Self::Structural(StructuralKind::Array) => value.is_array(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeDescriptor {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "String" | "string" => Ok(Self::STRING),
            "Number" | "number" => Ok(Self::NUMBER),
            "Boolean" | "boolean" => Ok(Self::BOOLEAN),
            "Object" | "object" => Ok(Self::OBJECT),
            "Array" | "array" => Ok(Self::ARRAY),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }
}

impl TryFrom<String> for TypeDescriptor {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeDescriptor> for String {
    fn from(value: TypeDescriptor) -> Self {
        value.name().to_string()
    }
}

/// Ordered, non-empty set of acceptable types for one argument.
///
/// Duplicates are dropped on construction, keeping the first occurrence, so
/// the declared order is what shows up in diagnostics.
///
/// # Examples
///
/// ```
/// use contract_guard_core::{TypeDescriptor, TypeSpec};
/// use serde_json::json;
///
/// let spec = TypeSpec::new([TypeDescriptor::OBJECT, TypeDescriptor::STRING]).unwrap();
/// assert_eq!(spec.to_string(), "Object, String");
/// assert!(spec.matches(&json!("text")));
/// assert!(!spec.matches(&json!(1)));
///
/// assert!(TypeSpec::new(Vec::<TypeDescriptor>::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TypeDescriptor>", into = "Vec<TypeDescriptor>")]
pub struct TypeSpec(Vec<TypeDescriptor>);

impl TypeSpec {
    /// Creates a type set.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyTypeSpec`] when no descriptor is given.
    pub fn new(types: impl IntoIterator<Item = TypeDescriptor>) -> Result<Self, SchemaError> {
        let mut unique = Vec::new();
        for ty in types {
            if !unique.contains(&ty) {
                unique.push(ty);
            }
        }
        if unique.is_empty() {
            return Err(SchemaError::EmptyTypeSpec);
        }
        Ok(Self(unique))
    }

    /// Returns `true` if `value` matches at least one descriptor.
    pub fn matches(&self, value: &Value) -> bool {
        self.0.iter().any(|ty| ty.matches(value))
    }

    /// Returns the descriptors in declaration order.
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.0
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, ty) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(ty.name())?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<TypeDescriptor>> for TypeSpec {
    type Error = SchemaError;

    fn try_from(value: Vec<TypeDescriptor>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TypeSpec> for Vec<TypeDescriptor> {
    fn from(value: TypeSpec) -> Self {
        value.0
    }
}
