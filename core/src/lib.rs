//! Runtime argument contracts and scope merging.
//!
//! This crate checks dynamic values ([`serde_json::Value`]) against declared
//! contracts before any underlying logic runs:
//!
//! - [`wrap`] guards a [`Callable`] with an [`ArgumentSchema`]. Each call step
//!   validates the positions it supplies; partial calls return a
//!   [`PartialCall`] awaiting the rest.
//! - [`merge_scope`] checks a candidate record against an authoritative scope
//!   (comparing `id` fields of nested records) and overlays the scope on
//!   success.
//!
//! Both collect every violation before failing and report them together as a
//! single [`ValidationFailure`]. Schema construction problems are reported
//! separately as [`SchemaError`].
//!
//! # Example
//!
//! ```
//! use contract_guard_core::*;
//! use serde_json::json;
//!
//! let schema = ArgumentSchema::new([
//!     ArgumentSpec::new("type", TypeSpec::new([TypeDescriptor::STRING]).unwrap()),
//!     ArgumentSpec::new("count", TypeSpec::new([TypeDescriptor::NUMBER]).unwrap()),
//! ])
//! .unwrap();
//! let repeat = wrap(
//!     curry(2, |args| args[0].as_str().unwrap_or_default().repeat(args[1].as_u64().unwrap_or(0) as usize)),
//!     schema,
//!     "repeat",
//! )
//! .unwrap();
//!
//! let out = repeat.call([json!("ab"), json!(2)]).unwrap().into_complete();
//! assert_eq!(out.as_deref(), Some("abab"));
//!
//! let err = repeat.call([json!(null), json!("two")]).unwrap_err();
//! assert_eq!(err.len(), 2);
//! ```

mod diagnostics;
mod merge;
mod pretty;
mod schema;
mod types;
mod validate;

pub use diagnostics::{
    ValidationFailure, format_arg_violation, format_excess_arguments, format_scope_violation,
    raise_aggregated, render_literal,
};
pub use merge::{ScopeRecord, comparable_value_of, merge_scope};
pub use pretty::{pretty, pretty_record};
pub use schema::{ArgumentSchema, ArgumentSpec, SchemaError};
pub use types::{PrimitiveKind, StructuralKind, TypeDescriptor, TypeSpec};
pub use validate::{
    Callable, Curried, Invocation, PartialCall, ValidatedFunction, check_arguments, curry, wrap,
};
