//! Argument validation for curried functions.
//!
//! [`wrap`] attaches an [`ArgumentSchema`] to a [`Callable`]. Every call step
//! validates the arguments it supplies against the matching slice of the
//! schema before anything is forwarded; a step that leaves positions unfilled
//! returns a [`PartialCall`] awaiting the rest, and the step that fills the
//! last position invokes the callable.
//!
//! # Examples
//!
//! ```
//! use contract_guard_core::*;
//! use serde_json::json;
//!
//! let schema = ArgumentSchema::new([
//!     ArgumentSpec::new("type", TypeSpec::new([TypeDescriptor::STRING]).unwrap()),
//!     ArgumentSpec::new("obj", TypeSpec::new([TypeDescriptor::OBJECT]).unwrap()),
//! ])
//! .unwrap();
//! let describe = wrap(curry(2, |args| args.len()), schema, "describe").unwrap();
//!
//! let partial = describe.call([json!("FOO")]).unwrap().into_partial().unwrap();
//! assert_eq!(partial.remaining(), 1);
//! assert_eq!(partial.call([json!({})]).unwrap().into_complete(), Some(2));
//!
//! let err = describe.call([json!(1)]).unwrap_err();
//! assert_eq!(
//!     err.messages(),
//!     ["Function describe, Requires type as one of String, but got 1"]
//! );
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::diagnostics::{format_arg_violation, format_excess_arguments, raise_aggregated};
use crate::{ArgumentSchema, SchemaError, ValidationFailure};

/// A function of fixed arity over dynamic values.
///
/// `invoke` is only ever called with exactly `arity()` arguments, all of
/// which have passed validation.
pub trait Callable: Send + Sync {
    type Output;

    fn arity(&self) -> usize;

    fn invoke(&self, args: &[Value]) -> Self::Output;
}

/// Closure adapter produced by [`curry`].
pub struct Curried<F, R> {
    arity: usize,
    func: F,
    _output: PhantomData<fn() -> R>,
}

/// Adapts a closure taking the full argument list into a [`Callable`].
pub fn curry<F, R>(arity: usize, func: F) -> Curried<F, R>
where
    F: Fn(&[Value]) -> R + Send + Sync,
{
    Curried {
        arity,
        func,
        _output: PhantomData,
    }
}

impl<F, R> Callable for Curried<F, R>
where
    F: Fn(&[Value]) -> R + Send + Sync,
{
    type Output = R;

    fn arity(&self) -> usize {
        self.arity
    }

    fn invoke(&self, args: &[Value]) -> R {
        (self.func)(args)
    }
}

impl<F, R> fmt::Debug for Curried<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curried").field("arity", &self.arity).finish()
    }
}

/// Checks one call step without invoking anything.
///
/// `offset` is the number of positions already filled by earlier steps;
/// `args` are compared against the schema from that position on. Every
/// failing position is reported, followed by an arity violation when `args`
/// runs past the end of the schema.
pub fn check_arguments(
    display_name: &str,
    schema: &ArgumentSchema,
    offset: usize,
    args: &[Value],
) -> Result<(), ValidationFailure> {
    let mut messages = Vec::new();

    for (spec, value) in schema.iter().skip(offset).zip(args) {
        if !spec.types.matches(value) {
            messages.push(format_arg_violation(
                display_name,
                &spec.name,
                &spec.types,
                value,
            ));
        }
    }

    let remaining = schema.len().saturating_sub(offset);
    if args.len() > remaining {
        messages.push(format_excess_arguments(display_name, remaining, args.len()));
    }

    raise_aggregated(messages)
}

/// Wraps `callable` so every call is checked against `schema`.
///
/// # Errors
///
/// Returns [`SchemaError::ArityMismatch`] when the schema length differs from
/// `callable.arity()`.
pub fn wrap<C: Callable>(
    callable: C,
    schema: ArgumentSchema,
    display_name: impl Into<String>,
) -> Result<ValidatedFunction<C>, SchemaError> {
    if schema.len() != callable.arity() {
        return Err(SchemaError::ArityMismatch {
            schema: schema.len(),
            callable: callable.arity(),
        });
    }

    Ok(ValidatedFunction {
        inner: Arc::new(Inner {
            callable,
            schema,
            display_name: display_name.into(),
        }),
    })
}

struct Inner<C> {
    callable: C,
    schema: ArgumentSchema,
    display_name: String,
}

/// A callable guarded by its argument schema.
///
/// Cloning is cheap; clones share the callable and schema.
pub struct ValidatedFunction<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for ValidatedFunction<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for ValidatedFunction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedFunction")
            .field("display_name", &self.inner.display_name)
            .field("schema", &self.inner.schema)
            .finish()
    }
}

impl<C: Callable> ValidatedFunction<C> {
    /// Supplies the first arguments.
    ///
    /// # Errors
    ///
    /// Returns every violation for the supplied arguments; the callable is
    /// not invoked.
    pub fn call(
        &self,
        args: impl IntoIterator<Item = Value>,
    ) -> Result<Invocation<C>, ValidationFailure> {
        self.apply(Vec::new(), args.into_iter().collect())
    }

    /// Validates a full or partial argument list without invoking.
    pub fn check(&self, args: &[Value]) -> Result<(), ValidationFailure> {
        check_arguments(&self.inner.display_name, &self.inner.schema, 0, args)
    }

    pub fn display_name(&self) -> &str {
        &self.inner.display_name
    }

    pub fn schema(&self) -> &ArgumentSchema {
        &self.inner.schema
    }

    pub fn arity(&self) -> usize {
        self.inner.schema.len()
    }

    fn apply(
        &self,
        mut supplied: Vec<Value>,
        args: Vec<Value>,
    ) -> Result<Invocation<C>, ValidationFailure> {
        check_arguments(
            &self.inner.display_name,
            &self.inner.schema,
            supplied.len(),
            &args,
        )?;

        supplied.extend(args);
        if supplied.len() == self.arity() {
            Ok(Invocation::Complete(self.inner.callable.invoke(&supplied)))
        } else {
            Ok(Invocation::Partial(PartialCall {
                function: self.clone(),
                supplied,
            }))
        }
    }
}

/// Outcome of a successful call step.
pub enum Invocation<C: Callable> {
    /// All positions were filled; holds the callable's result unchanged.
    Complete(C::Output),
    /// Some positions are still open.
    Partial(PartialCall<C>),
}

impl<C: Callable> Invocation<C> {
    pub fn into_complete(self) -> Option<C::Output> {
        match self {
            Self::Complete(output) => Some(output),
            Self::Partial(_) => None,
        }
    }

    pub fn into_partial(self) -> Option<PartialCall<C>> {
        match self {
            Self::Complete(_) => None,
            Self::Partial(partial) => Some(partial),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

impl<C> fmt::Debug for Invocation<C>
where
    C: Callable,
    C::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete(output) => f.debug_tuple("Complete").field(output).finish(),
            Self::Partial(partial) => f.debug_tuple("Partial").field(partial).finish(),
        }
    }
}

/// A validated function with some leading positions already filled.
pub struct PartialCall<C> {
    function: ValidatedFunction<C>,
    supplied: Vec<Value>,
}

impl<C> Clone for PartialCall<C> {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            supplied: self.supplied.clone(),
        }
    }
}

impl<C> fmt::Debug for PartialCall<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialCall")
            .field("display_name", &self.function.inner.display_name)
            .field("supplied", &self.supplied)
            .finish()
    }
}

impl<C: Callable> PartialCall<C> {
    /// Supplies the next arguments. The partial itself is left untouched and
    /// can be called again.
    ///
    /// # Errors
    ///
    /// Returns every violation for the newly supplied arguments.
    pub fn call(
        &self,
        args: impl IntoIterator<Item = Value>,
    ) -> Result<Invocation<C>, ValidationFailure> {
        self.function
            .apply(self.supplied.clone(), args.into_iter().collect())
    }

    /// Arguments accepted so far.
    pub fn supplied(&self) -> &[Value] {
        &self.supplied
    }

    /// Number of positions still open.
    pub fn remaining(&self) -> usize {
        self.function.arity() - self.supplied.len()
    }
}
