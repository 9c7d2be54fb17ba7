//! Contract files and a registry of named argument schemas.
//!
//! This crate loads function contracts from YAML or JSON files
//! ([`ContractFile`]), validates them into
//! [`ArgumentSchema`](contract_guard_core::ArgumentSchema)s, and serves
//! [`ValidatedFunction`](contract_guard_core::ValidatedFunction)s by name
//! through [`ContractRegistry`].
//!
//! # Quick start
//!
//! ```no_run
//! use contract_guard_core::curry;
//! use contract_guard_registry::ContractRegistry;
//! use serde_json::json;
//!
//! let registry = ContractRegistry::load("contracts.yml").unwrap();
//! let funky = registry.wrap("funky", curry(3, |_| json!({"good": "job"}))).unwrap();
//!
//! match funky.call([json!(null), json!(1), json!(null)]) {
//!     Ok(_) => println!("accepted"),
//!     Err(failure) => {
//!         for message in failure.messages() {
//!             eprintln!("{message}");
//!         }
//!     }
//! }
//! ```

mod config;
mod error;
mod registry;

pub use config::{CONTRACT_FORMAT_VERSION, ContractFile, FunctionContract};
pub use error::{RegistryError, Result};
pub use registry::{ContractRegistry, RegistrySource, validate_contracts};
