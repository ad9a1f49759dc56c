//! Skeleton Core - Template Manifest Engine
//!
//! A template ships a small YAML manifest declaring its manifest version and
//! the parameters substituted when the template is instantiated.
//!
//! # Flow
//! 1. Decode bytes into a [`Manifest`] (structural only)
//! 2. Gate on the manifest version (never newer than [`MAX_COMPAT_MANIFEST_VERSION`])
//! 3. Check each parameter's default and enum against its declared type
//!
//! File loading, template rendering and installation belong to the caller.

pub mod config;
pub mod error;
pub mod hashing;
pub mod manifest;
pub mod parameters;
pub mod validation;
pub mod version;

pub use config::{Policy, ValidatorConfig};
pub use error::ManifestError;
pub use hashing::{canonical_json, manifest_digest};
pub use manifest::{decode, Manifest, Parameter, ParameterType};
pub use parameters::{validate_parameters, ParameterRule};
pub use validation::{decode_and_validate, validate, ValidationReport, Validator, Violation, ViolationSeverity};
pub use version::{check_version, MAX_COMPAT_MANIFEST_VERSION};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
