//! # tender-schema
//!
//! JSON Schema generation, validation, and registry for persisted records.
//!
//! Entity types are defined in `tender-core` with `#[derive(JsonSchema)]`.
//! This crate builds the schemas once and validates JSON values against them.
//! `tender-store` uses it for warn-only validation of created records; the
//! `tndr schema` command exports schemas for external tooling.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
