//! Repository implementations for every stored record.
//!
//! Each module adds methods to `TenderService` via `impl TenderService`
//! blocks. Every method takes the request's `RequestContext`; records owned
//! by another contractor are reported as not found.

pub mod index;
pub mod memory;
pub mod pack;
pub mod print_settings;
pub mod profile;
pub mod template;
pub mod tender;
pub mod vault;
