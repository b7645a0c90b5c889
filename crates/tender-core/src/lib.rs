//! # tender-core
//!
//! Core types shared by every crate in the tender paperwork workspace:
//! - Entity structs for all persisted records (profiles, packs, templates, ...)
//! - Status enums with their documented state machines
//! - ID prefix constants and generation/validation helpers
//! - Asia/Kolkata timestamp helpers
//! - The error taxonomy used at the command boundary
//! - Trail operation envelope for the JSONL mutation log
//! - Response types, including the one-shot `Flash` value

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod responses;
pub mod time;
pub mod trail;
