//! # tender-store
//!
//! Persistence for every contractor record.
//!
//! Records are JSON documents behind the [`store::RecordStore`] seam. Each
//! collection keeps an `index.json` listing next to its detail records; the
//! index is what list screens read, so every write upserts its row.
//! `TenderService` layers ownership checks, validation and the JSONL mutation
//! trail on top. All repository methods are `impl TenderService` blocks under
//! [`repos`].

pub mod error;
pub mod helpers;
pub mod index;
pub mod layout;
pub mod repos;
pub mod service;
pub mod store;
pub mod trail;
pub mod updates;

#[cfg(test)]
mod test_support;

pub use error::StoreError;
pub use layout::Collection;
pub use service::TenderService;
pub use store::{FsStore, MemoryStore, RecordStore};
