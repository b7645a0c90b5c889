//! JSONL mutation trail.
//!
//! Each contractor gets one `{trail_dir}/{yoj_id}.jsonl` file. Lines are
//! appended after the record write succeeds; the trail is an audit log, not
//! a replay source.

pub mod writer;

pub use writer::TrailWriter;
