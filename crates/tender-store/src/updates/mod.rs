//! Update builder types for record mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields are applied to the stored record, and the update struct is
//! serialized as the trail `data` payload (changed fields only).

pub mod pack;
pub mod print_settings;
pub mod template;
pub mod tender;
