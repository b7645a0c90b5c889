//! # tender-docs
//!
//! The document pipeline. Data flows strictly downward:
//!
//! 1. [`registry`] declares placeholder keys, labels, types and profile mappings
//! 2. [`resolver`] turns profile, profile memory and overrides into values
//! 3. [`fill`] substitutes `{{key}}` and `{{table:key}}` tokens in a body
//! 4. [`assemble`] merges checklist definitions with contractor evidence
//! 5. [`compose`] orders sections into one printable document
//!
//! Every stage is a pure function of its inputs. Rendering to a byte stream is
//! delegated to a [`render::DocumentRenderer`].

pub mod assemble;
pub mod compose;
pub mod error;
pub mod fill;
mod html;
mod patterns;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod restricted;
pub mod suggest;

pub use error::{AssembleError, RenderError};
