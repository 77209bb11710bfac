//! Records: resolution of raw documents into stored field values.
//!
//! The resolver walks a schema's path index and the raw document in
//! lock-step; [`Record`] owns the resulting storage and applies field
//! parsers on every assignment.

pub mod instance;
pub(crate) mod resolve;

pub use instance::Record;
