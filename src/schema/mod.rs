//! Schema declaration and registration.
//!
//! A schema is declared as an ordered chain of [`SchemaLayer`]s (base
//! first) and finalized once with [`Schema::build`]. The build step
//! folds every layer's [`FieldSpec`]s into a single field registry and
//! the [`PathIndex`] the resolver walks.

pub mod field;
pub mod path_index;
pub mod registry;

pub use field::{FieldSpec, Parser, SchemaLayer};
pub use path_index::PathIndex;
pub use registry::Schema;
