//! Schema building: folding ordered layers into one authoritative
//! field registry plus its path index.

use crate::error::{Error, Result};
use crate::record::resolve::resolve_fields;
use crate::schema::field::{FieldSpec, Parser, SchemaLayer};
use crate::schema::path_index::PathIndex;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

/// A field after installation into a schema: its resolved path and
/// optional parser. The `[name]` default has already been applied.
#[derive(Clone)]
pub(crate) struct BoundField {
    pub(crate) path: Vec<String>,
    pub(crate) parser: Option<Parser>,
}

impl std::fmt::Debug for BoundField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundField")
            .field("path", &self.path)
            .field("parser", &self.parser.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// The finalized field registry for one struct shape: a
/// `{field name -> bound field}` map and the path index derived from it.
///
/// Built once from an ordered chain of [`SchemaLayer`]s, base first.
/// Immutable afterwards; share it between records with an `Arc`.
///
/// ```rust
/// use ingot::{FieldSpec, Schema, SchemaLayer};
///
/// let schema = Schema::build([SchemaLayer::new()
///     .field(FieldSpec::new("user"))
///     .field(FieldSpec::new("kind").at(["account", "account-type"]))])
///     .unwrap();
///
/// assert_eq!(schema.field_names().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, BoundField>,
    index: PathIndex,
}

impl Schema {
    /// Fold ordered layers, base to derived, into one schema.
    ///
    /// A layer that redeclares a field name replaces the inherited
    /// declaration: the old path is uninstalled from the index before
    /// the new one is installed, so no residual entry survives an
    /// override. Declaring the same name twice within one layer fails
    /// with [`Error::Schema`].
    pub fn build<I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = SchemaLayer>,
    {
        let mut schema = Schema::default();
        for layer in layers {
            schema.apply_layer(&layer)?;
        }
        Ok(schema)
    }

    /// Build a new schema from this one plus one more layer.
    ///
    /// This is how a single record grows extra fields at runtime: the
    /// existing schema is never mutated, so other records sharing it
    /// are unaffected and need no synchronization.
    pub fn extended(&self, layer: &SchemaLayer) -> Result<Self> {
        let mut schema = self.clone();
        schema.apply_layer(layer)?;
        Ok(schema)
    }

    fn apply_layer(&mut self, layer: &SchemaLayer) -> Result<()> {
        let mut declared = HashSet::new();
        for spec in layer.fields() {
            if !declared.insert(spec.name().to_string()) {
                return Err(Error::Schema {
                    field: spec.name().to_string(),
                });
            }
            self.install(spec);
        }
        Ok(())
    }

    fn install(&mut self, spec: &FieldSpec) {
        let path = spec.path();
        // Overridden declarations leave the index entirely before the
        // replacement is installed; re-install at an unchanged path is
        // idempotent.
        if let Some(old) = self.fields.get(spec.name()) {
            let old_path = old.path.clone();
            self.index.uninstall(spec.name(), &old_path);
        }
        self.index.install(spec.name(), &path);
        self.fields.insert(
            spec.name().to_string(),
            BoundField {
                path,
                parser: spec.parser().cloned(),
            },
        );
    }

    /// Walk `raw` against this schema's path index and return the raw
    /// (unparsed) value for every field whose path matched.
    pub fn resolve(&self, raw: &Value) -> Map<String, Value> {
        resolve_fields(&self.index, raw)
    }

    /// Names of every declared field, in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The resolved path of a declared field.
    pub fn field_path(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(|field| field.path.as_slice())
    }

    pub(crate) fn field(&self, name: &str) -> Option<&BoundField> {
        self.fields.get(name)
    }

    pub(crate) fn index(&self) -> &PathIndex {
        &self.index
    }
}
