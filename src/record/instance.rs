//! The record type: field storage driven by a shared schema.

use crate::error::{Error, Result};
use crate::loader::Loader;
use crate::schema::{Schema, SchemaLayer};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A struct instance: stored field values plus the schema that maps raw
/// documents onto them.
///
/// Construction with a raw document resolves every declared path in one
/// walk, applies each field's parser and stores the results. Fields
/// whose paths found no data stay unset; reading them is an
/// [`Error::EmptyField`], not a default.
///
/// ```rust
/// use ingot::{FieldSpec, Record, Schema, SchemaLayer};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # fn main() -> ingot::Result<()> {
/// let schema = Arc::new(Schema::build([SchemaLayer::new()
///     .field(FieldSpec::new("user"))
///     .field(FieldSpec::new("kind").at(["account", "account-type"]))])?);
///
/// let record = Record::from_value(
///     schema,
///     &json!({"user": "John F. Doe", "account": {"account-type": "checking"}}),
/// )?;
///
/// assert_eq!(record.get("kind")?, &json!("checking"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Record {
    schema: Arc<Schema>,
    data: Map<String, Value>,
}

impl Record {
    /// An empty record: every field declared, none stored.
    pub fn new(schema: Arc<Schema>) -> Self {
        Record {
            schema,
            data: Map::new(),
        }
    }

    /// Build a record and populate it from a raw document.
    pub fn from_value(schema: Arc<Schema>, raw: &Value) -> Result<Self> {
        let mut record = Record::new(schema);
        record.update(raw)?;
        Ok(record)
    }

    /// Build a record from whatever document the loader produces.
    /// A loader failure aborts construction entirely.
    pub fn from_loader(schema: Arc<Schema>, loader: &dyn Loader) -> Result<Self> {
        let raw = loader.load()?;
        Record::from_value(schema, &raw)
    }

    /// Resolve `raw` against the schema and merge the matches into
    /// storage, applying field parsers.
    ///
    /// A parser failure propagates as [`Error::Parse`] and aborts the
    /// rest of the call: fields stored before the failure keep their
    /// new values, later ones are left as they were.
    pub fn update(&mut self, raw: &Value) -> Result<()> {
        let resolved = self.schema.resolve(raw);
        for (field, value) in resolved {
            self.store(&field, value)?;
        }
        Ok(())
    }

    /// Read a stored field value.
    pub fn get(&self, field: &str) -> Result<&Value> {
        if !self.schema.has_field(field) {
            return Err(Error::UnknownField(field.to_string()));
        }
        self.data
            .get(field)
            .ok_or_else(|| Error::EmptyField(field.to_string()))
    }

    /// Assign a field directly. The field's parser runs exactly as it
    /// would during [`update`](Record::update), so direct and
    /// data-driven assignment store identical results.
    pub fn set(&mut self, field: &str, value: Value) -> Result<()> {
        if !self.schema.has_field(field) {
            return Err(Error::UnknownField(field.to_string()));
        }
        self.store(field, value)
    }

    /// Remove a field's stored value. The declaration stays: a later
    /// `update` with matching raw data repopulates it. Unsetting an
    /// already unset field is a no-op.
    pub fn unset(&mut self, field: &str) -> Result<()> {
        if !self.schema.has_field(field) {
            return Err(Error::UnknownField(field.to_string()));
        }
        self.data.remove(field);
        Ok(())
    }

    pub fn is_set(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }

    /// Stored `(field, value)` pairs, key-sorted.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Add fields to this record only, by swapping in an extended copy
    /// of its schema. Other records sharing the original schema are
    /// untouched, as are this record's stored values; the new fields
    /// populate on the next `update`.
    pub fn add_fields(&mut self, layer: &SchemaLayer) -> Result<()> {
        self.schema = Arc::new(self.schema.extended(layer)?);
        Ok(())
    }

    /// The external representation: a mapping limited to fields that
    /// currently have stored values. Schema path metadata is not part
    /// of it.
    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    /// Compact JSON encoding for machine output.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.data)?)
    }

    /// Pretty JSON encoding with sorted keys for human-readable output.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    fn store(&mut self, field: &str, raw: Value) -> Result<()> {
        // `has_field` was checked by every caller's entry point; the
        // resolver only yields declared names.
        let parsed = match self.schema.field(field).and_then(|f| f.parser.clone()) {
            Some(parser) => parser(raw).map_err(|source| Error::parse(field, source))?,
            None => raw,
        };
        self.data.insert(field.to_string(), parsed);
        Ok(())
    }
}

/// Equality compares stored values only; the schemas may differ.
/// Absence matters: unset on one side and set to an "empty" value on
/// the other are not equal.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl PartialEq<Map<String, Value>> for Record {
    fn eq(&self, other: &Map<String, Value>) -> bool {
        &self.data == other
    }
}

impl PartialEq<Value> for Record {
    fn eq(&self, other: &Value) -> bool {
        match other {
            Value::Object(map) => &self.data == map,
            _ => false,
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = serde_json::to_string_pretty(&self.data).map_err(|_| fmt::Error)?;
        f.write_str(&pretty)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
