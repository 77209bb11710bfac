//! # Ingot - Declarative Data Casting
//!
//! A unified library for casting raw, loosely structured documents
//! (nested JSON, CSV tables) into typed, schema-shaped records.
//!
//! ## Modules
//!
//! - **schema**: declare fields, their paths into raw data and their parsers
//! - **record**: resolve a raw document against a schema in one walk and store the results
//! - **table**: normalize wide- or narrow-form grids into nested mappings
//! - **loader**: JSON and CSV file loaders
//! - **parsers**: ready-made coercion and validation parsers
//!
//! ## Quick Start
//!
//! ### Casting a nested document
//!
//! ```rust
//! use ingot::{parsers, FieldSpec, Record, Schema, SchemaLayer};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> ingot::Result<()> {
//! let schema = Arc::new(Schema::build([SchemaLayer::new()
//!     .field(FieldSpec::new("user"))
//!     .field(
//!         FieldSpec::new("balance")
//!             .at(["account", "account-balance"])
//!             .parse(parsers::as_f64),
//!     )])?);
//!
//! let record = Record::from_value(
//!     schema,
//!     &json!({
//!         "user": "John F. Doe",
//!         "account": {"account-balance": "1234.56", "account-type": "checking"}
//!     }),
//! )?;
//!
//! assert_eq!(record.get("user")?, &json!("John F. Doe"));
//! assert_eq!(record.get("balance")?, &json!(1234.56));
//! # Ok(())
//! # }
//! ```
//!
//! ### Normalizing tabular data
//!
//! ```rust
//! use ingot::table;
//! use serde_json::json;
//!
//! # fn main() -> ingot::Result<()> {
//! let grid = vec![
//!     vec!["Person".to_string(), "Age".to_string()],
//!     vec!["Bob".to_string(), "32".to_string()],
//!     vec!["Alice".to_string(), "24".to_string()],
//! ];
//!
//! let raw = table::normalize(&grid, None)?;
//! assert_eq!(raw, json!({"Bob": {"Age": "32"}, "Alice": {"Age": "24"}}));
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

pub mod error;
pub mod loader;
pub mod parsers;
pub mod record;
pub mod schema;
pub mod table;

// Re-export commonly used types for convenience
pub use error::{BoxError, Error, Result};
pub use loader::{CsvLoader, JsonLoader, Loader};
pub use record::Record;
pub use schema::{FieldSpec, Parser, PathIndex, Schema, SchemaLayer};
pub use table::Orientation;

/// Cast a JSON file into a record.
pub fn cast_json_file(path: impl AsRef<Path>, schema: Arc<Schema>) -> Result<Record> {
    Record::from_loader(schema, &JsonLoader::new(path))
}

/// Cast a CSV file into a record, normalizing its grid first. The
/// orientation is inferred unless given.
pub fn cast_csv_file(
    path: impl AsRef<Path>,
    schema: Arc<Schema>,
    orientation: Option<Orientation>,
) -> Result<Record> {
    let mut loader = CsvLoader::new(path);
    if let Some(orientation) = orientation {
        loader = loader.with_orientation(orientation);
    }
    Record::from_loader(schema, &loader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Write;
    use std::path::PathBuf;

    fn fixture(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ingot-e2e-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_account_summary_from_json_file() {
        let path = fixture(
            "bank.json",
            r#"{
                "user": "John F. Doe",
                "account": {
                    "account-type": "checking",
                    "account-balance": 1234.56,
                    "account-number": "123456789"
                }
            }"#,
        );

        let schema = Arc::new(
            Schema::build([SchemaLayer::new()
                .field(FieldSpec::new("user"))
                .field(FieldSpec::new("type").at(["account", "account-type"]))
                .field(FieldSpec::new("balance").at(["account", "account-balance"]))
                .field(
                    FieldSpec::new("account_number")
                        .at(["account", "account-number"])
                        .parse(|raw: Value| -> std::result::Result<Value, BoxError> {
                            let digits = raw.as_str().ok_or("expected a string")?;
                            let (hidden, shown) = digits.split_at(digits.len().saturating_sub(4));
                            Ok(Value::String(format!("{}{}", "X".repeat(hidden.len()), shown)))
                        }),
                )])
            .unwrap(),
        );

        let summary = cast_json_file(&path, schema).unwrap();
        assert_eq!(
            summary,
            json!({
                "user": "John F. Doe",
                "type": "checking",
                "balance": 1234.56,
                "account_number": "XXXXX6789"
            })
        );
    }

    // Mean of one variable across every entity of a normalized table,
    // rounded to one decimal.
    fn average(raw: &Value, variable: &str) -> std::result::Result<Value, BoxError> {
        let entities = raw.as_object().ok_or("expected a table mapping")?;
        let mut total = 0;
        for entity in entities.values() {
            let cell = entity[variable].as_str().ok_or("missing variable")?;
            total += cell.parse::<i64>()?;
        }
        let mean = total as f64 / entities.len() as f64;
        Ok(json!((mean * 10.0).round() / 10.0))
    }

    fn average_user_schema() -> Arc<Schema> {
        Arc::new(
            Schema::build([SchemaLayer::new()
                .field(
                    FieldSpec::new("age")
                        .whole_document()
                        .parse(|raw: Value| average(&raw, "Age")),
                )
                .field(
                    FieldSpec::new("weight")
                        .whole_document()
                        .parse(|raw: Value| average(&raw, "Weight")),
                )])
            .unwrap(),
        )
    }

    #[test]
    fn test_average_user_from_wide_and_narrow_csv_agree() {
        let wide = fixture(
            "wide.csv",
            "Person,Age,Weight\n\
             Bob,32,178\n\
             Alice,24,150\n\
             John,64,195\n",
        );
        let narrow = fixture(
            "narrow.csv",
            "Person,Variable,Value\n\
             Bob,Age,32\n\
             Bob,Weight,178\n\
             Alice,Age,24\n\
             Alice,Weight,150\n\
             John,Age,64\n\
             John,Weight,195\n",
        );

        let from_wide = cast_csv_file(&wide, average_user_schema(), None).unwrap();
        let from_narrow = cast_csv_file(&narrow, average_user_schema(), None).unwrap();

        let expected = json!({"age": 40.0, "weight": 174.3});
        assert_eq!(from_wide, expected);
        assert_eq!(from_narrow, expected);
        assert_eq!(from_wide, from_narrow);
    }
}
