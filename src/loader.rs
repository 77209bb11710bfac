//! Loaders: external sources of raw documents.
//!
//! A loader's only job is to produce the raw nested mapping a record is
//! built from. Why a loader failed is its own business; construction of
//! the record simply fails with the propagated error.

use crate::error::Result;
use crate::table::{self, Orientation};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Supplies a raw document to a record at construction time.
pub trait Loader {
    fn load(&self) -> Result<Value>;
}

/// Loads a JSON file into a raw document.
pub struct JsonLoader {
    path: PathBuf,
}

impl JsonLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonLoader {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Loader for JsonLoader {
    fn load(&self) -> Result<Value> {
        let bytes = std::fs::read(&self.path)?;

        // SIMD parsing first; it mutates its buffer in place, so the
        // fallback parses the untouched original.
        let mut scratch = bytes.clone();
        match simd_json::serde::from_slice::<Value>(&mut scratch) {
            Ok(value) => Ok(value),
            Err(_) => Ok(serde_json::from_slice(&bytes)?),
        }
    }
}

/// Loads a CSV file and normalizes its grid into a nested mapping.
pub struct CsvLoader {
    path: PathBuf,
    orientation: Option<Orientation>,
}

impl CsvLoader {
    /// Orientation is inferred from the grid unless set with
    /// [`with_orientation`](CsvLoader::with_orientation).
    pub fn new(path: impl AsRef<Path>) -> Self {
        CsvLoader {
            path: path.as_ref().to_path_buf(),
            orientation: None,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

impl Loader for CsvLoader {
    fn load(&self) -> Result<Value> {
        // Headers stay in the grid: row 0 is part of the table shape
        // the normalizer inspects. Flexible mode admits ragged rows so
        // the normalizer can report them as format errors instead.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        table::normalize(&rows, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn fixture(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ingot-loader-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_json_loader_reads_nested_document() {
        let path = fixture(
            "bank.json",
            r#"{"user": "John F. Doe", "account": {"account-type": "checking"}}"#,
        );
        let raw = JsonLoader::new(&path).load().unwrap();
        assert_eq!(raw["account"]["account-type"], json!("checking"));
    }

    #[test]
    fn test_json_loader_missing_file_is_io_error() {
        let loader = JsonLoader::new("/definitely/not/here.json");
        assert!(matches!(loader.load(), Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_json_loader_bad_text_is_json_error() {
        let path = fixture("broken.json", "{not json");
        assert!(matches!(
            JsonLoader::new(&path).load(),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_csv_loader_normalizes_wide_grid() {
        let path = fixture("wide.csv", "Person,Age\nBob,32\nAlice,24\n");
        let raw = CsvLoader::new(&path).load().unwrap();
        assert_eq!(raw, json!({"Bob": {"Age": "32"}, "Alice": {"Age": "24"}}));
    }

    #[test]
    fn test_csv_loader_normalizes_narrow_grid() {
        let path = fixture(
            "narrow.csv",
            "Person,Variable,Value\nBob,Age,32\nBob,Weight,178\n",
        );
        let raw = CsvLoader::new(&path).load().unwrap();
        assert_eq!(raw, json!({"Bob": {"Age": "32", "Weight": "178"}}));
    }

    #[test]
    fn test_csv_loader_orientation_override() {
        let path = fixture("teams.csv", "Person,Team\nBob,Red\nAlice,Red\n");
        let raw = CsvLoader::new(&path)
            .with_orientation(Orientation::Wide)
            .load()
            .unwrap();
        assert_eq!(
            raw,
            json!({"Bob": {"Team": "Red"}, "Alice": {"Team": "Red"}})
        );
    }
}
