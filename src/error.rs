use thiserror::Error;

/// Boxed error type produced by field parsers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Convenience result type for casting operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type shared across schema building, resolution and loading.
#[derive(Debug, Error)]
pub enum Error {
    /// A field name was declared twice within one schema layer.
    /// Raised at schema-build time; fatal to that schema.
    #[error("conflicting declaration for the field '{field}' in one schema layer")]
    Schema { field: String },

    /// A field name that no schema layer declares.
    #[error("no field named '{0}' is declared")]
    UnknownField(String),

    /// Read of a declared field that has no stored value.
    #[error("the field '{0}' is empty")]
    EmptyField(String),

    /// A field parser failed while transforming a raw value.
    /// The underlying error is propagated unchanged, tagged with the field name.
    #[error("parser for the field '{field}' failed: {source}")]
    Parse {
        field: String,
        #[source]
        source: BoxError,
    },

    /// The table normalizer encountered a malformed grid.
    #[error("malformed table: {0}")]
    Format(String),

    /// Underlying I/O error from a loader (e.g. file not found).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON text could not be parsed by a loader.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV text could not be tokenized by a loader.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Tag a parser failure with the field it was transforming.
    pub(crate) fn parse(field: &str, source: BoxError) -> Self {
        Error::Parse {
            field: field.to_string(),
            source,
        }
    }
}
