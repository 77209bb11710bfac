use crate::error::BoxError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A field parser: transforms the raw resolved value into the stored value.
///
/// Parsers run on every assignment, whether the value arrived through
/// [`Record::update`](crate::Record::update) or a direct
/// [`Record::set`](crate::Record::set), so both assignment styles store
/// identical results.
pub type Parser = Arc<dyn Fn(Value) -> Result<Value, BoxError> + Send + Sync>;

/// Declares one field of a schema: a name, a path into raw data and an
/// optional parser.
///
/// The path defaults to `[name]` when not given. An empty path binds the
/// field to the entire raw document.
///
/// ```rust
/// use ingot::FieldSpec;
///
/// let user = FieldSpec::new("user");                       // path ["user"]
/// let kind = FieldSpec::new("kind").at(["account", "account-type"]);
/// let everything = FieldSpec::new("everything").whole_document();
/// ```
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    path: Option<Vec<String>>,
    parser: Option<Parser>,
}

impl FieldSpec {
    /// Declare a field whose path defaults to its own name.
    pub fn new(name: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            path: None,
            parser: None,
        }
    }

    /// Bind the field to an explicit path into the raw document.
    pub fn at<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = Some(path.into_iter().map(Into::into).collect());
        self
    }

    /// Bind the field to the entire raw document (empty path).
    pub fn whole_document(mut self) -> Self {
        self.path = Some(Vec::new());
        self
    }

    /// Attach a parser that transforms the raw value before storage.
    /// Errors raised by the parser propagate unchanged, tagged with the
    /// field name.
    pub fn parse<F, E>(mut self, parser: F) -> Self
    where
        F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.parser = Some(Arc::new(move |raw| parser(raw).map_err(Into::into)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared path, with the `[name]` default already applied.
    pub fn path(&self) -> Vec<String> {
        match &self.path {
            Some(path) => path.clone(),
            None => vec![self.name.clone()],
        }
    }

    pub(crate) fn parser(&self) -> Option<&Parser> {
        self.parser.as_ref()
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("parser", &self.parser.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// One schema body: an ordered collection of field declarations.
///
/// A schema is built from a chain of layers, base first. A layer that
/// redeclares a field name from an earlier layer replaces it; declaring
/// the same name twice *within* one layer is a schema error.
#[derive(Debug, Clone, Default)]
pub struct SchemaLayer {
    fields: Vec<FieldSpec>,
}

impl SchemaLayer {
    pub fn new() -> Self {
        SchemaLayer::default()
    }

    /// Add a field declaration to this layer.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub(crate) fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}
