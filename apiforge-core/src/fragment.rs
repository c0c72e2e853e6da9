use serde::Serialize;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::LoadError;

/// A parsed JSON-Schema-like object describing one route's body, query or response.
///
/// The raw object is kept as-is so it can be embedded verbatim in the
/// document; the accessors expose the keys the assemblers care about.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaFragment {
    raw: Map<String, Value>,
}

impl SchemaFragment {
    /// Wrap a raw JSON object, folding Draft 2020-12 `$defs` into `definitions`.
    pub fn new(raw: Map<String, Value>) -> Self {
        let mut fragment = Self { raw };
        fragment.promote_defs();
        fragment
    }

    /// Build a fragment from a JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(raw) => Some(Self::new(raw)),
            _ => None,
        }
    }

    pub fn definitions(&self) -> Option<&Map<String, Value>> {
        self.raw.get("definitions").and_then(Value::as_object)
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.raw.get("properties").and_then(Value::as_object)
    }

    /// Names listed under `required`. Non-string entries are ignored.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.raw
            .get("required")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required().any(|r| r == name)
    }

    /// The `type` keyword, when it is a single string.
    pub fn schema_type(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }

    pub fn any_of(&self) -> Option<&[Value]> {
        self.raw
            .get("anyOf")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    pub fn description(&self) -> Option<&str> {
        self.raw.get("description").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.raw.clone())
    }

    fn promote_defs(&mut self) {
        let Some(Value::Object(defs)) = self.raw.remove("$defs") else {
            return;
        };

        let definitions = self
            .raw
            .entry("definitions")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(definitions) = definitions {
            for (name, schema) in defs {
                definitions.entry(name).or_insert(schema);
            }
        }

        for value in self.raw.values_mut() {
            rewrite_defs_refs(value);
        }
    }
}

/// Recursively rewrite `#/$defs/X` references to `#/definitions/X`.
fn rewrite_defs_refs(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(ref_str)) = obj.get_mut("$ref") {
                if ref_str.starts_with("#/$defs/") {
                    *ref_str = ref_str.replacen("#/$defs/", "#/definitions/", 1);
                }
            }
            for v in obj.values_mut() {
                rewrite_defs_refs(v);
            }
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                rewrite_defs_refs(v);
            }
        }
        _ => {}
    }
}

/// The three optional sidecar fragments of one route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragments {
    pub body: Option<SchemaFragment>,
    pub query: Option<SchemaFragment>,
    pub response: Option<SchemaFragment>,
}

impl Fragments {
    /// Fragments in definition-merge order: body, query, response.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaFragment> {
        [&self.body, &self.query, &self.response]
            .into_iter()
            .flatten()
    }
}

/// Read and parse one sidecar fragment file.
///
/// A missing file (or a file containing `null`) yields `Ok(None)`. Any other
/// read failure and any JSON syntax error is fatal.
pub async fn read_fragment(path: &Path) -> Result<Option<SchemaFragment>, LoadError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let value: Value = serde_json::from_str(&content).map_err(|e| LoadError::FragmentParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Null => Ok(None),
        Value::Object(raw) => {
            tracing::debug!(fragment = %path.display(), "Schema fragment loaded");
            Ok(Some(SchemaFragment::new(raw)))
        }
        _ => Err(LoadError::FragmentParse {
            path: path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        }),
    }
}
