use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// OpenAPI version written to every document.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Named, reusable schemas referenced via `#/definitions/<name>`.
pub type Definitions = BTreeMap<String, Value>;

/// `paths[path][method]`.
pub type Paths = BTreeMap<String, BTreeMap<String, SwaggerRoute>>;

/// A schema-bearing entry of a `content` map.
///
/// Keys other than `schema` (`examples`, `encoding`, ...) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub schema: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaType {
    pub fn new(schema: Value) -> Self {
        Self {
            schema,
            extra: Map::new(),
        }
    }
}

/// One entry of an operation's `responses` map.
///
/// Any other response keys (`$ref`, `headers`, `links`, ...) pass through
/// unchanged in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Response {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestBody {
    pub content: BTreeMap<String, MediaType>,
}

/// A query parameter derived from a query fragment property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    #[serde(rename = "in")]
    pub location: String,
    pub name: String,
    pub required: bool,
    pub schema: Value,
}

/// The operation object stored at `paths[path][method]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: RequestBody,
    pub responses: BTreeMap<String, Response>,
    /// Definitions declared by this route's own fragments.
    pub definitions: Definitions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Logo {
    pub url: String,
    #[serde(rename = "altText")]
    pub alt_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
    #[serde(rename = "x-logo")]
    pub logo: Logo,
}

/// The complete generated document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub openapi: String,
    pub info: Info,
    pub paths: Paths,
    pub definitions: Definitions,
    pub servers: Vec<Value>,
    pub custom_site_title: String,
}

impl Document {
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
