use apiforge_core::LoadError;
use std::collections::BTreeMap;
use std::path::Path;

use crate::document::Response;

/// Standard error responses pre-seeded into every operation's `responses`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardResponses {
    entries: BTreeMap<String, Response>,
}

impl StandardResponses {
    /// The builtin error-code table.
    pub fn builtin() -> Self {
        let entries = [
            ("400", "Bad Request"),
            ("401", "Unauthorized"),
            ("403", "Forbidden"),
            ("404", "Not Found"),
            ("409", "Conflict"),
            ("429", "Too Many Requests"),
            ("500", "Internal Server Error"),
        ]
        .into_iter()
        .map(|(code, description)| (code.to_string(), Response::described(description)))
        .collect();
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace one entry (`"404"`, `"default"`, ...).
    pub fn with(mut self, code: impl Into<String>, response: Response) -> Self {
        self.entries.insert(code.into(), response);
        self
    }

    /// Load a table from a YAML or JSON file mapping status code to response object.
    ///
    /// Integer keys (`404:` in YAML) are accepted.
    pub async fn load(path: &Path) -> Result<Self, LoadError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|message| LoadError::ResponseTable {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_yaml_str(content: &str) -> Result<Self, String> {
        let mapping: serde_yaml::Mapping =
            serde_yaml::from_str(content).map_err(|e| e.to_string())?;

        let mut entries = BTreeMap::new();
        for (key, value) in mapping {
            let code = match key {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                other => return Err(format!("unsupported status code key: {other:?}")),
            };
            let response: Response =
                serde_yaml::from_value(value).map_err(|e| format!("{code}: {e}"))?;
            entries.insert(code, response);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, code: &str) -> Option<&Response> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A fresh copy of the table, used as the starting `responses` map of an operation.
    pub fn seed(&self) -> BTreeMap<String, Response> {
        self.entries.clone()
    }
}

impl Default for StandardResponses {
    fn default() -> Self {
        Self::builtin()
    }
}
