use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::fragment::Fragments;

/// Media type used for JSON payloads.
pub const APPLICATION_JSON: &str = "application/json";

/// Whether a route module declares a plain HTTP endpoint or a WebSocket upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Http,
    WebSocket,
}

/// Location of one route module, tagged with the collection it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteModule {
    pub path: PathBuf,
    pub kind: RouteKind,
}

impl RouteModule {
    pub fn http(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: RouteKind::Http,
        }
    }

    pub fn websocket(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: RouteKind::WebSocket,
        }
    }
}

fn default_method() -> String {
    "get".to_string()
}

fn default_media_types() -> BTreeSet<String> {
    BTreeSet::from([APPLICATION_JSON.to_string()])
}

/// The metadata object a route manifest exports, as written by its author.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteExport {
    pub path: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub auth: Option<Value>,
    #[serde(default = "default_media_types")]
    pub accepts: BTreeSet<String>,
    #[serde(default = "default_media_types")]
    pub content_types: BTreeSet<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Normalized, read-only metadata about a single route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetadata {
    pub path: String,
    /// Lowercase HTTP verb. Always `"get"` for WebSocket upgrades.
    pub method: String,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub auth: Option<Value>,
    pub accepts: BTreeSet<String>,
    pub content_types: BTreeSet<String>,
    pub is_web_socket: bool,
    pub title: Option<String>,
}

impl RouteMetadata {
    pub fn from_export(export: RouteExport, kind: RouteKind) -> Self {
        let is_web_socket = kind == RouteKind::WebSocket;
        let method = if is_web_socket {
            "get".to_string()
        } else {
            export.method.to_lowercase()
        };

        Self {
            path: export.path,
            method,
            tags: export.tags,
            description: export.description,
            auth: export.auth,
            accepts: export.accepts,
            content_types: export.content_types,
            is_web_socket,
            title: export.title,
        }
    }

    /// Whether the route declares any authentication requirement.
    pub fn has_auth(&self) -> bool {
        matches!(&self.auth, Some(value) if !value.is_null() && *value != Value::Bool(false))
    }
}

/// A route module resolved to its metadata and sidecar schema fragments.
#[derive(Debug, Clone)]
pub struct LoadedRoute {
    pub module: PathBuf,
    pub meta: RouteMetadata,
    pub fragments: Fragments,
}

impl LoadedRoute {
    pub fn module(&self) -> &Path {
        &self.module
    }
}
