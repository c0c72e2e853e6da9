use futures_util::future::try_join_all;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::fragment::{read_fragment, Fragments};
use crate::meta::{LoadedRoute, RouteExport, RouteMetadata, RouteModule};

/// The three sidecar fragments a route module may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Body,
    Query,
    Response,
}

impl FragmentKind {
    fn extension(self) -> &'static str {
        match self {
            FragmentKind::Body => "body.json",
            FragmentKind::Query => "query.json",
            FragmentKind::Response => "response.json",
        }
    }
}

/// Sidecar location: the module path with its extension replaced,
/// e.g. `users/list.yaml` -> `users/list.query.json`.
pub fn sidecar_path(module: &Path, kind: FragmentKind) -> PathBuf {
    module.with_extension(kind.extension())
}

/// Load every route module concurrently.
///
/// The first failure aborts the whole batch. The result is sorted by module
/// path so downstream merging is deterministic whatever the completion order.
pub async fn load_routes(modules: &[RouteModule]) -> Result<Vec<LoadedRoute>, LoadError> {
    let mut routes = try_join_all(modules.iter().map(load_route)).await?;
    routes.sort_by(|a, b| a.module.as_os_str().cmp(b.module.as_os_str()));
    tracing::info!(count = routes.len(), "Route modules loaded");
    Ok(routes)
}

/// Load a single route module: its exported metadata plus its sidecar fragments.
pub async fn load_route(module: &RouteModule) -> Result<LoadedRoute, LoadError> {
    let export = read_export(&module.path).await?;
    let meta = RouteMetadata::from_export(export, module.kind);

    let body_path = sidecar_path(&module.path, FragmentKind::Body);
    let query_path = sidecar_path(&module.path, FragmentKind::Query);
    let response_path = sidecar_path(&module.path, FragmentKind::Response);
    let (body, query, response) = futures_util::try_join!(
        read_fragment(&body_path),
        read_fragment(&query_path),
        read_fragment(&response_path),
    )?;

    tracing::debug!(
        module = %module.path.display(),
        method = %meta.method,
        path = %meta.path,
        websocket = meta.is_web_socket,
        "Route module resolved"
    );

    Ok(LoadedRoute {
        module: module.path.clone(),
        meta,
        fragments: Fragments {
            body,
            query,
            response,
        },
    })
}

async fn read_export(module: &Path) -> Result<RouteExport, LoadError> {
    let content = tokio::fs::read_to_string(module)
        .await
        .map_err(|source| LoadError::Io {
            path: module.to_path_buf(),
            source,
        })?;
    parse_export(module, &content)
}

/// Parse a YAML route manifest. Falsy documents count as a missing export.
pub(crate) fn parse_export(module: &Path, content: &str) -> Result<RouteExport, LoadError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| LoadError::InvalidExport {
            module: module.to_path_buf(),
            message: e.to_string(),
        })?;

    if is_falsy(&value) {
        return Err(LoadError::MissingExport {
            module: module.to_path_buf(),
        });
    }

    serde_yaml::from_value(value).map_err(|e| LoadError::InvalidExport {
        module: module.to_path_buf(),
        message: e.to_string(),
    })
}

fn is_falsy(value: &serde_yaml::Value) -> bool {
    match value {
        serde_yaml::Value::Null => true,
        serde_yaml::Value::Bool(b) => !b,
        serde_yaml::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_yaml::Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_replaces_extension() {
        let module = Path::new("routes/http/users.yaml");
        assert_eq!(
            sidecar_path(module, FragmentKind::Body),
            PathBuf::from("routes/http/users.body.json")
        );
        assert_eq!(
            sidecar_path(module, FragmentKind::Query),
            PathBuf::from("routes/http/users.query.json")
        );
        assert_eq!(
            sidecar_path(module, FragmentKind::Response),
            PathBuf::from("routes/http/users.response.json")
        );
    }

    #[test]
    fn falsy_exports_are_missing() {
        for content in ["", "null", "~", "false", "0", "''"] {
            let err = parse_export(Path::new("r.yaml"), content).unwrap_err();
            assert!(
                matches!(err, LoadError::MissingExport { .. }),
                "expected missing export for {content:?}"
            );
        }
    }

    #[test]
    fn export_without_path_is_invalid() {
        let err = parse_export(Path::new("r.yaml"), "method: get\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidExport { .. }));
    }

    #[test]
    fn export_defaults() {
        let export = parse_export(Path::new("r.yaml"), "path: /ping\n").unwrap();
        assert_eq!(export.path, "/ping");
        assert_eq!(export.method, "get");
        assert!(export.tags.is_empty());
        assert!(export.accepts.contains("application/json"));
        assert!(export.content_types.contains("application/json"));
    }
}
