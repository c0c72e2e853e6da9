use apiforge_core::{load_route, load_routes, read_fragment, LoadError, RouteModule};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

// ── Schema Fragment Reader ──────────────────────────────────────────────────

#[tokio::test]
async fn missing_fragment_is_none() {
    let dir = TempDir::new().unwrap();
    let result = read_fragment(&dir.path().join("nope.body.json")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn null_fragment_is_none() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "a.body.json", "null");
    assert!(read_fragment(&path).await.unwrap().is_none());
}

#[tokio::test]
async fn fragment_is_parsed() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "a.query.json",
        r#"{"type":"object","properties":{"page":{"type":"integer"}},"required":["page"]}"#,
    );
    let fragment = read_fragment(&path).await.unwrap().unwrap();
    assert_eq!(fragment.schema_type(), Some("object"));
    assert_eq!(fragment.properties().unwrap()["page"], json!({ "type": "integer" }));
    assert!(fragment.is_required("page"));
}

#[tokio::test]
async fn malformed_fragment_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "a.body.json", "{ not json");
    let err = read_fragment(&path).await.unwrap_err();
    assert!(matches!(err, LoadError::FragmentParse { .. }));
    assert!(err.to_string().contains("a.body.json"));
}

#[tokio::test]
async fn non_object_fragment_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "a.body.json", "[1, 2]");
    let err = read_fragment(&path).await.unwrap_err();
    assert!(matches!(err, LoadError::FragmentParse { .. }));
}

// ── Route Metadata Loader ───────────────────────────────────────────────────

#[tokio::test]
async fn http_route_with_sidecars() {
    let dir = TempDir::new().unwrap();
    let module = write(
        dir.path(),
        "users.yaml",
        "path: /users\nmethod: POST\ntags: [users]\ndescription: Create a user\ntitle: Create\n",
    );
    write(dir.path(), "users.body.json", r#"{"type":"object","properties":{}}"#);
    write(dir.path(), "users.response.json", r#"{"description":"The user"}"#);

    let route = load_route(&RouteModule::http(&module)).await.unwrap();
    assert_eq!(route.meta.path, "/users");
    assert_eq!(route.meta.method, "post");
    assert_eq!(route.meta.tags, vec!["users".to_string()]);
    assert_eq!(route.meta.description.as_deref(), Some("Create a user"));
    assert_eq!(route.meta.title.as_deref(), Some("Create"));
    assert!(!route.meta.is_web_socket);
    assert!(route.fragments.body.is_some());
    assert!(route.fragments.query.is_none());
    assert_eq!(
        route.fragments.response.unwrap().description(),
        Some("The user")
    );
}

#[tokio::test]
async fn websocket_route_forces_get() {
    let dir = TempDir::new().unwrap();
    let module = write(dir.path(), "chat.yaml", "path: /chat\nmethod: post\n");

    let route = load_route(&RouteModule::websocket(&module)).await.unwrap();
    assert_eq!(route.meta.method, "get");
    assert!(route.meta.is_web_socket);
}

#[tokio::test]
async fn content_types_and_auth_are_read() {
    let dir = TempDir::new().unwrap();
    let module = write(
        dir.path(),
        "upload.yaml",
        "path: /upload\nmethod: put\naccepts: [text/plain, application/json]\ncontentTypes: [text/csv]\nauth:\n  scheme: bearer\n",
    );

    let route = load_route(&RouteModule::http(&module)).await.unwrap();
    assert_eq!(
        route.meta.accepts.iter().collect::<Vec<_>>(),
        vec!["application/json", "text/plain"]
    );
    assert_eq!(route.meta.content_types.iter().collect::<Vec<_>>(), vec!["text/csv"]);
    assert_eq!(route.meta.auth, Some(json!({ "scheme": "bearer" })));
    assert!(route.meta.has_auth());
}

#[tokio::test]
async fn empty_module_names_the_module() {
    let dir = TempDir::new().unwrap();
    let module = write(dir.path(), "broken.yaml", "");

    let err = load_route(&RouteModule::http(&module)).await.unwrap_err();
    assert!(matches!(err, LoadError::MissingExport { .. }));
    assert!(err.to_string().contains("broken.yaml"));
}

#[tokio::test]
async fn missing_module_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = load_route(&RouteModule::http(dir.path().join("ghost.yaml")))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[tokio::test]
async fn load_routes_sorts_by_module_path() {
    let dir = TempDir::new().unwrap();
    let c = write(dir.path(), "c.yaml", "path: /c\n");
    let a = write(dir.path(), "a.yaml", "path: /a\n");
    let b = write(dir.path(), "b.yaml", "path: /b\n");

    let routes = load_routes(&[
        RouteModule::http(&c),
        RouteModule::websocket(&a),
        RouteModule::http(&b),
    ])
    .await
    .unwrap();

    let paths: Vec<_> = routes.iter().map(|r| r.meta.path.as_str()).collect();
    assert_eq!(paths, vec!["/a", "/b", "/c"]);
    assert!(routes[0].meta.is_web_socket);
}

#[tokio::test]
async fn one_bad_module_aborts_the_batch() {
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "good.yaml", "path: /good\n");
    let bad = write(dir.path(), "bad.yaml", "false\n");

    let err = load_routes(&[RouteModule::http(&good), RouteModule::http(&bad)])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("bad.yaml"));
}

#[tokio::test]
async fn malformed_sidecar_aborts_the_batch() {
    let dir = TempDir::new().unwrap();
    let module = write(dir.path(), "users.yaml", "path: /users\n");
    write(dir.path(), "users.response.json", "{");

    let err = load_routes(&[RouteModule::http(&module)]).await.unwrap_err();
    assert!(matches!(err, LoadError::FragmentParse { .. }));
}
