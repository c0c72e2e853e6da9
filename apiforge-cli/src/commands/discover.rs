use apiforge_core::{ForgeConfig, RouteKind, RouteModule};
use std::fs;
use std::path::Path;

/// Collect the route modules of both configured directories.
///
/// A missing directory contributes no routes.
pub fn discover_modules(config: &ForgeConfig) -> Result<Vec<RouteModule>, Box<dyn std::error::Error>> {
    let mut modules = scan_dir(&config.resolve(&config.routes.http), RouteKind::Http)?;
    modules.extend(scan_dir(
        &config.resolve(&config.routes.websocket),
        RouteKind::WebSocket,
    )?);
    tracing::debug!(count = modules.len(), "Route modules discovered");
    Ok(modules)
}

/// List `*.yaml` / `*.yml` files directly inside `dir`, sorted by path.
pub fn scan_dir(dir: &Path, kind: RouteKind) -> Result<Vec<RouteModule>, Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut modules = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_manifest(&path) {
            modules.push(RouteModule { path, kind });
        }
    }
    modules.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(modules)
}

pub fn is_manifest(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}
