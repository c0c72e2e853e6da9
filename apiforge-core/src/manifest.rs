use std::path::Path;

use crate::error::LoadError;

/// Read the project version from a `Cargo.toml` or `package.json` manifest.
///
/// For `Cargo.toml`, `package.version` is used, then `workspace.package.version`.
/// Returns `Ok(None)` when the manifest does not exist or carries no version.
pub async fn project_version(manifest: &Path) -> Result<Option<String>, LoadError> {
    let content = match tokio::fs::read_to_string(manifest).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LoadError::Io {
                path: manifest.to_path_buf(),
                source,
            })
        }
    };

    let is_json = manifest.extension().is_some_and(|ext| ext == "json");
    if is_json {
        version_from_package_json(manifest, &content)
    } else {
        version_from_cargo_toml(manifest, &content)
    }
}

fn version_from_cargo_toml(path: &Path, content: &str) -> Result<Option<String>, LoadError> {
    let doc: toml_edit::DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
        LoadError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let package = doc
        .get("package")
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str());
    let workspace = doc
        .get("workspace")
        .and_then(|w| w.get("package"))
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str());

    Ok(package.or(workspace).map(str::to_string))
}

fn version_from_package_json(path: &Path, content: &str) -> Result<Option<String>, LoadError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| LoadError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(value
        .get("version")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cargo_package_version() {
        let content = "[package]\nname = \"x\"\nversion = \"1.2.3\"\n";
        let v = version_from_cargo_toml(Path::new("Cargo.toml"), content).unwrap();
        assert_eq!(v.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn cargo_workspace_version() {
        let content = "[workspace]\nmembers = []\n\n[workspace.package]\nversion = \"0.4.0\"\n";
        let v = version_from_cargo_toml(Path::new("Cargo.toml"), content).unwrap();
        assert_eq!(v.as_deref(), Some("0.4.0"));
    }

    #[test]
    fn cargo_inherited_version_falls_back_to_workspace() {
        let content = "[package]\nversion.workspace = true\n\n[workspace.package]\nversion = \"2.0.0\"\n";
        let v = version_from_cargo_toml(Path::new("Cargo.toml"), content).unwrap();
        assert_eq!(v.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn package_json_version() {
        let v = version_from_package_json(Path::new("package.json"), r#"{"name":"x","version":"3.1.0"}"#)
            .unwrap();
        assert_eq!(v.as_deref(), Some("3.1.0"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = version_from_cargo_toml(Path::new("Cargo.toml"), "[package\n").unwrap_err();
        assert!(matches!(err, LoadError::Manifest { .. }));
    }
}
