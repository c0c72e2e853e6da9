use serde_yaml::{Mapping, Value};
use std::path::Path;

use super::{ConfigError, ENV_PREFIX, PROFILE_ENV};

/// Load and parse a YAML file, deep-merging it over `root`. Missing files are skipped.
pub(crate) fn merge_yaml_file(path: &Path, root: &mut Value) -> Result<(), ConfigError> {
    if path.exists() {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?;
        merge_yaml_str(&content, root)?;
    }
    Ok(())
}

/// Parse a YAML string and deep-merge it over `root`.
pub(crate) fn merge_yaml_str(content: &str, root: &mut Value) -> Result<(), ConfigError> {
    let yaml: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    deep_merge(root, yaml);
    Ok(())
}

/// Mappings merge key by key; any other value replaces the target.
pub(crate) fn deep_merge(target: &mut Value, overlay: Value) {
    match (target, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base), Value::Mapping(over)) => {
            for (key, value) in over {
                match base.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Overlay `APIFORGE_*` variables. `__` separates nesting levels:
/// `APIFORGE_DOCUMENT__LOGO_URL` sets `document.logo_url`.
pub(crate) fn overlay_env(root: &mut Value, vars: impl IntoIterator<Item = (String, String)>) {
    for (key, value) in vars {
        if key == PROFILE_ENV {
            continue;
        }
        let Some(rest) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let segments: Vec<String> = rest.to_lowercase().split("__").map(str::to_string).collect();
        set_path(root, &segments, Value::String(value));
    }
}

fn set_path(root: &mut Value, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *root = value;
        return;
    };
    if !root.is_mapping() {
        *root = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = root {
        let key = Value::String(first.clone());
        let child = map.entry(key).or_insert(Value::Null);
        set_path(child, rest, value);
    }
}
