mod loader;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "APIFORGE_";

/// Environment variable that selects the active profile.
pub const PROFILE_ENV: &str = "APIFORGE_PROFILE";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
    /// The merged configuration does not have the expected shape.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Document-level settings: title, text blocks, version source, logo.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentSection {
    pub title: String,
    pub logo_url: String,
    pub description_file: PathBuf,
    pub changelog_file: PathBuf,
    /// Explicit version. Takes precedence over `manifest`.
    pub version: Option<String>,
    /// `Cargo.toml` or `package.json` the version is read from.
    pub manifest: PathBuf,
    /// Optional YAML/JSON file replacing the builtin standard error responses.
    pub error_codes: Option<PathBuf>,
}

impl Default for DocumentSection {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            logo_url: "/logo.png".to_string(),
            description_file: PathBuf::from("README.md"),
            changelog_file: PathBuf::from("CHANGELOG.md"),
            version: None,
            manifest: PathBuf::from("Cargo.toml"),
            error_codes: None,
        }
    }
}

/// Directories holding HTTP and WebSocket route manifests.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutesSection {
    pub http: PathBuf,
    pub websocket: PathBuf,
}

impl Default for RoutesSection {
    fn default() -> Self {
        Self {
            http: PathBuf::from("routes/http"),
            websocket: PathBuf::from("routes/ws"),
        }
    }
}

/// Generator configuration loaded from YAML files, `.env` files, and environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `apiforge.yaml` (base)
/// 2. `apiforge-{profile}.yaml` (profile override, deep-merged)
/// 3. `.env` file (loaded into process environment)
/// 4. `.env.{profile}` file (loaded into process environment)
/// 5. Environment variables (e.g., `APIFORGE_DOCUMENT__TITLE` overrides `document.title`)
///
/// `.env` files never overwrite already-set environment variables.
///
/// Profile is determined by: `APIFORGE_PROFILE` env var > argument > default `"dev"`.
///
/// Relative paths are resolved against the directory the configuration was
/// loaded from, see [`ForgeConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub document: DocumentSection,
    pub routes: RoutesSection,
    pub output: PathBuf,
    #[serde(skip)]
    profile: String,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            document: DocumentSection::default(),
            routes: RoutesSection::default(),
            output: PathBuf::from("openapi.json"),
            profile: "dev".to_string(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl ForgeConfig {
    /// Load configuration from `dir` for the given profile.
    pub fn load(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());

        let mut root = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());

        // 1. Base config
        loader::merge_yaml_file(&dir.join("apiforge.yaml"), &mut root)?;

        // 2. Profile config
        let profile_path = dir.join(format!("apiforge-{active_profile}.yaml"));
        loader::merge_yaml_file(&profile_path, &mut root)?;

        // 3. .env files (do NOT overwrite existing env vars)
        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{active_profile}")));

        // 4. Environment overlay
        loader::overlay_env(&mut root, std::env::vars());

        tracing::debug!(profile = %active_profile, dir = %dir.display(), "Configuration loaded");
        Self::from_value(root, dir, active_profile)
    }

    /// Create a config from a YAML string (useful for testing). No env overlay.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut root = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
        loader::merge_yaml_str(yaml, &mut root)?;
        Self::from_value(root, Path::new("."), profile.to_string())
    }

    fn from_value(value: serde_yaml::Value, dir: &Path, profile: String) -> Result<Self, ConfigError> {
        let mut config: ForgeConfig = match value {
            serde_yaml::Value::Null => ForgeConfig::default(),
            other => serde_yaml::from_value(other).map_err(|e| ConfigError::Invalid(e.to_string()))?,
        };
        config.profile = profile;
        config.base_dir = dir.to_path_buf();
        Ok(config)
    }

    /// Override the output path (e.g. from a CLI flag).
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a configured path against the configuration directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
