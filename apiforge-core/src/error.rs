use std::path::PathBuf;

/// Error raised while loading route manifests or their schema fragments.
///
/// Every variant is fatal for a generation run: the first one encountered
/// aborts the whole composition.
#[derive(Debug)]
pub enum LoadError {
    /// The route manifest exists but exports nothing usable (empty, `null`, `false`, ...).
    MissingExport { module: PathBuf },
    /// The route manifest exports a value that is not a route metadata object.
    InvalidExport { module: PathBuf, message: String },
    /// A file could not be read for a reason other than "not found".
    Io { path: PathBuf, source: std::io::Error },
    /// A sidecar fragment file is not valid JSON.
    FragmentParse { path: PathBuf, message: String },
    /// A project manifest (Cargo.toml, package.json) could not be interpreted.
    Manifest { path: PathBuf, message: String },
    /// A standard response table file could not be interpreted.
    ResponseTable { path: PathBuf, message: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::MissingExport { module } => write!(
                f,
                "Route module {} does not export a route definition",
                module.display()
            ),
            LoadError::InvalidExport { module, message } => write!(
                f,
                "Route module {} exports an invalid route definition: {message}",
                module.display()
            ),
            LoadError::Io { path, source } => {
                write!(f, "Unable to read {}: {source}", path.display())
            }
            LoadError::FragmentParse { path, message } => {
                write!(f, "Malformed schema fragment {}: {message}", path.display())
            }
            LoadError::Manifest { path, message } => {
                write!(f, "Unable to read project manifest {}: {message}", path.display())
            }
            LoadError::ResponseTable { path, message } => {
                write!(f, "Invalid standard response table {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
