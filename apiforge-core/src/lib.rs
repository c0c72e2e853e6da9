pub mod config;
pub mod error;
pub mod fragment;
pub mod layers;
pub mod loader;
pub mod manifest;
pub mod meta;

pub use config::{ConfigError, DocumentSection, ForgeConfig, RoutesSection};
pub use error::LoadError;
pub use fragment::{read_fragment, Fragments, SchemaFragment};
pub use layers::init_tracing;
pub use loader::{load_route, load_routes, sidecar_path, FragmentKind};
pub use manifest::project_version;
pub use meta::{LoadedRoute, RouteExport, RouteKind, RouteMetadata, RouteModule};
