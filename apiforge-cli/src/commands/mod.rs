//! Command implementations for the `apiforge` CLI.

/// Route module discovery.
///
/// Non-recursive scan of the configured HTTP and WebSocket directories for
/// `*.yaml` / `*.yml` manifests.
pub mod discover;

/// Document generation: `apiforge generate`.
///
/// Loads configuration and routes, composes the document and writes it
/// atomically (temporary file, then rename).
pub mod generate;

/// Route listing: `apiforge routes`.
pub mod routes;
