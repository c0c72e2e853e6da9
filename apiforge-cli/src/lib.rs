//! # apiforge-cli
//!
//! Command-line tool composing an OpenAPI document from route manifests.
//!
//! This crate provides the `apiforge` binary with the following commands:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `apiforge generate` | Load every route, compose the document, write it to disk |
//! | `apiforge routes` | List all route modules with method, path, tags and auth |
//!
//! ## Architecture
//!
//! - [`commands::discover`]: route module discovery from the configured directories
//! - [`commands::generate`]: document composition and persistence (`apiforge generate`)
//! - [`commands::routes`]: route listing (`apiforge routes`)

pub mod commands;
