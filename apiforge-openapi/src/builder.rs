use apiforge_core::{load_routes, project_version, ForgeConfig, LoadError, LoadedRoute, RouteModule};
use std::collections::BTreeMap;
use std::path::Path;

use crate::content::{build_request_body, build_responses};
use crate::definitions::merge_definitions;
use crate::document::{Definitions, Document, Info, Logo, Paths, SwaggerRoute, OPENAPI_VERSION};
use crate::params::build_parameters;
use crate::responses::StandardResponses;

/// Version used when neither the configuration nor the project manifest carries one.
pub const FALLBACK_VERSION: &str = "0.0.0";

/// Document-level metadata for the generated document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentConfig {
    pub title: String,
    pub version: String,
    /// General description text block.
    pub description: String,
    /// Change history text block, appended to the description.
    pub changelog: String,
    pub logo_url: String,
    pub standard_responses: StandardResponses,
}

impl DocumentConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: String::new(),
            changelog: String::new(),
            logo_url: String::new(),
            standard_responses: StandardResponses::builtin(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn with_changelog(mut self, changelog: &str) -> Self {
        self.changelog = changelog.to_string();
        self
    }

    pub fn with_logo_url(mut self, url: &str) -> Self {
        self.logo_url = url.to_string();
        self
    }

    pub fn with_standard_responses(mut self, table: StandardResponses) -> Self {
        self.standard_responses = table;
        self
    }

    /// Resolve every document input named by the generator configuration:
    /// text blocks, version and standard response table.
    ///
    /// Missing description/changelog files contribute empty text.
    pub async fn from_forge_config(config: &ForgeConfig) -> Result<Self, LoadError> {
        let doc = &config.document;

        let version = match &doc.version {
            Some(version) => version.clone(),
            None => project_version(&config.resolve(&doc.manifest))
                .await?
                .unwrap_or_else(|| FALLBACK_VERSION.to_string()),
        };

        let description = read_text_block(&config.resolve(&doc.description_file)).await?;
        let changelog = read_text_block(&config.resolve(&doc.changelog_file)).await?;

        let standard_responses = match &doc.error_codes {
            Some(path) => StandardResponses::load(&config.resolve(path)).await?,
            None => StandardResponses::builtin(),
        };

        Ok(Self::new(&doc.title, &version)
            .with_description(&description)
            .with_changelog(&changelog)
            .with_logo_url(&doc.logo_url)
            .with_standard_responses(standard_responses))
    }

    fn info(&self) -> Info {
        Info {
            title: self.title.clone(),
            description: format!("{}{}", self.description, self.changelog),
            version: self.version.clone(),
            logo: Logo {
                url: self.logo_url.clone(),
                alt_text: self.title.clone(),
            },
        }
    }
}

async fn read_text_block(path: &Path) -> Result<String, LoadError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(LoadError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Counters collected while composing a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeReport {
    pub routes: usize,
    /// Definitions discarded because an earlier route declared a different schema under the same name.
    pub definition_conflicts: usize,
    /// Operations replaced by a later route with the same path and method.
    pub replaced_operations: usize,
}

/// A composed document together with its report.
#[derive(Debug, Clone)]
pub struct Composition {
    pub document: Document,
    pub report: ComposeReport,
}

/// Build the operation object for one route.
pub fn build_swagger_route(route: &LoadedRoute, standard: &StandardResponses) -> SwaggerRoute {
    let meta = &route.meta;
    let fragments = &route.fragments;

    SwaggerRoute {
        summary: meta.title.clone(),
        description: meta.description.clone(),
        tags: meta.tags.clone(),
        parameters: build_parameters(fragments.query.as_ref()),
        request_body: build_request_body(&meta.accepts, fragments.body.as_ref()),
        responses: build_responses(standard, meta, fragments.response.as_ref()),
        definitions: merge_definitions(Definitions::new(), fragments).definitions,
    }
}

/// State threaded through the fold over the sorted route list.
#[derive(Default)]
struct Accumulator {
    paths: Paths,
    definitions: Definitions,
    report: ComposeReport,
}

impl Accumulator {
    fn fold_route(self, route: &LoadedRoute, standard: &StandardResponses) -> Self {
        let Accumulator {
            mut paths,
            definitions,
            mut report,
        } = self;

        let merged = merge_definitions(definitions, &route.fragments);
        for name in &merged.conflicts {
            tracing::warn!(
                definition = %name,
                module = %route.module.display(),
                "Definition already declared with a different schema, keeping the first one"
            );
        }
        report.definition_conflicts += merged.conflicts.len();

        let operation = build_swagger_route(route, standard);
        let previous = paths
            .entry(route.meta.path.clone())
            .or_insert_with(BTreeMap::new)
            .insert(route.meta.method.clone(), operation);
        if previous.is_some() {
            tracing::warn!(
                path = %route.meta.path,
                method = %route.meta.method,
                module = %route.module.display(),
                "Operation declared twice, the later route replaces the earlier one"
            );
            report.replaced_operations += 1;
        }
        report.routes += 1;

        Accumulator {
            paths,
            definitions: merged.definitions,
            report,
        }
    }
}

/// Compose the document from already loaded routes.
///
/// Routes are processed in module path order whatever order they are given
/// in, so first-write-wins definition merging is deterministic.
pub fn build_document(config: &DocumentConfig, routes: &[LoadedRoute]) -> Composition {
    let mut ordered: Vec<&LoadedRoute> = routes.iter().collect();
    ordered.sort_by(|a, b| a.module.as_os_str().cmp(b.module.as_os_str()));

    let acc = ordered
        .into_iter()
        .fold(Accumulator::default(), |acc, route| {
            acc.fold_route(route, &config.standard_responses)
        });

    tracing::info!(
        paths = acc.paths.len(),
        definitions = acc.definitions.len(),
        conflicts = acc.report.definition_conflicts,
        "OpenAPI document composed"
    );

    Composition {
        document: Document {
            openapi: OPENAPI_VERSION.to_string(),
            info: config.info(),
            paths: acc.paths,
            definitions: acc.definitions,
            servers: Vec::new(),
            custom_site_title: config.title.clone(),
        },
        report: acc.report,
    }
}

/// Load every route module concurrently, then compose the document.
///
/// Fails fast on the first load error; nothing is composed in that case.
pub async fn compose(config: &DocumentConfig, modules: &[RouteModule]) -> Result<Composition, LoadError> {
    let routes = load_routes(modules).await?;
    Ok(build_document(config, &routes))
}
