mod builder;
pub mod content;
pub mod definitions;
pub mod document;
pub mod params;
pub mod responses;
pub mod shape;

pub use builder::{
    build_document, build_swagger_route, compose, ComposeReport, Composition, DocumentConfig,
    FALLBACK_VERSION,
};
pub use content::{build_request_body, build_responses, WEBSOCKET_UPGRADE_DESCRIPTION};
pub use definitions::{merge_definitions, MergeOutcome};
pub use document::{
    Definitions, Document, Info, Logo, MediaType, Parameter, RequestBody, Response, SwaggerRoute,
    OPENAPI_VERSION,
};
pub use params::{build_parameters, parameter_order};
pub use responses::StandardResponses;
pub use shape::{body_shapes, SchemaShape};
