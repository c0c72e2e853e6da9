use apiforge_core::meta::APPLICATION_JSON;
use apiforge_core::{RouteMetadata, SchemaFragment};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::document::{MediaType, RequestBody, Response};
use crate::responses::StandardResponses;
use crate::shape::{body_shapes, SchemaShape};

/// Description of the synthesized WebSocket upgrade response.
pub const WEBSOCKET_UPGRADE_DESCRIPTION: &str = "successful WebSocket upgrade";

/// Build an operation's `responses` map.
///
/// Starts from the standard error table, then adds:
/// - `101` for WebSocket routes (never `200`, whatever the response fragment),
/// - `200` with the fragment as schema when exactly one content type is declared,
/// - `200` with a `{type: "text"}` placeholder per content type when several are declared.
pub fn build_responses(
    standard: &StandardResponses,
    meta: &RouteMetadata,
    response: Option<&SchemaFragment>,
) -> BTreeMap<String, Response> {
    let mut responses = standard.seed();

    if meta.is_web_socket {
        responses.insert(
            "101".to_string(),
            Response::described(WEBSOCKET_UPGRADE_DESCRIPTION),
        );
        return responses;
    }

    let Some(fragment) = response else {
        return responses;
    };

    let content: BTreeMap<String, MediaType> = match meta.content_types.len() {
        0 => return responses,
        1 => meta
            .content_types
            .iter()
            .map(|ct| (ct.clone(), MediaType::new(fragment.to_value())))
            .collect(),
        // The real schema cannot be attributed to one content type here.
        _ => meta
            .content_types
            .iter()
            .map(|ct| (ct.clone(), MediaType::new(json!({ "type": "text" }))))
            .collect(),
    };

    responses.insert(
        "200".to_string(),
        Response {
            description: fragment.description().map(str::to_string),
            content,
            ..Response::default()
        },
    );
    responses
}

/// Build an operation's `requestBody` from its body fragment and accepted media types.
///
/// Union variants: strings map to every non-JSON accepted type, references
/// map to `application/json`. An object body maps to `application/json`
/// and is applied after the union.
pub fn build_request_body(accepts: &BTreeSet<String>, body: Option<&SchemaFragment>) -> RequestBody {
    let mut content = BTreeMap::new();

    let Some(fragment) = body else {
        return RequestBody { content };
    };

    for shape in body_shapes(fragment) {
        match shape {
            SchemaShape::Union(variants) => {
                for variant in variants {
                    match variant {
                        SchemaShape::String => {
                            for media_type in accepts.iter().filter(|a| *a != APPLICATION_JSON) {
                                content.insert(
                                    media_type.clone(),
                                    MediaType::new(json!({ "type": "string" })),
                                );
                            }
                        }
                        SchemaShape::Ref(reference) => {
                            content.insert(
                                APPLICATION_JSON.to_string(),
                                MediaType::new(json!({ "$ref": reference })),
                            );
                        }
                        _ => {}
                    }
                }
            }
            SchemaShape::Object { properties } => {
                let mut schema = serde_json::Map::new();
                schema.insert("type".into(), json!("object"));
                if let Some(properties) = properties {
                    schema.insert("properties".into(), Value::Object(properties.clone()));
                }
                content.insert(
                    APPLICATION_JSON.to_string(),
                    MediaType::new(Value::Object(schema)),
                );
            }
            _ => {}
        }
    }

    RequestBody { content }
}
