use apiforge_core::SchemaFragment;
use std::cmp::Ordering;

use crate::document::Parameter;

/// Build the `parameters` array from a query fragment.
///
/// One `in: query` parameter per property, required ones first, then by name.
pub fn build_parameters(query: Option<&SchemaFragment>) -> Vec<Parameter> {
    let Some(fragment) = query else {
        return Vec::new();
    };
    let Some(properties) = fragment.properties() else {
        return Vec::new();
    };

    let mut params: Vec<Parameter> = properties
        .iter()
        .map(|(name, schema)| Parameter {
            location: "query".to_string(),
            name: name.clone(),
            required: fragment.is_required(name),
            schema: schema.clone(),
        })
        .collect();

    params.sort_by(parameter_order);
    params
}

/// Required before optional; ascending name within equal required-ness.
pub fn parameter_order(a: &Parameter, b: &Parameter) -> Ordering {
    b.required
        .cmp(&a.required)
        .then_with(|| a.name.cmp(&b.name))
}
