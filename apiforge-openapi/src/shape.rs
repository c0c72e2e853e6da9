use apiforge_core::SchemaFragment;
use serde_json::{Map, Value};

/// The closed set of schema shapes the assemblers know how to handle.
///
/// Fragments are normalized once into shapes; assemblers match over the
/// variants instead of probing optional keys.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaShape<'a> {
    /// `type: object`, with its `properties` when present.
    Object {
        properties: Option<&'a Map<String, Value>>,
    },
    /// `anyOf`, variants in declaration order.
    Union(Vec<SchemaShape<'a>>),
    /// `type: string`.
    String,
    /// `$ref` to a named definition.
    Ref(&'a str),
    Unknown,
}

impl<'a> SchemaShape<'a> {
    /// Classify a single schema value.
    ///
    /// `type: string` takes precedence over `$ref`, which takes precedence
    /// over `type: object` and `anyOf`.
    pub fn of(value: &'a Value) -> Self {
        let Some(obj) = value.as_object() else {
            return SchemaShape::Unknown;
        };

        let schema_type = obj.get("type").and_then(Value::as_str);
        if schema_type == Some("string") {
            return SchemaShape::String;
        }
        if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
            return SchemaShape::Ref(reference);
        }
        if schema_type == Some("object") {
            return SchemaShape::Object {
                properties: obj.get("properties").and_then(Value::as_object),
            };
        }

        match obj.get("anyOf").and_then(Value::as_array) {
            Some(variants) => SchemaShape::Union(variants.iter().map(SchemaShape::of).collect()),
            None => SchemaShape::Unknown,
        }
    }
}

/// Shapes carried by a body fragment.
///
/// A body may be a union and an object at the same time; both shapes are
/// returned, union first.
pub fn body_shapes(fragment: &SchemaFragment) -> Vec<SchemaShape<'_>> {
    let mut shapes = Vec::new();

    if let Some(variants) = fragment.any_of() {
        shapes.push(SchemaShape::Union(
            variants.iter().map(SchemaShape::of).collect(),
        ));
    }

    if fragment.schema_type() == Some("object") {
        shapes.push(SchemaShape::Object {
            properties: fragment.properties(),
        });
    }

    if shapes.is_empty() {
        shapes.push(SchemaShape::Unknown);
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fragment(value: Value) -> SchemaFragment {
        SchemaFragment::from_value(value).unwrap()
    }

    #[test]
    fn classifies_variants() {
        let string = json!({ "type": "string" });
        let reference = json!({ "$ref": "#/definitions/User" });
        let number = json!({ "type": "number" });
        assert_eq!(SchemaShape::of(&string), SchemaShape::String);
        assert_eq!(SchemaShape::of(&reference), SchemaShape::Ref("#/definitions/User"));
        assert_eq!(SchemaShape::of(&number), SchemaShape::Unknown);
        assert_eq!(SchemaShape::of(&json!(true)), SchemaShape::Unknown);
    }

    #[test]
    fn nested_union() {
        let value = json!({ "anyOf": [{ "type": "string" }, { "type": "null" }] });
        assert_eq!(
            SchemaShape::of(&value),
            SchemaShape::Union(vec![SchemaShape::String, SchemaShape::Unknown])
        );
    }

    #[test]
    fn object_body_with_union() {
        let f = fragment(json!({
            "type": "object",
            "properties": { "a": { "type": "string" } },
            "anyOf": [{ "type": "string" }, { "$ref": "#/definitions/A" }]
        }));
        let shapes = body_shapes(&f);
        assert_eq!(shapes.len(), 2);
        assert_eq!(
            shapes[0],
            SchemaShape::Union(vec![SchemaShape::String, SchemaShape::Ref("#/definitions/A")])
        );
        assert!(matches!(shapes[1], SchemaShape::Object { properties: Some(_) }));
    }

    #[test]
    fn object_body_without_properties() {
        let f = fragment(json!({ "type": "object" }));
        assert_eq!(body_shapes(&f), vec![SchemaShape::Object { properties: None }]);
    }

    #[test]
    fn unrecognized_body_is_unknown() {
        let f = fragment(json!({ "type": "array", "items": {} }));
        assert_eq!(body_shapes(&f), vec![SchemaShape::Unknown]);
    }
}
