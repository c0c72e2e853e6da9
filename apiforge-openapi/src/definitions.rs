use apiforge_core::Fragments;

use crate::document::Definitions;

/// Result of folding one route's definitions into the global map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub definitions: Definitions,
    /// Names that were already present with a different schema. The
    /// existing schema was kept.
    pub conflicts: Vec<String>,
}

/// Fold the `definitions` of a route's fragments (body, query, response)
/// into `global`.
///
/// First writer wins: a name already present is never replaced. Redeclaring
/// an identical schema is not a conflict.
pub fn merge_definitions(mut global: Definitions, fragments: &Fragments) -> MergeOutcome {
    let mut conflicts = Vec::new();

    for definitions in fragments.iter().filter_map(|f| f.definitions()) {
        for (name, schema) in definitions {
            match global.get(name) {
                None => {
                    global.insert(name.clone(), schema.clone());
                }
                Some(existing) if existing != schema => conflicts.push(name.clone()),
                Some(_) => {}
            }
        }
    }

    MergeOutcome {
        definitions: global,
        conflicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiforge_core::SchemaFragment;
    use serde_json::{json, Value};

    fn fragment(value: Value) -> Option<SchemaFragment> {
        SchemaFragment::from_value(value)
    }

    #[test]
    fn inserts_new_names() {
        let fragments = Fragments {
            body: fragment(json!({ "definitions": { "A": { "type": "string" } } })),
            query: fragment(json!({ "definitions": { "B": { "type": "integer" } } })),
            response: None,
        };
        let outcome = merge_definitions(Definitions::new(), &fragments);
        assert_eq!(outcome.definitions.len(), 2);
        assert!(outcome.conflicts.is_empty());
    }

    #[test]
    fn body_wins_over_response_within_one_route() {
        let fragments = Fragments {
            body: fragment(json!({ "definitions": { "A": { "type": "string" } } })),
            query: None,
            response: fragment(json!({ "definitions": { "A": { "type": "number" } } })),
        };
        let outcome = merge_definitions(Definitions::new(), &fragments);
        assert_eq!(outcome.definitions["A"], json!({ "type": "string" }));
        assert_eq!(outcome.conflicts, vec!["A".to_string()]);
    }

    #[test]
    fn existing_global_entry_is_kept() {
        let mut global = Definitions::new();
        global.insert("A".into(), json!({ "type": "boolean" }));
        let fragments = Fragments {
            body: fragment(json!({ "definitions": { "A": { "type": "string" } } })),
            ..Fragments::default()
        };
        let outcome = merge_definitions(global, &fragments);
        assert_eq!(outcome.definitions["A"], json!({ "type": "boolean" }));
    }

    #[test]
    fn identical_redeclaration_is_not_a_conflict() {
        let mut global = Definitions::new();
        global.insert("A".into(), json!({ "type": "string" }));
        let fragments = Fragments {
            response: fragment(json!({ "definitions": { "A": { "type": "string" } } })),
            ..Fragments::default()
        };
        assert!(merge_definitions(global, &fragments).conflicts.is_empty());
    }
}
