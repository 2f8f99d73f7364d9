use serde_json::{json, Map, Value};

pub const FIELD_RESOURCE_NAME: &str = "ResourceName";
pub const FIELD_EXECUTION_ID: &str = "ExecutionID";
pub const FIELD_EVENT_TYPE: &str = "EventType";
pub const FIELD_EVENT_TIME: &str = "EventTime";
pub const FIELD_PRICE_PER_MONTH: &str = "Data.PricePerMonth";

/// Fields that every match query filters on. They must be mapped as `keyword`
/// so a match query behaves as an exact equality check instead of full-text search.
pub const KEYWORD_FIELDS: [&str; 3] = [FIELD_RESOURCE_NAME, FIELD_EXECUTION_ID, FIELD_EVENT_TYPE];

const KEYWORD_TYPE: &str = "keyword";

/// Index creation body. Everything outside `KEYWORD_FIELDS` is left to dynamic mapping.
pub fn index_mapping() -> Value {
    let properties: Map<String, Value> = KEYWORD_FIELDS
        .iter()
        .map(|field| (field.to_string(), json!({ "type": KEYWORD_TYPE })))
        .collect();

    json!({
        "mappings": {
            "properties": properties
        }
    })
}

/// Returns the keyword fields that are absent or not keyword-typed in a live index mapping.
/// `mapping` is the per-index object, i.e. `{"mappings": {"properties": {...}}}`.
pub fn missing_keyword_fields(mapping: &Value) -> Vec<&'static str> {
    let properties = mapping.get("mappings").and_then(|m| m.get("properties"));

    KEYWORD_FIELDS
        .iter()
        .copied()
        .filter(|field| {
            let field_type = properties
                .and_then(|p| p.get(*field))
                .and_then(|f| f.get("type"))
                .and_then(|t| t.as_str());
            field_type != Some(KEYWORD_TYPE)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_index_mapping_declares_keyword_fields() {
        let mapping = index_mapping();
        assert_eq!(
            mapping,
            json!({
                "mappings": {
                    "properties": {
                        "ResourceName": { "type": "keyword" },
                        "ExecutionID": { "type": "keyword" },
                        "EventType": { "type": "keyword" }
                    }
                }
            })
        );
    }

    #[test]
    fn test_generated_mapping_has_no_missing_fields() {
        assert!(missing_keyword_fields(&index_mapping()).is_empty());
    }

    #[test]
    fn test_text_typed_field_is_reported() {
        let live = json!({
            "mappings": {
                "properties": {
                    "ResourceName": { "type": "keyword" },
                    "ExecutionID": { "type": "text", "fields": { "keyword": { "type": "keyword" } } },
                }
            }
        });
        assert_eq!(
            missing_keyword_fields(&live),
            vec![FIELD_EXECUTION_ID, FIELD_EVENT_TYPE]
        );
    }
}
