// Search - title search across everything shared with the integration
use super::common;
use crate::notion::{BodyKind, HttpMethod, Operation};
use serde_json::{json, Value};

pub const OPERATIONS: &[Operation] = &[Operation {
    name: "search",
    title: "Search",
    description: "Search pages and databases shared with the integration by title. Omit \
        query to list everything. Use filter to restrict to pages or databases.",
    method: HttpMethod::Post,
    path: "/v1/search",
    query: &[],
    body: BodyKind::Json,
    schema: search_schema,
}];

fn search_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "query": { "type": "string", "description": "Text to match against titles" },
            "filter": {
                "type": "object",
                "properties": {
                    "property": { "type": "string", "enum": ["object"] },
                    "value": { "type": "string", "enum": ["page", "database"] }
                },
                "required": ["property", "value"]
            },
            "sort": {
                "type": "object",
                "properties": {
                    "direction": { "type": "string", "enum": ["ascending", "descending"] },
                    "timestamp": { "type": "string", "enum": ["last_edited_time"] }
                },
                "required": ["direction", "timestamp"]
            },
            "start_cursor": common::start_cursor(),
            "page_size": common::page_size()
        },
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::schema::validate;

    #[test]
    fn filter_value_is_restricted() {
        let schema = OPERATIONS[0].input_schema();
        assert!(validate(
            &json!({"filter": {"property": "object", "value": "page"}}),
            &schema
        )
        .is_ok());
        assert!(validate(
            &json!({"filter": {"property": "object", "value": "block"}}),
            &schema
        )
        .is_err());
    }

    #[test]
    fn empty_search_posts_empty_body() {
        let req = OPERATIONS[0].build_request(&json!({})).expect("request");
        assert_eq!(req.body, Some(json!({})));
    }
}
