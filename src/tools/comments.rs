// Comments
use super::common;
use crate::notion::{BodyKind, HttpMethod, Operation};
use serde_json::{json, Value};

pub const OPERATIONS: &[Operation] = &[
    Operation {
        name: "comments.list",
        title: "List comments",
        description: "List the unresolved comments on a page or block.",
        method: HttpMethod::Get,
        path: "/v1/comments",
        query: &["block_id", "start_cursor", "page_size"],
        body: BodyKind::None,
        schema: list_schema,
    },
    Operation {
        name: "comments.create",
        title: "Create comment",
        description: "Add a comment to a page (parent.page_id) or reply in an existing \
            discussion thread (discussion_id).",
        method: HttpMethod::Post,
        path: "/v1/comments",
        query: &[],
        body: BodyKind::Json,
        schema: create_schema,
    },
];

fn list_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "block_id": common::id("Id of the page or block whose comments to list"),
            "start_cursor": common::start_cursor(),
            "page_size": common::page_size()
        },
        "required": ["block_id"],
        "additionalProperties": false
    })
}

fn create_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "parent": {
                "type": "object",
                "properties": {
                    "type": { "type": "string", "enum": ["page_id"] },
                    "page_id": common::id("Page to comment on")
                },
                "required": ["page_id"]
            },
            "discussion_id": common::id("Existing discussion thread to reply in"),
            "rich_text": {
                "type": "array",
                "minItems": 1,
                "maxItems": 100,
                "items": common::rich_text_item(),
                "description": "Comment body"
            }
        },
        "required": ["rich_text"],
        "oneOf": [
            { "required": ["parent"] },
            { "required": ["discussion_id"] }
        ],
        "additionalProperties": false
    })
}
