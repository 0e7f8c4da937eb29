// Blocks - page content
use super::common;
use crate::notion::{BodyKind, HttpMethod, Operation};
use serde_json::{json, Value};

pub const OPERATIONS: &[Operation] = &[
    Operation {
        name: "blocks.retrieve",
        title: "Retrieve block",
        description: "Retrieve a single block object by id. Use blocks.list_children to read \
            the content nested under it.",
        method: HttpMethod::Get,
        path: "/v1/blocks/{block_id}",
        query: &[],
        body: BodyKind::None,
        schema: retrieve_schema,
    },
    Operation {
        name: "blocks.list_children",
        title: "List block children",
        description: "List the child blocks of a block or page. Pass a page id to read a page's \
            content. Results are paginated; follow next_cursor with start_cursor.",
        method: HttpMethod::Get,
        path: "/v1/blocks/{block_id}/children",
        query: &["start_cursor", "page_size"],
        body: BodyKind::None,
        schema: list_children_schema,
    },
    Operation {
        name: "blocks.append_children",
        title: "Append block children",
        description: "Append new content blocks to a page or block, at the end or after a \
            given child block. At most 100 blocks per call.",
        method: HttpMethod::Patch,
        path: "/v1/blocks/{block_id}/children",
        query: &[],
        body: BodyKind::Json,
        schema: append_children_schema,
    },
    Operation {
        name: "blocks.update",
        title: "Update block",
        description: "Update a block's content. Send the block type as a key with its new \
            value, e.g. {\"paragraph\": {\"rich_text\": [...]}}, or set archived to move it \
            to the trash.",
        method: HttpMethod::Patch,
        path: "/v1/blocks/{block_id}",
        query: &[],
        body: BodyKind::Json,
        schema: update_schema,
    },
    Operation {
        name: "blocks.delete",
        title: "Delete block",
        description: "Move a block to the trash. The block can be restored from Notion's UI.",
        method: HttpMethod::Delete,
        path: "/v1/blocks/{block_id}",
        query: &[],
        body: BodyKind::None,
        schema: retrieve_schema,
    },
];

fn retrieve_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "block_id": common::id("Id of the block")
        },
        "required": ["block_id"],
        "additionalProperties": false
    })
}

fn list_children_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "block_id": common::id("Id of the parent block or page"),
            "start_cursor": common::start_cursor(),
            "page_size": common::page_size()
        },
        "required": ["block_id"],
        "additionalProperties": false
    })
}

fn append_children_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "block_id": common::id("Id of the parent block or page"),
            "children": common::block_children("Blocks to append"),
            "after": common::id("Append after this existing child block instead of at the end")
        },
        "required": ["block_id", "children"],
        "additionalProperties": false
    })
}

fn update_schema() -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert("block_id".into(), common::id("Id of the block to update"));
    properties.insert(
        "archived".into(),
        json!({ "type": "boolean", "description": "true moves the block to the trash" }),
    );
    properties.insert("in_trash".into(), json!({ "type": "boolean" }));
    for block_type in common::BLOCK_TYPES {
        let content = if common::TEXT_BLOCK_TYPES.contains(block_type) {
            common::text_block_content(block_type)
        } else {
            json!({ "type": "object", "description": format!("New {block_type} content") })
        };
        properties.insert(block_type.to_string(), content);
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": ["block_id"],
        "additionalProperties": false
    })
}
