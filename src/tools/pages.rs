// Pages
use super::common;
use crate::notion::{BodyKind, HttpMethod, Operation};
use serde_json::{json, Value};

pub const OPERATIONS: &[Operation] = &[
    Operation {
        name: "pages.retrieve",
        title: "Retrieve page",
        description: "Retrieve a page's properties. Page content is read with \
            blocks.list_children using the page id.",
        method: HttpMethod::Get,
        path: "/v1/pages/{page_id}",
        query: &["filter_properties"],
        body: BodyKind::None,
        schema: retrieve_schema,
    },
    Operation {
        name: "pages.create",
        title: "Create page",
        description: "Create a page under a parent page or as a new row of a database. For \
            a database parent, properties must match the database schema; for a page \
            parent, only the title property is allowed.",
        method: HttpMethod::Post,
        path: "/v1/pages",
        query: &[],
        body: BodyKind::Json,
        schema: create_schema,
    },
    Operation {
        name: "pages.update",
        title: "Update page",
        description: "Update page property values, icon or cover, or archive the page by \
            setting archived to true.",
        method: HttpMethod::Patch,
        path: "/v1/pages/{page_id}",
        query: &[],
        body: BodyKind::Json,
        schema: update_schema,
    },
    Operation {
        name: "pages.retrieve_property",
        title: "Retrieve page property",
        description: "Retrieve a single property item of a page. Use this for properties \
            truncated in pages.retrieve, such as long rich text, relations or rollups.",
        method: HttpMethod::Get,
        path: "/v1/pages/{page_id}/properties/{property_id}",
        query: &["start_cursor", "page_size"],
        body: BodyKind::None,
        schema: retrieve_property_schema,
    },
];

fn parent() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "type": "string", "enum": ["page_id", "database_id"] },
            "page_id": common::id("Parent page id"),
            "database_id": common::id("Parent database id")
        },
        "oneOf": [
            { "required": ["page_id"] },
            { "required": ["database_id"] }
        ],
        "description": "{\"page_id\": \"...\"} or {\"database_id\": \"...\"}"
    })
}

fn retrieve_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "page_id": common::id("Id of the page"),
            "filter_properties": {
                "type": "array",
                "items": { "type": "string", "minLength": 1 },
                "description": "Only return these property ids"
            }
        },
        "required": ["page_id"],
        "additionalProperties": false
    })
}

fn create_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "parent": parent(),
            "properties": common::property_values(
                "Property values keyed by name or id, e.g. \
                 {\"title\": {\"title\": [{\"text\": {\"content\": \"Notes\"}}]}}"
            ),
            "children": common::block_children("Initial page content"),
            "icon": common::icon(),
            "cover": common::cover()
        },
        "required": ["parent", "properties"],
        "additionalProperties": false
    })
}

fn update_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "page_id": common::id("Id of the page"),
            "properties": common::property_values("Property values to change"),
            "archived": { "type": "boolean", "description": "true moves the page to the trash" },
            "in_trash": { "type": "boolean" },
            "icon": common::icon(),
            "cover": common::cover()
        },
        "required": ["page_id"],
        "additionalProperties": false
    })
}

fn retrieve_property_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "page_id": common::id("Id of the page"),
            "property_id": common::id("Property id as returned in the page's properties"),
            "start_cursor": common::start_cursor(),
            "page_size": common::page_size()
        },
        "required": ["page_id", "property_id"],
        "additionalProperties": false
    })
}
