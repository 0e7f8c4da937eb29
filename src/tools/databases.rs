// Databases
use super::common;
use crate::notion::{BodyKind, HttpMethod, Operation};
use serde_json::{json, Value};

pub const OPERATIONS: &[Operation] = &[
    Operation {
        name: "databases.retrieve",
        title: "Retrieve database",
        description: "Retrieve a database's title and property schema. Call this before \
            creating rows or building query filters.",
        method: HttpMethod::Get,
        path: "/v1/databases/{database_id}",
        query: &[],
        body: BodyKind::None,
        schema: retrieve_schema,
    },
    Operation {
        name: "databases.create",
        title: "Create database",
        description: "Create a database as a child of an existing page, with a title and a \
            property schema. Exactly one property must be of type title.",
        method: HttpMethod::Post,
        path: "/v1/databases",
        query: &[],
        body: BodyKind::Json,
        schema: create_schema,
    },
    Operation {
        name: "databases.update",
        title: "Update database",
        description: "Update a database's title, description or property schema. Setting a \
            property to null removes it.",
        method: HttpMethod::Patch,
        path: "/v1/databases/{database_id}",
        query: &[],
        body: BodyKind::Json,
        schema: update_schema,
    },
    Operation {
        name: "databases.query",
        title: "Query database",
        description: "Query the rows (pages) of a database with optional filter and sorts. \
            Results are paginated; follow next_cursor with start_cursor.",
        method: HttpMethod::Post,
        path: "/v1/databases/{database_id}/query",
        query: &["filter_properties"],
        body: BodyKind::Json,
        schema: query_schema,
    },
];

fn retrieve_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "database_id": common::id("Id of the database")
        },
        "required": ["database_id"],
        "additionalProperties": false
    })
}

fn property_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description
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
                    "page_id": common::id("Parent page id")
                },
                "required": ["page_id"]
            },
            "title": common::rich_text("Database title"),
            "description": common::rich_text("Database description"),
            "properties": property_schema(
                "Property schema keyed by name, e.g. {\"Name\": {\"title\": {}}, \
                 \"Due\": {\"date\": {}}}"
            ),
            "is_inline": { "type": "boolean", "description": "Show the database inline in the parent page" },
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
            "database_id": common::id("Id of the database"),
            "title": common::rich_text("New title"),
            "description": common::rich_text("New description"),
            "properties": property_schema("Property schema changes; null removes a property"),
            "archived": { "type": "boolean" },
            "icon": common::icon(),
            "cover": common::cover()
        },
        "required": ["database_id"],
        "additionalProperties": false
    })
}

fn query_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "database_id": common::id("Id of the database"),
            "filter": {
                "type": "object",
                "description": "Notion filter object, e.g. {\"property\": \"Done\", \"checkbox\": {\"equals\": false}} \
                    or a compound {\"and\": [...]}/{\"or\": [...]}"
            },
            "sorts": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "property": { "type": "string", "minLength": 1 },
                        "timestamp": { "type": "string", "enum": ["created_time", "last_edited_time"] },
                        "direction": { "type": "string", "enum": ["ascending", "descending"] }
                    },
                    "required": ["direction"],
                    "anyOf": [
                        { "required": ["property"] },
                        { "required": ["timestamp"] }
                    ]
                }
            },
            "start_cursor": common::start_cursor(),
            "page_size": common::page_size(),
            "filter_properties": {
                "type": "array",
                "items": { "type": "string", "minLength": 1 },
                "description": "Only return these property ids for each row"
            }
        },
        "required": ["database_id"],
        "additionalProperties": false
    })
}
