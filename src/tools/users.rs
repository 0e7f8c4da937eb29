// Users
use super::common;
use crate::notion::{BodyKind, HttpMethod, Operation};
use serde_json::{json, Value};

pub const OPERATIONS: &[Operation] = &[
    Operation {
        name: "users.list",
        title: "List users",
        description: "List the people and bots in the workspace. Guests are not included.",
        method: HttpMethod::Get,
        path: "/v1/users",
        query: &["start_cursor", "page_size"],
        body: BodyKind::None,
        schema: list_schema,
    },
    Operation {
        name: "users.retrieve",
        title: "Retrieve user",
        description: "Retrieve a user by id.",
        method: HttpMethod::Get,
        path: "/v1/users/{user_id}",
        query: &[],
        body: BodyKind::None,
        schema: retrieve_schema,
    },
    Operation {
        name: "users.me",
        title: "Retrieve bot user",
        description: "Retrieve the bot user tied to the current Notion token, including the \
            workspace it belongs to.",
        method: HttpMethod::Get,
        path: "/v1/users/me",
        query: &[],
        body: BodyKind::None,
        schema: me_schema,
    },
];

fn list_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "start_cursor": common::start_cursor(),
            "page_size": common::page_size()
        },
        "additionalProperties": false
    })
}

fn retrieve_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "user_id": common::id("Id of the user")
        },
        "required": ["user_id"],
        "additionalProperties": false
    })
}

fn me_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false
    })
}
