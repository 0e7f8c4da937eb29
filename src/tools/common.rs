//! Schema fragments shared by several resources. They mirror the shapes
//! of Notion's request objects closely enough for a model to fill them in;
//! anything Notion accepts beyond these is passed through untouched.

use serde_json::{json, Map, Value};

pub const MAX_PAGE_SIZE: u64 = 100;
pub const MAX_RICH_TEXT_CONTENT: u64 = 2000;
pub const MAX_BLOCK_CHILDREN: u64 = 100;

pub const BLOCK_TYPES: &[&str] = &[
    "paragraph",
    "heading_1",
    "heading_2",
    "heading_3",
    "bulleted_list_item",
    "numbered_list_item",
    "to_do",
    "toggle",
    "code",
    "quote",
    "callout",
    "divider",
    "bookmark",
    "image",
    "video",
    "audio",
    "file",
    "pdf",
    "embed",
    "equation",
    "table",
    "table_row",
    "column_list",
    "column",
    "table_of_contents",
    "breadcrumb",
    "link_to_page",
    "synced_block",
];

/// Block types whose payload carries `rich_text`.
pub const TEXT_BLOCK_TYPES: &[&str] = &[
    "paragraph",
    "heading_1",
    "heading_2",
    "heading_3",
    "bulleted_list_item",
    "numbered_list_item",
    "to_do",
    "toggle",
    "quote",
    "callout",
    "code",
];

pub const COLORS: &[&str] = &[
    "default",
    "gray",
    "brown",
    "orange",
    "yellow",
    "green",
    "blue",
    "purple",
    "pink",
    "red",
    "gray_background",
    "brown_background",
    "orange_background",
    "yellow_background",
    "green_background",
    "blue_background",
    "purple_background",
    "pink_background",
    "red_background",
];

pub fn id(description: &str) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": description
    })
}

pub fn page_size() -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": MAX_PAGE_SIZE,
        "description": "Number of items to return (1-100, Notion default 100)"
    })
}

pub fn start_cursor() -> Value {
    json!({
        "type": "string",
        "description": "Cursor returned as next_cursor by a previous call"
    })
}

pub fn rich_text_item() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "type": "string", "enum": ["text", "mention", "equation"] },
            "text": {
                "type": "object",
                "properties": {
                    "content": { "type": "string", "maxLength": MAX_RICH_TEXT_CONTENT },
                    "link": {
                        "type": ["object", "null"],
                        "properties": { "url": { "type": "string", "minLength": 1 } },
                        "required": ["url"]
                    }
                },
                "required": ["content"]
            },
            "mention": { "type": "object" },
            "equation": {
                "type": "object",
                "properties": { "expression": { "type": "string" } },
                "required": ["expression"]
            },
            "annotations": {
                "type": "object",
                "properties": {
                    "bold": { "type": "boolean" },
                    "italic": { "type": "boolean" },
                    "strikethrough": { "type": "boolean" },
                    "underline": { "type": "boolean" },
                    "code": { "type": "boolean" },
                    "color": { "type": "string", "enum": COLORS }
                }
            }
        },
        "anyOf": [
            { "required": ["text"] },
            { "required": ["mention"] },
            { "required": ["equation"] }
        ]
    })
}

pub fn rich_text(description: &str) -> Value {
    json!({
        "type": "array",
        "maxItems": 100,
        "items": rich_text_item(),
        "description": description
    })
}

/// Payload of a text-bearing block, e.g. the value under `"paragraph"`.
pub fn text_block_content(block_type: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "rich_text": rich_text("Text of the block"),
            "caption": rich_text("Caption, for code blocks"),
            "color": { "type": "string", "enum": COLORS }
        },
        "description": format!("{block_type} content")
    })
}

pub fn block() -> Value {
    let mut properties = Map::new();
    properties.insert("object".into(), json!({ "type": "string", "const": "block" }));
    properties.insert("type".into(), json!({ "type": "string", "enum": BLOCK_TYPES }));
    for block_type in TEXT_BLOCK_TYPES {
        properties.insert(block_type.to_string(), text_block_content(block_type));
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": ["type"],
        "description": "Block object, e.g. {\"type\": \"paragraph\", \"paragraph\": {\"rich_text\": [...]}}"
    })
}

pub fn block_children(description: &str) -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "maxItems": MAX_BLOCK_CHILDREN,
        "items": block(),
        "description": description
    })
}

pub fn icon() -> Value {
    json!({
        "type": ["object", "null"],
        "properties": {
            "type": { "type": "string", "enum": ["emoji", "external"] },
            "emoji": { "type": "string", "minLength": 1 },
            "external": {
                "type": "object",
                "properties": { "url": { "type": "string", "minLength": 1 } },
                "required": ["url"]
            }
        },
        "description": "Emoji or external image icon; null removes it"
    })
}

pub fn cover() -> Value {
    json!({
        "type": ["object", "null"],
        "properties": {
            "type": { "type": "string", "enum": ["external"] },
            "external": {
                "type": "object",
                "properties": { "url": { "type": "string", "minLength": 1 } },
                "required": ["url"]
            }
        },
        "description": "External cover image; null removes it"
    })
}

/// Page property values keyed by property name. Title and text values are
/// held to the rich-text bounds; other property types pass through.
pub fn property_values(description: &str) -> Value {
    json!({
        "type": "object",
        "additionalProperties": {
            "type": ["object", "array"],
            "items": rich_text_item(),
            "properties": {
                "title": rich_text("Title value"),
                "rich_text": rich_text("Text value")
            }
        },
        "description": description
    })
}
