use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "catalog": { "type": "string" },
            "session_file": { "type": "string" },
            "missions": {
                "type": "array",
                "items": { "$ref": "#/$defs/mission" }
            },
            "fetch": {
                "type": "object",
                "properties": {
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "thumbnail_size": { "type": "integer", "minimum": 16, "maximum": 512 },
                    "user_agent": { "type": "string" }
                }
            },
            "report": {
                "type": "object",
                "properties": {
                    "output_dir": { "type": "string" },
                    "fonts": { "type": "array", "items": { "type": "string" } },
                    "max_reason_lines": { "type": "integer", "minimum": 1 }
                }
            }
        },
        "$defs": {
            "mission": {
                "type": "object",
                "required": ["title", "budget"],
                "properties": {
                    "title": { "type": "string", "minLength": 1 },
                    "budget": { "type": "integer", "minimum": 0 },
                    "image": { "type": "string" }
                }
            }
        }
    })
});
