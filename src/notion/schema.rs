//! Argument validation against the JSON Schema subset the tool
//! definitions use: `type`, `enum`, `const`, `required`, `properties`,
//! `additionalProperties` (`false` or a schema), `items`, `minItems`/`maxItems`,
//! `minLength`/`maxLength`, `minimum`/`maximum`, `anyOf` and `oneOf`.
//!
//! Anything else in a schema (`description`, `default`, `format`) is
//! documentation for the model and is ignored here.

use serde_json::{Map, Value};

pub fn validate(value: &Value, schema: &Value) -> Result<(), String> {
    check(value, schema, "arguments")
}

fn check(value: &Value, schema: &Value, path: &str) -> Result<(), String> {
    let Some(schema) = schema.as_object() else {
        return Ok(());
    };

    if let Some(expected) = schema.get("type") {
        check_type(value, expected, path)?;
    }

    if let Some(constant) = schema.get("const") {
        if value != constant {
            return Err(format!("{path} must be {constant}"));
        }
    }

    if let Some(Value::Array(allowed)) = schema.get("enum") {
        if !allowed.contains(value) {
            let choices: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
            return Err(format!("{path} must be one of {}", choices.join(", ")));
        }
    }

    match value {
        Value::String(s) => check_string(s, schema, path)?,
        Value::Number(n) => check_number(n.as_f64().unwrap_or_default(), schema, path)?,
        Value::Array(items) => check_array(items, schema, path)?,
        Value::Object(fields) => check_object(fields, schema, path)?,
        _ => {}
    }

    if let Some(Value::Array(variants)) = schema.get("anyOf") {
        let mut reasons = Vec::new();
        for variant in variants {
            match check(value, variant, path) {
                Ok(()) => return Ok(()),
                Err(reason) => reasons.push(reason),
            }
        }
        return Err(format!("{path} matches none of the allowed shapes ({})", reasons.join("; ")));
    }

    if let Some(Value::Array(variants)) = schema.get("oneOf") {
        let matched = variants
            .iter()
            .filter(|variant| check(value, variant, path).is_ok())
            .count();
        if matched != 1 {
            return Err(format!(
                "{path} must match exactly one allowed shape (matched {matched})"
            ));
        }
    }

    Ok(())
}

fn check_type(value: &Value, expected: &Value, path: &str) -> Result<(), String> {
    let matches = |name: &str| match name {
        "string" => value.is_string(),
        "integer" => value.as_f64().is_some_and(|f| f.fract() == 0.0),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    };

    let ok = match expected {
        Value::String(name) => matches(name),
        Value::Array(names) => names.iter().filter_map(Value::as_str).any(matches),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(format!("{path} must be of type {}", type_label(expected)))
    }
}

fn type_label(expected: &Value) -> String {
    match expected {
        Value::String(name) => name.clone(),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.to_string(),
    }
}

fn check_string(s: &str, schema: &Map<String, Value>, path: &str) -> Result<(), String> {
    let len = s.chars().count() as u64;
    if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
        if len < min {
            return Err(if min == 1 {
                format!("{path} must not be empty")
            } else {
                format!("{path} must be at least {min} characters")
            });
        }
    }
    if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
        if len > max {
            return Err(format!("{path} must be at most {max} characters"));
        }
    }
    Ok(())
}

fn check_number(n: f64, schema: &Map<String, Value>, path: &str) -> Result<(), String> {
    if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
        if n < min {
            return Err(format!("{path} must be >= {min}"));
        }
    }
    if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
        if n > max {
            return Err(format!("{path} must be <= {max}"));
        }
    }
    Ok(())
}

fn check_array(items: &[Value], schema: &Map<String, Value>, path: &str) -> Result<(), String> {
    let len = items.len() as u64;
    if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
        if len < min {
            return Err(format!("{path} must contain at least {min} item(s)"));
        }
    }
    if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
        if len > max {
            return Err(format!("{path} must contain at most {max} items"));
        }
    }
    if let Some(item_schema) = schema.get("items") {
        for (i, item) in items.iter().enumerate() {
            check(item, item_schema, &format!("{path}[{i}]"))?;
        }
    }
    Ok(())
}

fn check_object(
    fields: &Map<String, Value>,
    schema: &Map<String, Value>,
    path: &str,
) -> Result<(), String> {
    if let Some(Value::Array(required)) = schema.get("required") {
        for name in required.iter().filter_map(Value::as_str) {
            if !fields.contains_key(name) {
                return Err(format!("missing required field `{name}` in {path}"));
            }
        }
    }

    let properties = schema.get("properties").and_then(Value::as_object);

    if let Some(properties) = properties {
        for (name, field_schema) in properties {
            if let Some(field) = fields.get(name) {
                check(field, field_schema, &format!("{path}.{name}"))?;
            }
        }
    }

    let mut undeclared = fields
        .iter()
        .filter(|(name, _)| !properties.is_some_and(|p| p.contains_key(*name)));
    match schema.get("additionalProperties") {
        Some(Value::Bool(false)) => {
            if let Some((name, _)) = undeclared.next() {
                return Err(format!("unexpected field `{name}` in {path}"));
            }
        }
        Some(extra @ Value::Object(_)) => {
            for (name, field) in undeclared {
                check(field, extra, &format!("{path}.{name}"))?;
            }
        }
        _ => {}
    }

    Ok(())
}
