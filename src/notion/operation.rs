// Operation - static description of one Notion REST call
use super::client::RemoteRequest;
use crate::errors::ToolError;
use reqwest::Method;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_method(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// What happens to arguments left over after path and query extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    /// Remaining arguments are sent as the JSON body, even when empty.
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Tool name, `resource.action`.
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub method: HttpMethod,
    /// `{name}` segments are filled from arguments of the same name.
    pub path: &'static str,
    pub query: &'static [&'static str],
    pub body: BodyKind,
    pub schema: fn() -> Value,
}

impl Operation {
    pub fn input_schema(&self) -> Value {
        (self.schema)()
    }

    /// Splits validated arguments into path, query string and body.
    pub fn build_request(&self, args: &Value) -> Result<RemoteRequest, ToolError> {
        let mut remaining: Map<String, Value> = match args {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            _ => {
                return Err(ToolError::InvalidArguments(
                    "arguments must be an object".to_string(),
                ))
            }
        };

        let mut path = String::with_capacity(self.path.len());
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let end = rest[start..]
                .find('}')
                .map(|offset| start + offset)
                .ok_or_else(|| ToolError::InvalidArguments(format!("malformed path {}", self.path)))?;
            let param = &rest[start + 1..end];
            let value = remaining
                .remove(param)
                .ok_or_else(|| ToolError::InvalidArguments(format!("missing required field `{param}`")))?;
            path.push_str(&rest[..start]);
            path.push_str(&path_segment(param, &value)?);
            rest = &rest[end + 1..];
        }
        path.push_str(rest);

        let mut query = Vec::new();
        for name in self.query {
            let Some(value) = remaining.remove(*name) else {
                continue;
            };
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        query.push((name.to_string(), query_value(name, &item)?));
                    }
                }
                other => query.push((name.to_string(), query_value(name, &other)?)),
            }
        }

        let body = match self.body {
            BodyKind::Json => Some(Value::Object(remaining)),
            BodyKind::None => None,
        };

        Ok(RemoteRequest {
            title: self.title,
            method: self.method.as_method(),
            path,
            query,
            body,
        })
    }
}

fn path_segment(param: &str, value: &Value) -> Result<String, ToolError> {
    let Some(segment) = value.as_str() else {
        return Err(ToolError::InvalidArguments(format!("`{param}` must be a string")));
    };
    if segment.is_empty() {
        return Err(ToolError::InvalidArguments(format!("`{param}` must not be empty")));
    }
    // URL parsing treats `%2e` as a dot, so encoded dot segments count too.
    let dots = segment.to_ascii_lowercase().replace("%2e", ".");
    if dots == "."
        || dots == ".."
        || segment
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#') || c.is_whitespace())
    {
        return Err(ToolError::InvalidArguments(format!(
            "`{param}` contains characters not allowed in an id"
        )));
    }
    Ok(segment.to_string())
}

fn query_value(name: &str, value: &Value) -> Result<String, ToolError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 => format!("{f:.0}"),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ToolError::InvalidArguments(format!(
            "`{name}` must be a string, number or boolean"
        ))),
    }
}
