//! Masking of credentials before request and response lines are logged.

use reqwest::header::HeaderMap;
use serde_json::Value;

const REDACTED: &str = "****";

/// Header name/value pairs with credentials masked
pub fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut output = Vec::with_capacity(headers.len());
    for (name, value) in headers {
        let key = name.as_str().to_string();
        let value_str = value.to_str().unwrap_or("<non-utf8>");
        if is_sensitive_header(name.as_str()) {
            output.push((key, mask_bearer_or_value(value_str)));
        } else {
            output.push((key, value_str.to_string()));
        }
    }
    output
}

/// A response body safe to log.
///
/// JSON bodies have sensitive fields masked wherever they are nested; any
/// other text only has bearer tokens masked. At most `limit` bytes are kept.
pub fn redact_body(body: &str, limit: usize) -> String {
    if let Ok(mut value) = serde_json::from_str::<Value>(body) {
        redact_json_value(&mut value);
        return truncate(&value.to_string(), limit);
    }

    truncate(&mask_bearer_tokens(body), limit)
}

/// Mask all but the last four characters of `value`
pub fn mask_value(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return REDACTED.to_string();
    }

    let last = trimmed.chars().rev().take(4).collect::<String>();
    format!("{}{}", REDACTED, last.chars().rev().collect::<String>())
}

fn redact_json_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if is_sensitive_key(key) {
                    *val = Value::String(mask_value(val.as_str().unwrap_or("")));
                } else {
                    redact_json_value(val);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                redact_json_value(item);
            }
        }
        Value::String(text) => {
            if text.contains(BEARER) {
                *text = mask_bearer_tokens(text);
            }
        }
        _ => {}
    }
}

fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "authorization" | "proxy-authorization" | "cookie" | "set-cookie"
    )
}

fn is_sensitive_key(key: &str) -> bool {
    matches!(
        key.to_ascii_lowercase().as_str(),
        "password" | "token" | "accesstoken" | "refreshtoken" | "fcmtoken" | "authorization"
    )
}

const BEARER: &str = "Bearer ";

fn mask_bearer_or_value(value: &str) -> String {
    if value.contains(BEARER) {
        mask_bearer_tokens(value)
    } else {
        mask_value(value)
    }
}

fn mask_bearer_tokens(input: &str) -> String {
    if !input.contains(BEARER) {
        return input.to_string();
    }

    let mut result = String::new();
    let mut rest = input;
    while let Some(pos) = rest.find(BEARER) {
        let (before, after) = rest.split_at(pos);
        result.push_str(before);
        result.push_str(BEARER);
        let token_start = BEARER.len();
        let token = after[token_start..]
            .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
            .next()
            .unwrap_or("");
        result.push_str(&mask_value(token));
        rest = &after[token_start + token.len()..];
    }
    result.push_str(rest);
    result
}

fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated, total {} bytes]", &text[..end], text.len())
}
