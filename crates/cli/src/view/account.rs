use ::common::api::{AuthenticationTestResult, Permission, RequestTestResult, UserRecord};
use serde_json::Value;

use super::format::{
    format_capabilities, format_optional_str, format_timestamp, push_map_lines, truncate,
};
use super::table::render_table;

const BODY_PREVIEW_CHARS: usize = 2000;

pub fn user_lines(user: &UserRecord) -> Vec<String> {
    let tags = if user.permissions.is_empty() {
        "-".to_string()
    } else {
        user.permissions.iter().cloned().collect::<Vec<_>>().join(",")
    };
    vec![
        format!("id: {}", user.id),
        format!("name: {}", user.display_name),
        format!("email: {}", user.email),
        format!("permissions: {tags}"),
        format!("capabilities: {}", format_capabilities(user)),
    ]
}

pub fn render_permissions_table(permissions: &[Permission]) -> String {
    let headers = ["ID", "NAME", "DESCRIPTION", "UPDATED_AT"];
    let rows = permissions
        .iter()
        .map(|permission| {
            vec![
                permission.id.to_string(),
                permission.name.clone(),
                format_optional_str(Some(&permission.description)),
                format_timestamp(&permission.updated_at),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "failed" }
}

fn status_line(code: u16, message: &str) -> String {
    if message.trim().is_empty() {
        format!("status: {code}")
    } else {
        format!("status: {code} {message}")
    }
}

fn render_body(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(text) => truncate(text, BODY_PREVIEW_CHARS),
        other => truncate(
            &serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
            BODY_PREVIEW_CHARS,
        ),
    }
}

pub fn authentication_test_lines(result: &AuthenticationTestResult) -> Vec<String> {
    let mut lines = vec![
        format!("result: {}", outcome(result.success)),
        status_line(result.status_code, &result.status_message),
        format!("time_ms: {}", result.response_time_ms),
    ];
    if let Some(error) = result.error_message.as_deref() {
        lines.push(format!("error: {error}"));
    }
    push_map_lines(&mut lines, "extracted_fields", Some(&result.extracted_fields));
    push_map_lines(&mut lines, "response_headers", Some(&result.response_headers));
    lines.push(format!(
        "response_body: {}",
        render_body(&Value::String(result.response_body.clone()))
    ));
    lines
}

pub fn request_test_lines(result: &RequestTestResult) -> Vec<String> {
    let mut lines = vec![
        format!("result: {}", outcome(result.success)),
        format!(
            "request: {} {}",
            result.http_method.as_str(),
            format_optional_str(Some(&result.full_url))
        ),
        status_line(result.status_code, &result.status_message),
        format!("time_ms: {}", result.response_time_ms),
    ];
    if let Some(error) = result.error_message.as_deref() {
        lines.push(format!("error: {error}"));
    }
    push_map_lines(&mut lines, "request_headers", Some(&result.request_headers));
    push_map_lines(&mut lines, "request_params", Some(&result.request_params));
    lines.push(format!("request_body: {}", render_body(&result.request_body)));
    push_map_lines(&mut lines, "extracted_fields", Some(&result.extracted_fields));
    push_map_lines(&mut lines, "response_headers", Some(&result.response_headers));
    lines.push(format!(
        "response_body: {}",
        render_body(&result.response_body)
    ));
    lines
}
