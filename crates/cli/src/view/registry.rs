use ::common::api::{Authentication, Integration, Owner, Path, Request};
use serde_json::{Map, Value};

use super::format::{
    format_count, format_map, format_optional_str, format_timestamp, push_map_lines, truncate,
};
use super::table::render_table;

const DESCRIPTION_COLUMN_WIDTH: usize = 40;

pub fn render_owners_table(owners: &[Owner]) -> String {
    let headers = ["ID", "NAME", "DESCRIPTION", "UPDATED_AT"];
    let rows = owners
        .iter()
        .map(|owner| {
            vec![
                owner.id.to_string(),
                owner.name.clone(),
                format_optional_str(Some(&truncate(
                    &owner.description,
                    DESCRIPTION_COLUMN_WIDTH,
                ))),
                format_timestamp(&owner.updated_at),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn owner_lines(owner: &Owner) -> Vec<String> {
    vec![
        format!("id: {}", owner.id),
        format!("name: {}", owner.name),
        format!(
            "description: {}",
            format_optional_str(Some(&owner.description))
        ),
        format!("created_at: {}", format_timestamp(&owner.created_at)),
        format!("updated_at: {}", format_timestamp(&owner.updated_at)),
    ]
}

pub fn render_authentications_table(auths: &[Authentication]) -> String {
    let headers = ["ID", "NAME", "OWNER", "TYPE", "URL", "FIELDS"];
    let rows = auths
        .iter()
        .map(|auth| {
            vec![
                auth.id.to_string(),
                auth.name.clone(),
                format_optional_str(Some(&auth.owner_name)),
                auth.authentication_type.as_str().to_string(),
                auth.url.clone(),
                format_count(auth.response_fields.as_ref()),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn authentication_lines(auth: &Authentication) -> Vec<String> {
    let mut lines = vec![
        format!("id: {}", auth.id),
        format!("name: {}", auth.name),
        format!(
            "description: {}",
            format_optional_str(Some(&auth.description))
        ),
        format!(
            "owner: {} ({})",
            format_optional_str(Some(&auth.owner_name)),
            auth.owner_id
        ),
        format!("url: {}", auth.url),
        format!("type: {}", auth.authentication_type.as_str()),
        format!("content_type: {}", auth.content_type.as_str()),
    ];
    push_json_lines(&mut lines, "request_body", auth.request_body.as_ref());
    push_map_lines(&mut lines, "headers", auth.headers.as_ref());
    push_map_lines(&mut lines, "response_fields", auth.response_fields.as_ref());
    lines.push(format!("created_at: {}", format_timestamp(&auth.created_at)));
    lines.push(format!("updated_at: {}", format_timestamp(&auth.updated_at)));
    lines
}

pub fn render_integrations_table(integrations: &[Integration]) -> String {
    let headers = ["ID", "NAME", "OWNER", "AUTH", "BASE_URL", "HEADERS"];
    let rows = integrations
        .iter()
        .map(|integration| {
            vec![
                integration.id.to_string(),
                integration.name.clone(),
                format_optional_str(Some(&integration.owner_name)),
                format_optional_str(Some(&integration.authentication_name)),
                integration.base_url.clone(),
                format_count(integration.headers.as_ref()),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn integration_lines(integration: &Integration) -> Vec<String> {
    let mut lines = vec![
        format!("id: {}", integration.id),
        format!("name: {}", integration.name),
        format!(
            "description: {}",
            format_optional_str(Some(&integration.description))
        ),
        format!("base_url: {}", integration.base_url),
        format!(
            "owner: {} ({})",
            format_optional_str(Some(&integration.owner_name)),
            integration.owner_id
        ),
        format!(
            "authentication: {} ({})",
            format_optional_str(Some(&integration.authentication_name)),
            integration.authentication_id
        ),
    ];
    push_map_lines(&mut lines, "headers", integration.headers.as_ref());
    lines.push(format!(
        "created_at: {}",
        format_timestamp(&integration.created_at)
    ));
    lines.push(format!(
        "updated_at: {}",
        format_timestamp(&integration.updated_at)
    ));
    lines
}

pub fn render_paths_table(paths: &[Path]) -> String {
    let headers = ["ID", "NAME", "PATH", "INTEGRATION"];
    let rows = paths
        .iter()
        .map(|path| {
            vec![
                path.id.to_string(),
                path.name.clone(),
                path.path.clone(),
                format_optional_str(Some(&path.integration_name)),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn path_lines(path: &Path) -> Vec<String> {
    vec![
        format!("id: {}", path.id),
        format!("name: {}", path.name),
        format!("path: {}", path.path),
        format!(
            "integration: {} ({})",
            format_optional_str(Some(&path.integration_name)),
            path.integration_id
        ),
        format!("created_at: {}", format_timestamp(&path.created_at)),
        format!("updated_at: {}", format_timestamp(&path.updated_at)),
    ]
}

pub fn render_requests_table(requests: &[Request]) -> String {
    let headers = ["ID", "NAME", "METHOD", "PATH", "CONTENT_TYPE", "PARAMS"];
    let rows = requests
        .iter()
        .map(|request| {
            vec![
                request.id.to_string(),
                request.name.clone(),
                request.http_method.as_str().to_string(),
                format_optional_str(Some(&request.path_value)),
                request.content_type.as_str().to_string(),
                format_map(request.param_fields.as_ref()),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn request_lines(request: &Request) -> Vec<String> {
    let mut lines = vec![
        format!("id: {}", request.id),
        format!("name: {}", request.name),
        format!("method: {}", request.http_method.as_str()),
        format!(
            "path: {} ({}, {})",
            format_optional_str(Some(&request.path_value)),
            format_optional_str(Some(&request.path_name)),
            request.path_id
        ),
        format!("content_type: {}", request.content_type.as_str()),
    ];
    push_map_lines(&mut lines, "body_fields", request.body_fields.as_ref());
    push_map_lines(&mut lines, "header_fields", request.header_fields.as_ref());
    push_map_lines(&mut lines, "param_fields", request.param_fields.as_ref());
    push_json_lines(&mut lines, "request_example", request.request_example.as_ref());
    lines.push(format!(
        "created_at: {}",
        format_timestamp(&request.created_at)
    ));
    lines.push(format!(
        "updated_at: {}",
        format_timestamp(&request.updated_at)
    ));
    lines
}

fn push_json_lines(lines: &mut Vec<String>, heading: &str, object: Option<&Map<String, Value>>) {
    let Some(object) = object.filter(|o| !o.is_empty()) else {
        return;
    };
    lines.push(format!("{heading}:"));
    for (key, value) in object {
        let rendered = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        lines.push(format!("  {key}: {rendered}"));
    }
}
