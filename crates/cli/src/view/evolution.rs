use ::common::api::{
    ConnectResponse, ConnectionStateResponse, Evolution, EvolutionInstance, LogoutResponse,
};

use super::format::{format_optional_str, format_secret, format_timestamp};
use super::table::render_table;

pub fn render_evolutions_table(evolutions: &[Evolution], show_keys: bool) -> String {
    let headers = ["ID", "NAME", "OWNER", "URL", "API_KEY"];
    let rows = evolutions
        .iter()
        .map(|evolution| {
            vec![
                evolution.id.to_string(),
                evolution.name.clone(),
                format_optional_str(Some(&evolution.owner_name)),
                evolution.url.clone(),
                format_secret(&evolution.api_key, show_keys),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

/// Copy of `evolutions` with API keys blanked for structured output.
pub fn redact_evolutions(evolutions: &[Evolution]) -> Vec<Evolution> {
    evolutions
        .iter()
        .cloned()
        .map(|mut evolution| {
            if !evolution.api_key.is_empty() {
                evolution.api_key = super::format::format_redacted();
            }
            evolution
        })
        .collect()
}

pub fn evolution_lines(evolution: &Evolution) -> Vec<String> {
    vec![
        format!("id: {}", evolution.id),
        format!("name: {}", evolution.name),
        format!(
            "description: {}",
            format_optional_str(Some(&evolution.description))
        ),
        format!("url: {}", evolution.url),
        format!("api_key: {}", format_secret(&evolution.api_key, false)),
        format!(
            "owner: {} ({})",
            format_optional_str(Some(&evolution.owner_name)),
            evolution.owner_id
        ),
        format!("updated_at: {}", format_timestamp(&evolution.updated_at)),
    ]
}

pub fn render_instances_table(instances: &[EvolutionInstance]) -> String {
    let headers = ["ID", "NAME", "EVOLUTION", "STATUS", "INTEGRATION", "WEBHOOK"];
    let rows = instances
        .iter()
        .map(|instance| {
            vec![
                instance.id.to_string(),
                instance.instance_name.clone(),
                format_optional_str(Some(&instance.evolution_name)),
                format_optional_str(Some(&instance.status)),
                format_optional_str(Some(&instance.integration)),
                format_optional_str(instance.webhook_url.as_deref()),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn instance_lines(instance: &EvolutionInstance) -> Vec<String> {
    vec![
        format!("id: {}", instance.id),
        format!("name: {}", instance.instance_name),
        format!(
            "instance_id: {}",
            format_optional_str(Some(&instance.instance_id))
        ),
        format!(
            "evolution: {} ({})",
            format_optional_str(Some(&instance.evolution_name)),
            instance.evolution_id
        ),
        format!("status: {}", format_optional_str(Some(&instance.status))),
        format!(
            "integration: {}",
            format_optional_str(Some(&instance.integration))
        ),
        format!(
            "webhook_url: {}",
            format_optional_str(instance.webhook_url.as_deref())
        ),
        format!("updated_at: {}", format_timestamp(&instance.updated_at)),
    ]
}

pub fn connect_lines(response: &ConnectResponse, show_qr: bool) -> Vec<String> {
    let mut lines = vec![
        format!(
            "pairing_code: {}",
            format_optional_str(response.pairing_code.as_deref())
        ),
        format!("code: {}", format_optional_str(response.code.as_deref())),
    ];
    if let Some(count) = response.count {
        lines.push(format!("count: {count}"));
    }
    match response.base64.as_deref() {
        Some(qr) if show_qr => lines.push(format!("qr_base64: {qr}")),
        Some(_) => lines.push("qr_base64: <available; pass --show-qr>".to_string()),
        None => {}
    }
    lines
}

/// Connect payload for structured output, without the QR image unless requested.
pub fn connect_view(response: &ConnectResponse, show_qr: bool) -> ConnectResponse {
    let mut view = response.clone();
    if !show_qr {
        view.base64 = None;
    }
    view
}

pub fn state_lines(response: &ConnectionStateResponse) -> Vec<String> {
    vec![
        format!("instance: {}", response.instance.instance_name),
        format!("state: {}", response.instance.state),
    ]
}

pub fn logout_line(response: &LogoutResponse) -> String {
    if response.error {
        format!("logout failed: {}", response.response.message)
    } else {
        format!("{}: {}", response.status, response.response.message)
    }
}
