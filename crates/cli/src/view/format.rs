use std::collections::BTreeMap;

use ::common::api::{Capability, Timestamp, UserRecord};
use chrono::SecondsFormat;

pub const ALL_CAPABILITIES: [Capability; 4] = [
    Capability::Permission,
    Capability::ApiManager,
    Capability::Omnichannel,
    Capability::EvolutionManager,
];

pub fn format_optional_str(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Normalized UTC when parseable, otherwise the backend text as-is.
pub fn format_timestamp(ts: &Timestamp) -> String {
    match ts.parsed() {
        Some(parsed) => parsed.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => format_optional_str(Some(ts.as_str())),
    }
}

pub fn format_redacted() -> String {
    "[redacted]".to_string()
}

pub fn format_secret(value: &str, reveal: bool) -> String {
    if reveal || value.is_empty() {
        format_optional_str(Some(value))
    } else {
        format_redacted()
    }
}

/// `k=v` pairs in key order.
pub fn format_map(map: Option<&BTreeMap<String, String>>) -> String {
    match map {
        Some(map) if !map.is_empty() => map
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(","),
        _ => "-".to_string(),
    }
}

pub fn format_count(map: Option<&BTreeMap<String, String>>) -> String {
    map.map(|m| m.len()).unwrap_or(0).to_string()
}

pub fn format_capabilities(user: &UserRecord) -> String {
    let granted = ALL_CAPABILITIES
        .iter()
        .filter(|cap| user.has(**cap))
        .map(|cap| cap.tag())
        .collect::<Vec<_>>();
    if granted.is_empty() {
        "-".to_string()
    } else {
        granted.join(",")
    }
}

/// Cuts `value` to `max` characters, marking the cut with `...`.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Indented `key: value` block under a heading, skipped when empty.
pub fn push_map_lines(
    lines: &mut Vec<String>,
    heading: &str,
    map: Option<&BTreeMap<String, String>>,
) {
    let Some(map) = map.filter(|m| !m.is_empty()) else {
        return;
    };
    lines.push(format!("{heading}:"));
    for (key, value) in map {
        lines.push(format!("  {key}: {value}"));
    }
}
