//! `${field}` references inside header and body values.
//!
//! Values are stored as typed; the backend substitutes references from the
//! linked authentication response when it executes a call.

use ::common::api::Authentication;

const OPEN: &str = "${";

/// What a value edit means for the reference picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSignal {
    /// The value ends with `${`; offer fields.
    Open,
    /// No `${` remains anywhere; dismiss.
    Close,
    Unchanged,
}

pub fn detect_trigger(value: &str) -> TriggerSignal {
    if value.ends_with(OPEN) {
        TriggerSignal::Open
    } else if !value.contains(OPEN) {
        TriggerSignal::Close
    } else {
        TriggerSignal::Unchanged
    }
}

/// Field names an authentication profile exposes for references.
pub fn available_fields(auth: Option<&Authentication>) -> Vec<String> {
    auth.and_then(|auth| auth.response_fields.as_ref())
        .map(|fields| fields.keys().cloned().collect())
        .unwrap_or_default()
}

/// Splices `field}` at `cursor`, counted in characters and clamped to the end.
pub fn insert(value: &str, cursor: usize, field: &str) -> String {
    let byte_idx = value
        .char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len());

    let mut out = String::with_capacity(value.len() + field.len() + 1);
    out.push_str(&value[..byte_idx]);
    out.push_str(field);
    out.push('}');
    out.push_str(&value[byte_idx..]);
    out
}

/// Well-formed `${name}` references in order of first appearance.
pub fn references(value: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = value;
    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if let Some(inner) = name.find(OPEN) {
            rest = &after[inner..];
            continue;
        }
        if !name.is_empty() && !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
        rest = &after[end + 1..];
    }
    found
}

/// References in `values` that `auth` does not expose.
pub fn unknown_references<'a>(
    values: impl IntoIterator<Item = &'a String>,
    auth: Option<&Authentication>,
) -> Vec<String> {
    let known = available_fields(auth);
    let mut unknown: Vec<String> = Vec::new();
    for value in values {
        for name in references(value) {
            if !known.contains(&name) && !unknown.contains(&name) {
                unknown.push(name);
            }
        }
    }
    unknown
}
