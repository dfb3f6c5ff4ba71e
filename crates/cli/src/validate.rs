use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use crate::fields::FieldList;

pub const NAME_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 1024;

pub fn validate_name(field: &str, value: &str) -> anyhow::Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        anyhow::bail!("{field} cannot be empty");
    }
    if trimmed.len() > NAME_MAX_LEN {
        anyhow::bail!("{field} exceeds {NAME_MAX_LEN} characters");
    }
    Ok(())
}

pub fn validate_description(value: &str) -> anyhow::Result<()> {
    if value.len() > DESCRIPTION_MAX_LEN {
        anyhow::bail!("description exceeds {DESCRIPTION_MAX_LEN} characters");
    }
    Ok(())
}

/// Instance names end up in Evolution URLs.
pub fn validate_instance_name(value: &str) -> anyhow::Result<()> {
    validate_name("instance name", value)?;
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        anyhow::bail!("instance name contains invalid character '{bad}'");
    }
    Ok(())
}

/// De-duplicates permission tags, keeping first-seen order.
pub fn unique_permissions(tags: &[String]) -> anyhow::Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            anyhow::bail!("permission tag cannot be empty");
        }
        if seen.insert(tag.to_string()) {
            unique.push(tag.to_string());
        }
    }
    Ok(unique)
}

pub fn collapse_pairs(pairs: &[(String, String)]) -> BTreeMap<String, String> {
    FieldList::from_pairs(pairs.iter().cloned()).collapse()
}

pub fn collapse_pairs_to_json(pairs: &[(String, String)]) -> Map<String, Value> {
    FieldList::from_pairs(pairs.iter().cloned()).collapse_values()
}
