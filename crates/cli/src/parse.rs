use ::common::api::EntityId;

pub fn parse_kv(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| "value must be KEY=VALUE".to_string())?;
    if k.trim().is_empty() {
        return Err("key cannot be empty".into());
    }
    Ok((k.to_string(), v.to_string()))
}

pub fn parse_entity_id(value: &str) -> Result<EntityId, String> {
    let id: EntityId = value
        .trim()
        .parse()
        .map_err(|err| format!("invalid id '{}': {}", value, err))?;
    if id <= 0 {
        return Err(format!("invalid id '{}': must be positive", value));
    }
    Ok(id)
}

pub fn parse_http_url(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| format!("invalid url '{}': expected http:// or https://", value))?;
    if rest.is_empty() || rest.starts_with('/') {
        return Err(format!("invalid url '{}': missing host", value));
    }
    Ok(trimmed.to_string())
}

/// Endpoint path relative to an integration base URL.
pub fn parse_endpoint_path(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if !trimmed.starts_with('/') {
        return Err(format!("invalid path '{}': must start with '/'", value));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(format!("invalid path '{}': must not contain whitespace", value));
    }
    Ok(trimmed.to_string())
}
