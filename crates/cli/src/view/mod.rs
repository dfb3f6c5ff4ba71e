pub mod account;
pub mod evolution;
pub mod format;
pub mod registry;
pub mod table;

use serde::Serialize;

use crate::OutputMode;

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_pretty_yaml<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

/// Structured output for JSON/YAML modes, or the table/detail text otherwise.
pub fn render_output<T, F>(value: &T, mode: OutputMode, table: F) -> anyhow::Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match mode {
        OutputMode::Table => Ok(table(value)),
        OutputMode::Json => to_pretty_json(value),
        OutputMode::Yaml => to_pretty_yaml(value),
    }
}
