//! Ordered key/value rows that collapse into the maps sent to the backend.

use std::collections::BTreeMap;

use anyhow::Context;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueField {
    pub key: String,
    pub value: String,
}

impl KeyValueField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.key.trim().is_empty()
    }
}

/// Editable rows; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList {
    rows: Vec<KeyValueField>,
}

impl Default for FieldList {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldList {
    pub fn new() -> Self {
        Self {
            rows: vec![KeyValueField::default()],
        }
    }

    pub fn from_map<'a, I>(map: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        Self::from_pairs(
            map.into_iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        )
    }

    /// Rows in the given order; an empty input yields one blank row.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let rows: Vec<KeyValueField> = pairs
            .into_iter()
            .map(|(key, value)| KeyValueField::new(key, value))
            .collect();
        if rows.is_empty() {
            Self::new()
        } else {
            Self { rows }
        }
    }

    /// Parses repeated `KEY=VALUE` arguments; the value may contain `=`.
    pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> anyhow::Result<Self> {
        let parsed = pairs
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                raw.split_once('=')
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .with_context(|| format!("expected KEY=VALUE, got `{raw}`"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self::from_pairs(parsed))
    }

    pub fn rows(&self) -> &[KeyValueField] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(KeyValueField::is_blank)
    }

    /// Appends a blank row.
    pub fn add(&mut self) {
        self.rows.push(KeyValueField::default());
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.rows.push(KeyValueField::new(key, value));
    }

    /// Removes the row at `idx`; removing the last remaining row blanks it instead.
    pub fn remove(&mut self, idx: usize) {
        if idx >= self.rows.len() {
            return;
        }
        self.rows.remove(idx);
        if self.rows.is_empty() {
            self.rows.push(KeyValueField::default());
        }
    }

    pub fn update_key(&mut self, idx: usize, key: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(idx) {
            row.key = key.into();
        }
    }

    pub fn update_value(&mut self, idx: usize, value: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(idx) {
            row.value = value.into();
        }
    }

    /// Rows with a non-blank key; a repeated key keeps its last value.
    pub fn collapse(&self) -> BTreeMap<String, String> {
        self.rows
            .iter()
            .filter(|row| !row.is_blank())
            .map(|row| (row.key.clone(), row.value.clone()))
            .collect()
    }

    /// Same as [`FieldList::collapse`], as a JSON object of strings.
    pub fn collapse_values(&self) -> Map<String, Value> {
        self.collapse()
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect()
    }
}
