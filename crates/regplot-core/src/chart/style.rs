use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(thiserror::Error, Debug)]
pub enum StyleError {
    #[error("could not read style file {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("could not parse style {origin}: {source}")]
    Parse { origin: String, source: serde_json::Error },
    #[error("style {origin} is not a JSON object")]
    NotAnObject { origin: String },
    #[error("style does not fit the chart layout: {0}")]
    Invalid(serde_json::Error),
}

/// Layout keys read from a style document, applied on top of a chart's
/// default layout with [`crate::chart::Layout::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverlay(Map<String, Value>);

impl StyleOverlay {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StyleError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| StyleError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self, StyleError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|source| StyleError::Parse { origin: origin.to_owned(), source })?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(StyleError::NotAnObject { origin: origin.to_owned() }),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for StyleOverlay {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromStr for StyleOverlay {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, "<inline>")
    }
}

/// Recursive merge of `overlay` into `base`.
///
/// Objects merge key by key, any other overlay value replaces the base value
/// and `null` leaves the base untouched. A `title` given as a bare string, at
/// any depth, is expanded to `{"text": ...}` first so it merges with an
/// existing title object.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if value.is_null() {
                    continue;
                }
                let value = normalized(key, value);
                match base_map.get_mut(key) {
                    Some(slot) => deep_merge(slot, &value),
                    None => {
                        base_map.insert(key.clone(), value);
                    },
                }
            }
        },
        (slot, value) => {
            if !value.is_null() {
                *slot = value.clone();
            }
        },
    }
}

fn normalized(key: &str, value: &Value) -> Value {
    match value {
        Value::String(text) if key == "title" => {
            let mut map = Map::new();
            map.insert("text".to_owned(), Value::String(text.clone()));
            Value::Object(map)
        },
        Value::Object(map) => {
            Value::Object(map.iter().map(|(k, v)| (k.clone(), normalized(k, v))).collect())
        },
        other => other.clone(),
    }
}
