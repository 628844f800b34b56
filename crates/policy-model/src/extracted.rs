//! Key/value data extracted from a scanned policy document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};

/// Sparse, noisy key/value output of the document scanner.
///
/// Keys are opaque field paths such as `vehiculo.combustible` or
/// `tipoCombustible`. Values are usually strings; numbers and booleans are
/// rendered as text, `null` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedData {
    fields: BTreeMap<String, Value>,
}

impl ExtractedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds extracted data from a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ExtractedNotObject`] when the document is not a
    /// JSON object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map.into_iter().collect(),
            }),
            other => Err(ModelError::ExtractedNotObject(json_kind(&other))),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(raw)?)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the text stored under `key`.
    ///
    /// The literal key is tried first. A dotted key that is not present
    /// literally is walked as a path through nested objects.
    pub fn text(&self, key: &str) -> Option<String> {
        if let Some(value) = self.fields.get(key) {
            return value_text(value);
        }
        let mut parts = key.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        let mut walked = false;
        for part in parts {
            current = current.as_object()?.get(part)?;
            walked = true;
        }
        if walked { value_text(current) } else { None }
    }

    /// Probes `keys` in order and returns the first present, non-blank value
    /// together with the key it was found under.
    pub fn first_text<'k>(&self, keys: &[&'k str]) -> Option<(&'k str, String)> {
        keys.iter().find_map(|key| {
            self.text(key)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*key, value))
        })
    }
}

impl<K, V> FromIterator<(K, V)> for ExtractedData
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn first_present_key_wins() {
        let data: ExtractedData = [("tipoCombustible", "DIESEL"), ("combustible", "NAFTA")]
            .into_iter()
            .collect();
        let found = data.first_text(&["combustible", "tipoCombustible"]);
        assert_eq!(found, Some(("combustible", "NAFTA".to_string())));
    }

    #[test]
    fn blank_and_null_values_are_skipped() {
        let data = ExtractedData::from_json(json!({
            "combustible": "   ",
            "vehiculo.combustible": null,
            "tipoCombustible": "GASOIL"
        }))
        .unwrap();
        let found = data.first_text(&["combustible", "vehiculo.combustible", "tipoCombustible"]);
        assert_eq!(found, Some(("tipoCombustible", "GASOIL".to_string())));
    }

    #[test]
    fn dotted_keys_walk_nested_objects() {
        let data = ExtractedData::from_json(json!({
            "vehiculo": { "combustible": "NAFTA", "anio": 2019 }
        }))
        .unwrap();
        assert_eq!(data.text("vehiculo.combustible").as_deref(), Some("NAFTA"));
        assert_eq!(data.text("vehiculo.anio").as_deref(), Some("2019"));
        assert_eq!(data.text("vehiculo"), None);
        assert_eq!(data.text("vehiculo.marca"), None);
    }

    #[test]
    fn rejects_non_object_documents() {
        let err = ExtractedData::from_json(json!(["NAFTA"])).unwrap_err();
        assert!(matches!(err, ModelError::ExtractedNotObject("an array")));
    }
}
