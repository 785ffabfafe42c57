use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::competency::Competency;
use super::identifier::{CNPJ_ROOT_LEN, clean_digits};

/// Field holding the employer root (8-digit CNPJ root).
pub const FIELD_EMPLOYER: &str = "numeroInscricaoEmpregador";

/// Field holding the competency as `MM/YYYY`.
pub const FIELD_COMPETENCY: &str = "competencia";

/// One payroll-deduction contract line: a flat JSON object.
///
/// Only [`FIELD_EMPLOYER`] and [`FIELD_COMPETENCY`] carry meaning for the
/// lookup; every other field is passed through to the client untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockRecord(Map<String, Value>);

impl MockRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Accept a JSON value if it is an object.
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(format!("expected a JSON object, got {}", json_kind(&other))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// The first 8 digits of the employer field. Numbers and punctuated
    /// strings are accepted.
    pub fn employer_root(&self) -> Option<String> {
        let raw = match self.get(FIELD_EMPLOYER)? {
            Value::String(s) => clean_digits(s),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(raw.chars().take(CNPJ_ROOT_LEN).collect())
    }

    /// The stored `MM/YYYY` competency string.
    pub fn competency(&self) -> Option<&str> {
        self.get(FIELD_COMPETENCY)?.as_str()
    }

    /// Exact-equality match on employer root and `MM/YYYY` competency.
    pub fn matches(&self, root: &str, competency: &Competency) -> bool {
        self.employer_root().as_deref() == Some(root)
            && self.competency() == Some(competency.to_string().as_str())
    }
}

impl From<Map<String, Value>> for MockRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Convert a JSON document into records. The document must be an array
/// whose elements are all objects.
pub fn parse_records(document: Value) -> Result<Vec<MockRecord>, String> {
    let items = match document {
        Value::Array(items) => items,
        other => return Err(format!("expected a JSON array, got {}", json_kind(&other))),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| MockRecord::from_value(item).map_err(|e| format!("element {i}: {e}")))
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
