//! Decoded request payload (JSON object) and typed accessors.
//!
//! Rules shared by every accessor:
//! - An absent key and an explicit JSON `null` are both "missing".
//! - A present value of the wrong shape is a type mismatch, never coerced
//!   (a numeric string is not an integer, a float is not an integer).
//! - No semantic validation happens here.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

/// Owned request payload, decoded once from the request bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    root: Map<String, Value>,
}

impl Payload {
    /// Decode request bytes. The top-level value must be a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| ApiError::Decode(format!("invalid request json: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ApiError::Decode(format!(
                "request params must be a json object, got {}",
                kind(&other)
            ))),
        }
    }

    /// Borrowed view over the top-level object.
    pub fn params(&self) -> Params<'_> {
        Params { map: &self.root }
    }
}

/// Borrowed view over one JSON object of the payload.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Params<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Raw value for `name`; `None` when absent or `null`.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get_str(&self, name: &str) -> Result<&'a str> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| mismatch(name))
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        self.require(name)?
            .as_i64()
            .ok_or_else(|| mismatch(name))
    }

    pub fn get_object(&self, name: &str) -> Result<Params<'a>> {
        self.require(name)?
            .as_object()
            .map(Params::new)
            .ok_or_else(|| mismatch(name))
    }

    /// Array whose elements must all be objects.
    pub fn get_object_array(&self, name: &str) -> Result<Vec<Params<'a>>> {
        let items = self
            .require(name)?
            .as_array()
            .ok_or_else(|| mismatch(name))?;

        items
            .iter()
            .map(|item| item.as_object().map(Params::new).ok_or_else(|| mismatch(name)))
            .collect()
    }

    /// Object whose values must all be integers.
    pub fn get_i64_map(&self, name: &str) -> Result<BTreeMap<String, i64>> {
        let obj = self
            .require(name)?
            .as_object()
            .ok_or_else(|| mismatch(name))?;

        obj.iter()
            .map(|(k, v)| v.as_i64().map(|n| (k.clone(), n)).ok_or_else(|| mismatch(name)))
            .collect()
    }

    fn require(&self, name: &str) -> Result<&'a Value> {
        self.get(name)
            .ok_or_else(|| ApiError::MissingParam(name.to_string()))
    }
}

fn mismatch(name: &str) -> ApiError {
    ApiError::TypeMismatch(name.to_string())
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
