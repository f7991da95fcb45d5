//
//  atlassian-api
//  api/common/record.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Field-addressable JSON values
//!
//! Atlassian endpoints return loosely shaped JSON. Rather than generating a
//! struct for every response, the client hands back a [`Record`]: a thin
//! wrapper over [`serde_json::Value`] whose accessors never panic and return
//! `None` when a field is missing or has an unexpected type.
//!
//! # Example
//!
//! ```rust
//! use atlassian_api::api::common::Record;
//! use serde_json::json;
//!
//! let branch = Record::from(json!({
//!     "displayId": "feature/ABC-12",
//!     "latestCommit": "8d51122def5632836d1cb1026e879069e10a1e13",
//!     "metadata": {"ahead": 3}
//! }));
//!
//! assert_eq!(branch.str("displayId"), Some("feature/ABC-12"));
//! assert_eq!(branch.pointer("/metadata/ahead").and_then(|v| v.as_i64()), Some(3));
//! assert!(branch.get("missing").is_none());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON value returned by an Atlassian endpoint.
///
/// `Record` is transparent for serde, so it can be embedded in typed
/// structures (such as [`Page`](super::Page)) and serialised back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    /// Creates an empty JSON object.
    ///
    /// Used where the server answered without a body but the caller expects
    /// an object.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Looks up a top-level field of an object.
    ///
    /// Returns `None` when the record is not an object or the key is absent.
    /// A present key holding JSON `null` yields `Some(&Value::Null)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(key))
    }

    /// Returns `true` if the record is an object containing `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// String field accessor.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Integer field accessor.
    pub fn i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Boolean field accessor.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Nested object accessor.
    ///
    /// Returns `None` for `null` and for non-object values.
    pub fn record(&self, key: &str) -> Option<Record> {
        match self.get(key) {
            Some(value @ Value::Object(_)) => Some(Self(value.clone())),
            _ => None,
        }
    }

    /// Array field accessor, each element wrapped as a record.
    ///
    /// `None` distinguishes "absent or null" from an empty array.
    pub fn records(&self, key: &str) -> Option<Vec<Record>> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().cloned().map(Self).collect())
    }

    /// Looks up a nested value with a JSON pointer (`/fromRef/displayId`).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    /// Iterates over the fields of an object record.
    ///
    /// Non-object records yield nothing.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.as_object().into_iter().flat_map(|map| map.iter())
    }

    /// Returns `true` if the record is a JSON object with no fields.
    pub fn is_empty_object(&self) -> bool {
        self.0.as_object().is_some_and(Map::is_empty)
    }

    /// Borrows the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the record, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.0
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
