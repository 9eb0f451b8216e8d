// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module input parameters

use indexmap::IndexMap;
use pc_core::Value;
use serde::{Deserialize, Serialize};

/// Ordered map of module input variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(IndexMap<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Layer `overrides` on top; later keys win, nested maps are replaced whole.
    pub fn merged(mut self, overrides: Params) -> Self {
        self.0.extend(overrides.0);
        self
    }

    /// Render as a JSON object, the shape terraform accepts as a var file.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl From<IndexMap<String, Value>> for Params {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Fluent, side-effect free construction of [`Params`] (and nested maps).
///
/// ```ignore
/// let params = Params::builder()
///     .set("location", "westeurope")
///     .map("spark_pools", |pools| pools.map("sparkpool", |p| p.set("node_count", 3)))
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParamsBuilder {
    entries: IndexMap<String, Value>,
}

impl ParamsBuilder {
    /// Set a scalar (or any prebuilt value), replacing an existing key in place.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Set a nested map built by `build`.
    pub fn map(
        self,
        key: impl Into<String>,
        build: impl FnOnce(ParamsBuilder) -> ParamsBuilder,
    ) -> Self {
        let nested = build(ParamsBuilder::default());
        self.set(key, Value::Map(nested.entries))
    }

    /// Apply every key of `params`, overriding existing ones.
    pub fn extend(mut self, params: Params) -> Self {
        self.entries.extend(params.0);
        self
    }

    pub fn remove(mut self, key: &str) -> Self {
        self.entries.shift_remove(key);
        self
    }

    pub fn build(self) -> Params {
        Params(self.entries)
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
