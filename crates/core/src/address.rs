// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terraform resource addresses

use crate::plan::{ResourceChange, ResourceMode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// `[module.<name>[idx].]*[data.]<type>.<name>[idx]`
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^((?:module\.[A-Za-z_][A-Za-z0-9_-]*(?:\[(?:\d+|"[^"\]]*")\])?\.)*)(data\.)?([a-z][a-z0-9_]*)\.([A-Za-z_][A-Za-z0-9_-]*)(\[(?:\d+|"[^"\]]*")\])?$"#,
    )
    .expect("constant regex pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("malformed resource address '{0}': expected <resource_type>.<local_name>")]
    Malformed(String),
}

/// Instance key of a `count` or `for_each` resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstanceKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceKey::Int(n) => write!(f, "[{}]", n),
            InstanceKey::Str(s) => write!(f, "[\"{}\"]", s),
        }
    }
}

impl InstanceKey {
    fn parse_bracketed(raw: &str) -> Option<Self> {
        let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
        match inner.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            Some(key) => Some(InstanceKey::Str(key.to_string())),
            None => inner.parse().ok().map(InstanceKey::Int),
        }
    }
}

/// A well-formed resource address referenced by an assertion.
///
/// Without a module prefix the address matches the resource in any module;
/// without an index it matches every instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceAddress {
    module: Option<String>,
    mode: ResourceMode,
    resource_type: String,
    name: String,
    index: Option<InstanceKey>,
}

impl ResourceAddress {
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let malformed = || AddressError::Malformed(raw.to_string());
        let caps = ADDRESS_PATTERN.captures(raw).ok_or_else(malformed)?;
        // `module` and `data` are keywords, never resource types
        if matches!(&caps[3], "module" | "data") {
            return Err(malformed());
        }

        let module = caps
            .get(1)
            .map(|m| m.as_str().trim_end_matches('.'))
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        let mode = if caps.get(2).is_some() {
            ResourceMode::Data
        } else {
            ResourceMode::Managed
        };
        let index = match caps.get(5) {
            Some(m) => Some(InstanceKey::parse_bracketed(m.as_str()).ok_or_else(malformed)?),
            None => None,
        };

        Ok(Self {
            module,
            mode,
            resource_type: caps[3].to_string(),
            name: caps[4].to_string(),
            index,
        })
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn index(&self) -> Option<&InstanceKey> {
        self.index.as_ref()
    }

    /// Whether a plan record is an instance of this address.
    pub fn matches(&self, change: &ResourceChange) -> bool {
        if change.mode != self.mode
            || change.resource_type != self.resource_type
            || change.name != self.name
        {
            return false;
        }
        if let Some(module) = &self.module {
            if change.module_address.as_deref() != Some(module.as_str()) {
                return false;
            }
        }
        match &self.index {
            Some(index) => change.index.as_ref() == Some(index),
            None => true,
        }
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "{}.", module)?;
        }
        if self.mode == ResourceMode::Data {
            write!(f, "data.")?;
        }
        write!(f, "{}.{}", self.resource_type, self.name)?;
        if let Some(index) = &self.index {
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for ResourceAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResourceAddress {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ResourceAddress> for String {
    fn from(address: ResourceAddress) -> Self {
        address.to_string()
    }
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod tests;
