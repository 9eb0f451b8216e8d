// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terraform plan model, decoded from `terraform show -json <planfile>`

use crate::address::{InstanceKey, ResourceAddress};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors decoding a plan document
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("plan output is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("plan JSON must be an object, got {0}")]
    NotAnObject(&'static str),
    #[error("plan JSON has no format_version")]
    MissingFormatVersion,
    #[error("unsupported plan format version {0} (expected 1.x)")]
    UnsupportedFormat(String),
}

/// Change action for one resource instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    NoOp,
    Forget,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    #[default]
    Managed,
    Data,
}

/// One entry of the plan's `resource_changes` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceChange {
    pub address: String,
    #[serde(default)]
    pub module_address: Option<String>,
    #[serde(default)]
    pub mode: ResourceMode,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    #[serde(default)]
    pub index: Option<InstanceKey>,
    pub change: Change,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Planned state; `None` when the plan document carries `null`.
    #[serde(default)]
    pub after: Option<Value>,
    #[serde(default)]
    pub after_unknown: Option<Value>,
}

/// Result of looking up an attribute in a record's planned state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeLookup<'a> {
    Present(&'a Value),
    /// Computed by the provider; known only after apply.
    Unknown,
    Absent,
}

impl ResourceChange {
    /// True unless the resource is only being destroyed.
    pub fn is_planned(&self) -> bool {
        self.change.actions != [Action::Delete]
    }

    pub fn actions(&self) -> &[Action] {
        &self.change.actions
    }

    pub fn after(&self) -> Option<&Value> {
        self.change.after.as_ref()
    }

    /// Presence check on the planned state. A `null` planned state counts as
    /// absent; an attribute explicitly set to `null` counts as present.
    pub fn attribute(&self, path: &str) -> AttributeLookup<'_> {
        if let Some(value) = self.change.after.as_ref().and_then(|a| a.lookup(path)) {
            return AttributeLookup::Present(value);
        }
        let unknown = self
            .change
            .after_unknown
            .as_ref()
            .and_then(|u| u.lookup(path))
            .is_some_and(|u| u.as_bool() == Some(true));
        if unknown {
            AttributeLookup::Unknown
        } else {
            AttributeLookup::Absent
        }
    }
}

/// A decoded terraform plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub format_version: Option<String>,
    #[serde(default)]
    pub terraform_version: Option<String>,
    #[serde(default, rename = "resource_changes")]
    pub changes: Vec<ResourceChange>,
}

impl Plan {
    /// Decode raw command output, rejecting invalid UTF-8.
    pub fn from_bytes(content: &[u8]) -> Result<Self, PlanError> {
        Self::from_json(std::str::from_utf8(content)?)
    }

    /// Decode `terraform show -json` output.
    ///
    /// Anything without a top-level `format_version` is not a plan document.
    pub fn from_json(content: &str) -> Result<Self, PlanError> {
        let doc: serde_json::Value = serde_json::from_str(content)?;
        if !doc.is_object() {
            return Err(PlanError::NotAnObject(json_kind(&doc)));
        }
        let plan: Plan = serde_json::from_value(doc)?;
        match &plan.format_version {
            None => Err(PlanError::MissingFormatVersion),
            Some(version) if version.split('.').next() != Some("1") => {
                Err(PlanError::UnsupportedFormat(version.clone()))
            }
            Some(_) => Ok(plan),
        }
    }

    pub fn from_changes(changes: Vec<ResourceChange>) -> Self {
        Self {
            changes,
            ..Self::default()
        }
    }

    /// Planned records that are instances of `address`.
    pub fn find<'a, 'b>(
        &'a self,
        address: &'b ResourceAddress,
    ) -> impl Iterator<Item = &'a ResourceChange> + 'b
    where
        'a: 'b,
    {
        self.planned().filter(move |c| address.matches(c))
    }

    /// Planned managed resources of one type, across all modules.
    pub fn of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = &'a ResourceChange> + 'a {
        self.planned().filter(move |c| {
            c.mode == ResourceMode::Managed && c.resource_type == resource_type
        })
    }

    /// Records that survive the plan (everything but pure deletes).
    pub fn planned(&self) -> impl Iterator<Item = &ResourceChange> {
        self.changes.iter().filter(|c| c.is_planned())
    }

    pub fn addresses(&self) -> Vec<&str> {
        self.planned().map(|c| c.address.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.planned().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn json_kind(doc: &serde_json::Value) -> &'static str {
    match doc {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
