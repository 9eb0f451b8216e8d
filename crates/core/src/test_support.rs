// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Action, Change, InstanceKey, Plan, ResourceChange, ResourceMode, Value};

// ── Plan factory functions ──────────────────────────────────────────────────

/// A root-module managed resource being created with the given planned state.
pub fn created(resource_type: &str, name: &str, after: serde_json::Value) -> ResourceChange {
    ResourceChange {
        address: format!("{}.{}", resource_type, name),
        module_address: None,
        mode: ResourceMode::Managed,
        resource_type: resource_type.to_string(),
        name: name.to_string(),
        index: None,
        change: Change {
            actions: vec![Action::Create],
            after: Some(Value::from(after)),
            after_unknown: Some(Value::map()),
        },
    }
}

/// A `for_each` instance (`type.name["key"]`) being created.
pub fn created_instance(
    resource_type: &str,
    name: &str,
    key: &str,
    after: serde_json::Value,
) -> ResourceChange {
    let mut change = created(resource_type, name, after);
    change.address = format!("{}.{}[\"{}\"]", resource_type, name, key);
    change.index = Some(InstanceKey::Str(key.to_string()));
    change
}

/// Move a record into a child module (`module.<name>`).
pub fn in_module(mut change: ResourceChange, module: &str) -> ResourceChange {
    let module_address = format!("module.{}", module);
    change.address = format!("{}.{}", module_address, change.address);
    change.module_address = Some(module_address);
    change
}

/// Plan as produced for the Synapse security scenario.
pub fn synapse_security_plan() -> Plan {
    Plan::from_changes(vec![
        created(
            "azurerm_synapse_workspace",
            "main",
            serde_json::json!({ "name": "synw-test", "public_network_access_enabled": false }),
        ),
        created(
            "azurerm_synapse_workspace_security_alert_policy",
            "main",
            serde_json::json!({ "policy_state": "Enabled" }),
        ),
        created_instance(
            "azurerm_synapse_sql_pool",
            "dedicated_pools",
            "datapool",
            serde_json::json!({ "sku_name": "DW100c" }),
        ),
        created_instance(
            "azurerm_synapse_spark_pool",
            "pools",
            "sparkpool",
            serde_json::json!({ "node_size_family": "MemoryOptimized", "node_count": 3 }),
        ),
    ])
}
