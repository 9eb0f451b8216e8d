// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in scenarios for the Azure Synapse workspace module.
//!
//! Every scenario starts from the same base parameters (resource group,
//! location, environment, storage filesystem, SQL administrator) and layers
//! its own overrides on top.

use crate::{Params, Scenario};
use pc_core::{AddressError, Assertion, Predicate, ResourceAddress};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const LOCATION: &str = "westeurope";
const STORAGE_FILESYSTEM_ID: &str = "https://storage.dfs.core.windows.net/filesystem";
const SQL_ADMIN_LOGIN: &str = "sqladmin";
const SQL_ADMIN_PASSWORD: &str = "P@ssw0rd123!";
const PE_SUBNET_ID: &str =
    "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/subnet";

const WORKSPACE: &str = "azurerm_synapse_workspace.main";

/// Identifier of a built-in Synapse scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynapseScenario {
    Basic,
    Security,
    PrivateEndpoint,
    Naming,
    GitIntegration,
}

impl SynapseScenario {
    pub const ALL: [SynapseScenario; 5] = [
        SynapseScenario::Basic,
        SynapseScenario::Security,
        SynapseScenario::PrivateEndpoint,
        SynapseScenario::Naming,
        SynapseScenario::GitIntegration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SynapseScenario::Basic => "basic",
            SynapseScenario::Security => "security",
            SynapseScenario::PrivateEndpoint => "private_endpoint",
            SynapseScenario::Naming => "naming",
            SynapseScenario::GitIntegration => "git_integration",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SynapseScenario::Basic => "Minimal workspace from the basic example",
            SynapseScenario::Security => {
                "Managed vnet, exfiltration protection, security policies, one SQL and one Spark pool"
            }
            SynapseScenario::PrivateEndpoint => "Public access disabled, SQL and Dev private endpoints",
            SynapseScenario::Naming => "Production naming prefix flows into the workspace name",
            SynapseScenario::GitIntegration => "Workspace wired to a GitHub repository",
        }
    }

    /// Example directory under the module root.
    pub fn module_dir(self) -> &'static str {
        match self {
            SynapseScenario::Basic | SynapseScenario::Naming => "examples/basic",
            SynapseScenario::Security
            | SynapseScenario::PrivateEndpoint
            | SynapseScenario::GitIntegration => "examples/complete",
        }
    }

    fn resource_group(self) -> &'static str {
        match self {
            SynapseScenario::Basic => "rg-test-synapse-basic",
            SynapseScenario::Security => "rg-test-synapse-security",
            SynapseScenario::PrivateEndpoint => "rg-test-synapse-pe",
            SynapseScenario::Naming => "rg-test-synapse-naming",
            SynapseScenario::GitIntegration => "rg-test-synapse-git",
        }
    }

    /// Finalized input variables for this scenario.
    pub fn params(self) -> Params {
        let base = Params::builder()
            .set("resource_group_name", self.resource_group())
            .set("location", LOCATION)
            .set("environment", "test")
            .set("storage_data_lake_gen2_filesystem_id", STORAGE_FILESYSTEM_ID)
            .set("sql_administrator_login", SQL_ADMIN_LOGIN)
            .set("sql_administrator_login_password", SQL_ADMIN_PASSWORD);

        match self {
            SynapseScenario::Basic => base,
            SynapseScenario::Security => base
                .set("managed_virtual_network_enabled", true)
                .set("data_exfiltration_protection_enabled", true)
                .set("public_network_access_enabled", false)
                .set("identity_type", "SystemAssigned")
                .set("enable_security_alert_policy", true)
                .set("enable_vulnerability_assessment", true)
                .set("enable_extended_auditing_policy", true)
                .map("dedicated_sql_pools", |pools| {
                    pools.map("datapool", |p| p.set("sku_name", "DW100c"))
                })
                .map("spark_pools", |pools| {
                    pools.map("sparkpool", |p| {
                        p.set("node_size_family", "MemoryOptimized")
                            .set("node_size", "Small")
                            .set("node_count", 3)
                    })
                }),
            SynapseScenario::PrivateEndpoint => base
                .set("public_network_access_enabled", false)
                .map("private_endpoints", |endpoints| {
                    endpoints
                        .map("synapse_sql", |e| e.set("subnet_id", PE_SUBNET_ID))
                        .map("synapse_dev", |e| e.set("subnet_id", PE_SUBNET_ID))
                }),
            SynapseScenario::Naming => base
                .set("environment", "prod")
                .set("naming_prefix", "synapseprod"),
            SynapseScenario::GitIntegration => base.map("github_repo", |repo| {
                repo.set("account_name", "AIRCLOUD-PL")
                    .set("branch_name", "main")
                    .set("repository_name", "terraform-synapse")
                    .set("root_folder", "/")
            }),
        }
        .build()
    }

    /// Expectations checked against this scenario's plan, in order.
    pub fn assertions(self) -> Result<Vec<Assertion>, AddressError> {
        let exists = |raw: &str| ResourceAddress::parse(raw).map(Assertion::exists);

        Ok(match self {
            SynapseScenario::Basic | SynapseScenario::GitIntegration => vec![exists(WORKSPACE)?],
            SynapseScenario::Security => vec![
                exists(WORKSPACE)?,
                exists("azurerm_synapse_workspace_security_alert_policy.main")?,
                exists("azurerm_synapse_sql_pool.dedicated_pools")?,
                exists("azurerm_synapse_spark_pool.pools")?,
            ],
            SynapseScenario::PrivateEndpoint => vec![
                exists("azurerm_private_endpoint.synapse_sql")?,
                exists("azurerm_private_endpoint.synapse_dev")?,
                Assertion::count("azurerm_private_endpoint", 2),
            ],
            SynapseScenario::Naming => vec![Assertion::attribute(
                ResourceAddress::parse(WORKSPACE)?,
                "name",
                Predicate::contains("prod"),
            )],
        })
    }

    /// Build the full scenario against a checkout of the module at `module_root`.
    pub fn scenario(self, module_root: &Path) -> Result<Scenario, AddressError> {
        let mut scenario = Scenario::new(self.name(), module_root.join(self.module_dir()))
            .with_description(self.description())
            .with_params(self.params());
        for assertion in self.assertions()? {
            scenario = scenario.expect(assertion);
        }
        Ok(scenario)
    }
}

impl fmt::Display for SynapseScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SynapseScenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SynapseScenario::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| format!("unknown synapse scenario: {}", s))
    }
}

/// All five built-in scenarios, in catalog order.
pub fn catalog(module_root: &Path) -> Result<Vec<Scenario>, AddressError> {
    SynapseScenario::ALL
        .into_iter()
        .map(|id| id.scenario(module_root))
        .collect()
}

#[cfg(test)]
#[path = "synapse_tests.rs"]
mod tests;
