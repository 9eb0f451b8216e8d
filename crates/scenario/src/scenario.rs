// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario definition

use crate::Params;
use pc_core::{Assertion, ScenarioName};
use std::path::{Path, PathBuf};

/// One named configuration of the module under test.
///
/// Built once, then handed to the runner by value; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: ScenarioName,
    pub description: Option<String>,
    /// Terraform root module directory to plan.
    pub module_dir: PathBuf,
    pub params: Params,
    /// Checked in order; the first failure ends the scenario.
    pub assertions: Vec<Assertion>,
}

impl Scenario {
    pub fn new(name: impl Into<ScenarioName>, module_dir: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            description: None,
            module_dir: module_dir.as_ref().to_path_buf(),
            params: Params::new(),
            assertions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }
}
