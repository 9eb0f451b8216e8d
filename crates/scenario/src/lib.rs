// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Scenario definitions: parameter building, scenario files, built-in catalog

mod find;
mod params;
mod parser;
mod scenario;
pub mod synapse;

pub use find::{find_scenario, find_scenario_files, load_scenarios, FindError};
pub use params::{Params, ParamsBuilder};
pub use parser::{parse_scenarios, parse_scenarios_with_format, Format, ParseError};
pub use scenario::Scenario;
pub use synapse::SynapseScenario;
