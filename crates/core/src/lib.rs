// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! pc-core: value model, terraform plan decoding, and plan assertions

pub mod address;
pub mod assertion;
pub mod id;
pub mod plan;
pub mod time_fmt;
pub mod value;

pub use address::{AddressError, InstanceKey, ResourceAddress};
pub use assertion::{
    assert_attribute, assert_count, assert_exists, check_all, AssertError, Assertion, Pattern,
    Predicate,
};
pub use id::ScenarioName;
pub use plan::{Action, AttributeLookup, Change, Plan, PlanError, ResourceChange, ResourceMode};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub use time_fmt::{format_elapsed, format_elapsed_ms};
pub use value::Value;
