// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only assertions over a decoded plan

use crate::address::ResourceAddress;
use crate::plan::{AttributeLookup, Plan, ResourceChange};
use crate::value::Value;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Assertion failures. Each one is fatal to the scenario that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssertError {
    #[error("resource {address} not found in plan ({planned} resource(s) planned)")]
    MissingResource {
        address: ResourceAddress,
        planned: usize,
    },

    #[error(
        "{address}: attribute '{attribute}' {}",
        if *unknown { "is only known after apply" } else { "is not set in the planned state" }
    )]
    MissingAttribute {
        address: String,
        attribute: String,
        unknown: bool,
    },

    #[error("{address}: attribute '{attribute}' expected to {expected}, got {actual}")]
    PredicateFailed {
        address: String,
        attribute: String,
        expected: String,
        actual: String,
    },

    #[error("{address}: attribute '{attribute}' is a {actual}, but {expected} needs a {required}")]
    TypeMismatch {
        address: String,
        attribute: String,
        expected: String,
        required: &'static str,
        actual: &'static str,
    },

    #[error(
        "expected {expected} {resource_type} resource(s), found {actual}: [{}]",
        addresses.join(", ")
    )]
    CountMismatch {
        resource_type: String,
        expected: usize,
        actual: usize,
        addresses: Vec<String>,
    },
}

/// A compiled regular expression, compared by source text.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Pattern)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Condition evaluated against one attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Contains(String),
    StartsWith(String),
    Matches(Pattern),
    Equals(Value),
    NotNull,
}

impl Predicate {
    pub fn contains(text: impl Into<String>) -> Self {
        Predicate::Contains(text.into())
    }

    pub fn starts_with(text: impl Into<String>) -> Self {
        Predicate::StartsWith(text.into())
    }

    pub fn matches(source: &str) -> Result<Self, regex::Error> {
        Pattern::new(source).map(Predicate::Matches)
    }

    pub fn equals(value: impl Into<Value>) -> Self {
        Predicate::Equals(value.into())
    }

    /// Evaluate against `value`.
    ///
    /// Returns `Err(required_type)` when the value cannot be narrowed to the
    /// type the predicate works on.
    pub fn evaluate(&self, value: &Value) -> Result<bool, &'static str> {
        match self {
            Predicate::Contains(needle) => Ok(text(value)?.contains(needle.as_str())),
            Predicate::StartsWith(prefix) => Ok(text(value)?.starts_with(prefix.as_str())),
            Predicate::Matches(pattern) => Ok(pattern.is_match(text(value)?)),
            Predicate::Equals(expected) => Ok(value.equivalent(expected)),
            Predicate::NotNull => Ok(!value.is_null()),
        }
    }
}

fn text(value: &Value) -> Result<&str, &'static str> {
    value.as_str().ok_or("string")
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Contains(s) => write!(f, "contain {:?}", s),
            Predicate::StartsWith(s) => write!(f, "start with {:?}", s),
            Predicate::Matches(p) => write!(f, "match /{}/", p.as_str()),
            Predicate::Equals(v) => write!(f, "equal {}", v),
            Predicate::NotNull => write!(f, "be non-null"),
        }
    }
}

/// One declared expectation about a plan
#[derive(Debug, Clone, PartialEq)]
pub enum Assertion {
    Exists {
        address: ResourceAddress,
    },
    Attribute {
        address: ResourceAddress,
        attribute: String,
        predicate: Predicate,
    },
    Count {
        resource_type: String,
        expected: usize,
    },
}

impl Assertion {
    pub fn exists(address: ResourceAddress) -> Self {
        Assertion::Exists { address }
    }

    pub fn attribute(
        address: ResourceAddress,
        attribute: impl Into<String>,
        predicate: Predicate,
    ) -> Self {
        Assertion::Attribute {
            address,
            attribute: attribute.into(),
            predicate,
        }
    }

    pub fn count(resource_type: impl Into<String>, expected: usize) -> Self {
        Assertion::Count {
            resource_type: resource_type.into(),
            expected,
        }
    }

    pub fn check(&self, plan: &Plan) -> Result<(), AssertError> {
        match self {
            Assertion::Exists { address } => assert_exists(plan, address).map(|_| ()),
            Assertion::Attribute {
                address,
                attribute,
                predicate,
            } => assert_attribute(plan, address, attribute, predicate),
            Assertion::Count {
                resource_type,
                expected,
            } => assert_count(plan, resource_type, *expected),
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assertion::Exists { address } => write!(f, "{} exists", address),
            Assertion::Attribute {
                address,
                attribute,
                predicate,
            } => write!(f, "{}.{} should {}", address, attribute, predicate),
            Assertion::Count {
                resource_type,
                expected,
            } => write!(f, "exactly {} {} resource(s)", expected, resource_type),
        }
    }
}

/// Fail with `MissingResource` unless some planned record matches `address`.
pub fn assert_exists<'a>(
    plan: &'a Plan,
    address: &ResourceAddress,
) -> Result<Vec<&'a ResourceChange>, AssertError> {
    let found: Vec<_> = plan.find(address).collect();
    if found.is_empty() {
        return Err(AssertError::MissingResource {
            address: address.clone(),
            planned: plan.len(),
        });
    }
    Ok(found)
}

/// Check `predicate` on `attribute` of every instance matching `address`.
pub fn assert_attribute(
    plan: &Plan,
    address: &ResourceAddress,
    attribute: &str,
    predicate: &Predicate,
) -> Result<(), AssertError> {
    for record in assert_exists(plan, address)? {
        let value = match record.attribute(attribute) {
            AttributeLookup::Present(value) => value,
            AttributeLookup::Unknown => {
                return Err(AssertError::MissingAttribute {
                    address: record.address.clone(),
                    attribute: attribute.to_string(),
                    unknown: true,
                })
            }
            AttributeLookup::Absent => {
                return Err(AssertError::MissingAttribute {
                    address: record.address.clone(),
                    attribute: attribute.to_string(),
                    unknown: false,
                })
            }
        };

        match predicate.evaluate(value) {
            Ok(true) => {}
            Ok(false) => {
                return Err(AssertError::PredicateFailed {
                    address: record.address.clone(),
                    attribute: attribute.to_string(),
                    expected: predicate.to_string(),
                    actual: value.to_string(),
                })
            }
            Err(required) => {
                return Err(AssertError::TypeMismatch {
                    address: record.address.clone(),
                    attribute: attribute.to_string(),
                    expected: predicate.to_string(),
                    required,
                    actual: value.type_name(),
                })
            }
        }
    }
    Ok(())
}

/// Fail with `CountMismatch` unless exactly `expected` managed resources of
/// `resource_type` are planned.
pub fn assert_count(plan: &Plan, resource_type: &str, expected: usize) -> Result<(), AssertError> {
    let addresses: Vec<String> = plan
        .of_type(resource_type)
        .map(|c| c.address.clone())
        .collect();
    if addresses.len() != expected {
        return Err(AssertError::CountMismatch {
            resource_type: resource_type.to_string(),
            expected,
            actual: addresses.len(),
            addresses,
        });
    }
    Ok(())
}

/// Run assertions in declaration order, stopping at the first failure.
///
/// On failure returns the index of the failing assertion with its error.
pub fn check_all(plan: &Plan, assertions: &[Assertion]) -> Result<(), (usize, AssertError)> {
    for (i, assertion) in assertions.iter().enumerate() {
        assertion.check(plan).map_err(|e| (i, e))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "assertion_tests.rs"]
mod tests;
