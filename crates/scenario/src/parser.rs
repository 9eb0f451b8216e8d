// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario file parsing (HCL, TOML, and JSON)

use crate::{Params, Scenario};
use indexmap::IndexMap;
use pc_core::{AddressError, Assertion, Predicate, ResourceAddress, Value};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scenario file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Hcl,
    Toml,
    Json,
}

impl Format {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "hcl" => Some(Format::Hcl),
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Errors that can occur during scenario parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("HCL parse error: {0}")]
    Hcl(#[from] hcl::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid format for {location}: {message}")]
    InvalidFormat { location: String, message: String },

    #[error("invalid resource address in {location}: {source}")]
    Address {
        location: String,
        #[source]
        source: AddressError,
    },

    #[error("invalid pattern in {location}: {source}")]
    Pattern {
        location: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ScenarioFile {
    #[serde(default, alias = "scenario")]
    scenarios: IndexMap<String, ScenarioDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioDef {
    #[serde(default)]
    description: Option<String>,
    module: PathBuf,
    #[serde(default)]
    vars: Params,
    #[serde(default, alias = "expect", deserialize_with = "deserialize_expectations")]
    expectations: Vec<ExpectDef>,
}

/// Raw `expect` block; exactly one assertion shape must be filled in.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExpectDef {
    #[serde(default)]
    name: String,
    #[serde(default)]
    exists: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    attribute: Option<String>,
    #[serde(default)]
    contains: Option<String>,
    #[serde(default)]
    starts_with: Option<String>,
    #[serde(default)]
    matches: Option<String>,
    #[serde(default)]
    equals: Option<Value>,
    #[serde(default)]
    not_null: Option<bool>,
    #[serde(default)]
    count_type: Option<String>,
    #[serde(default)]
    count: Option<usize>,
}

/// Deserialize expectations from either a sequence (TOML, JSON) or a map
/// (HCL labeled blocks).
///
/// - TOML `[[scenario.X.expect]]` produces a `Vec<ExpectDef>`
/// - HCL `expect "label" { }` produces an `IndexMap<String, ExpectDef>` (preserves declaration order)
fn deserialize_expectations<'de, D>(deserializer: D) -> Result<Vec<ExpectDef>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ExpectVisitor;

    impl<'de> Visitor<'de> for ExpectVisitor {
        type Value = Vec<ExpectDef>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a sequence of expectations or a map of labeled expect blocks")
        }

        fn visit_seq<S>(self, seq: S) -> Result<Vec<ExpectDef>, S::Error>
        where
            S: SeqAccess<'de>,
        {
            Vec::deserialize(de::value::SeqAccessDeserializer::new(seq))
        }

        fn visit_map<M>(self, map: M) -> Result<Vec<ExpectDef>, M::Error>
        where
            M: MapAccess<'de>,
        {
            let index_map: IndexMap<String, ExpectDef> =
                IndexMap::deserialize(de::value::MapAccessDeserializer::new(map))?;
            Ok(index_map
                .into_iter()
                .map(|(key, mut expect)| {
                    if expect.name.is_empty() {
                        expect.name = key;
                    }
                    expect
                })
                .collect())
        }
    }

    deserializer.deserialize_any(ExpectVisitor)
}

impl ExpectDef {
    fn into_assertion(self, location: &str) -> Result<Assertion, ParseError> {
        let invalid = |message: &str| ParseError::InvalidFormat {
            location: location.to_string(),
            message: message.to_string(),
        };
        let parse_address = |raw: &str| {
            ResourceAddress::parse(raw).map_err(|source| ParseError::Address {
                location: location.to_string(),
                source,
            })
        };

        let has_attribute_fields = self.address.is_some() || self.attribute.is_some();
        let has_count_fields = self.count_type.is_some() || self.count.is_some();

        if let Some(raw) = &self.exists {
            if has_attribute_fields || has_count_fields || self.has_predicate() {
                return Err(invalid("`exists` cannot be combined with other checks"));
            }
            return Ok(Assertion::exists(parse_address(raw)?));
        }

        if has_count_fields {
            if has_attribute_fields || self.has_predicate() {
                return Err(invalid("`count_type` cannot be combined with other checks"));
            }
            return match (self.count_type, self.count) {
                (Some(resource_type), Some(expected)) => {
                    Ok(Assertion::count(resource_type, expected))
                }
                _ => Err(invalid("`count_type` and `count` must be set together")),
            };
        }

        let (Some(raw), Some(attribute)) = (&self.address, &self.attribute) else {
            return Err(invalid(
                "expected `exists`, `address` + `attribute` + a predicate, or `count_type` + `count`",
            ));
        };
        let address = parse_address(raw)?;

        let mut predicates = Vec::new();
        if let Some(text) = &self.contains {
            predicates.push(Predicate::contains(text.as_str()));
        }
        if let Some(text) = &self.starts_with {
            predicates.push(Predicate::starts_with(text.as_str()));
        }
        if let Some(source) = &self.matches {
            predicates.push(Predicate::matches(source).map_err(|source| {
                ParseError::Pattern {
                    location: location.to_string(),
                    source,
                }
            })?);
        }
        if let Some(value) = &self.equals {
            predicates.push(Predicate::Equals(value.clone()));
        }
        match self.not_null {
            Some(true) => predicates.push(Predicate::NotNull),
            Some(false) => return Err(invalid("`not_null` only accepts true")),
            None => {}
        }

        match predicates.len() {
            1 => Ok(Assertion::attribute(
                address,
                attribute.as_str(),
                predicates.remove(0),
            )),
            0 => Err(invalid(
                "attribute check needs one of contains, starts_with, matches, equals, not_null",
            )),
            _ => Err(invalid("attribute check takes exactly one predicate")),
        }
    }

    fn has_predicate(&self) -> bool {
        self.contains.is_some()
            || self.starts_with.is_some()
            || self.matches.is_some()
            || self.equals.is_some()
            || self.not_null.is_some()
    }
}

/// Parse HCL scenarios; relative module paths resolve against `base_dir`.
pub fn parse_scenarios(content: &str, base_dir: &Path) -> Result<Vec<Scenario>, ParseError> {
    parse_scenarios_with_format(content, Format::Hcl, base_dir)
}

/// Parse scenarios from the given content in the specified format.
///
/// Scenarios come back in declaration order.
pub fn parse_scenarios_with_format(
    content: &str,
    format: Format,
    base_dir: &Path,
) -> Result<Vec<Scenario>, ParseError> {
    // 1. Serde does the heavy lifting
    let file: ScenarioFile = match format {
        Format::Hcl => hcl::from_str(content)?,
        Format::Toml => toml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };

    let mut scenarios = Vec::with_capacity(file.scenarios.len());
    for (name, def) in file.scenarios {
        // 2. Validation: module path and at least one expectation
        if def.module.as_os_str().is_empty() {
            return Err(ParseError::InvalidFormat {
                location: format!("scenario.{}.module", name),
                message: "module path must not be empty".to_string(),
            });
        }
        if def.expectations.is_empty() {
            return Err(ParseError::InvalidFormat {
                location: format!("scenario.{}", name),
                message: "at least one expect block is required".to_string(),
            });
        }

        // 3. Name fixup and module path resolution
        let module_dir = if def.module.is_absolute() {
            def.module
        } else {
            base_dir.join(def.module)
        };
        let mut scenario = Scenario::new(name.as_str(), module_dir).with_params(def.vars);
        if let Some(description) = def.description {
            scenario = scenario.with_description(description);
        }

        // 4. Assertions, in declaration order
        for (i, expect) in def.expectations.into_iter().enumerate() {
            let location = if expect.name.is_empty() {
                format!("scenario.{}.expect[{}]", name, i)
            } else {
                format!("scenario.{}.expect[{}]({})", name, i, expect.name)
            };
            scenario = scenario.expect(expect.into_assertion(&location)?);
        }

        scenarios.push(scenario);
    }

    Ok(scenarios)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
