// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario file discovery

use crate::parser::{Format, ParseError};
use crate::{parse_scenarios_with_format, Scenario};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from scenario directory scanning
#[derive(Debug, Error)]
pub enum FindError {
    #[error("scenario '{name}' defined in both {} and {}", first.display(), second.display())]
    Duplicate {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("scenario directory {} does not exist", .0.display())]
    MissingDir(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Recursively collect scenario files (`.hcl`, `.toml`, `.json`) under `dir`,
/// sorted by path.
pub fn find_scenario_files(dir: &Path) -> Result<Vec<(PathBuf, Format)>, FindError> {
    if !dir.is_dir() {
        return Err(FindError::MissingDir(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        let entries = std::fs::read_dir(&current).map_err(|source| FindError::Read {
            path: current.clone(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| FindError::Read {
                path: current.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if let Some(format) = Format::from_path(&path) {
                files.push((path, format));
            }
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Load every scenario under `dir`.
///
/// Files are read in path order and scenarios keep their declaration order
/// within a file. Module paths resolve against the declaring file's
/// directory. A file that fails to parse fails the whole load, and so does a
/// scenario name declared twice.
pub fn load_scenarios(dir: &Path) -> Result<Vec<Scenario>, FindError> {
    let files = find_scenario_files(dir)?;
    let mut scenarios = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for (path, format) in files {
        let content = std::fs::read_to_string(&path).map_err(|source| FindError::Read {
            path: path.clone(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or(dir);
        let parsed = parse_scenarios_with_format(&content, format, base_dir).map_err(|source| {
            FindError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), count = parsed.len(), "loaded scenarios");

        for scenario in parsed {
            let name = scenario.name.as_str().to_string();
            if let Some(first) = seen.get(&name) {
                return Err(FindError::Duplicate {
                    name,
                    first: first.clone(),
                    second: path,
                });
            }
            seen.insert(name, path.clone());
            scenarios.push(scenario);
        }
    }
    Ok(scenarios)
}

/// Load the scenarios under `dir` and return the one called `name`.
pub fn find_scenario(dir: &Path, name: &str) -> Result<Option<Scenario>, FindError> {
    Ok(load_scenarios(dir)?
        .into_iter()
        .find(|s| s.name.as_str() == name))
}

#[cfg(test)]
#[path = "find_tests.rs"]
mod tests;
