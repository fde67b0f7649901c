use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ReportError;

pub mod delta;
pub mod message;

pub use delta::compose_delta;
pub use message::{FAILURE_MARKER, SUCCESS_MARKER, compose_body};

/// Substring the toolchain prints for any failing package or test.
pub const FAIL_TOKEN: &str = "FAIL";
/// Start of the interesting part of a package summary line,
/// e.g. `ok  	pkg	0.2s	coverage: 80.0% of statements`.
pub const COVERAGE_TOKEN: &str = "coverage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Passed,
    Failed,
}

impl RunStatus {
    pub fn classify(text: &str) -> Self {
        if text.contains(FAIL_TOKEN) {
            RunStatus::Failed
        } else {
            RunStatus::Passed
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunStatus::Failed)
    }
}

/// The part of `line` from the first `coverage` on, if there is one.
pub fn coverage_suffix(line: &str) -> Option<&str> {
    line.find(COVERAGE_TOKEN).map(|idx| &line[idx..])
}

/// Package token to the last output line that mentioned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageCoverageSummary(BTreeMap<String, String>);

impl PackageCoverageSummary {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, package: &str, line: &str) {
        self.0.insert(package.to_string(), line.to_string());
    }

    pub fn get(&self, package: &str) -> Option<&str> {
        self.0.get(package).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<Vec<u8>, ReportError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, ReportError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl FromIterator<(String, String)> for PackageCoverageSummary {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
