use crate::record::Record;
use crate::JoinError;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A skipped line that had no tab between label and features
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinWarning {
    pub source: String,
    pub line: usize,
    /// Current document when the line was seen, `None` before any header
    pub key: Option<String>,
}

/// Line counts for one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputSummary {
    pub name: String,
    pub lines: usize,
    pub headers: usize,
    pub directives: usize,
    pub feature_lines: usize,
    pub malformed_lines: usize,
}

impl InputSummary {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn count(&mut self, record: &Record<'_>) {
        self.lines += 1;
        match record {
            Record::Header(_) => self.headers += 1,
            Record::Directive => self.directives += 1,
            Record::Features { .. } => self.feature_lines += 1,
            Record::Malformed => self.malformed_lines += 1,
        }
    }
}

/// Counters for a whole join run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinSummary {
    pub inputs: Vec<InputSummary>,
    /// Distinct documents that received features
    pub documents_joined: usize,
    pub documents_written: usize,
    /// Documents dropped by the common-only filter
    pub documents_filtered: usize,
    pub warnings: Vec<JoinWarning>,
}

impl JoinSummary {
    pub fn to_json(&self) -> Result<String, JoinError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), JoinError> {
        let json = self.to_json()?;
        fs::write(path, json + "\n").map_err(|e| JoinError::Output(path.display().to_string(), e))
    }
}
