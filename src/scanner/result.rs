//! Accumulated scan findings keyed by rule identifier

use crate::domain::{Category, Finding};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

/// Findings grouped by the rule that produced them
///
/// Keys keep insertion order (file-walk order within each rule), so reports
/// and JSON exports are stable for a fixed tree. Append-only during a scan.
#[derive(Debug, Default)]
pub struct ScanResult {
    entries: Vec<(String, Vec<Finding>)>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding under a rule identifier
    pub fn push(&mut self, rule_id: &str, finding: Finding) {
        if let Some((_, findings)) = self.entries.iter_mut().find(|(id, _)| id == rule_id) {
            findings.push(finding);
        } else {
            self.entries.push((rule_id.to_string(), vec![finding]));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Finding])> {
        self.entries
            .iter()
            .map(|(id, findings)| (id.as_str(), findings.as_slice()))
    }

    pub fn findings_for(&self, rule_id: &str) -> Option<&[Finding]> {
        self.entries
            .iter()
            .find(|(id, _)| id == rule_id)
            .map(|(_, findings)| findings.as_slice())
    }

    pub fn total_findings(&self) -> usize {
        self.entries.iter().map(|(_, findings)| findings.len()).sum()
    }

    pub fn count_by_category(&self, category: Category) -> usize {
        self.entries
            .iter()
            .flat_map(|(_, findings)| findings.iter())
            .filter(|f| f.category == category)
            .count()
    }

    /// Number of distinct files with at least one finding
    pub fn distinct_files(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|(_, findings)| findings.iter())
            .map(|f| f.file.as_path())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Serialize for ScanResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, findings) in &self.entries {
            map.serialize_entry(id, findings)?;
        }
        map.end()
    }
}
