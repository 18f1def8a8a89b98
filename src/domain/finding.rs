//! Finding model - one recorded rule match in a scanned file

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity levels for findings, assigned at rule-definition time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "critical" | "crit" => Some(Severity::Critical),
            "medium" | "med" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Priority buckets used for report grouping and recommendation thresholds
///
/// Every rule carries exactly one category:
/// - P0: must fix before upgrading (will break)
/// - P1: should fix (may break depending on usage)
/// - P2: deprecated only, removal planned for the next major release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    P0,
    P1,
    P2,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::P0 => "P0",
            Category::P1 => "P1",
            Category::P2 => "P2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "P0" => Some(Category::P0),
            "P1" => Some(Category::P1),
            "P2" => Some(Category::P2),
            _ => None,
        }
    }
}

/// One recorded rule match at a specific file (and optionally line)
///
/// Paths are stored relative to the scan root so reports and JSON exports
/// stay stable regardless of where the scanner was invoked from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// File where the match occurred, relative to the scan root
    pub file: PathBuf,

    /// 1-indexed line number for per-line matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// The matched line, trimmed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub severity: Severity,
    pub category: Category,

    /// Explanatory note from the rule that produced this finding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Finding {
    pub fn new(file: impl Into<PathBuf>, severity: Severity, category: Category) -> Self {
        Self {
            file: file.into(),
            line: None,
            code: None,
            severity,
            category,
            note: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
