//! Migration analysis for pytz dependencies
//!
//! Classifies every migration file that imports pytz into a risk tier:
//! HIGH when a RunPython function body uses pytz (fails on a fresh database
//! without the package), MEDIUM when pytz is used anywhere else, LOW when
//! the import is dead.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::RiskLevel;
use crate::rules::PYTZ_IMPORT_RE;
use crate::scanner::matcher;
use crate::walker::FileWalker;

/// pytz attribute accesses and calls, e.g. `pytz.utc`, `pytz.timezone('UTC')`
static PYTZ_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pytz\.\w+(?:\([^)]*\))?").unwrap());

/// Header of a data-migration function, as RunPython expects it
static RUN_PYTHON_DEF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"def (\w+)\(apps, schema_editor\):").unwrap());

/// A RunPython function that uses pytz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPythonUsage {
    pub name: String,
    /// Up to the first 3 non-blank lines mentioning pytz, trimmed
    pub usage: Vec<String>,
}

/// Analysis record for one migration file that imports pytz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationAnalysis {
    /// Path relative to the project root
    pub file: PathBuf,
    pub has_import: bool,
    pub has_run_python: bool,
    pub in_run_python: bool,
    /// Every pytz usage found in the file, for reporting
    pub pytz_calls: Vec<String>,
    pub run_python_functions: Vec<RunPythonUsage>,
    pub risk: RiskLevel,
    pub line_count: usize,
}

/// Outcome of a full project scan
#[derive(Debug)]
pub struct MigrationScan {
    /// Migration files examined (excluding package `__init__.py` stubs)
    pub files_scanned: usize,
    /// Records for the files that import pytz, in walk order
    pub results: Vec<MigrationAnalysis>,
}

impl MigrationScan {
    pub fn count_at(&self, risk: RiskLevel) -> usize {
        self.results.iter().filter(|r| r.risk == risk).count()
    }
}

/// Analyzes Django migrations for pytz dependencies
pub struct MigrationAnalyzer {
    walker: FileWalker,
}

impl MigrationAnalyzer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_excludes(root, &[])
    }

    pub fn with_excludes(root: impl Into<PathBuf>, excludes: &[String]) -> Self {
        Self {
            walker: FileWalker::with_excludes(root, excludes),
        }
    }

    /// Scan every migration file under the project root
    pub fn scan_project(&self) -> Result<MigrationScan> {
        let mut files_scanned = 0;
        let mut results = Vec::new();

        for path in self.walker.files_matching("**/migrations/*.py")? {
            if path.file_name().is_some_and(|n| n == "__init__.py") {
                continue;
            }
            files_scanned += 1;

            let Some(content) = matcher::read_file(&path) else {
                continue;
            };

            let relative = self.walker.relativize(&path);
            if let Some(analysis) = analyze_content(relative, &content) {
                debug!(
                    "{}: {} risk",
                    analysis.file.display(),
                    analysis.risk.as_str()
                );
                results.push(analysis);
            }
        }

        Ok(MigrationScan {
            files_scanned,
            results,
        })
    }
}

/// Analyze one migration file's content
///
/// Returns `None` when the file does not import pytz at all.
pub fn analyze_content(relative: &Path, content: &str) -> Option<MigrationAnalysis> {
    if !PYTZ_IMPORT_RE.is_match(content) {
        return None;
    }

    let has_run_python = content.contains("RunPython");
    let pytz_calls: Vec<String> = PYTZ_CALL_RE
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect();

    let mut in_run_python = false;
    let mut run_python_functions = Vec::new();

    if has_run_python {
        for (name, body) in extract_run_python_functions(content) {
            if body.iter().any(|line| line.contains("pytz")) {
                in_run_python = true;
                let usage: Vec<String> = body
                    .iter()
                    .filter(|line| line.contains("pytz") && !line.trim().is_empty())
                    .map(|line| line.trim().to_string())
                    .take(3)
                    .collect();
                run_python_functions.push(RunPythonUsage { name, usage });
            }
        }
    }

    let risk = if in_run_python {
        RiskLevel::High
    } else if !pytz_calls.is_empty() {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    Some(MigrationAnalysis {
        file: relative.to_path_buf(),
        has_import: true,
        has_run_python,
        in_run_python,
        pytz_calls,
        run_python_functions,
        risk,
        line_count: content.split('\n').count(),
    })
}

/// Extract `(name, body lines)` for every function with the RunPython
/// two-argument signature.
///
/// Line-scanning equivalent of a non-greedy match bounded by the next
/// top-level `def`/`class`: a body runs until a column-0 `def ` or `class `
/// line or end of file. Nested functions are not tracked, so their lines
/// belong to the enclosing capture; indented headers with the signature
/// still open a capture of their own when nothing is being captured. This
/// is a heuristic, not a parser, and that mis-attribution is accepted.
fn extract_run_python_functions(content: &str) -> Vec<(String, Vec<String>)> {
    let mut functions: Vec<(String, Vec<String>)> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in content.split('\n') {
        let top_level_boundary = line.starts_with("def ") || line.starts_with("class ");

        if current.is_some() && top_level_boundary {
            functions.push(current.take().unwrap());
        }

        match &mut current {
            Some((_, body)) => body.push(line.to_string()),
            None => {
                if let Some(caps) = RUN_PYTHON_DEF_RE.captures(line) {
                    let name = caps.get(1).unwrap().as_str().to_string();
                    // Whatever follows the colon on the header line counts
                    // as body text (one-line function bodies)
                    let header_rest = &line[caps.get(0).unwrap().end()..];
                    current = Some((name, vec![header_rest.to_string()]));
                }
            }
        }
    }

    if let Some(open) = current {
        functions.push(open);
    }

    functions
}
