//! Remediation path selection
//!
//! A pure function of the three risk-tier counts. Thresholds are checked in
//! severity order: a single HIGH migration outweighs any number of MEDIUM
//! ones, and so on down the tiers.

/// The remediation path to recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPath {
    /// Too many RunPython migrations use pytz; keeping it is the lowest risk
    Keep,
    /// Few enough HIGH migrations that a compatibility layer is feasible
    CompatOrKeep,
    /// Usage outside RunPython only; removal likely works but needs testing
    TestThenRemove,
    /// Only dead imports; removal is safe
    Remove,
    /// Nothing uses pytz at all
    SafeToRemove,
}

/// A selected path plus its human-readable explanation and action steps
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub path: MigrationPath,
    pub headline: &'static str,
    pub reasoning: Vec<String>,
    pub actions: Vec<&'static str>,
}

/// Choose a remediation path from the per-tier migration counts
///
/// Deterministic: same counts always give the same recommendation.
pub fn recommend(high: usize, medium: usize, low: usize) -> Recommendation {
    if high >= 4 {
        Recommendation {
            path: MigrationPath::Keep,
            headline: "Path C (Keep pytz)",
            reasoning: vec![
                format!("{} migrations have RunPython with pytz", high),
                "Creating compatibility layer would be complex".to_string(),
                "Keeping pytz is lowest risk approach".to_string(),
            ],
            actions: vec![
                "Keep pytz>=2024.1 in requirements.txt",
                "Mark the requirement as historical-migrations-only",
                "Update coding guidelines to use zoneinfo in new code",
                "Document the decision",
            ],
        }
    } else if high >= 1 {
        Recommendation {
            path: MigrationPath::CompatOrKeep,
            headline: "Path B (Compatibility Layer) or C (Keep pytz)",
            reasoning: vec![
                format!("{} migration(s) have RunPython with pytz", high),
                "Small enough to create compatibility layer".to_string(),
                "Or keep pytz if you prefer simplicity".to_string(),
            ],
            actions: vec![
                "Path B: create a zoneinfo wrapper module for migrations",
                "Path B: update affected migrations to use the wrapper",
                "Path B: test on a fresh database without pytz, then drop the requirement",
                "Path C: keep pytz>=2024.1 and document the decision",
            ],
        }
    } else if medium >= 1 {
        Recommendation {
            path: MigrationPath::TestThenRemove,
            headline: "Path A (Test removal) or C (Keep pytz)",
            reasoning: vec![
                format!("{} migration(s) use pytz outside RunPython", medium),
                "Likely safe to remove, but needs testing".to_string(),
                "No fresh database concerns".to_string(),
            ],
            actions: vec![
                "Remove pytz from requirements.txt",
                "Run migrations on fresh test database",
                "If successful, deploy to production",
                "If fails, add pytz back (Path C)",
            ],
        }
    } else if low >= 1 {
        Recommendation {
            path: MigrationPath::Remove,
            headline: "Path A (Remove pytz)",
            reasoning: vec![
                format!("{} migration(s) only IMPORT pytz (don't use it)", low),
                "Safe to remove pytz dependency".to_string(),
                "Clean solution with no risk".to_string(),
            ],
            actions: vec![
                "Remove pytz from requirements.txt",
                "Test in development environment",
                "Deploy to production",
            ],
        }
    } else {
        Recommendation {
            path: MigrationPath::SafeToRemove,
            headline: "Path A (Remove pytz)",
            reasoning: vec!["No migrations use pytz".to_string()],
            actions: vec![
                "Update requirements.txt to remove pytz",
                "Test in development environment",
                "Deploy and monitor",
            ],
        }
    }
}
