//! JSON export for scan results
//!
//! Each scanner writes a fixed-name file in the current working directory,
//! overwriting any previous export. Summary counts are computed from the
//! in-memory results, so they always agree with the printed report.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::domain::{Category, RiskLevel};
use crate::migration::{MigrationAnalysis, MigrationScan};
use crate::scanner::ScanResult;

/// Default output file for the breaking-change scan
pub const BREAKING_EXPORT_FILE: &str = "breaking_changes_scan.json";

/// Default output file for the migration analysis
pub const MIGRATION_EXPORT_FILE: &str = "pytz_analysis.json";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BreakingSummary {
    pub total_issues: usize,
    pub p0_critical: usize,
    pub p1_important: usize,
    pub p2_deprecated: usize,
}

#[derive(Serialize)]
struct BreakingExport<'a> {
    scan_date: String,
    project_root: String,
    summary: BreakingSummary,
    issues: &'a ScanResult,
}

#[derive(Serialize)]
struct MigrationExport<'a> {
    total_migrations: usize,
    high_risk: usize,
    medium_risk: usize,
    low_risk: usize,
    migrations: &'a [MigrationAnalysis],
}

/// Summary counts for the breaking-change export
pub fn breaking_summary(result: &ScanResult) -> BreakingSummary {
    BreakingSummary {
        total_issues: result.total_findings(),
        p0_critical: result.count_by_category(Category::P0),
        p1_important: result.count_by_category(Category::P1),
        p2_deprecated: result.count_by_category(Category::P2),
    }
}

/// Write the breaking-change scan result to `output`
pub fn export_breaking(result: &ScanResult, root: &Path, output: &Path) -> Result<()> {
    let export = BreakingExport {
        scan_date: chrono::Local::now().to_rfc3339(),
        project_root: root
            .canonicalize()
            .unwrap_or_else(|_| root.to_path_buf())
            .display()
            .to_string(),
        summary: breaking_summary(result),
        issues: result,
    };

    write_json(&export, output)
}

/// Write the migration analysis to `output`
pub fn export_migrations(scan: &MigrationScan, output: &Path) -> Result<()> {
    let export = MigrationExport {
        total_migrations: scan.results.len(),
        high_risk: scan.count_at(RiskLevel::High),
        medium_risk: scan.count_at(RiskLevel::Medium),
        low_risk: scan.count_at(RiskLevel::Low),
        migrations: &scan.results,
    };

    write_json(&export, output)
}

fn write_json<T: Serialize>(value: &T, output: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}
