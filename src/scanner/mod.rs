//! Breaking-change scanner for Django 5.0 upgrades
//!
//! Runs nine independent sub-scans over the project tree, each appending
//! findings under its own rule identifier. Sub-scans are sequential; each
//! file is read fully, matched, and dropped before the next.

pub mod matcher;
mod result;

pub use result::ScanResult;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::{Category, Finding, Severity};
use crate::rules::{
    CREATE_DEFAULTS_FIELD_RE, DEPRECATED_RULES, FORM_RENDERING_RE, MAKE_AWARE_IS_DST_RE,
    POSTGRES_AGGREGATES, PYTZ_IMPORT_RE, REMOVED_RULES, Rule, USE_TZ_FALSE_RE,
};
use crate::walker::FileWalker;

/// Scans a project tree for Django 5.0 breaking changes
pub struct BreakingChangeScanner {
    walker: FileWalker,
}

impl BreakingChangeScanner {
    /// Create a scanner for the given project root (default excludes)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_excludes(root, &[])
    }

    /// Create a scanner with additional excluded directory names
    pub fn with_excludes(root: impl Into<PathBuf>, excludes: &[String]) -> Self {
        Self {
            walker: FileWalker::with_excludes(root, excludes),
        }
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    /// Run all sub-scans and return the accumulated findings
    pub fn scan_all(&self) -> Result<ScanResult> {
        let mut result = ScanResult::new();

        self.scan_pytz_usage(&mut result)?;
        self.scan_postgres_aggregates(&mut result)?;
        self.scan_use_tz_setting(&mut result)?;
        self.scan_update_or_create(&mut result)?;
        self.scan_form_rendering(&mut result)?;
        self.scan_uuid_fields(&mut result)?;
        self.scan_deprecated_features(&mut result)?;
        self.scan_admin_templates(&mut result)?;
        self.scan_removed_features(&mut result)?;

        Ok(result)
    }

    /// pytz imports and is_dst usage in source files (migrations have their
    /// own dedicated scan and are pruned here)
    fn scan_pytz_usage(&self, result: &mut ScanResult) -> Result<()> {
        debug!("Scanning for pytz usage...");

        for path in self
            .walker
            .files_matching_excluding("**/*.py", &["migrations"])?
        {
            let Some(content) = matcher::read_file(&path) else {
                continue;
            };
            let relative = self.walker.relativize(&path);

            if matcher::content_matches(&PYTZ_IMPORT_RE, &content) {
                result.push(
                    "pytz_import",
                    Finding::new(relative, Severity::Critical, Category::P0),
                );
            }

            for (line, code) in matcher::lines_containing("is_dst", &content) {
                result.push(
                    "is_dst_param",
                    Finding::new(relative, Severity::Critical, Category::P0)
                        .with_line(line)
                        .with_code(code.trim()),
                );
            }

            if matcher::content_matches(&MAKE_AWARE_IS_DST_RE, &content) {
                result.push(
                    "make_aware_is_dst",
                    Finding::new(relative, Severity::Critical, Category::P0),
                );
            }
        }

        Ok(())
    }

    /// PostgreSQL aggregates whose default-value behavior changed
    fn scan_postgres_aggregates(&self, result: &mut ScanResult) -> Result<()> {
        debug!("Scanning for PostgreSQL aggregates...");

        for path in self.walker.files_matching("**/*.py")? {
            let Some(content) = matcher::read_file(&path) else {
                continue;
            };
            let relative = self.walker.relativize(&path);

            for agg in POSTGRES_AGGREGATES {
                for (line, code) in matcher::lines_containing(agg, &content) {
                    // Import lines just bring the name into scope
                    if code.to_lowercase().contains("import") {
                        continue;
                    }
                    result.push(
                        &format!("{}_usage", agg),
                        Finding::new(relative, Severity::Medium, Category::P1)
                            .with_line(line)
                            .with_code(code.trim()),
                    );
                }
            }
        }

        Ok(())
    }

    /// USE_TZ now defaults to True; explicit False keeps working but absence
    /// silently changes behavior
    fn scan_use_tz_setting(&self, result: &mut ScanResult) -> Result<()> {
        debug!("Checking USE_TZ setting...");

        for path in self.walker.files_matching("**/settings*.py")? {
            let Some(content) = matcher::read_file(&path) else {
                continue;
            };
            let relative = self.walker.relativize(&path);

            // Mutually exclusive per file: explicitly disabled, or absent
            if matcher::content_matches(&USE_TZ_FALSE_RE, &content) {
                result.push(
                    "use_tz_false",
                    Finding::new(relative, Severity::Critical, Category::P0)
                        .with_note("USE_TZ=True is now the default"),
                );
            } else if !content.contains("USE_TZ") {
                result.push(
                    "use_tz_missing",
                    Finding::new(relative, Severity::Medium, Category::P1)
                        .with_note("USE_TZ will default to True in Django 5.0"),
                );
            }
        }

        Ok(())
    }

    /// Model fields named create_defaults collide with the new
    /// update_or_create() argument
    fn scan_update_or_create(&self, result: &mut ScanResult) -> Result<()> {
        debug!("Scanning for update_or_create usage...");

        for path in self.walker.files_matching("**/models.py")? {
            let Some(content) = matcher::read_file(&path) else {
                continue;
            };
            let relative = self.walker.relativize(&path);

            for (line, code) in matcher::matching_lines(&CREATE_DEFAULTS_FIELD_RE, &content) {
                result.push(
                    "create_defaults_field",
                    Finding::new(relative, Severity::Medium, Category::P1)
                        .with_line(line)
                        .with_code(code.trim())
                        .with_note("Must use create_defaults__exact in update_or_create()"),
                );
            }
        }

        Ok(())
    }

    /// Template calls to the table/p/ul form renderers
    fn scan_form_rendering(&self, result: &mut ScanResult) -> Result<()> {
        debug!("Scanning for form rendering...");

        for path in self.walker.files_matching("**/*.html")? {
            let Some(content) = matcher::read_file(&path) else {
                continue;
            };
            let relative = self.walker.relativize(&path);

            for (line, _) in matcher::matching_lines(&FORM_RENDERING_RE, &content) {
                result.push(
                    "form_rendering",
                    Finding::new(relative, Severity::Medium, Category::P1)
                        .with_line(line)
                        .with_note("Default rendering changed to div-based"),
                );
            }
        }

        Ok(())
    }

    /// UUIDField columns change type on MariaDB 10.7+
    fn scan_uuid_fields(&self, result: &mut ScanResult) -> Result<()> {
        debug!("Scanning for UUIDField usage...");

        for path in self.walker.files_matching("**/models.py")? {
            let Some(content) = matcher::read_file(&path) else {
                continue;
            };
            let relative = self.walker.relativize(&path);

            for (line, code) in matcher::lines_containing("UUIDField", &content) {
                if code.contains("import") {
                    continue;
                }
                result.push(
                    "uuid_field",
                    Finding::new(relative, Severity::Medium, Category::P1)
                        .with_line(line)
                        .with_code(code.trim())
                        .with_note("MariaDB 10.7+ uses UUID column type (breaking change)"),
                );
            }
        }

        Ok(())
    }

    fn scan_deprecated_features(&self, result: &mut ScanResult) -> Result<()> {
        debug!("Scanning for deprecated features...");
        self.scan_rule_table(DEPRECATED_RULES, result)
    }

    /// Custom admin templates need a manual review against the new markup
    fn scan_admin_templates(&self, result: &mut ScanResult) -> Result<()> {
        debug!("Scanning for admin templates...");

        for path in self.walker.files_matching("**/templates/admin/**/*.html")? {
            let relative = self.walker.relativize(&path);
            result.push(
                "admin_templates",
                Finding::new(relative, Severity::Medium, Category::P1)
                    .with_note("Review for HTML structure changes (h1 to div, div to main/header)"),
            );
        }

        Ok(())
    }

    fn scan_removed_features(&self, result: &mut ScanResult) -> Result<()> {
        debug!("Scanning for removed features...");
        self.scan_rule_table(REMOVED_RULES, result)
    }

    /// Whole-file containment rules from a static table
    fn scan_rule_table(&self, rules: &[Rule], result: &mut ScanResult) -> Result<()> {
        for rule in rules {
            let re = regex::Regex::new(rule.pattern).expect("rule table patterns compile");

            for path in self.walker.files_matching(rule.glob)? {
                let Some(content) = matcher::read_file(&path) else {
                    continue;
                };

                if matcher::content_matches(&re, &content) {
                    let relative = self.walker.relativize(&path);
                    result.push(
                        rule.id,
                        Finding::new(relative, rule.severity, rule.category).with_note(rule.note),
                    );
                }
            }
        }

        Ok(())
    }
}
