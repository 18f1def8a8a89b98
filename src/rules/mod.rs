//! Static detection rule tables
//!
//! Each rule is an immutable record: identifier, regex pattern, target file
//! glob, severity/category, and an explanatory note. The bespoke checks
//! (pytz usage, USE_TZ, per-line field checks) live in the scanner itself;
//! the tables here cover the uniform whole-file pattern rules.

use crate::domain::{Category, Severity};
use once_cell::sync::Lazy;
use regex::Regex;

/// A named pattern + target glob + severity/category + note
pub struct Rule {
    pub id: &'static str,
    pub pattern: &'static str,
    pub glob: &'static str,
    pub severity: Severity,
    pub category: Category,
    pub note: &'static str,
}

/// APIs deprecated in Django 5.0, removal planned for 6.0
pub const DEPRECATED_RULES: &[Rule] = &[
    Rule {
        id: "deprecated_cx_Oracle",
        pattern: r"import cx_Oracle|from cx_Oracle",
        glob: "**/*.py",
        severity: Severity::Low,
        category: Category::P2,
        note: "Use oracledb 1.3.2+ instead",
    },
    Rule {
        id: "deprecated_DjangoDivFormRenderer",
        pattern: r"DjangoDivFormRenderer|Jinja2DivFormRenderer",
        glob: "**/*.py",
        severity: Severity::Low,
        category: Category::P2,
        note: "Transitional renderers deprecated",
    },
    Rule {
        id: "deprecated_format_html_no_args",
        pattern: r"format_html\(\s*\)",
        glob: "**/*.py",
        severity: Severity::Low,
        category: Category::P2,
        note: "format_html() requires args or kwargs",
    },
    Rule {
        id: "deprecated_Prefetch.get_current_queryset",
        pattern: r"get_current_queryset\(",
        glob: "**/*.py",
        severity: Severity::Low,
        category: Category::P2,
        note: "Method deprecated",
    },
];

/// APIs removed outright in Django 5.0
pub const REMOVED_RULES: &[Rule] = &[
    Rule {
        id: "removed_SERIALIZE_test_setting",
        pattern: r"SERIALIZE\s*=",
        glob: "**/settings*.py",
        severity: Severity::Critical,
        category: Category::P0,
        note: "SERIALIZE test setting removed",
    },
    Rule {
        id: "removed_django.utils.datetime_safe",
        pattern: r"from django\.utils import datetime_safe|import django\.utils\.datetime_safe",
        glob: "**/*.py",
        severity: Severity::Critical,
        category: Category::P0,
        note: "Module removed, use datetime instead",
    },
    Rule {
        id: "removed_BaseForm._html_output",
        pattern: r"\._html_output\(",
        glob: "**/*.py",
        severity: Severity::Critical,
        category: Category::P0,
        note: "Method removed",
    },
];

/// PostgreSQL aggregate functions whose `default` argument changed
pub const POSTGRES_AGGREGATES: &[&str] = &["ArrayAgg", "StringAgg", "JSONBAgg"];

pub static PYTZ_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"import pytz|from pytz").unwrap());

pub static MAKE_AWARE_IS_DST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"make_aware.*is_dst").unwrap());

pub static USE_TZ_FALSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"USE_TZ\s*=\s*False").unwrap());

pub static CREATE_DEFAULTS_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"create_defaults\s*=\s*models\.").unwrap());

pub static FORM_RENDERING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.as_table|\.as_p|\.as_ul").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_table_patterns_compile() {
        for rule in DEPRECATED_RULES.iter().chain(REMOVED_RULES.iter()) {
            assert!(
                Regex::new(rule.pattern).is_ok(),
                "pattern for {} does not compile",
                rule.id
            );
        }
    }

    #[test]
    fn test_categories_match_tables() {
        assert!(DEPRECATED_RULES.iter().all(|r| r.category == Category::P2));
        assert!(REMOVED_RULES.iter().all(|r| r.category == Category::P0));
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let mut ids: Vec<_> = DEPRECATED_RULES
            .iter()
            .chain(REMOVED_RULES.iter())
            .map(|r| r.id)
            .collect();
        ids.sort();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_removed_patterns_hit_expected_code() {
        let datetime_safe = REMOVED_RULES
            .iter()
            .find(|r| r.id == "removed_django.utils.datetime_safe")
            .unwrap();
        let re = Regex::new(datetime_safe.pattern).unwrap();
        assert!(re.is_match("from django.utils import datetime_safe"));
        assert!(re.is_match("import django.utils.datetime_safe"));
        assert!(!re.is_match("from django.utils import timezone"));
    }

    #[test]
    fn test_format_html_no_args_only_matches_empty_call() {
        let rule = DEPRECATED_RULES
            .iter()
            .find(|r| r.id == "deprecated_format_html_no_args")
            .unwrap();
        let re = Regex::new(rule.pattern).unwrap();
        assert!(re.is_match("return format_html()"));
        assert!(re.is_match("format_html(  )"));
        assert!(!re.is_match("format_html(\"<b>{}</b>\", name)"));
    }
}
