//! Integration tests for the breaking-change scanner

mod common;

use common::{create_clean_project, write_file};

use upshift::domain::{Category, Severity};
use upshift::export;
use upshift::scanner::BreakingChangeScanner;

#[test]
fn test_clean_project_has_no_findings() {
    let project = create_clean_project();

    let result = BreakingChangeScanner::new(project.path())
        .scan_all()
        .expect("scan failed");

    assert!(result.is_empty());
    assert_eq!(result.total_findings(), 0);
}

#[test]
fn test_full_scan_over_problematic_project() {
    let project = create_clean_project();
    let root = project.path();

    write_file(
        root,
        "app/tasks.py",
        "import pytz\n\ndef stamp(dt):\n    return make_aware(dt, pytz.utc, is_dst=True)\n",
    );
    write_file(
        root,
        "project/settings_production.py",
        "USE_TZ = False\nSERIALIZE = False\n",
    );
    write_file(
        root,
        "app/templates/registration/login.html",
        "<form>{{ form.as_table }}</form>\n",
    );
    write_file(
        root,
        "app/templates/admin/base_site.html",
        "<h1>Admin</h1>\n",
    );
    write_file(
        root,
        "reports/models.py",
        "import uuid\nfrom django.db import models\n\nclass Report(models.Model):\n    uid = models.UUIDField(default=uuid.uuid4)\n",
    );
    write_file(root, "legacy/oracle.py", "import cx_Oracle\n");

    let result = BreakingChangeScanner::new(root).scan_all().expect("scan failed");

    // P0: pytz import, is_dst line, make_aware combination, USE_TZ=False,
    // removed SERIALIZE setting
    assert_eq!(result.findings_for("pytz_import").unwrap().len(), 1);
    assert_eq!(result.findings_for("is_dst_param").unwrap().len(), 1);
    assert_eq!(result.findings_for("make_aware_is_dst").unwrap().len(), 1);
    assert_eq!(result.findings_for("use_tz_false").unwrap().len(), 1);
    assert_eq!(
        result
            .findings_for("removed_SERIALIZE_test_setting")
            .unwrap()
            .len(),
        1
    );

    // P1: form rendering, admin template, UUID field
    assert_eq!(result.findings_for("form_rendering").unwrap().len(), 1);
    assert_eq!(result.findings_for("admin_templates").unwrap().len(), 1);
    assert_eq!(result.findings_for("uuid_field").unwrap().len(), 1);

    // P2: cx_Oracle import
    assert_eq!(
        result.findings_for("deprecated_cx_Oracle").unwrap().len(),
        1
    );

    assert_eq!(result.count_by_category(Category::P0), 5);
    assert_eq!(result.count_by_category(Category::P1), 3);
    assert_eq!(result.count_by_category(Category::P2), 1);
}

#[test]
fn test_line_numbers_match_file_positions() {
    let project = create_clean_project();
    let root = project.path();

    write_file(
        root,
        "app/time_util.py",
        "from django.utils.timezone import make_aware\n\n\ndef at(dt, tz):\n    return make_aware(dt, tz, is_dst=False)\n",
    );

    let result = BreakingChangeScanner::new(root).scan_all().expect("scan failed");
    let findings = result.findings_for("is_dst_param").unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, Some(5));
    assert_eq!(
        findings[0].code.as_deref(),
        Some("return make_aware(dt, tz, is_dst=False)")
    );
}

#[test]
fn test_excluded_directories_are_invisible() {
    let project = create_clean_project();
    let root = project.path();

    // Same offending content inside and outside noise directories
    write_file(root, "venv/lib/site.py", "import pytz\n");
    write_file(root, ".venv/lib/site.py", "import pytz\n");
    write_file(root, "app/__pycache__/cached.py", "import pytz\n");
    write_file(root, "app/real.py", "import pytz\n");

    let result = BreakingChangeScanner::new(root).scan_all().expect("scan failed");
    let findings = result.findings_for("pytz_import").unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].file.to_str(), Some("app/real.py"));
}

#[test]
fn test_config_excludes_extend_the_walk() {
    let project = create_clean_project();
    let root = project.path();

    write_file(root, "third_party/pkg/models.py", "import pytz\n");
    write_file(root, "app/real.py", "import pytz\n");

    let result =
        BreakingChangeScanner::with_excludes(root, &["third_party".to_string()])
            .scan_all()
            .expect("scan failed");
    let findings = result.findings_for("pytz_import").unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].file.to_str(), Some("app/real.py"));
}

#[test]
fn test_use_tz_branches_never_overlap() {
    let project = create_clean_project();
    let root = project.path();

    write_file(root, "conf/settings_false.py", "USE_TZ = False\n");
    write_file(root, "conf/settings_absent.py", "DEBUG = True\n");

    let result = BreakingChangeScanner::new(root).scan_all().expect("scan failed");

    let false_files: Vec<_> = result
        .findings_for("use_tz_false")
        .unwrap()
        .iter()
        .map(|f| f.file.clone())
        .collect();
    let missing_files: Vec<_> = result
        .findings_for("use_tz_missing")
        .unwrap()
        .iter()
        .map(|f| f.file.clone())
        .collect();

    for file in &false_files {
        assert!(!missing_files.contains(file), "{:?} reported twice", file);
    }

    let false_finding = &result.findings_for("use_tz_false").unwrap()[0];
    assert_eq!(false_finding.severity, Severity::Critical);
    let missing_finding = &result.findings_for("use_tz_missing").unwrap()[0];
    assert_eq!(missing_finding.severity, Severity::Medium);
}

#[test]
fn test_json_export_counts_match_in_memory_result() {
    let project = create_clean_project();
    let root = project.path();

    write_file(root, "app/a.py", "import pytz\n");
    write_file(root, "app/b.py", "dt = tz.localize(dt, is_dst=True)\n");
    write_file(
        root,
        "app/models.py",
        "from django.db import models\n\nclass T(models.Model):\n    uid = models.UUIDField()\n",
    );

    let result = BreakingChangeScanner::new(root).scan_all().expect("scan failed");

    let out_dir = tempfile::TempDir::new().unwrap();
    let output = out_dir.path().join("breaking_changes_scan.json");
    export::export_breaking(&result, root, &output).expect("export failed");

    let raw = std::fs::read_to_string(&output).expect("export file readable");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

    assert_eq!(
        parsed["summary"]["total_issues"].as_u64().unwrap() as usize,
        result.total_findings()
    );
    assert_eq!(
        parsed["summary"]["p0_critical"].as_u64().unwrap() as usize,
        result.count_by_category(Category::P0)
    );
    assert_eq!(
        parsed["summary"]["p1_important"].as_u64().unwrap() as usize,
        result.count_by_category(Category::P1)
    );
    assert_eq!(
        parsed["summary"]["p2_deprecated"].as_u64().unwrap() as usize,
        result.count_by_category(Category::P2)
    );

    // Per-rule lists survive the round trip
    assert_eq!(
        parsed["issues"]["pytz_import"].as_array().unwrap().len(),
        result.findings_for("pytz_import").unwrap().len()
    );
    assert!(parsed["scan_date"].is_string());
}

#[test]
fn test_rescan_is_deterministic() {
    let project = create_clean_project();
    let root = project.path();

    write_file(root, "app/a.py", "import pytz\n");
    write_file(root, "app/b.py", "import pytz\n");

    let scanner = BreakingChangeScanner::new(root);
    let first = scanner.scan_all().expect("scan failed");
    let second = scanner.scan_all().expect("scan failed");

    let first_files: Vec<_> = first
        .findings_for("pytz_import")
        .unwrap()
        .iter()
        .map(|f| f.file.clone())
        .collect();
    let second_files: Vec<_> = second
        .findings_for("pytz_import")
        .unwrap()
        .iter()
        .map(|f| f.file.clone())
        .collect();

    assert_eq!(first_files, second_files);
}
