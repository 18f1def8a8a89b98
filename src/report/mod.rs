//! Console report rendering
//!
//! Findings grouped by tier, summary counts, and the recommended next
//! steps. All output goes to stdout; a clean scan is a success state with
//! its own report, never an error.

mod recommend;

pub use recommend::{MigrationPath, Recommendation, recommend};

use crate::domain::{Category, Finding, RiskLevel};
use crate::migration::MigrationScan;
use crate::scanner::ScanResult;

const BAR: &str = "======================================================================";

/// Print the full breaking-change scan report
pub fn print_breaking_report(result: &ScanResult) {
    println!("\n{}", BAR);
    println!("DJANGO 5.0 BREAKING CHANGES SCAN RESULTS");
    println!("{}\n", BAR);

    if result.is_empty() {
        println!("No breaking changes detected!");
        println!("\nYour codebase appears to be compatible with Django 5.0.\n");
        println!("Recommended next steps:");
        println!("1. Create Django 5.0 development environment");
        println!("2. Run full test suite");
        println!("3. Manual testing of critical features");
        return;
    }

    let p0 = rules_in_category(result, Category::P0);
    let p1 = rules_in_category(result, Category::P1);
    let p2 = rules_in_category(result, Category::P2);

    if !p0.is_empty() {
        println!("CRITICAL ISSUES (P0 - Must Fix Before Upgrade)\n");
        print_issue_group(&p0, true);
    }

    if !p1.is_empty() {
        println!("\nIMPORTANT CHANGES (P1 - Should Fix)\n");
        print_issue_group(&p1, false);
    }

    if !p2.is_empty() {
        println!("\nDEPRECATED FEATURES (P2 - Plan for Future)\n");
        print_issue_group(&p2, false);
    }

    println!("\n{}", BAR);
    println!("SUMMARY");
    println!("{}", BAR);
    println!("Files affected: {}", result.distinct_files());
    println!("Critical issues (P0): {}", result.count_by_category(Category::P0));
    println!("Important changes (P1): {}", result.count_by_category(Category::P1));
    println!("Deprecations (P2): {}", result.count_by_category(Category::P2));
    println!();

    println!("RECOMMENDED NEXT STEPS:");
    println!();
    let mut step = 1;
    if !p0.is_empty() {
        println!("{}. Fix all P0 critical issues before upgrading", step);
        println!("   - These WILL break your application in Django 5.0\n");
        step += 1;
    }
    if !p1.is_empty() {
        println!("{}. Review P1 important changes", step);
        println!("   - These MAY cause issues depending on your code\n");
        step += 1;
    }
    if !p2.is_empty() {
        println!("{}. Plan for P2 deprecations", step);
        println!("   - These will be removed in Django 6.0\n");
        step += 1;
    }
    println!("{}. Create a Django 5.0 test environment and run the full suite", step);
    println!();
}

/// Rules whose findings fall in the given category, sorted by rule id
fn rules_in_category(result: &ScanResult, category: Category) -> Vec<(&str, &[Finding])> {
    let mut rules: Vec<_> = result
        .iter()
        .filter(|(_, findings)| findings.first().is_some_and(|f| f.category == category))
        .collect();
    rules.sort_by_key(|(id, _)| *id);
    rules
}

fn print_issue_group(rules: &[(&str, &[Finding])], show_details: bool) {
    for (id, findings) in rules {
        println!("  {}: {} occurrence(s)", title_case(id), findings.len());

        if show_details {
            for finding in findings.iter().take(5) {
                match finding.line {
                    Some(line) => println!("    {}:{}", finding.file.display(), line),
                    None => println!("    {}", finding.file.display()),
                }
                if let Some(code) = &finding.code {
                    let shown: String = code.chars().take(80).collect();
                    println!("       {}", shown);
                }
                if let Some(note) = &finding.note {
                    println!("       Note: {}", note);
                }
            }
            if findings.len() > 5 {
                println!("    ... and {} more", findings.len() - 5);
            }
        } else {
            let mut files: Vec<_> = findings.iter().map(|f| f.file.as_path()).collect();
            files.sort();
            files.dedup();
            println!("    Affected files: {}", files.len());
        }

        println!();
    }
}

/// "pytz_import" -> "Pytz Import"
fn title_case(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print the full migration analysis report, recommendation included
pub fn print_migration_report(scan: &MigrationScan) {
    if scan.results.is_empty() {
        println!("{}", BAR);
        println!("EXCELLENT NEWS!");
        println!("{}", BAR);
        println!("\nNo migrations use pytz!\n");
        println!("Implication: safe to leave migrations as-is\n");
        print_recommendation(&recommend(0, 0, 0), 0, 0, 0);
        return;
    }

    let high = scan.count_at(RiskLevel::High);
    let medium = scan.count_at(RiskLevel::Medium);
    let low = scan.count_at(RiskLevel::Low);

    println!("{}", BAR);
    println!("ANALYSIS RESULTS: {} migrations use pytz", scan.results.len());
    println!("{}", BAR);
    println!();

    if high > 0 {
        println!("HIGH RISK: {} migration(s)", high);
        println!("   RunPython functions that USE pytz");
        println!("   These WILL FAIL on fresh database without pytz\n");

        for record in scan.results.iter().filter(|r| r.risk == RiskLevel::High) {
            println!("   {}", record.file.display());
            for func in &record.run_python_functions {
                println!("      Function: {}", func.name);
                for line in &func.usage {
                    println!("         {}", line);
                }
            }
            println!();
        }
    }

    if medium > 0 {
        println!("MEDIUM RISK: {} migration(s)", medium);
        println!("   Use pytz but not in RunPython");
        println!("   Might work without pytz (needs testing)\n");

        for record in scan.results.iter().filter(|r| r.risk == RiskLevel::Medium) {
            println!("   {}", record.file.display());
            if !record.pytz_calls.is_empty() {
                let shown: Vec<&str> = record
                    .pytz_calls
                    .iter()
                    .take(3)
                    .map(String::as_str)
                    .collect();
                println!("      Usage: {}", shown.join(", "));
            }
            println!();
        }
    }

    if low > 0 {
        println!("LOW RISK: {} migration(s)", low);
        println!("   Import pytz but don't use it");
        println!("   Safe to remove import\n");

        for record in scan.results.iter().filter(|r| r.risk == RiskLevel::Low) {
            println!("   {}", record.file.display());
        }
        println!();
    }

    print_recommendation(&recommend(high, medium, low), high, medium, low);
}

fn print_recommendation(rec: &Recommendation, high: usize, medium: usize, low: usize) {
    println!("{}", BAR);
    println!("RECOMMENDATION");
    println!("{}", BAR);
    println!();
    println!("Recommended Path: {}", rec.headline);
    println!();
    println!("Reasoning:");
    for line in &rec.reasoning {
        println!("  - {}", line);
    }
    println!();
    println!("Action Items:");
    for (idx, action) in rec.actions.iter().enumerate() {
        println!("  {}. {}", idx + 1, action);
    }
    println!();
    println!("Summary:");
    println!("  Total migrations with pytz: {}", high + medium + low);
    println!("  High risk (RunPython): {}", high);
    println!("  Medium risk (Usage): {}", medium);
    println!("  Low risk (Import only): {}", low);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("pytz_import"), "Pytz Import");
        assert_eq!(title_case("use_tz_false"), "Use Tz False");
        assert_eq!(title_case("ArrayAgg_usage"), "ArrayAgg Usage");
    }
}
