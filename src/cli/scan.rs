//! Breaking-change scan command implementation

use anyhow::Result;
use std::path::Path;

use upshift::config::Config;
use upshift::export;
use upshift::report;
use upshift::scanner::BreakingChangeScanner;

/// Scan the project for Django 5.0 breaking changes and print the report
pub fn scan_command(work_dir: &Path, json: bool) -> Result<()> {
    let config = Config::from_dir(work_dir).unwrap_or_else(|_| Config::with_defaults());

    println!("Scanning for Django 5.0 breaking changes...\n");
    println!(
        "Project root: {}\n",
        work_dir
            .canonicalize()
            .unwrap_or_else(|_| work_dir.to_path_buf())
            .display()
    );

    let scanner = BreakingChangeScanner::with_excludes(work_dir, &config.settings.scan_exclude);
    let result = scanner.scan_all()?;

    report::print_breaking_report(&result);

    if json {
        let output = Path::new(export::BREAKING_EXPORT_FILE);
        export::export_breaking(&result, work_dir, output)?;
        println!("Detailed results exported to {}", output.display());
    }

    Ok(())
}
