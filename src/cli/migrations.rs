//! Migration analysis command implementation

use anyhow::Result;
use std::path::Path;

use upshift::config::Config;
use upshift::export;
use upshift::migration::MigrationAnalyzer;
use upshift::report;

/// Analyze migrations for pytz usage and print the path recommendation
pub fn migrations_command(work_dir: &Path, json: bool) -> Result<()> {
    let config = Config::from_dir(work_dir).unwrap_or_else(|_| Config::with_defaults());

    println!("Scanning for migrations with pytz usage...\n");

    let analyzer = MigrationAnalyzer::with_excludes(work_dir, &config.settings.scan_exclude);
    let scan = analyzer.scan_project()?;

    println!("Found {} migration files\n", scan.files_scanned);

    report::print_migration_report(&scan);

    if json {
        let output = Path::new(export::MIGRATION_EXPORT_FILE);
        export::export_migrations(&scan, output)?;
        println!("Detailed results exported to {}", output.display());
    }

    Ok(())
}
