//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;
use tracing::info;

use upshift::config::CONFIG_FILE;

/// Default configuration content for upshift init
pub const DEFAULT_CONFIG: &str = r#"# upshift configuration
# =====================
#
# Both scanners read this file from the scan root when present.

[settings]
# Directory names skipped during every walk, on top of the built-in
# defaults (venv, .venv, __pycache__)
scan_exclude = []
"#;

/// Write a default upshift.toml into the working directory
pub fn init_command(work_dir: &Path, force: bool) -> Result<()> {
    let config_path = work_dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    info!("Wrote {}", config_path.display());
    println!("Created {}", config_path.display());

    Ok(())
}
