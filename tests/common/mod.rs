//! Shared test utilities for scanner integration tests

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a file under the fixture root, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("file has a parent"))
        .expect("Failed to create fixture directories");
    fs::write(path, content).expect("Failed to write fixture file");
}

/// Create a minimal Django-shaped project tree with no upgrade issues
pub fn create_clean_project() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    write_file(root, "manage.py", "#!/usr/bin/env python\n");
    write_file(
        root,
        "project/settings.py",
        "USE_TZ = True\nDEBUG = False\n",
    );
    write_file(
        root,
        "app/models.py",
        "from django.db import models\n\nclass Entry(models.Model):\n    title = models.CharField(max_length=100)\n",
    );
    write_file(
        root,
        "app/views.py",
        "from zoneinfo import ZoneInfo\n\nTZ = ZoneInfo('UTC')\n",
    );
    write_file(
        root,
        "app/migrations/__init__.py",
        "",
    );
    write_file(
        root,
        "app/migrations/0001_initial.py",
        "from django.db import migrations\n\nclass Migration(migrations.Migration):\n    initial = True\n",
    );

    temp_dir
}
