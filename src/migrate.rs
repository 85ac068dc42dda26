//! Walks a documentation tree and rewrites AsciiDoc sources in place.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::rewrite::Rewriter;

/// File name prefix of navigation files, which are never rewritten
pub const NAV_PREFIX: &str = "nav-";

/// Per-run counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub considered: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

/// Rewrite every `.adoc` file below `root`, writing only files that change.
///
/// The first fatal rewrite error stops the walk.
pub fn migrate_tree(root: &Path, rewriter: &Rewriter<'_>) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();
        let is_adoc = path.extension().and_then(|e| e.to_str()) == Some("adoc");
        if !entry.file_type().is_file() || !is_adoc {
            continue;
        }
        let is_nav = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(NAV_PREFIX));
        if is_nav {
            debug!("Skipping navigation file {}", path.display());
            report.skipped += 1;
            continue;
        }

        report.considered += 1;
        if migrate_file(path, rewriter)? {
            report.changed += 1;
        } else {
            report.unchanged += 1;
        }
    }

    info!(
        "Considered {} files: {} changed, {} unchanged, {} skipped",
        report.considered, report.changed, report.unchanged, report.skipped
    );
    Ok(report)
}

/// Rewrite one file in place; returns whether it changed
pub fn migrate_file(path: &Path, rewriter: &Rewriter<'_>) -> Result<bool> {
    info!("Considering {}", path.display());
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let rewritten = rewriter
        .rewrite(&content)
        .with_context(|| format!("Failed to migrate {}", path.display()))?;

    match rewritten {
        Some(output) => {
            fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Changed {}", path.display());
            Ok(true)
        }
        None => {
            info!("Unchanged {}", path.display());
            Ok(false)
        }
    }
}
