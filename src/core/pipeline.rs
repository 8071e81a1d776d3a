//! Multi-file extraction.
//!
//! Scans a project for JavaScript / TypeScript sources, extracts every file
//! in parallel (each with its own visitation tracker) and merges the entries
//! in sort key order.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{Config, TEST_FILE_PATTERNS};
use crate::core::doc::DocumentationEntry;
use crate::core::run;
use crate::core::unit::SourceUnit;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    pub files: HashSet<String>,
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
) -> ScanResult {
    let mut files: HashSet<String> = HashSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(Path::new(base_dir).join(p));
        }
    }

    if ignore_test_files {
        for p in TEST_FILE_PATTERNS {
            if let Ok(pattern) = Pattern::new(p) {
                glob_patterns.push(pattern);
            }
        }
    }

    let roots: Vec<PathBuf> = if includes.is_empty() {
        vec![Path::new(base_dir).to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            let path = Path::new(base_dir).join(inc);
            if is_glob_pattern(inc) {
                match glob(&path.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten()),
                    Err(e) => warn!("Invalid glob pattern '{}': {}", inc, e),
                }
            } else if path.exists() {
                paths.push(path);
            } else {
                warn!("Include path does not exist: {}", path.display());
            }
        }
        paths
    };

    for root in roots {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_scannable_file(path) {
                files.insert(path_str.into());
            }
        }
    }

    debug!(
        files = files.len(),
        skipped = skipped_count,
        "scanned {}",
        base_dir
    );

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "mts" | "cts")
    )
}

/// A file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub file: String,
    pub error: String,
}

/// Entries of all files, plus the files that failed.
#[derive(Debug, Default)]
pub struct ExtractionOutput {
    pub entries: Vec<DocumentationEntry>,
    pub failures: Vec<ParseFailure>,
    pub file_count: usize,
}

/// Extract the documentation of `files` in parallel.
///
/// Paths are reported relative to `base_dir`, and that relative path is also
/// the file's sort key prefix. A file that fails does not stop the others.
pub fn extract_files<P: AsRef<Path>>(
    base_dir: &Path,
    files: &[P],
    config: &Config,
) -> ExtractionOutput {
    let mut files: Vec<&Path> = files.iter().map(|p| p.as_ref()).collect();
    files.sort();

    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let relative = display_path(base_dir, path);
            extract_file(path, &relative, config).map_err(|e| ParseFailure {
                file: relative,
                error: format!("{:#}", e),
            })
        })
        .collect();

    let mut output = ExtractionOutput {
        file_count: files.len(),
        ..Default::default()
    };
    for result in results {
        match result {
            Ok(entries) => output.entries.extend(entries),
            Err(failure) => {
                debug!(file = %failure.file, "{}", failure.error);
                output.failures.push(failure);
            }
        }
    }

    // Stable: entries sharing a key keep their per-file order
    output
        .entries
        .sort_by(|a, b| a.context.sort_key.cmp(&b.context.sort_key));
    output
}

fn extract_file(path: &Path, relative: &str, config: &Config) -> Result<Vec<DocumentationEntry>> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", relative))?;
    let unit = SourceUnit::parse(relative, source, relative)?;
    let entries = run(&unit, config)?;
    debug!(file = %relative, entries = entries.len(), "extracted");
    Ok(entries)
}

fn display_path(base_dir: &Path, path: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
