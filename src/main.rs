//! resdoc — generate reStructuredText reference pages from resource class metadata.
//!
//! - **file mode**: `resdoc -o docs/reference metadata/*.json`
//! - **stdout mode**: `resdoc --stdout metadata.json` prints every page, each
//!   preceded by a `.. file: <path>` marker line.

use anyhow::{Context, Result};
use clap::Parser;
use resdoc::config::{Config, DEFAULT_ROOT_PREFIX};
use resdoc::{logging, site, JsonMetadata, OutputFile};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "resdoc",
    about = "Generate reStructuredText reference pages from resource class metadata"
)]
struct Cli {
    /// Metadata JSON files (glob patterns and directories supported)
    #[arg(required = true)]
    files: Vec<String>,

    /// Output directory (required unless --stdout is given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Root package prefix; the next package segment becomes the namespace
    #[arg(long, default_value = DEFAULT_ROOT_PREFIX)]
    root_prefix: String,

    /// Print generated files to stdout instead of writing them
    #[arg(long)]
    stdout: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init().context("failed to initialize logging")?;

    let input_files = expand_globs(&cli.files)?;
    let metadata = JsonMetadata::load(&input_files).context("failed to load metadata")?;
    let config = Config::default().with_root_prefix(&cli.root_prefix);

    let files = site::generate(&metadata, &config);

    if cli.stdout {
        return print_files(&files);
    }

    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required unless --stdout is given")?;
    write_files(output_dir, &files)?;

    tracing::info!(count = files.len(), dir = %output_dir.display(), "wrote documentation");
    Ok(())
}

fn write_files(output_dir: &Path, files: &[OutputFile]) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    for file in files {
        let out_path = output_dir.join(&file.path);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        fs::write(&out_path, &file.contents)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

fn print_files(files: &[OutputFile]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for file in files {
        write!(out, "{}", file_marker(&file.path))
            .and_then(|_| out.write_all(file.contents.as_bytes()))
            .context("failed to write to stdout")?;
    }
    out.flush().context("failed to flush stdout")
}

/// Marker line preceding each file in stdout mode.
fn file_marker(path: &Path) -> String {
    format!(".. file: {}\n\n", path.to_string_lossy().replace('\\', "/"))
}

/// File extensions recognized as metadata dumps.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for metadata files.
///
/// Files keep command-line order, since the first definition of a class wins
/// when dumps are merged. Matches within one directory or glob are sorted.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            let mut found: Vec<_> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && has_supported_extension(p))
                .collect();
            found.sort();
            files.extend(found);
            continue;
        }
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!(pattern = %pattern, "no files matched");
        }
        matches.sort();
        files.extend(matches);
    }
    let mut seen = HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn marker_uses_forward_slashes() {
        assert_eq!(
            file_marker(Path::new("ec2/vpc.rst")),
            ".. file: ec2/vpc.rst\n\n"
        );
    }

    #[test]
    fn directory_scan_keeps_only_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let pattern = dir.path().to_string_lossy().to_string();
        let files = expand_globs(&[pattern.clone(), pattern]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.json", "b.json"]);
    }

    #[test]
    fn command_line_order_is_kept() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("z-overrides.json");
        let second = dir.path().join("a-base.json");
        fs::write(&first, "{}").unwrap();
        fs::write(&second, "{}").unwrap();

        let patterns = [
            first.to_string_lossy().to_string(),
            second.to_string_lossy().to_string(),
            first.to_string_lossy().to_string(),
        ];
        assert_eq!(expand_globs(&patterns).unwrap(), vec![first, second]);
    }

    #[test]
    fn glob_pattern_expands() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("aws.json"), "{}").unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        assert_eq!(expand_globs(&[pattern]).unwrap().len(), 1);
    }
}
