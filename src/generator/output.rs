use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{GenerateError, Result};

/// What to do with the rendered source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write the file
    #[default]
    Write,
    /// Print the source to stdout and leave the file alone
    DryRun,
    /// Compare against the file on disk without writing
    Check,
}

/// Result of [`write_output`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was written with new contents
    Written,
    /// The file was rewritten with identical contents
    Unchanged,
    /// The source went to stdout
    Printed,
    /// `Check`: the file matches
    UpToDate,
    /// `Check`: the file is missing or differs
    Stale,
}

/// Deliver the rendered source according to `mode`.
///
/// In `Write` mode missing parent directories are created and the whole file
/// is written in one call. Concurrent runs against the same path are
/// last-writer-wins; there is no locking.
pub fn write_output(path: &Path, source: &str, mode: OutputMode) -> Result<WriteOutcome> {
    let existing = fs::read_to_string(path).ok();
    let same = existing.as_deref() == Some(source);

    match mode {
        OutputMode::DryRun => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(source.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| GenerateError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
            Ok(WriteOutcome::Printed)
        }
        OutputMode::Check => Ok(if same {
            WriteOutcome::UpToDate
        } else {
            WriteOutcome::Stale
        }),
        OutputMode::Write => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(path, source).map_err(|source| GenerateError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), bytes = source.len(), "wrote routes file");
            Ok(if same {
                WriteOutcome::Unchanged
            } else {
                WriteOutcome::Written
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen").join("routes_gen.go");
        assert_eq!(
            write_output(&path, "package main\n", OutputMode::Write).unwrap(),
            WriteOutcome::Written
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "package main\n");
        assert_eq!(
            write_output(&path, "package main\n", OutputMode::Write).unwrap(),
            WriteOutcome::Unchanged
        );
    }

    #[test]
    fn test_check_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes_gen.go");
        assert_eq!(
            write_output(&path, "package main\n", OutputMode::Check).unwrap(),
            WriteOutcome::Stale
        );
        assert!(!path.exists());

        fs::write(&path, "package main\n").unwrap();
        assert_eq!(
            write_output(&path, "package main\n", OutputMode::Check).unwrap(),
            WriteOutcome::UpToDate
        );
        assert_eq!(
            write_output(&path, "package other\n", OutputMode::Check).unwrap(),
            WriteOutcome::Stale
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "package main\n");
    }

    #[test]
    fn test_dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes_gen.go");
        assert_eq!(
            write_output(&path, "package main\n", OutputMode::DryRun).unwrap(),
            WriteOutcome::Printed
        );
        assert!(!path.exists());
    }
}
