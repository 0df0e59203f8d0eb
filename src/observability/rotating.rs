//! Append-only line writer with size-based rotation.
//!
//! Before each write the active file's size is checked. Past the limit it is
//! renamed to `<stem>.json.<n>`, where `n` counts up across rotations, and
//! only the newest `keep` backups survive.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation threshold for the trace file.
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Rotated files kept next to the active one.
pub const DEFAULT_KEEP: usize = 3;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    keep: usize,
    state: Mutex<WriterState>,
}

struct WriterState {
    file: Option<File>,
    next_backup: u64,
}

impl RotatingFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_KEEP)
    }

    #[must_use]
    pub fn with_limits(path: PathBuf, max_bytes: u64, keep: usize) -> Self {
        let next_backup = highest_backup(&path).map_or(1, |n| n + 1);
        Self {
            path,
            max_bytes,
            keep,
            state: Mutex::new(WriterState { file: None, next_backup }),
        }
    }

    /// Appends `line` and a newline, rotating first when the file is full.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, or `Other` if a previous writer
    /// panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer poisoned: {e}")))?;

        let size = fs::metadata(&self.path).map_or(0, |m| m.len());
        if size > 0 && size + line.len() as u64 + 1 > self.max_bytes {
            state.file = None;
            self.rotate(&mut state)?;
        }

        if state.file.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            state.file = Some(file);
        }

        let Some(file) = state.file.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file not open"));
        };
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self, state: &mut WriterState) -> io::Result<()> {
        let backup = backup_path(&self.path, state.next_backup);
        fs::rename(&self.path, backup)?;
        state.next_backup += 1;

        let mut backups = list_backups(&self.path);
        backups.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        for (_, stale) in backups.into_iter().skip(self.keep) {
            let _ = fs::remove_file(stale);
        }

        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("keep", &self.keep)
            .finish_non_exhaustive()
    }
}

fn backup_path(path: &Path, n: u64) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{n}"));
    path.with_file_name(name)
}

/// Rotated siblings of `path` with their numbers.
fn list_backups(path: &Path) -> Vec<(u64, PathBuf)> {
    let (Some(dir), Some(name)) = (path.parent(), path.file_name().and_then(|n| n.to_str())) else {
        return Vec::new();
    };
    let prefix = format!("{name}.");

    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(std::result::Result::ok)
                .filter_map(|entry| {
                    let file_name = entry.file_name();
                    let n = file_name.to_str()?.strip_prefix(&prefix)?.parse::<u64>().ok()?;
                    Some((n, entry.path()))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn highest_backup(path: &Path) -> Option<u64> {
    list_backups(path).into_iter().map(|(n, _)| n).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(lines(&path), vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn rotates_when_full_and_keeps_newest_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::with_limits(path.clone(), 16, 2);

        for i in 0..5 {
            writer.write_line(&format!("line-{i}-padding")).unwrap();
        }

        assert_eq!(lines(&path), vec!["line-4-padding"]);

        let mut numbers: Vec<u64> = list_backups(&path).into_iter().map(|(n, _)| n).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, vec![3, 4]);
        assert_eq!(lines(&backup_path(&path, 4)), vec!["line-3-padding"]);
    }

    #[test]
    fn numbering_continues_after_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        fs::write(backup_path(&path, 7), "old\n").unwrap();

        let writer = RotatingFile::with_limits(path.clone(), 8, 5);
        writer.write_line("first-line").unwrap();
        writer.write_line("second-line").unwrap();

        assert!(backup_path(&path, 8).exists());
        assert_eq!(lines(&path), vec!["second-line"]);
    }

    #[test]
    fn unrelated_files_are_not_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        fs::write(dir.path().join("trace.json.bak"), "").unwrap();
        fs::write(dir.path().join("other.json.1"), "").unwrap();

        assert!(list_backups(&path).is_empty());
    }
}
