//! Append-only trace file with size-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When the trace file rotates and how many old copies survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the live file grows past this many bytes.
    pub max_bytes: u64,
    /// Rotated copies kept next to the live file.
    pub keep: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            keep: 3,
        }
    }
}

/// Line-oriented writer shared by the span exporter.
///
/// The file handle is opened lazily on the first write, so constructing a
/// writer for an unwritable path never fails. Rotated copies are named
/// `<stem>.json.<unix-seconds>`.
pub struct FileWriter {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned or any filesystem step fails.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::other(format!("trace writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::other("trace file not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.policy.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        if self.path.exists() {
            fs::rename(&self.path, self.path.with_extension(format!("json.{stamp}")))?;
        }
        self.prune()
    }

    /// Deletes the oldest rotated copies beyond the retention count.
    fn prune(&self) -> io::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        let Some(stem) = self.path.file_stem().and_then(|s| s.to_str()) else {
            return Ok(());
        };
        let prefix = format!("{stem}.json.");

        let mut rotated: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_rotated_copy(path, &prefix))
            .collect();

        rotated.sort_by_key(|path| std::cmp::Reverse(fs::metadata(path).and_then(|m| m.modified()).ok()));

        for stale in rotated.iter().skip(self.policy.keep) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

fn is_rotated_copy(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(prefix))
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone(), RotationPolicy::default());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn test_rotates_past_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(
            path.clone(),
            RotationPolicy {
                max_bytes: 4,
                keep: 1,
            },
        );

        writer.write_line("0123456789").unwrap();
        writer.write_line("next").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "next\n");
        let copies = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|entry| is_rotated_copy(&entry.path(), "trace.json."))
            .count();
        assert_eq!(copies, 1);
    }
}
