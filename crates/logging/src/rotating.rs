//! Size-based log file rotation
//!
//! `app.log` rolls over to `app.log.1` once the next write would reach
//! `max_bytes`; existing backups shift up by one and the oldest beyond
//! `backup_count` is dropped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A file writer that rotates by size
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    file: File,
    written: u64,
}

impl RotatingFileWriter {
    /// Open (or create) `path` for appending, creating its directory if needed
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            file,
            written,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes in the active file
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Path of backup number `index` (`app.log.<index>`)
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.max_bytes > 0 && self.written > 0 && self.written + incoming as u64 >= self.max_bytes
    }

    /// Shift backups and start a fresh active file
    pub fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backup_count == 0 {
            // Nowhere to keep history: start over in place.
            self.file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        for index in (1..self.backup_count).rev() {
            let src = self.backup_path(index);
            if src.exists() {
                let dst = self.backup_path(index + 1);
                if dst.exists() {
                    fs::remove_file(&dst)?;
                }
                fs::rename(&src, &dst)?;
            }
        }

        let first = self.backup_path(1);
        if first.exists() {
            fs::remove_file(&first)?;
        }
        if self.path.exists() {
            fs::rename(&self.path, &first)?;
        }

        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate(buf.len()) {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("app.log");

        let writer = RotatingFileWriter::open(&path, 1024, 5).unwrap();
        assert!(path.exists());
        assert_eq!(writer.written(), 0);
    }

    #[test]
    fn test_append_keeps_existing_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "previous run\n").unwrap();

        let writer = RotatingFileWriter::open(&path, 1024, 5).unwrap();
        assert_eq!(writer.written(), 13);
    }

    #[test]
    fn test_rotates_when_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingFileWriter::open(&path, 10, 2).unwrap();

        writer.write_all(b"first\n").unwrap();
        writer.write_all(b"second\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&path), "second\n");
        assert_eq!(read(&writer.backup_path(1)), "first\n");
    }

    #[test]
    fn test_oldest_backup_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingFileWriter::open(&path, 4, 2).unwrap();

        for line in ["aaa\n", "bbb\n", "ccc\n", "ddd\n"] {
            writer.write_all(line.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(read(&path), "ddd\n");
        assert_eq!(read(&writer.backup_path(1)), "ccc\n");
        assert_eq!(read(&writer.backup_path(2)), "bbb\n");
        assert!(!writer.backup_path(3).exists());
    }

    #[test]
    fn test_zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingFileWriter::open(&path, 4, 0).unwrap();

        writer.write_all(b"old\n").unwrap();
        writer.write_all(b"new\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&path), "new\n");
        assert!(!writer.backup_path(1).exists());
    }

    #[test]
    fn test_backup_path_naming() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFileWriter::open(dir.path().join("app.log"), 10, 5).unwrap();
        assert_eq!(writer.backup_path(3), dir.path().join("app.log.3"));
    }
}
