//! Rolling File Writer
//!
//! Size-based rotation plus an in-memory ring of the most recent lines.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

/// Rotation limits
#[derive(Debug, Clone, Copy)]
pub struct RollingPolicy {
    /// Rotate once the active file would exceed this many bytes
    pub max_bytes: u64,
    /// Total files kept on disk, including the active one
    pub max_files: usize,
    /// Lines kept in the in-memory ring buffer
    pub buffer_lines: usize,
}

impl Default for RollingPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            max_files: 5,
            buffer_lines: 500,
        }
    }
}

/// Active log file with rotation bookkeeping
pub struct RollingFile {
    dir: PathBuf,
    base_name: String,
    policy: RollingPolicy,
    file: File,
    written: u64,
    recent: VecDeque<String>,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, policy: RollingPolicy) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let base_name = format!("{}.log", app_name);
        let path = dir.join(&base_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            dir: dir.to_path_buf(),
            base_name,
            policy,
            file,
            written,
            recent: VecDeque::with_capacity(policy.buffer_lines),
        })
    }

    /// Path of the file currently being written
    pub fn active_path(&self) -> PathBuf {
        self.dir.join(&self.base_name)
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", self.base_name, index))
    }

    /// Shift `app.log.N-1` -> `app.log.N` ... `app.log` -> `app.log.1`, dropping the oldest
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.policy.max_files <= 1 {
            self.file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(self.active_path())?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.rotated_path(self.policy.max_files - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.policy.max_files - 1).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }
        fs::rename(self.active_path(), self.rotated_path(1))?;

        self.file = OpenOptions::new().create(true).append(true).open(self.active_path())?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.policy.buffer_lines == 0 {
            return;
        }
        for line in String::from_utf8_lossy(buf).lines() {
            if line.is_empty() {
                continue;
            }
            if self.recent.len() == self.policy.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(line.to_string());
        }
    }

    pub fn recent(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    pub fn write_record(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.policy.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(buf.len())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Cloneable handle handed to `tracing_subscriber::fmt`
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl RollingWriter {
    pub fn new(file: RollingFile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(file)),
        }
    }

    pub fn recent(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(file) => file.recent(),
            Err(poisoned) => poisoned.into_inner().recent(),
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        file.write_record(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
