use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the log file created inside `--log-dir`
pub const LOG_FILE_NAME: &str = "finrisk.log";

/// A log file past this size is trimmed at startup
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Bytes of recent history that survive a trim
const KEEP_SIZE: u64 = 1024 * 1024;

const TRIM_MARKER: &[u8] = b"--- finrisk: earlier log entries trimmed ---\n";

pub(crate) fn rotate_log_if_needed(log_path: &Path) -> io::Result<()> {
    rotate_with_limits(log_path, MAX_LOG_SIZE, KEEP_SIZE)
}

/// Trim `log_path` to its last `keep_size` bytes once it grows past
/// `max_size`. A missing file is fine.
fn rotate_with_limits(log_path: &Path, max_size: u64, keep_size: u64) -> io::Result<()> {
    let len = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if len <= max_size {
        return Ok(());
    }

    let tail = {
        let mut file = File::open(log_path)?;
        file.seek(SeekFrom::Start(len.saturating_sub(keep_size)))?;
        let mut tail = Vec::new();
        file.read_to_end(&mut tail)?;
        tail
    };

    let mut file = File::create(log_path)?;
    file.write_all(TRIM_MARKER)?;
    file.write_all(whole_lines(&tail))
}

/// `tail` minus the cut-off line fragment at its head
fn whole_lines(tail: &[u8]) -> &[u8] {
    match tail.iter().position(|&b| b == b'\n') {
        Some(i) => &tail[i + 1..],
        None => tail,
    }
}

/// Hands every fmt event a handle to the one open log file
#[derive(Clone)]
struct SharedLogFile {
    file: Arc<Mutex<File>>,
}

impl SharedLogFile {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedLogWriter {
    file: Arc<Mutex<File>>,
}

impl SharedLogWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// `RUST_LOG` if set, otherwise `finrisk=<level>,finrisk_core=warn`
fn env_filter(level: &str) -> EnvFilter {
    let default_filter = format!("finrisk={level},finrisk_core=warn");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter))
}

/// Install the global subscriber.
///
/// Events go to stderr so stdout carries only the JSON result. With a
/// `log_dir` they go to `{log_dir}/finrisk.log` instead, trimmed to its last
/// 1MB whenever it has passed 5MB.
pub fn init_logging(log_dir: Option<&Path>, level: &str) -> color_eyre::Result<()> {
    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter(level))
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .init();
        return Ok(());
    };

    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);

    if let Err(e) = rotate_log_if_needed(&log_path) {
        eprintln!("Warning: Failed to rotate log file: {e}");
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_writer(SharedLogFile::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "finrisk logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_recent_complete_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);

        let content: String = (0..100).map(|i| format!("line {i:03}\n")).collect();
        fs::write(&path, &content).unwrap();

        // 9 bytes per line; keep the last 50 bytes of 900
        rotate_with_limits(&path, 500, 50).unwrap();

        let rotated = fs::read_to_string(&path).unwrap();
        let mut lines = rotated.lines();
        assert_eq!(
            lines.next(),
            Some("--- finrisk: earlier log entries trimmed ---")
        );
        let kept: Vec<&str> = lines.collect();
        assert_eq!(kept.first(), Some(&"line 095"));
        assert_eq!(kept.last(), Some(&"line 099"));
    }

    #[test]
    fn test_whole_lines_drops_leading_fragment() {
        assert_eq!(whole_lines(b"ine 3\nline 4\n"), b"line 4\n");
        assert_eq!(whole_lines(b"no newline"), b"no newline");
        assert_eq!(whole_lines(b""), b"");
    }

    #[test]
    fn test_small_or_missing_file_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        rotate_log_if_needed(&path).unwrap();
        assert!(!path.exists());

        fs::write(&path, "short\n").unwrap();
        rotate_log_if_needed(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }
}
