//! Lightweight timing scopes and an optional key-event debug log.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static KEYS_INTERCEPTED: AtomicU64 = AtomicU64::new(0);
static KEYS_NATIVE: AtomicU64 = AtomicU64::new(0);
static DEBUG_LOG: LazyLock<Mutex<DebugLog>> = LazyLock::new(|| Mutex::new(DebugLog::new()));

/// Timing guard; reports its lifetime on drop when timing is enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        tracing::info!(target: "textarea::perf", scope = self.name, elapsed_us, "timing");
        log_event(self.name, format!("{elapsed_us:.1} us"));
    }
}

#[derive(Debug)]
struct DebugLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl DebugLog {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }
}

fn debug_log() -> MutexGuard<'static, DebugLog> {
    DEBUG_LOG
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Count one structural key by outcome.
pub fn count_structural_key(intercepted: bool) {
    let counter = if intercepted {
        &KEYS_INTERCEPTED
    } else {
        &KEYS_NATIVE
    };
    counter.fetch_add(1, Ordering::Relaxed);
}

/// Structural keys seen so far, as `(intercepted, native)`.
pub fn structural_key_counts() -> (u64, u64) {
    (
        KEYS_INTERCEPTED.load(Ordering::Relaxed),
        KEYS_NATIVE.load(Ordering::Relaxed),
    )
}

/// Start (or stop, with `None`) writing events to a debug log file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = debug_log();
    if let Some(path) = path {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "textarea debug log start")?;
        writer.flush()?;
        log.start = Instant::now();
        log.writer = Some(writer);
    } else {
        log.writer = None;
    }
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    debug_log().writer.is_some()
}

/// Append one event line to the debug log, if one is open.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut log = debug_log();
    let elapsed_ms = log.start.elapsed().as_secs_f64() * 1000.0;
    if let Some(writer) = log.writer.as_mut() {
        let _ = writeln!(
            writer,
            "[{elapsed_ms:>10.3} ms] {name}: {}",
            detail.as_ref()
        );
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_set_enabled_toggles_runtime_flag() {
        set_enabled(true);
        assert!(is_enabled());

        set_enabled(false);
        assert!(!is_enabled());
    }

    #[test]
    fn test_structural_key_counts_grow() {
        let (intercepted, native) = structural_key_counts();
        count_structural_key(true);
        count_structural_key(false);
        count_structural_key(false);
        let (after_intercepted, after_native) = structural_key_counts();
        assert!(after_intercepted > intercepted);
        assert!(after_native >= native + 2);
    }

    #[test]
    fn test_debug_log_path_enables_logging_and_writes() {
        let temp_file = NamedTempFile::new().unwrap();
        set_debug_log_path(Some(temp_file.path())).unwrap();
        assert!(is_debug_log_enabled());
        log_event("test.event", "hello world");
        set_debug_log_path(None).unwrap();
        assert!(!is_debug_log_enabled());

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("textarea debug log start"));
        assert!(content.contains("test.event: hello world"));
    }
}
