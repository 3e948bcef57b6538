// Logging bridge to the host logger.
//
// Two entry points share one sink: `slog!` for script-facing messages, and a
// `tracing` subscriber whose writer forwards formatted events to the host at
// the matching level.

use std::io;

use shado_ffi::LogLevel;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::api::{api, is_api_initialized};
use crate::error::{ShadoError, ShadoResult};

/// Send one message to the host log. Dropped silently before init.
pub fn log(level: LogLevel, msg: &str) {
    if !is_api_initialized() {
        return;
    }
    let bytes = msg.as_bytes();
    // SAFETY: the logging sub-table pointer is valid for the library lifetime.
    unsafe {
        ((*api().logging).log)(level, bytes.as_ptr(), bytes.len() as u32);
    }
}

/// Log a formatted message through the host logger.
///
/// Usage:
/// ```ignore
/// slog!(LogLevel::Info, "Entity {} has {} health", entity, hp);
/// slog!(LogLevel::Warn, "something suspicious");
/// ```
#[macro_export]
macro_rules! slog {
    ($level:expr, $($arg:tt)*) => {{
        $crate::logging::log($level, &format!($($arg)*));
    }};
}

/// Host severity for a `tracing` level.
pub fn host_level(level: &Level) -> LogLevel {
    match *level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

/// `MakeWriter` that routes each formatted event to the host log.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostLogWriter;

impl HostLogWriter {
    pub fn for_level(level: LogLevel) -> HostLine {
        HostLine { level, buf: Vec::new() }
    }
}

impl<'a> MakeWriter<'a> for HostLogWriter {
    type Writer = HostLine;

    fn make_writer(&'a self) -> HostLine {
        HostLogWriter::for_level(LogLevel::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> HostLine {
        HostLogWriter::for_level(host_level(meta.level()))
    }
}

/// Buffers one formatted event; the host receives it when the writer drops.
#[derive(Debug)]
pub struct HostLine {
    level: LogLevel,
    buf: Vec<u8>,
}

impl io::Write for HostLine {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for HostLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim_end_matches(['\n', '\r']);
        if !text.is_empty() {
            log(self.level, text);
        }
    }
}

/// Install the global `tracing` subscriber, filtered by `filter`
/// (`EnvFilter` syntax).
pub fn install_subscriber(filter: &str) -> ShadoResult<()> {
    let filter = EnvFilter::try_new(filter).map_err(|e| ShadoError::Config(format!("logging.filter: {e}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(HostLogWriter)
        .with_ansi(false)
        .without_time()
        .try_init()
        .map_err(|e| ShadoError::Internal(format!("tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::test_support::setup;

    #[test]
    fn slog_reaches_the_host() {
        let _guard = setup();
        crate::slog!(LogLevel::Warn, "low health: {}", 3);
        assert_eq!(shado_sim::logs(), vec![(LogLevel::Warn, "low health: 3".to_string())]);
    }

    #[test]
    fn host_line_strips_the_newline_and_skips_empty_lines() {
        let _guard = setup();
        {
            let mut line = HostLogWriter::for_level(LogLevel::Error);
            line.write_all(b"boom\n").unwrap();
        }
        drop(HostLogWriter::for_level(LogLevel::Info));
        assert_eq!(shado_sim::logs(), vec![(LogLevel::Error, "boom".to_string())]);
    }

    #[test]
    fn tracing_events_keep_their_level() {
        let _guard = setup();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(HostLogWriter)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(entity = 4, "entity lost its parent");
        });
        let logs = shado_sim::logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].0, LogLevel::Warn);
        assert!(logs[0].1.contains("entity lost its parent"), "{}", logs[0].1);
    }

    #[test]
    fn bad_filter_is_a_config_error() {
        assert!(matches!(install_subscriber("shado_runtime=notalevel"), Err(ShadoError::Config(_))));
    }
}
