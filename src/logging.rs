//! Browser Logging
//!
//! tracing-subscriber formatter whose output goes to the devtools console,
//! so warnings and errors from the core stores show up in the browser.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Call once, before mounting.
pub fn init() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        // No system clock in wasm32-unknown-unknown
        .without_time()
        .try_init();
    if let Err(err) = installed {
        web_sys::console::warn_1(&format!("[LOG] subscriber not installed: {}", err).into());
    }
}

/// Hands out one [`ConsoleWriter`] per event.
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and logs it when dropped.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    /// The buffered text without its trailing newline, emptying the buffer.
    fn take_line(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let bytes = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&bytes).trim_end().to_string();
        Some(line)
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = self.take_line() else {
            return;
        };
        let line = line.into();
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}
