//! `tracing` output routed to the browser console

use std::io;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsValue;

/// Buffers one formatted event and logs it when dropped
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn take_line(&mut self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
        self.buffer.clear();
        (!line.is_empty()).then_some(line)
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
        if let Some(line) = self.take_line() {
            web_sys::console::log_1(&JsValue::from_str(&line));
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::default()
    }
}

/// Install the console subscriber; later calls are ignored
pub fn init(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(MakeConsoleWriter)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_take_line_trims_and_clears() {
        let mut writer = ConsoleWriter::default();
        writer.write_all(b" INFO Page interactions initialised\n").unwrap();
        assert_eq!(
            writer.take_line().as_deref(),
            Some(" INFO Page interactions initialised")
        );
        assert_eq!(writer.take_line(), None);
    }
}
