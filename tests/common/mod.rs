//! Shared helpers for integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use httplib::{HttpLib, LogConfig, LogFormat};
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory JSON log sink.
#[derive(Clone, Default)]
pub struct Sink(Arc<Mutex<Vec<u8>>>);

impl Sink {
    pub fn records(&self) -> Vec<Value> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl io::Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Sink {
    type Writer = Sink;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// An `HttpLib` whose records land in the returned sink, filtered by `filter`.
pub fn lib_with_sink(filter: &str) -> (HttpLib, Sink) {
    let sink = Sink::default();
    let config = LogConfig { filter: filter.to_owned(), format: LogFormat::Json, ansi: false };
    let dispatch = config.dispatch_with_writer(sink.clone()).unwrap();
    (HttpLib::new(dispatch), sink)
}
