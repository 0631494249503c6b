// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! In-memory log capture.
//!
//! Used by tests that assert on what was (or was not) logged, e.g. that an
//! access token never reaches the log stream.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Shared buffer that collects plaintext log lines
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

pub struct CaptureGuard<'a>(MutexGuard<'a, Vec<u8>>);

impl Write for CaptureGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        let guard = match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        CaptureGuard(guard)
    }
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscriber writing every event at or above `level` into this buffer.
    ///
    /// Install it with `tracing::subscriber::set_default` to scope the
    /// capture to the current thread.
    pub fn subscriber(&self, level: Level) -> impl tracing::Subscriber + Send + Sync {
        let filter = tracing_subscriber::filter::LevelFilter::from_level(level);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_target(true);
        tracing_subscriber::registry().with(filter).with(layer)
    }

    pub fn contents(&self) -> String {
        let guard = match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        String::from_utf8_lossy(&guard).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[gp_test_utils::logged_test]
    fn captures_events_above_level() {
        let capture = LogCapture::new();
        {
            let _default = tracing::subscriber::set_default(capture.subscriber(Level::INFO));
            tracing::info!(repository = "gitpulse", "fetched page");
            tracing::debug!("hidden detail");
        }
        tracing::info!("outside the capture scope");

        let text = capture.contents();
        assert!(text.contains("fetched page"));
        assert!(text.contains("repository=\"gitpulse\""));
        assert!(!text.contains("hidden detail"));
        assert!(!text.contains("outside the capture scope"));
    }
}
