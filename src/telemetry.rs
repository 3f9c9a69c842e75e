//! Tracing setup

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. Fails if a
/// subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .with_context(|| format!("invalid log filter {:?}", config.filter))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("failed to install tracing subscriber")
}

/// Install the global tracing subscriber, writing to the browser console
///
/// Each event goes to the `console` method matching its level, so errors
/// and warnings keep their devtools styling.
#[cfg(feature = "web")]
pub fn init_console_tracing(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter {:?}", config.filter))?;

    // No system clock on wasm32-unknown-unknown
    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_writer(console::MakeConsoleWriter);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("failed to install tracing subscriber")
}

#[cfg(feature = "web")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    /// Buffers one formatted event and hands it to `console` on drop
    pub struct ConsoleWriter {
        level: Level,
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            if self.buf.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.buf);
            let line = JsValue::from_str(line.trim_end());
            match self.level {
                Level::ERROR => web_sys::console::error_1(&line),
                Level::WARN => web_sys::console::warn_1(&line),
                Level::INFO => web_sys::console::info_1(&line),
                _ => web_sys::console::debug_1(&line),
            }
        }
    }

    pub struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buf: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buf: Vec::new(),
            }
        }
    }
}


#[cfg(all(test, feature = "web", target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_console_subscriber_installs_once() {
        let config = LogConfig::default();
        // The crate's start hook may already have installed it
        let _ = init_console_tracing(&config);
        tracing::error!("console sink reached");
        assert!(init_console_tracing(&config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_console_rejects_invalid_filter() {
        let config = LogConfig {
            filter: "annota_core=verbose".to_string(),
        };
        assert!(init_console_tracing(&config).is_err());
    }
}
