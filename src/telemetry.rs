//! Operational logging port.
//!
//! The engine never constructs its own logger; it receives an `Arc<dyn OpsLog>`
//! at construction and reports business rejections and store faults through it.
//! `TracingLog` is the production implementation, forwarding to `tracing` with
//! process identity fields attached.

use uuid::Uuid;

/// Capture the current source location as a `&'static str` (`file:line`),
/// for the `source` argument of [`OpsLog`] methods.
#[macro_export]
macro_rules! loc {
    () => {
        concat!(file!(), ":", line!())
    };
}

/// Injected logging capability.
pub trait OpsLog: Send + Sync {
    fn info(&self, message: &str, source: &'static str);
    fn warning(&self, message: &str, source: &'static str);
    fn error(&self, message: &str, source: &'static str);
    fn fatal(&self, message: &str, source: &'static str);
}

/// [`OpsLog`] backed by the `tracing` subscriber.
pub struct TracingLog {
    app: &'static str,
    version: &'static str,
    instance: Uuid,
}

impl TracingLog {
    pub fn new(app: &'static str) -> Self {
        Self {
            app,
            version: env!("CARGO_PKG_VERSION"),
            instance: Uuid::new_v4(),
        }
    }
}

impl OpsLog for TracingLog {
    fn info(&self, message: &str, source: &'static str) {
        tracing::info!(
            app = self.app,
            version = self.version,
            instance = %self.instance,
            source,
            "{message}"
        );
    }

    fn warning(&self, message: &str, source: &'static str) {
        tracing::warn!(
            app = self.app,
            version = self.version,
            instance = %self.instance,
            source,
            "{message}"
        );
    }

    fn error(&self, message: &str, source: &'static str) {
        tracing::error!(
            app = self.app,
            version = self.version,
            instance = %self.instance,
            source,
            "{message}"
        );
    }

    fn fatal(&self, message: &str, source: &'static str) {
        tracing::error!(
            app = self.app,
            version = self.version,
            instance = %self.instance,
            source,
            fatal = true,
            "{message}"
        );
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::OpsLog;
    use std::sync::Mutex;

    /// Collects log lines for assertions.
    #[derive(Default)]
    pub struct CapturedLog {
        pub lines: Mutex<Vec<(String, String)>>,
    }

    impl CapturedLog {
        fn push(&self, level: &str, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push((level.to_string(), message.to_string()));
        }
    }

    impl OpsLog for CapturedLog {
        fn info(&self, message: &str, _source: &'static str) {
            self.push("info", message);
        }
        fn warning(&self, message: &str, _source: &'static str) {
            self.push("warning", message);
        }
        fn error(&self, message: &str, _source: &'static str) {
            self.push("error", message);
        }
        fn fatal(&self, message: &str, _source: &'static str) {
            self.push("fatal", message);
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn loc_macro_yields_file_and_line() {
        let source: &'static str = loc!();
        assert!(source.starts_with("src/telemetry.rs:"));
    }
}
