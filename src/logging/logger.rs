//! Logging surface.
//!
//! The synthesizer reports run progress and rejected candidates through
//! this trait so host integrations can route the lines into their own
//! sink. [`NullLogger`] is the default for embedded use.

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Sink for the synthesizer's log lines.
///
/// Implementors supply the threshold and the actual write; level filtering
/// and the per-severity helpers are shared.
pub trait Logger {
    fn level(&self) -> LogLevel;

    /// Writes a line that already passed the level filter.
    fn write(&self, level: LogLevel, msg: &str);

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    fn log(&self, level: LogLevel, msg: &str) {
        if self.enabled(level) {
            self.write(level, msg);
        }
    }

    fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.log(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg);
    }
}

/// Logger that drops everything.
#[derive(Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn write(&self, _level: LogLevel, _msg: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
