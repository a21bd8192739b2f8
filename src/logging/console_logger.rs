//! Logger writing to the standard streams.

use super::logger::{LogLevel, Logger};

/// Logger for command-line hosts: info lines go to stdout, everything else
/// to stderr, each line tagged with its severity.
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

fn format_line(level: LogLevel, msg: &str) -> String {
    format!("[depprop:{}] {}", level.label(), msg)
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, level: LogLevel, msg: &str) {
        let line = format_line(level, msg);
        match level {
            LogLevel::Info => println!("{}", line),
            _ => eprintln!("{}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_the_severity_tag() {
        assert_eq!(
            format_line(LogLevel::Warn, "candidate rejected"),
            "[depprop:warn] candidate rejected"
        );
        assert_eq!(format_line(LogLevel::Info, "done"), "[depprop:info] done");
    }

    #[test]
    fn threshold_filters_lower_severities() {
        let logger = ConsoleLogger::new(LogLevel::Warn);
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(!logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
        assert!(logger.enabled(LogLevel::Error));
    }
}
