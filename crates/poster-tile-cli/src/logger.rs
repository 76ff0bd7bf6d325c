use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;

/// Writes timestamped log records to stderr
#[derive(Clone)]
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Map `-v` occurrences to a level: info, then debug, then trace
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Self::new(level)
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S");
        let mut stderr = std::io::stderr().lock();
        let _ = match record.level() {
            Level::Info => writeln!(stderr, "{} {}", timestamp, record.args()),
            level => writeln!(
                stderr,
                "{} {:<5} {}: {}",
                timestamp,
                level,
                record.target(),
                record.args()
            ),
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_verbosity_levels() {
        let quiet = ConsoleLogger::from_verbosity(0);
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        let trace = Metadata::builder().level(Level::Trace).build();
        assert!(quiet.enabled(&info));
        assert!(!quiet.enabled(&debug));

        let verbose = ConsoleLogger::from_verbosity(1);
        assert!(verbose.enabled(&debug));
        assert!(!verbose.enabled(&trace));

        assert!(ConsoleLogger::from_verbosity(5).enabled(&trace));
    }

    #[test]
    fn test_init_installs_logger() {
        ConsoleLogger::new(LevelFilter::Debug).init().unwrap();
        assert_eq!(log::max_level(), LevelFilter::Debug);
        log::debug!("logger installed");
    }
}
