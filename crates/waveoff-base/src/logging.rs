use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// A logger that writes timestamped lines to stdout.
pub struct StdoutLogger {
    max_level: LevelFilter,
}

impl StdoutLogger {
    pub fn new(max_level: LevelFilter) -> Self {
        StdoutLogger { max_level }
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let (level, pad) = level_tag(record.level());
        println!(
            "{} {}{} [{}] {}",
            format_timestamp(),
            level,
            pad,
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

fn level_tag(level: Level) -> (&'static str, &'static str) {
    match level {
        Level::Error => ("ERROR", ""),
        Level::Warn => ("WARN", " "),
        Level::Info => ("INFO", " "),
        Level::Debug => ("DEBUG", ""),
        Level::Trace => ("TRACE", ""),
    }
}

/// Format the current UTC time of day as HH:MM:SS.mmm.
pub fn format_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    let time_of_day = now.as_secs() % 86400;
    let hours = time_of_day / 3600;
    let minutes = (time_of_day % 3600) / 60;
    let seconds = time_of_day % 60;
    let millis = now.subsec_millis();

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Install a `StdoutLogger` as the global logger.
///
/// The max level defaults to Debug in debug builds and Info in release
/// builds. Calling this more than once per process is a silent no-op.
pub fn init_stdout_logger() {
    let max_level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Box::leak gives the &'static reference set_logger needs; this is a
    // one-time init, so the leak is bounded.
    if log::set_logger(Box::leak(Box::new(StdoutLogger::new(max_level)))).is_ok() {
        log::set_max_level(max_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_shape() {
        let ts = format_timestamp();
        // HH:MM:SS.mmm
        assert_eq!(ts.len(), 12);
        assert_eq!(&ts[2..3], ":");
        assert_eq!(&ts[5..6], ":");
        assert_eq!(&ts[8..9], ".");
    }

    #[test]
    fn level_filter_applies() {
        let logger = StdoutLogger::new(LevelFilter::Info);
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }
}
