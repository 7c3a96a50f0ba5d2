use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Log verbosity, from silent to everything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Nothing = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
    All = 5,
}

impl LogLevel {
    /// Create a LogLevel from an integer
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Nothing,
            1 => LogLevel::Error,
            2 => LogLevel::Warning,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::All,
            _ => LogLevel::Info,
        }
    }

    /// Parse a level name or number
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(n) = s.trim().parse::<i32>() {
            return Some(Self::from_i32(n));
        }
        match s.trim().to_lowercase().as_str() {
            "off" | "nothing" | "none" => Some(LogLevel::Nothing),
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "all" | "trace" => Some(LogLevel::All),
            _ => None,
        }
    }

    pub fn as_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Nothing => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::All => LevelFilter::TRACE,
        }
    }
}

/// fmt subscriber writing to `writer`.
///
/// `level` is the default directive; `RUST_LOG` refines it when set.
pub fn build_subscriber<W>(level: LogLevel, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::builder()
        .with_default_directive(level.as_filter().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .with_ansi(false)
        .finish()
}

/// Install the stderr subscriber globally.
///
/// Returns false if a global subscriber was installed first.
pub fn init(level: LogLevel) -> bool {
    tracing::subscriber::set_global_default(build_subscriber(level, std::io::stderr)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_log_level_from_i32() {
        assert_eq!(LogLevel::from_i32(0), LogLevel::Nothing);
        assert_eq!(LogLevel::from_i32(1), LogLevel::Error);
        assert_eq!(LogLevel::from_i32(2), LogLevel::Warning);
        assert_eq!(LogLevel::from_i32(3), LogLevel::Info);
        assert_eq!(LogLevel::from_i32(4), LogLevel::Debug);
        assert_eq!(LogLevel::from_i32(5), LogLevel::All);
    }

    #[test]
    fn test_log_level_invalid() {
        // Invalid values should default to Info
        assert_eq!(LogLevel::from_i32(100), LogLevel::Info);
        assert_eq!(LogLevel::from_i32(-1), LogLevel::Info);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse(" off "), Some(LogLevel::Nothing));
        assert_eq!(LogLevel::parse("2"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Nothing.as_filter(), LevelFilter::OFF);
        assert_eq!(LogLevel::Warning.as_filter(), LevelFilter::WARN);
        assert_eq!(LogLevel::All.as_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn test_init_and_log() {
        init(LogLevel::Debug);
        // Whoever installed first keeps the global slot.
        assert!(!init(LogLevel::Info));
        tracing::info!("Info message: {}", 42);
        tracing::warn!("Warning!");
        tracing::debug!("Debug info");
    }

    #[test]
    fn test_subscriber_filters_by_level() {
        let captured = Captured::default();
        let subscriber = build_subscriber(LogLevel::Warning, captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hidden detail");
            tracing::warn!("sound disabled: {}", "timeout");
        });

        let text = captured.text();
        assert!(text.contains("WARN"));
        assert!(text.contains("sound disabled: timeout"));
        assert!(!text.contains("hidden detail"));
    }

    #[test]
    fn test_subscriber_off_is_silent() {
        let captured = Captured::default();
        let subscriber = build_subscriber(LogLevel::Nothing, captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("nobody hears this");
        });

        assert!(captured.text().is_empty());
    }
}
