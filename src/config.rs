use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::logging::LogLevel;
use crate::reveal::DEFAULT_CHAR_DELAY;

/// Name of the config file looked up in the config directory
pub const CONFIG_FILE: &str = "motus.cfg";

/// Default wait for a single cue
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Options that can be set via CLI or config file
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Longest wait for one cue before sound is disabled
    pub timeout: Duration,
    /// Pause between revealed characters
    pub char_delay: Duration,
    /// Directory holding ok/oop/ko clips
    pub sound_dir: PathBuf,
    /// Clip file extension
    pub sound_ext: String,
    pub muted: bool,
    pub log_level: LogLevel,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            char_delay: DEFAULT_CHAR_DELAY,
            sound_dir: PathBuf::from("resources"),
            sound_ext: "mp3".to_string(),
            muted: false,
            log_level: LogLevel::Info,
        }
    }
}

/// Load `motus.cfg` from `config_dir`, falling back to defaults when there
/// is no directory or no file.
pub fn load_config(config_dir: &Option<String>) -> Result<Options> {
    let mut opts = Options::default();

    let Some(dir) = config_dir else {
        return Ok(opts);
    };

    let path = Path::new(dir).join(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(opts);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    apply_config(&data, &mut opts)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    Ok(opts)
}

/// Apply `key = value` lines to `opts`. `#` starts a comment.
pub fn apply_config(data: &str, opts: &mut Options) -> Result<()> {
    for (lineno, raw) in data.lines().enumerate() {
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();

        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            tracing::warn!("Key without value on line {}", lineno + 1);
            continue;
        };
        let (key, value) = (key.trim(), value.trim());

        match key {
            "timeout_ms" => opts.timeout = parse_millis(value).context("timeout_ms")?,
            "delay_ms" => opts.char_delay = parse_millis(value).context("delay_ms")?,
            "sound_dir" => opts.sound_dir = PathBuf::from(value),
            "sound_ext" => opts.sound_ext = value.trim_start_matches('.').to_string(),
            "muted" => opts.muted = parse_bool(value).context("muted")?,
            "log_level" => opts.log_level = parse_log_level(value)?,
            _ => tracing::warn!("Unknown config key '{}' on line {}", key, lineno + 1),
        }
    }
    Ok(())
}

/// Parse a millisecond count
pub fn parse_millis(s: &str) -> Result<Duration> {
    let ms: u64 = s.trim().parse().context("Invalid millisecond value")?;
    Ok(Duration::from_millis(ms))
}

pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => anyhow::bail!("Invalid boolean: {}", s),
    }
}

pub fn parse_log_level(s: &str) -> Result<LogLevel> {
    LogLevel::parse(s).with_context(|| {
        format!(
            "Invalid log level: {}. Valid options: off, error, warn, info, debug, all",
            s
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_options_default() {
        let opts = Options::default();
        assert_eq!(opts.timeout, Duration::from_millis(1000));
        assert_eq!(opts.char_delay, Duration::from_millis(50));
        assert_eq!(opts.sound_dir, PathBuf::from("resources"));
        assert_eq!(opts.sound_ext, "mp3");
        assert!(!opts.muted);
        assert_eq!(opts.log_level, LogLevel::Info);
    }

    #[test]
    fn test_apply_config() {
        let mut opts = Options::default();
        let data = "\
# motus settings
timeout_ms = 250
delay_ms=10   # faster
sound_dir = /opt/motus/sounds
sound_ext = .ogg
muted = yes
log_level = debug
";
        apply_config(data, &mut opts).unwrap();
        assert_eq!(opts.timeout, Duration::from_millis(250));
        assert_eq!(opts.char_delay, Duration::from_millis(10));
        assert_eq!(opts.sound_dir, PathBuf::from("/opt/motus/sounds"));
        assert_eq!(opts.sound_ext, "ogg");
        assert!(opts.muted);
        assert_eq!(opts.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_apply_config_skips_unknown_and_bare_keys() {
        let mut opts = Options::default();
        apply_config("colour = red\nbare\n", &mut opts).unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn test_apply_config_invalid_values() {
        let mut opts = Options::default();
        assert!(apply_config("timeout_ms = soon", &mut opts).is_err());
        assert!(apply_config("muted = maybe", &mut opts).is_err());
        assert!(apply_config("log_level = loud", &mut opts).is_err());
    }

    #[test]
    fn test_parse_millis() {
        assert_eq!(parse_millis("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_millis(" 75 ").unwrap(), Duration::from_millis(75));
        assert!(parse_millis("-5").is_err());
    }

    #[test]
    fn test_load_config_without_dir() {
        assert_eq!(load_config(&None).unwrap(), Options::default());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = TempDir::new().unwrap();
        let opts = load_config(&Some(dir.path().display().to_string())).unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "timeout_ms = 300\nmuted = true\n").unwrap();

        let opts = load_config(&Some(dir.path().display().to_string())).unwrap();
        assert_eq!(opts.timeout, Duration::from_millis(300));
        assert!(opts.muted);
    }
}
