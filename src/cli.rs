use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{parse_log_level, Options};

/// Display text motus (lingo) style
#[derive(Parser, Debug)]
#[command(name = "motus")]
#[command(version)]
#[command(about = "Display text motus (lingo) style, with sound", long_about = None)]
pub struct Cli {
    /// Configuration directory path
    #[arg(short, long, visible_alias = "config-dir", value_name = "CONFIGDIR", global = true)]
    pub configdir: Option<String>,

    /// Log level (off, error, warn, info, debug, all)
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display the input txt, lingo style
    Display(DisplayArgs),
    /// Display the 40-byte hexadecimal name of the last git commit object
    Version,
}

#[derive(Args, Debug, Default)]
pub struct DisplayArgs {
    /// Input text
    #[arg(short, long)]
    pub txt: String,

    /// Number of characters correctly placed
    #[arg(
        short = 'o',
        long = "okCount",
        visible_alias = "ok-count",
        allow_negative_numbers = true
    )]
    pub ok_count: i64,

    /// Number of characters correct but not at their right place
    #[arg(
        short = 'a',
        long = "amissCount",
        visible_alias = "amiss-count",
        allow_negative_numbers = true
    )]
    pub amiss_count: i64,

    /// Longest wait for one sound, in milliseconds
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Pause between characters, in milliseconds
    #[arg(long = "delay-ms", value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Directory holding ok, oop and ko clips
    #[arg(long = "sound-dir", value_name = "DIR")]
    pub sound_dir: Option<String>,

    /// Disable sound
    #[arg(short, long)]
    pub mute: bool,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref level) = self.log_level {
            opts.log_level = parse_log_level(level)?;
        }

        if let Command::Display(ref args) = self.command {
            if let Some(ms) = args.timeout_ms {
                opts.timeout = Duration::from_millis(ms);
            }
            if let Some(ms) = args.delay_ms {
                opts.char_delay = Duration::from_millis(ms);
            }
            if let Some(ref dir) = args.sound_dir {
                opts.sound_dir = PathBuf::from(dir);
            }
            if args.mute {
                opts.muted = true;
            }
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    #[test]
    fn test_parse_display() {
        let cli = Cli::try_parse_from([
            "motus", "display", "-t", "motus", "--okCount", "2", "--amissCount", "1",
        ])
        .unwrap();

        match cli.command {
            Command::Display(args) => {
                assert_eq!(args.txt, "motus");
                assert_eq!(args.ok_count, 2);
                assert_eq!(args.amiss_count, 1);
                assert!(!args.mute);
            }
            Command::Version => panic!("expected display"),
        }
    }

    #[test]
    fn test_parse_negative_counts() {
        let cli = Cli::try_parse_from(["motus", "display", "-t", "cat", "-o", "-1", "-a", "-2"])
            .unwrap();
        match cli.command {
            Command::Display(args) => {
                assert_eq!(args.ok_count, -1);
                assert_eq!(args.amiss_count, -2);
            }
            Command::Version => panic!("expected display"),
        }
    }

    #[test]
    fn test_display_requires_txt() {
        assert!(Cli::try_parse_from(["motus", "display", "-o", "1", "-a", "0"]).is_err());
    }

    #[test]
    fn test_parse_version() {
        let cli = Cli::try_parse_from(["motus", "version"]).unwrap();
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn test_merge_display_options() {
        let cli = Cli::try_parse_from([
            "motus",
            "--log-level",
            "debug",
            "display",
            "-t",
            "abc",
            "-o",
            "1",
            "-a",
            "1",
            "--timeout-ms",
            "200",
            "--delay-ms",
            "0",
            "--sound-dir",
            "/tmp/sounds",
            "--mute",
        ])
        .unwrap();

        let opts = cli.merge_into_options(Options::default()).unwrap();
        assert_eq!(opts.timeout, Duration::from_millis(200));
        assert_eq!(opts.char_delay, Duration::ZERO);
        assert_eq!(opts.sound_dir, PathBuf::from("/tmp/sounds"));
        assert!(opts.muted);
        assert_eq!(opts.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_merge_keeps_config_values() {
        let cli = Cli::try_parse_from(["motus", "display", "-t", "abc", "-o", "0", "-a", "0"])
            .unwrap();
        let base = Options {
            muted: true,
            timeout: Duration::from_millis(42),
            ..Options::default()
        };
        let opts = cli.merge_into_options(base.clone()).unwrap();
        assert_eq!(opts, base);
    }

    #[test]
    fn test_invalid_log_level() {
        let cli = Cli::try_parse_from(["motus", "--log-level", "loud", "version"]).unwrap();
        assert!(cli.merge_into_options(Options::default()).is_err());
    }

    #[test]
    fn test_parse_kebab_case_flags() {
        let cli = Cli::try_parse_from([
            "motus",
            "--config-dir",
            "/tmp",
            "display",
            "--txt",
            "abc",
            "--ok-count",
            "1",
            "--amiss-count",
            "0",
        ])
        .unwrap();

        assert_eq!(cli.configdir.as_deref(), Some("/tmp"));
        match cli.command {
            Command::Display(args) => {
                assert_eq!(args.txt, "abc");
                assert_eq!(args.ok_count, 1);
                assert_eq!(args.amiss_count, 0);
            }
            Command::Version => panic!("expected display"),
        }
    }

    #[test]
    fn test_config_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["motus", "version", "--configdir", "/etc/motus"]).unwrap();
        assert_eq!(cli.configdir.as_deref(), Some("/etc/motus"));
    }
}
