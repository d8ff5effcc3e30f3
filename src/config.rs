//! Configuration and CLI argument handling

use clap::Parser;

use crate::engine::DurationPolicy;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer controlled over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Duration in seconds to load at startup
    #[arg(short, long, allow_negative_numbers = true)]
    pub duration: Option<i64>,

    /// What a new duration does while the countdown is running
    #[arg(long, value_enum, default_value_t = DurationPolicy::Ignore)]
    pub while_running: DurationPolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["countdown-timer"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.duration, None);
        assert_eq!(config.while_running, DurationPolicy::Ignore);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn policy_and_duration_flags() {
        let config = Config::try_parse_from([
            "countdown-timer",
            "--while-running",
            "stop-first",
            "-d",
            "90",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.while_running, DurationPolicy::StopFirst);
        assert_eq!(config.duration, Some(90));
        assert_eq!(config.log_level(), "debug");
    }
}
