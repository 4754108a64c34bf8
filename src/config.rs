//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "stopwatch-deck")]
#[command(about = "Run several stopwatches side by side behind a small HTTP API")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Sampling and display flush period in milliseconds
    #[arg(short = 't', long, default_value = "33", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Number of stopwatches at startup, including the default one
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..=64))]
    pub timers: u64,

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

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn initial_timers(&self) -> usize {
        self.timers as usize
    }
}
