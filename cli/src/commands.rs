pub mod discover;

use std::time::Duration;

use clap::{ArgAction, Parser};
use flowscan_common::config::{Config, DEFAULT_PORT};

/// Defaults of the command line entry point; the library defaults are tighter.
const CLI_TIMEOUT_MS: u64 = 5_000;
const CLI_MAX_CONCURRENT: usize = 30;

#[derive(Parser)]
#[command(name = "flowscan", version)]
#[command(about = "Finds VMC Helty Flow ventilation units on the local network.")]
pub struct CommandLine {
    /// Subnet to scan, e.g. 192.168.1.0/24. Local subnets are detected when omitted
    pub subnet: Option<String>,

    /// TCP port of the VMC identification service
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Probe timeout in milliseconds
    #[arg(short, long, default_value_t = CLI_TIMEOUT_MS)]
    pub timeout: u64,

    /// Maximum number of probes in flight at once
    #[arg(short, long, default_value_t = CLI_MAX_CONCURRENT)]
    pub concurrency: usize,

    /// Reduce output; repeat for less
    #[arg(short, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            port: self.port,
            probe_timeout: Duration::from_millis(self.timeout),
            max_concurrent: self.concurrency,
            quiet: self.quiet,
            no_banner: self.no_banner,
        }
    }
}
