use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(3_000);
pub const DEFAULT_MAX_CONCURRENT: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the VMC identification service listens on.
    pub port: u16,
    /// Deadline for one whole probe: connect, query and reply.
    pub probe_timeout: Duration,
    /// Width of a scan batch, i.e. the number of probes in flight at once.
    pub max_concurrent: usize,
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            quiet: 0,
            no_banner: false,
        }
    }
}

impl Config {
    /// Batch width, never lower than one.
    pub fn batch_width(&self) -> usize {
        self.max_concurrent.max(1)
    }
}
