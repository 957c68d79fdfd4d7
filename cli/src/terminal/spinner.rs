use std::io::Write;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use colored::*;
use flowscan_common::network::subnet::Subnet;
use flowscan_common::{info, success};
use flowscan_core::discovery::{DiscoveryObserver, SubnetSummary};
use flowscan_core::scanner::BatchProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

static PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

/// Sets up the shared draw target. Bars are hidden entirely at `-qq`.
pub fn init(quiet: u8) {
    PROGRESS.get_or_init(|| match quiet {
        0 | 1 => MultiProgress::new(),
        _ => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
    });
}

fn progress() -> &'static MultiProgress {
    PROGRESS.get_or_init(MultiProgress::new)
}

fn batch_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {prefix:.bold} [{bar:24.green/white.dim}] {pos}/{len} batches {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
        .progress_chars("━╸ ")
}

/// Drives one progress bar per subnet while the discovery runs.
#[derive(Default)]
pub struct SubnetProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl SubnetProgress {
    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl DiscoveryObserver for SubnetProgress {
    fn subnet_started(&self, subnet: &Subnet, batches: usize) {
        let bar = progress().add(ProgressBar::new(batches as u64));
        bar.set_style(batch_style());
        bar.set_prefix(subnet.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);

        if let Ok(mut slot) = self.bar.lock()
            && let Some(previous) = slot.replace(bar)
        {
            previous.finish_and_clear();
        }
    }

    fn batch_finished(&self, _subnet: &Subnet, batch: &BatchProgress) {
        self.with_bar(|bar| {
            bar.set_position(batch.batch as u64);
            bar.set_message(format!(
                "{}% · {} found",
                batch.percent(),
                batch.found.to_string().green().bold()
            ));
        });
    }

    fn subnet_finished(&self, summary: &SubnetSummary) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(bar) = slot.take()
        {
            bar.finish_and_clear();
        }

        match summary.found {
            0 => info!("No VMC devices found in {}", summary.subnet),
            n => success!(
                "Found {n} VMC device(s) in {} ({:.2}s)",
                summary.subnet,
                summary.elapsed.as_secs_f64()
            ),
        }
    }
}

/// Log sink that keeps progress bars intact.
pub struct ProgressWriter;

impl std::io::Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        progress().suspend(|| std::io::stdout().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}
