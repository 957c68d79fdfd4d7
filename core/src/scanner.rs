//! The bounded fan-out that drives a [`Prober`] across a host list.
//!
//! Hosts are cut into consecutive batches of `max_concurrent` addresses. A batch is
//! probed fully in parallel and must settle before the next one starts, so never more
//! than `max_concurrent` connections are open at a time.
//!
//! Probers own their failure handling: [`Prober::probe`] answers "no device" with
//! `None` and never errors, which keeps one bad host from aborting a scan.

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;
use flowscan_common::error;
use flowscan_common::network::device::DeviceRecord;
use tokio::task::JoinSet;

/// Tests a single host for a VMC unit.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr) -> Option<DeviceRecord>;
}

/// Progress after a batch has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// One-based index of the batch that just settled.
    pub batch: usize,
    pub batches: usize,
    /// Hosts probed so far, this batch included.
    pub probed: usize,
    /// Devices found so far, this batch included.
    pub found: usize,
}

impl BatchProgress {
    pub fn percent(&self) -> usize {
        match self.batches {
            0 => 100,
            total => self.batch * 100 / total,
        }
    }
}

pub struct BatchScanner {
    prober: Arc<dyn Prober>,
    max_concurrent: usize,
}

impl BatchScanner {
    pub fn new(prober: Arc<dyn Prober>, max_concurrent: usize) -> Self {
        Self {
            prober,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Number of sequential batches needed for `hosts` hosts.
    pub fn batch_count(&self, hosts: usize) -> usize {
        hosts.div_ceil(self.max_concurrent)
    }

    /// Probes every host and returns the devices that answered.
    ///
    /// Within a batch, records appear in completion order; batches keep their order.
    pub async fn scan<F>(&self, hosts: &[Ipv4Addr], mut on_batch: F) -> Vec<DeviceRecord>
    where
        F: FnMut(BatchProgress),
    {
        let batches: usize = self.batch_count(hosts.len());
        let mut devices: Vec<DeviceRecord> = Vec::new();
        let mut probed: usize = 0;

        for (idx, batch) in hosts.chunks(self.max_concurrent).enumerate() {
            let mut in_flight: JoinSet<Option<DeviceRecord>> = JoinSet::new();

            for &addr in batch {
                let prober = Arc::clone(&self.prober);
                in_flight.spawn(async move { prober.probe(addr).await });
            }

            while let Some(settled) = in_flight.join_next().await {
                match settled {
                    Ok(Some(device)) => devices.push(device),
                    Ok(None) => {}
                    Err(e) => error!("Probe task failed: {e}"),
                }
            }

            probed += batch.len();
            on_batch(BatchProgress {
                batch: idx + 1,
                batches,
                probed,
                found: devices.len(),
            });
        }

        devices
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
