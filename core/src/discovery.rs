//! # Network Discovery Service
//!
//! Implements the "find every VMC unit" use case.
//!
//! The service resolves which subnets to scan, then walks them strictly in order,
//! handing each subnet's 254 hosts to the [`BatchScanner`]. Devices are threaded back
//! through return values and aggregated into a [`DiscoveryReport`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use flowscan_common::config::Config;
use flowscan_common::network::device::DeviceRecord;
use flowscan_common::network::interface;
use flowscan_common::network::subnet::Subnet;
use flowscan_common::info;

use crate::network::tcp::TcpProber;
use crate::scanner::{BatchProgress, BatchScanner, Prober};

/// Hooks for surfacing scan progress. Every method defaults to doing nothing.
pub trait DiscoveryObserver: Send + Sync {
    fn subnet_started(&self, _subnet: &Subnet, _batches: usize) {}
    fn batch_finished(&self, _subnet: &Subnet, _progress: &BatchProgress) {}
    fn subnet_finished(&self, _summary: &SubnetSummary) {}
}

pub struct SilentObserver;

impl DiscoveryObserver for SilentObserver {}

#[derive(Debug, Clone, PartialEq)]
pub struct SubnetSummary {
    pub subnet: Subnet,
    pub found: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    /// All devices, grouped by subnet in scan order.
    pub devices: Vec<DeviceRecord>,
    pub subnets: Vec<SubnetSummary>,
    pub elapsed: Duration,
}

impl DiscoveryReport {
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Devices found inside `subnet`.
    pub fn devices_in<'a>(&'a self, subnet: &'a Subnet) -> impl Iterator<Item = &'a DeviceRecord> {
        self.devices.iter().filter(move |d| subnet.contains(d.ip))
    }
}

pub struct DiscoveryService {
    scanner: BatchScanner,
    observer: Arc<dyn DiscoveryObserver>,
}

impl DiscoveryService {
    pub fn new(scanner: BatchScanner, observer: Arc<dyn DiscoveryObserver>) -> Self {
        Self { scanner, observer }
    }

    /// VMGN-over-TCP probing with the knobs from `cfg`.
    pub fn from_config(cfg: &Config, observer: Arc<dyn DiscoveryObserver>) -> Self {
        let prober: Arc<dyn Prober> = Arc::new(TcpProber::from_config(cfg));
        Self::new(BatchScanner::new(prober, cfg.batch_width()), observer)
    }

    /// Scans `subnets`, or the locally detected ones when `None`.
    pub async fn perform_discovery(&self, subnets: Option<Vec<Subnet>>) -> DiscoveryReport {
        let started = Instant::now();
        let subnets: Vec<Subnet> = interface::resolve_subnets(subnets);

        let mut devices: Vec<DeviceRecord> = Vec::new();
        let mut summaries: Vec<SubnetSummary> = Vec::with_capacity(subnets.len());

        for subnet in subnets {
            let subnet_started = Instant::now();
            let found: Vec<DeviceRecord> = self.scan_subnet(&subnet).await;
            let summary = SubnetSummary {
                subnet,
                found: found.len(),
                elapsed: subnet_started.elapsed(),
            };
            self.observer.subnet_finished(&summary);

            devices.extend(found);
            summaries.push(summary);
        }

        info!(
            "Discovery finished: {} device(s) across {} subnet(s)",
            devices.len(),
            summaries.len()
        );

        DiscoveryReport {
            devices,
            subnets: summaries,
            elapsed: started.elapsed(),
        }
    }

    async fn scan_subnet(&self, subnet: &Subnet) -> Vec<DeviceRecord> {
        let hosts = subnet.hosts();
        let batches = self.scanner.batch_count(hosts.len());
        info!(
            "Scanning {subnet}: {} hosts in {batches} batch(es) of {}",
            hosts.len(),
            self.scanner.max_concurrent()
        );
        self.observer.subnet_started(subnet, batches);

        self.scanner
            .scan(&hosts, |progress| self.observer.batch_finished(subnet, &progress))
            .await
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
