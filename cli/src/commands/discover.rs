use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::*;
use tracing::{Instrument, info_span};

use crate::{mprint, terminal::{colors, format, print, spinner::SubnetProgress}};
use flowscan_common::config::Config;
use flowscan_common::network::subnet::Subnet;
use flowscan_common::{info, success};
use flowscan_core::discovery::{DiscoveryReport, DiscoveryService};

/// Parses the optional explicit subnet, runs the discovery and prints the report.
///
/// An invalid subnet fails the whole run; finding nothing does not.
pub async fn discover(target: Option<&str>, cfg: &Config) -> anyhow::Result<()> {
    let subnets: Option<Vec<Subnet>> = target
        .map(|cidr| {
            cidr.parse::<Subnet>()
                .with_context(|| format!("cannot scan '{cidr}'"))
        })
        .transpose()?
        .map(|subnet| vec![subnet]);

    print::header("getting ready for discovery", cfg.quiet);
    info!(
        "Looking for VMC devices on TCP port {} ({} probes at a time, {}ms timeout)",
        cfg.port,
        cfg.batch_width(),
        cfg.probe_timeout.as_millis()
    );

    let service = DiscoveryService::from_config(cfg, Arc::new(SubnetProgress::default()));
    let report: DiscoveryReport = service
        .perform_discovery(subnets)
        .instrument(info_span!("discovery"))
        .await;

    discovery_ends(&report, cfg);
    Ok(())
}

fn discovery_ends(report: &DiscoveryReport, cfg: &Config) {
    if report.is_empty() {
        no_devices_found(report, cfg);
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header("VMC Discovery", cfg.quiet);
    print_devices(report, cfg);
    print_summary(report, cfg);
}

fn no_devices_found(report: &DiscoveryReport, cfg: &Config) {
    print::header("no devices detected", cfg.quiet);
    print_summary(report, cfg);
    mprint!();
    print::troubleshooting_tips();
}

fn print_devices(report: &DiscoveryReport, cfg: &Config) {
    for (idx, device) in report.devices.iter().enumerate() {
        match cfg.quiet {
            2 => {}
            _ => {
                print::tree_head(idx, &device.name);
                print::as_tree_one_level(format::device_to_details(device, cfg.quiet == 0));
            }
        }
        if cfg.quiet < 2 && idx + 1 != report.devices.len() {
            mprint!();
        }
    }
}

fn print_summary(report: &DiscoveryReport, cfg: &Config) {
    let found: ColoredString = format!("{} VMC devices", report.devices.len()).bold().green();
    let total_time: ColoredString = seconds(report.elapsed).bold().yellow();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::set_key_width(&["Total devices found", "Scan duration", "Networks scanned"]);
            print::aligned_line("Total devices found", report.devices.len().to_string());
            print::aligned_line("Scan duration", seconds(report.elapsed));
            print::aligned_line("Networks scanned", report.subnets.len().to_string());
            for summary in &report.subnets {
                print::print_status(format!(
                    "{} {} found in {}",
                    summary.subnet.to_string().color(colors::PRIMARY),
                    summary.found.to_string().color(colors::ACCENT),
                    seconds(summary.elapsed)
                ));
            }
            print::fat_separator();
            let output: String = format!("Discovery Complete: {found} identified in {total_time}");
            print::centerln(&output);
        }
        _ => {
            success!("Discovery Complete: {found} identified in {total_time}");
        }
    }
}

fn seconds(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}
