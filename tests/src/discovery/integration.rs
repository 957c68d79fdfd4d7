//! End-to-end discovery against fake units bound on `127.0.0.0/24`.
//!
//! Linux routes the whole `127/8` block to loopback, so every host of the subnet is
//! reachable and all but the fake units refuse the connection straight away.
#![cfg(target_os = "linux")]

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use flowscan_common::config::Config;
use flowscan_common::network::device::DeviceModel;
use flowscan_common::network::subnet::{Subnet, SubnetError};
use flowscan_core::discovery::{DiscoveryService, SilentObserver};
use flowscan_core::network::tcp::TcpProber;
use flowscan_core::scanner::{BatchScanner, Prober};

use crate::utils::{Behaviour, FakeUnit};

fn loopback_subnet() -> Subnet {
    "127.0.0.0/24".parse().unwrap()
}

fn config(port: u16, max_concurrent: usize, timeout: Duration) -> Config {
    Config {
        port,
        probe_timeout: timeout,
        max_concurrent,
        ..Config::default()
    }
}

#[tokio::test]
async fn discovery_single_base_unit() {
    let unit = FakeUnit::spawn(Ipv4Addr::new(127, 0, 0, 5), 0, Behaviour::Reply("VMGN,UnitA,2.0\n"))
        .await
        .unwrap();

    let cfg = config(unit.port(), 10, Duration::from_secs(2));
    let service = DiscoveryService::from_config(&cfg, Arc::new(SilentObserver));
    let report = service.perform_discovery(Some(vec![loopback_subnet()])).await;

    assert_eq!(report.devices.len(), 1, "devices: {:?}", report.devices);
    let device = &report.devices[0];
    assert_eq!(device.ip.to_string(), "127.0.0.5");
    assert_eq!(device.model, DeviceModel::Base);
    assert_eq!(device.name, "UnitA");
    assert_eq!(device.firmware, "2.0");
    assert_eq!(device.raw_response, "VMGN,UnitA,2.0");

    assert_eq!(report.subnets.len(), 1);
    assert_eq!(report.subnets[0].found, 1);
    assert_eq!(unit.queries(), 1);
}

#[tokio::test]
async fn discovery_classifies_mixed_units() {
    let base = FakeUnit::spawn(Ipv4Addr::new(127, 0, 0, 9), 0, Behaviour::Reply("VMGN,Cucina,1.4\r\n"))
        .await
        .unwrap();
    let elite = FakeUnit::spawn(
        Ipv4Addr::new(127, 0, 0, 200),
        base.port(),
        Behaviour::Reply("VMGN,Soggiorno,2.1.0,A,B,C\n"),
    )
    .await
    .unwrap();

    let cfg = config(base.port(), 50, Duration::from_secs(2));
    let service = DiscoveryService::from_config(&cfg, Arc::new(SilentObserver));
    let mut devices = service.perform_discovery(Some(vec![loopback_subnet()])).await.devices;
    devices.sort_by_key(|d| d.ip);

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].name, "Cucina");
    assert_eq!(devices[0].firmware, "1.4");
    assert_eq!(devices[0].model, DeviceModel::Base);
    assert!(!devices[0].capabilities.co2_sensor);

    assert_eq!(devices[1].name, "Soggiorno");
    assert_eq!(devices[1].model, DeviceModel::Elite);
    assert!(devices[1].capabilities.voc_sensor);
    assert_eq!(elite.queries(), 1);
}

#[tokio::test]
async fn mute_and_garbled_hosts_are_not_devices() {
    let mute = FakeUnit::spawn(Ipv4Addr::new(127, 0, 0, 20), 0, Behaviour::Mute)
        .await
        .unwrap();
    let _garbled = FakeUnit::spawn(
        Ipv4Addr::new(127, 0, 0, 21),
        mute.port(),
        Behaviour::Reply("ERR VMGN,unknown command\n"),
    )
    .await
    .unwrap();
    let _real = FakeUnit::spawn(
        Ipv4Addr::new(127, 0, 0, 22),
        mute.port(),
        Behaviour::Reply("VMGN,Studio,3.0\n"),
    )
    .await
    .unwrap();

    let timeout = Duration::from_millis(300);
    let cfg = config(mute.port(), 64, timeout);
    let service = DiscoveryService::from_config(&cfg, Arc::new(SilentObserver));

    let started = Instant::now();
    let report = service.perform_discovery(Some(vec![loopback_subnet()])).await;

    assert_eq!(report.devices.len(), 1);
    assert_eq!(report.devices[0].name, "Studio");
    assert_eq!(mute.queries(), 1);
    // Four batches; only the one holding the mute host waits for the deadline.
    assert!(started.elapsed() < Duration::from_secs(3), "took {:?}", started.elapsed());
}

#[tokio::test]
async fn result_count_never_exceeds_answering_hosts() {
    let unit = FakeUnit::spawn(Ipv4Addr::new(127, 0, 0, 77), 0, Behaviour::Reply("VMGN,Solo,1.0\n"))
        .await
        .unwrap();

    let prober: Arc<dyn Prober> = Arc::new(TcpProber::new(unit.port(), Duration::from_secs(1)));
    let scanner = BatchScanner::new(prober, 7);
    let hosts = loopback_subnet().hosts();

    let mut batches = 0;
    let devices = scanner.scan(&hosts, |_| batches += 1).await;

    assert_eq!(batches, hosts.len().div_ceil(7));
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip, Ipv4Addr::new(127, 0, 0, 77));
}

#[test]
fn explicit_subnet_must_be_a_slash_24() {
    let err = "10.0.0.0/16".parse::<Subnet>().unwrap_err();
    assert_eq!(
        err,
        SubnetError::UnsupportedPrefix {
            cidr: "10.0.0.0/16".to_string(),
            prefix: 16
        }
    );
}
