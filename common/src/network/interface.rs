//! Local subnet detection.
//!
//! VMC units sit on home networks, so only interface addresses inside
//! `192.168.0.0/16` are considered. Each match contributes its containing `/24`.

use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

use crate::network::subnet::Subnet;
use crate::{debug, info, warn};

const HOME_NETWORK_PREFIX: [u8; 2] = [192, 168];

/// Scanned when no interface yields a home subnet.
pub const FALLBACK_SUBNETS: [Ipv4Addr; 2] = [
    Ipv4Addr::new(192, 168, 1, 0),
    Ipv4Addr::new(192, 168, 0, 0),
];

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Rejection {
    /// The address belongs to IPv6.
    NotIpv4,
    /// The interface or address is loopback.
    Loopback,
    /// The address lies outside `192.168.0.0/16`.
    NotHomeNetwork,
}

/// Returns `explicit` untouched when given, otherwise the detected home subnets.
pub fn resolve_subnets(explicit: Option<Vec<Subnet>>) -> Vec<Subnet> {
    match explicit {
        Some(subnets) => subnets,
        None => detect_home_subnets(),
    }
}

/// Inspects the host's interfaces. Never fails: falls back to [`FALLBACK_SUBNETS`].
pub fn detect_home_subnets() -> Vec<Subnet> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    debug!("Inspecting {} network interface(s)", interfaces.len());
    subnets_or_fallback(&interfaces)
}

pub fn subnets_or_fallback(interfaces: &[NetworkInterface]) -> Vec<Subnet> {
    let subnets: Vec<Subnet> = home_subnets(interfaces);
    if subnets.is_empty() {
        warn!("No home network interface found, falling back to common subnets");
        return fallback_subnets();
    }
    info!(
        "Detected {} local subnet(s): {}",
        subnets.len(),
        subnets
            .iter()
            .map(Subnet::to_string)
            .collect::<Vec<String>>()
            .join(", ")
    );
    subnets
}

/// Home `/24`s in interface order, deduplicated. Empty when nothing qualifies.
pub fn home_subnets(interfaces: &[NetworkInterface]) -> Vec<Subnet> {
    let mut subnets: Vec<Subnet> = Vec::new();

    for interface in interfaces {
        for net in &interface.ips {
            match assess(interface, net) {
                Ok(addr) => {
                    let subnet = Subnet::containing(addr);
                    if !subnets.contains(&subnet) {
                        subnets.push(subnet);
                    }
                }
                Err(reason) => {
                    debug!("Skipping {} on {}: {:?}", net.ip(), interface.name, reason);
                }
            }
        }
    }

    subnets
}

pub fn fallback_subnets() -> Vec<Subnet> {
    FALLBACK_SUBNETS.iter().copied().map(Subnet::containing).collect()
}

fn assess(interface: &NetworkInterface, net: &IpNetwork) -> Result<Ipv4Addr, Rejection> {
    let addr: Ipv4Addr = match net {
        IpNetwork::V4(v4) => v4.ip(),
        IpNetwork::V6(_) => return Err(Rejection::NotIpv4),
    };
    if interface.is_loopback() || addr.is_loopback() {
        return Err(Rejection::Loopback);
    }
    if addr.octets()[..2] != HOME_NETWORK_PREFIX {
        return Err(Rejection::NotHomeNetwork);
    }
    Ok(addr)
}
