use pnet::datalink::{MacAddr, NetworkInterface};
use flowscan_common::network::interface;
use flowscan_common::network::subnet::Subnet;
use super::utils::{ni, v4, v6};

fn cidrs(subnets: &[Subnet]) -> Vec<String> {
    subnets.iter().map(Subnet::to_string).collect()
}

/*************************************************************
                  Tests for home subnet detection
**************************************************************/

#[test]
fn home_subnets_follow_interface_order() {
    let interfaces: Vec<NetworkInterface> = iface_all();
    assert_eq!(
        cidrs(&interface::home_subnets(&interfaces)),
        ["192.168.0.0/24", "192.168.1.0/24", "192.168.100.0/24"]
    );
}

#[test]
fn home_subnets_are_deduplicated() {
    let interfaces: Vec<NetworkInterface> = vec![wlan0(), wlan0_alias(), lo()];
    assert_eq!(cidrs(&interface::home_subnets(&interfaces)), ["192.168.1.0/24"]);
}

#[test]
fn no_interfaces_means_fallback() {
    assert_eq!(
        cidrs(&interface::subnets_or_fallback(&[])),
        ["192.168.1.0/24", "192.168.0.0/24"]
    );
}

#[test]
fn loopback_only_means_fallback() {
    let interfaces: Vec<NetworkInterface> = vec![lo()];
    assert!(interface::home_subnets(&interfaces).is_empty());
    assert_eq!(
        interface::subnets_or_fallback(&interfaces),
        interface::fallback_subnets()
    );
}

#[test]
fn private_non_home_ranges_mean_fallback() {
    let interfaces: Vec<NetworkInterface> = vec![lo(), eth1(), tun0(), docker0(), veth1234(), ipv6leakintrf0()];
    assert_eq!(
        cidrs(&interface::subnets_or_fallback(&interfaces)),
        ["192.168.1.0/24", "192.168.0.0/24"]
    );
}

#[test]
fn detected_subnets_replace_fallback() {
    let interfaces: Vec<NetworkInterface> = vec![eth1(), wlan0()];
    assert_eq!(cidrs(&interface::subnets_or_fallback(&interfaces)), ["192.168.1.0/24"]);
}

#[test]
fn explicit_subnets_skip_detection() {
    let explicit: Vec<Subnet> = vec!["10.1.2.0/24".parse().unwrap(), "172.16.5.0/24".parse().unwrap()];
    assert_eq!(interface::resolve_subnets(Some(explicit.clone())), explicit);
}

/*************************************************************
                  Mock interfaces for testing
**************************************************************/

fn iface_all() -> Vec<NetworkInterface> {
    vec![lo(),
         enp9s0(),
         tun0(),
         ipv6leakintrf0(),
         wlan0(),
         eth1(),
         docker0(),
         veth1234(),
         br0()
    ]
}

fn lo() -> NetworkInterface {
    ni(
        "lo",
        1,
        Some(MacAddr::new(0, 0, 0, 0, 0, 0)),
        &[v4(127, 0, 0, 1, 8), v6("::1", 128)],
        65609,
    )
}

fn enp9s0() -> NetworkInterface {
    ni(
        "enp9s0",
        2,
        Some(MacAddr::new(0xa8, 0xa1, 0x59, 0x13, 0x41, 0x46)),
        &[
            v4(192, 168, 0, 32, 24),
            v6("fe80::b3dd:5c39:7c29:48b6", 64),
        ],
        69699,
    )
}

fn tun0() -> NetworkInterface {
    ni(
        "tun0",
        5,
        None,
        &[v4(10, 96, 0, 57, 16), v6("fe80::c137:8964:5a63:efde", 64)],
        69841,
    )
}

fn ipv6leakintrf0() -> NetworkInterface {
    ni(
        "ipv6leakintrf0",
        6,
        Some(MacAddr::new(0xd2, 0x25, 0xd4, 0x9f, 0x18, 0xfd)),
        &[v6("fdeb:446c:912d:8da::", 64)],
        65731,
    )
}

fn wlan0() -> NetworkInterface {
    ni(
        "wlan0",
        3,
        Some(MacAddr::new(0x34, 0xcf, 0xf6, 0x9a, 0x11, 0x22)),
        &[v4(192, 168, 1, 42, 24), v6("fe80::36cf:f6ff:fe9a:1122", 64)],
        69699,
    )
}

/// Second address on the same LAN, e.g. a DHCP lease next to a static one.
fn wlan0_alias() -> NetworkInterface {
    ni(
        "wlan0:1",
        10,
        Some(MacAddr::new(0x34, 0xcf, 0xf6, 0x9a, 0x11, 0x22)),
        &[v4(192, 168, 1, 143, 24)],
        69699,
    )
}

fn eth1() -> NetworkInterface {
    ni(
        "eth1",
        4,
        Some(MacAddr::new(0x52, 0x54, 0x00, 0x12, 0x34, 0x56)),
        &[v4(10, 0, 0, 15, 24)],
        69699,
    )
}

fn docker0() -> NetworkInterface {
    ni(
        "docker0",
        7,
        Some(MacAddr::new(0x02, 0x42, 0xac, 0x11, 0x00, 0x01)),
        &[v4(172, 17, 0, 1, 16)],
        69699,
    )
}

fn veth1234() -> NetworkInterface {
    ni(
        "veth1234",
        8,
        Some(MacAddr::new(0x1a, 0x2b, 0x3c, 0x4d, 0x5e, 0x6f)),
        &[v6("fe80::1a2b:3cff:fe4d:5e6f", 64)],
        69699,
    )
}

fn br0() -> NetworkInterface {
    ni(
        "br0",
        9,
        Some(MacAddr::new(0xde, 0xad, 0xbe, 0xef, 0x00, 0x01)),
        &[v4(192, 168, 100, 1, 24), v6("fd00:dead:beef::1", 64)],
        69699,
    )
}
