//! # Subnet Model
//!
//! A [`Subnet`] is an IPv4 `/24` block written as `a.b.c.0/24`. No other prefix
//! length is supported, so every subnet expands to exactly 254 host addresses.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;
use thiserror::Error;

pub const SUPPORTED_PREFIX: u8 = 24;

const FIRST_HOST_OCTET: u8 = 1;
const LAST_HOST_OCTET: u8 = 254;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetError {
    #[error("'{0}' is not an IPv4 CIDR block (expected a.b.c.0/24)")]
    Malformed(String),

    #[error("'{cidr}' has prefix /{prefix}, only /24 subnets are supported")]
    UnsupportedPrefix { cidr: String, prefix: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subnet {
    prefix: [u8; 3],
}

impl Subnet {
    /// The `/24` that contains `addr`.
    pub fn containing(addr: Ipv4Addr) -> Self {
        let [a, b, c, _] = addr.octets();
        Self { prefix: [a, b, c] }
    }

    pub fn network(&self) -> Ipv4Addr {
        let [a, b, c] = self.prefix;
        Ipv4Addr::new(a, b, c, 0)
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        addr.octets()[..3] == self.prefix
    }

    /// Usable host addresses `.1` through `.254`, in ascending order.
    pub fn hosts(&self) -> Vec<Ipv4Addr> {
        let [a, b, c] = self.prefix;
        (FIRST_HOST_OCTET..=LAST_HOST_OCTET)
            .map(|d| Ipv4Addr::new(a, b, c, d))
            .collect()
    }
}

impl FromStr for Subnet {
    type Err = SubnetError;

    /// Parses `a.b.c.d/24`. The host octet is ignored, so `192.168.1.77/24`
    /// names the same subnet as `192.168.1.0/24`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.contains('/') {
            return Err(SubnetError::Malformed(s.to_string()));
        }

        let network: Ipv4Network = trimmed
            .parse()
            .map_err(|_| SubnetError::Malformed(s.to_string()))?;

        if network.prefix() != SUPPORTED_PREFIX {
            return Err(SubnetError::UnsupportedPrefix {
                cidr: s.to_string(),
                prefix: network.prefix(),
            });
        }

        Ok(Self::containing(network.ip()))
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), SUPPORTED_PREFIX)
    }
}

/// Expands a CIDR string into its 254 usable host addresses.
pub fn host_range(cidr: &str) -> Result<Vec<Ipv4Addr>, SubnetError> {
    let subnet: Subnet = cidr.parse()?;
    Ok(subnet.hosts())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
