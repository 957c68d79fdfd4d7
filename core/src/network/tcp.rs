use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use flowscan_common::config::Config;
use flowscan_common::network::device::DeviceRecord;
use flowscan_common::{debug, success, warn};
use flowscan_protocols::vmgn::{self, Identification};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout_at};

use crate::scanner::Prober;

const READ_CHUNK_SIZE: usize = 512;
const MAX_RESPONSE_SIZE: usize = 4096;

/// How one identification exchange ended.
#[derive(Debug)]
pub enum Exchange {
    /// The marker arrived. Holds everything received, lossily decoded.
    Reply(String),
    /// The peer closed the connection before sending the marker.
    Closed,
    /// The deadline passed before the marker arrived.
    Elapsed,
    /// The peer sent more than [`MAX_RESPONSE_SIZE`] bytes without the marker.
    Overflow,
    Failed(io::Error),
}

/// Probes a host by sending the VMGN identification query over TCP.
#[derive(Debug, Clone)]
pub struct TcpProber {
    port: u16,
    timeout: Duration,
}

impl TcpProber {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.port, cfg.probe_timeout)
    }

    pub async fn exchange(&self, addr: Ipv4Addr) -> Exchange {
        let target = SocketAddr::new(IpAddr::V4(addr), self.port);
        exchange(target, Instant::now() + self.timeout).await
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, addr: Ipv4Addr) -> Option<DeviceRecord> {
        match self.exchange(addr).await {
            Exchange::Reply(reply) => identify(addr, &reply),
            Exchange::Closed => {
                debug!("{addr}: connection closed without identification");
                None
            }
            Exchange::Elapsed => {
                debug!("{addr}: no reply within {:?}", self.timeout);
                None
            }
            Exchange::Overflow => {
                warn!("{addr}: reply exceeded {MAX_RESPONSE_SIZE} bytes without identification");
                None
            }
            Exchange::Failed(e) => {
                debug!("{addr}: {e}");
                None
            }
        }
    }
}

fn identify(addr: Ipv4Addr, reply: &str) -> Option<DeviceRecord> {
    match vmgn::parse_identification(reply) {
        Ok(ident) => {
            let Identification { name, firmware, .. } = &ident;
            success!("{addr}: found {name} (firmware {firmware}, {})", ident.model());
            Some(DeviceRecord::new(
                addr,
                name.clone(),
                firmware.clone(),
                ident.model(),
                reply,
            ))
        }
        Err(e) => {
            warn!("{addr}: {e}: {:?}", reply.trim());
            None
        }
    }
}

/// Connects, sends the query and reads until the reply is in or `deadline` passes.
///
/// Every step shares the one deadline. The stream is owned by this future, so it is
/// closed exactly once whichever way the exchange ends, including when the caller
/// drops the future.
pub async fn exchange(target: SocketAddr, deadline: Instant) -> Exchange {
    let mut stream: TcpStream = match timeout_at(deadline, TcpStream::connect(target)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => return Exchange::Failed(e),
        Err(_elapsed) => return Exchange::Elapsed,
    };

    match timeout_at(deadline, stream.write_all(vmgn::IDENTIFY_COMMAND)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Exchange::Failed(e),
        Err(_elapsed) => return Exchange::Elapsed,
    }

    let mut response: Vec<u8> = Vec::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        match timeout_at(deadline, stream.read(&mut chunk)).await {
            Ok(Ok(0)) => return settle(response, Exchange::Closed),
            Ok(Ok(n)) => {
                response.extend_from_slice(&chunk[..n]);
                if vmgn::reply_complete(&response) {
                    return reply(&response);
                }
                if response.len() > MAX_RESPONSE_SIZE {
                    return settle(response, Exchange::Overflow);
                }
            }
            Ok(Err(e)) => return settle(response, Exchange::Failed(e)),
            Err(_elapsed) => return settle(response, Exchange::Elapsed),
        }
    }
}

/// A marker line cut short by close, error or deadline is still a reply.
fn settle(response: Vec<u8>, otherwise: Exchange) -> Exchange {
    if vmgn::contains_marker(&response) {
        reply(&response)
    } else {
        otherwise
    }
}

fn reply(response: &[u8]) -> Exchange {
    Exchange::Reply(String::from_utf8_lossy(response).into_owned())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
