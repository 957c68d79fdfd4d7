//! # VMGN identification exchange
//!
//! The client sends `VMGN?\n`; a unit replies with a line
//! `VMGN,<name>,<firmware>[,<extra>...]`. Fields are positional and
//! comma separated. Replies with more than [`ELITE_FIELD_THRESHOLD`] fields
//! come from ELITE units, everything else is BASE.

use flowscan_common::network::device::{DeviceModel, UNKNOWN_FIRMWARE, UNKNOWN_NAME};
use thiserror::Error;

pub const IDENTIFY_COMMAND: &[u8] = b"VMGN?\n";
pub const MARKER: &str = "VMGN,";
pub const ELITE_FIELD_THRESHOLD: usize = 5;

const NAME_FIELD: usize = 1;
const FIRMWARE_FIELD: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no line starting with 'VMGN,' in reply")]
    MissingMarker,
}

/// Parsed identification line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    pub name: String,
    pub firmware: String,
    /// Every comma separated field of the line, marker token included.
    pub fields: Vec<String>,
}

impl Identification {
    pub fn model(&self) -> DeviceModel {
        if self.fields.len() > ELITE_FIELD_THRESHOLD {
            DeviceModel::Elite
        } else {
            DeviceModel::Base
        }
    }

    /// Fields after `name` and `firmware`; only ELITE units send them.
    pub fn extra_fields(&self) -> &[String] {
        self.fields.get(FIRMWARE_FIELD + 1..).unwrap_or(&[])
    }
}

/// Finds the first identification line in `reply` and splits it into fields.
pub fn parse_identification(reply: &str) -> Result<Identification, ParseError> {
    let line: &str = reply
        .lines()
        .find(|line| line.starts_with(MARKER))
        .ok_or(ParseError::MissingMarker)?;

    let fields: Vec<String> = line.split(',').map(str::to_string).collect();

    Ok(Identification {
        name: field_or(&fields, NAME_FIELD, UNKNOWN_NAME),
        firmware: field_or(&fields, FIRMWARE_FIELD, UNKNOWN_FIRMWARE),
        fields,
    })
}

/// True once `buf` holds the marker anywhere.
pub fn contains_marker(buf: &[u8]) -> bool {
    marker_position(buf).is_some()
}

/// True once the line holding the marker has been terminated by a newline.
pub fn reply_complete(buf: &[u8]) -> bool {
    match marker_position(buf) {
        Some(pos) => buf[pos..].contains(&b'\n'),
        None => false,
    }
}

fn marker_position(buf: &[u8]) -> Option<usize> {
    buf.windows(MARKER.len())
        .position(|window| window == MARKER.as_bytes())
}

fn field_or(fields: &[String], idx: usize, default: &str) -> String {
    match fields.get(idx) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => default.to_string(),
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
