use std::time::SystemTime;

use crate::terminal::colors;
use colored::*;
use flowscan_common::network::device::{DeviceModel, DeviceRecord};

pub type Detail = (String, ColoredString);

pub fn model_to_colored(model: DeviceModel) -> ColoredString {
    match model {
        DeviceModel::Base => model.as_str().color(colors::MODEL_BASE),
        DeviceModel::Elite => model.as_str().color(colors::MODEL_ELITE).bold(),
    }
}

/// Key/value rows shown under a device in the result tree.
pub fn device_to_details(device: &DeviceRecord, verbose: bool) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("IPv4".to_string(), device.ip.to_string().color(colors::IPV4_ADDR)),
        ("Firmware".to_string(), device.firmware.as_str().color(colors::FIRMWARE)),
        ("Model".to_string(), model_to_colored(device.model)),
        (
            "Capabilities".to_string(),
            device.capabilities.enabled().join(", ").normal(),
        ),
    ];

    if verbose {
        details.push(("Reply".to_string(), device.raw_response.as_str().dimmed()));
        details.push(("Seen".to_string(), seen_ago(device.discovered_at).dimmed()));
    }

    details
}

fn seen_ago(at: SystemTime) -> String {
    match at.elapsed() {
        Ok(age) => format!("{:.1}s ago", age.as_secs_f64()),
        Err(_) => "just now".to_string(),
    }
}
