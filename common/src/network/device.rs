use std::fmt;
use std::net::Ipv4Addr;
use std::time::SystemTime;

pub const UNKNOWN_NAME: &str = "VMC-Unknown";
pub const UNKNOWN_FIRMWARE: &str = "Unknown";

/// Capability tier of a VMC Helty Flow unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceModel {
    Base,
    Elite,
}

impl DeviceModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceModel::Base => "BASE",
            DeviceModel::Elite => "ELITE",
        }
    }
}

impl fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub basic_control: bool,
    pub temperature_sensors: bool,
    pub humidity_sensor: bool,
    pub co2_sensor: bool,
    pub voc_sensor: bool,
    pub advanced_automation: bool,
}

impl From<DeviceModel> for Capabilities {
    fn from(model: DeviceModel) -> Self {
        let elite = model == DeviceModel::Elite;
        Self {
            basic_control: true,
            temperature_sensors: true,
            humidity_sensor: true,
            co2_sensor: elite,
            voc_sensor: elite,
            advanced_automation: elite,
        }
    }
}

impl Capabilities {
    /// Names of the enabled flags, in declaration order.
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            (self.basic_control, "control"),
            (self.temperature_sensors, "temperature"),
            (self.humidity_sensor, "humidity"),
            (self.co2_sensor, "co2"),
            (self.voc_sensor, "voc"),
            (self.advanced_automation, "automation"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// A VMC unit that answered the identification query.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub ip: Ipv4Addr,
    pub name: String,
    pub firmware: String,
    pub model: DeviceModel,
    pub capabilities: Capabilities,
    /// The reply as received, trimmed.
    pub raw_response: String,
    pub discovered_at: SystemTime,
}

impl DeviceRecord {
    /// Stamps the record with the current time and derives capabilities from `model`.
    pub fn new(
        ip: Ipv4Addr,
        name: String,
        firmware: String,
        model: DeviceModel,
        raw_response: &str,
    ) -> Self {
        Self {
            ip,
            name,
            firmware,
            model,
            capabilities: Capabilities::from(model),
            raw_response: raw_response.trim().to_string(),
            discovered_at: SystemTime::now(),
        }
    }
}
