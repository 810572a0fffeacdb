//! Device model

use std::fmt;
use std::net::IpAddr;

/// A device found during discovery
///
/// Descriptors are produced by the discovery backend and are immutable
/// afterwards. The identifier is whatever the backend uses to address the
/// device when connecting; the name and address are for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Backend-assigned unique identifier
    pub identifier: String,
    /// Human-readable device name
    pub name: String,
    /// Network address of the device
    pub address: IpAddr,
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let device = DeviceDescriptor {
            identifier: "aabbcc".to_string(),
            name: "Living Room".to_string(),
            address: "10.0.0.5".parse().unwrap(),
        };
        assert_eq!(format!("{}", device), "Living Room (10.0.0.5)");
    }
}
