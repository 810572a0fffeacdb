//! TUI application state
//!
//! Tracks which of the two screens is active and the data each one needs.
//! Transitions mirror the control flow: scanning, selecting (or the empty
//! result), connecting, controlling, and the terminal disconnected state.

use tvremote_core::{DeviceDescriptor, DevicePicker, Direction};

/// Current screen
pub enum Screen {
    /// Discovery in progress
    Scanning,
    /// Device list shown, highlight tracked by the picker
    Selecting(DevicePicker),
    /// Discovery returned nothing; waiting for one acknowledgement key
    NoDevices,
    /// Session being established
    Connecting(DeviceDescriptor),
    /// Session active, forwarding keys
    Controlling {
        device: DeviceDescriptor,
        last_sent: Option<Direction>,
    },
    /// Session lost; terminal state, waiting for one acknowledgement key
    Disconnected {
        device: DeviceDescriptor,
        error: String,
    },
}

/// Application state
pub struct App {
    pub screen: Screen,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Scanning,
        }
    }

    /// Move to the selection screen, or the empty-result screen
    pub fn show_devices(&mut self, devices: Vec<DeviceDescriptor>) {
        self.screen = match DevicePicker::new(devices) {
            Some(picker) => Screen::Selecting(picker),
            None => Screen::NoDevices,
        };
    }

    pub fn show_connecting(&mut self, device: DeviceDescriptor) {
        self.screen = Screen::Connecting(device);
    }

    pub fn show_controlling(&mut self, device: DeviceDescriptor) {
        self.screen = Screen::Controlling {
            device,
            last_sent: None,
        };
    }

    pub fn show_disconnected(&mut self, device: DeviceDescriptor, error: String) {
        self.screen = Screen::Disconnected { device, error };
    }

    /// Remember the last command that went out, for the status line
    pub fn record_sent(&mut self, direction: Direction) {
        if let Screen::Controlling { last_sent, .. } = &mut self.screen {
            *last_sent = Some(direction);
        }
    }
}
