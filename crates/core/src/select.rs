//! Device selection state
//!
//! Tracks the highlighted entry of the discovered device list. The picker
//! only exists for non-empty lists; the empty case is handled by the caller
//! before a picker is ever constructed, so the index invariant
//! `selected < devices.len()` holds for the picker's whole lifetime.

use tracing::debug;

use crate::device::DeviceDescriptor;

/// Key events the selection loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
    Up,
    Down,
    Confirm,
    /// Any key outside the set above; ignored
    Other,
}

/// Selection state over the discovered device list
#[derive(Debug)]
pub struct DevicePicker {
    devices: Vec<DeviceDescriptor>,
    selected: usize,
}

impl DevicePicker {
    /// Create a picker over a discovered device list
    ///
    /// Returns `None` for an empty list; an empty discovery result never
    /// enters the selection loop.
    pub fn new(devices: Vec<DeviceDescriptor>) -> Option<Self> {
        if devices.is_empty() {
            return None;
        }
        Some(Self {
            devices,
            selected: 0,
        })
    }

    /// Devices in discovery order
    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    /// Index of the highlighted device
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The highlighted device
    pub fn highlighted(&self) -> &DeviceDescriptor {
        &self.devices[self.selected]
    }

    /// Apply one key event
    ///
    /// Up and Down move the highlight, clamped at the list ends with no
    /// wraparound. Confirm returns the highlighted descriptor and ends the
    /// selection. Everything else is ignored.
    pub fn handle_key(&mut self, key: SelectKey) -> Option<DeviceDescriptor> {
        match key {
            SelectKey::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            SelectKey::Down => {
                if self.selected < self.devices.len() - 1 {
                    self.selected += 1;
                }
                None
            }
            SelectKey::Confirm => {
                let device = self.devices[self.selected].clone();
                debug!(device = %device, "device chosen");
                Some(device)
            }
            SelectKey::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_devices(n: usize) -> Vec<DeviceDescriptor> {
        (0..n)
            .map(|i| DeviceDescriptor {
                identifier: format!("id-{}", i),
                name: format!("Device {}", i),
                address: format!("10.0.0.{}", i + 1).parse().unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_empty_list_has_no_picker() {
        assert!(DevicePicker::new(Vec::new()).is_none());
    }

    #[test]
    fn test_index_clamps_at_both_ends() {
        let mut picker = DevicePicker::new(mock_devices(3)).unwrap();

        // Up at the top clamps at 0
        picker.handle_key(SelectKey::Up);
        picker.handle_key(SelectKey::Up);
        assert_eq!(picker.selected(), 0);

        // Down past the end clamps at len - 1
        for _ in 0..10 {
            picker.handle_key(SelectKey::Down);
        }
        assert_eq!(picker.selected(), 2);
    }

    #[test]
    fn test_confirm_returns_device_at_index() {
        // Down, Down, Up, Confirm over [A, B, C] lands on B (0 -> 1 -> 2 -> 1)
        let mut picker = DevicePicker::new(mock_devices(3)).unwrap();
        assert!(picker.handle_key(SelectKey::Down).is_none());
        assert!(picker.handle_key(SelectKey::Down).is_none());
        assert!(picker.handle_key(SelectKey::Up).is_none());

        let chosen = picker.handle_key(SelectKey::Confirm).unwrap();
        assert_eq!(chosen.name, "Device 1");
        assert_eq!(chosen, picker.devices()[1]);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut picker = DevicePicker::new(mock_devices(2)).unwrap();
        picker.handle_key(SelectKey::Down);
        assert!(picker.handle_key(SelectKey::Other).is_none());
        assert_eq!(picker.selected(), 1);
    }

    #[test]
    fn test_single_device_confirm() {
        let mut picker = DevicePicker::new(mock_devices(1)).unwrap();
        picker.handle_key(SelectKey::Down);
        picker.handle_key(SelectKey::Up);
        let chosen = picker.handle_key(SelectKey::Confirm).unwrap();
        assert_eq!(chosen.name, "Device 0");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn select_key() -> impl Strategy<Value = SelectKey> {
            prop_oneof![
                Just(SelectKey::Up),
                Just(SelectKey::Down),
                Just(SelectKey::Other),
            ]
        }

        proptest! {
            #[test]
            fn index_stays_in_bounds_under_any_sequence(
                len in 1usize..8,
                keys in prop::collection::vec(select_key(), 0..64),
            ) {
                let mut picker = DevicePicker::new(mock_devices(len)).unwrap();
                let mut expected = 0usize;

                for key in keys {
                    picker.handle_key(key);
                    expected = match key {
                        SelectKey::Up => expected.saturating_sub(1),
                        SelectKey::Down => (expected + 1).min(len - 1),
                        _ => expected,
                    };
                    prop_assert!(picker.selected() < len);
                    prop_assert_eq!(picker.selected(), expected);
                }

                // Confirm returns the descriptor at the tracked index
                let chosen = picker.handle_key(SelectKey::Confirm).unwrap();
                prop_assert_eq!(&chosen, &picker.devices()[expected]);
            }
        }
    }
}
