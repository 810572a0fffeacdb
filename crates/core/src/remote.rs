//! Capability interface to the external collaborator
//!
//! Discovery, pairing, and the remote-control wire protocol are not
//! implemented in this repository. They are reached through the two traits
//! below, which is the only boundary between the interaction loops and the
//! outside world.

use std::fmt;

use crate::device::DeviceDescriptor;
use crate::error::Result;

/// A directional remote-control command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Command word understood by the control backend
    pub fn command(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Discovery and connection capability
#[allow(async_fn_in_trait)]
pub trait Remote {
    type Session: Session;

    /// Scan the local network for devices
    ///
    /// May return an empty list; may take as long as the backend's scan
    /// timeout allows.
    async fn scan(&self) -> Result<Vec<DeviceDescriptor>>;

    /// Establish a control session with a device
    ///
    /// Fails with [`crate::RemoteError::Connection`] if the device is
    /// unreachable or refuses the session.
    async fn connect(&self, device: &DeviceDescriptor) -> Result<Self::Session>;
}

/// An established control session
///
/// Owned exclusively by the dispatch loop for its lifetime.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Issue one directional command and await its completion
    async fn send(&mut self, direction: Direction) -> Result<()>;

    /// Release the session and any underlying transport resources
    ///
    /// Idempotent; calling close on an already-released session is a no-op.
    async fn close(&mut self);
}
