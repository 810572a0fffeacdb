//! Core types and control logic for tvremote
//!
//! This crate holds everything that does not touch a terminal or a
//! subprocess: the device model, the capability traits the external
//! collaborator implements, the selection and dispatch state machines,
//! error types, and logging setup.

pub mod device;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod remote;
pub mod select;

pub use device::DeviceDescriptor;
pub use dispatch::{ControlKey, Dispatcher, ExitReason, Step};
pub use error::{RemoteError, Result};
pub use logging::setup_logging;
pub use remote::{Direction, Remote, Session};
pub use select::{DevicePicker, SelectKey};
