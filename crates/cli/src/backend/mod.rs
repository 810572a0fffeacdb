//! External collaborator backends
//!
//! Implementations of the core capability traits. Discovery, pairing, and
//! the control protocol live entirely in the external tool; the backend
//! only drives it and parses what it prints.

mod atvremote;

pub use atvremote::AtvRemote;
