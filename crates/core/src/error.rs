//! Error taxonomy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network scan failed before any device list was produced
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// Device was unreachable or refused the control session
    #[error("failed to connect to {device}: {reason}")]
    Connection { device: String, reason: String },

    /// A command failed after the session was established
    #[error("session error: {0}")]
    Session(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RemoteError::Connection {
            device: "Bedroom".to_string(),
            reason: "connection refused".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Bedroom"));
        assert!(msg.contains("connection refused"));
    }
}
