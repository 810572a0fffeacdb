//! tvremote
//!
//! Discovers Apple TVs on the local network, lets the user pick one from a
//! terminal menu, and forwards directional key presses to the chosen device.
//! Discovery, pairing, and the control protocol are delegated to pyatv's
//! `atvremote` tool.

mod backend;
mod config;
mod tui;

use anyhow::{Context, Result, bail};
use backend::AtvRemote;
use clap::Parser;
use std::time::Duration;
use tracing::info;
use tvremote_core::{DeviceDescriptor, Remote, setup_logging};

#[derive(Parser, Debug)]
#[command(name = "tvremote")]
#[command(author, version, about = "Control an Apple TV from the terminal")]
#[command(long_about = "
A terminal remote control for Apple TV, built on top of pyatv's atvremote.

With no arguments it scans the local network, shows a device menu, and
turns the terminal into a directional remote for the chosen device.

EXAMPLES:
    # Scan, pick a device interactively, control it
    tvremote

    # Skip the menu and connect by identifier or name
    tvremote --id 'Living Room'

    # Run with debug logging
    tvremote --log-level debug

CONFIGURATION:
    ~/.config/tvremote/config.toml, or the path given with --config.
")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Save default configuration to the default location and exit
    #[arg(long)]
    save_config: bool,

    /// Skip the menu and connect to a device by identifier or name
    #[arg(long, value_name = "IDENTIFIER")]
    id: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Scan timeout in seconds
    #[arg(long, value_name = "SECS")]
    scan_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.save_config {
        let config = config::Config::default();
        let path = config::Config::default_path();
        config.save(&path).context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    let config = if let Some(ref path) = args.config {
        config::Config::load(Some(path.clone())).context("Failed to load configuration")?
    } else {
        config::Config::load_or_default()
    };

    let log_level = args.log_level.as_deref().unwrap_or(&config.remote.log_level);
    setup_logging(log_level).context("Failed to setup logging")?;

    info!("tvremote v{}", env!("CARGO_PKG_VERSION"));

    let scan_timeout = args
        .scan_timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.scan_timeout());
    let remote = AtvRemote::new(config.atvremote_path(), scan_timeout);

    let result = if let Some(query) = args.id {
        connect_direct(&remote, &query).await
    } else {
        run_interactive(&remote).await
    };

    info!("shutting down");
    result
}

/// Full flow: scan, select from the menu, control
async fn run_interactive(remote: &AtvRemote) -> Result<()> {
    let mut tui = tui::Tui::new()?;

    let Some(device) = tui.select_device(remote).await? else {
        info!("no device chosen");
        return Ok(());
    };

    tui.control(remote, device).await
}

/// Skip the menu: resolve the device by identifier or name, then control
async fn connect_direct(remote: &AtvRemote, query: &str) -> Result<()> {
    let devices = remote.scan().await.context("Discovery failed")?;
    let device = resolve_device(devices, query)?;

    let mut tui = tui::Tui::new()?;
    tui.control(remote, device).await
}

/// Match a scan result by identifier, or case-insensitively by name
fn resolve_device(devices: Vec<DeviceDescriptor>, query: &str) -> Result<DeviceDescriptor> {
    let names: Vec<String> = devices.iter().map(|d| d.name.clone()).collect();
    match devices
        .into_iter()
        .find(|d| d.identifier == query || d.name.eq_ignore_ascii_case(query))
    {
        Some(device) => Ok(device),
        None if names.is_empty() => bail!("No Apple TVs found on the network"),
        None => bail!(
            "No device matching '{}'. Found: {}",
            query,
            names.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_devices() -> Vec<DeviceDescriptor> {
        vec![
            DeviceDescriptor {
                identifier: "aaaa-bbbb".to_string(),
                name: "Living Room".to_string(),
                address: "10.0.0.1".parse().unwrap(),
            },
            DeviceDescriptor {
                identifier: "cccc-dddd".to_string(),
                name: "Bedroom".to_string(),
                address: "10.0.0.2".parse().unwrap(),
            },
        ]
    }

    #[test]
    fn test_resolve_by_identifier() {
        let device = resolve_device(mock_devices(), "cccc-dddd").unwrap();
        assert_eq!(device.name, "Bedroom");
    }

    #[test]
    fn test_resolve_by_name_ignores_case() {
        let device = resolve_device(mock_devices(), "living room").unwrap();
        assert_eq!(device.identifier, "aaaa-bbbb");
    }

    #[test]
    fn test_resolve_unknown_lists_candidates() {
        let err = resolve_device(mock_devices(), "Kitchen").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Kitchen"));
        assert!(msg.contains("Living Room"));
    }

    #[test]
    fn test_resolve_with_no_devices() {
        let err = resolve_device(Vec::new(), "Kitchen").unwrap_err();
        assert!(err.to_string().contains("No Apple TVs found"));
    }
}
