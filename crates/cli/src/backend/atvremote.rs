//! atvremote subprocess backend
//!
//! Wraps pyatv's `atvremote` command line tool. Scanning shells out to
//! `atvremote scan` and parses the printed device blocks. A control session
//! is a long-lived `atvremote --id <identifier> cli` child process; commands
//! are written to its stdin one line at a time and each is awaited until the
//! interactive prompt comes back.

use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info};

use tvremote_core::{DeviceDescriptor, Direction, Remote, RemoteError, Result, Session};

/// Prompt printed by `atvremote cli` when it is ready for the next command
const PROMPT: &str = "pyatv> ";

/// How long a session gets to exit cleanly before being killed
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Backend over the `atvremote` executable
pub struct AtvRemote {
    program: String,
    scan_timeout: Duration,
}

impl AtvRemote {
    pub fn new(program: String, scan_timeout: Duration) -> Self {
        Self {
            program,
            scan_timeout,
        }
    }
}

impl Remote for AtvRemote {
    type Session = AtvSession;

    async fn scan(&self) -> Result<Vec<DeviceDescriptor>> {
        info!(program = %self.program, timeout = ?self.scan_timeout, "scanning for devices");

        let output = Command::new(&self.program)
            .arg("--scan-timeout")
            .arg(self.scan_timeout.as_secs().to_string())
            .arg("scan")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| RemoteError::Discovery(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RemoteError::Discovery(
                stderr.trim().lines().last().unwrap_or("scan failed").to_string(),
            ));
        }

        let devices = parse_scan_output(&String::from_utf8_lossy(&output.stdout));
        info!(count = devices.len(), "scan complete");
        Ok(devices)
    }

    async fn connect(&self, device: &DeviceDescriptor) -> Result<AtvSession> {
        info!(device = %device, "connecting");

        let mut child = Command::new(&self.program)
            .arg("--id")
            .arg(&device.identifier)
            .arg("cli")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RemoteError::Connection {
                device: device.name.clone(),
                reason: format!("failed to run {}: {}", self.program, e),
            })?;

        let stdin = child.stdin.take().ok_or_else(|| RemoteError::Connection {
            device: device.name.clone(),
            reason: "child stdin unavailable".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| RemoteError::Connection {
            device: device.name.clone(),
            reason: "child stdout unavailable".to_string(),
        })?;

        let mut session = AtvSession {
            child,
            stdin,
            stdout,
            closed: false,
        };

        // The prompt only appears once the session is established; an
        // unreachable device makes the child exit before printing it.
        session.await_prompt().await.map_err(|e| RemoteError::Connection {
            device: device.name.clone(),
            reason: e.to_string(),
        })?;

        info!(device = %device, "connected");
        Ok(session)
    }
}

/// One established control session backed by an `atvremote cli` child
pub struct AtvSession {
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
    closed: bool,
}

impl AtvSession {
    /// Read child output until the interactive prompt returns
    ///
    /// Returns whatever was printed before the prompt. EOF before the
    /// prompt means the child exited underneath us.
    async fn await_prompt(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = self.stdout.read(&mut chunk).await?;
            if n == 0 {
                return Err(RemoteError::Session(
                    "atvremote exited unexpectedly".to_string(),
                ));
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.ends_with(PROMPT.as_bytes()) {
                buf.truncate(buf.len() - PROMPT.len());
                return Ok(String::from_utf8_lossy(&buf).into_owned());
            }
        }
    }
}

impl Session for AtvSession {
    async fn send(&mut self, direction: Direction) -> Result<()> {
        if self.closed {
            return Err(RemoteError::Session("session already released".to_string()));
        }

        self.stdin
            .write_all(format!("{}\n", direction.command()).as_bytes())
            .await?;
        self.stdin.flush().await?;

        // Directional commands print nothing on success; any output before
        // the prompt is an error report from the tool.
        let reply = self.await_prompt().await?;
        let reply = reply.trim();
        if reply.is_empty() {
            debug!(%direction, "command acknowledged");
            Ok(())
        } else {
            Err(RemoteError::Session(
                reply.lines().last().unwrap_or(reply).to_string(),
            ))
        }
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        // Ask the tool to exit, then make sure the child is gone.
        let _ = self.stdin.write_all(b"exit\n").await;
        let _ = self.stdin.flush().await;
        if tokio::time::timeout(CLOSE_GRACE, self.child.wait())
            .await
            .is_err()
        {
            let _ = self.child.start_kill();
            let _ = self.child.wait().await;
        }
        debug!("session released");
    }
}

/// Parse the device blocks of `atvremote scan` output
///
/// Each block carries `Name:` and `Address:` fields plus an `Identifiers:`
/// heading whose dash entries list the device's unique identifiers; the
/// first entry is taken. A singular `Identifier:` field is accepted as a
/// fallback. Blocks missing a field are skipped. Discovery order is
/// preserved.
fn parse_scan_output(output: &str) -> Vec<DeviceDescriptor> {
    let mut devices = Vec::new();
    let mut name: Option<String> = None;
    let mut address: Option<IpAddr> = None;
    let mut identifier: Option<String> = None;
    let mut in_identifiers = false;

    for line in output.lines() {
        let line = line.trim();
        if let Some(entry) = line.strip_prefix('-') {
            // Dash entries belong to the preceding heading; only the ones
            // under Identifiers: name the device, the rest are services.
            if in_identifiers && identifier.is_none() {
                identifier = Some(entry.trim().to_string());
            }
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        in_identifiers = false;
        match key.trim() {
            "Name" => {
                push_device(&mut devices, name.take(), address.take(), identifier.take());
                name = Some(value.to_string());
            }
            "Address" => address = value.parse().ok(),
            "Identifiers" => in_identifiers = true,
            "Identifier" => identifier = Some(value.to_string()),
            _ => {}
        }
    }
    push_device(&mut devices, name, address, identifier);
    devices
}

fn push_device(
    devices: &mut Vec<DeviceDescriptor>,
    name: Option<String>,
    address: Option<IpAddr>,
    identifier: Option<String>,
) {
    if let (Some(name), Some(address), Some(identifier)) = (name, address, identifier) {
        devices.push(DeviceDescriptor {
            identifier,
            name,
            address,
        });
    }
}
