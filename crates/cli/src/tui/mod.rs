//! Terminal User Interface
//!
//! Owns the terminal for the lifetime of a run: raw mode and the alternate
//! screen are acquired on construction and restored on drop. Two screens
//! run strictly in sequence, the device selector and the control loop, both
//! on a single cooperative flow: read one key, await what it triggers,
//! re-render.
//!
//! # Keybindings
//!
//! Selection: `Up/Down` (or `k/j`) move the highlight, `Enter` connects.
//! Control: arrow keys map to the remote's directional commands, `q` or
//! `Esc` quits. Everything else is ignored; `Ctrl+C` always quits.

pub mod app;
pub mod events;
pub mod ui;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tracing::info;

use tvremote_core::{DeviceDescriptor, Dispatcher, ExitReason, Remote, Step};

pub use app::{App, Screen};
pub use events::EventHandler;

/// TUI runner that manages the terminal and both interaction loops
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: App,
    events: EventHandler,
}

impl Tui {
    /// Take over the terminal
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;

        Ok(Self {
            terminal,
            app: App::new(),
            events: EventHandler::new(),
        })
    }

    fn draw(&mut self) -> Result<()> {
        self.terminal.draw(|f| ui::render(f, &self.app))?;
        Ok(())
    }

    /// Run the selection flow: scan, then pick a device
    ///
    /// Returns `None` when discovery finds nothing (after one
    /// acknowledgement key) or on Ctrl+C. Discovery failures propagate.
    pub async fn select_device<R: Remote>(
        &mut self,
        remote: &R,
    ) -> Result<Option<DeviceDescriptor>> {
        self.app.screen = Screen::Scanning;
        self.draw()?;

        let devices = remote.scan().await?;
        self.app.show_devices(devices);

        if matches!(self.app.screen, Screen::NoDevices) {
            self.draw()?;
            self.events.next_key()?;
            return Ok(None);
        }

        loop {
            self.draw()?;
            let key = self.events.next_key()?;
            if events::is_ctrl_c(&key) {
                return Ok(None);
            }
            if let Screen::Selecting(picker) = &mut self.app.screen {
                if let Some(device) = picker.handle_key(events::map_select_key(key)) {
                    return Ok(Some(device));
                }
            }
        }
    }

    /// Run the control flow: connect, then forward keys until exit
    ///
    /// Connection failures propagate before the loop starts. A mid-session
    /// command failure shows the terminal disconnected screen, waits for
    /// one acknowledgement key, and propagates the error.
    pub async fn control<R: Remote>(
        &mut self,
        remote: &R,
        device: DeviceDescriptor,
    ) -> Result<()> {
        self.app.show_connecting(device.clone());
        self.draw()?;

        let session = remote.connect(&device).await?;
        let mut dispatcher = Dispatcher::new(session);
        self.app.show_controlling(device.clone());
        info!(device = %device, "control loop started");

        loop {
            self.draw()?;
            let key = self.events.next_key()?;
            let control_key = if events::is_ctrl_c(&key) {
                tvremote_core::ControlKey::Quit
            } else {
                events::map_control_key(key)
            };

            match dispatcher.handle_key(control_key).await {
                Step::Continue => {
                    if let tvremote_core::ControlKey::Direction(direction) = control_key {
                        self.app.record_sent(direction);
                    }
                }
                Step::Done(ExitReason::Quit) => {
                    info!("control loop ended by user");
                    return Ok(());
                }
                Step::Done(ExitReason::SessionLost(err)) => {
                    self.app.show_disconnected(device, err.to_string());
                    self.draw()?;
                    self.events.next_key()?;
                    return Err(err.into());
                }
            }
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
