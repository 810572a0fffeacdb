//! TUI event handling
//!
//! Polls crossterm for key events and maps them onto the core key enums.
//! Both loops ignore anything outside their key set; Ctrl+C is the one
//! process-level addition and is detected before mapping.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use tvremote_core::{ControlKey, Direction, SelectKey};

/// Event handler for TUI input
pub struct EventHandler {
    /// Tick rate for polling events
    tick_rate: Duration,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Poll for the next event
    ///
    /// Returns Some(Event) if an event occurred, None if the tick elapsed.
    pub fn poll(&self) -> Result<Option<Event>> {
        if event::poll(self.tick_rate)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Block until the next key press
    pub fn next_key(&self) -> Result<KeyEvent> {
        loop {
            if let Some(Event::Key(key)) = self.poll()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

/// Ctrl+C, an immediate process-level quit in any screen
pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map a key press for the selection loop
pub fn map_select_key(key: KeyEvent) -> SelectKey {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => SelectKey::Up,
        KeyCode::Down | KeyCode::Char('j') => SelectKey::Down,
        KeyCode::Enter => SelectKey::Confirm,
        _ => SelectKey::Other,
    }
}

/// Map a key press for the control loop
pub fn map_control_key(key: KeyEvent) -> ControlKey {
    match key.code {
        KeyCode::Up => ControlKey::Direction(Direction::Up),
        KeyCode::Down => ControlKey::Direction(Direction::Down),
        KeyCode::Left => ControlKey::Direction(Direction::Left),
        KeyCode::Right => ControlKey::Direction(Direction::Right),
        KeyCode::Char('q') | KeyCode::Esc => ControlKey::Quit,
        _ => ControlKey::Other,
    }
}
