//! Command dispatch loop state
//!
//! Maps key events to remote-control commands on an established session.
//! Commands are issued strictly one at a time; each invocation is awaited
//! before the next key is considered, so key events are never reordered or
//! coalesced.
//!
//! A failed invocation releases the session and ends the loop. The session
//! is taken out of the dispatcher before release, so no later key event can
//! reach a released handle.

use tracing::{debug, warn};

use crate::error::RemoteError;
use crate::remote::{Direction, Session};

/// Key events the control loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    /// One of the four directional commands
    Direction(Direction),
    /// Clean exit
    Quit,
    /// Any key outside the set above; ignored
    Other,
}

/// Outcome of handling one key event
#[derive(Debug)]
pub enum Step {
    /// Keep reading keys
    Continue,
    /// Loop is over
    Done(ExitReason),
}

/// Why the control loop ended
#[derive(Debug)]
pub enum ExitReason {
    /// User pressed the quit key
    Quit,
    /// A command failed and the session was released
    SessionLost(RemoteError),
}

/// Dispatch loop state over an exclusively-owned session
pub struct Dispatcher<S: Session> {
    session: Option<S>,
}

impl<S: Session> Dispatcher<S> {
    pub fn new(session: S) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Whether the session is still held
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Handle one key event, awaiting any command it triggers
    pub async fn handle_key(&mut self, key: ControlKey) -> Step {
        match key {
            ControlKey::Direction(direction) => {
                // Once the session is gone the loop is terminal; nothing is
                // ever invoked against a released handle.
                let Some(session) = self.session.as_mut() else {
                    return Step::Continue;
                };
                match session.send(direction).await {
                    Ok(()) => {
                        debug!(%direction, "command sent");
                        Step::Continue
                    }
                    Err(err) => {
                        warn!(%direction, error = %err, "command failed, releasing session");
                        self.release().await;
                        Step::Done(ExitReason::SessionLost(err))
                    }
                }
            }
            ControlKey::Quit => {
                self.release().await;
                Step::Done(ExitReason::Quit)
            }
            ControlKey::Other => Step::Continue,
        }
    }

    /// Release the session if still held
    pub async fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close().await;
        }
    }
}
