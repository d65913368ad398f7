//! Input channel: a background thread that turns key presses into at most
//! one direction change per frame.
//!
//! The driver and the input thread share a [`SharedInput`]. The input thread
//! writes the pending direction and clears the frame-ready flag; the driver
//! reads the direction at the start of each frame and sets the flag again
//! once the frame has been drawn.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{error, trace};

use crate::error::Result;
use crate::point::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Exit,
    Other,
}

/// Blocking source of key presses.
pub trait KeySource {
    fn next_key(&mut self) -> Result<Key>;
}

/// Arrow keys and WASD steer; Esc, `q` and Ctrl+C quit.
pub fn map_key(ev: KeyEvent) -> Key {
    if ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL) {
        return Key::Exit;
    }

    match ev.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Move(Direction::Right),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Key::Exit,
        _ => Key::Other,
    }
}

#[derive(Debug)]
struct InputSlot {
    /// Last direction accepted from the keyboard.
    pending: Direction,
    /// Direction the driver moved in on its latest frame.
    committed: Direction,
    /// Whether the driver has read `pending` since it was accepted.
    consumed: bool,
    frame_ready: bool,
    awaiting_ack: bool,
}

/// State shared between the driver and the input thread.
#[derive(Debug)]
pub struct SharedInput {
    slot: Mutex<InputSlot>,
    ack: Condvar,
    running: AtomicBool,
}

impl SharedInput {
    pub fn new(direction: Direction) -> Self {
        SharedInput {
            slot: Mutex::new(InputSlot {
                pending: direction,
                committed: direction,
                consumed: true,
                frame_ready: true,
                awaiting_ack: false,
            }),
            ack: Condvar::new(),
            running: AtomicBool::new(true),
        }
    }

    /// Tries to register `direction` for the next frame.
    ///
    /// Rejected while an earlier change is still waiting for the driver, or
    /// when it would reverse the snake onto its own neck.
    pub fn offer(&self, direction: Direction) -> bool {
        let mut slot = self.slot();
        if !slot.frame_ready || direction.is_opposite(slot.committed) {
            return false;
        }
        slot.pending = direction;
        slot.consumed = false;
        slot.frame_ready = false;
        true
    }

    /// Hands the pending direction to the driver for this frame.
    pub fn take_direction(&self) -> Direction {
        let mut slot = self.slot();
        slot.committed = slot.pending;
        slot.consumed = true;
        slot.committed
    }

    /// Direction the driver moved in last.
    pub fn committed(&self) -> Direction {
        self.slot().committed
    }

    /// Direction the next frame will use.
    pub fn pending(&self) -> Direction {
        self.slot().pending
    }

    /// Reopens input at the end of a frame. A change accepted during the
    /// frame keeps input closed until the driver has taken it.
    pub fn mark_frame_ready(&self) {
        let mut slot = self.slot();
        if slot.consumed {
            slot.frame_ready = true;
        }
    }

    pub fn is_frame_ready(&self) -> bool {
        self.slot().frame_ready
    }

    /// Back to a fresh round heading `direction`.
    pub fn reset(&self, direction: Direction) {
        let mut slot = self.slot();
        slot.pending = direction;
        slot.committed = direction;
        slot.consumed = true;
        slot.frame_ready = true;
        slot.awaiting_ack = false;
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        // Hold the lock so a driver parked in `wait_for_ack` can't miss this.
        let _slot = self.slot();
        self.running.store(false, Ordering::SeqCst);
        self.ack.notify_all();
    }

    /// From now on the next key press acknowledges instead of steering.
    pub fn begin_ack(&self) {
        self.slot().awaiting_ack = true;
    }

    /// Blocks the driver until the acknowledgment opened by
    /// [`begin_ack`](Self::begin_ack) arrives or the game stops.
    pub fn wait_for_ack(&self) {
        let mut slot = self.slot();
        while slot.awaiting_ack && self.is_running() {
            slot = self.ack.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }
        slot.awaiting_ack = false;
    }

    pub fn is_awaiting_ack(&self) -> bool {
        self.slot().awaiting_ack
    }

    /// Consumes a key press as the acknowledgment, if one is awaited.
    pub fn acknowledge(&self) -> bool {
        let mut slot = self.slot();
        if !slot.awaiting_ack {
            return false;
        }
        slot.awaiting_ack = false;
        self.ack.notify_all();
        true
    }

    ///////////////////////////////////////////////////////////////////////////

    fn slot(&self) -> MutexGuard<'_, InputSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reads keys until the exit key arrives or the game stops.
pub fn listen<K: KeySource>(source: &mut K, shared: &SharedInput) -> Result<()> {
    while shared.is_running() {
        let key = match source.next_key() {
            Ok(key) => key,
            Err(e) => {
                error!(error = %e, "key read failed, stopping");
                shared.stop();
                return Err(e);
            }
        };

        match key {
            Key::Exit => {
                shared.stop();
                break;
            }
            _ if shared.acknowledge() => {}
            Key::Move(dir) => {
                if shared.offer(dir) {
                    trace!(?dir, "direction accepted");
                }
            }
            Key::Other => {}
        }
    }

    Ok(())
}

/// Runs [`listen`] on its own thread.
pub fn spawn<K>(mut source: K, shared: Arc<SharedInput>) -> Result<JoinHandle<Result<()>>>
where
    K: KeySource + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("input".into())
        .spawn(move || listen(&mut source, &shared))?;
    Ok(handle)
}
