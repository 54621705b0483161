//! Keyboard bindings and per-player jump key tracking.
//!
//! Terminals that support the kitty keyboard protocol report key releases,
//! so a held key is tracked exactly. Elsewhere only presses (and auto-repeat)
//! arrive, so a key counts as held for [`HOLD_TIMEOUT`] after its last
//! press event.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dino_jockey::core::{ControlState, PlayerSlot};
use std::time::{Duration, Instant};

/// How long a press keeps a key held when releases are not reported. Covers
/// the usual delay before the first auto-repeat arrives.
pub const HOLD_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    /// Jump keys, indexed by [`PlayerSlot::index`].
    pub jump: [Vec<KeyCode>; 2],
    pub quit: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: [
                vec![KeyCode::Up],
                vec![KeyCode::Char('w'), KeyCode::Char('W')],
            ],
            quit: vec![KeyCode::Esc],
        }
    }
}

impl KeyBindings {
    pub fn slot_for(&self, code: KeyCode) -> Option<PlayerSlot> {
        PlayerSlot::ALL
            .into_iter()
            .find(|slot| self.jump[slot.index()].contains(&code))
    }

    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        ctrl_c || self.quit.contains(&key.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Jump(PlayerSlot),
    Ignored,
}

/// Tracks both players' jump keys between frames.
#[derive(Debug)]
pub struct Keyboard {
    bindings: KeyBindings,
    reports_release: bool,
    held: [bool; 2],
    pressed_since_poll: [bool; 2],
    last_press: [Option<Instant>; 2],
    controls: [ControlState; 2],
}

impl Keyboard {
    pub fn new(bindings: KeyBindings, reports_release: bool) -> Self {
        Self {
            bindings,
            reports_release,
            held: [false; 2],
            pressed_since_poll: [false; 2],
            last_press: [None; 2],
            controls: [ControlState::new(); 2],
        }
    }

    /// Feed one terminal key event received at `now`.
    pub fn handle(&mut self, key: KeyEvent, now: Instant) -> KeyAction {
        if key.kind != KeyEventKind::Release && self.bindings.is_quit(&key) {
            return KeyAction::Quit;
        }
        let Some(slot) = self.bindings.slot_for(key.code) else {
            return KeyAction::Ignored;
        };

        let i = slot.index();
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if !self.held[i] {
                    self.pressed_since_poll[i] = true;
                }
                self.held[i] = true;
                self.last_press[i] = Some(now);
            }
            KeyEventKind::Release => {
                self.held[i] = false;
                self.last_press[i] = None;
            }
        }
        KeyAction::Jump(slot)
    }

    /// Take this frame's snapshot of both jump keys.
    pub fn poll(&mut self, now: Instant) -> [ControlState; 2] {
        for i in 0..2 {
            if !self.reports_release {
                let fresh = self.last_press[i]
                    .map_or(false, |at| now.saturating_duration_since(at) < HOLD_TIMEOUT);
                if !fresh {
                    self.held[i] = false;
                }
            }
            // A tap that was pressed and released between polls still counts
            let down = self.held[i] || self.pressed_since_poll[i];
            self.pressed_since_poll[i] = false;
            self.controls[i].advance(down);
        }
        self.controls
    }

    /// Forget every key, e.g. when the terminal loses focus.
    pub fn clear(&mut self) {
        self.held = [false; 2];
        self.pressed_since_poll = [false; 2];
        self.last_press = [None; 2];
        for control in &mut self.controls {
            control.clear();
        }
    }
}
