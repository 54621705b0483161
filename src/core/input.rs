//! Polled input with edge detection.
//!
//! The host polls each player's jump control once per frame. [`ControlState`]
//! keeps the previous and current snapshot so the core can ask whether the
//! control is held, was just pressed, or was just released.

/// Per-control input query, as exposed by the host.
pub trait InputQuery {
    /// The control is down in the current snapshot.
    fn is_held(&self) -> bool;
    /// The control went down between the previous and current snapshot.
    fn was_just_pressed(&self) -> bool;
    /// The control went up between the previous and current snapshot.
    fn was_just_released(&self) -> bool;
}

/// Previous/current snapshot of a single control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    previous: bool,
    current: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the current snapshot to previous and record the new one.
    pub fn advance(&mut self, held_now: bool) {
        self.previous = self.current;
        self.current = held_now;
    }

    /// Forget both snapshots (e.g. after the terminal lost focus).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl InputQuery for ControlState {
    fn is_held(&self) -> bool {
        self.current
    }

    fn was_just_pressed(&self) -> bool {
        self.current && !self.previous
    }

    fn was_just_released(&self) -> bool {
        !self.current && self.previous
    }
}

/// Jump control state for one physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpInput {
    pub held: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl JumpInput {
    /// No key activity.
    pub const IDLE: JumpInput = JumpInput {
        held: false,
        just_pressed: false,
        just_released: false,
    };

    /// Key went down this step.
    pub const PRESS: JumpInput = JumpInput {
        held: true,
        just_pressed: true,
        just_released: false,
    };

    /// Key stays down.
    pub const HOLD: JumpInput = JumpInput {
        held: true,
        just_pressed: false,
        just_released: false,
    };

    /// Key came up this step.
    pub const RELEASE: JumpInput = JumpInput {
        held: false,
        just_pressed: false,
        just_released: true,
    };

    pub fn from_query<Q: InputQuery + ?Sized>(query: &Q) -> Self {
        Self {
            held: query.is_held(),
            just_pressed: query.was_just_pressed(),
            just_released: query.was_just_released(),
        }
    }
}

impl InputQuery for JumpInput {
    fn is_held(&self) -> bool {
        self.held
    }

    fn was_just_pressed(&self) -> bool {
        self.just_pressed
    }

    fn was_just_released(&self) -> bool {
        self.just_released
    }
}
