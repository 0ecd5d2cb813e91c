//! Input management
//!
//! The runtime never polls a device itself: a windowing collaborator
//! implements [`InputSource`] and is polled once per frame cycle. Key
//! transitions ("pressed this frame" versus "held") are derived by comparing
//! the new snapshot against the previous one.

/// Keys tracked by the keyboard state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Q key
    Q,
    /// E key
    E,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl KeyCode {
    /// Number of tracked keys
    pub const COUNT: usize = 13;

    fn index(self) -> usize {
        self as usize
    }
}

/// Transition of a key between the previous and current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Up in both snapshots
    None,
    /// Down this frame, up the frame before
    Pressed,
    /// Up this frame, down the frame before
    Released,
    /// Down in both snapshots
    Held,
}

/// A key transition reported by the input source
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    /// The key that changed
    pub key: KeyCode,
    /// Whether the key went down (true) or up (false)
    pub down: bool,
}

/// One frame's worth of polled input
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Key transitions since the previous poll
    pub key_events: Vec<KeyEvent>,
    /// Whether the windowing layer requested shutdown
    pub close_requested: bool,
}

/// Windowing collaborator contract, polled once per frame cycle
pub trait InputSource {
    /// Pump the platform event queue and report what happened since the
    /// previous poll
    fn poll(&mut self) -> InputSnapshot;
}

/// Previous and current keyboard snapshots
#[derive(Debug, Clone)]
pub struct KeyboardState {
    previous: [bool; KeyCode::COUNT],
    current: [bool; KeyCode::COUNT],
}

impl KeyboardState {
    fn new() -> Self {
        Self {
            previous: [false; KeyCode::COUNT],
            current: [false; KeyCode::COUNT],
        }
    }

    /// Whether the key is down in the current snapshot
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.current[key.index()]
    }

    /// The key's transition between the previous and current snapshot
    pub fn key_state(&self, key: KeyCode) -> ButtonState {
        match (self.previous[key.index()], self.current[key.index()]) {
            (false, false) => ButtonState::None,
            (false, true) => ButtonState::Pressed,
            (true, false) => ButtonState::Released,
            (true, true) => ButtonState::Held,
        }
    }
}

/// Immutable input snapshot handed to actors each frame
#[derive(Debug, Clone)]
pub struct InputState {
    /// Keyboard state
    pub keyboard: KeyboardState,
}

/// Folds polled snapshots into the per-frame input state
#[derive(Debug)]
pub struct InputSystem {
    state: InputState,
}

impl InputSystem {
    /// Create an input system with every key up
    pub fn new() -> Self {
        Self {
            state: InputState {
                keyboard: KeyboardState::new(),
            },
        }
    }

    /// The current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Roll the current snapshot into the previous one, then apply the
    /// polled key events
    pub fn update(&mut self, snapshot: &InputSnapshot) {
        let keyboard = &mut self.state.keyboard;
        keyboard.previous = keyboard.current;
        for event in &snapshot.key_events {
            keyboard.current[event.key.index()] = event.down;
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(events: &[(KeyCode, bool)]) -> InputSnapshot {
        InputSnapshot {
            key_events: events
                .iter()
                .map(|&(key, down)| KeyEvent { key, down })
                .collect(),
            close_requested: false,
        }
    }

    #[test]
    fn test_transition_table() {
        let mut input = InputSystem::new();

        // up & up -> None
        input.update(&snapshot(&[]));
        assert_eq!(input.state().keyboard.key_state(KeyCode::W), ButtonState::None);

        // up & down -> Pressed
        input.update(&snapshot(&[(KeyCode::W, true)]));
        assert_eq!(input.state().keyboard.key_state(KeyCode::W), ButtonState::Pressed);

        // down & down -> Held
        input.update(&snapshot(&[]));
        assert_eq!(input.state().keyboard.key_state(KeyCode::W), ButtonState::Held);

        // down & up -> Released
        input.update(&snapshot(&[(KeyCode::W, false)]));
        assert_eq!(input.state().keyboard.key_state(KeyCode::W), ButtonState::Released);

        // back to rest
        input.update(&snapshot(&[]));
        assert_eq!(input.state().keyboard.key_state(KeyCode::W), ButtonState::None);
    }

    #[test]
    fn test_key_down_tracks_current_snapshot() {
        let mut input = InputSystem::new();
        assert!(!input.state().keyboard.key_down(KeyCode::Space));

        input.update(&snapshot(&[(KeyCode::Space, true)]));
        assert!(input.state().keyboard.key_down(KeyCode::Space));

        // No events: state carries over
        input.update(&snapshot(&[]));
        assert!(input.state().keyboard.key_down(KeyCode::Space));
    }
}
