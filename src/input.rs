//! Debounced keyboard state.
//!
//! Each tracked key is a three-state flag so a physical press issues exactly one
//! [`Command`], no matter how many frames the key stays down or how many
//! auto-repeat `keydown` events the browser delivers.

/// Keys the game listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Space,
}

impl Key {
    /// Sampling order.
    pub const ALL: [Key; 3] = [Key::Up, Key::Down, Key::Space];

    /// Maps a `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Option<Key> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }

    pub fn command(self) -> Command {
        match self {
            Key::Up => Command::MoveUp,
            Key::Down => Command::MoveDown,
            Key::Space => Command::Fire,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A discrete action sent to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Idle,
    Pressed,
    Held,
}

#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    states: [KeyState; 3],
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: Key) -> KeyState {
        self.states[key.index()]
    }

    /// Records a key-down edge. Returns `true` if the key is tracked.
    pub fn key_down(&mut self, dom_key: &str) -> bool {
        let Some(key) = Key::from_dom(dom_key) else {
            return false;
        };
        let state = &mut self.states[key.index()];
        if *state == KeyState::Idle {
            *state = KeyState::Pressed;
        }
        true
    }

    /// Records a key release, re-arming the key. Returns `true` if tracked.
    pub fn key_up(&mut self, dom_key: &str) -> bool {
        match Key::from_dom(dom_key) {
            Some(key) => {
                self.states[key.index()] = KeyState::Idle;
                true
            }
            None => false,
        }
    }

    /// Consumes pending presses, returning one command per press.
    pub fn take_commands(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        for key in Key::ALL {
            let state = &mut self.states[key.index()];
            if *state == KeyState::Pressed {
                *state = KeyState::Held;
                commands.push(key.command());
            }
        }
        commands
    }

    /// Marks pending presses as consumed without issuing anything.
    pub fn discard_pending(&mut self) {
        for state in &mut self.states {
            if *state == KeyState::Pressed {
                *state = KeyState::Held;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untracked_keys_are_ignored() {
        let mut kb = Keyboard::new();
        assert!(!kb.key_down("a"));
        assert!(!kb.key_down("ArrowLeft"));
        assert!(!kb.key_up("Enter"));
        assert!(Key::ALL.iter().all(|&k| kb.state(k) == KeyState::Idle));
        assert!(kb.take_commands().is_empty());
    }

    #[test]
    fn test_held_key_issues_command_once() {
        let mut kb = Keyboard::new();
        assert!(kb.key_down("ArrowUp"));

        assert_eq!(kb.take_commands(), vec![Command::MoveUp]);
        assert_eq!(kb.state(Key::Up), KeyState::Held);

        // Auto-repeat keydown events while held.
        kb.key_down("ArrowUp");
        kb.key_down("ArrowUp");
        assert!(kb.take_commands().is_empty());
        assert!(kb.take_commands().is_empty());
    }

    #[test]
    fn test_release_rearms_key() {
        let mut kb = Keyboard::new();
        for _ in 0..3 {
            kb.key_down(" ");
            assert_eq!(kb.take_commands(), vec![Command::Fire]);
            assert!(kb.take_commands().is_empty());
            kb.key_up(" ");
            assert_eq!(kb.state(Key::Space), KeyState::Idle);
        }
    }

    #[test]
    fn test_commands_follow_fixed_order() {
        let mut kb = Keyboard::new();
        kb.key_down(" ");
        kb.key_down("ArrowDown");
        kb.key_down("ArrowUp");
        assert_eq!(
            kb.take_commands(),
            vec![Command::MoveUp, Command::MoveDown, Command::Fire]
        );
    }

    #[test]
    fn test_discard_pending_consumes_without_commands() {
        let mut kb = Keyboard::new();
        kb.key_down("ArrowDown");
        kb.discard_pending();
        assert_eq!(kb.state(Key::Down), KeyState::Held);
        assert!(kb.take_commands().is_empty());

        kb.key_up("ArrowDown");
        kb.key_down("ArrowDown");
        assert_eq!(kb.take_commands(), vec![Command::MoveDown]);
    }
}
