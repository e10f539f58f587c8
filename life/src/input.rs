//! Discrete input events. Frontends translate platform events into these.

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Button {
    Primary,
    Secondary,
    /// Usually the wheel button.
    Auxiliary,
    Other(u16),
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Pointer {
    Mouse(Button),
    Touch,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Key {
    Space,
    Backspace,
    Delete,
    Char(char),
    Other,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Event {
    /// The fixed-rate timer fired.
    Tick,
    TogglePause,
    Clear,
    Randomize,
    Key(Key),
    PointerDown { row: usize, col: usize, pointer: Pointer },
    /// The pointer moved onto a cell.
    PointerEnter { row: usize, col: usize },
    PointerUp { pointer: Pointer },
    /// The pointer left the window or document.
    PointerLeave,
    ContextMenu { touch: bool },
}

impl Key {
    /// The command bound to this key, if any.
    pub fn command(self) -> Option<Event> {
        match self {
            Key::Space => Some(Event::TogglePause),
            Key::Backspace | Key::Delete | Key::Char('c') => Some(Event::Clear),
            Key::Char('r') => Some(Event::Randomize),
            Key::Char(_) | Key::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Key::Space.command(), Some(Event::TogglePause));
        assert_eq!(Key::Char('c').command(), Some(Event::Clear));
        assert_eq!(Key::Backspace.command(), Some(Event::Clear));
        assert_eq!(Key::Delete.command(), Some(Event::Clear));
        assert_eq!(Key::Char('r').command(), Some(Event::Randomize));
        assert_eq!(Key::Char('x').command(), None);
        assert_eq!(Key::Other.command(), None);
    }
}
