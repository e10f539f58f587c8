use crate::grid::Cell;
use crate::input::{Button, Pointer};

/// The value painted while a pointer gesture is in progress.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Brush {
    /// No gesture: the simulation is free to tick.
    #[default]
    None,
    Alive,
    Dead,
}

/// Pointer shape a renderer should show for the current brush.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CursorKind {
    Pointer,
    Crosshair,
    Cell,
}

impl Brush {
    pub fn cell(self) -> Option<Cell> {
        match self {
            Brush::None => None,
            Brush::Alive => Some(Cell::Alive),
            Brush::Dead => Some(Cell::Dead),
        }
    }

    pub fn is_active(self) -> bool {
        self != Brush::None
    }

    pub fn cursor(self) -> CursorKind {
        match self {
            Brush::None => CursorKind::Pointer,
            Brush::Alive => CursorKind::Crosshair,
            Brush::Dead => CursorKind::Cell,
        }
    }

    /// Brush for a mouse button, or `None` when the button does not paint.
    pub fn for_button(button: Button) -> Option<Brush> {
        match button {
            Button::Primary => Some(Brush::Alive),
            Button::Secondary => Some(Brush::Dead),
            Button::Auxiliary | Button::Other(_) => None,
        }
    }

    /// Brush for a press on a cell currently holding `target`.
    /// Touch input toggles the pressed cell.
    pub fn for_press(pointer: Pointer, target: Cell) -> Option<Brush> {
        match pointer {
            Pointer::Mouse(button) => Brush::for_button(button),
            Pointer::Touch => Some(target.inverted().into()),
        }
    }
}

impl From<Cell> for Brush {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Alive => Brush::Alive,
            Cell::Dead => Brush::Dead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons() {
        assert_eq!(Brush::for_button(Button::Primary), Some(Brush::Alive));
        assert_eq!(Brush::for_button(Button::Secondary), Some(Brush::Dead));
        assert_eq!(Brush::for_button(Button::Auxiliary), None);
        assert_eq!(Brush::for_button(Button::Other(4)), None);
    }

    #[test]
    fn test_touch_toggles() {
        assert_eq!(Brush::for_press(Pointer::Touch, Cell::Dead), Some(Brush::Alive));
        assert_eq!(Brush::for_press(Pointer::Touch, Cell::Alive), Some(Brush::Dead));
        assert_eq!(
            Brush::for_press(Pointer::Mouse(Button::Primary), Cell::Alive),
            Some(Brush::Alive)
        );
    }

    #[test]
    fn test_cursors() {
        assert_eq!(Brush::None.cursor(), CursorKind::Pointer);
        assert_eq!(Brush::Alive.cursor(), CursorKind::Crosshair);
        assert_eq!(Brush::Dead.cursor(), CursorKind::Cell);
    }

    #[test]
    fn test_cell() {
        assert_eq!(Brush::None.cell(), None);
        assert_eq!(Brush::Alive.cell(), Some(Cell::Alive));
        assert!(!Brush::None.is_active());
        assert!(Brush::Dead.is_active());
    }
}
