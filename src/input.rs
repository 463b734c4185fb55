use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in a fixed order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step `(dx, dy)` in cells. Coordinates grow rightward and downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Resolves a requested turn: exact reversals are ignored and the current
/// direction is kept.
#[must_use]
pub fn change_direction(current: Direction, requested: Direction) -> Direction {
    if requested == current.opposite() {
        current
    } else {
        requested
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    PauseToggle,
    Start,
    Reset,
    Quit,
}

/// Maps a raw terminal key event to a game input.
///
/// Only key presses count; releases, auto-repeats and unmapped keys yield
/// `None`.
#[must_use]
pub fn map_key(event: KeyEvent) -> Option<GameInput> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(GameInput::Quit),
            _ => None,
        };
    }

    let input = match event.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') => GameInput::PauseToggle,
        KeyCode::Enter => GameInput::Start,
        KeyCode::Char('r' | 'R') => GameInput::Reset,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{Direction, GameInput, change_direction, map_key};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversal_is_always_rejected() {
        for current in Direction::ALL {
            assert_eq!(change_direction(current, current.opposite()), current);
        }
    }

    #[test]
    fn any_other_turn_is_accepted() {
        for current in Direction::ALL {
            for requested in Direction::ALL {
                if requested != current.opposite() {
                    assert_eq!(change_direction(current, requested), requested);
                }
            }
        }
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('S'))),
            Some(GameInput::Direction(Direction::Down))
        );
        assert_eq!(
            map_key(press(KeyCode::Right)),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn control_keys_map_to_commands() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(GameInput::PauseToggle));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(GameInput::Start));
        assert_eq!(map_key(press(KeyCode::Char('r'))), Some(GameInput::Reset));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
    }

    #[test]
    fn unmapped_and_non_press_events_are_ignored() {
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);

        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);
    }
}
