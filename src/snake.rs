use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::input::Direction;

/// Grid-aligned position in board units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns the position one cell away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * cell_size,
            y: self.y + dy * cell_size,
        }
    }

    /// Returns true when the position lies on the board.
    #[must_use]
    pub fn is_on_board(self, config: &GameConfig) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < config.board_width()
            && self.y < config.board_height()
    }
}

/// Snake body (head first) and its current heading.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start]),
            direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Head position after one step in the current direction.
    #[must_use]
    pub fn next_head(&self, cell_size: i32) -> Position {
        self.head().step(self.direction, cell_size)
    }

    /// Pushes `new_head` and drops the tail unless the snake grows.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the tail position (equal to the head for a one-cell snake).
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if `position` hits a non-head segment. The tail counts
    /// even though it may move away on the same tick.
    #[must_use]
    pub fn collides_with_body(&self, position: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a well-formed snake.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn step_moves_one_cell_in_board_units() {
        let origin = Position { x: 200, y: 200 };

        assert_eq!(origin.step(Direction::Up, 20), Position { x: 200, y: 180 });
        assert_eq!(origin.step(Direction::Down, 20), Position { x: 200, y: 220 });
        assert_eq!(origin.step(Direction::Left, 20), Position { x: 180, y: 200 });
        assert_eq!(origin.step(Direction::Right, 20), Position { x: 220, y: 200 });
    }

    #[test]
    fn board_bounds_are_half_open() {
        let config = GameConfig::default();

        assert!(Position { x: 0, y: 0 }.is_on_board(&config));
        assert!(Position { x: 380, y: 380 }.is_on_board(&config));
        assert!(!Position { x: -20, y: 0 }.is_on_board(&config));
        assert!(!Position { x: 400, y: 0 }.is_on_board(&config));
        assert!(!Position { x: 0, y: 400 }.is_on_board(&config));
        assert!(!Position { x: 0, y: -20 }.is_on_board(&config));
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 40, y: 0 }, Position { x: 20, y: 0 }],
            Direction::Right,
        );

        let next = snake.next_head(20);
        snake.advance(next, false);

        assert_eq!(snake.head(), Position { x: 60, y: 0 });
        assert_eq!(snake.tail(), Position { x: 40, y: 0 });
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn advance_with_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position { x: 100, y: 100 }, Direction::Down);

        let next = snake.next_head(20);
        snake.advance(next, true);

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position { x: 100, y: 120 });
        assert_eq!(snake.tail(), Position { x: 100, y: 100 });
    }

    #[test]
    fn body_collision_skips_only_the_head() {
        let snake = Snake::from_segments(
            vec![
                Position { x: 40, y: 0 },
                Position { x: 20, y: 0 },
                Position { x: 0, y: 0 },
            ],
            Direction::Right,
        );

        assert!(!snake.collides_with_body(Position { x: 40, y: 0 }));
        assert!(snake.collides_with_body(Position { x: 20, y: 0 }));
        assert!(snake.collides_with_body(Position { x: 0, y: 0 }));
        assert!(!snake.collides_with_body(Position { x: 60, y: 0 }));
    }

    #[test]
    fn single_segment_snake_has_no_body_to_hit() {
        let snake = Snake::new(Position { x: 0, y: 0 }, Direction::Left);

        assert!(!snake.collides_with_body(Position { x: 0, y: 0 }));
        assert_eq!(snake.head(), snake.tail());
    }
}
