use std::collections::HashSet;

use rand::Rng;

use crate::config::GameConfig;
use crate::snake::{Position, Snake};

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places food on a cell the snake does not occupy.
    ///
    /// Returns `None` when the snake covers the whole board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig, snake: &Snake) -> Option<Self> {
        spawn_position(rng, config, snake).map(Self::new)
    }
}

/// Draws cells uniformly over the board, rejecting any the snake occupies.
///
/// Returns `None` instead of sampling when no free cell is left.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    snake: &Snake,
) -> Option<Position> {
    let occupied: HashSet<Position> = snake
        .segments()
        .copied()
        .filter(|segment| segment.is_on_board(config))
        .collect();
    if occupied.len() >= config.total_cells() {
        return None;
    }

    loop {
        let candidate = config.cell(
            rng.gen_range(0..i32::from(config.columns)),
            rng.gen_range(0..i32::from(config.rows)),
        );
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }
}
