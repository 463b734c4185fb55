use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::{ConfigError, GameConfig};
use crate::food::Food;
use crate::input::{Direction, GameInput, change_direction};
use crate::score::HighScoreStore;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Waiting,
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    /// Short label for status displays.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Waiting => "Press Enter to play",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::GameOver => "Game Over",
        }
    }
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake filled the board and no food could be placed.
    BoardCleared,
}

/// Snapshot of one game session.
///
/// Values are replaced wholesale by [`Engine`] operations; hosts read them
/// and submit inputs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    /// Milliseconds the scheduler waits between ticks.
    pub speed_ms: u64,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    /// Idle board shown before the first game: centred one-cell snake facing
    /// right and placeholder food.
    #[must_use]
    pub fn waiting(config: &GameConfig, high_score: u32) -> Self {
        Self {
            snake: Snake::new(config.origin(), Direction::Right),
            food: Food::new(config.placeholder_food()),
            score: 0,
            high_score,
            status: GameStatus::Waiting,
            speed_ms: config.initial_speed_ms,
            end_reason: None,
        }
    }
}

/// Tick interval for `score`: one speed step per `points_per_speed_step`
/// points, never below `min_speed_ms`.
#[must_use]
pub fn calculate_speed(config: &GameConfig, score: u32) -> u64 {
    let steps = u64::from(score / config.points_per_speed_step);
    config
        .initial_speed_ms
        .saturating_sub(steps.saturating_mul(config.speed_increment_ms))
        .max(config.min_speed_ms)
}

/// Deterministic transition logic for the game.
///
/// Every operation takes the current state by value and returns its
/// successor. The engine keeps only its configuration and the food RNG.
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine with an entropy-seeded food generator.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Creates a deterministic engine for tests and reproducible sessions.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Waiting state for a freshly launched host, with the stored high score.
    #[must_use]
    pub fn initial_state<S: HighScoreStore + ?Sized>(&self, store: &S) -> GameState {
        GameState::waiting(&self.config, store.high_score())
    }

    /// Begins a new game.
    #[must_use]
    pub fn start<S: HighScoreStore + ?Sized>(&mut self, store: &S) -> GameState {
        let snake = Snake::new(self.config.origin(), Direction::Right);
        // A validated board has at least two cells, so this always finds room.
        let food = Food::spawn(&mut self.rng, &self.config, &snake)
            .unwrap_or_else(|| Food::new(self.config.placeholder_food()));
        let high_score = store.high_score();

        info!(high_score, "game started");

        GameState {
            snake,
            food,
            score: 0,
            high_score,
            status: GameStatus::Playing,
            speed_ms: self.config.initial_speed_ms,
            end_reason: None,
        }
    }

    /// Turns the snake for the next tick, ignoring reversals. No-op unless
    /// playing.
    #[must_use]
    pub fn apply_direction_intent(&self, mut state: GameState, requested: Direction) -> GameState {
        if state.status != GameStatus::Playing {
            return state;
        }

        let direction = change_direction(state.snake.direction(), requested);
        state.snake.set_direction(direction);
        state
    }

    /// Advances the game by one step.
    #[must_use]
    pub fn tick<S: HighScoreStore + ?Sized>(&mut self, mut state: GameState, store: &mut S) -> GameState {
        if state.status != GameStatus::Playing {
            return state;
        }

        let next_head = state.snake.next_head(self.config.cell_size);

        if !next_head.is_on_board(&self.config) {
            return end_game(state, EndReason::WallCollision, store);
        }
        if state.snake.collides_with_body(next_head) {
            return end_game(state, EndReason::SelfCollision, store);
        }

        let ate_food = next_head == state.food.position;
        state.snake.advance(next_head, ate_food);

        if !ate_food {
            return state;
        }

        state.score = state.score.saturating_add(self.config.points_per_food);
        let speed_ms = calculate_speed(&self.config, state.score);
        if speed_ms != state.speed_ms {
            debug!(score = state.score, speed_ms, "speed increased");
        }
        state.speed_ms = speed_ms;

        match Food::spawn(&mut self.rng, &self.config, &state.snake) {
            Some(food) => {
                debug!(
                    score = state.score,
                    length = state.snake.len(),
                    x = food.position.x,
                    y = food.position.y,
                    "food eaten"
                );
                state.food = food;
                state
            }
            None => end_game(state, EndReason::BoardCleared, store),
        }
    }

    /// Playing and paused swap; other states are unchanged.
    #[must_use]
    pub fn toggle_pause(&self, mut state: GameState) -> GameState {
        state.status = match state.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            other => other,
        };
        state
    }

    /// Back to the waiting board. Only the high score of `state` survives;
    /// the store is not consulted.
    #[must_use]
    pub fn reset(&self, state: GameState) -> GameState {
        info!(high_score = state.high_score, "game reset");
        GameState::waiting(&self.config, state.high_score)
    }

    /// Applies one external input event.
    ///
    /// Start only takes effect from the waiting and game-over screens. Quit
    /// is left to the host.
    #[must_use]
    pub fn handle_input<S: HighScoreStore + ?Sized>(
        &mut self,
        state: GameState,
        input: GameInput,
        store: &S,
    ) -> GameState {
        match input {
            GameInput::Direction(direction) => self.apply_direction_intent(state, direction),
            GameInput::PauseToggle => self.toggle_pause(state),
            GameInput::Start
                if matches!(state.status, GameStatus::Waiting | GameStatus::GameOver) =>
            {
                self.start(store)
            }
            GameInput::Reset => self.reset(state),
            GameInput::Start | GameInput::Quit => state,
        }
    }
}

fn end_game<S: HighScoreStore + ?Sized>(
    mut state: GameState,
    reason: EndReason,
    store: &mut S,
) -> GameState {
    state.status = GameStatus::GameOver;
    state.end_reason = Some(reason);
    state.high_score = state.high_score.max(state.score);
    store.save_high_score(state.score);

    info!(
        score = state.score,
        high_score = state.high_score,
        length = state.snake.len(),
        ?reason,
        "game over"
    );

    state
}
