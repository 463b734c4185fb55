use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::Position;

/// Errors raised while loading a [`GameConfig`] from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Fixed engine parameters supplied at construction.
///
/// Geometry is measured in board units: every [`Position`] coordinate is a
/// multiple of `cell_size`, and the board spans `columns * cell_size` by
/// `rows * cell_size` units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cell_size: i32,
    pub columns: u16,
    pub rows: u16,
    /// Tick interval at score 0, in milliseconds.
    pub initial_speed_ms: u64,
    /// Interval reduction applied per speed step.
    pub speed_increment_ms: u64,
    /// Lower bound on the tick interval.
    pub min_speed_ms: u64,
    pub points_per_food: u32,
    /// Score needed per speed step.
    pub points_per_speed_step: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            columns: 20,
            rows: 20,
            initial_speed_ms: 150,
            speed_increment_ms: 10,
            min_speed_ms: 50,
            points_per_food: 10,
            points_per_speed_step: 50,
        }
    }
}

impl GameConfig {
    /// Reads a JSON config file. Fields missing from the file keep their
    /// default values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::Invalid("cell_size must be positive"));
        }
        let fits = |cells: u16| i32::from(cells).checked_mul(self.cell_size).is_some();
        if !fits(self.columns) || !fits(self.rows) {
            return Err(ConfigError::Invalid("board size overflows i32 board units"));
        }
        if self.total_cells() < 2 {
            return Err(ConfigError::Invalid("board needs at least two cells"));
        }
        if self.points_per_speed_step == 0 {
            return Err(ConfigError::Invalid("points_per_speed_step must be non-zero"));
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::Invalid(
                "min_speed_ms must not exceed initial_speed_ms",
            ));
        }
        Ok(())
    }

    /// Board width in board units.
    #[must_use]
    pub fn board_width(&self) -> i32 {
        i32::from(self.columns) * self.cell_size
    }

    /// Board height in board units.
    #[must_use]
    pub fn board_height(&self) -> i32 {
        i32::from(self.rows) * self.cell_size
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        usize::from(self.columns) * usize::from(self.rows)
    }

    /// Converts cell indices into a grid-aligned position.
    #[must_use]
    pub fn cell(&self, column: i32, row: i32) -> Position {
        Position {
            x: column * self.cell_size,
            y: row * self.cell_size,
        }
    }

    /// Spawn point of the snake: the centre cell.
    #[must_use]
    pub fn origin(&self) -> Position {
        self.cell(i32::from(self.columns / 2), i32::from(self.rows / 2))
    }

    /// Food shown on the idle board before a game starts.
    #[must_use]
    pub fn placeholder_food(&self) -> Position {
        self.cell(i32::from(self.columns / 4), i32::from(self.rows / 4))
    }
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_score: Color,
    pub hud_high_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake on dark background.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::Gray,
    border_bg: Color::DarkGray,
    hud_score: Color::Green,
    hud_high_score: Color::Yellow,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "Ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Cyan,
    border_bg: Color::DarkGray,
    hud_score: Color::Cyan,
    hud_high_score: Color::Yellow,
    hud_muted: Color::DarkGray,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// All available themes in cycle order.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN];

/// Looks up a built-in theme by case-insensitive name.
#[must_use]
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Terminal columns used to draw one board cell.
pub const CELL_COLUMNS: u16 = 2;

pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";
pub const GLYPH_FOOD: &str = "◖◗";

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{ConfigError, GameConfig, theme_by_name};
    use crate::snake::Position;

    #[test]
    fn default_config_matches_reference_board() {
        let config = GameConfig::default();

        assert_eq!(config.board_width(), 400);
        assert_eq!(config.board_height(), 400);
        assert_eq!(config.total_cells(), 400);
        assert_eq!(config.origin(), Position { x: 200, y: 200 });
        assert_eq!(config.placeholder_food(), Position { x: 100, y: 100 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "columns": 12, "points_per_food": 5 }"#);

        let config = GameConfig::load(&path).expect("partial config should load");

        assert_eq!(config.columns, 12);
        assert_eq!(config.points_per_food, 5);
        assert_eq!(config.rows, 20);
        assert_eq!(config.initial_speed_ms, 150);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_config_file_is_a_parse_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "columns = 12");

        let error = GameConfig::load(&path).expect_err("malformed config should fail");

        assert!(matches!(error, ConfigError::Parse { .. }));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_config_file_is_a_read_error() {
        let path = unique_test_path("missing");

        let error = GameConfig::load(&path).expect_err("missing config should fail");

        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let empty_board = GameConfig {
            columns: 0,
            ..GameConfig::default()
        };
        let inverted_speed = GameConfig {
            min_speed_ms: 200,
            ..GameConfig::default()
        };
        let single_cell = GameConfig {
            columns: 1,
            rows: 1,
            ..GameConfig::default()
        };
        let zero_step = GameConfig {
            points_per_speed_step: 0,
            ..GameConfig::default()
        };
        let oversized_cells = GameConfig {
            cell_size: 200_000_000,
            ..GameConfig::default()
        };

        assert!(empty_board.validate().is_err());
        assert!(inverted_speed.validate().is_err());
        assert!(single_cell.validate().is_err());
        assert!(zero_step.validate().is_err());
        assert!(matches!(
            oversized_cells.validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn theme_lookup_ignores_case() {
        assert_eq!(theme_by_name("ocean").map(|theme| theme.name), Some("Ocean"));
        assert!(theme_by_name("neon").is_none());
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("retro-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
