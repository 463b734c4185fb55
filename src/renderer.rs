use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_COLUMNS, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL,
    GameConfig, Theme,
};
use crate::game::{GameState, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, state: &GameState, config: &GameConfig, hud_info: HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, &hud_info);
    let board_area = board_rect(play_area, config);

    let theme = hud_info.theme;
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, state, config, theme);
    render_snake(frame, inner, state, config, theme);

    match state.status {
        GameStatus::Waiting => render_start_menu(frame, board_area, state.high_score, theme),
        GameStatus::Paused => render_pause_menu(frame, board_area, state.score, theme),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            board_area,
            state.score,
            hud_info.reference_high_score,
            state.end_reason,
            theme,
        ),
        GameStatus::Playing => {}
    }
}

/// Centres the bordered board inside `area`, shrinking it when the terminal
/// is too small.
fn board_rect(area: Rect, config: &GameConfig) -> Rect {
    let width = config
        .columns
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = config.rows.saturating_add(2).min(area.height);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

fn render_food(
    frame: &mut Frame<'_>,
    inner: Rect,
    state: &GameState,
    config: &GameConfig,
    theme: &Theme,
) {
    let Some((x, y)) = board_to_terminal(inner, config, state.food.position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.play_bg));
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    state: &GameState,
    config: &GameConfig,
    theme: &Theme,
) {
    let length = state.snake.len();
    let buffer = frame.buffer_mut();

    for (index, segment) in state.snake.segments().enumerate() {
        let Some((x, y)) = board_to_terminal(inner, config, *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                head_glyph(state.snake.direction()),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index + 1 == length {
            (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body))
        };

        buffer.set_string(x, y, glyph, style.bg(theme.play_bg));
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a board position to the terminal cell of its left column.
fn board_to_terminal(inner: Rect, config: &GameConfig, position: Position) -> Option<(u16, u16)> {
    if !position.is_on_board(config) {
        return None;
    }

    let column = u16::try_from(position.x / config.cell_size).ok()?;
    let row = u16::try_from(position.y / config.cell_size).ok()?;

    let x = inner.x.saturating_add(column.saturating_mul(CELL_COLUMNS));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::{GameConfig, THEME_CLASSIC};
    use crate::game::GameState;
    use crate::snake::Position;
    use crate::ui::hud::HudInfo;

    use super::{board_rect, board_to_terminal, render};

    #[test]
    fn board_positions_map_to_double_width_cells() {
        let config = GameConfig::default();
        let inner = Rect::new(10, 5, 40, 20);

        assert_eq!(
            board_to_terminal(inner, &config, Position { x: 0, y: 0 }),
            Some((10, 5))
        );
        assert_eq!(
            board_to_terminal(inner, &config, Position { x: 380, y: 380 }),
            Some((48, 24))
        );
        assert_eq!(
            board_to_terminal(inner, &config, Position { x: 400, y: 0 }),
            None
        );
    }

    #[test]
    fn board_is_centred_and_clamped() {
        let config = GameConfig::default();

        let roomy = board_rect(Rect::new(0, 0, 100, 40), &config);
        assert_eq!((roomy.width, roomy.height), (42, 22));
        assert_eq!((roomy.x, roomy.y), (29, 9));

        let cramped = board_rect(Rect::new(0, 0, 30, 10), &config);
        assert_eq!((cramped.width, cramped.height), (30, 10));
    }

    #[test]
    fn waiting_screen_renders_without_panicking() {
        let config = GameConfig::default();
        let state = GameState::waiting(&config, 120);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("test terminal");

        terminal
            .draw(|frame| {
                render(
                    frame,
                    &state,
                    &config,
                    HudInfo {
                        reference_high_score: 120,
                        theme: &THEME_CLASSIC,
                    },
                )
            })
            .expect("draw should succeed");

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("SNAKE"));
        assert!(rendered.contains("120"));
    }
}
