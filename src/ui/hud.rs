use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::{GameState, GameStatus};

const HUD_SEPARATOR: &str = " │ ";

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    /// High score as it stood before the current game ended; lets the
    /// game-over popup tell whether a new record was set.
    pub reference_high_score: u32,
    pub theme: &'a Theme,
}

/// Renders the status row and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo<'_>) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(state, info.theme)).alignment(Alignment::Center),
        score_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(status_text(state)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(info.theme.hud_muted)),
        status_area,
    );

    play_area
}

fn score_line(state: &GameState, theme: &Theme) -> Line<'static> {
    let display_high_score = state.high_score.max(state.score);
    let sep = Span::styled(HUD_SEPARATOR, Style::default().fg(theme.hud_muted));

    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(
            state.score.to_string(),
            Style::default()
                .fg(theme.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::raw("Hi: "),
        Span::styled(
            display_high_score.to_string(),
            Style::default().fg(theme.hud_high_score),
        ),
        sep.clone(),
        Span::raw("Length: "),
        Span::raw(state.snake.len().to_string()),
        sep,
        Span::raw("Tick: "),
        Span::raw(format!("{}ms", state.speed_ms)),
    ])
}

fn status_text(state: &GameState) -> String {
    let hint = match state.status {
        GameStatus::Waiting => "[Enter] start  [Q] quit",
        GameStatus::Playing => "arrows/WASD move  [Space] pause  [R] reset",
        GameStatus::Paused => "[Space] resume  [R] reset",
        GameStatus::GameOver => "[Enter] play again  [R] reset",
    };
    format!("{}  ·  {hint}", state.status.label())
}
