use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::game::EndReason;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32, theme: &Theme) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from(format!("High score: {high_score}")),
        Line::from("[Enter] Start"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD move, Space pauses"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, score: u32, theme: &Theme) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(Style::default().fg(theme.menu_title)),
        Line::from(format!("Score: {score}")),
        Line::from("[Space] Resume"),
        Line::from("[R] Reset"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
///
/// `reference_high_score` is the record before this game; beating it shows
/// the new-record line.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    reference_high_score: u32,
    end_reason: Option<EndReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let is_new_high = score > reference_high_score;
    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Score: {score}")),
        Line::from(format!(
            "High score: {}",
            reference_high_score.max(score)
        )),
        Line::from(cause_text(end_reason)),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from("[Enter] Play Again"),
        Line::from("[R] Reset  [Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn cause_text(end_reason: Option<EndReason>) -> &'static str {
    match end_reason {
        Some(EndReason::WallCollision) => "Cause: hit wall",
        Some(EndReason::SelfCollision) => "Cause: hit yourself",
        Some(EndReason::BoardCleared) => "Board cleared!",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
