pub mod screen;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget},
};

use reflex::game_mode::GameMode;
use reflex::highscores::{Highscores, ScoreEntry};

use crate::App;

/// Entries shown per mode on the menu
pub const MENU_BOARD_ROWS: usize = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.game.screen()).render(self, area, buf);
    }
}

/// `#1. name: 0.321s (01/02/24)`
pub fn format_entry(rank: usize, entry: &ScoreEntry) -> String {
    format!(
        "#{}. {}: {:.3}s ({})",
        rank, entry.name, entry.time, entry.date
    )
}

/// Ranked lines for one mode, or a placeholder when empty
pub fn leaderboard_text(scores: &Highscores, mode: GameMode, limit: usize) -> String {
    let top = scores.get_top(mode, limit);
    if top.is_empty() {
        return "No scores yet".to_string();
    }

    top.iter()
        .enumerate()
        .map(|(i, entry)| format_entry(i + 1, entry))
        .join("\n")
}

/// Two-by-two grid of per-mode leaderboards
pub(crate) fn render_leaderboards(scores: &Highscores, area: Rect, buf: &mut Buffer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    for (row, modes) in rows.iter().zip(GameMode::ALL.chunks(2)) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(*row);

        for (col, mode) in cols.iter().zip(modes) {
            let board = Paragraph::new(leaderboard_text(scores, *mode, MENU_BOARD_ROWS))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("{} - Top Scores", mode.name())),
                )
                .style(Style::default().fg(Color::White));
            board.render(*col, buf);
        }
    }
}

pub(crate) fn render_button(label: &str, bg: Color, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }

    let style = Style::default()
        .bg(bg)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);
    buf.set_style(area, style);

    let label_row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    Paragraph::new(Span::styled(label.to_string(), style))
        .alignment(Alignment::Center)
        .render(label_row, buf);
}

/// One centred line of text at `row`, clipped to `area`
pub(crate) fn render_centered(text: &str, style: Style, row: u16, area: Rect, buf: &mut Buffer) {
    let line = Rect::new(area.x, row, area.width, 1).intersection(area);
    if line.is_empty() {
        return;
    }

    Paragraph::new(Span::styled(text.to_string(), style))
        .alignment(Alignment::Center)
        .render(line, buf);
}
