use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Paragraph, Widget,
    },
};

use reflex::game::Screen as GameScreen;

use crate::ui::{render_button, render_centered, render_leaderboards};
use crate::App;

const TARGET_FILL_STEP: f64 = 2.0;

/// A UI Screen boundary: responsible for rendering one game screen
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Title, leaderboards and mode buttons
pub struct ModeSelectScreen;

impl Screen for ModeSelectScreen {
    fn render(&self, app: &App, _area: Rect, buf: &mut Buffer) {
        let layout = &app.layout;
        let title_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        render_centered(
            "FPS Reflex Practice",
            title_style,
            layout.title.y + layout.title.height / 2,
            layout.title,
            buf,
        );
        render_leaderboards(&app.scores, layout.leaderboards, buf);

        for (i, (mode, rect)) in layout.mode_buttons.iter().enumerate() {
            render_button(&format!("({}) {}", i + 1, mode.name()), Color::Green, *rect, buf);
        }
        render_button(
            "(c) Clear All Leaderboards",
            Color::Rgb(255, 50, 50),
            layout.clear_button,
            buf,
        );
    }
}

/// Yes/no dialog before wiping every leaderboard
pub struct ConfirmClearScreen;

impl Screen for ConfirmClearScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let layout = &app.layout;
        let center_y = area.y + area.height / 2;

        render_centered(
            "Clear All Leaderboards?",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            center_y.saturating_sub(4),
            area,
            buf,
        );
        render_centered(
            "This action cannot be undone!",
            Style::default().fg(Color::Rgb(255, 50, 50)),
            center_y.saturating_sub(2),
            area,
            buf,
        );
        render_button("(y) Yes", Color::Rgb(255, 50, 50), layout.confirm_yes, buf);
        render_button("(n) No", Color::Gray, layout.confirm_no, buf);
    }
}

pub struct CountdownScreen;

impl Screen for CountdownScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let Some(remaining) = app.game.countdown_remaining() else {
            return;
        };
        let center_y = area.y + area.height / 2;
        let white = Style::default().fg(Color::White);

        render_centered("Get Ready!", white, center_y.saturating_sub(3), area, buf);
        render_centered(
            &remaining.max(0).to_string(),
            white.add_modifier(Modifier::BOLD),
            center_y,
            area,
            buf,
        );
        render_centered(app.game.mode().name(), white, center_y + 3, area, buf);
    }
}

/// The arena with the live target and a hit counter
pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let arena = app.game.arena();
        let target = app.game.target().copied();

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, arena.width])
            .y_bounds([0.0, arena.height])
            .paint(|ctx| {
                if let Some(t) = target {
                    // Canvas y grows upwards; arena y grows downwards
                    let mut radius = t.radius;
                    while radius > 0.0 {
                        ctx.draw(&Circle {
                            x: t.x,
                            y: arena.height - t.y,
                            radius,
                            color: Color::Red,
                        });
                        radius -= TARGET_FILL_STEP;
                    }
                }
            })
            .render(area, buf);

        let counter = format!(
            "Targets: {}/{}",
            app.game.clicks(),
            app.game.max_clicks()
        );
        let hud = Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), 1).intersection(area);
        Paragraph::new(counter)
            .style(Style::default().fg(Color::White))
            .render(hud, buf);
    }
}

/// Round results and the continue button
pub struct EndedScreen;

impl Screen for EndedScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let center_y = area.y + area.height / 2;
        let white = Style::default().fg(Color::White);

        render_centered(
            &format!(
                "Average Reaction Time: {:.3} seconds",
                app.game.average_reaction_time()
            ),
            white.add_modifier(Modifier::BOLD),
            center_y.saturating_sub(3),
            area,
            buf,
        );
        if let Some(summary) = app.game.summary() {
            render_centered(
                &format!(
                    "best {:.3}s   slowest {:.3}s   sd {:.3}s   misses {}",
                    summary.best,
                    summary.slowest,
                    summary.std_dev,
                    app.game.misses()
                ),
                Style::default().fg(Color::Gray),
                center_y.saturating_sub(1),
                area,
                buf,
            );
        }
        render_button("Continue", Color::Green, app.layout.continue_button, buf);
    }
}

pub struct NameInputScreen;

impl Screen for NameInputScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let center_y = area.y + area.height / 2;
        let white = Style::default().fg(Color::White);

        render_centered("Enter your name:", white, center_y.saturating_sub(3), area, buf);

        let width = 21.min(area.width);
        let field = Rect::new(
            area.x + (area.width - width) / 2,
            center_y.saturating_sub(1),
            width,
            3,
        )
        .intersection(area);
        Paragraph::new(app.game.name_input())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Black).bg(Color::White))
            .render(field, buf);

        render_centered("Press ENTER to submit", white, center_y + 3, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: GameScreen) -> Box<dyn Screen> {
    match state {
        GameScreen::ModeSelect => Box::new(ModeSelectScreen),
        GameScreen::ConfirmClear => Box::new(ConfirmClearScreen),
        GameScreen::Countdown => Box::new(CountdownScreen),
        GameScreen::Playing => Box::new(PlayingScreen),
        GameScreen::Ended => Box::new(EndedScreen),
        GameScreen::NameInput => Box::new(NameInputScreen),
    }
}
