//! Screen geometry shared by the renderer and pointer hit-testing.
//!
//! Terminal cells are mapped onto a logical arena where each cell is
//! `CELL_WIDTH` units wide and `CELL_HEIGHT` units tall, which keeps
//! targets round on a typical 1:2 terminal font.

use ratatui::layout::{Position, Rect};

use crate::game::Arena;
use crate::game_mode::GameMode;

pub const CELL_WIDTH: f64 = 10.0;
pub const CELL_HEIGHT: f64 = 20.0;

const TITLE_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 26;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_SPACING: u16 = 1;
const CONFIRM_WIDTH: u16 = 12;

/// Logical arena covering `area`
pub fn arena_for(area: Rect) -> Arena {
    Arena::new(
        area.width as f64 * CELL_WIDTH,
        area.height as f64 * CELL_HEIGHT,
    )
}

/// Centre of the cell at (`column`, `row`) in arena units
pub fn cell_to_arena(area: Rect, column: u16, row: u16) -> (f64, f64) {
    let col = column.saturating_sub(area.x) as f64;
    let row = row.saturating_sub(area.y) as f64;
    (
        col * CELL_WIDTH + CELL_WIDTH / 2.0,
        row * CELL_HEIGHT + CELL_HEIGHT / 2.0,
    )
}

/// Button and panel placement for one terminal size
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLayout {
    pub area: Rect,
    pub title: Rect,
    pub leaderboards: Rect,
    pub mode_buttons: Vec<(GameMode, Rect)>,
    pub clear_button: Rect,
    pub confirm_yes: Rect,
    pub confirm_no: Rect,
    pub continue_button: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let center_x = area.x + area.width / 2;
        let center_y = area.y + area.height / 2;
        let board_width = area.width * 2 / 3;

        let title = Rect::new(area.x, area.y, area.width, TITLE_HEIGHT).intersection(area);

        let section_x = area.x + board_width;
        let section_width = area.width - board_width;
        let button_width = BUTTON_WIDTH.min(section_width);
        let button_x = section_x + (section_width - button_width) / 2;
        let mode_buttons = GameMode::ALL
            .iter()
            .enumerate()
            .map(|(i, mode)| {
                let y = area.y + TITLE_HEIGHT + i as u16 * (BUTTON_HEIGHT + BUTTON_SPACING);
                (
                    *mode,
                    Rect::new(button_x, y, button_width, BUTTON_HEIGHT).intersection(area),
                )
            })
            .collect();

        let wide = BUTTON_WIDTH.min(area.width);
        let clear_y = area.bottom().saturating_sub(BUTTON_HEIGHT + 1).max(area.y);
        let clear_button =
            Rect::new(center_x.saturating_sub(wide / 2), clear_y, wide, BUTTON_HEIGHT)
                .intersection(area);

        let board_top = area.y + TITLE_HEIGHT;
        let leaderboards = Rect::new(
            area.x,
            board_top,
            board_width,
            clear_y.saturating_sub(board_top),
        )
        .intersection(area);

        let confirm_yes = Rect::new(
            center_x.saturating_sub(CONFIRM_WIDTH + 2),
            center_y + 1,
            CONFIRM_WIDTH,
            BUTTON_HEIGHT,
        )
        .intersection(area);
        let confirm_no = Rect::new(center_x + 2, center_y + 1, CONFIRM_WIDTH, BUTTON_HEIGHT)
            .intersection(area);

        let continue_button = Rect::new(
            center_x.saturating_sub(wide / 2),
            center_y + 2,
            wide,
            BUTTON_HEIGHT,
        )
        .intersection(area);

        Self {
            area,
            title,
            leaderboards,
            mode_buttons,
            clear_button,
            confirm_yes,
            confirm_no,
            continue_button,
        }
    }

    pub fn mode_at(&self, column: u16, row: u16) -> Option<GameMode> {
        let pos = Position::new(column, row);
        self.mode_buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(mode, _)| *mode)
    }

    pub fn clear_clicked(&self, column: u16, row: u16) -> bool {
        self.clear_button.contains(Position::new(column, row))
    }

    pub fn confirm_yes_clicked(&self, column: u16, row: u16) -> bool {
        self.confirm_yes.contains(Position::new(column, row))
    }

    pub fn confirm_no_clicked(&self, column: u16, row: u16) -> bool {
        self.confirm_no.contains(Position::new(column, row))
    }

    pub fn continue_clicked(&self, column: u16, row: u16) -> bool {
        self.continue_button.contains(Position::new(column, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ScreenLayout {
        ScreenLayout::new(Rect::new(0, 0, 120, 40))
    }

    #[test]
    fn test_arena_for() {
        assert_eq!(arena_for(Rect::new(0, 0, 80, 24)), Arena::new(800.0, 480.0));
    }

    #[test]
    fn test_cell_to_arena_uses_cell_centre() {
        let area = Rect::new(2, 1, 80, 24);
        assert_eq!(cell_to_arena(area, 2, 1), (5.0, 10.0));
        assert_eq!(cell_to_arena(area, 12, 4), (105.0, 70.0));
    }

    #[test]
    fn test_mode_buttons_stack_on_right() {
        let l = layout();

        assert_eq!(l.mode_buttons.len(), 4);
        for (mode, rect) in &l.mode_buttons {
            assert!(rect.x >= 80, "{} button not in right third", mode);
            assert_eq!(l.mode_at(rect.x + 1, rect.y + 1), Some(*mode));
        }
        for pair in l.mode_buttons.windows(2) {
            assert!(pair[0].1.bottom() <= pair[1].1.y);
        }
    }

    #[test]
    fn test_mode_at_misses_outside_buttons() {
        let l = layout();
        assert_eq!(l.mode_at(0, 0), None);
        assert_eq!(l.mode_at(10, 20), None);
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        let l = layout();

        assert!(!l.confirm_yes.intersects(l.confirm_no));
        for (_, rect) in &l.mode_buttons {
            assert!(!rect.intersects(l.clear_button));
        }
        assert!(l.clear_clicked(l.clear_button.x, l.clear_button.y));
        assert!(l.confirm_yes_clicked(l.confirm_yes.x, l.confirm_yes.y));
        assert!(l.confirm_no_clicked(l.confirm_no.x, l.confirm_no.y));
        assert!(l.continue_clicked(l.continue_button.x, l.continue_button.y));
    }

    #[test]
    fn test_tiny_area_stays_inside() {
        let area = Rect::new(0, 0, 10, 4);
        let l = ScreenLayout::new(area);

        for (_, rect) in &l.mode_buttons {
            assert!(rect.is_empty() || area.contains(rect.as_position()));
        }
        assert!(l.clear_button.right() <= area.right());
        assert!(l.clear_button.bottom() <= area.bottom());
    }
}
