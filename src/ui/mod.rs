pub mod game_common;
pub mod runner_scene;

use crate::runner::{GameEngine, RenderSnapshot, Variant};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Smallest terminal the game screen fits in.
pub const MIN_WIDTH: u16 = 50;
pub const MIN_HEIGHT: u16 = 14;

/// Draw one frame of the game.
pub fn draw_ui(frame: &mut Frame, snapshot: &RenderSnapshot, engine: &GameEngine, variant: Variant) {
    let area = frame.size();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area);
        return;
    }
    runner_scene::render_runner_scene(frame, area, snapshot, engine, variant);
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}x{}), need {}x{}",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 1.min(area.height)),
    );
}
