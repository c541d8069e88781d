//! Runner game screen.
//!
//! The field is drawn into a cell buffer scaled down from field units to
//! terminal cells, then stamped row-by-row as Paragraph widgets.

use super::game_common::{render_game_over_box, render_panel, render_status, screen_layout, KeyHint};
use crate::runner::{Bounds, GameEngine, GameStatus, RenderSnapshot, Variant};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const GROUND_CHAR: char = '▓';
const PLAYER_CHAR: char = '█';
const OBSTACLE_CHAR: char = '█';
const HEART: char = '♥';

const PLAYER_COLOR: Color = Color::Rgb(255, 140, 0);
const OBSTACLE_COLOR: Color = Color::Magenta;

/// Absorbs float noise when an edge lands on a cell boundary.
const SNAP: f64 = 1e-6;

/// Frames per blink phase while invincible.
const BLINK_FRAMES: u64 = 6;

const RUNNING_HINTS: &[KeyHint<'static>] = &[
    ("[Space/Up]", "Jump"),
    ("[R]", "Restart"),
    ("[Esc]", "Quit"),
];
const OVER_HINTS: &[KeyHint<'static>] = &[("[Space/R]", "Play again"), ("[Esc]", "Quit")];

/// Render the whole game screen for one frame.
pub fn render_runner_scene(
    frame: &mut Frame,
    area: Rect,
    snapshot: &RenderSnapshot,
    engine: &GameEngine,
    variant: Variant,
) {
    let title = format!(" Hopper - {} ", variant.name());
    let layout = screen_layout(frame, area, &title, PLAYER_COLOR);

    render_play_field(frame, layout.field, snapshot, engine);
    render_status_bar_content(frame, layout.status, snapshot);
    render_info_panel(frame, layout.panel, snapshot, engine, variant);

    if snapshot.status == GameStatus::Over {
        let summary = [
            format!("Score: {}", snapshot.score),
            format!("Obstacles cleared: {}", engine.cleared()),
        ];
        render_game_over_box(frame, layout.field, &summary, OVER_HINTS);
    }
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Field units to terminal cells.
#[derive(Debug, Clone, Copy)]
struct Scale {
    x: f64,
    y: f64,
    cols: usize,
    /// Rows above the ground line.
    rows: usize,
}

impl Scale {
    fn new(area: Rect, field_width: f64, field_height: f64) -> Self {
        let cols = area.width as usize;
        let rows = area.height.saturating_sub(1) as usize;
        Self {
            x: cols as f64 / field_width,
            y: rows as f64 / field_height,
            cols,
            rows,
        }
    }

    /// Cell span covered by a box, clipped to the field. Every visible box
    /// covers at least one cell.
    fn cells(&self, bounds: &Bounds) -> Option<(usize, usize, usize, usize)> {
        let left = (bounds.x * self.x + SNAP).floor();
        let right = (bounds.right() * self.x - SNAP).ceil().max(left + 1.0);
        let top = (bounds.y * self.y + SNAP).floor();
        let bottom = (bounds.bottom() * self.y - SNAP).ceil().max(top + 1.0);

        let col0 = left.max(0.0) as usize;
        let col1 = (right.max(0.0) as usize).min(self.cols);
        let row0 = top.max(0.0) as usize;
        let row1 = (bottom.max(0.0) as usize).min(self.rows);
        (col0 < col1 && row0 < row1).then_some((col0, col1, row0, row1))
    }
}

fn fill(buffer: &mut [Vec<Cell>], span: (usize, usize, usize, usize), cell: Cell) {
    let (col0, col1, row0, row1) = span;
    for row in &mut buffer[row0..row1] {
        for c in &mut row[col0..col1] {
            *c = cell;
        }
    }
}

fn write_text(buffer: &mut [Vec<Cell>], row: usize, col: usize, text: &str, fg: Color) {
    let Some(line) = buffer.get_mut(row) else {
        return;
    };
    for (i, ch) in text.chars().enumerate() {
        if let Some(cell) = line.get_mut(col + i) {
            *cell = Cell {
                ch,
                fg,
                bg: Color::Reset,
            };
        }
    }
}

/// The player blinks out on alternate phases while invincible.
fn player_visible(snapshot: &RenderSnapshot) -> bool {
    !snapshot.invincible || (snapshot.frame / BLINK_FRAMES) % 2 == 0
}

fn hearts(lives: u32) -> String {
    std::iter::repeat(HEART).take(lives as usize).collect()
}

fn render_play_field(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot, engine: &GameEngine) {
    if area.height < 3 || area.width < 10 {
        return;
    }

    let config = engine.config();
    let scale = Scale::new(area, config.field_width, config.field_height);
    let mut buffer = vec![vec![Cell::default(); scale.cols]; scale.rows + 1];

    // Ground
    for cell in buffer[scale.rows].iter_mut() {
        *cell = Cell {
            ch: GROUND_CHAR,
            fg: Color::Rgb(90, 70, 50),
            bg: Color::Rgb(50, 40, 30),
        };
    }

    for obstacle in &snapshot.obstacles {
        if let Some(span) = scale.cells(obstacle) {
            fill(
                &mut buffer,
                span,
                Cell {
                    ch: OBSTACLE_CHAR,
                    fg: OBSTACLE_COLOR,
                    bg: Color::Reset,
                },
            );
        }
    }

    if player_visible(snapshot) {
        if let Some(span) = scale.cells(&snapshot.player) {
            fill(
                &mut buffer,
                span,
                Cell {
                    ch: PLAYER_CHAR,
                    fg: PLAYER_COLOR,
                    bg: Color::Reset,
                },
            );
        }
    }

    // Score top-left, hearts top-right
    write_text(&mut buffer, 0, 1, &format!("Score: {}", snapshot.score), Color::White);
    let lives = hearts(snapshot.lives);
    let lives_col = scale.cols.saturating_sub(lives.chars().count() + 1);
    write_text(&mut buffer, 0, lives_col, &lives, Color::Red);

    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        if row_area.y < area.y + area.height {
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot) {
    match snapshot.status {
        GameStatus::Over => render_status(frame, area, "Game over", Color::Red, OVER_HINTS),
        GameStatus::Running => {
            let message = if snapshot.invincible { "Ouch!" } else { "Run!" };
            render_status(frame, area, message, PLAYER_COLOR, RUNNING_HINTS);
        }
    }
}

fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    snapshot: &RenderSnapshot,
    engine: &GameEngine,
    variant: Variant,
) {
    let inner = render_panel(frame, area, " Run ");
    let config = engine.config();
    let physics = engine.physics();

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            label("Mode: "),
            Span::styled(variant.name(), Style::default().fg(PLAYER_COLOR)),
        ]),
        Line::from(vec![
            label("Score: "),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Lives: "),
            Span::styled(hearts(snapshot.lives), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![label("Cleared: "), value(engine.cleared().to_string())]),
    ];

    if config.max_jump_hold > 0 {
        let left = if physics.jumping && !physics.hold_released {
            config.max_jump_hold.saturating_sub(physics.hold_ticks)
        } else if physics.jumping {
            0
        } else {
            config.max_jump_hold
        };
        lines.push(Line::from(vec![
            label("Hold: "),
            value(format!("{}/{}", left, config.max_jump_hold)),
        ]));
    }
    if config.bonus_enabled {
        lines.push(Line::from(vec![
            label("Bonus: "),
            value(format!("+{}", config.bonus_points / config.score_divisor.max(1))),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Legend:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled(" █ ", Style::default().fg(PLAYER_COLOR)),
        label("You"),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" █ ", Style::default().fg(OBSTACLE_COLOR)),
        label("Obstacle"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> Scale {
        // 80 columns, 31 rows: 30 field rows plus the ground line
        Scale::new(Rect::new(0, 0, 80, 31), 800.0, 300.0)
    }

    fn snapshot(invincible: bool, frame: u64) -> RenderSnapshot {
        RenderSnapshot {
            player: Bounds::new(50.0, 280.0, 20.0, 20.0),
            obstacles: Vec::new(),
            score: 0,
            lives: 3,
            status: GameStatus::Running,
            invincible,
            jumping: false,
            frame,
            session: 0,
        }
    }

    #[test]
    fn test_grounded_player_sits_on_last_field_row() {
        let span = scale().cells(&Bounds::new(50.0, 280.0, 20.0, 20.0)).unwrap();
        assert_eq!(span, (5, 7, 28, 30));
    }

    #[test]
    fn test_small_boxes_cover_one_cell() {
        let span = scale().cells(&Bounds::new(3.0, 3.0, 1.0, 1.0)).unwrap();
        assert_eq!(span, (0, 1, 0, 1));
    }

    #[test]
    fn test_offscreen_boxes_are_skipped() {
        assert!(scale().cells(&Bounds::new(-40.0, 250.0, 20.0, 50.0)).is_none());
        assert!(scale().cells(&Bounds::new(820.0, 250.0, 20.0, 50.0)).is_none());
    }

    #[test]
    fn test_partially_visible_box_is_clipped() {
        let span = scale().cells(&Bounds::new(-10.0, 250.0, 20.0, 50.0)).unwrap();
        assert_eq!(span.0, 0);
        assert_eq!(span.1, 1);
    }

    #[test]
    fn test_player_blinks_only_while_invincible() {
        assert!(player_visible(&snapshot(false, BLINK_FRAMES)));
        assert!(player_visible(&snapshot(true, 0)));
        assert!(!player_visible(&snapshot(true, BLINK_FRAMES)));
        assert!(player_visible(&snapshot(true, BLINK_FRAMES * 2)));
    }

    #[test]
    fn test_hearts() {
        assert_eq!(hearts(0), "");
        assert_eq!(hearts(3), "♥♥♥");
    }
}
