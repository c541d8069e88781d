//! Screen chrome around the play field: outer frame, status rows, side
//! panel and the game-over box.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Rows reserved under the field: one message, one key hint line.
pub const STATUS_ROWS: u16 = 2;

/// Width of the side panel, border included.
pub const PANEL_WIDTH: u16 = 22;

/// Smallest field the split will try to keep.
const MIN_FIELD_COLS: u16 = 20;
const MIN_FIELD_ROWS: u16 = 10;

const HINT_KEY: Style = Style::new().fg(Color::White);
const HINT_ACTION: Style = Style::new().fg(Color::DarkGray);

/// A key and what it does, shown in the hint row.
pub type KeyHint<'a> = (&'a str, &'a str);

/// Where each part of the game screen goes.
///
/// ```text
/// ┌─ Hopper - Top Hold ─────────────┬─ Run ───────┐
/// │                                 │             │
/// │   field                         │  panel      │
/// │                                 │             │
/// │ status (2 rows)                 │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub struct ScreenLayout {
    pub field: Rect,
    pub status: Rect,
    pub panel: Rect,
}

/// Clear `area`, draw the outer frame and split what is inside it.
pub fn screen_layout(frame: &mut Frame, area: Rect, title: &str, accent: Color) -> ScreenLayout {
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [left, panel] = split(
        inner,
        Direction::Horizontal,
        [Constraint::Min(MIN_FIELD_COLS), Constraint::Length(PANEL_WIDTH)],
    );
    let [field, status] = split(
        left,
        Direction::Vertical,
        [Constraint::Min(MIN_FIELD_ROWS), Constraint::Length(STATUS_ROWS)],
    );

    ScreenLayout {
        field,
        status,
        panel,
    }
}

fn split(area: Rect, direction: Direction, constraints: [Constraint; 2]) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);
    [chunks[0], chunks[1]]
}

/// One row of text centered in `area` at vertical offset `row`.
fn centered_row(frame: &mut Frame, area: Rect, row: u16, line: Line) {
    if row >= area.height {
        return;
    }
    let target = Rect::new(area.x, area.y + row, area.width, 1);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), target);
}

/// Format key hints as `[Key] Action  [Key] Action`.
pub fn hint_line<'a>(hints: &[KeyHint<'a>]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, HINT_KEY));
        spans.push(Span::styled(format!(" {}", action), HINT_ACTION));
    }
    Line::from(spans)
}

/// Message row, then the key hints under it.
pub fn render_status(frame: &mut Frame, area: Rect, message: &str, color: Color, hints: &[KeyHint]) {
    centered_row(
        frame,
        area,
        0,
        Line::from(Span::styled(message, Style::default().fg(color))),
    );
    if !hints.is_empty() {
        centered_row(frame, area, 1, hint_line(hints));
    }
}

/// Bordered side panel; returns the area left for its content.
pub fn render_panel(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Box in the middle of the field with the run summary.
///
/// The field stays visible around it so the player can see what they ran
/// into.
pub fn render_game_over_box(frame: &mut Frame, field: Rect, summary: &[String], hints: &[KeyHint]) {
    // Border, title, blank, summary, blank, hints
    let wanted_rows = summary.len() as u16 + 6;
    let width = field.width.min(40);
    let height = wanted_rows.min(field.height);
    if width < 10 || height < 3 {
        return;
    }
    let boxed = Rect::new(
        field.x + (field.width - width) / 2,
        field.y + (field.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, boxed);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(boxed);
    frame.render_widget(block, boxed);

    let mut lines = Vec::with_capacity(summary.len() + 4);
    lines.push(Line::from(Span::styled(
        "GAME OVER",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines.extend(summary.iter().map(|s| Line::styled(s.as_str(), HINT_KEY)));
    lines.push(Line::default());
    lines.push(hint_line(hints));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
