use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::grid::{Grid, Position};
use crate::session::{SessionStatus, Snapshot};
use crate::theme::Theme;

/// Two terminal columns per logical cell keeps the board visually square.
const CELL_GLYPH: &str = "  ";

/// Supplemental values displayed in the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub high_score: u32,
    pub speed_label: &'static str,
    pub min_interval_ms: u64,
    pub plays: u32,
    pub muted: bool,
    pub theme: &'a Theme,
}

/// Renders the full frame from an immutable snapshot.
///
/// The snapshot is read-only by construction; nothing here reaches back
/// into the session.
pub fn render(frame: &mut Frame<'_>, view: &Snapshot<'_>, info: &HudInfo<'_>) {
    let [board_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(frame.area());

    let board = board_rect(board_area, view.grid.size());
    let block = Block::bordered().style(Style::new().bg(info.theme.background));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, view, info.theme);
    render_snake(frame, inner, view, info.theme);
    render_hud(frame, hud_area, view, info);

    match view.status {
        SessionStatus::Idle => render_overlay(
            frame,
            board,
            "Ready?",
            "Press Enter to start, arrows or WASD to move",
            info.theme,
        ),
        SessionStatus::Paused => render_overlay(
            frame,
            board,
            "Paused",
            &format!("Score: {}", view.score),
            info.theme,
        ),
        SessionStatus::Ended => render_overlay(
            frame,
            board,
            "Game Over",
            &format!(
                "Score: {}  High Score: {}",
                view.score,
                view.score.max(info.high_score)
            ),
            info.theme,
        ),
        SessionStatus::Running => {}
    }
}

/// Centers the bordered board within `area`, clamped to what fits.
fn board_rect(area: Rect, size: u16) -> Rect {
    let width = (size * 2 + 2).min(area.width);
    let height = (size + 2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Maps a logical cell to its terminal origin, or `None` when it does not
/// fit inside the clamped board.
fn cell_origin(inner: Rect, grid: Grid, position: Position) -> Option<(u16, u16)> {
    if !grid.in_bounds(position) {
        return None;
    }

    let x = inner.x + position.x as u16 * 2;
    let y = inner.y + position.y as u16;
    if x + 2 > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, view: &Snapshot<'_>, theme: &Theme) {
    let Some((x, y)) = cell_origin(inner, view.grid, view.food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, CELL_GLYPH, Style::new().bg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, view: &Snapshot<'_>, theme: &Theme) {
    let head = view.snake.head();

    let buffer = frame.buffer_mut();
    for segment in view.snake.segments() {
        let Some((x, y)) = cell_origin(inner, view.grid, *segment) else {
            continue;
        };

        let color = if *segment == head {
            theme.snake_head
        } else {
            theme.snake_body
        };
        buffer.set_string(x, y, CELL_GLYPH, Style::new().bg(color));
    }
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, view: &Snapshot<'_>, info: &HudInfo<'_>) {
    let [score_row, status_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let score_line = format!(
        "Score {}   High {}   Plays {}",
        view.score,
        view.score.max(info.high_score),
        info.plays
    );
    let sound = if info.muted { "off" } else { "on" };
    let status_line = format!(
        "Speed {}   Fastest {} ms   Sound {}",
        info.speed_label, info.min_interval_ms, sound
    );

    let buffer = frame.buffer_mut();
    if score_row.height > 0 {
        buffer.set_string(
            score_row.x,
            score_row.y,
            score_line,
            Style::new().fg(info.theme.snake_head),
        );
    }
    if status_row.height > 0 {
        buffer.set_string(status_row.x, status_row.y, status_line, Style::new());
    }
}

/// Draws a two-line message centered over the board.
fn render_overlay(frame: &mut Frame<'_>, board: Rect, title: &str, body: &str, theme: &Theme) {
    let mid_y = board.y + board.height / 2;
    let buffer = frame.buffer_mut();

    for (line, y, style) in [
        (
            title,
            mid_y.saturating_sub(1),
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD),
        ),
        (body, mid_y + 1, Style::new().fg(theme.food)),
    ] {
        let width = line.width() as u16;
        if width > board.width || y >= board.bottom() {
            continue;
        }
        let x = board.x + (board.width - width) / 2;
        buffer.set_string(x, y, line, style);
    }
}
