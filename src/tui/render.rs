use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::util::unicode::{display_width, truncate_to_width};

use super::app::{App, Mode};

const PANEL_WIDTH: u16 = 42;
const SCORE_WIDTH: usize = 7;

pub fn render(frame: &mut Frame, app: &mut App) {
    let [main, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    match app.mode {
        Mode::Filter => {
            let panel_w = PANEL_WIDTH.min(main.width / 2).max(20).min(main.width);
            let [panel, preview] =
                Layout::horizontal([Constraint::Length(panel_w), Constraint::Min(1)]).areas(main);
            render_panel(frame, app, panel);
            render_preview(frame, app, preview);
        }
        Mode::Browse => {
            render_preview(frame, app, main);
        }
    }

    render_status(frame, app, status);
}

/// Filter panel: query entry line, separator, ranked list with a
/// selection bar.
fn render_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" tagsift ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 {
        return;
    }

    let inner_w = inner.width as usize;
    let list_height = inner.height as usize - 2;
    app.list_height = list_height;

    let prompt_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let cursor_style = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = Vec::new();

    // Input line: "> query▌"
    lines.push(Line::from(vec![
        Span::styled("> ", prompt_style),
        Span::raw(app.session.query().to_string()),
        Span::styled("\u{258c}", cursor_style),
    ]));
    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(inner_w),
        dim,
    )));

    if app.session.is_empty() {
        lines.push(Line::from(Span::styled("  no symbols", dim)));
    } else {
        let cursor = app.session.cursor().unwrap_or(0);
        let scroll = if cursor >= list_height {
            cursor - list_height + 1
        } else {
            0
        };

        for row in 0..list_height {
            let pos = scroll + row;
            let Some(entry) = app.session.entry_at(pos) else {
                break;
            };
            let selected = Some(pos) == app.session.cursor();

            let indicator = if selected { "\u{258c}" } else { " " };
            let row_style = if selected {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let score_text = if app.config.ui.show_scores {
                let score = app.session.ranking()[pos].score;
                format!("{:>width$}", score, width = SCORE_WIDTH)
            } else {
                String::new()
            };
            let label_budget = inner_w.saturating_sub(2 + score_text.len());
            let label = truncate_to_width(&entry.label, label_budget);
            let pad = label_budget.saturating_sub(display_width(&label));

            lines.push(Line::from(vec![
                Span::styled(indicator, Style::default().fg(Color::Cyan)),
                Span::styled(format!(" {}{}", label, " ".repeat(pad)), row_style),
                Span::styled(score_text, dim),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Document pane with the current line highlighted.
fn render_preview(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(" {} ", app.path.display());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    app.view.height = inner.height as usize;
    app.view.recenter();

    let gutter_w = app.view.total.max(1).to_string().len();
    let dim = Style::default().fg(Color::DarkGray);
    let current = Style::default()
        .fg(Color::White)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..inner.height as usize {
        let at = app.view.scroll + row;
        let Some(text) = app.source.lines().get(at) else {
            break;
        };
        let number = format!("{:>gutter_w$} ", at + 1);
        let is_current = at + 1 == app.view.line;
        let body = truncate_to_width(text, (inner.width as usize).saturating_sub(number.len()));
        if is_current {
            lines.push(Line::from(vec![
                Span::styled(number, dim),
                Span::styled(body, current),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled(number, dim),
                Span::raw(body),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// One-row status bar: key hints on the left, flash/counts on the right.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);

    let hints = match app.mode {
        Mode::Filter => "type to filter  \u{2191}\u{2193} move  enter jump  esc cancel",
        Mode::Browse => "/ filter  \u{2191}\u{2193} scroll  q quit",
    };

    let right = match &app.flash {
        Some(message) => message.clone(),
        None => match app.mode {
            Mode::Filter => format!("{} symbols", app.session.len()),
            Mode::Browse => format!("line {}/{}", app.view.line, app.view.total),
        },
    };

    let width = area.width as usize;
    let left_width = width.saturating_sub(right.len() + 1);
    let left = truncate_to_width(hints, left_width);
    let pad = width.saturating_sub(display_width(&left) + right.len());

    let line = Line::from(vec![
        Span::styled(left, dim),
        Span::raw(" ".repeat(pad)),
        Span::raw(right),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
