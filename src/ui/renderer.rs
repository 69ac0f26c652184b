use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::core::app::{App, DialogKind, Modal, Prompt};
use crate::ui::bubbles::conversation_lines;

const MAX_INPUT_ROWS: u16 = 8;
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn ui(f: &mut Frame, app: &App, frame_tick: usize) {
    let input_rows = (app.active_tab().input.lines().len() as u16).clamp(1, MAX_INPUT_ROWS);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(input_rows + 2),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(f, app, chunks[0]);
    render_messages(f, app, chunks[1], frame_tick);
    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);

    if let Some(modal) = app.modal() {
        render_modal(f, modal, f.area());
    }
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = app
        .tabs()
        .iter()
        .map(|tab| {
            if tab.pending > 0 {
                Line::from(format!("{} …", tab.name))
            } else {
                Line::from(tab.name.clone())
            }
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_index())
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    f.render_widget(tabs, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect, frame_tick: usize) {
    let tab = app.active_tab();
    let mut lines = conversation_lines(app.active_messages(), area.width, tab.selected);
    if tab.pending > 0 {
        let spinner = SPINNER[frame_tick % SPINNER.len()];
        lines.push(Line::from(Span::styled(
            format!(" {spinner} waiting for reply"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let title = format!(
        "tabchat v{} - {} • key: {}",
        env!("CARGO_PKG_VERSION"),
        app.model(),
        app.credential_hint()
    );
    let block = Block::default().title(title);
    let visible = block.inner(area).height;

    let offset = scroll_offset(lines.len(), visible, tab.scroll_from_bottom);

    let paragraph = Paragraph::new(lines).block(block).scroll((offset, 0));
    f.render_widget(paragraph, area);
}

/// Rows to skip from the top so the view ends `scroll_from_bottom` rows above
/// the newest line. Counts past `u16::MAX` saturate.
fn scroll_offset(total_lines: usize, visible: u16, scroll_from_bottom: u16) -> u16 {
    let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(visible);
    max_offset.saturating_sub(scroll_from_bottom.min(max_offset))
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let mut input = app.active_tab().input.clone();
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title("Message (Enter send, Alt+Enter newline, Ctrl+T tab, Ctrl+K key, Ctrl+O open, Ctrl+S save, Ctrl+C quit)"),
    );
    if app.modal().is_some() {
        input.set_cursor_style(Style::default());
    }
    f.render_widget(&input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.banner() {
        Some(banner) if banner.is_error => Line::from(Span::styled(
            banner.text.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Some(banner) => Line::from(Span::styled(
            banner.text.clone(),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            "Ctrl+←/→ switch tabs • Ctrl+↑/↓ select • Ctrl+Y copy • PgUp/PgDn scroll",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_modal(f: &mut Frame, modal: &Modal, area: Rect) {
    match modal {
        Modal::Prompt(prompt) => render_prompt(f, prompt, area),
        Modal::Dialog(dialog) => {
            let color = match dialog.kind {
                DialogKind::Info => Color::Green,
                DialogKind::Warning => Color::Yellow,
                DialogKind::Error => Color::Red,
            };
            let rect = centered_rect(60, 7, area);
            f.render_widget(Clear, rect);
            let body = Paragraph::new(vec![
                Line::from(dialog.body.clone()),
                Line::from(""),
                Line::from(Span::styled(
                    "Enter or Esc to close",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(dialog.title.clone()),
            );
            f.render_widget(body, rect);
        }
    }
}

fn render_prompt(f: &mut Frame, prompt: &Prompt, area: Rect) {
    let rect = centered_rect(60, 3, area);
    f.render_widget(Clear, rect);
    let mut input = prompt.input.clone();
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!("{} (Enter to confirm, Esc to cancel)", prompt.kind.title())),
    );
    f.render_widget(&input, rect);
}

/// A rectangle `percent_x` wide and `height` rows tall, centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width * percent_x / 100).max(20).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
