//! Message bubble layout.
//!
//! Bubbles are pre-wrapped to explicit lines and padded to a common width so
//! the background colour forms a solid block; the paragraph that draws them
//! has ratatui wrapping disabled.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::message::Message;

const USER_BG: Color = Color::Rgb(0xDC, 0xF8, 0xC6);
const ASSISTANT_BG: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
const BUBBLE_FG: Color = Color::Black;
const PADDING: usize = 1;

/// Widest a bubble may get inside a pane `pane_width` columns wide.
pub fn max_bubble_width(pane_width: u16) -> usize {
    let pane = pane_width as usize;
    (pane * 3 / 4).clamp(8.min(pane), 96)
}

/// Word-wrap `text` to `width` columns, splitting words longer than a line.
/// Explicit newlines are kept; blank lines stay blank.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for source_line in text.split('\n') {
        let source_line = source_line.trim_end_matches('\r');
        if source_line.is_empty() {
            out.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut current_width = 0;
        for word in source_line.split(' ') {
            let word_width = word.width();
            let gap = usize::from(!current.is_empty());
            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }
        out.push(current);
    }
    out
}

fn pad_to(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!(
        "{pad}{text}{fill}{pad}",
        pad = " ".repeat(PADDING),
        fill = " ".repeat(fill)
    )
}

/// Lines for one bubble: the text, a blank line, the timestamp.
pub fn bubble_lines(message: &Message, pane_width: u16, selected: bool) -> Vec<Line<'static>> {
    let inner = max_bubble_width(pane_width).saturating_sub(PADDING * 2).max(1);
    let mut rows = wrap_text(message.content(), inner);
    rows.push(String::new());
    rows.push(message.formatted_timestamp());

    let body_width = rows.iter().map(|row| row.width()).max().unwrap_or(0);
    let background = if message.is_user() {
        USER_BG
    } else {
        ASSISTANT_BG
    };
    let mut style = Style::default().fg(BUBBLE_FG).bg(background);
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let timestamp_style = style.fg(Color::DarkGray);
    let alignment = if message.is_user() {
        Alignment::Right
    } else {
        Alignment::Left
    };

    let last = rows.len() - 1;
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row_style = if index == last {
                timestamp_style
            } else {
                style
            };
            Line::from(Span::styled(pad_to(row, body_width), row_style)).alignment(alignment)
        })
        .collect()
}

/// All bubbles of a conversation separated by blank lines.
pub fn conversation_lines(
    messages: &[Message],
    pane_width: u16,
    selected: Option<usize>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, message) in messages.iter().enumerate() {
        lines.extend(bubble_lines(message, pane_width, selected == Some(index)));
        lines.push(Line::from(""));
    }
    lines
}
