//! Key routing for the chat loop.
//!
//! Handlers only mutate [`App`]; anything that needs the runtime or the
//! terminal is returned as a [`KeyAction`] for the loop to carry out.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_textarea::Input as TAInput;

use crate::core::app::{App, Modal, PendingSend, PromptKind};

const SCROLL_PAGE: u16 = 10;

pub enum KeyAction {
    None,
    Send(PendingSend),
    Copy(String),
    Quit,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.exit_requested = true;
        return KeyAction::Quit;
    }

    if app.modal().is_some() {
        handle_modal_key(app, key);
        return KeyAction::None;
    }

    if ctrl {
        if let Some(action) = handle_ctrl_shortcut(app, key.code) {
            return action;
        }
    }

    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            app.active_tab_mut().input.insert_newline();
            KeyAction::None
        }
        KeyCode::Enter => {
            app.clear_banner();
            app.clear_selection();
            match app.submit_active() {
                Some(pending) => KeyAction::Send(pending),
                None => KeyAction::None,
            }
        }
        KeyCode::Esc => {
            app.clear_selection();
            app.clear_banner();
            KeyAction::None
        }
        KeyCode::PageUp => {
            app.scroll_up(SCROLL_PAGE);
            KeyAction::None
        }
        KeyCode::PageDown => {
            app.scroll_down(SCROLL_PAGE);
            KeyAction::None
        }
        _ => {
            app.active_tab_mut().input.input(TAInput::from(key));
            KeyAction::None
        }
    }
}

fn handle_ctrl_shortcut(app: &mut App, code: KeyCode) -> Option<KeyAction> {
    match code {
        KeyCode::Char('t') => app.open_prompt(PromptKind::NewTab),
        KeyCode::Char('k') => app.open_prompt(PromptKind::ApiKey),
        KeyCode::Char('o') => app.open_prompt(PromptKind::OpenFile),
        KeyCode::Char('s') => app.open_prompt(PromptKind::SaveTranscript),
        KeyCode::Right => app.next_tab(),
        KeyCode::Left => app.previous_tab(),
        KeyCode::Up => app.select_previous_bubble(),
        KeyCode::Down => app.select_next_bubble(),
        KeyCode::Char('y') => {
            return Some(match app.copy_candidate() {
                Some(text) => KeyAction::Copy(text.to_string()),
                None => KeyAction::None,
            });
        }
        _ => return None,
    }
    Some(KeyAction::None)
}

fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let is_prompt = matches!(app.modal(), Some(Modal::Prompt(_)));
    match key.code {
        KeyCode::Esc => app.dismiss_modal(),
        KeyCode::Enter if is_prompt => app.confirm_prompt(),
        KeyCode::Enter => app.dismiss_modal(),
        _ => {
            if let Some(Modal::Prompt(prompt)) = app.modal_mut() {
                prompt.input.input(TAInput::from(key));
            }
        }
    }
}

/// Bracketed paste goes to the open prompt (flattened to one line) or the
/// active draft.
pub fn handle_paste(app: &mut App, text: &str) {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    match app.modal_mut() {
        Some(Modal::Prompt(prompt)) => {
            prompt.input.insert_str(text.replace('\n', " "));
        }
        Some(Modal::Dialog(_)) => {}
        None => {
            app.active_tab_mut().input.insert_str(text);
        }
    }
}
