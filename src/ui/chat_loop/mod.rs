//! Main chat event loop.
//!
//! The loop owns the [`App`]. Terminal events arrive from a reader task and
//! finished requests from their own tasks, both over one channel, so every
//! state change happens here between frames.

mod keybindings;
mod lifecycle;

use std::{error::Error, time::Duration};

use ratatui::crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use self::keybindings::{handle_key, handle_paste, KeyAction};
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::core::app::{App, PendingSend, Reply};
use crate::core::config::Config;
use crate::ui::renderer::ui;
use crate::utils::clipboard::copy_to_clipboard;
use crate::utils::notify::notify;

const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
    Reply(Reply),
}

pub async fn run_chat(config: &Config) -> Result<(), Box<dyn Error>> {
    let app = App::new(config);
    info!(model = app.model(), "starting chat session");

    let mut terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();

    let event_reader_handle = {
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(true) = event::poll(Duration::from_millis(10)) {
                    match event::read() {
                        Ok(ev) => {
                            if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                                break;
                            }
                        }
                        Err(_) => continue,
                    }
                } else {
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    let result = event_loop(app, &mut terminal, &event_tx, &mut event_rx).await;

    event_reader_handle.abort();
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    mut app: App,
    terminal: &mut ChatTerminal,
    event_tx: &mpsc::UnboundedSender<UiEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
) -> Result<(), Box<dyn Error>> {
    let mut frame_tick: usize = 0;
    let mut queued: Vec<PendingSend> = Vec::new();

    while !app.exit_requested {
        terminal.draw(|f| ui(f, &app, frame_tick))?;
        notify(app.take_bells());

        // Requests start only once the user bubble is on screen.
        for pending in queued.drain(..) {
            spawn_send(pending, event_tx.clone());
        }

        let waiting = app.tabs().iter().any(|tab| tab.pending > 0);
        let next = if waiting {
            match tokio::time::timeout(SPINNER_INTERVAL, event_rx.recv()).await {
                Ok(next) => next,
                Err(_) => {
                    frame_tick = frame_tick.wrapping_add(1);
                    continue;
                }
            }
        } else {
            event_rx.recv().await
        };
        let Some(first) = next else {
            break;
        };

        let mut pending_event = Some(first);
        while let Some(ui_event) = pending_event.take() {
            if let Some(send) = apply_event(&mut app, ui_event) {
                queued.push(send);
            }
            if app.exit_requested {
                break;
            }
            pending_event = event_rx.try_recv().ok();
        }
    }
    Ok(())
}

fn apply_event(app: &mut App, ui_event: UiEvent) -> Option<PendingSend> {
    match ui_event {
        UiEvent::Reply(reply) => {
            debug!(tab = %reply.session, "reply received");
            app.apply_reply(reply);
            None
        }
        UiEvent::Crossterm(Event::Key(key)) => match handle_key(app, key) {
            KeyAction::Send(pending) => Some(pending),
            KeyAction::Copy(text) => {
                match copy_to_clipboard(&text) {
                    Ok(()) => app.set_banner("Copied message to clipboard"),
                    Err(err) => {
                        warn!(error = %err, "clipboard copy failed");
                        app.set_error_banner(format!("Copy failed: {err}"));
                    }
                }
                None
            }
            KeyAction::None | KeyAction::Quit => None,
        },
        UiEvent::Crossterm(Event::Paste(text)) => {
            handle_paste(app, &text);
            None
        }
        UiEvent::Crossterm(_) => None,
    }
}

fn spawn_send(pending: PendingSend, event_tx: mpsc::UnboundedSender<UiEvent>) {
    debug!(tab = %pending.session, "dispatching request");
    tokio::spawn(async move {
        let reply = pending.run().await;
        if event_tx.send(UiEvent::Reply(reply)).is_err() {
            debug!("chat loop closed before reply arrived");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Origin;
    use crate::utils::test_utils::{create_test_app_with_key, HttpStub};
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[tokio::test]
    async fn reply_events_complete_a_send() {
        let stub = HttpStub::spawn(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"pong"}]}}]}"#,
        )
        .await;
        let config = Config {
            base_url: Some(stub.base_url.clone()),
            model: Some("test-model".to_string()),
            bell: Some(false),
            ..Default::default()
        };
        let mut app = App::new(&config);
        app.set_credential("k");
        app.active_tab_mut().set_input_text("ping");

        let pending = apply_event(
            &mut app,
            UiEvent::Crossterm(Event::Key(KeyEvent::new(
                KeyCode::Enter,
                KeyModifiers::NONE,
            ))),
        )
        .expect("send expected");

        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_send(pending, tx);
        let reply_event = rx.recv().await.expect("reply event");
        apply_event(&mut app, reply_event);

        let messages = app.active_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].origin(), Origin::Assistant);
        assert_eq!(messages[1].content(), "pong");
        assert_eq!(app.active_tab().pending, 0);
    }

    #[test]
    fn paste_events_fill_the_draft() {
        let mut app = create_test_app_with_key("k");
        apply_event(
            &mut app,
            UiEvent::Crossterm(Event::Paste("pasted".to_string())),
        );
        assert_eq!(app.active_tab().input_text(), "pasted");
    }
}
