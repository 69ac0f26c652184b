//! Application context: the single owner of the conversation store, the
//! credential and the per-tab presentation state.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::config::Config;
use crate::core::constants::DEFAULT_TAB_NAME;
use crate::core::credential::Credential;
use crate::core::dispatcher::{Dispatcher, SendError};
use crate::core::message::{self, Message, Origin};
use crate::core::store::{ConversationStore, StoreError};
use crate::core::transcript::{self, default_transcript_name};

pub mod ui_state;


pub use ui_state::{Banner, Dialog, DialogKind, Modal, Prompt, PromptKind, TabView};

/// Everything a background task needs to perform one send.
pub struct PendingSend {
    pub tab_index: usize,
    pub session: String,
    pub text: String,
    dispatcher: Dispatcher,
    credential: Credential,
}

impl PendingSend {
    pub async fn run(self) -> Reply {
        let result = self.dispatcher.send(&self.text, &self.credential).await;
        Reply {
            tab_index: self.tab_index,
            session: self.session,
            result,
        }
    }
}

/// Outcome of a [`PendingSend`], applied back on the event loop.
#[derive(Debug)]
pub struct Reply {
    pub tab_index: usize,
    pub session: String,
    pub result: Result<Option<String>, SendError>,
}

pub struct App {
    store: ConversationStore,
    credential: Credential,
    dispatcher: Dispatcher,
    tabs: Vec<TabView>,
    active: usize,
    modal: Option<Modal>,
    banner: Option<Banner>,
    bell_enabled: bool,
    pending_bells: usize,
    pub exit_requested: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_dispatcher(config, Dispatcher::from_config(config))
    }

    pub fn with_dispatcher(config: &Config, dispatcher: Dispatcher) -> Self {
        let mut app = Self {
            store: ConversationStore::new(config.duplicate_policy()),
            credential: Credential::default(),
            dispatcher,
            tabs: Vec::new(),
            active: 0,
            modal: None,
            banner: None,
            bell_enabled: config.bell_enabled(),
            pending_bells: 0,
            exit_requested: false,
        };
        if let Err(err) = app.open_tab(DEFAULT_TAB_NAME) {
            warn!(error = %err, "could not open the default tab");
        }
        app
    }

    // ---- tabs ------------------------------------------------------------

    /// Open a tab and make it active.
    pub fn open_tab(&mut self, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        self.store.create_session(name)?;
        self.tabs.push(TabView::new(name));
        self.active = self.tabs.len() - 1;
        info!(tab = name, "opened chat tab");
        Ok(())
    }

    pub fn tabs(&self) -> &[TabView] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> &TabView {
        &self.tabs[self.active]
    }

    pub fn active_tab_mut(&mut self) -> &mut TabView {
        &mut self.tabs[self.active]
    }

    pub fn select_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active = index;
        }
    }

    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active = (self.active + 1) % self.tabs.len();
        }
    }

    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active = (self.active + self.tabs.len() - 1) % self.tabs.len();
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Messages shown in the tab at `index`, oldest first.
    pub fn messages_for_tab(&self, index: usize) -> &[Message] {
        self.tabs
            .get(index)
            .and_then(|tab| self.store.session(&tab.name).ok())
            .map(|session| session.messages())
            .unwrap_or(&[])
    }

    pub fn active_messages(&self) -> &[Message] {
        self.messages_for_tab(self.active)
    }

    // ---- credential ------------------------------------------------------

    /// Replace the API key. Blank input leaves the current key in place.
    pub fn set_credential(&mut self, key: &str) -> bool {
        let changed = self.credential.replace(key);
        if changed {
            info!("API key updated");
            self.set_banner(format!("API key set ({})", self.credential.masked()));
        }
        changed
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.is_empty()
    }

    pub fn credential_hint(&self) -> String {
        self.credential.masked()
    }

    pub fn model(&self) -> &str {
        self.dispatcher.model()
    }

    // ---- sending ---------------------------------------------------------

    pub fn submit_active(&mut self) -> Option<PendingSend> {
        self.submit(self.active)
    }

    /// Turn the tab's draft into a user message and, when a key is set, the
    /// request that should follow it.
    ///
    /// The user message is appended before the request exists, so it is
    /// always rendered ahead of any reply.
    pub fn submit(&mut self, tab_index: usize) -> Option<PendingSend> {
        let tab = self.tabs.get_mut(tab_index)?;
        let text = tab.input_text().trim().to_string();
        if text.is_empty() {
            return None;
        }
        tab.clear_input();
        let session = tab.name.clone();

        self.append(&session, text.clone(), Origin::User);

        if self.credential.is_empty() {
            self.modal = Some(Modal::Dialog(Dialog::warning(
                "API Key Missing",
                "Please set your API key (Ctrl+K).",
            )));
            return None;
        }

        self.tabs[tab_index].pending += 1;
        debug!(tab = %session, "queued request");
        Some(PendingSend {
            tab_index,
            session,
            text,
            dispatcher: self.dispatcher.clone(),
            credential: self.credential.clone(),
        })
    }

    /// Append the outcome of a send to its session.
    ///
    /// Failures are rendered as assistant text, matching what a saved
    /// transcript has always contained, and also raised on the banner.
    pub fn apply_reply(&mut self, reply: Reply) {
        let Reply {
            tab_index,
            session,
            result,
        } = reply;
        if let Some(tab) = self.tabs.get_mut(tab_index) {
            tab.pending = tab.pending.saturating_sub(1);
        }

        match result {
            Ok(Some(text)) => self.append(&session, text, Origin::Assistant),
            Ok(None) => {}
            Err(SendError::EmptyGeneration) => {
                self.append(&session, SendError::EmptyGeneration.description(), Origin::Assistant)
            }
            Err(err) => {
                warn!(tab = %session, error = %err, "request failed");
                let description = err.description();
                self.append(&session, description.clone(), Origin::Assistant);
                self.set_error_banner(description);
            }
        }
    }

    fn append(&mut self, session: &str, text: String, origin: Origin) {
        match self
            .store
            .append_message(session, text, origin, message::now())
        {
            Ok(()) => {
                for tab in self.tabs.iter_mut().filter(|tab| tab.name == session) {
                    tab.scroll_from_bottom = 0;
                }
                if self.bell_enabled {
                    self.pending_bells += 1;
                }
            }
            Err(err) => warn!(error = %err, "dropping message for missing session"),
        }
    }

    /// Number of notification bells owed since the last call.
    pub fn take_bells(&mut self) -> usize {
        std::mem::take(&mut self.pending_bells)
    }

    // ---- files -----------------------------------------------------------

    /// Replace the active tab's draft with the contents of `path`.
    pub fn load_file_into_input(&mut self, path: &Path) {
        match transcript::read_upload(path) {
            Ok(contents) => {
                self.active_tab_mut().set_input_text(&contents);
                self.set_banner(format!("Loaded {}", path.display()));
            }
            Err(err) => {
                warn!(error = %err, "upload failed");
                self.modal = Some(Modal::Dialog(Dialog::error("File Error", err.to_string())));
            }
        }
    }

    /// Save the active tab's history as a plain-text transcript.
    pub fn save_active_transcript(&mut self, path: &Path) {
        let name = self.active_tab().name.clone();
        let result = match self.store.session(&name) {
            Ok(session) => transcript::save_transcript(path, session.messages()),
            Err(err) => {
                self.set_error_banner(err.to_string());
                return;
            }
        };
        match result {
            Ok(()) => {
                info!(tab = %name, path = %path.display(), "saved transcript");
                self.modal = Some(Modal::Dialog(Dialog::info(
                    "Chat Saved",
                    "Chat history has been saved successfully.",
                )));
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                self.modal = Some(Modal::Dialog(Dialog::error("Save Error", err.to_string())));
            }
        }
    }

    // ---- modals ----------------------------------------------------------

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        let initial = match kind {
            PromptKind::SaveTranscript => default_transcript_name(&self.active_tab().name),
            _ => String::new(),
        };
        self.modal = Some(Modal::Prompt(Prompt::new(kind, &initial)));
    }

    pub fn dismiss_modal(&mut self) {
        self.modal = None;
    }

    /// Act on the open prompt's value. Blank values behave like cancel.
    pub fn confirm_prompt(&mut self) {
        let Some(Modal::Prompt(prompt)) = self.modal.take() else {
            return;
        };
        let value = prompt.value();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        match prompt.kind {
            PromptKind::NewTab => {
                if let Err(err) = self.open_tab(trimmed) {
                    self.modal = Some(Modal::Dialog(Dialog::warning("Tab Name", err.to_string())));
                }
            }
            PromptKind::ApiKey => {
                self.set_credential(&value);
            }
            PromptKind::OpenFile => self.load_file_into_input(Path::new(trimmed)),
            PromptKind::SaveTranscript => self.save_active_transcript(Path::new(trimmed)),
        }
    }

    // ---- banner ----------------------------------------------------------

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn set_banner(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error_banner(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    // ---- selection & scrolling -------------------------------------------

    pub fn select_previous_bubble(&mut self) {
        let count = self.active_messages().len();
        if count == 0 {
            return;
        }
        let tab = self.active_tab_mut();
        tab.selected = Some(match tab.selected {
            Some(index) => index.saturating_sub(1),
            None => count - 1,
        });
    }

    pub fn select_next_bubble(&mut self) {
        let count = self.active_messages().len();
        let tab = self.active_tab_mut();
        tab.selected = match tab.selected {
            Some(index) if index + 1 < count => Some(index + 1),
            _ => None,
        };
    }

    pub fn clear_selection(&mut self) {
        self.active_tab_mut().selected = None;
    }

    /// Text of the highlighted bubble, or of the newest one when nothing is
    /// highlighted.
    pub fn copy_candidate(&self) -> Option<&str> {
        let messages = self.active_messages();
        let index = self
            .active_tab()
            .selected
            .unwrap_or(messages.len().checked_sub(1)?);
        messages.get(index).map(Message::content)
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let tab = self.active_tab_mut();
        tab.scroll_from_bottom = tab.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let tab = self.active_tab_mut();
        tab.scroll_from_bottom = tab.scroll_from_bottom.saturating_sub(lines);
    }
}
