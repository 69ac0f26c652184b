//! In-memory conversation store keyed by tab name.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::message::{Message, Origin};

/// What `create_session` does when the requested name is already open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Refuse the second session with [`StoreError::DuplicateName`].
    #[default]
    Reject,
    /// Accept the name and let both tabs share the existing history.
    Merge,
    /// Accept the name and start the shared history over from empty.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateName(String),
    UnknownSession(String),
    InvalidName,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateName(name) => {
                write!(f, "A chat tab named '{name}' is already open")
            }
            StoreError::UnknownSession(name) => write!(f, "No chat tab named '{name}'"),
            StoreError::InvalidName => write!(f, "Tab names cannot be empty"),
        }
    }
}

impl Error for StoreError {}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

/// Sessions in creation order plus a name index into them.
#[derive(Debug, Default)]
pub struct ConversationStore {
    policy: DuplicatePolicy,
    order: Vec<String>,
    sessions: HashMap<String, ChatSession>,
}

impl ConversationStore {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn create_session(&mut self, name: &str) -> Result<(), StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName);
        }
        if self.sessions.contains_key(name) {
            return match self.policy {
                DuplicatePolicy::Reject => Err(StoreError::DuplicateName(name.to_string())),
                DuplicatePolicy::Merge => {
                    tracing::debug!(session = name, "merging duplicate session name");
                    Ok(())
                }
                DuplicatePolicy::Overwrite => {
                    tracing::debug!(session = name, "clearing history for reused session name");
                    self.sessions.insert(name.to_string(), ChatSession::default());
                    Ok(())
                }
            };
        }
        self.order.push(name.to_string());
        self.sessions.insert(name.to_string(), ChatSession::default());
        Ok(())
    }

    pub fn append_message(
        &mut self,
        session_name: &str,
        text: impl Into<String>,
        origin: Origin,
        timestamp: NaiveDateTime,
    ) -> Result<(), StoreError> {
        let session = self
            .sessions
            .get_mut(session_name)
            .ok_or_else(|| StoreError::UnknownSession(session_name.to_string()))?;
        session.messages.push(Message::new(text, origin, timestamp));
        Ok(())
    }

    /// Messages of a session, oldest first. Each call starts a fresh iterator.
    pub fn messages(
        &self,
        session_name: &str,
    ) -> Result<impl Iterator<Item = &Message> + Clone, StoreError> {
        self.session(session_name).map(|session| session.messages.iter())
    }

    pub fn session(&self, session_name: &str) -> Result<&ChatSession, StoreError> {
        self.sessions
            .get(session_name)
            .ok_or_else(|| StoreError::UnknownSession(session_name.to_string()))
    }

    pub fn contains(&self, session_name: &str) -> bool {
        self.sessions.contains_key(session_name)
    }

    /// Names in the order the sessions were first created.
    pub fn session_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
