use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::core::constants::TIMESTAMP_FORMAT;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    User,
    Assistant,
}

impl Origin {
    /// Label written in front of each transcript entry.
    pub fn transcript_label(self) -> &'static str {
        match self {
            Origin::User => "User",
            Origin::Assistant => "AI",
        }
    }

    pub fn is_user(self) -> bool {
        self == Origin::User
    }
}

/// One entry of a conversation. Fields are private so a message cannot change
/// after it has been appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    content: String,
    timestamp: NaiveDateTime,
    origin: Origin,
}

impl Message {
    /// Builds a message, dropping any sub-second part of `timestamp`.
    pub fn new(content: impl Into<String>, origin: Origin, timestamp: NaiveDateTime) -> Self {
        Self {
            content: content.into(),
            timestamp: timestamp.trunc_subsecs(0),
            origin,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_user(&self) -> bool {
        self.origin.is_user()
    }

    pub fn formatted_timestamp(&self) -> String {
        format_timestamp(self.timestamp)
    }
}

/// Current local time at second precision.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}
