//! Shared constants used across the application

/// Base URL of the public Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model addressed when neither the config nor the command line names one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Name of the tab opened at startup.
pub const DEFAULT_TAB_NAME: &str = "Default Chat";

/// Assistant text shown when a well-formed response carries no text.
pub const EMPTY_GENERATION_PLACEHOLDER: &str = "No content was generated. Please try again.";

/// Timestamp layout used for bubbles and saved transcripts.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
