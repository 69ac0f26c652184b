//! tabchat is a tabbed terminal client for the Gemini `generateContent` API.
//!
//! The crate is organized around a few collaborating layers:
//! - [`core`] owns the conversation store, the credential, the request
//!   dispatcher, configuration, and the application context tying them
//!   together.
//! - [`ui`] renders the terminal interface and runs the event loop that turns
//!   key presses into application actions.
//! - [`api`] defines the request/response payloads exchanged with the API.
//! - [`utils`] holds small helpers (URL joining, clipboard, bell, logging).
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
