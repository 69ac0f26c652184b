//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the interaction loop that routes keys into [`crate::core::app::App`]
//!   and starts requests.
//! - [`renderer`] and [`bubbles`]: frame composition and message bubble layout.

pub mod bubbles;
pub mod chat_loop;
pub mod renderer;
