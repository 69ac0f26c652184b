pub mod app;
pub mod config;
pub mod constants;
pub mod credential;
pub mod dispatcher;
pub mod message;
pub mod store;
pub mod transcript;
