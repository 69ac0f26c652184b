pub mod data;
mod io;

pub use data::{path_display, Config};
pub use io::ConfigError;
