//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;

#[cfg(test)]
mod tests;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::cli::say::run_say;
use crate::core::config::{path_display, Config};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "tabchat", version)]
#[command(about = "A tabbed terminal chat client for generative language APIs")]
#[command(
    long_about = "tabchat is a full-screen terminal chat client. Each tab keeps its own \
conversation; messages are sent to a generateContent endpoint and replies appear as \
bubbles with timestamps.\n\n\
The API key is entered at runtime (Ctrl+K) and is never written to disk.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a newline\n\
  Ctrl+T            Open a new chat tab\n\
  Ctrl+K            Set the API key\n\
  Ctrl+O            Load a text file into the input box\n\
  Ctrl+S            Save the current tab's chat history\n\
  Ctrl+Left/Right   Switch tabs\n\
  Ctrl+Up/Down      Select a message bubble\n\
  Ctrl+Y            Copy the selected (or newest) message\n\
  PageUp/PageDown   Scroll the conversation\n\
  Ctrl+C            Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read configuration from this file instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Model to use for this run
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send a single prompt without the TUI; the API key is read from stdin
    Say {
        /// Prompt text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set configuration values, or print them when no value is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config_path = match args.config.clone() {
        Some(path) => path,
        None => Config::get_config_path()?,
    };
    let mut config = Config::load(Some(config_path.as_path()))?;

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Set { key, value } => {
            let Some(key) = key else {
                config.print_all();
                return Ok(());
            };
            if value.is_empty() {
                config.print_all();
                return Ok(());
            }
            if let Err(message) = config.set_value(&key, &value.join(" ")) {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
            config.save_to_path(&config_path)?;
            println!("✅ Set {key} to: {}", value.join(" "));
            println!("   ({})", path_display(&config_path));
            Ok(())
        }
        Commands::Unset { key } => {
            if let Err(message) = config.unset_value(&key) {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
            config.save_to_path(&config_path)?;
            println!("✅ Unset {key}");
            Ok(())
        }
        Commands::Say { prompt } => {
            apply_overrides(&mut config, args.model, args.log_file);
            start_logging(&config);
            run_say(prompt, &config).await
        }
        Commands::Chat => {
            apply_overrides(&mut config, args.model, args.log_file);
            start_logging(&config);
            run_chat(&config).await
        }
    }
}

/// Command-line flags win over the config file for this run only.
fn apply_overrides(config: &mut Config, model: Option<String>, log_file: Option<PathBuf>) {
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        config.model = Some(model);
    }
    if log_file.is_some() {
        config.log_file = log_file;
    }
}

fn start_logging(config: &Config) {
    if let Err(err) = init_tracing(config.log_file.as_deref()) {
        eprintln!("⚠️  Logging disabled: {err}");
        warn!(error = %err, "could not start logging");
    }
}
