//! TUI-less "say" command

use std::error::Error;
use std::io::{self, BufRead};

use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::credential::Credential;
use crate::core::dispatcher::{Dispatcher, SendError};

pub async fn run_say(prompt: Vec<String>, config: &Config) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: tabchat say <prompt>");
        std::process::exit(1);
    }

    let credential = read_credential(io::stdin().lock())?;
    let dispatcher = Dispatcher::from_config(config);
    info!(model = dispatcher.model(), "sending one-shot prompt");

    match say_once(&dispatcher, &prompt, &credential).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "one-shot prompt failed");
            eprintln!("❌ Error: {err}");
            std::process::exit(1);
        }
    }
}

/// First line of `reader`, trimmed. An empty line gives an empty credential.
pub fn read_credential<R: BufRead>(mut reader: R) -> io::Result<Credential> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(Credential::new(&line))
}

/// Send `prompt` once. An empty generation is reported as the placeholder
/// text rather than an error, as in the chat view.
pub async fn say_once(
    dispatcher: &Dispatcher,
    prompt: &str,
    credential: &Credential,
) -> Result<String, SendError> {
    match dispatcher.send(prompt, credential).await {
        Ok(Some(reply)) => Ok(reply),
        Ok(None) => Ok(String::new()),
        Err(SendError::EmptyGeneration) => Ok(SendError::EmptyGeneration.description()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::HttpStub;
    use std::io::Cursor;

    fn dispatcher_for(base_url: &str) -> Dispatcher {
        Dispatcher::new(
            reqwest::Client::new(),
            base_url,
            "test-model",
            None,
        )
    }

    #[test]
    fn credential_is_first_trimmed_line() {
        let credential = read_credential(Cursor::new("  abc-123  \nignored\n")).unwrap();
        assert_eq!(credential.expose(), "abc-123");
        assert!(read_credential(Cursor::new("")).unwrap().is_empty());
    }

    #[tokio::test]
    async fn say_once_returns_reply_text() {
        let stub = HttpStub::spawn(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"hi back"}]}}]}"#,
        )
        .await;
        let reply = say_once(&dispatcher_for(&stub.base_url), "hi", &Credential::new("k"))
            .await
            .unwrap();
        assert_eq!(reply, "hi back");
    }

    #[tokio::test]
    async fn say_once_reports_missing_key() {
        let err = say_once(&dispatcher_for("http://127.0.0.1:9"), "hi", &Credential::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::MissingCredential));
    }
}
