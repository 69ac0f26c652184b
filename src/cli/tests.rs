use super::*;

mod test_helpers {
    use super::*;

    pub(super) fn parse_args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv)
            .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
    }
}

use test_helpers::parse_args;

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["tabchat"]);
    assert!(args.command.is_none());
    assert!(args.config.is_none());
    assert!(args.model.is_none());
}

#[test]
fn global_flags_parse_before_and_after_subcommand() {
    let cases: [&[&str]; 2] = [
        &["tabchat", "-m", "gemini-pro", "--log-file", "chat.log", "chat"],
        &["tabchat", "chat", "--model", "gemini-pro", "-l", "chat.log"],
    ];
    for argv in cases {
        let args = parse_args(argv);
        assert!(
            matches!(args.command, Some(Commands::Chat)),
            "argv={argv:?}"
        );
        assert_eq!(args.model.as_deref(), Some("gemini-pro"), "argv={argv:?}");
        assert_eq!(
            args.log_file.as_deref(),
            Some(std::path::Path::new("chat.log")),
            "argv={argv:?}"
        );
    }
}

#[test]
fn say_joins_trailing_words() {
    let args = parse_args(&["tabchat", "say", "hello", "there", "-world"]);
    match args.command {
        Some(Commands::Say { prompt }) => assert_eq!(prompt, ["hello", "there", "-world"]),
        _ => panic!("expected say"),
    }
}

#[test]
fn set_accepts_multi_word_values_and_no_value() {
    match parse_args(&["tabchat", "set", "base-url", "http://localhost:8080/v1"]).command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key.as_deref(), Some("base-url"));
            assert_eq!(value, ["http://localhost:8080/v1"]);
        }
        _ => panic!("expected set"),
    }
    match parse_args(&["tabchat", "set"]).command {
        Some(Commands::Set { key, value }) => {
            assert!(key.is_none());
            assert!(value.is_empty());
        }
        _ => panic!("expected set"),
    }
}

#[test]
fn unset_requires_a_key() {
    assert!(Args::try_parse_from(["tabchat", "unset"]).is_err());
    match parse_args(&["tabchat", "--config", "/tmp/c.toml", "unset", "model"]).command {
        Some(Commands::Unset { key }) => assert_eq!(key, "model"),
        _ => panic!("expected unset"),
    }
}

#[test]
fn overrides_replace_config_values() {
    let mut config = Config::default();
    apply_overrides(
        &mut config,
        Some("other-model".to_string()),
        Some(PathBuf::from("x.log")),
    );
    assert_eq!(config.model(), "other-model");
    assert_eq!(config.log_file, Some(PathBuf::from("x.log")));

    apply_overrides(&mut config, Some("  ".to_string()), None);
    assert_eq!(config.model(), "other-model");
    assert_eq!(config.log_file, Some(PathBuf::from("x.log")));
}
