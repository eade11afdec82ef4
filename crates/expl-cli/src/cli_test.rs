use super::{Cli, Commands, OutputFormat};
use clap::{CommandFactory, Parser};

#[test]
fn cli_help_includes_required_top_level_commands() {
    let mut command = Cli::command();
    let help = command.render_long_help().to_string();
    assert!(help.contains("validate"));
    assert!(help.contains("graph"));
    assert!(help.contains("apply"));
}

#[test]
fn cli_parses_validate_with_json_format() {
    let cli = Cli::try_parse_from([
        "expl",
        "validate",
        "--document",
        "exploration.json",
        "--format",
        "json",
    ])
    .expect("validate must parse");
    match cli.command {
        Commands::Validate(command) => {
            assert_eq!(command.format, OutputFormat::Json);
            assert!(command.config.is_none());
        }
        _ => panic!("expected validate"),
    }
}

#[test]
fn cli_parses_apply_with_message() {
    let cli = Cli::try_parse_from([
        "expl",
        "apply",
        "--document",
        "exploration.json",
        "--changes",
        "changes.jsonl",
        "--config",
        "editor.yaml",
        "--message",
        "Rename intro",
    ])
    .expect("apply must parse");
    match cli.command {
        Commands::Apply(command) => {
            assert_eq!(command.message, "Rename intro");
            assert_eq!(
                command.changes.as_path(),
                std::path::Path::new("changes.jsonl")
            );
            assert_eq!(command.format, OutputFormat::Text);
        }
        _ => panic!("expected apply"),
    }
}

#[test]
fn cli_rejects_apply_without_changes() {
    let parsed = Cli::try_parse_from(["expl", "apply", "--document", "exploration.json"]);
    assert!(parsed.is_err());
}
