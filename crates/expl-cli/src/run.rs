use crate::cli::{ApplyCommand, GraphCommand, OutputFormat, ValidateCommand};
use expl_core::{ExplorationDocument, Warning, WarningType};
use expl_editor::{
    decode_change_jsonl_line, load_editor_config, BackendError, ChangeRecord, EditorConfig,
    EditorConfigError, EditorSession, ExplorationBackend, FileBackend, GraphData, SessionError,
};
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("document parse failed `{path}`: {source}")]
    DocumentParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("change list decode failed at line {line}: {source}")]
    ChangeDecode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("editor config load failed: {0}")]
    Config(#[from] EditorConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("exploration has no initial state")]
    NoInitialState,
    #[error("{count} critical warning(s)\n{report}")]
    CriticalWarnings { count: usize, report: String },
    #[error("json encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

pub fn execute_validate(command: &ValidateCommand) -> Result<String, CliError> {
    let session = open_session(&command.document, command.config.as_deref())?;
    let warnings = session.warnings().warnings();
    let report = match command.format {
        OutputFormat::Text => warnings_text(warnings),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "count": warnings.len(),
            "has_critical_warnings": session.warnings().has_critical_warnings(),
            "warnings": warnings,
        }))?,
    };

    let critical = warnings.iter().filter(|warning| warning.is_critical()).count();
    if critical > 0 {
        return Err(CliError::CriticalWarnings {
            count: critical,
            report,
        });
    }
    Ok(report)
}

pub fn execute_graph(command: &GraphCommand) -> Result<String, CliError> {
    let mut session = open_session(&command.document, command.config.as_deref())?;
    let graph = session.graph_data().ok_or(CliError::NoInitialState)?;
    match command.format {
        OutputFormat::Text => Ok(graph_text(graph)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(graph)?),
    }
}

/// Loads the document through the file backend, saves the change list onto
/// it, and reports the new version with the warnings of the result.
pub fn execute_apply(command: &ApplyCommand) -> Result<String, CliError> {
    let config = load_config(command.config.as_deref())?;
    let change_list = read_change_list(&command.changes)?;
    let mut backend = FileBackend::new(&command.document, config.new_state_template.clone());
    let stored = backend.load()?;
    let saved = backend.save(&change_list, &command.message, stored.version)?;
    info!(
        applied = change_list.len(),
        version = saved.version,
        "change list applied"
    );

    let version = saved.version;
    let mut session = EditorSession::new(config)?;
    session.load_document(saved)?;
    let warnings = session.warnings().warnings();

    match command.format {
        OutputFormat::Text => {
            let mut output = format!(
                "applied {} change(s); version {version}\n",
                change_list.len()
            );
            output.push_str(&warnings_text(warnings));
            Ok(output)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "applied": change_list.len(),
            "version": version,
            "warnings": warnings,
        }))?),
    }
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, CliError> {
    match path {
        Some(path) => Ok(load_editor_config(path)?),
        None => {
            debug!("no editor config given; using built-in defaults");
            Ok(EditorConfig::default())
        }
    }
}

fn read_document(path: &Path) -> Result<ExplorationDocument, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::DocumentParse {
        path: path.display().to_string(),
        source,
    })
}

fn open_session(document: &Path, config: Option<&Path>) -> Result<EditorSession, CliError> {
    let config = load_config(config)?;
    let document = read_document(document)?;
    let mut session = EditorSession::new(config)?;
    session.load_document(document)?;
    Ok(session)
}

fn read_change_list(path: &Path) -> Result<Vec<ChangeRecord>, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            decode_change_jsonl_line(line).map_err(|source| CliError::ChangeDecode {
                line: index + 1,
                source,
            })
        })
        .collect()
}

fn warnings_text(warnings: &[Warning]) -> String {
    if warnings.is_empty() {
        return "no warnings".to_string();
    }
    warnings
        .iter()
        .map(|warning| {
            let label = match warning.warning_type {
                WarningType::Critical => "critical",
                WarningType::Error => "error",
            };
            format!("{label}: {}", warning.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn graph_text(graph: &GraphData) -> String {
    let mut lines = vec![
        format!("init: {}", graph.init_state_id),
        format!("final: {}", graph.final_state_ids.join(", ")),
    ];
    lines.extend(
        graph
            .links
            .iter()
            .map(|link| format!("{} -> {}", link.source, link.target)),
    );
    lines.join("\n")
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
