//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for pipes, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format`
//! 2. `--json`, `FORMAT` env var, user config `output`
//!    (see `kinship_core::config::resolve_config`)
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use clap::ValueEnum;
use kinship_core::{ConfigError, ParseEnumError, TreeError};
use kinship_core::script::ScriptError;
use serde::Serialize;
use std::io::{self, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Placeholder printed for an empty relationship result.
pub const EMPTY_RESULT: &str = "NONE";

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// Join names with single spaces, or `NONE` when there are none.
pub fn names_line(names: &[String]) -> String {
    if names.is_empty() {
        EMPTY_RESULT.to_string()
    } else {
        names.join(" ")
    }
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Plain text for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Map the resolved config value (`pretty`/`text`/`json`) to a mode.
    pub fn from_resolved(resolved: &str) -> Self {
        match resolved {
            "json" => Self::Json,
            "text" => Self::Text,
            _ => Self::Pretty,
        }
    }
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_mode_to(&mut out, mode, value, text_fn, pretty_fn)
}

/// Like [`render_mode`], writing to an arbitrary sink.
pub fn render_mode_to<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, out)?,
        OutputMode::Pretty => pretty_fn(value, out)?,
    }
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "K2002").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Build from any error chain, picking up codes and hints from the
    /// kinship error types when one is present.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(tree_err) = err.downcast_ref::<TreeError>()
            && err.chain().count() == 1
        {
            return Self::from(tree_err);
        }

        let code = err.chain().find_map(|cause| {
            cause
                .downcast_ref::<ScriptError>()
                .map(ScriptError::code)
                .or_else(|| cause.downcast_ref::<TreeError>().map(TreeError::code))
                .or_else(|| cause.downcast_ref::<ConfigError>().map(ConfigError::code))
                .or_else(|| cause.downcast_ref::<ParseEnumError>().map(ParseEnumError::code))
        });

        Self {
            message: format!("{err:#}"),
            suggestion: code.and_then(|c| c.hint()).map(str::to_string),
            error_code: code.map(|c| c.code().to_string()),
        }
    }
}

impl From<&TreeError> for CliError {
    fn from(err: &TreeError) -> Self {
        let code = err.code();
        Self {
            message: err.to_string(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    render_error_to(&mut out, mode, error)
}

fn render_error_to(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use kinship_core::Gender;

    fn capture(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).expect("utf8 output")
    }

    #[test]
    fn resolved_values_map_to_modes() {
        assert_eq!(OutputMode::from_resolved("json"), OutputMode::Json);
        assert_eq!(OutputMode::from_resolved("text"), OutputMode::Text);
        assert_eq!(OutputMode::from_resolved("pretty"), OutputMode::Pretty);
    }

    #[test]
    fn names_line_uses_placeholder_for_empty() {
        assert_eq!(names_line(&[]), "NONE");
        assert_eq!(names_line(&["Alice".into(), "Lily".into()]), "Alice Lily");
    }

    #[test]
    fn pretty_kv_aligns_keys() {
        let out = capture(|buf| pretty_kv(buf, "Mother", "Flora").expect("write"));
        assert_eq!(out, "Mother:      Flora\n");
    }

    #[test]
    fn render_mode_json_serializes_value() {
        let out = capture(|buf| {
            render_mode_to(
                buf,
                OutputMode::Json,
                &vec!["A", "B"],
                |_, _| Ok(()),
                |_, _| Ok(()),
            )
            .expect("render");
        });
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value, serde_json::json!(["A", "B"]));
    }

    #[test]
    fn cli_error_from_tree_error_carries_code_and_hint() {
        let err = CliError::from(&TreeError::NotFound("Ghost".into()));
        assert_eq!(err.message, "Person Ghost does not exist");
        assert_eq!(err.error_code.as_deref(), Some("K2002"));
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn cli_error_from_anyhow_finds_wrapped_tree_error() {
        let result: Result<(), TreeError> = Err(TreeError::UnknownRelationship("COUSIN".into()));
        let err = result.context("query failed").unwrap_err();
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.error_code.as_deref(), Some("K3001"));
        assert!(cli.message.contains("COUSIN"));
    }

    #[test]
    fn cli_error_maps_bad_gender_filter() {
        let err = anyhow::Error::new("other".parse::<Gender>().unwrap_err());
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.error_code.as_deref(), Some("K3002"));
        assert_eq!(cli.suggestion.as_deref(), Some("Use MALE or FEMALE."));
    }

    #[test]
    fn cli_error_maps_malformed_project_config() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::write(root.path().join("kinship.toml"), "[tree\nseed =").expect("write");
        let err = kinship_core::config::load_project_config(root.path()).unwrap_err();
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.error_code.as_deref(), Some("K1001"));
        assert!(cli.suggestion.is_some());
        assert!(cli.message.starts_with("Failed to parse"));
    }

    #[test]
    fn cli_error_from_plain_anyhow_has_no_code() {
        let cli = CliError::from_anyhow(&anyhow::anyhow!("boom"));
        assert_eq!(cli.message, "boom");
        assert!(cli.error_code.is_none());
        assert!(cli.suggestion.is_none());
    }

    #[test]
    fn render_error_json_wraps_error() {
        let out = capture(|buf| {
            let error = CliError::from_anyhow(&anyhow::anyhow!("bad"));
            render_error_to(buf, OutputMode::Json, &error).expect("render");
        });
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value["error"]["message"], "bad");
    }

    #[test]
    fn render_error_text_includes_suggestion() {
        let error = CliError::from(&TreeError::DuplicateEntity("Bill".into()));
        let out = capture(|buf| {
            render_error_to(buf, OutputMode::Text, &error).expect("render");
        });
        assert!(out.starts_with("error: person 'Bill' already exists"));
        assert!(out.contains("suggestion:"));
    }
}
