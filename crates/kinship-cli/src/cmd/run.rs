//! `kin run` — apply command scripts to the tree and print query results.
//!
//! Scripts run in the order given, on top of the configured seed. Text mode
//! prints one line per `GET_RELATIONSHIP` statement (names or `NONE`);
//! JSON mode emits every outcome, additions included.

use crate::output::{OutputMode, names_line, pretty_kv, render_mode};
use anyhow::Context;
use clap::Args;
use kinship_core::FamilyTree;
use kinship_core::script::{self, Outcome};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script files to apply, in order.
    #[arg(required = true, value_name = "SCRIPT")]
    pub scripts: Vec<PathBuf>,
}

/// Execute `kin run <script>...`.
///
/// # Errors
///
/// Returns an error if a script cannot be read, fails to parse, or a
/// statement is rejected by the tree.
pub fn run_scripts(
    args: &RunArgs,
    tree: &mut FamilyTree,
    output: OutputMode,
) -> anyhow::Result<()> {
    let mut outcomes = Vec::new();
    for path in &args.scripts {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let applied = script::run(tree, &source)
            .with_context(|| format!("Failed to apply {}", path.display()))?;
        info!(script = %path.display(), statements = applied.len(), "script applied");
        outcomes.extend(applied);
    }

    render_mode(
        output,
        &outcomes,
        |outcomes, w| {
            for (_, _, names) in related(outcomes) {
                writeln!(w, "{}", names_line(names))?;
            }
            Ok(())
        },
        |outcomes, w| {
            for (anchor, relationship, names) in related(outcomes) {
                pretty_kv(w, &format!("{anchor} {relationship}"), names_line(names))?;
            }
            Ok(())
        },
    )
}

fn related(outcomes: &[Outcome]) -> impl Iterator<Item = (&str, &str, &[String])> {
    outcomes.iter().filter_map(|outcome| match outcome {
        Outcome::Related {
            anchor,
            relationship,
            names,
        } => Some((anchor.as_str(), relationship.as_str(), names.as_slice())),
        Outcome::Added { .. } => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_skips_additions() {
        let outcomes = vec![
            Outcome::Added {
                name: "Karlo".into(),
            },
            Outcome::Related {
                anchor: "Karlo".into(),
                relationship: "MATERNAL_AUNT".into(),
                names: vec!["Dominique".into()],
            },
        ];
        let rows: Vec<_> = related(&outcomes).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "Karlo");
        assert_eq!(rows[0].2, ["Dominique".to_string()]);
    }

    #[test]
    fn missing_script_is_reported() {
        let mut tree = FamilyTree::new();
        let args = RunArgs {
            scripts: vec![PathBuf::from("/definitely/not/here.kin")],
        };
        let err = run_scripts(&args, &mut tree, OutputMode::Text).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
