//! `kin relationships` — the supported relationship kinds.

use std::io::Write;

use serde::Serialize;

use kinship_core::Relationship;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize)]
pub struct RelationshipRow {
    pub kind: Relationship,
    pub description: &'static str,
}

fn rows() -> Vec<RelationshipRow> {
    Relationship::ALL
        .iter()
        .map(|&kind| RelationshipRow {
            kind,
            description: kind.describe(),
        })
        .collect()
}

/// Execute `kin relationships`.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn run_relationships(output: OutputMode) -> anyhow::Result<()> {
    render_mode(
        output,
        &rows(),
        |rows, w| {
            for row in rows {
                writeln!(w, "{}", row.kind)?;
            }
            Ok(())
        },
        |rows, w| {
            pretty_section(w, "Relationships")?;
            for row in rows {
                pretty_kv(w, row.kind.as_str(), row.description)?;
            }
            Ok(())
        },
    )
}
