//! `kin query` — resolve a named relationship for one person.

use crate::output::{EMPTY_RESULT, OutputMode, names_line, pretty_kv, pretty_section, render_mode};
use clap::Args;
use kinship_core::{FamilyTree, Relationship};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Anchor person (quote names with spaces).
    pub name: String,

    /// Relationship kind, e.g. MATERNAL_AUNT or sister-in-law.
    pub relationship: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResult {
    pub name: String,
    pub relationship: String,
    pub related: Vec<String>,
}

/// Execute `kin query <name> <relationship>`.
///
/// # Errors
///
/// Returns an error if the anchor does not exist, the relationship is not
/// one of the supported kinds, or output rendering fails.
pub fn run_query(args: &QueryArgs, tree: &FamilyTree, output: OutputMode) -> anyhow::Result<()> {
    let related = tree.relationship_named(&args.name, &args.relationship)?;
    // Parsing succeeded above, so echo the canonical spelling.
    let relationship = args
        .relationship
        .parse::<Relationship>()
        .map_or_else(|_| args.relationship.clone(), |r| r.to_string());

    let result = QueryResult {
        name: args.name.clone(),
        relationship,
        related,
    };

    render_mode(
        output,
        &result,
        |r, w| writeln!(w, "{}", names_line(&r.related)),
        |r, w| {
            pretty_section(w, &format!("{} of {}", r.relationship, r.name))?;
            if r.related.is_empty() {
                writeln!(w, "{EMPTY_RESULT}")?;
            }
            for (i, name) in r.related.iter().enumerate() {
                pretty_kv(w, &format!("{}", i + 1), name)?;
            }
            Ok(())
        },
    )
}
