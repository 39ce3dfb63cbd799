//! `kin list` — every person in creation order.

use crate::output::{OutputMode, pretty_section, render_mode};
use clap::Args;
use kinship_core::{FamilyTree, Gender};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list people of this gender.
    #[arg(long)]
    pub gender: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListRow {
    pub sequence: u64,
    pub name: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse: Option<String>,
}

fn collect_rows(tree: &FamilyTree, gender: Option<Gender>) -> Vec<ListRow> {
    tree.members()
        .filter(|p| gender.is_none_or(|g| p.gender() == g))
        .map(|p| ListRow {
            sequence: p.sequence(),
            name: p.name().to_string(),
            gender: p.gender(),
            spouse: p.spouse().map(|s| s.name().to_string()),
        })
        .collect()
}

/// Execute `kin list`.
///
/// # Errors
///
/// Returns an error if the gender filter is invalid or rendering fails.
pub fn run_list(args: &ListArgs, tree: &FamilyTree, output: OutputMode) -> anyhow::Result<()> {
    let gender = args
        .gender
        .as_deref()
        .map(str::parse::<Gender>)
        .transpose()?;
    let rows = collect_rows(tree, gender);

    render_mode(
        output,
        &rows,
        |rows, w| {
            for row in rows {
                writeln!(w, "{}\t{}\t{}", row.sequence, row.name, row.gender)?;
            }
            Ok(())
        },
        |rows, w| {
            pretty_section(w, &format!("{} people", rows.len()))?;
            for row in rows {
                let spouse = row
                    .spouse
                    .as_deref()
                    .map(|s| format!("  (spouse: {s})"))
                    .unwrap_or_default();
                writeln!(w, "{:>4}  {:<16} {:<6}{spouse}", row.sequence, row.name, row.gender)?;
            }
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_core::sample::arthur_family;

    #[test]
    fn rows_follow_creation_order() {
        let tree = arthur_family().expect("sample");
        let rows = collect_rows(&tree, None);
        assert_eq!(rows.len(), 31);
        assert_eq!(rows[0].name, "Queen Margret");
        assert_eq!(rows[1].name, "King Arthur");
        assert!(rows.windows(2).all(|w| w[0].sequence < w[1].sequence));
    }

    #[test]
    fn gender_filter_applies() {
        let tree = arthur_family().expect("sample");
        let rows = collect_rows(&tree, Some(Gender::Female));
        assert!(rows.iter().all(|r| r.gender == Gender::Female));
        assert!(rows.iter().any(|r| r.name == "Ginerva"));
    }
}
