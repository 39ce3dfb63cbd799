//! `kin demo` — a short walkthrough against the sample family.

use crate::output::{OutputMode, names_line, pretty_kv, pretty_rule, render_mode};
use kinship_core::{FamilyTree, Gender, Relationship};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct DemoStep {
    pub description: String,
    pub result: Vec<String>,
}

/// Query Darcy's sisters-in-law, add Karlo under Victoire, then query
/// Karlo's maternal aunts.
///
/// # Errors
///
/// Fails when the tree does not contain the sample family (for example with
/// `seed = "empty"`).
pub fn demo_steps(tree: &mut FamilyTree) -> anyhow::Result<Vec<DemoStep>> {
    let darcy = tree.relationship("Darcy", Relationship::SisterInLaw)?;
    let karlo = tree.add_child("Victoire", "Karlo", Gender::Male)?;
    let added = vec![karlo.name().to_string()];
    let aunts = tree.relationship("Karlo", Relationship::MaternalAunt)?;

    Ok(vec![
        DemoStep {
            description: "Darcy's sisters-in-law".into(),
            result: darcy,
        },
        DemoStep {
            description: "Added to Victoire".into(),
            result: added,
        },
        DemoStep {
            description: "Karlo's maternal aunts".into(),
            result: aunts,
        },
    ])
}

/// Execute `kin demo`.
///
/// # Errors
///
/// Returns an error if the sample family is missing or rendering fails.
pub fn run_demo(tree: &mut FamilyTree, output: OutputMode) -> anyhow::Result<()> {
    let steps = demo_steps(tree)?;

    render_mode(
        output,
        &steps,
        |steps, w| {
            for step in steps {
                writeln!(w, "{}", names_line(&step.result))?;
            }
            Ok(())
        },
        |steps, w| {
            for step in steps {
                pretty_kv(w, &step.description, names_line(&step.result))?;
            }
            pretty_rule(w)
        },
    )
}
