//! `kin show` — display one person and their primitive links.

use crate::output::{OutputMode, names_line, pretty_kv, pretty_rule, pretty_section, render_mode};
use clap::Args;
use kinship_core::{FamilyTree, Gender, PersonRef};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Person to display.
    pub name: String,
}

/// Full person detail as returned in JSON output.
#[derive(Debug, Serialize)]
pub struct ShowPerson {
    pub name: String,
    pub gender: Gender,
    pub sequence: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse: Option<String>,
    pub children: Vec<String>,
}

impl ShowPerson {
    pub fn from_person(person: PersonRef<'_>) -> Self {
        let name_of = |p: PersonRef<'_>| p.name().to_string();
        Self {
            name: person.name().to_string(),
            gender: person.gender(),
            sequence: person.sequence(),
            mother: person.mother().map(name_of),
            father: person.father().map(name_of),
            spouse: person.spouse().map(name_of),
            children: person.children().map(name_of).collect(),
        }
    }
}

/// Execute `kin show <name>`.
///
/// # Errors
///
/// Returns an error if the person does not exist or output rendering fails.
pub fn run_show(args: &ShowArgs, tree: &FamilyTree, output: OutputMode) -> anyhow::Result<()> {
    let person = tree.person(&args.name)?;
    let detail = ShowPerson::from_person(person);

    render_mode(
        output,
        &detail,
        |p, w| {
            writeln!(
                w,
                "{}  {}  mother={}  father={}  spouse={}  children={}",
                p.name,
                p.gender,
                p.mother.as_deref().unwrap_or("-"),
                p.father.as_deref().unwrap_or("-"),
                p.spouse.as_deref().unwrap_or("-"),
                names_line(&p.children)
            )
        },
        |p, w| {
            pretty_section(w, &p.name)?;
            pretty_kv(w, "Gender", p.gender.to_string())?;
            pretty_kv(w, "Mother", p.mother.as_deref().unwrap_or("-"))?;
            pretty_kv(w, "Father", p.father.as_deref().unwrap_or("-"))?;
            pretty_kv(w, "Spouse", p.spouse.as_deref().unwrap_or("-"))?;
            pretty_kv(w, "Children", names_line(&p.children))?;
            pretty_kv(w, "Sequence", p.sequence.to_string())?;
            pretty_rule(w)
        },
    )
}
