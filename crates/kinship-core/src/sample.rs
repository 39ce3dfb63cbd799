//! The bundled sample tree.

use crate::script::{self, ScriptError};
use crate::tree::FamilyTree;

/// Script source for the Arthur family.
pub const ARTHUR_FAMILY: &str = include_str!("../data/arthur_family.kin");

/// Build the Arthur family, three generations, 31 people.
///
/// # Errors
///
/// Only fails if the bundled script is malformed.
pub fn arthur_family() -> Result<FamilyTree, ScriptError> {
    let mut tree = FamilyTree::new();
    script::run(&mut tree, ARTHUR_FAMILY)?;
    Ok(tree)
}
