//! Relationship resolution: derived kinship from primitive edges.
//!
//! Each [`Relationship`] maps to one pure derivation over [`PersonRef`]
//! views. A missing link anywhere in the chain (no mother, no father, no
//! spouse) contributes nothing; it is never an error.
//!
//! # Ordering
//!
//! Results are sorted by ascending creation sequence, which is the order
//! the related people were added to the tree. It is neither alphabetical
//! nor the order the derivation visited them. The sort is stable.
//!
//! # In-laws
//!
//! `SISTER_IN_LAW` and `BROTHER_IN_LAW` concatenate two collections before
//! sorting and do not deduplicate. Because spouses are always created fresh
//! by `add_spouse` and therefore never have a mother, the two collections
//! cannot overlap in a tree built through [`FamilyTree`] mutations.
//!
//! [`FamilyTree`]: crate::tree::FamilyTree

use tracing::trace;

use crate::model::kind::Relationship;
use crate::model::person::PersonRef;

/// Resolve `relationship` for `anchor`, ordered by creation sequence.
#[must_use]
pub fn resolve(anchor: PersonRef<'_>, relationship: Relationship) -> Vec<PersonRef<'_>> {
    let mut related = derive(anchor, relationship);
    related.sort_by_key(PersonRef::sequence);
    trace!(
        anchor = anchor.name(),
        %relationship,
        count = related.len(),
        "relationship resolved"
    );
    related
}

fn derive(anchor: PersonRef<'_>, relationship: Relationship) -> Vec<PersonRef<'_>> {
    match relationship {
        Relationship::Son => anchor.sons(),
        Relationship::Daughter => anchor.daughters(),
        Relationship::Siblings => anchor.siblings(),
        Relationship::PaternalUncle => brothers_of(anchor.father()),
        Relationship::MaternalUncle => brothers_of(anchor.mother()),
        Relationship::PaternalAunt => sisters_of(anchor.father()),
        Relationship::MaternalAunt => sisters_of(anchor.mother()),
        Relationship::SisterInLaw => sisters_in_law(anchor),
        Relationship::BrotherInLaw => brothers_in_law(anchor),
    }
}

fn brothers_of(person: Option<PersonRef<'_>>) -> Vec<PersonRef<'_>> {
    person.map_or_else(Vec::new, |p| p.brothers())
}

fn sisters_of(person: Option<PersonRef<'_>>) -> Vec<PersonRef<'_>> {
    person.map_or_else(Vec::new, |p| p.sisters())
}

/// Spouse's sisters, then wives of the spouse's married brothers.
fn sisters_in_law(anchor: PersonRef<'_>) -> Vec<PersonRef<'_>> {
    let Some(spouse) = anchor.spouse() else {
        return Vec::new();
    };
    let mut out = spouse.sisters();
    out.extend(spouse.brothers().into_iter().filter_map(|b| b.spouse()));
    out
}

/// Spouse's brothers, then husbands of the spouse's married sisters.
fn brothers_in_law(anchor: PersonRef<'_>) -> Vec<PersonRef<'_>> {
    let Some(spouse) = anchor.spouse() else {
        return Vec::new();
    };
    let mut out = spouse.brothers();
    out.extend(spouse.sisters().into_iter().filter_map(|s| s.spouse()));
    out
}
