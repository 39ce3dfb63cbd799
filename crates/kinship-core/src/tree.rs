//! The family graph store.
//!
//! [`FamilyTree`] owns every [`Person`] record in an arena and indexes them
//! by their unique, case-sensitive name. It is insertion-only: people are
//! added through [`add_person`](FamilyTree::add_person),
//! [`add_spouse`](FamilyTree::add_spouse) and
//! [`add_child`](FamilyTree::add_child), and never removed.
//!
//! # Invariants
//!
//! - Every [`PersonId`] stored in a record points into this tree's arena.
//! - `spouse` is mutual: if A's spouse is B then B's spouse is A.
//! - A child's `mother` is exactly the person whose `children` list holds it,
//!   and that person is female.
//! - `sequence` strictly increases with creation order.
//!
//! Each mutation validates every precondition before writing anything, so a
//! failed call leaves the tree exactly as it was.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use tracing::debug;

use crate::error::TreeError;
use crate::model::kind::{Gender, Relationship};
use crate::model::person::{Person, PersonId, PersonRef};
use crate::resolve;

/// Arena-backed genealogical graph.
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    /// Arena of records; a [`PersonId`] is an index into it.
    people: Vec<Person>,
    /// name → arena index.
    index: HashMap<String, PersonId>,
    /// Next creation sequence number to hand out.
    next_sequence: u64,
}

impl FamilyTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of people in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Add an unattached person.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateEntity`] if `name` is already present.
    pub fn add_person(
        &mut self,
        name: impl Into<String>,
        gender: Gender,
    ) -> Result<PersonRef<'_>, TreeError> {
        let name = name.into();
        self.ensure_absent(&name)?;
        let id = self.insert(name, gender);
        Ok(PersonRef::new(self, id))
    }

    /// Create `spouse_name` and marry them to `person_name`.
    ///
    /// The spouse gets the opposite gender of the existing person. Both
    /// `spouse` pointers are set before returning.
    ///
    /// # Errors
    ///
    /// Checked in order: [`TreeError::DuplicateEntity`] if `spouse_name`
    /// exists, [`TreeError::NotFound`] if `person_name` does not, and
    /// [`TreeError::AlreadyMarried`] if that person already has a spouse.
    pub fn add_spouse(
        &mut self,
        person_name: &str,
        spouse_name: impl Into<String>,
    ) -> Result<PersonRef<'_>, TreeError> {
        let spouse_name = spouse_name.into();
        self.ensure_absent(&spouse_name)?;

        let existing = self.lookup(person_name)?;
        let record = &self.people[existing.0];
        if let Some(current) = record.spouse {
            return Err(TreeError::AlreadyMarried {
                name: person_name.to_string(),
                spouse: self.people[current.0].name.clone(),
            });
        }

        let gender = record.gender.opposite();
        let spouse = self.insert(spouse_name, gender);
        self.people[spouse.0].spouse = Some(existing);
        self.people[existing.0].spouse = Some(spouse);

        debug!(person = person_name, spouse = %self.people[spouse.0].name, "married");
        Ok(PersonRef::new(self, spouse))
    }

    /// Create `child_name` as the newest child of `mother_name`.
    ///
    /// # Errors
    ///
    /// Checked in order: [`TreeError::DuplicateEntity`] if `child_name`
    /// exists, [`TreeError::NotFound`] if `mother_name` does not, and
    /// [`TreeError::InvalidParent`] if that person is not female.
    pub fn add_child(
        &mut self,
        mother_name: &str,
        child_name: impl Into<String>,
        gender: Gender,
    ) -> Result<PersonRef<'_>, TreeError> {
        let child_name = child_name.into();
        self.ensure_absent(&child_name)?;

        let mother = self.lookup(mother_name)?;
        let mother_gender = self.people[mother.0].gender;
        if mother_gender != Gender::Female {
            return Err(TreeError::InvalidParent {
                name: mother_name.to_string(),
                gender: mother_gender,
            });
        }

        let child = self.insert(child_name, gender);
        self.people[child.0].mother = Some(mother);
        self.people[mother.0].children.push(child);

        debug!(mother = mother_name, child = %self.people[child.0].name, "child added");
        Ok(PersonRef::new(self, child))
    }

    /// Look up a person by name.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if no such person exists.
    pub fn person(&self, name: &str) -> Result<PersonRef<'_>, TreeError> {
        self.lookup(name).map(|id| PersonRef::new(self, id))
    }

    /// Every person in the tree, in creation order.
    ///
    /// This is the whole-tree view; pair it with [`person`](Self::person)
    /// for lookup by name.
    pub fn members(&self) -> impl ExactSizeIterator<Item = PersonRef<'_>> + '_ {
        (0..self.people.len()).map(move |i| PersonRef::new(self, PersonId(i)))
    }

    /// Names of everyone related to `name` by `relationship`, ordered by
    /// creation sequence.
    ///
    /// Missing links along the derivation (no mother, no father, no spouse)
    /// yield an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if `name` is not in the tree.
    pub fn relationship(
        &self,
        name: &str,
        relationship: Relationship,
    ) -> Result<Vec<String>, TreeError> {
        let anchor = self.person(name)?;
        Ok(resolve::resolve(anchor, relationship)
            .into_iter()
            .map(|p| p.name().to_string())
            .collect())
    }

    /// Like [`relationship`](Self::relationship), with the kind given as text.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if `name` is not in the tree, then
    /// [`TreeError::UnknownRelationship`] if `kind` does not name one of the
    /// supported relationships.
    pub fn relationship_named(&self, name: &str, kind: &str) -> Result<Vec<String>, TreeError> {
        self.lookup(name)?;
        let relationship: Relationship = kind
            .parse()
            .map_err(|_| TreeError::UnknownRelationship(kind.to_string()))?;
        self.relationship(name, relationship)
    }

    pub(crate) fn record(&self, id: PersonId) -> &Person {
        &self.people[id.0]
    }

    fn lookup(&self, name: &str) -> Result<PersonId, TreeError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| TreeError::NotFound(name.to_string()))
    }

    fn ensure_absent(&self, name: &str) -> Result<(), TreeError> {
        if self.index.contains_key(name) {
            Err(TreeError::DuplicateEntity(name.to_string()))
        } else {
            Ok(())
        }
    }

    fn insert(&mut self, name: String, gender: Gender) -> PersonId {
        let id = PersonId(self.people.len());
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        debug!(name = %name, %gender, sequence, "person created");
        self.index.insert(name.clone(), id);
        self.people.push(Person::new(name, gender, sequence));
        id
    }
}
