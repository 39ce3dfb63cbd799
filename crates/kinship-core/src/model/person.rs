//! Person records and the derived kinship views over them.
//!
//! A [`Person`] stores only the three primitive edges: `mother`, `spouse`
//! and `children`. Everything else (siblings, father, brothers, sisters) is
//! derived on demand through a [`PersonRef`], a borrowed handle that pairs a
//! record with the [`FamilyTree`] that owns it. Views are recomputed on
//! every call; nothing is cached.
//!
//! Cross-references are [`PersonId`] handles into the tree's arena, never
//! owning pointers, so the mother/spouse/children back-references form a
//! graph without any shared-ownership bookkeeping.

use std::fmt;

use crate::model::kind::Gender;
use crate::tree::FamilyTree;

/// Opaque handle to a person stored in a [`FamilyTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub(crate) usize);

/// A node of the family graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub(crate) name: String,
    pub(crate) gender: Gender,
    /// Set once, when the person is added as a child.
    pub(crate) mother: Option<PersonId>,
    /// Set once per person; always mutual.
    pub(crate) spouse: Option<PersonId>,
    /// Insertion order is the order children were added.
    pub(crate) children: Vec<PersonId>,
    /// Creation index, strictly increasing across the tree.
    pub(crate) sequence: u64,
}

impl Person {
    pub(crate) const fn new(name: String, gender: Gender, sequence: u64) -> Self {
        Self {
            name,
            gender,
            mother: None,
            spouse: None,
            children: Vec::new(),
            sequence,
        }
    }
}

/// Borrowed view of a person inside its tree.
#[derive(Clone, Copy)]
pub struct PersonRef<'a> {
    tree: &'a FamilyTree,
    id: PersonId,
}

impl<'a> PersonRef<'a> {
    pub(crate) const fn new(tree: &'a FamilyTree, id: PersonId) -> Self {
        Self { tree, id }
    }

    fn record(&self) -> &'a Person {
        self.tree.record(self.id)
    }

    fn at(&self, id: PersonId) -> Self {
        Self::new(self.tree, id)
    }

    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.record().name
    }

    #[must_use]
    pub fn gender(&self) -> Gender {
        self.record().gender
    }

    /// Creation-order index used to sort query results.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.record().sequence
    }

    #[must_use]
    pub fn mother(&self) -> Option<Self> {
        self.record().mother.map(|id| self.at(id))
    }

    #[must_use]
    pub fn spouse(&self) -> Option<Self> {
        self.record().spouse.map(|id| self.at(id))
    }

    /// Children in the order they were added.
    pub fn children(&self) -> impl Iterator<Item = PersonRef<'a>> + 'a {
        let tree = self.tree;
        self.record()
            .children
            .iter()
            .map(move |&id| PersonRef::new(tree, id))
    }

    #[must_use]
    pub fn sons(&self) -> Vec<Self> {
        self.children_of(Gender::Male)
    }

    #[must_use]
    pub fn daughters(&self) -> Vec<Self> {
        self.children_of(Gender::Female)
    }

    /// All other children of this person's mother.
    ///
    /// Empty when the person has no mother.
    #[must_use]
    pub fn siblings(&self) -> Vec<Self> {
        self.mother().map_or_else(Vec::new, |mother| {
            mother.children().filter(|c| c.id != self.id).collect()
        })
    }

    #[must_use]
    pub fn brothers(&self) -> Vec<Self> {
        self.siblings_of(Gender::Male)
    }

    #[must_use]
    pub fn sisters(&self) -> Vec<Self> {
        self.siblings_of(Gender::Female)
    }

    /// The mother's spouse.
    ///
    /// `None` when there is no mother, or the mother has no spouse.
    #[must_use]
    pub fn father(&self) -> Option<Self> {
        self.mother().and_then(|mother| mother.spouse())
    }

    fn children_of(&self, gender: Gender) -> Vec<Self> {
        self.children().filter(|c| c.gender() == gender).collect()
    }

    fn siblings_of(&self, gender: Gender) -> Vec<Self> {
        self.siblings()
            .into_iter()
            .filter(|s| s.gender() == gender)
            .collect()
    }
}

impl PartialEq for PersonRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for PersonRef<'_> {}

impl fmt::Debug for PersonRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonRef")
            .field("name", &self.name())
            .field("gender", &self.gender())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl fmt::Display for PersonRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
