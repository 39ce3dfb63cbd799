use kinship_core::{FamilyTree, Gender, Relationship};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// A mutation against an anchor picked by index among people added so far.
#[derive(Debug, Clone)]
enum Op {
    Person { female: bool },
    Spouse { anchor: usize },
    Child { anchor: usize, female: bool },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => any::<bool>().prop_map(|female| Op::Person { female }),
        3 => any::<usize>().prop_map(|anchor| Op::Spouse { anchor }),
        6 => (any::<usize>(), any::<bool>())
            .prop_map(|(anchor, female)| Op::Child { anchor, female }),
    ]
}

const fn gender(female: bool) -> Gender {
    if female { Gender::Female } else { Gender::Male }
}

/// Apply ops in order, ignoring rejected ones. Every op uses a fresh name,
/// so only anchor-side preconditions can fail.
fn build(ops: &[Op]) -> FamilyTree {
    let mut tree = FamilyTree::new();
    tree.add_person("p0", Gender::Female).expect("seed person");
    let mut names = vec!["p0".to_string()];

    for (i, op) in ops.iter().enumerate() {
        let name = format!("p{}", i + 1);
        let added = match *op {
            Op::Person { female } => tree.add_person(name.as_str(), gender(female)).is_ok(),
            Op::Spouse { anchor } => {
                let anchor = &names[anchor % names.len()];
                tree.add_spouse(anchor, name.as_str()).is_ok()
            }
            Op::Child { anchor, female } => {
                let anchor = &names[anchor % names.len()];
                tree.add_child(anchor, name.as_str(), gender(female)).is_ok()
            }
        };
        if added {
            names.push(name);
        }
    }
    tree
}

fn arb_tree() -> impl Strategy<Value = FamilyTree> {
    prop::collection::vec(arb_op(), 0..60).prop_map(|ops| build(&ops))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn spouse_links_are_symmetric(tree in arb_tree()) {
        for person in tree.members() {
            if let Some(spouse) = person.spouse() {
                prop_assert_eq!(spouse.spouse(), Some(person));
                prop_assert_ne!(spouse.gender(), person.gender());
            }
        }
    }

    #[test]
    fn motherless_people_have_no_siblings(tree in arb_tree()) {
        for person in tree.members().filter(|p| p.mother().is_none()) {
            prop_assert!(person.siblings().is_empty());
        }
    }

    #[test]
    fn mother_and_children_agree(tree in arb_tree()) {
        for person in tree.members() {
            if let Some(mother) = person.mother() {
                prop_assert_eq!(mother.gender(), Gender::Female);
                prop_assert!(mother.children().any(|c| c == person));
            }
            for child in person.children() {
                prop_assert_eq!(child.mother(), Some(person));
            }
        }
    }

    #[test]
    fn results_are_strictly_ordered_by_sequence(tree in arb_tree()) {
        for person in tree.members() {
            for kind in Relationship::ALL {
                let names = tree.relationship(person.name(), kind).expect("anchor exists");
                let seqs: Vec<u64> = names
                    .iter()
                    .map(|n| tree.person(n).expect("result is a member").sequence())
                    .collect();
                prop_assert!(
                    seqs.windows(2).all(|w| w[0] < w[1]),
                    "{} {} out of order: {:?}", person.name(), kind, names
                );
            }
        }
    }

    #[test]
    fn sequence_matches_creation_order(tree in arb_tree()) {
        let seqs: Vec<u64> = tree.members().map(|p| p.sequence()).collect();
        prop_assert!(seqs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rejected_child_leaves_tree_unchanged(tree in arb_tree()) {
        let mut tree = tree;
        let male = tree
            .members()
            .find(|p| p.gender() == Gender::Male)
            .map(|p| p.name().to_string());

        if let Some(male) = male {
            let before = tree.len();
            prop_assert!(tree.add_child(&male, "rejected", Gender::Female).is_err());
            prop_assert_eq!(tree.len(), before);
            prop_assert_eq!(tree.person(&male).expect("still there").children().count(), 0);
            prop_assert!(!tree.contains("rejected"));
        }
    }

    #[test]
    fn duplicate_child_is_rejected(tree in arb_tree()) {
        let mut tree = tree;
        let mother = tree
            .members()
            .find(|p| p.gender() == Gender::Female && p.children().next().is_some())
            .map(|p| p.name().to_string());

        if let Some(mother) = mother {
            let first_child = tree
                .person(&mother)
                .expect("mother exists")
                .children()
                .next()
                .map(|c| c.name().to_string())
                .expect("has a child");
            let count = tree.person(&mother).expect("mother exists").children().count();

            prop_assert!(tree.add_child(&mother, first_child, Gender::Male).is_err());
            prop_assert_eq!(
                tree.person(&mother).expect("mother exists").children().count(),
                count
            );
        }
    }
}
