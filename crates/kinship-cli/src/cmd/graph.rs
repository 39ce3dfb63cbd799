//! `kin graph` — export the family as a directed graph.
//!
//! Edges run mother → child, plus one spouse edge per couple pointing from
//! the earlier-created partner to the later one. Pretty and text modes emit
//! Graphviz DOT; JSON mode emits node and edge lists.
//!
//! With a name, only that person, their descendants and everyone married
//! into that line are kept.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::{self, Write};

use clap::Args;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef};
use serde::Serialize;

use kinship_core::{FamilyTree, Gender, PersonId};

use crate::output::{OutputMode, render_mode};

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Restrict output to this person's line of descent.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub name: String,
    pub gender: Gender,
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    Mother,
    Spouse,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mother => "mother",
            Self::Spouse => "spouse",
        })
    }
}

pub type FamilyGraph = DiGraph<GraphNode, Link>;

#[derive(Debug, Serialize)]
struct GraphEdge<'a> {
    from: &'a str,
    to: &'a str,
    kind: Link,
}

#[derive(Debug, Serialize)]
struct GraphExport<'a> {
    nodes: Vec<&'a GraphNode>,
    edges: Vec<GraphEdge<'a>>,
}

/// Build the full family graph. Nodes are added in creation order.
pub fn build_graph(tree: &FamilyTree) -> FamilyGraph {
    let mut graph = DiGraph::with_capacity(tree.len(), tree.len());
    let mut nodes: HashMap<PersonId, NodeIndex> = HashMap::with_capacity(tree.len());

    for person in tree.members() {
        let idx = graph.add_node(GraphNode {
            name: person.name().to_string(),
            gender: person.gender(),
        });
        nodes.insert(person.id(), idx);
    }

    for person in tree.members() {
        let idx = nodes[&person.id()];
        if let Some(mother) = person.mother() {
            graph.add_edge(nodes[&mother.id()], idx, Link::Mother);
        }
        if let Some(spouse) = person.spouse()
            && spouse.sequence() > person.sequence()
        {
            graph.add_edge(idx, nodes[&spouse.id()], Link::Spouse);
        }
    }

    graph
}

/// Keep only the nodes reachable from `start` along mother and spouse edges.
pub fn line_of_descent(graph: &FamilyGraph, start: NodeIndex) -> FamilyGraph {
    let mut reachable = HashSet::new();
    let mut dfs = Dfs::new(graph, start);
    while let Some(idx) = dfs.next(graph) {
        reachable.insert(idx);
    }

    graph.filter_map(
        |idx, node| reachable.contains(&idx).then(|| node.clone()),
        |_, link| Some(*link),
    )
}

fn export(graph: &FamilyGraph) -> GraphExport<'_> {
    GraphExport {
        nodes: graph.node_weights().collect(),
        edges: graph
            .edge_references()
            .map(|e| GraphEdge {
                from: &graph[e.source()].name,
                to: &graph[e.target()].name,
                kind: *e.weight(),
            })
            .collect(),
    }
}

/// Execute `kin graph [name]`.
///
/// # Errors
///
/// Returns an error if the named person does not exist or rendering fails.
pub fn run_graph(args: &GraphArgs, tree: &FamilyTree, output: OutputMode) -> anyhow::Result<()> {
    let full = build_graph(tree);
    let graph = match args.name.as_deref() {
        Some(name) => {
            let person = tree.person(name)?;
            let start = full
                .node_indices()
                .find(|&idx| full[idx].name == person.name())
                .ok_or_else(|| anyhow::anyhow!("{name} missing from graph"))?;
            line_of_descent(&full, start)
        }
        None => full,
    };

    render_mode(
        output,
        &export(&graph),
        |_, w| write_dot(&graph, w),
        |_, w| write_dot(&graph, w),
    )
}

fn write_dot(graph: &FamilyGraph, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", Dot::new(graph))
}
