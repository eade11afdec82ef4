use crate::graph::GraphData;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

pub(crate) type Adjacency<'a> = BTreeMap<&'a str, Vec<&'a str>>;

pub(crate) fn forward_adjacency(graph: &GraphData) -> Adjacency<'_> {
    let mut adjacency: Adjacency<'_> = BTreeMap::new();
    for link in &graph.links {
        adjacency
            .entry(link.source.as_str())
            .or_default()
            .push(link.target.as_str());
    }
    adjacency
}

pub(crate) fn reversed_adjacency(graph: &GraphData) -> Adjacency<'_> {
    let mut adjacency: Adjacency<'_> = BTreeMap::new();
    for link in &graph.links {
        adjacency
            .entry(link.target.as_str())
            .or_default()
            .push(link.source.as_str());
    }
    adjacency
}

/// Nodes of `graph` not reachable from any of `starts` by breadth-first
/// search over `adjacency`, in node order.
pub(crate) fn unreached_nodes<'a>(
    graph: &'a GraphData,
    starts: impl IntoIterator<Item = &'a str>,
    adjacency: &Adjacency<'a>,
) -> Vec<&'a str> {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::new();
    for start in starts {
        if seen.insert(start) {
            queue.push_back(start);
        }
    }
    while let Some(current) = queue.pop_front() {
        for next in adjacency.get(current).into_iter().flatten() {
            if seen.insert(*next) {
                queue.push_back(*next);
            }
        }
    }
    graph
        .nodes
        .iter()
        .map(String::as_str)
        .filter(|node| !seen.contains(node))
        .collect()
}
