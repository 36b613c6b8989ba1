//! Convert a node to neighbor-list mapping into a symmetric adjacency matrix

use crate::{PlanetoidError, Result};
use petgraph::graphmap::UnGraphMap;
use sprs::{CsMat, TriMat};
use std::collections::HashMap;

/// Node index to the indices of the nodes it cites or is cited by
pub type AdjacencyList = HashMap<usize, Vec<usize>>;

/// Build an undirected graph from an adjacency list.
///
/// Nodes that only appear as neighbors are added too. Repeated edges collapse
/// into one, in either direction.
pub fn citation_graph(adjacency: &AdjacencyList) -> UnGraphMap<usize, ()> {
    let mut graph = UnGraphMap::new();

    for (&node, neighbors) in adjacency {
        graph.add_node(node);
        for &neighbor in neighbors {
            graph.add_edge(node, neighbor, ());
        }
    }

    graph
}

/// One past the largest node id named anywhere in the adjacency list
pub fn node_bound(adjacency: &AdjacencyList) -> usize {
    adjacency
        .iter()
        .flat_map(|(&node, neighbors)| std::iter::once(node).chain(neighbors.iter().copied()))
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Build the `num_nodes x num_nodes` symmetric adjacency matrix.
///
/// Every undirected edge contributes `1.0` at both `(a, b)` and `(b, a)`; a
/// self-citation contributes `1.0` on the diagonal.
pub fn adjacency_matrix(adjacency: &AdjacencyList, num_nodes: usize) -> Result<CsMat<f64>> {
    let graph = citation_graph(adjacency);

    if let Some(node) = graph.nodes().find(|&node| node >= num_nodes) {
        return Err(PlanetoidError::ShapeMismatch(format!(
            "graph references node {} but only {} nodes have features",
            node, num_nodes
        )));
    }

    let mut triplets = TriMat::new((num_nodes, num_nodes));
    for (a, b, _) in graph.all_edges() {
        triplets.add_triplet(a, b, 1.0);
        if a != b {
            triplets.add_triplet(b, a, 1.0);
        }
    }

    Ok(triplets.to_csr())
}
