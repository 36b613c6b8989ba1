//! Citation graph structure and its sparse adjacency matrix

mod adjacency;

pub use adjacency::{adjacency_matrix, citation_graph, node_bound, AdjacencyList};
