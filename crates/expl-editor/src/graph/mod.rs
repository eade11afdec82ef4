mod cache;
mod compute;

pub use cache::GraphCache;
pub use compute::{compute_graph, GraphData, GraphLink};
