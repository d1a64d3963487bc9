pub mod finalized;
pub mod graph;
pub mod util;

pub use finalized::FinalizedGraph;
pub use graph::Graph;
pub use util::{GraphEdgeIdx, GraphNodeIdx};
