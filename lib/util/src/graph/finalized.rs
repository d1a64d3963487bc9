use std::fmt::Debug;

use super::{
	graph::Graph,
	util::{GraphEdgeIdx, GraphNodeIdx},
};

/// A [`Graph`] with precomputed edge indices, for fast reads.
///
/// Build one of these with [`Graph::finalize`].
#[derive(Debug, Clone)]
pub struct FinalizedGraph<NodeType, EdgeType>
where
	NodeType: Debug,
	EdgeType: Debug,
{
	pub(super) graph: Graph<NodeType, EdgeType>,

	// Indexed by node. edge_map_in[n] is the list of edges ending at n,
	// edge_map_out[n] is the list of edges starting at n.
	pub(super) edge_map_in: Vec<Vec<GraphEdgeIdx>>,
	pub(super) edge_map_out: Vec<Vec<GraphEdgeIdx>>,
}

impl<NodeType, EdgeType> FinalizedGraph<NodeType, EdgeType>
where
	NodeType: Debug,
	EdgeType: Debug,
{
	#[inline]
	pub fn get_node(&self, node_idx: GraphNodeIdx) -> &NodeType {
		self.graph.get_node(node_idx)
	}

	#[inline]
	pub fn len_nodes(&self) -> usize {
		self.graph.len_nodes()
	}

	#[inline]
	pub fn iter_nodes(&self) -> impl Iterator<Item = &NodeType> {
		self.graph.iter_nodes()
	}

	#[inline]
	pub fn iter_nodes_idx(&self) -> impl Iterator<Item = (GraphNodeIdx, &NodeType)> {
		self.graph.iter_nodes_idx()
	}

	#[inline]
	pub fn get_edge(&self, edge_idx: GraphEdgeIdx) -> (GraphNodeIdx, GraphNodeIdx, &EdgeType) {
		self.graph.get_edge(edge_idx)
	}

	#[inline]
	pub fn len_edges(&self) -> usize {
		self.graph.len_edges()
	}

	#[inline]
	pub fn iter_edges(&self) -> impl Iterator<Item = (GraphNodeIdx, GraphNodeIdx, &EdgeType)> {
		self.graph.iter_edges()
	}

	#[inline]
	pub fn has_cycle(&self) -> bool {
		self.graph.has_cycle()
	}

	#[inline]
	pub fn strongly_connected_components(&self) -> Vec<Vec<GraphNodeIdx>> {
		self.graph.strongly_connected_components()
	}

	/// Edges starting at `node`, in insertion order.
	#[inline]
	pub fn edges_starting_at(&self, node: GraphNodeIdx) -> impl Iterator<Item = GraphEdgeIdx> + '_ {
		self.edge_map_out[usize::from(node)].iter().copied()
	}

	/// Edges ending at `node`, in insertion order.
	#[inline]
	pub fn edges_ending_at(&self, node: GraphNodeIdx) -> impl Iterator<Item = GraphEdgeIdx> + '_ {
		self.edge_map_in[usize::from(node)].iter().copied()
	}
}
