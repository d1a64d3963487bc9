use petgraph::{algo::kosaraju_scc, graphmap::GraphMap, Directed};
use std::fmt::Debug;

use super::{
	finalized::FinalizedGraph,
	util::{GraphEdgeIdx, GraphNodeIdx},
};

/// A directed graph with parallel edges.
/// Fast writes are not a goal (within reason).
///
/// [`Graph`]s are designed to be created once, then finalized and only read
/// afterwards.
#[derive(Debug, Clone)]
pub struct Graph<NodeType, EdgeType>
where
	NodeType: Debug,
	EdgeType: Debug,
{
	pub(super) nodes: Vec<NodeType>,
	pub(super) edges: Vec<(GraphNodeIdx, GraphNodeIdx, EdgeType)>,
}

impl<NodeType, EdgeType> Default for Graph<NodeType, EdgeType>
where
	NodeType: Debug,
	EdgeType: Debug,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<NodeType, EdgeType> Graph<NodeType, EdgeType>
where
	NodeType: Debug,
	EdgeType: Debug,
{
	/// Create an empty graph
	pub fn new() -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
		}
	}

	/// Convert this graph to an immutable structure with fast reads.
	pub fn finalize(self) -> FinalizedGraph<NodeType, EdgeType> {
		let mut edge_map_in = (0..self.nodes.len()).map(|_| Vec::new()).collect::<Vec<_>>();
		let mut edge_map_out = (0..self.nodes.len()).map(|_| Vec::new()).collect::<Vec<_>>();
		for (i, x) in self.edges.iter().enumerate() {
			edge_map_out[usize::from(x.0)].push(GraphEdgeIdx(i));
			edge_map_in[usize::from(x.1)].push(GraphEdgeIdx(i));
		}

		FinalizedGraph {
			graph: self,
			edge_map_in,
			edge_map_out,
		}
	}

	/// Add a node to this graph.
	#[inline]
	pub fn add_node(&mut self, node: NodeType) -> GraphNodeIdx {
		let i = self.nodes.len();
		self.nodes.push(node);
		GraphNodeIdx(i)
	}

	#[inline]
	pub fn get_node(&self, node_idx: GraphNodeIdx) -> &NodeType {
		self.nodes.get(usize::from(node_idx)).unwrap()
	}

	#[inline]
	pub fn len_nodes(&self) -> usize {
		self.nodes.len()
	}

	#[inline]
	pub fn iter_nodes(&self) -> impl Iterator<Item = &NodeType> {
		self.nodes.iter()
	}

	#[inline]
	pub fn iter_nodes_idx(&self) -> impl Iterator<Item = (GraphNodeIdx, &NodeType)> {
		self.iter_nodes().enumerate().map(|(a, b)| (GraphNodeIdx(a), b))
	}

	/// Add an edge to this graph
	#[inline]
	pub fn add_edge(&mut self, from: GraphNodeIdx, to: GraphNodeIdx, edge_value: EdgeType) -> GraphEdgeIdx {
		let i = self.edges.len();
		self.edges.push((from, to, edge_value));
		GraphEdgeIdx(i)
	}

	#[inline]
	pub fn get_edge(&self, edge_idx: GraphEdgeIdx) -> (GraphNodeIdx, GraphNodeIdx, &EdgeType) {
		self.edges
			.get(usize::from(edge_idx))
			.map(|(f, t, v)| (*f, *t, v))
			.unwrap()
	}

	#[inline]
	pub fn len_edges(&self) -> usize {
		self.edges.len()
	}

	#[inline]
	pub fn iter_edges(&self) -> impl Iterator<Item = (GraphNodeIdx, GraphNodeIdx, &EdgeType)> {
		self.edges.iter().map(|(f, t, v)| (*f, *t, v))
	}

	/// Returns `true` if this graph has a cycle.
	#[inline]
	pub fn has_cycle(&self) -> bool {
		self.strongly_connected_components()
			.iter()
			.any(|scc| scc.len() > 1)
	}

	/// The strongly connected components of this graph, each as a list of
	/// node indices. A component of size 1 whose node has no self-loop is
	/// not a cycle.
	pub fn strongly_connected_components(&self) -> Vec<Vec<GraphNodeIdx>> {
		let mut fake_graph = GraphMap::<usize, (), Directed>::new();
		for i in 0..self.nodes.len() {
			fake_graph.add_node(i);
		}
		for (from, to, _) in self.iter_edges() {
			fake_graph.add_edge(from.into(), to.into(), ());
		}

		kosaraju_scc(&fake_graph)
			.into_iter()
			.map(|comp| comp.into_iter().map(GraphNodeIdx::from_usize).collect())
			.collect()
	}
}
