// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Sugiyama (Layered) Layout Algorithm
//!
//! Family trees are layered graphs: every generation is a rank, parent/child edges point from one
//! rank to a later one, and partners share a rank.
//!
//! ## Algorithm Phases
//!
//! 1. **Rank Assignment**: Longest path from the roots, see [`crate::ranking`]
//! 2. **Dummy Node Insertion**: Add invisible nodes for edges spanning multiple ranks
//! 3. **Crossing Minimization**: Reorder nodes within ranks by barycenter sweeps, then pull
//!    partners next to each other
//! 4. **Coordinate Assignment**: Pack each rank, center it, and align parents with children
//!
//! Disconnected components are laid out separately and placed side by side along the cross
//! axis, largest first.
//!
//! Nodes are addressed by their index in the input slice throughout, and every tie is broken by
//! that index, so the result depends only on the input.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::common::{Direction, EdgeKind, LayoutConfig, LayoutEdge, LayoutNode, PositionedNode};
use crate::ranking::compute_ranks;

/// Limit on barycenter sweep rounds.
const MAX_SWEEP_ITERATIONS: usize = 24;

/// Gap between components, in multiples of the node separation.
const COMPONENT_GAP_FACTOR: f64 = 2.0;

// =============================================================================
// Data Structures
// =============================================================================

/// Represents either a real node or a dummy node for edge routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerNode {
    /// A real node, by input index.
    Real(usize),
    /// A dummy node for long edge routing.
    /// Contains (edge_index, segment_index).
    Dummy(usize, usize),
}

impl LayerNode {
    /// Returns the input index if this is a Real node, None otherwise.
    pub fn real_index(&self) -> Option<usize> {
        match self {
            LayerNode::Real(index) => Some(*index),
            LayerNode::Dummy(_, _) => None,
        }
    }
}

/// A rank containing both real and dummy nodes in order.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub nodes: Vec<LayerNode>,
}

/// Direction for barycenter sweeps.
#[derive(Debug, Clone, Copy)]
enum Sweep {
    /// Look at previous layer (parents)
    Backward,
    /// Look at next layer (children)
    Forward,
}

/// The layered graph with dummy nodes inserted.
#[derive(Debug)]
pub struct LayeredGraph {
    pub layers: Vec<Layer>,
    /// Maps each layer node to its neighbors in the next layer.
    pub forward_edges: HashMap<LayerNode, Vec<LayerNode>>,
    /// Maps each layer node to its neighbors in the previous layer.
    pub backward_edges: HashMap<LayerNode, Vec<LayerNode>>,
}

impl LayeredGraph {
    pub fn new(num_layers: usize) -> Self {
        Self {
            layers: (0..num_layers).map(|_| Layer::default()).collect(),
            forward_edges: HashMap::new(),
            backward_edges: HashMap::new(),
        }
    }

    /// Add an edge between two layer nodes.
    pub fn add_edge(&mut self, from: LayerNode, to: LayerNode) {
        self.forward_edges.entry(from).or_default().push(to);
        self.backward_edges.entry(to).or_default().push(from);
    }
}

/// Input with ids resolved to indices.
struct ResolvedGraph<'a> {
    nodes: Vec<&'a LayoutNode>,
    hierarchical: Vec<(usize, usize)>,
    peer: Vec<(usize, usize)>,
}

impl<'a> ResolvedGraph<'a> {
    fn resolve(nodes: &'a [LayoutNode], edges: &[LayoutEdge]) -> Self {
        let mut index_of: HashMap<&str, usize> = HashMap::new();
        let mut unique = Vec::with_capacity(nodes.len());
        for node in nodes {
            if index_of.contains_key(node.id.as_str()) {
                log::debug!("Ignoring duplicate layout node {}", node.id);
                continue;
            }
            index_of.insert(node.id.as_str(), unique.len());
            unique.push(node);
        }

        let mut hierarchical = Vec::new();
        let mut peer = Vec::new();
        for edge in edges {
            let (Some(&source), Some(&target)) = (
                index_of.get(edge.source.as_str()),
                index_of.get(edge.target.as_str()),
            ) else {
                log::debug!(
                    "Skipping layout edge {} -> {} with unknown endpoint",
                    edge.source,
                    edge.target
                );
                continue;
            };
            if source == target {
                continue;
            }
            match edge.kind {
                EdgeKind::Hierarchical => hierarchical.push((source, target)),
                EdgeKind::Peer => peer.push((source, target)),
            }
        }

        Self {
            nodes: unique,
            hierarchical,
            peer,
        }
    }

    fn partners(&self) -> Vec<Vec<usize>> {
        let mut partners = vec![Vec::new(); self.nodes.len()];
        for &(a, b) in &self.peer {
            partners[a].push(b);
            partners[b].push(a);
        }
        partners
    }

    fn cross_extent(&self, node: LayerNode, direction: Direction) -> f64 {
        match node {
            LayerNode::Real(index) => direction.cross_extent(self.nodes[index].size),
            // Dummy nodes contribute no width
            LayerNode::Dummy(_, _) => 0.0,
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

/// Compute positions for all nodes.
///
/// Edges whose endpoints are not among `nodes` are skipped.  If ids repeat, the first node with
/// that id is laid out and the rest are ignored, so the result has one entry per distinct id, in
/// input order.
///
/// Guarantees, for every pair of nodes on the same rank, a border gap of at least
/// `node_separation`, and between consecutive ranks a gap of at least `rank_separation`.
pub fn layout(
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
    config: &LayoutConfig,
) -> Vec<PositionedNode> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let graph = ResolvedGraph::resolve(nodes, edges);
    let direction = config.direction;
    let node_separation = config.node_separation.max(0.0);

    // Phase 1: Rank assignment
    let ranks = compute_ranks(graph.nodes.len(), &graph.hierarchical, &graph.peer);
    let rank_centers = rank_coordinates(&graph, &ranks, config);
    let partners = graph.partners();

    let mut cross = vec![0.0; graph.nodes.len()];
    let mut cursor = 0.0;

    for component in find_connected_components(&graph) {
        // Phase 2: Dummy node insertion
        let mut layered = build_layered_graph(&graph, &ranks, &component);

        // Phase 3: Crossing minimization
        minimize_crossings(&mut layered);
        cluster_partners(&mut layered, &partners);

        // Phase 4: Coordinate assignment
        let centers = assign_cross_coordinates(&layered, &graph, direction, node_separation);

        let (min, max) = component_span(&centers, &graph, direction);
        let offset = cursor - min;
        for (index, center) in centers {
            cross[index] = center + offset;
        }
        cursor += (max - min) + node_separation * COMPONENT_GAP_FACTOR;
    }

    graph
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let rank = ranks[index];
            let center = direction.to_screen(cross[index], rank_centers[rank]);
            PositionedNode {
                id: node.id.clone(),
                position: center - node.size / 2.0,
                size: node.size,
                rank,
                target_position: direction.target_handle(),
                source_position: direction.source_handle(),
            }
        })
        .collect()
}

/// Center of each rank along the main axis.
///
/// Consecutive ranks are spaced by half of each rank's thickest node plus the separation.
fn rank_coordinates(graph: &ResolvedGraph, ranks: &[usize], config: &LayoutConfig) -> Vec<f64> {
    let rank_count = ranks.iter().copied().max().map_or(0, |max| max + 1);
    let mut extents = vec![0.0_f64; rank_count];
    for (index, node) in graph.nodes.iter().enumerate() {
        let extent = config.direction.main_extent(node.size);
        extents[ranks[index]] = extents[ranks[index]].max(extent);
    }

    let separation = config.rank_separation.max(0.0);
    let mut centers = Vec::with_capacity(rank_count);
    let mut previous: Option<(f64, f64)> = None;
    for &extent in &extents {
        let center = match previous {
            None => 0.0,
            Some((previous_center, previous_extent)) => {
                previous_center + previous_extent / 2.0 + separation + extent / 2.0
            }
        };
        centers.push(center);
        previous = Some((center, extent));
    }
    centers
}

// =============================================================================
// Connected Components
// =============================================================================

/// Find all connected components, following both edge kinds.
///
/// Each component lists its node indices in ascending order.  Components are sorted by size
/// (largest first); equal sizes keep the order of their smallest index.
fn find_connected_components(graph: &ResolvedGraph) -> Vec<Vec<usize>> {
    let node_count = graph.nodes.len();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(a, b) in graph.hierarchical.iter().chain(graph.peer.iter()) {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut visited = vec![false; node_count];
    let mut components: Vec<Vec<usize>> = Vec::new();

    for start in 0..node_count {
        if visited[start] {
            continue;
        }

        let mut component = Vec::new();
        let mut queue: VecDeque<usize> = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            component.push(current);
            for &next in &adjacency[current] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    // Stable, so ties keep discovery order
    components.sort_by_key(|component| std::cmp::Reverse(component.len()));

    components
}

/// Horizontal (cross axis) extent of a placed component.
fn component_span(
    centers: &[(usize, f64)],
    graph: &ResolvedGraph,
    direction: Direction,
) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for &(index, center) in centers {
        let half = direction.cross_extent(graph.nodes[index].size) / 2.0;
        min = min.min(center - half);
        max = max.max(center + half);
    }
    if min > max {
        return (0.0, 0.0);
    }
    (min, max)
}

// =============================================================================
// Phase 2: Dummy Node Insertion
// =============================================================================

/// Place the component's nodes on their ranks and insert dummy nodes for long edges.
///
/// Edges that do not point to a later rank (the edge that closed a cycle) are left out.
fn build_layered_graph(
    graph: &ResolvedGraph,
    ranks: &[usize],
    component: &[usize],
) -> LayeredGraph {
    let Some(max_rank) = component.iter().map(|&index| ranks[index]).max() else {
        return LayeredGraph::new(0);
    };

    let mut layered = LayeredGraph::new(max_rank + 1);
    let members: HashSet<usize> = component.iter().copied().collect();

    for &index in component {
        layered.layers[ranks[index]].nodes.push(LayerNode::Real(index));
    }

    for (edge_index, &(source, target)) in graph.hierarchical.iter().enumerate() {
        if !members.contains(&source) || !members.contains(&target) {
            continue;
        }

        let source_rank = ranks[source];
        let target_rank = ranks[target];
        if source_rank >= target_rank {
            continue;
        }

        if target_rank - source_rank > 1 {
            let mut previous = LayerNode::Real(source);
            for (segment, rank) in (source_rank + 1..target_rank).enumerate() {
                let dummy = LayerNode::Dummy(edge_index, segment);
                layered.layers[rank].nodes.push(dummy);
                layered.add_edge(previous, dummy);
                previous = dummy;
            }
            layered.add_edge(previous, LayerNode::Real(target));
        } else {
            layered.add_edge(LayerNode::Real(source), LayerNode::Real(target));
        }
    }

    layered
}

// =============================================================================
// Phase 3: Crossing Minimization
// =============================================================================

/// Minimize edge crossings by reordering nodes within each layer.
///
/// Uses the iterative barycenter method:
/// - Sweep down (layer 0 → layer n-1), reordering by backward neighbors
/// - Sweep up (layer n-1 → layer 0), reordering by forward neighbors
/// - Repeat until a round brings no improvement, at most `MAX_SWEEP_ITERATIONS` times
pub fn minimize_crossings(graph: &mut LayeredGraph) {
    if graph.layers.len() < 2 {
        return;
    }

    for _ in 0..MAX_SWEEP_ITERATIONS {
        let mut improved = false;

        for layer_idx in 1..graph.layers.len() {
            let old_crossings = count_crossings(graph, layer_idx - 1, layer_idx);
            reorder_by_barycenter(graph, layer_idx, Sweep::Backward);
            let new_crossings = count_crossings(graph, layer_idx - 1, layer_idx);

            if new_crossings < old_crossings {
                improved = true;
            }
        }

        for layer_idx in (0..graph.layers.len() - 1).rev() {
            let old_crossings = count_crossings(graph, layer_idx, layer_idx + 1);
            reorder_by_barycenter(graph, layer_idx, Sweep::Forward);
            let new_crossings = count_crossings(graph, layer_idx, layer_idx + 1);

            if new_crossings < old_crossings {
                improved = true;
            }
        }

        if !improved {
            break;
        }
    }
}

/// Average position of a node's neighbors, or None if it has none in that layer.
fn compute_barycenter(
    node: LayerNode,
    neighbor_positions: &HashMap<LayerNode, usize>,
    edges: &HashMap<LayerNode, Vec<LayerNode>>,
) -> Option<f64> {
    let neighbors = edges.get(&node)?;

    let positions: Vec<usize> = neighbors
        .iter()
        .filter_map(|neighbor| neighbor_positions.get(neighbor).copied())
        .collect();

    if positions.is_empty() {
        return None;
    }

    let sum: usize = positions.iter().sum();
    Some(sum as f64 / positions.len() as f64)
}

/// Reorder nodes in a layer based on the barycenter of their neighbors.
///
/// A node without neighbors keeps its current index as its key, so it stays roughly in place.
fn reorder_by_barycenter(graph: &mut LayeredGraph, layer_idx: usize, sweep: Sweep) {
    let neighbor_layer = match sweep {
        Sweep::Backward => {
            if layer_idx == 0 {
                return;
            }
            layer_idx - 1
        }
        Sweep::Forward => {
            if layer_idx + 1 >= graph.layers.len() {
                return;
            }
            layer_idx + 1
        }
    };

    let neighbor_positions: HashMap<LayerNode, usize> = graph.layers[neighbor_layer]
        .nodes
        .iter()
        .enumerate()
        .map(|(pos, &node)| (node, pos))
        .collect();

    let edges = match sweep {
        Sweep::Backward => &graph.backward_edges,
        Sweep::Forward => &graph.forward_edges,
    };

    let mut node_barycenters: Vec<(LayerNode, f64)> = graph.layers[layer_idx]
        .nodes
        .iter()
        .enumerate()
        .map(|(pos, &node)| {
            let barycenter =
                compute_barycenter(node, &neighbor_positions, edges).unwrap_or(pos as f64);
            (node, barycenter)
        })
        .collect();

    // Stable sort to preserve order for equal values
    node_barycenters.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    graph.layers[layer_idx].nodes = node_barycenters.into_iter().map(|(node, _)| node).collect();
}

/// Count the number of edge crossings between two adjacent layers.
///
/// Two edges cross if and only if their source positions and target positions
/// have opposite orderings.
fn count_crossings(graph: &LayeredGraph, layer_a: usize, layer_b: usize) -> usize {
    let mut edges: Vec<(usize, usize)> = Vec::new();

    let pos_b: HashMap<LayerNode, usize> = graph.layers[layer_b]
        .nodes
        .iter()
        .enumerate()
        .map(|(pos, &node)| (node, pos))
        .collect();

    for (idx_a, &node_a) in graph.layers[layer_a].nodes.iter().enumerate() {
        if let Some(targets) = graph.forward_edges.get(&node_a) {
            for &target in targets {
                if let Some(&idx_b) = pos_b.get(&target) {
                    edges.push((idx_a, idx_b));
                }
            }
        }
    }

    let mut crossings = 0;
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            let (s1, t1) = edges[i];
            let (s2, t2) = edges[j];
            if (s1 < s2 && t1 > t2) || (s1 > s2 && t1 < t2) {
                crossings += 1;
            }
        }
    }

    crossings
}

/// Pull partners on the same layer next to each other.
///
/// Walks each layer in its current order; when a real node is met, its partners (and theirs,
/// for remarriages) on that layer are emitted right after it.
fn cluster_partners(graph: &mut LayeredGraph, partners: &[Vec<usize>]) {
    for layer in &mut graph.layers {
        let members: HashSet<usize> =
            layer.nodes.iter().filter_map(LayerNode::real_index).collect();
        let mut placed: HashSet<LayerNode> = HashSet::new();
        let mut order: Vec<LayerNode> = Vec::with_capacity(layer.nodes.len());

        for &node in &layer.nodes {
            if placed.contains(&node) {
                continue;
            }

            let LayerNode::Real(index) = node else {
                placed.insert(node);
                order.push(node);
                continue;
            };

            let mut stack = vec![index];
            while let Some(current) = stack.pop() {
                if !placed.insert(LayerNode::Real(current)) {
                    continue;
                }
                order.push(LayerNode::Real(current));
                for &partner in partners[current].iter().rev() {
                    if members.contains(&partner) && !placed.contains(&LayerNode::Real(partner)) {
                        stack.push(partner);
                    }
                }
            }
        }

        layer.nodes = order;
    }
}

// =============================================================================
// Phase 4: Coordinate Assignment
// =============================================================================

/// Assign cross-axis centers to the real nodes of one component.
///
/// 1. Packs each layer in order with `separation` between borders
/// 2. Centers each layer relative to the widest one
/// 3. Moves parents over their children, then children under their parents, wherever that
///    keeps the layer order and the gaps intact
fn assign_cross_coordinates(
    layered: &LayeredGraph,
    graph: &ResolvedGraph,
    direction: Direction,
    separation: f64,
) -> Vec<(usize, f64)> {
    let layer_span = |layer: &Layer| -> f64 {
        if layer.nodes.is_empty() {
            return 0.0;
        }
        let extents: f64 = layer
            .nodes
            .iter()
            .map(|&node| graph.cross_extent(node, direction))
            .sum();
        extents + (layer.nodes.len() - 1) as f64 * separation
    };

    let widest = layered
        .layers
        .iter()
        .map(layer_span)
        .fold(0.0_f64, f64::max);

    let mut centers: HashMap<LayerNode, f64> = HashMap::new();
    for layer in &layered.layers {
        let mut cursor = (widest - layer_span(layer)) / 2.0;
        for &node in &layer.nodes {
            let extent = graph.cross_extent(node, direction);
            centers.insert(node, cursor + extent / 2.0);
            cursor += extent + separation;
        }
    }

    // Parents toward their children, deepest layers first
    for layer_idx in (0..layered.layers.len().saturating_sub(1)).rev() {
        align_layer(
            &mut centers,
            layered,
            graph,
            direction,
            separation,
            layer_idx,
            Sweep::Forward,
        );
    }
    // Then children toward their parents
    for layer_idx in 1..layered.layers.len() {
        align_layer(
            &mut centers,
            layered,
            graph,
            direction,
            separation,
            layer_idx,
            Sweep::Backward,
        );
    }

    layered
        .layers
        .iter()
        .flat_map(|layer| layer.nodes.iter())
        .filter_map(|node| {
            let index = node.real_index()?;
            centers.get(node).map(|&center| (index, center))
        })
        .collect()
}

/// Move each real node of a layer to the average of its real neighbors in the adjacent layer,
/// if it still clears its left and right neighbors by `separation`.
fn align_layer(
    centers: &mut HashMap<LayerNode, f64>,
    layered: &LayeredGraph,
    graph: &ResolvedGraph,
    direction: Direction,
    separation: f64,
    layer_idx: usize,
    sweep: Sweep,
) {
    let edges = match sweep {
        Sweep::Backward => &layered.backward_edges,
        Sweep::Forward => &layered.forward_edges,
    };

    // Dummies carry no width, so only real nodes constrain a move
    let real_nodes: Vec<LayerNode> = layered.layers[layer_idx]
        .nodes
        .iter()
        .copied()
        .filter(|node| node.real_index().is_some())
        .collect();

    for (position, &node) in real_nodes.iter().enumerate() {
        let Some(neighbors) = edges.get(&node) else {
            continue;
        };

        let targets: Vec<f64> = neighbors
            .iter()
            .filter(|neighbor| neighbor.real_index().is_some())
            .filter_map(|neighbor| centers.get(neighbor).copied())
            .collect();
        if targets.is_empty() {
            continue;
        }
        let target = targets.iter().sum::<f64>() / targets.len() as f64;

        let extent = graph.cross_extent(node, direction);
        let clears = |other: LayerNode, before: bool| -> bool {
            let Some(&other_center) = centers.get(&other) else {
                return true;
            };
            let needed = (extent + graph.cross_extent(other, direction)) / 2.0 + separation;
            if before {
                target - other_center >= needed
            } else {
                other_center - target >= needed
            }
        };

        let fits_before = position
            .checked_sub(1)
            .map_or(true, |previous| clears(real_nodes[previous], true));
        let fits_after = real_nodes
            .get(position + 1)
            .map_or(true, |&next| clears(next, false));

        if fits_before && fits_after {
            centers.insert(node, target);
        }
    }
}

// =============================================================================
// Public Utilities for Testing
// =============================================================================

/// Count the total number of edge crossings in the entire graph.
/// Useful for testing and comparing layout quality.
pub fn count_total_crossings(graph: &LayeredGraph) -> usize {
    let mut total = 0;
    for i in 0..graph.layers.len().saturating_sub(1) {
        total += count_crossings(graph, i, i + 1);
    }
    total
}

/// Create a layered graph for testing purposes, with all nodes in one component and layers in
/// input order.  Real nodes are identified by their index in `nodes`.
pub fn create_layered_graph_for_testing(
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
) -> LayeredGraph {
    let graph = ResolvedGraph::resolve(nodes, edges);
    let ranks = compute_ranks(graph.nodes.len(), &graph.hierarchical, &graph.peer);
    let all: Vec<usize> = (0..graph.nodes.len()).collect();
    build_layered_graph(&graph, &ranks, &all)
}

// End of File
