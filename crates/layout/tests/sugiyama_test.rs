// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Tests for the layered layout.
//!
//! These tests verify:
//! - degenerate input (empty, unknown endpoints, isolated nodes, cycles)
//! - determinism
//! - the separation guarantees on ranks and within ranks
//! - direction handling and handle positions
//! - partner alignment and crossing reduction

use kindred_layout::sugiyama::{
    count_total_crossings, create_layered_graph_for_testing, minimize_crossings,
};
use kindred_layout::{
    layout, Direction, HandlePosition, LayoutConfig, LayoutEdge, LayoutNode, PositionedNode,
};

const EPSILON: f64 = 1e-6;

fn nodes(ids: &[&str]) -> Vec<LayoutNode> {
    ids.iter().map(|id| LayoutNode::new(*id, 180.0, 80.0)).collect()
}

fn find<'a>(positioned: &'a [PositionedNode], id: &str) -> &'a PositionedNode {
    positioned
        .iter()
        .find(|node| node.id == id)
        .unwrap_or_else(|| panic!("{id} was not positioned"))
}

/// A mid-sized family with two marriages into the tree and one long edge.
fn family() -> (Vec<LayoutNode>, Vec<LayoutEdge>) {
    let mut nodes = nodes(&["gp", "gm", "mum", "uncle", "dad", "aunt", "kid", "cousin", "baby"]);
    nodes[3].size.x = 240.0;
    nodes[6].size.y = 120.0;
    let edges = vec![
        LayoutEdge::hierarchical("gp", "mum"),
        LayoutEdge::hierarchical("gm", "mum"),
        LayoutEdge::hierarchical("gp", "uncle"),
        LayoutEdge::hierarchical("gm", "uncle"),
        LayoutEdge::peer("gp", "gm"),
        LayoutEdge::peer("mum", "dad"),
        LayoutEdge::peer("uncle", "aunt"),
        LayoutEdge::hierarchical("mum", "kid"),
        LayoutEdge::hierarchical("dad", "kid"),
        LayoutEdge::hierarchical("uncle", "cousin"),
        LayoutEdge::hierarchical("aunt", "cousin"),
        LayoutEdge::hierarchical("kid", "baby"),
        LayoutEdge::hierarchical("gp", "baby"),
    ];
    (nodes, edges)
}

// =============================================================================
// Degenerate input
// =============================================================================

#[test]
fn test_empty_input() {
    assert!(layout(&[], &[], &LayoutConfig::default()).is_empty());
}

#[test]
fn test_unknown_endpoint_is_skipped() {
    let nodes = nodes(&["a", "b"]);
    let edges = vec![
        LayoutEdge::hierarchical("a", "ghost"),
        LayoutEdge::hierarchical("a", "b"),
    ];
    let positioned = layout(&nodes, &edges, &LayoutConfig::default());

    assert_eq!(positioned.len(), 2);
    assert_eq!(find(&positioned, "a").rank, 0);
    assert_eq!(find(&positioned, "b").rank, 1);
}

#[test]
fn test_isolated_node_is_positioned() {
    let nodes = nodes(&["alone"]);
    let positioned = layout(&nodes, &[], &LayoutConfig::default());

    assert_eq!(positioned.len(), 1);
    assert_eq!(positioned[0].id, "alone");
    assert!(positioned[0].position.is_finite());
}

#[test]
fn test_cycles_terminate() {
    let nodes = nodes(&["a", "b", "c"]);
    let edges = vec![
        LayoutEdge::hierarchical("a", "b"),
        LayoutEdge::hierarchical("b", "c"),
        LayoutEdge::hierarchical("c", "a"),
    ];
    let positioned = layout(&nodes, &edges, &LayoutConfig::default());
    assert_eq!(positioned.len(), 3);
    assert!(positioned.iter().all(|node| node.position.is_finite()));
}

#[test]
fn test_duplicate_ids_are_laid_out_once() {
    let nodes = nodes(&["a", "a", "b"]);
    let positioned = layout(&nodes, &[], &LayoutConfig::default());
    let ids: Vec<&str> = positioned.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

// =============================================================================
// Determinism and separation
// =============================================================================

#[test]
fn test_layout_is_deterministic() {
    let (nodes, edges) = family();
    let config = LayoutConfig::default();
    let first = layout(&nodes, &edges, &config);
    for _ in 0..5 {
        assert_eq!(layout(&nodes, &edges, &config), first);
    }
}

#[test]
fn test_same_rank_nodes_are_separated() {
    let (nodes, edges) = family();
    for direction in [Direction::TopToBottom, Direction::LeftToRight] {
        let config = LayoutConfig::new(direction).with_separation(40.0, 70.0);
        let positioned = layout(&nodes, &edges, &config);

        for (i, first) in positioned.iter().enumerate() {
            for second in &positioned[i + 1..] {
                if first.rank != second.rank {
                    continue;
                }
                let (distance, half_extents) = match direction {
                    Direction::TopToBottom => (
                        (first.center().x - second.center().x).abs(),
                        (first.size.x + second.size.x) / 2.0,
                    ),
                    Direction::LeftToRight => (
                        (first.center().y - second.center().y).abs(),
                        (first.size.y + second.size.y) / 2.0,
                    ),
                };
                assert!(
                    distance - half_extents >= 40.0 - EPSILON,
                    "{} and {} are too close ({direction:?})",
                    first.id,
                    second.id
                );
            }
        }
    }
}

#[test]
fn test_adjacent_ranks_are_separated() {
    let (nodes, edges) = family();
    let config = LayoutConfig::new(Direction::TopToBottom).with_separation(40.0, 70.0);
    let positioned = layout(&nodes, &edges, &config);

    for upper in &positioned {
        for lower in &positioned {
            if lower.rank != upper.rank + 1 {
                continue;
            }
            let gap = lower.position.y - (upper.position.y + upper.size.y);
            assert!(
                gap >= 70.0 - EPSILON,
                "{} and {} are only {gap} apart",
                upper.id,
                lower.id
            );
        }
    }
}

#[test]
fn test_disconnected_components_do_not_overlap() {
    let nodes = nodes(&["a", "b", "x", "y"]);
    let edges = vec![
        LayoutEdge::hierarchical("a", "b"),
        LayoutEdge::hierarchical("x", "y"),
    ];
    let positioned = layout(&nodes, &edges, &LayoutConfig::default());

    let a = find(&positioned, "a");
    let x = find(&positioned, "x");
    assert_eq!(a.rank, x.rank);
    assert!((a.center().x - x.center().x).abs() >= 180.0 + 50.0 - EPSILON);
}

// =============================================================================
// Direction
// =============================================================================

#[test]
fn test_top_to_bottom_scenario() {
    let nodes = nodes(&["a", "b", "c"]);
    let edges = vec![LayoutEdge::hierarchical("a", "b"), LayoutEdge::hierarchical("a", "c")];
    let positioned = layout(&nodes, &edges, &LayoutConfig::new(Direction::TopToBottom));

    let (a, b, c) = (find(&positioned, "a"), find(&positioned, "b"), find(&positioned, "c"));
    assert!(a.position.y < b.position.y);
    assert!((b.position.y - c.position.y).abs() < EPSILON);
    assert!((b.position.x - c.position.x).abs() > EPSILON);
    assert!(positioned.iter().all(|node| node.target_position == HandlePosition::Top));
    assert!(positioned.iter().all(|node| node.source_position == HandlePosition::Bottom));
}

#[test]
fn test_left_to_right_scenario() {
    let nodes = nodes(&["a", "b", "c"]);
    let edges = vec![LayoutEdge::hierarchical("a", "b"), LayoutEdge::hierarchical("a", "c")];
    let positioned = layout(&nodes, &edges, &LayoutConfig::new(Direction::LeftToRight));

    let (a, b, c) = (find(&positioned, "a"), find(&positioned, "b"), find(&positioned, "c"));
    assert!(a.position.x < b.position.x);
    assert!((b.position.x - c.position.x).abs() < EPSILON);
    assert!((b.position.y - c.position.y).abs() > EPSILON);
    assert!(positioned.iter().all(|node| node.target_position == HandlePosition::Left));
    assert!(positioned.iter().all(|node| node.source_position == HandlePosition::Right));
}

#[test]
fn test_single_child_is_centered_under_parent() {
    let nodes = nodes(&["parent", "child"]);
    let edges = vec![LayoutEdge::hierarchical("parent", "child")];
    let positioned = layout(&nodes, &edges, &LayoutConfig::default());
    let parent = find(&positioned, "parent");
    let child = find(&positioned, "child");
    assert!((parent.center().x - child.center().x).abs() < EPSILON);
}

// =============================================================================
// Partners
// =============================================================================

#[test]
fn test_partner_shares_rank_and_sits_next_to_spouse() {
    let nodes = nodes(&["gp", "mum", "uncle", "dad"]);
    let edges = vec![
        LayoutEdge::hierarchical("gp", "mum"),
        LayoutEdge::hierarchical("gp", "uncle"),
        LayoutEdge::peer("mum", "dad"),
    ];
    let positioned = layout(&nodes, &edges, &LayoutConfig::default());

    let mum = find(&positioned, "mum");
    let dad = find(&positioned, "dad");
    let uncle = find(&positioned, "uncle");
    assert_eq!(dad.rank, mum.rank);

    // Nobody on their rank sits between the couple.
    let (low, high) = if mum.center().x < dad.center().x {
        (mum.center().x, dad.center().x)
    } else {
        (dad.center().x, mum.center().x)
    };
    assert!(uncle.center().x < low || uncle.center().x > high);
}

#[test]
fn test_parent_recorded_as_spouse_keeps_hierarchy_ranks() {
    // A long unrelated chain next to a pair that is both parent/child and partners.
    let chain: Vec<String> = (0..30).map(|index| format!("n{index}")).collect();
    let mut ids: Vec<&str> = chain.iter().map(String::as_str).collect();
    ids.extend(["x", "y"]);
    let nodes = nodes(&ids);

    let mut edges: Vec<LayoutEdge> = chain
        .windows(2)
        .map(|pair| LayoutEdge::hierarchical(pair[0].as_str(), pair[1].as_str()))
        .collect();
    edges.push(LayoutEdge::hierarchical("x", "y"));
    edges.push(LayoutEdge::peer("x", "y"));

    let positioned = layout(&nodes, &edges, &LayoutConfig::default());
    let x = find(&positioned, "x");
    let y = find(&positioned, "y");
    assert_eq!(x.rank, 0);
    assert_eq!(y.rank, 1);
    assert_eq!(x.center().y, find(&positioned, "n0").center().y);
}

// =============================================================================
// Crossing minimization
// =============================================================================

#[test]
fn test_crossings_are_reduced() {
    let nodes = nodes(&["a", "b", "c", "d"]);
    let edges = vec![LayoutEdge::hierarchical("a", "d"), LayoutEdge::hierarchical("b", "c")];

    let mut graph = create_layered_graph_for_testing(&nodes, &edges);
    assert_eq!(count_total_crossings(&graph), 1);

    minimize_crossings(&mut graph);
    assert_eq!(count_total_crossings(&graph), 0);
}

#[test]
fn test_long_edges_get_dummy_nodes() {
    let nodes = nodes(&["top", "middle", "bottom"]);
    let edges = vec![
        LayoutEdge::hierarchical("top", "middle"),
        LayoutEdge::hierarchical("middle", "bottom"),
        LayoutEdge::hierarchical("top", "bottom"),
    ];
    let graph = create_layered_graph_for_testing(&nodes, &edges);

    assert_eq!(graph.layers.len(), 3);
    assert_eq!(graph.layers[1].nodes.len(), 2);
    assert_eq!(
        graph.layers[1]
            .nodes
            .iter()
            .filter(|node| node.real_index().is_none())
            .count(),
        1
    );
}

// End of File
