// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Shared types for the layout engine.
//!
//! Coordinates inside the engine are kept in an abstract frame: `main` runs along the ranks and
//! `cross` runs within a rank.  [`Direction`] maps that frame onto the screen (`y` is main for
//! top-to-bottom, `x` is main for left-to-right).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Default gap between neighbouring nodes on one rank.
pub const DEFAULT_NODE_SEPARATION: f64 = 50.0;

/// Default gap between consecutive ranks.
pub const DEFAULT_RANK_SEPARATION: f64 = 80.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Ranks are rows; ancestors at the top.
    #[default]
    #[serde(rename = "TB", alias = "tb")]
    TopToBottom,
    /// Ranks are columns; ancestors on the left.
    #[serde(rename = "LR", alias = "lr")]
    LeftToRight,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::TopToBottom => Direction::LeftToRight,
            Direction::LeftToRight => Direction::TopToBottom,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::TopToBottom => "TB",
            Direction::LeftToRight => "LR",
        }
    }

    /// Side of a node where incoming edges attach.
    pub fn target_handle(self) -> HandlePosition {
        match self {
            Direction::TopToBottom => HandlePosition::Top,
            Direction::LeftToRight => HandlePosition::Left,
        }
    }

    /// Side of a node where outgoing edges attach.
    pub fn source_handle(self) -> HandlePosition {
        match self {
            Direction::TopToBottom => HandlePosition::Bottom,
            Direction::LeftToRight => HandlePosition::Right,
        }
    }

    /// Extent of `size` along the rank axis.
    pub(crate) fn main_extent(self, size: DVec2) -> f64 {
        match self {
            Direction::TopToBottom => size.y,
            Direction::LeftToRight => size.x,
        }
    }

    /// Extent of `size` within a rank.
    pub(crate) fn cross_extent(self, size: DVec2) -> f64 {
        match self {
            Direction::TopToBottom => size.x,
            Direction::LeftToRight => size.y,
        }
    }

    /// Maps an abstract `(cross, main)` point onto screen coordinates.
    pub(crate) fn to_screen(self, cross: f64, main: f64) -> DVec2 {
        match self {
            Direction::TopToBottom => DVec2::new(cross, main),
            Direction::LeftToRight => DVec2::new(main, cross),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlePosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub direction: Direction,
    /// Minimum gap between the borders of two nodes on the same rank.
    pub node_separation: f64,
    /// Minimum gap between the borders of two consecutive ranks.
    pub rank_separation: f64,
}

impl LayoutConfig {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn with_separation(mut self, node_separation: f64, rank_separation: f64) -> Self {
        self.node_separation = node_separation;
        self.rank_separation = rank_separation;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::TopToBottom,
            node_separation: DEFAULT_NODE_SEPARATION,
            rank_separation: DEFAULT_RANK_SEPARATION,
        }
    }
}

/// A rectangle to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub size: DVec2,
}

impl LayoutNode {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            size: DVec2::new(width.max(0.0), height.max(0.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Directed parent to child; the target goes on a later rank than the source.
    Hierarchical,
    /// Undirected partnership; both ends share a rank where possible.
    Peer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

impl LayoutEdge {
    pub fn hierarchical(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Hierarchical,
        }
    }

    pub fn peer(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Peer,
        }
    }
}

/// Result for one input node.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub id: String,
    /// Top-left corner of the node rectangle.
    pub position: DVec2,
    pub size: DVec2,
    pub rank: usize,
    pub target_position: HandlePosition,
    pub source_position: HandlePosition,
}

impl PositionedNode {
    pub fn center(&self) -> DVec2 {
        self.position + self.size / 2.0
    }
}

/// Checks if two axis-aligned boxes, each expanded by half of `gap`, overlap.
///
/// `pos1`/`pos2` are top-left corners.  Boxes that are exactly `gap` apart do not overlap.
pub fn nodes_overlap(pos1: DVec2, size1: DVec2, pos2: DVec2, size2: DVec2, gap: f64) -> bool {
    let half_gap = gap / 2.0;

    let left1 = pos1.x - half_gap;
    let right1 = pos1.x + size1.x + half_gap;
    let top1 = pos1.y - half_gap;
    let bottom1 = pos1.y + size1.y + half_gap;

    let left2 = pos2.x - half_gap;
    let right2 = pos2.x + size2.x + half_gap;
    let top2 = pos2.y - half_gap;
    let bottom2 = pos2.y + size2.y + half_gap;

    left1 < right2 && right1 > left2 && top1 < bottom2 && bottom1 > top2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_follow_direction() {
        assert_eq!(Direction::TopToBottom.target_handle(), HandlePosition::Top);
        assert_eq!(Direction::TopToBottom.source_handle(), HandlePosition::Bottom);
        assert_eq!(Direction::LeftToRight.target_handle(), HandlePosition::Left);
        assert_eq!(Direction::LeftToRight.source_handle(), HandlePosition::Right);
        assert_eq!(Direction::TopToBottom.toggled(), Direction::LeftToRight);
    }

    #[test]
    fn overlap_respects_gap() {
        let size = DVec2::new(10.0, 10.0);
        assert!(nodes_overlap(DVec2::ZERO, size, DVec2::new(5.0, 0.0), size, 0.0));
        assert!(!nodes_overlap(DVec2::ZERO, size, DVec2::new(20.0, 0.0), size, 10.0));
        assert!(nodes_overlap(DVec2::ZERO, size, DVec2::new(19.0, 0.0), size, 10.0));
    }
}

// End of File
