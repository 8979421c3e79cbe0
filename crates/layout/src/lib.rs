// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Kindred's Layout Engine
//!
//! Positions the nodes of a family graph for a hierarchical drawing: ancestors on the first
//! ranks, descendants further along, partners side by side.  The crate knows nothing about
//! people; it works on rectangles identified by string ids and on two kinds of edges:
//!
//! - [`EdgeKind::Hierarchical`] edges (parent to child) decide ranks.
//! - [`EdgeKind::Peer`] edges (spouses) keep their endpoints on one rank and next to each other.
//!
//! # Usage
//!
//! ```rust
//! use kindred_layout::{layout, Direction, LayoutConfig, LayoutEdge, LayoutNode};
//!
//! let nodes = vec![
//!     LayoutNode::new("parent", 180.0, 60.0),
//!     LayoutNode::new("child", 180.0, 60.0),
//! ];
//! let edges = vec![LayoutEdge::hierarchical("parent", "child")];
//! let config = LayoutConfig::new(Direction::TopToBottom);
//!
//! let positioned = layout(&nodes, &edges, &config);
//! assert!(positioned[0].center().y < positioned[1].center().y);
//! ```
//!
//! The layout is recomputed from scratch on every call and is fully deterministic: identical
//! input produces identical positions.
//!
//! # Module Structure
//!
//! - `common.rs` - Input/output types, direction handling and overlap checks
//! - `ranking.rs` - Rank assignment (longest path, cycle-safe, partner alignment)
//! - `sugiyama.rs` - Dummy nodes, crossing minimization and coordinate assignment

pub mod common;
pub mod ranking;
pub mod sugiyama;

pub use common::{
    Direction, EdgeKind, HandlePosition, LayoutConfig, LayoutEdge, LayoutNode, PositionedNode,
};
pub use sugiyama::layout;

// End of File
