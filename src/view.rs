// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! The render model: positioned nodes and edges as handed to the drawing surface.
//!
//! A [`GraphView`] is derived from a [`FamilyGraph`] (or a [`LineageFocus`] of it) and then
//! positioned by the layout engine.  It is rebuilt from scratch on every structural change.

use std::collections::HashMap;

use app_config::AppConfig;
use glam::DVec2;
use graph::{FamilyGraph, LineageFocus, Person, PersonId, Relationship, RelationshipType};
use layout::{Direction, HandlePosition, LayoutConfig, LayoutEdge, LayoutNode, PositionedNode};
use serde::{Serialize, Serializer};

use crate::viewport::Bounds;

/// Node size and layout parameters for building a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub node_width: f64,
    pub node_height: f64,
    pub layout: LayoutConfig,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ViewSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            node_width: config.layout.node_width,
            node_height: config.layout.node_height,
            layout: config.layout_config(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.layout.direction
    }

    pub fn node_size(&self) -> DVec2 {
        DVec2::new(self.node_width, self.node_height)
    }
}

/// What a node shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    pub label: String,
    pub subline: String,
    pub deceased: bool,
    /// Set on the selected person while in focus mode.
    pub highlighted: bool,
    /// Set on a node that is shown before the server has confirmed it.
    pub pending: bool,
}

impl NodeData {
    pub fn from_person(person: &Person) -> Self {
        Self {
            label: person.display_name(),
            subline: person.life_span(),
            deceased: person.is_deceased(),
            highlighted: false,
            pending: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub person_id: PersonId,
    pub data: NodeData,
    /// Top-left corner in layout space.
    #[serde(serialize_with = "serialize_point")]
    pub position: DVec2,
    #[serde(skip)]
    pub size: DVec2,
    pub target_position: HandlePosition,
    pub source_position: HandlePosition,
}

impl GraphNode {
    fn new(person: &Person, settings: &ViewSettings) -> Self {
        Self {
            id: person.id.clone(),
            person_id: person.id.clone(),
            data: NodeData::from_person(person),
            position: DVec2::ZERO,
            size: settings.node_size(),
            target_position: settings.direction().target_handle(),
            source_position: settings.direction().source_handle(),
        }
    }

    pub fn center(&self) -> DVec2 {
        self.position + self.size / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: PersonId,
    pub target: PersonId,
    pub relationship_type: RelationshipType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub pending: bool,
}

impl GraphEdge {
    pub fn from_relationship(relationship: &Relationship) -> Self {
        Self {
            id: relationship.id.clone(),
            source: relationship.person_1_id.clone(),
            target: relationship.person_2_id.clone(),
            relationship_type: relationship.relationship_type,
            pending: false,
        }
    }

    fn layout_edge(&self) -> LayoutEdge {
        if self.relationship_type.is_parental() {
            LayoutEdge::hierarchical(self.source.clone(), self.target.clone())
        } else {
            LayoutEdge::peer(self.source.clone(), self.target.clone())
        }
    }
}

/// Where a pending node goes relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingPlacement {
    /// One rank before the anchor (a new parent).
    Before,
    /// One rank after the anchor (a new child).
    After,
    /// Next to the anchor on its rank (a new spouse).
    Beside,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    /// Every person and relationship of `graph`, laid out.
    pub fn from_graph(graph: &FamilyGraph, settings: &ViewSettings) -> Self {
        let nodes = graph
            .persons()
            .map(|person| GraphNode::new(person, settings))
            .collect();
        Self::assemble(nodes, graph.relationships(), settings)
    }

    /// Only the people and relationships of `focus`, laid out on their own.
    pub fn from_focus(graph: &FamilyGraph, focus: &LineageFocus, settings: &ViewSettings) -> Self {
        let nodes = focus
            .person_ids
            .iter()
            .filter_map(|id| graph.person(id))
            .map(|person| {
                let mut node = GraphNode::new(person, settings);
                node.data.highlighted = person.id == focus.selected;
                node
            })
            .collect();
        Self::assemble(nodes, &focus.relationships, settings)
    }

    fn assemble(
        nodes: Vec<GraphNode>,
        relationships: &[Relationship],
        settings: &ViewSettings,
    ) -> Self {
        let mut view = Self {
            nodes,
            edges: Vec::new(),
        };
        view.edges = relationships
            .iter()
            .filter(|relationship| {
                view.contains(&relationship.person_1_id) && view.contains(&relationship.person_2_id)
            })
            .map(GraphEdge::from_relationship)
            .collect();
        view.relayout(settings);
        view
    }

    /// Recomputes every position with the layout engine.
    pub fn relayout(&mut self, settings: &ViewSettings) {
        let layout_nodes: Vec<LayoutNode> = self
            .nodes
            .iter()
            .map(|node| LayoutNode::new(node.id.clone(), settings.node_width, settings.node_height))
            .collect();
        let layout_edges: Vec<LayoutEdge> = self.edges.iter().map(GraphEdge::layout_edge).collect();

        let positioned = layout::layout(&layout_nodes, &layout_edges, &settings.layout);
        let by_id: HashMap<&str, &PositionedNode> = positioned
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();

        for node in &mut self.nodes {
            node.size = settings.node_size();
            node.target_position = settings.direction().target_handle();
            node.source_position = settings.direction().source_handle();
            if let Some(placed) = by_id.get(node.id.as_str()) {
                node.position = placed.position;
            }
        }
    }

    pub fn contains(&self, person_id: &str) -> bool {
        self.nodes.iter().any(|node| node.person_id == person_id)
    }

    pub fn node(&self, person_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.person_id == person_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|edge| edge.id == edge_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hides a person and every edge touching them.  Returns false if they were not shown.
    pub fn remove_person(&mut self, person_id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| node.person_id != person_id);
        self.edges
            .retain(|edge| edge.source != person_id && edge.target != person_id);
        self.nodes.len() != before
    }

    /// Shows `person` before the server has confirmed it, next to `anchor` when given.
    ///
    /// The edge is only added when both of its endpoints are shown.
    pub fn add_pending(
        &mut self,
        person: &Person,
        anchor: Option<(&str, PendingPlacement)>,
        edge: Option<GraphEdge>,
        settings: &ViewSettings,
    ) {
        let mut node = GraphNode::new(person, settings);
        node.data.pending = true;
        node.position = match anchor.and_then(|(id, placement)| {
            self.node(id).map(|anchor| (anchor.position, placement))
        }) {
            Some((anchor, placement)) => anchor + pending_offset(placement, settings),
            None => self
                .bounds()
                .map(|bounds| {
                    DVec2::new(
                        bounds.max.x + settings.layout.node_separation,
                        bounds.min.y,
                    )
                })
                .unwrap_or(DVec2::ZERO),
        };
        self.nodes.push(node);

        if let Some(mut edge) = edge {
            edge.pending = true;
            if self.contains(&edge.source) && self.contains(&edge.target) {
                self.edges.push(edge);
            }
        }
    }

    /// Moves a node by a layout-space delta, e.g. while it is being dragged.
    pub fn translate_node(&mut self, person_id: &str, delta: DVec2) -> bool {
        match self.nodes.iter_mut().find(|node| node.person_id == person_id) {
            Some(node) => {
                node.position += delta;
                true
            }
            None => false,
        }
    }

    /// Box around every node, or None for an empty view.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.nodes.iter().map(|node| (node.position, node.size)))
    }
}

fn pending_offset(placement: PendingPlacement, settings: &ViewSettings) -> DVec2 {
    let direction = settings.direction();
    let rank_pitch = match direction {
        Direction::TopToBottom => settings.node_height,
        Direction::LeftToRight => settings.node_width,
    } + settings.layout.rank_separation;
    let cross_pitch = match direction {
        Direction::TopToBottom => settings.node_width,
        Direction::LeftToRight => settings.node_height,
    } + settings.layout.node_separation;

    let (cross, main) = match placement {
        PendingPlacement::Before => (0.0, -rank_pitch),
        PendingPlacement::After => (0.0, rank_pitch),
        PendingPlacement::Beside => (cross_pitch, 0.0),
    };
    match direction {
        Direction::TopToBottom => DVec2::new(cross, main),
        Direction::LeftToRight => DVec2::new(main, cross),
    }
}

fn serialize_point<S: Serializer>(point: &DVec2, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Point {
        x: f64,
        y: f64,
    }
    Point {
        x: point.x,
        y: point.y,
    }
    .serialize(serializer)
}

// End of File
