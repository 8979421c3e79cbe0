// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Ancestor and descendant traversal over a [`FamilyGraph`].
//!
//! The relationship data is not guaranteed to be acyclic (nothing stops "A parent of B" and
//! "B parent of A" from both being stored), so every closure below runs a breadth-first search
//! with its own visited set.  The bounded trees do not need one: their depth limit is what
//! terminates them, and they intentionally repeat people who are reachable along several paths.

use std::collections::VecDeque;

use indexmap::IndexSet;
use serde::Serialize;

use crate::family::FamilyGraph;
use crate::model::{Person, PersonId, Relationship};

/// Default generation limit for pedigree and descendant trees.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// One node of an ancestor (pedigree) tree.
///
/// The same person can appear in several branches when the tree has pedigree collapse.  Each
/// appearance is its own node so a fan chart can draw every path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PedigreeNode {
    pub person: Person,
    pub generation: usize,
    pub parents: Vec<PedigreeNode>,
}

impl PedigreeNode {
    /// Deepest generation present in this subtree.
    pub fn max_generation(&self) -> usize {
        self.parents
            .iter()
            .map(PedigreeNode::max_generation)
            .max()
            .unwrap_or(self.generation)
    }

    /// Number of nodes in this subtree, repeated ancestors counted once per appearance.
    pub fn node_count(&self) -> usize {
        1 + self.parents.iter().map(PedigreeNode::node_count).sum::<usize>()
    }
}

/// One node of a descendant tree, the mirror image of [`PedigreeNode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescendantNode {
    pub person: Person,
    pub generation: usize,
    pub children: Vec<DescendantNode>,
}

impl DescendantNode {
    pub fn max_generation(&self) -> usize {
        self.children
            .iter()
            .map(DescendantNode::max_generation)
            .max()
            .unwrap_or(self.generation)
    }
}

/// The lineage around a selected person: ancestors, descendants, and the spouses of all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineageFocus {
    pub selected: PersonId,
    pub person_ids: IndexSet<PersonId>,
    /// Every relationship of the graph whose both endpoints are in `person_ids`.
    pub relationships: Vec<Relationship>,
}

impl LineageFocus {
    pub fn contains(&self, person_id: &str) -> bool {
        self.person_ids.contains(person_id)
    }
}

impl FamilyGraph {
    /// Breadth-first closure from `root` along `step`, `root` first.
    fn closure<'a, F>(&'a self, root: &str, step: F) -> IndexSet<PersonId>
    where
        F: Fn(&'a FamilyGraph, &str) -> &'a IndexSet<PersonId>,
    {
        let mut visited: IndexSet<PersonId> = IndexSet::new();
        let mut queue: VecDeque<PersonId> = VecDeque::new();
        visited.insert(root.to_string());
        queue.push_back(root.to_string());

        while let Some(current) = queue.pop_front() {
            for next in step(self, &current) {
                if visited.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }

        visited
    }

    /// `root` and everyone reachable from it through child links, in BFS order.
    pub fn descendant_ids(&self, root: &str) -> IndexSet<PersonId> {
        self.closure(root, FamilyGraph::children_of)
    }

    /// `root` and everyone reachable from it through parent links, in BFS order.
    pub fn ancestor_ids(&self, root: &str) -> IndexSet<PersonId> {
        self.closure(root, FamilyGraph::parents_of)
    }

    /// Expands the parents of `person_id` recursively, `max_depth` generations deep.
    ///
    /// Returns `None` if `person_id` is not a known person.  Nodes at `generation == max_depth`
    /// get an empty `parents` list; the cut-off is silent.
    pub fn build_ancestor_tree(&self, person_id: &str, max_depth: usize) -> Option<PedigreeNode> {
        self.expand_ancestors(person_id, 0, max_depth)
    }

    fn expand_ancestors(
        &self,
        person_id: &str,
        generation: usize,
        max_depth: usize,
    ) -> Option<PedigreeNode> {
        let person = self.person(person_id)?.clone();
        let parents = if generation >= max_depth {
            Vec::new()
        } else {
            self.parents_of(person_id)
                .iter()
                .filter_map(|parent| self.expand_ancestors(parent, generation + 1, max_depth))
                .collect()
        };

        Some(PedigreeNode {
            person,
            generation,
            parents,
        })
    }

    /// Expands the children of `person_id` recursively, `max_depth` generations deep.
    pub fn build_descendant_tree(
        &self,
        person_id: &str,
        max_depth: usize,
    ) -> Option<DescendantNode> {
        self.expand_descendants(person_id, 0, max_depth)
    }

    fn expand_descendants(
        &self,
        person_id: &str,
        generation: usize,
        max_depth: usize,
    ) -> Option<DescendantNode> {
        let person = self.person(person_id)?.clone();
        let children = if generation >= max_depth {
            Vec::new()
        } else {
            self.children_of(person_id)
                .iter()
                .filter_map(|child| self.expand_descendants(child, generation + 1, max_depth))
                .collect()
        };

        Some(DescendantNode {
            person,
            generation,
            children,
        })
    }

    /// Computes the subgraph shown in focus mode.
    ///
    /// The person set is the ancestor closure plus the descendant closure of `selected`, plus the
    /// spouses of every member of that union.  Spouses are added one hop only; their own parents
    /// and children stay out.  `selected` is always a member, even if it is unknown to the graph.
    pub fn lineage_focus(&self, selected: &str) -> LineageFocus {
        let mut lineage = self.ancestor_ids(selected);
        lineage.extend(self.descendant_ids(selected));

        let mut person_ids = lineage.clone();
        for member in &lineage {
            person_ids.extend(self.spouses_of(member).iter().cloned());
        }

        let relationships = self
            .relationships()
            .iter()
            .filter(|relationship| {
                person_ids.contains(&relationship.person_1_id)
                    && person_ids.contains(&relationship.person_2_id)
            })
            .cloned()
            .collect();

        LineageFocus {
            selected: selected.to_string(),
            person_ids,
            relationships,
        }
    }
}

// End of File
