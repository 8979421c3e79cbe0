// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Typed adjacency views over a flat relationship list.
//!
//! A [`FamilyGraph`] indexes the relationship list once into three directed lookups: parents,
//! children and spouses.  Every lookup returns an insertion-ordered set, so "the first parent" of
//! someone is the parent named by the earliest relationship in the list.  That order is what the
//! keyboard navigation and the traversal results are deterministic against.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::model::{Person, PersonId, Relationship, TreeData};

#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    persons: IndexMap<PersonId, Person>,
    relationships: Vec<Relationship>,
    parents: HashMap<PersonId, IndexSet<PersonId>>,
    children: HashMap<PersonId, IndexSet<PersonId>>,
    spouses: HashMap<PersonId, IndexSet<PersonId>>,
    /// Returned for ids that have no entry in one of the lookups above.
    empty: IndexSet<PersonId>,
}

impl FamilyGraph {
    /// Indexes `relationships` as given, without knowing which people exist.
    ///
    /// Every relationship is accepted, so for any relationship `r` of a parent/child type
    /// `r.person_2_id` is in `children_of(r.person_1_id)` and `r.person_1_id` is in
    /// `parents_of(r.person_2_id)`.
    pub fn from_relationships(relationships: &[Relationship]) -> Self {
        let mut graph = Self::default();
        for relationship in relationships {
            graph.insert_relationship(relationship.clone());
        }
        graph
    }

    /// Indexes the people and every relationship whose two endpoints are among them.
    ///
    /// Relationships that point at unknown people are dropped; they can neither be traversed nor
    /// drawn.
    pub fn new(persons: &[Person], relationships: &[Relationship]) -> Self {
        let mut graph = Self::default();
        for person in persons {
            graph
                .persons
                .entry(person.id.clone())
                .or_insert_with(|| person.clone());
        }

        for relationship in relationships {
            if graph.contains(&relationship.person_1_id)
                && graph.contains(&relationship.person_2_id)
            {
                graph.insert_relationship(relationship.clone());
            } else {
                log::debug!(
                    "skipping dangling {} relationship {} ({} -> {})",
                    relationship.relationship_type,
                    relationship.id,
                    relationship.person_1_id,
                    relationship.person_2_id
                );
            }
        }

        graph
    }

    pub fn from_tree(tree: &TreeData) -> Self {
        Self::new(&tree.persons, &tree.relationships)
    }

    fn insert_relationship(&mut self, relationship: Relationship) {
        let first = relationship.person_1_id.clone();
        let second = relationship.person_2_id.clone();

        if relationship.relationship_type.is_parental() {
            self.children
                .entry(first.clone())
                .or_default()
                .insert(second.clone());
            self.parents.entry(second).or_default().insert(first);
        } else {
            self.spouses
                .entry(first.clone())
                .or_default()
                .insert(second.clone());
            self.spouses.entry(second).or_default().insert(first);
        }

        self.relationships.push(relationship);
    }

    fn lookup<'a>(
        &'a self,
        index: &'a HashMap<PersonId, IndexSet<PersonId>>,
        person_id: &str,
    ) -> &'a IndexSet<PersonId> {
        index.get(person_id).unwrap_or(&self.empty)
    }

    pub fn person(&self, person_id: &str) -> Option<&Person> {
        self.persons.get(person_id)
    }

    pub fn contains(&self, person_id: &str) -> bool {
        self.persons.contains_key(person_id)
    }

    /// People in the order they were supplied.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// The relationships that were accepted into the graph, in input order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Every relationship with `person_id` in either slot.
    pub fn relationships_of<'a>(
        &'a self,
        person_id: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships
            .iter()
            .filter(move |relationship| relationship.involves(person_id))
    }

    pub fn parents_of(&self, person_id: &str) -> &IndexSet<PersonId> {
        self.lookup(&self.parents, person_id)
    }

    pub fn children_of(&self, person_id: &str) -> &IndexSet<PersonId> {
        self.lookup(&self.children, person_id)
    }

    /// Spouses regardless of which slot either partner occupies.
    pub fn spouses_of(&self, person_id: &str) -> &IndexSet<PersonId> {
        self.lookup(&self.spouses, person_id)
    }

    /// Everyone who shares at least one parent with `person_id`, excluding `person_id`.
    ///
    /// Half-siblings count: a single shared parent is enough.  Siblings are ordered by parent,
    /// then by each parent's child order.
    pub fn siblings_of(&self, person_id: &str) -> IndexSet<PersonId> {
        self.parents_of(person_id)
            .iter()
            .flat_map(|parent| self.children_of(parent).iter())
            .filter(|sibling| sibling.as_str() != person_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationshipType;

    #[test]
    fn lookups_for_unknown_ids_are_empty() {
        let graph = FamilyGraph::default();
        assert!(graph.parents_of("nobody").is_empty());
        assert!(graph.children_of("nobody").is_empty());
        assert!(graph.spouses_of("nobody").is_empty());
        assert!(graph.siblings_of("nobody").is_empty());
    }

    #[test]
    fn duplicate_person_ids_keep_the_first_record() {
        let persons = vec![Person::new("a", "First"), Person::new("a", "Second")];
        let graph = FamilyGraph::new(&persons, &[]);
        assert_eq!(graph.person_count(), 1);
        assert_eq!(graph.person("a").map(|p| p.first_name.as_str()), Some("First"));
    }

    #[test]
    fn repeated_relationship_does_not_duplicate_adjacency() {
        let relationships = vec![
            Relationship::new("r1", "a", "b", RelationshipType::ParentChild),
            Relationship::new("r2", "a", "b", RelationshipType::AdoptiveParentChild),
        ];
        let graph = FamilyGraph::from_relationships(&relationships);
        assert_eq!(graph.children_of("a").len(), 1);
        assert_eq!(graph.relationships().len(), 2);
    }
}

// End of File
