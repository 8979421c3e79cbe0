// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Tests for the adjacency views of `FamilyGraph`.
//!
//! These tests verify:
//! - parent/child/spouse lookups and their slot semantics
//! - the children/parents symmetry contract for every parental relationship type
//! - sibling derivation including half-siblings
//! - dangling relationships being dropped when the person list is known

use kindred_graph::{FamilyGraph, Person, Relationship, RelationshipType};

fn persons(ids: &[&str]) -> Vec<Person> {
    ids.iter().map(|id| Person::new(*id, *id)).collect()
}

fn relationships(links: &[(&str, &str, RelationshipType)]) -> Vec<Relationship> {
    links
        .iter()
        .enumerate()
        .map(|(index, (first, second, kind))| {
            Relationship::new(format!("r{index}"), *first, *second, *kind)
        })
        .collect()
}

fn ids<'a>(set: impl IntoIterator<Item = &'a String>) -> Vec<&'a str> {
    set.into_iter().map(String::as_str).collect()
}

// =============================================================================
// Round-trip scenario
// =============================================================================

#[test]
fn test_two_parents_one_child_scenario() {
    let people = persons(&["a", "b", "c"]);
    let links = relationships(&[
        ("a", "c", RelationshipType::ParentChild),
        ("b", "c", RelationshipType::ParentChild),
        ("a", "b", RelationshipType::Spouse),
    ]);
    let graph = FamilyGraph::new(&people, &links);

    assert_eq!(ids(graph.parents_of("c")), vec!["a", "b"]);
    assert_eq!(ids(graph.children_of("a")), vec!["c"]);
    assert_eq!(ids(graph.spouses_of("a")), vec!["b"]);
    // Spouse links are symmetric whatever the slot order.
    assert_eq!(ids(graph.spouses_of("b")), vec!["a"]);
    assert!(graph.parents_of("a").is_empty());
}

// =============================================================================
// Symmetry contract
// =============================================================================

#[test]
fn test_children_and_parents_are_symmetric_for_every_relationship() {
    let links = relationships(&[
        ("p", "c1", RelationshipType::ParentChild),
        ("p", "c2", RelationshipType::AdoptiveParentChild),
        ("s", "c2", RelationshipType::StepParentChild),
        ("p", "s", RelationshipType::Spouse),
        ("c1", "x", RelationshipType::Spouse),
    ]);
    let graph = FamilyGraph::from_relationships(&links);

    for link in &links {
        let is_child = graph.children_of(&link.person_1_id).contains(&link.person_2_id);
        let is_parent = graph.parents_of(&link.person_2_id).contains(&link.person_1_id);
        assert_eq!(
            is_child,
            link.relationship_type.is_parental(),
            "children_of mismatch for {:?}",
            link
        );
        assert_eq!(
            is_parent,
            link.relationship_type.is_parental(),
            "parents_of mismatch for {:?}",
            link
        );
    }
}

#[test]
fn test_spouse_links_never_create_parentage() {
    let links = relationships(&[("a", "b", RelationshipType::Spouse)]);
    let graph = FamilyGraph::from_relationships(&links);
    assert!(graph.children_of("a").is_empty());
    assert!(graph.parents_of("b").is_empty());
}

// =============================================================================
// Siblings
// =============================================================================

#[test]
fn test_siblings_include_half_siblings() {
    // mum has kids x and y with dad, and z with stepdad.
    let people = persons(&["mum", "dad", "stepdad", "x", "y", "z", "cousin"]);
    let links = relationships(&[
        ("mum", "x", RelationshipType::ParentChild),
        ("dad", "x", RelationshipType::ParentChild),
        ("mum", "y", RelationshipType::ParentChild),
        ("dad", "y", RelationshipType::ParentChild),
        ("mum", "z", RelationshipType::ParentChild),
        ("stepdad", "z", RelationshipType::ParentChild),
    ]);
    let graph = FamilyGraph::new(&people, &links);

    assert_eq!(ids(&graph.siblings_of("x")), vec!["y", "z"]);
    assert_eq!(ids(&graph.siblings_of("z")), vec!["x", "y"]);
    assert!(graph.siblings_of("cousin").is_empty());
    assert!(graph.siblings_of("mum").is_empty());
}

// =============================================================================
// Dangling relationships
// =============================================================================

#[test]
fn test_dangling_relationships_are_dropped() {
    let people = persons(&["a", "b"]);
    let links = relationships(&[
        ("a", "b", RelationshipType::ParentChild),
        ("a", "ghost", RelationshipType::ParentChild),
        ("ghost", "b", RelationshipType::Spouse),
    ]);
    let graph = FamilyGraph::new(&people, &links);

    assert_eq!(graph.relationships().len(), 1);
    assert_eq!(ids(graph.children_of("a")), vec!["b"]);
    assert!(graph.spouses_of("b").is_empty());
    assert!(!graph.contains("ghost"));
}

#[test]
fn test_relationships_of_person() {
    let people = persons(&["a", "b", "c"]);
    let links = relationships(&[
        ("a", "b", RelationshipType::ParentChild),
        ("b", "c", RelationshipType::Spouse),
        ("a", "c", RelationshipType::Spouse),
    ]);
    let graph = FamilyGraph::new(&people, &links);

    let incident: Vec<&str> = graph.relationships_of("b").map(|r| r.id.as_str()).collect();
    assert_eq!(incident, vec!["r0", "r1"]);
}

// End of File
