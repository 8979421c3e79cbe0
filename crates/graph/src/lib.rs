// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Kindred's Family Graph
//!
//! This crate holds the plain-data model of a family tree ([`Person`], [`Relationship`] and the
//! [`TreeData`] payload returned by the tree endpoint) together with the pure algorithms that run
//! over it:
//!
//! - [`FamilyGraph`] derives parent, child, spouse and sibling views from the flat relationship
//!   list without touching the input.
//! - [`traversal`] computes ancestor/descendant closures, depth-bounded pedigree and descendant
//!   trees, and the lineage-focus subgraph around a selected person.
//! - [`fan`] and [`timeline`] turn those results into fan-chart segments and dated life events.
//!
//! Nothing in here fails on odd input.  Relationships whose endpoints are missing are skipped,
//! cyclic parentage terminates through visited sets, and empty names render as empty strings.

pub mod family;
pub mod fan;
pub mod model;
pub mod timeline;
pub mod traversal;

pub use family::FamilyGraph;
pub use model::{
    Gender, Person, PersonId, Relationship, RelationshipId, RelationshipType, TreeData, TreeId,
    TreeRole,
};
pub use traversal::{DescendantNode, LineageFocus, PedigreeNode, DEFAULT_MAX_DEPTH};

/// A module which is typically glob imported.
pub mod prelude {
    pub use super::{
        FamilyGraph, Gender, LineageFocus, PedigreeNode, Person, PersonId, Relationship,
        RelationshipType, TreeData, TreeRole,
    };
}

// End of File
