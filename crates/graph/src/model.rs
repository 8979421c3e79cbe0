// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Person and relationship records as served by the tree endpoint.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier of a person, stable for the lifetime of its tree.
pub type PersonId = String;

/// Opaque identifier of a relationship.
pub type RelationshipId = String;

/// Opaque identifier of a family tree.
pub type TreeId = String;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "Male", alias = "M")]
    Male,
    #[serde(alias = "Female", alias = "F")]
    Female,
    #[serde(alias = "Other")]
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A single person in a family tree.
///
/// Only `id` is structural.  Every other field is descriptive and may be missing or `null` in
/// the payload; missing names become empty strings and unparseable dates become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tree_id: TreeId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: Gender,
    #[serde(default, deserialize_with = "lenient_date")]
    pub dob: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub dod: Option<NaiveDate>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub pob: Option<String>,
}

impl Person {
    /// Creates a person with only an id and a first name, everything else unset.
    pub fn new(id: impl Into<PersonId>, first_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tree_id: TreeId::new(),
            first_name: first_name.into(),
            last_name: None,
            gender: Gender::Unknown,
            dob: None,
            dod: None,
            profile_photo_url: None,
            bio: None,
            occupation: None,
            pob: None,
        }
    }

    /// First and last name joined by a single space, trimmed.  Empty when both are missing.
    pub fn display_name(&self) -> String {
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {}", self.first_name.trim(), last.trim())
            .trim()
            .to_string()
    }

    /// A recorded date of death marks the person as deceased.
    pub fn is_deceased(&self) -> bool {
        self.dod.is_some()
    }

    /// Short life-span line used as the node subline: `"1900 – 1980"`, `"b. 1950"`, `"d. 1980"`,
    /// or an empty string when no dates are known.
    pub fn life_span(&self) -> String {
        match (self.dob, self.dod) {
            (Some(born), Some(died)) => format!("{} – {}", born.year(), died.year()),
            (Some(born), None) => format!("b. {}", born.year()),
            (None, Some(died)) => format!("d. {}", died.year()),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    ParentChild,
    AdoptiveParentChild,
    StepParentChild,
    Spouse,
}

impl RelationshipType {
    /// All three parent/child variants traverse identically (parent in `person_1_id`, child in
    /// `person_2_id`) and differ only in how they are drawn.
    pub fn is_parental(self) -> bool {
        !self.is_spousal()
    }

    pub fn is_spousal(self) -> bool {
        matches!(self, RelationshipType::Spouse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipType::ParentChild => "parent_child",
            RelationshipType::AdoptiveParentChild => "adoptive_parent_child",
            RelationshipType::StepParentChild => "step_parent_child",
            RelationshipType::Spouse => "spouse",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed link between two people of the same tree.
///
/// For parent/child variants the slot order carries direction (`person_1_id` is the parent).  For
/// [`RelationshipType::Spouse`] the order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tree_id: TreeId,
    pub person_1_id: PersonId,
    pub person_2_id: PersonId,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
}

impl Relationship {
    pub fn new(
        id: impl Into<RelationshipId>,
        person_1_id: impl Into<PersonId>,
        person_2_id: impl Into<PersonId>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            id: id.into(),
            tree_id: TreeId::new(),
            person_1_id: person_1_id.into(),
            person_2_id: person_2_id.into(),
            relationship_type,
        }
    }

    /// Whether `person_id` sits in either slot.
    pub fn involves(&self, person_id: &str) -> bool {
        self.person_1_id == person_id || self.person_2_id == person_id
    }

    /// The id in the opposite slot to `person_id`, if `person_id` takes part at all.
    pub fn other_person(&self, person_id: &str) -> Option<&str> {
        if self.person_1_id == person_id {
            Some(&self.person_2_id)
        } else if self.person_2_id == person_id {
            Some(&self.person_1_id)
        } else {
            None
        }
    }
}

/// Access level of the current user on a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeRole {
    Owner,
    Editor,
    #[default]
    #[serde(other)]
    Viewer,
}

impl TreeRole {
    /// Owners and editors may mutate; viewers only traverse and lay out.
    pub fn can_edit(self) -> bool {
        matches!(self, TreeRole::Owner | TreeRole::Editor)
    }
}

impl fmt::Display for TreeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TreeRole::Owner => "owner",
            TreeRole::Editor => "editor",
            TreeRole::Viewer => "viewer",
        })
    }
}

/// Payload of `GET /api/tree/{treeId}`, the single source of truth for one load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: TreeRole,
    #[serde(default, deserialize_with = "null_as_default")]
    pub persons: Vec<Person>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationships: Vec<Relationship>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD` as well as full timestamps (only the date part is kept).  Anything that
/// does not parse is treated as unknown rather than failing the whole payload.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|text| {
        let date_part = text.get(..10).unwrap_or(&text);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }))
}


// End of File
