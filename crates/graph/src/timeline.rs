// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Dated life events for the timeline view.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Person, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeEventKind {
    Birth,
    Death,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeEvent {
    pub date: NaiveDate,
    pub kind: LifeEventKind,
    pub person_id: PersonId,
    pub label: String,
}

/// Births and deaths of `persons`, oldest first.
///
/// Events on the same day keep the order of the input people, and a birth comes before a death
/// for the same person.  People without any dates contribute nothing.
pub fn life_events<'a, I>(persons: I) -> Vec<LifeEvent>
where
    I: IntoIterator<Item = &'a Person>,
{
    let mut events = Vec::new();
    for person in persons {
        let label = person.display_name();
        if let Some(date) = person.dob {
            events.push(LifeEvent {
                date,
                kind: LifeEventKind::Birth,
                person_id: person.id.clone(),
                label: label.clone(),
            });
        }
        if let Some(date) = person.dod {
            events.push(LifeEvent {
                date,
                kind: LifeEventKind::Death,
                person_id: person.id.clone(),
                label,
            });
        }
    }

    // Stable, so ties keep insertion order.
    events.sort_by_key(|event| event.date);
    events
}


// End of File
