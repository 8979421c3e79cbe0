// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Fan-chart geometry for a pedigree tree.
//!
//! The root person occupies the whole sweep at the centre.  Each node's arc is divided equally
//! between its parents, so a full binary pedigree halves the arc per generation while an
//! incomplete one leaves the missing half empty.  Angles are in degrees, measured clockwise from
//! straight up, with the sweep centred on zero.

use serde::Serialize;

use crate::model::PersonId;
use crate::traversal::PedigreeNode;

/// Total angle covered by the outermost ring unless the caller asks otherwise.
pub const DEFAULT_FAN_SWEEP: f64 = 240.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FanSegment {
    pub person_id: PersonId,
    pub generation: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl FanSegment {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// One segment per node of `root`, in depth-first order (root first, then each parent branch in
/// turn).  A person reached along two paths yields two segments.
pub fn fan_segments(root: &PedigreeNode, sweep_degrees: f64) -> Vec<FanSegment> {
    let sweep = sweep_degrees.clamp(0.0, 360.0);
    let mut segments = Vec::with_capacity(root.node_count());
    push_segments(root, -sweep / 2.0, sweep / 2.0, &mut segments);
    segments
}

fn push_segments(node: &PedigreeNode, start: f64, end: f64, segments: &mut Vec<FanSegment>) {
    segments.push(FanSegment {
        person_id: node.person.id.clone(),
        generation: node.generation,
        start_angle: start,
        end_angle: end,
    });

    if node.parents.is_empty() {
        return;
    }

    let share = (end - start) / node.parents.len() as f64;
    for (index, parent) in node.parents.iter().enumerate() {
        let parent_start = start + share * index as f64;
        push_segments(parent, parent_start, parent_start + share, segments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;

    fn leaf(id: &str, generation: usize) -> PedigreeNode {
        PedigreeNode {
            person: Person::new(id, id),
            generation,
            parents: Vec::new(),
        }
    }

    #[test]
    fn single_person_takes_the_whole_sweep() {
        let segments = fan_segments(&leaf("root", 0), 180.0);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_angle, -90.0);
        assert_eq!(segments[0].end_angle, 90.0);
    }

    #[test]
    fn parents_split_the_child_arc() {
        let mut root = leaf("root", 0);
        let mut father = leaf("father", 1);
        father.parents.push(leaf("grandfather", 2));
        root.parents.push(father);
        root.parents.push(leaf("mother", 1));

        let segments = fan_segments(&root, 240.0);
        let ids: Vec<&str> = segments.iter().map(|s| s.person_id.as_str()).collect();
        assert_eq!(ids, vec!["root", "father", "grandfather", "mother"]);

        assert_eq!(segments[1].start_angle, -120.0);
        assert_eq!(segments[1].end_angle, 0.0);
        // An only parent inherits the whole arc of its child.
        assert_eq!(segments[2].sweep(), segments[1].sweep());
        assert_eq!(segments[3].start_angle, 0.0);
        assert_eq!(segments[3].end_angle, 120.0);
    }

    #[test]
    fn sweep_is_clamped() {
        let segments = fan_segments(&leaf("root", 0), 720.0);
        assert_eq!(segments[0].sweep(), 360.0);
    }
}

// End of File
