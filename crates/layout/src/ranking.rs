// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Rank assignment.
//!
//! Each node gets a rank based on its position in the parent/child graph:
//! - rank(node) = floor(node) if it has no parents
//! - rank(node) = max(floor(node), max(rank(parents)) + 1) otherwise
//!
//! The floor starts at 0.  A partner without parents is then pulled down onto their spouse's
//! rank, so a person who married into the family lines up with their spouse instead of floating
//! at rank 0.  A partner who is also an ancestor of their spouse stays where the hierarchy puts
//! them.

use std::collections::HashSet;

/// Compute the rank of each node.
///
/// # Arguments
/// * `node_count` - Nodes are identified by their index in `0..node_count`
/// * `hierarchical` - Directed `(parent, child)` pairs
/// * `peer` - Undirected partner pairs
///
/// # Returns
/// One rank per node.  Cycles in `hierarchical` are broken where they are first met, so the
/// function always terminates.
pub fn compute_ranks(
    node_count: usize,
    hierarchical: &[(usize, usize)],
    peer: &[(usize, usize)],
) -> Vec<usize> {
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(source, target) in hierarchical {
        if source < node_count && target < node_count && source != target {
            parents[target].push(source);
        }
    }

    let pairs: Vec<(usize, usize)> = peer
        .iter()
        .copied()
        .filter(|&(a, b)| a < node_count && b < node_count && a != b)
        .filter(|&(a, b)| !is_ancestor(&parents, a, b) && !is_ancestor(&parents, b, a))
        .collect();

    let mut floors = vec![0usize; node_count];
    let mut ranks = longest_path_ranks(&parents, &floors);

    // Only parentless partners are floored, and never onto one of their own descendants, so the
    // ranks settle; the cap guards against inconsistent input.
    for _ in 0..=node_count {
        let mut changed = false;
        for &(a, b) in &pairs {
            for (node, spouse) in [(a, b), (b, a)] {
                let target = ranks[spouse];
                if parents[node].is_empty() && ranks[node] < target && floors[node] < target {
                    floors[node] = target;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
        ranks = longest_path_ranks(&parents, &floors);
    }

    ranks
}

/// Whether `ancestor` is reachable from `node` by following parent links.
fn is_ancestor(parents: &[Vec<usize>], ancestor: usize, node: usize) -> bool {
    let mut visited: HashSet<usize> = HashSet::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        for &parent in &parents[current] {
            if parent == ancestor {
                return true;
            }
            if visited.insert(parent) {
                stack.push(parent);
            }
        }
    }
    false
}

fn longest_path_ranks(parents: &[Vec<usize>], floors: &[usize]) -> Vec<usize> {
    let mut ranks: Vec<Option<usize>> = vec![None; parents.len()];
    let mut visiting: HashSet<usize> = HashSet::new();

    fn visit(
        node: usize,
        parents: &[Vec<usize>],
        floors: &[usize],
        ranks: &mut Vec<Option<usize>>,
        visiting: &mut HashSet<usize>,
    ) -> usize {
        if let Some(rank) = ranks[node] {
            return rank;
        }

        // Back edge: treat the node as a source for this path
        if visiting.contains(&node) {
            return floors[node];
        }
        visiting.insert(node);

        let mut rank = floors[node];
        for &parent in &parents[node] {
            let parent_rank = visit(parent, parents, floors, ranks, visiting);
            rank = rank.max(parent_rank + 1);
        }

        visiting.remove(&node);
        ranks[node] = Some(rank);
        rank
    }

    for node in 0..parents.len() {
        visit(node, parents, floors, &mut ranks, &mut visiting);
    }

    ranks.into_iter().map(|rank| rank.unwrap_or(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_gets_consecutive_ranks() {
        assert_eq!(compute_ranks(3, &[(0, 1), (1, 2)], &[]), vec![0, 1, 2]);
    }

    #[test]
    fn longest_path_wins() {
        // 0 -> 1 -> 2 and 0 -> 2
        assert_eq!(compute_ranks(3, &[(0, 1), (1, 2), (0, 2)], &[]), vec![0, 1, 2]);
    }

    #[test]
    fn partner_joins_spouse_rank() {
        // 0 -> 1, and 2 married to 1 without known parents.
        assert_eq!(compute_ranks(3, &[(0, 1)], &[(1, 2)]), vec![0, 1, 1]);
    }

    #[test]
    fn partner_floor_propagates_to_children() {
        // 0 -> 1, 1 ~ 2, 2 -> 3
        assert_eq!(compute_ranks(4, &[(0, 1), (2, 3)], &[(1, 2)]), vec![0, 1, 1, 2]);
    }

    #[test]
    fn cycles_terminate() {
        let ranks = compute_ranks(2, &[(0, 1), (1, 0)], &[]);
        assert_eq!(ranks.len(), 2);
        assert_ne!(ranks[0], ranks[1]);
    }

    #[test]
    fn partner_who_is_also_ancestor_keeps_hierarchy_ranks() {
        assert_eq!(compute_ranks(2, &[(0, 1)], &[(0, 1)]), vec![0, 1]);
        // Indirect: 0 -> 2 -> 1 with 0 ~ 1
        assert_eq!(compute_ranks(3, &[(0, 2), (2, 1)], &[(0, 1)]), vec![0, 2, 1]);
    }

    #[test]
    fn partner_with_parents_is_not_floored() {
        // 0 -> 1 -> 2, 3 -> 4, and 4 married to 2: 4 keeps the rank its parent gives it.
        assert_eq!(
            compute_ranks(5, &[(0, 1), (1, 2), (3, 4)], &[(2, 4)]),
            vec![0, 1, 2, 0, 1]
        );
    }

    #[test]
    fn out_of_range_edges_are_ignored() {
        assert_eq!(compute_ranks(2, &[(0, 7), (0, 1)], &[(3, 1)]), vec![0, 1]);
    }
}

// End of File
