use fxhash::FxBuildHasher;
/// This module implements the multi-source variant of
/// [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// used by the partitioner: every source is seeded into the frontier at cost
/// zero and cells are settled with the identifier of the source that reached
/// them first.
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::{SaturatingAdd, Zero};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

/// Identifier of a seed, assigned by row-major first-appearance order.
pub type SeedId = u32;

struct SmallestCostHolder<K> {
    cost: K,
    seed: SeedId,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost) && self.seed.eq(&other.seed)
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per accumulated cost, then creates a subordering on the
        // seed identifier so that on equal cost the earliest-discovered seed
        // is popped (and therefore settled) first
        match other.cost.cmp(&self.cost) {
            Ordering::Equal => other.seed.cmp(&self.seed),
            s => s,
        }
    }
}

/// Expands all sources simultaneously and returns the settled
/// `node -> (seed, cost)` map. `successors` yields the neighbours of a node
/// together with the cost of entering them; costs must be non-negative.
/// Accumulation saturates at the cost type's upper bound, so an extreme entry
/// cost produces a candidate that loses every comparison instead of wrapping.
///
/// A node entry is only ever replaced by a lexicographically smaller
/// `(cost, seed)` pair, which makes the tie-break on equal cost deterministic
/// regardless of push order.
pub fn multi_source_expansion<N, C, FN, IN>(
    sources: impl IntoIterator<Item = (N, SeedId)>,
    mut successors: FN,
) -> FxIndexMap<N, (SeedId, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy + SaturatingAdd,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
{
    let mut to_see: BinaryHeap<SmallestCostHolder<C>> = BinaryHeap::new();
    let mut visited: FxIndexMap<N, (SeedId, C)> = FxIndexMap::default();
    for (node, seed) in sources {
        let (index, _) = visited.insert_full(node, (seed, Zero::zero()));
        to_see.push(SmallestCostHolder {
            cost: Zero::zero(),
            seed,
            index,
        });
    }
    while let Some(SmallestCostHolder { cost, seed, index }) = to_see.pop() {
        let successors = {
            let (node, &(best_seed, best_cost)) = visited.get_index(index).unwrap();
            // We may have inserted a node several times into the binary heap if
            // we found a better way to access it. Ensure that we are currently
            // dealing with the best entry and discard the others.
            if cost > best_cost || (cost == best_cost && seed > best_seed) {
                continue;
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost.saturating_add(&move_cost);
            let n; // index for successor
            match visited.entry(successor) {
                Vacant(e) => {
                    n = e.index();
                    e.insert((seed, new_cost));
                }
                Occupied(mut e) => {
                    let (cur_seed, cur_cost) = *e.get();
                    if new_cost < cur_cost || (new_cost == cur_cost && seed < cur_seed) {
                        n = e.index();
                        e.insert((seed, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                cost: new_cost,
                seed,
                index: n,
            });
        }
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    // Line graph 0 - 1 - 2 - 3 with unit edges and sources at both ends.
    fn line_successors(node: &usize) -> Vec<(usize, i32)> {
        let mut next = Vec::new();
        if *node > 0 {
            next.push((node - 1, 1));
        }
        if *node < 3 {
            next.push((node + 1, 1));
        }
        next
    }

    #[test]
    fn settles_all_reachable_nodes() {
        let visited = multi_source_expansion(vec![(0usize, 1), (3usize, 2)], line_successors);
        assert_eq!(visited.len(), 4);
        assert_eq!(visited[&0], (1, 0));
        assert_eq!(visited[&3], (2, 0));
        assert_eq!(visited[&1], (1, 1));
        assert_eq!(visited[&2], (2, 1));
    }

    #[test]
    fn equal_cost_goes_to_smaller_seed() {
        // Cost dominates the seed identifier: the closer, larger-id source
        // still wins node 1.
        let visited = multi_source_expansion(vec![(0usize, 2), (3usize, 1)], line_successors);
        assert_eq!(visited[&1], (2, 1));
        assert_eq!(visited[&2], (1, 1));

        // Both ends at equal distance from the middle: smaller id wins.
        let visited = multi_source_expansion(
            vec![(0usize, 1), (2usize, 2)],
            |node: &usize| -> Vec<(usize, i32)> {
                match *node {
                    0 => vec![(1, 1)],
                    1 => vec![(0, 1), (2, 1)],
                    2 => vec![(1, 1)],
                    _ => unreachable!(),
                }
            },
        );
        assert_eq!(visited[&1], (1, 1));
    }

    #[test]
    fn expensive_cells_shift_the_boundary() {
        // Line 0-1-2-3-4 where entering node 1 costs 4. With uniform costs
        // the middle node would tie and go to seed 1; the expensive cell
        // pushes the boundary toward seed 1 instead.
        let weights = [1, 4, 1, 1, 1];
        let successors = |node: &usize| -> Vec<(usize, i32)> {
            let mut next = Vec::new();
            if *node > 0 {
                next.push((node - 1, weights[node - 1]));
            }
            if *node < 4 {
                next.push((node + 1, weights[node + 1]));
            }
            next
        };
        let visited = multi_source_expansion(vec![(0usize, 1), (4usize, 2)], successors);
        assert_eq!(visited[&1], (1, 4));
        assert_eq!(visited[&2], (2, 2));
        assert_eq!(visited[&3], (2, 1));
    }

    #[test]
    fn extreme_costs_saturate() {
        // Re-relaxing the source after crossing an i32::MAX edge must
        // saturate and lose the comparison, not wrap around.
        let successors = |node: &usize| -> Vec<(usize, i32)> {
            match *node {
                0 => vec![(1, i32::MAX)],
                1 => vec![(0, i32::MAX), (2, i32::MAX)],
                2 => vec![(1, i32::MAX)],
                _ => unreachable!(),
            }
        };
        let visited = multi_source_expansion(vec![(0usize, 1)], successors);
        assert_eq!(visited[&0], (1, 0));
        assert_eq!(visited[&1], (1, i32::MAX));
        assert_eq!(visited[&2], (1, i32::MAX));
    }

    #[test]
    fn no_sources_is_empty() {
        let visited = multi_source_expansion(Vec::<(usize, SeedId)>::new(), line_successors);
        assert!(visited.is_empty());
    }
}
