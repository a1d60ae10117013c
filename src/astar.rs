//! Best-first search over an implicit graph.
//!
//! A variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! in which the heuristic sees the node a successor is reached from, and frontier entries with an
//! equal f-score are dequeued in insertion order.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, trace};
use num_traits::Float;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent index of the start node.
const NO_PARENT: usize = usize::MAX;

/// Counters describing the work done by one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier entries that were dequeued and expanded.
    pub expansions: usize,
    /// Frontier entries pushed, including the start.
    pub insertions: usize,
    /// Expanded entries whose cost had already been improved on.
    pub stale_expansions: usize,
    /// Stale entries dropped without expansion.
    pub skipped: usize,
    /// Largest number of entries held by the frontier at once.
    pub max_frontier: usize,
}

/// Notifications emitted while the search runs.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent<'a, N, C> {
    /// `node` was dequeued with accumulated cost `cost` and is about to be expanded.
    Expanded { node: &'a N, cost: C, estimated_cost: C },
    /// A cheaper way to reach `node` through `origin` was recorded.
    Relaxed {
        node: &'a N,
        origin: &'a N,
        previous: Option<C>,
        cost: C,
        estimated_cost: C,
    },
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
    sequence: usize,
}

impl<K: PartialOrd> Eq for SmallestCostHolder<K> {}

impl<K: PartialOrd> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, then earliest insertion. Sequence numbers are unique,
        // so the order is total as long as costs are not NaN.
        match other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Runs best-first search from `start` until `success` holds for a dequeued node or the
/// frontier runs dry.
///
/// `successors` yields neighbours with the cost of the step, `heuristic(candidate, origin)`
/// estimates the remaining cost of a candidate reached from `origin`. The f-score of an entry is
/// `g + heuristic_factor * h`. A node is pushed again whenever a strictly cheaper cost is found,
/// and unless `skip_stale` is set, superseded entries are still expanded when dequeued. Expansion
/// always relaxes from the best cost known for the node at dequeue time.
///
/// Returns the path from start to the successful node together with its best-known cost.
pub fn best_first_search<N, C, FN, IN, FH, FS, FO>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    heuristic_factor: C,
    skip_stale: bool,
    mut observer: FO,
) -> (Option<(Vec<N>, C)>, SearchStats)
where
    N: Eq + Hash + Clone,
    C: Float,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N, &N) -> C,
    FS: FnMut(&N) -> bool,
    FO: FnMut(SearchEvent<'_, N, C>),
{
    let mut stats = SearchStats::default();
    let mut sequence = 0;
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: C::zero(),
        cost: C::zero(),
        index: 0,
        sequence,
    });
    stats.insertions += 1;
    stats.max_frontier = 1;
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (NO_PARENT, C::zero()));
    while let Some(SmallestCostHolder {
        estimated_cost,
        cost,
        index,
        ..
    }) = to_see.pop()
    {
        let (node, best, successors) = {
            let Some((node, &(_, best))) = parents.get_index(index) else {
                continue;
            };
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                debug!(
                    "Goal reached after {} expansions, path of {} nodes",
                    stats.expansions,
                    path.len()
                );
                return (Some((path, best)), stats);
            }
            // A node may sit in the heap several times if cheaper ways to reach it were found.
            if cost > best {
                if skip_stale {
                    stats.skipped += 1;
                    continue;
                }
                stats.stale_expansions += 1;
            }
            stats.expansions += 1;
            observer(SearchEvent::Expanded {
                node,
                cost,
                estimated_cost,
            });
            (node.clone(), best, successors(node))
        };
        for (successor, move_cost) in successors {
            let new_cost = best + move_cost;
            let previous;
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    previous = None;
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    let old_cost = e.get().1;
                    if new_cost < old_cost {
                        previous = Some(old_cost);
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }
            let Some((successor, _)) = parents.get_index(n) else {
                continue;
            };
            let h = heuristic(successor, &node);
            let estimated_cost = new_cost + heuristic_factor * h;
            trace!("Relaxed node {} to cost {:?}", n, new_cost.to_f64());
            observer(SearchEvent::Relaxed {
                node: successor,
                origin: &node,
                previous,
                cost: new_cost,
                estimated_cost,
            });
            sequence += 1;
            to_see.push(SmallestCostHolder {
                estimated_cost,
                cost: new_cost,
                index: n,
                sequence,
            });
            stats.insertions += 1;
            stats.max_frontier = stats.max_frontier.max(to_see.len());
        }
    }
    debug!(
        "Frontier exhausted after {} expansions without reaching the goal",
        stats.expansions
    );
    (None, stats)
}
