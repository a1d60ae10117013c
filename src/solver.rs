use grid_util::point::Point;
use log::{debug, warn};
use smallvec::SmallVec;

use crate::astar::{best_first_search, SearchEvent, SearchStats};
use crate::config::SearchConfig;
use crate::heuristic::{DirectionBias, Heuristic};
use crate::pathing_grid::GridModel;
use crate::{path_cost, C, D, NEIGHBOUR_OFFSETS, N_SMALLVEC_SIZE};

/// Result of a single search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Cells from start to goal inclusive. Empty when no path exists; a single cell when start
    /// and goal coincide.
    pub path: Vec<Point>,
    /// Cost of `path` with Euclidean step costs, [None] if no path was found.
    pub cost: Option<f64>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Traversable neighbours of `pos` together with the Euclidean length of the step.
pub fn neighborhood_points_and_cost<G>(
    grid: &G,
    pos: &Point,
    allow_diagonal_move: bool,
) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]>
where
    G: GridModel + ?Sized,
{
    let offsets = if allow_diagonal_move {
        &NEIGHBOUR_OFFSETS[..]
    } else {
        &NEIGHBOUR_OFFSETS[..4]
    };
    offsets
        .iter()
        .map(|&(dx, dy)| {
            let cost = if dx != 0 && dy != 0 { D } else { C };
            (Point::new(pos.x + dx, pos.y + dy), cost)
        })
        .filter(|(p, _)| grid.is_traversable(p.x, p.y))
        .collect()
}

/// Computes a path from `start` to `goal`, see [search_with_observer].
pub fn search<G, H>(
    grid: &G,
    start: Point,
    goal: Point,
    heuristic: &H,
    bias: DirectionBias,
    config: &SearchConfig,
) -> SearchOutcome
where
    G: GridModel + ?Sized,
    H: Heuristic + ?Sized,
{
    search_with_observer(grid, start, goal, heuristic, bias, config, |_| {})
}

/// Computes a path from `start` to `goal` on `grid` using best-first search guided by `heuristic`.
///
/// Each candidate cell is scored as `g + heuristic(candidate, goal, predecessor, bias)`. Start and
/// goal are not required to be traversable: the start is always seeded and the goal is matched on
/// dequeue, so a blocked or out-of-bounds goal simply exhausts the frontier. `observer` receives
/// every expansion and cost improvement as it happens.
pub fn search_with_observer<G, H, O>(
    grid: &G,
    start: Point,
    goal: Point,
    heuristic: &H,
    bias: DirectionBias,
    config: &SearchConfig,
    observer: O,
) -> SearchOutcome
where
    G: GridModel + ?Sized,
    H: Heuristic + ?Sized,
    O: FnMut(SearchEvent<'_, Point, f64>),
{
    let heuristic_factor = match config.validate() {
        Ok(()) => config.heuristic_factor,
        Err(e) => {
            warn!("{}, using an unscaled heuristic", e);
            1.0
        }
    };
    debug!(
        "Searching from {} to {} with the {} heuristic",
        start,
        goal,
        heuristic.name()
    );
    let (result, stats) = best_first_search(
        &start,
        |node| neighborhood_points_and_cost(grid, node, config.allow_diagonal_move),
        |candidate, origin| heuristic.estimate(candidate, &goal, origin, &bias),
        |node| *node == goal,
        heuristic_factor,
        config.skip_stale_entries,
        observer,
    );
    match result {
        Some((path, _)) => SearchOutcome {
            cost: Some(path_cost(&path)),
            path,
            stats,
        },
        None => SearchOutcome {
            path: Vec::new(),
            cost: None,
            stats,
        },
    }
}

/// Computes a path with the default [SearchConfig]. Returns an empty path if the goal cannot be
/// reached.
pub fn find_path<G, H>(
    grid: &G,
    start: Point,
    goal: Point,
    heuristic: &H,
    bias: DirectionBias,
) -> Vec<Point>
where
    G: GridModel + ?Sized,
    H: Heuristic + ?Sized,
{
    search(grid, start, goal, heuristic, bias, &SearchConfig::default()).path
}
