//! # directional_pathfinding
//!
//! Lowest-cost paths between two cells of a 2D grid with obstacles, found by best-first search
//! ([A*](https://en.wikipedia.org/wiki/A*_search_algorithm)-style) over the 8-neighbourhood of
//! each cell. Orthogonal steps cost 1 and diagonal steps √2.
//!
//! The search is guided by an injectable [Heuristic] which, unlike the usual A* estimate, also
//! sees the cell a candidate is reached from and an optional [DirectionBias]. This makes it
//! possible to favour travel along a preferred direction ([DirectionalHeuristic]) or to penalise
//! steps across it while still heading for the goal ([OctileHeuristic]).
//!
//! Frontier entries with equal f-scores are expanded in insertion order, so repeated searches
//! over the same grid return the same path. An empty path means the goal is unreachable.
//!
//! ```
//! use directional_pathfinding::{find_path, DirectionBias, OctileHeuristic, PathingGrid};
//! use grid_util::point::Point;
//!
//! let grid = PathingGrid::new(5, 5);
//! let (start, goal) = (Point::new(0, 0), Point::new(4, 4));
//! let path = find_path(&grid, start, goal, &OctileHeuristic, DirectionBias::ZERO);
//! assert_eq!(path.len(), 5);
//! ```
pub mod astar;
pub mod config;
pub mod heuristic;
pub mod pathing_grid;
pub mod solver;

use grid_util::point::Point;
use log::info;

pub use astar::{SearchEvent, SearchStats};
pub use config::{ConfigError, SearchConfig};
pub use heuristic::{
    ChebyshevHeuristic, DirectionBias, DirectionalHeuristic, EuclideanHeuristic, Heuristic,
    HeuristicKind, OctileHeuristic, ZeroHeuristic,
};
pub use pathing_grid::{GridModel, PathingGrid};
pub use solver::{find_path, search, search_with_observer, SearchOutcome};

/// Cost of an orthogonal step.
pub const C: f64 = 1.0;
/// Cost of a diagonal step.
pub const D: f64 = core::f64::consts::SQRT_2;

/// Neighbour offsets in expansion order: the 4 orthogonal moves followed by the 4 diagonals.
/// The order decides which of several equally scored cells enters the frontier first.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const N_SMALLVEC_SIZE: usize = 8;

/// Sum of the Euclidean lengths of the steps of `path`.
pub fn path_cost(path: &[Point]) -> f64 {
    path.windows(2)
        .map(|w| heuristic::euclidean_distance(&w[0], &w[1]))
        .sum()
}

/// Number of steps in `path`; zero for an empty or single-cell path.
pub fn path_length(path: &[Point]) -> usize {
    path.len().saturating_sub(1)
}

/// [PathingGrid] bundled with a [SearchConfig]. Before searching it refreshes the connected
/// components of the grid so that goals on another component are rejected without a search.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    pub grid: PathingGrid,
    pub config: SearchConfig,
}

impl Pathfinder {
    pub fn new(width: usize, height: usize) -> Pathfinder {
        Pathfinder {
            grid: PathingGrid::new(width, height),
            config: SearchConfig::default(),
        }
    }

    pub fn with_grid(grid: PathingGrid, config: SearchConfig) -> Pathfinder {
        Pathfinder { grid, config }
    }

    /// Computes a path from start to goal. Returns an empty path if there is none.
    pub fn get_path_single_goal<H>(
        &mut self,
        start: Point,
        goal: Point,
        heuristic: &H,
        bias: DirectionBias,
    ) -> Vec<Point>
    where
        H: Heuristic + ?Sized,
    {
        self.get_search_outcome(start, goal, heuristic, bias).path
    }

    /// Like [get_path_single_goal](Self::get_path_single_goal) but returns the full
    /// [SearchOutcome].
    pub fn get_search_outcome<H>(
        &mut self,
        start: Point,
        goal: Point,
        heuristic: &H,
        bias: DirectionBias,
    ) -> SearchOutcome
    where
        H: Heuristic + ?Sized,
    {
        self.grid.update(self.config.allow_diagonal_move);
        // A blocked start can still step onto a free neighbour, so only prune from free starts.
        if start != goal
            && self.grid.is_traversable_point(&start)
            && self.grid.unreachable(&start, &goal)
        {
            info!("{} is not reachable from {}", goal, start);
            return SearchOutcome {
                path: Vec::new(),
                cost: None,
                stats: SearchStats::default(),
            };
        }
        let outcome = search(&self.grid, start, goal, heuristic, bias, &self.config);
        if outcome.is_found() {
            info!(
                "{} heuristic path length: {}",
                heuristic.name(),
                path_length(&outcome.path)
            );
        } else {
            info!("No path found using {} heuristic", heuristic.name());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_measures() {
        let path = vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 1)];
        assert!((path_cost(&path) - (1.0 + D)).abs() < 1e-12);
        assert_eq!(path_length(&path), 2);
        assert_eq!(path_length(&[]), 0);
        assert_eq!(path_cost(&[Point::new(3, 3)]), 0.0);
    }

    #[test]
    fn pathfinder_rejects_other_component() {
        let mut pathfinder = Pathfinder::new(5, 5);
        for y in 0..5 {
            pathfinder.grid.set(2, y, true);
        }
        let outcome = pathfinder.get_search_outcome(
            Point::new(0, 0),
            Point::new(4, 4),
            &OctileHeuristic,
            DirectionBias::ZERO,
        );
        assert!(!outcome.is_found());
        assert_eq!(outcome.stats.expansions, 0);
    }

    #[test]
    fn pathfinder_tracks_grid_changes() {
        let mut pathfinder = Pathfinder::new(3, 3);
        let start = Point::new(0, 0);
        let goal = Point::new(2, 2);
        let open =
            pathfinder.get_path_single_goal(start, goal, &OctileHeuristic, DirectionBias::ZERO);
        assert_eq!(open.len(), 3);
        for (x, y) in [(1, 0), (1, 1), (0, 1)] {
            pathfinder.grid.set(x, y, true);
        }
        assert!(pathfinder
            .get_path_single_goal(start, goal, &OctileHeuristic, DirectionBias::ZERO)
            .is_empty());
        pathfinder.grid.set(1, 1, false);
        let reopened = pathfinder.get_path_single_goal(
            start,
            goal,
            &HeuristicKind::Octile,
            DirectionBias::ZERO,
        );
        assert_eq!(reopened, open);
    }

    #[test]
    fn pathfinder_agrees_with_plain_search() {
        let mut pathfinder = Pathfinder::new(6, 6);
        pathfinder.grid.set(2, 2, true);
        pathfinder.grid.set(3, 3, true);
        let start = Point::new(0, 0);
        let goal = Point::new(5, 5);
        let bias = DirectionBias::towards(&start, &goal);
        let expected = find_path(&pathfinder.grid, start, goal, &DirectionalHeuristic, bias);
        let path = pathfinder.get_path_single_goal(start, goal, &DirectionalHeuristic, bias);
        assert_eq!(path, expected);
    }
}
