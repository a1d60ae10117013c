use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::NEIGHBOUR_OFFSETS;

/// Read-only view of a grid as seen by the search: bounds plus obstacle membership.
///
/// Queries outside the bounds never fail, they simply report the cell as not traversable.
pub trait GridModel {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Whether `(x, y)` is an obstacle. Out-of-bounds cells are not obstacles.
    fn is_blocked(&self, x: i32, y: i32) -> bool;

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }
    fn is_traversable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && !self.is_blocked(x, y)
    }
    fn is_traversable_point(&self, point: &Point) -> bool {
        self.is_traversable(point.x, point.y)
    }
}

/// [PathingGrid] stores obstacles in a [BoolGrid] where [true] marks a blocked cell and keeps
/// track of connected components using a [UnionFind] structure, which lets callers rule out
/// unreachable goals without flood-filling the grid.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    /// Connectivity the components were generated with.
    pub components_diagonal: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(0, 0)
    }
}

impl PathingGrid {
    /// An obstacle-free grid. Components start out dirty.
    pub fn new(width: usize, height: usize) -> PathingGrid {
        PathingGrid {
            grid: BoolGrid::new(width, height, false),
            components: UnionFind::new(width * height),
            components_dirty: true,
            components_diagonal: true,
        }
    }

    /// Builds a grid from a list of blocked cells. Cells outside the bounds are ignored.
    pub fn from_obstacles<I>(width: usize, height: usize, obstacles: I) -> PathingGrid
    where
        I: IntoIterator<Item = Point>,
    {
        let mut pathing_grid = PathingGrid::new(width, height);
        for p in obstacles {
            if pathing_grid.in_bounds(p.x, p.y) {
                pathing_grid.grid.set(p.x as usize, p.y as usize, true);
            }
        }
        pathing_grid
    }

    fn get_ix(&self, x: i32, y: i32) -> usize {
        y as usize * self.grid.width() + x as usize
    }

    pub fn get_ix_point(&self, point: &Point) -> usize {
        self.get_ix(point.x, point.y)
    }

    /// Updates a position on the grid. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    /// Positions outside the grid are ignored.
    pub fn set(&mut self, x: i32, y: i32, blocked: bool) {
        if !self.in_bounds(x, y) {
            return;
        }
        if blocked {
            if !self.grid.get(x as usize, y as usize) {
                self.components_dirty = true;
            }
        } else if !self.components_dirty {
            let p_ix = self.get_ix(x, y);
            let n_offsets = if self.components_diagonal { 8 } else { 4 };
            for (dx, dy) in &NEIGHBOUR_OFFSETS[..n_offsets] {
                let (nx, ny) = (x + dx, y + dy);
                if self.is_traversable(nx, ny) {
                    let n_ix = self.get_ix(nx, ny);
                    self.components.union(p_ix, n_ix);
                }
            }
        }
        self.grid.set(x as usize, y as usize, blocked);
    }

    pub fn set_point(&mut self, point: Point, blocked: bool) {
        self.set(point.x, point.y, blocked);
    }

    /// All blocked cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Point> + '_ {
        let (w, h) = (self.grid.width() as i32, self.grid.height() as i32);
        (0..h)
            .flat_map(move |y| (0..w).map(move |x| Point::new(x, y)))
            .filter(move |p| self.grid.get(p.x as usize, p.y as usize))
    }

    /// Retrieves the component id a given [Point] belongs to, [None] outside the grid.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.in_bounds(point.x, point.y)
            .then(|| self.components.find(self.get_ix_point(point)))
    }

    /// Regenerates the components if they are dirty or were built with another connectivity.
    pub fn update(&mut self, allow_diagonal: bool) {
        if self.components_dirty || self.components_diagonal != allow_diagonal {
            info!("Components are stale: regenerating components");
            self.generate_components(allow_diagonal);
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    pub fn generate_components(&mut self, allow_diagonal: bool) {
        self.components = UnionFind::new(self.grid.width() * self.grid.height());
        let w = self.grid.width() as i32;
        let h = self.grid.height() as i32;
        self.components_dirty = false;
        self.components_diagonal = allow_diagonal;
        // Forward half of the neighbourhood is enough, every edge is seen once.
        let forward: &[(i32, i32)] = if allow_diagonal {
            &[(1, 0), (0, 1), (1, 1), (1, -1)]
        } else {
            &[(1, 0), (0, 1)]
        };
        for x in 0..w {
            for y in 0..h {
                if self.grid.get(x as usize, y as usize) {
                    continue;
                }
                let parent_ix = self.get_ix(x, y);
                for (dx, dy) in forward {
                    let (nx, ny) = (x + dx, y + dy);
                    if self.is_traversable(nx, ny) {
                        let ix = self.get_ix(nx, ny);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Checks if start and goal are free cells on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Blocked or out-of-bounds
    /// endpoints count as unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_traversable_point(start) && self.is_traversable_point(goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }
}

impl GridModel for PathingGrid {
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
    fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.grid.get(x as usize, y as usize)
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height() as i32 {
            let row = (0..self.grid.width() as i32)
                .map(|x| if self.grid.get(x as usize, y as usize) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
