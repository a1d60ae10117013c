/// Fuzzes the search by checking on many random grids that a path is found exactly when start and
/// goal share a connected component, that every path is a valid chain of free cells, and that the
/// octile heuristic without bias finds paths as short as Dijkstra's algorithm does.
use directional_pathfinding::*;
use grid_util::point::Point;
use rand::prelude::*;

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> PathingGrid {
    let mut pathing_grid = PathingGrid::new(w, h);
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            pathing_grid.set(x, y, rng.gen_bool(0.25))
        }
    }
    pathing_grid
}

fn visualize_grid(grid: &PathingGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_blocked(x, y) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

fn assert_valid_path(grid: &PathingGrid, path: &[Point], start: &Point, end: &Point) {
    assert_eq!(path.first(), Some(start));
    assert_eq!(path.last(), Some(end));
    for step in path.windows(2) {
        let (a, b) = (step[0], step[1]);
        assert!((a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1 && a != b);
        assert!(grid.is_traversable_point(&b));
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(0);
    let heuristics = [
        HeuristicKind::Directional,
        HeuristicKind::Octile,
        HeuristicKind::Euclidean,
        HeuristicKind::Chebyshev,
        HeuristicKind::Zero,
    ];
    for diagonal in [false, true] {
        let config = SearchConfig {
            allow_diagonal_move: diagonal,
            ..SearchConfig::default()
        };
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        let bias = DirectionBias::towards(&start, &end);
        for _ in 0..N_GRIDS {
            let mut random_grid = random_grid(N, N, &mut rng);
            random_grid.set_point(start, false);
            random_grid.set_point(end, false);
            random_grid.generate_components(diagonal);
            let reachable = random_grid.reachable(&start, &end);
            for heuristic in &heuristics {
                let outcome = search(&random_grid, start, end, heuristic, bias, &config);
                // Show the grid if a path is not found
                if outcome.is_found() != reachable {
                    visualize_grid(&random_grid, &start, &end);
                }
                assert_eq!(outcome.is_found(), reachable);
                if reachable {
                    assert_valid_path(&random_grid, &outcome.path, &start, &end);
                }
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(1);
    let config = SearchConfig::default();
    for _ in 0..N_GRIDS {
        let mut random_grid = random_grid(N, N, &mut rng);
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        random_grid.set_point(start, false);
        random_grid.set_point(end, false);
        let bias = DirectionBias::ZERO;
        let astar = search(&random_grid, start, end, &OctileHeuristic, bias, &config);
        let dijkstra = search(&random_grid, start, end, &ZeroHeuristic, bias, &config);
        assert_eq!(astar.is_found(), dijkstra.is_found());
        if let (Some(astar_cost), Some(dijkstra_cost)) = (astar.cost, dijkstra.cost) {
            if (astar_cost - dijkstra_cost).abs() >= 1e-9 {
                println!("Astar distance: {astar_cost}");
                println!("Dijkstra distance: {dijkstra_cost}");
                visualize_grid(&random_grid, &start, &end);
            }
            assert!((astar_cost - dijkstra_cost).abs() < 1e-9);
        }
    }
}

/// Pruning superseded frontier entries leaves the found cost of an admissible search unchanged.
#[test]
fn fuzz_stale_pruning() {
    const N: usize = 8;
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(2);
    let default = SearchConfig::default();
    let pruned = SearchConfig {
        skip_stale_entries: true,
        ..SearchConfig::default()
    };
    for _ in 0..N_GRIDS {
        let mut random_grid = random_grid(N, N, &mut rng);
        let start = Point::new(0, rng.gen_range(0..N as i32));
        let end = Point::new(N as i32 - 1, rng.gen_range(0..N as i32));
        random_grid.set_point(start, false);
        random_grid.set_point(end, false);
        let bias = DirectionBias::ZERO;
        let plain = search(&random_grid, start, end, &OctileHeuristic, bias, &default);
        let skipping = search(&random_grid, start, end, &OctileHeuristic, bias, &pruned);
        assert_eq!(plain.is_found(), skipping.is_found());
        if let (Some(a), Some(b)) = (plain.cost, skipping.cost) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
