use directional_pathfinding::{
    path_cost, path_length, DirectionBias, DirectionalHeuristic, Heuristic, OctileHeuristic,
    Pathfinder,
};
use grid_util::point::Point;

// Compares the directional heuristic, biased along the start-goal line, with the unbiased octile
// heuristic on a 20x20 grid with two walls. The directional search prefers to keep close to the
// straight line even when that costs a longer detour.

fn main() {
    const N: i32 = 20;
    let mut pathfinder = Pathfinder::new(N as usize, N as usize);
    for y in 0..12 {
        pathfinder.grid.set(6, y, true);
    }
    for x in 8..N {
        pathfinder.grid.set(x, 9, true);
    }
    let start = Point::new(0, 0);
    let goal = Point::new(10, 15);
    let bias = DirectionBias::towards(&start, &goal);
    println!("{}", pathfinder.grid);

    let runs: [(&dyn Heuristic, DirectionBias); 2] = [
        (&DirectionalHeuristic, bias),
        (&OctileHeuristic, DirectionBias::ZERO),
    ];
    for (heuristic, bias) in runs {
        let path = pathfinder.get_path_single_goal(start, goal, heuristic, bias);
        if path.is_empty() {
            println!("No path found using {} heuristic.", heuristic.name());
            continue;
        }
        println!(
            "{} heuristic: {} steps, cost {:.3}",
            heuristic.name(),
            path_length(&path),
            path_cost(&path)
        );
        println!("{:?}", path);
    }
}
