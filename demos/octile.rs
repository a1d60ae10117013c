use directional_pathfinding::{path_length, DirectionBias, OctileHeuristic, Pathfinder};
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Without a direction bias the octile heuristic reduces to the plain octile distance.

fn main() {
    let mut pathfinder = Pathfinder::new(3, 3);
    pathfinder.grid.set(1, 1, true);
    println!("{}", pathfinder.grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = pathfinder.get_path_single_goal(start, end, &OctileHeuristic, DirectionBias::ZERO);
    if path.is_empty() {
        println!("No path found");
        return;
    }
    println!("Path of length {}:", path_length(&path));
    for p in path {
        println!("{:?}", p);
    }
}
