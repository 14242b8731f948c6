use grid_util::point::Point;
use weighted_astar::Pathfinder;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S 2 1|
// |1 # 1|
// |1 1 E|
//  ___
// where
// - # marks an obstacle (weight 0)
// - numbers are the cost of leaving a cell
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood

fn main() {
    let mut pathfinder = Pathfinder::from_nested(&[[1, 2, 1], [1, 0, 1], [1, 1, 1]]).unwrap();
    println!("{}", pathfinder.grid());
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    match pathfinder.get_path_with_cost(start, end).unwrap() {
        Some((path, cost)) => {
            println!("Path with cost {cost}:");
            for p in path {
                println!("{:?}", p);
            }
        }
        None => println!("No path from {start} to {end}"),
    }
}
