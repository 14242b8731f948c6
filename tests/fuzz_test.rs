/// Fuzzes the pathfinder by checking for many random weighted grids that a path is found exactly
/// when the goal is reachable by being part of the same connected component, and that every path
/// found is well formed, reproducible and unaffected by earlier queries on the same instance.
use grid_util::point::Point;
use rand::prelude::*;
use std::sync::Arc;
use weighted_astar::{Pathfinder, WeightGrid};

fn random_weights(w: usize, h: usize, rng: &mut StdRng) -> Vec<Vec<u8>> {
    (0..w)
        .map(|_| {
            (0..h)
                .map(|_| {
                    if rng.gen_bool(0.35) {
                        0
                    } else {
                        rng.gen_range(1..=4)
                    }
                })
                .collect()
        })
        .collect()
}

fn visualize_grid(grid: &WeightGrid, start: &Point, end: &Point) {
    for x in 0..grid.width() as i32 {
        for y in 0..grid.height() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_blocked(p) {
                print!("#");
            } else {
                print!("{}", grid.weight(p).unwrap_or_default());
            }
        }
        println!();
    }
}

fn check_path(pathfinder: &Pathfinder, start: Point, end: Point, path: &[Point], cost: f64) {
    let grid = pathfinder.grid();
    assert_eq!(path.last(), Some(&end));
    let first = path[0];
    assert!((first.x - start.x).abs() <= 1 && (first.y - start.y).abs() <= 1);
    assert!(path.iter().all(|p| !grid.is_blocked(*p)));

    let mut prefix_cost = 0.0;
    for i in 1..=path.len() {
        let step_cost = pathfinder.path_cost(start, &path[..i]).unwrap();
        assert!(step_cost >= prefix_cost);
        prefix_cost = step_cost;
    }
    assert!((prefix_cost - cost).abs() < 1e-9);
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut weights = random_weights(N, N, &mut rng);
        weights[0][0] = 1;
        weights[N - 1][N - 1] = 1;
        let grid = Arc::new(WeightGrid::from_nested(&weights).unwrap());
        let mut pathfinder = Pathfinder::new(grid.clone());
        let reachable = grid.reachable(start, end);
        let result = pathfinder.get_path_with_cost(start, end).unwrap();
        // Show the grid if a path is not found
        if result.is_some() != reachable {
            visualize_grid(&grid, &start, &end);
        }
        assert!(result.is_some() == reachable);
        if let Some((path, cost)) = &result {
            check_path(&pathfinder, start, end, path, *cost);
        }
        let repeated = pathfinder.get_path_with_cost(start, end).unwrap();
        assert_eq!(result, repeated);
    }
}

/// Queries issued after arbitrary earlier queries give the same answer as a fresh instance.
#[test]
fn fuzz_reuse_matches_fresh_instance() {
    const N: usize = 8;
    const N_GRIDS: usize = 300;
    const N_QUERIES: usize = 20;
    let mut rng = StdRng::seed_from_u64(1);
    let random_point =
        |rng: &mut StdRng| Point::new(rng.gen_range(0..N) as i32, rng.gen_range(0..N) as i32);
    for _ in 0..N_GRIDS {
        let grid = Arc::new(WeightGrid::from_nested(&random_weights(N, N, &mut rng)).unwrap());
        let mut reused = Pathfinder::new(grid.clone());
        for _ in 0..N_QUERIES {
            let start = random_point(&mut rng);
            let end = random_point(&mut rng);
            let mut fresh = Pathfinder::new(grid.clone());
            let expected = fresh.get_path_with_cost(start, end).unwrap();
            let actual = reused.get_path_with_cost(start, end).unwrap();
            if expected != actual {
                visualize_grid(&grid, &start, &end);
            }
            assert_eq!(expected, actual);
        }
    }
}

/// Clones share the grid but not their search state, so they can run on separate threads.
#[test]
fn parallel_clones_agree() {
    const N: usize = 16;
    let mut rng = StdRng::seed_from_u64(2);
    let mut weights = random_weights(N, N, &mut rng);
    weights[0][0] = 1;
    let pathfinder = Pathfinder::from_nested(&weights).unwrap();
    let start = Point::new(0, 0);
    let goals = (0..N as i32)
        .map(|y| Point::new(N as i32 - 1, y))
        .collect::<Vec<_>>();

    let mut sequential = pathfinder.clone();
    let expected = goals
        .iter()
        .map(|goal| sequential.get_path(start, *goal).unwrap())
        .collect::<Vec<_>>();

    let results = std::thread::scope(|s| {
        let handles = goals
            .iter()
            .map(|goal| {
                let mut local = pathfinder.clone();
                s.spawn(move || local.get_path(start, *goal).unwrap())
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert_eq!(expected, results);
}
