use crate::error::PathError;
use crate::heap::MinHeap;
use crate::weight_grid::WeightGrid;
use crate::{DIAGONAL_COST_FACTOR, ORTHOGONAL_COST_FACTOR};
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, info, warn};
use num_traits::ToPrimitive;
use std::sync::Arc;

/// Per-cell search state. One record exists for every grid cell; records are reused across
/// queries and only the ones touched by a query are reset afterwards.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CellRecord {
    pub point: Point,
    pub weight: f64,
    pub blocked: bool,
    pub g: f64,
    pub h: Option<f64>,
    pub f: f64,
    pub closed: bool,
    pub on_open_list: bool,
    /// Index of the record this one was reached from.
    pub parent: Option<usize>,
}

impl CellRecord {
    fn new(point: Point, weight: f64) -> CellRecord {
        CellRecord {
            point,
            weight,
            blocked: weight == 0.0,
            g: f64::INFINITY,
            h: None,
            f: f64::INFINITY,
            closed: false,
            on_open_list: false,
            parent: None,
        }
    }

    fn reset(&mut self) {
        self.g = f64::INFINITY;
        self.h = None;
        self.f = f64::INFINITY;
        self.closed = false;
        self.on_open_list = false;
        self.parent = None;
    }
}

fn open_key(cells: &[CellRecord], ix: &usize) -> f64 {
    cells[*ix].f
}

/// A* search over a shared [WeightGrid].
///
/// Leaving a cell costs its weight, scaled by [DIAGONAL_COST_FACTOR] for diagonal moves. The
/// heuristic is the Manhattan distance to the destination. Search state lives in the instance and
/// is reset after every query, so one instance serves any number of sequential queries but must
/// not be shared between threads mid-query; clone it (the grid itself is shared) to search in
/// parallel.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    grid: Arc<WeightGrid>,
    cells: Vec<CellRecord>,
    touched: Vec<usize>,
    open: MinHeap<usize, [CellRecord], f64>,
    destination: Point,
}

impl Pathfinder {
    pub fn new(grid: Arc<WeightGrid>) -> Pathfinder {
        let cells = (0..grid.len())
            .map(|ix| {
                let point = grid.point_at(ix);
                CellRecord::new(point, grid.weight_unchecked(point))
            })
            .collect();
        Pathfinder {
            grid,
            cells,
            touched: Vec::new(),
            open: MinHeap::new(open_key),
            destination: Point::new(0, 0),
        }
    }

    /// Builds a grid from `cells[x][y]` weights and a pathfinder over it.
    pub fn from_nested<W, R>(cells: &[R]) -> Result<Pathfinder, PathError>
    where
        W: ToPrimitive,
        R: AsRef<[W]>,
    {
        Ok(Pathfinder::new(Arc::new(WeightGrid::from_nested(cells)?)))
    }

    pub fn grid(&self) -> &Arc<WeightGrid> {
        &self.grid
    }

    /// Computes a path from `start` to `destination`. The returned points begin with the step
    /// after `start` and end with `destination`; an empty path means no path exists (or the two
    /// coincide). Failure to find a path is logged as a warning.
    pub fn get_path(&mut self, start: Point, destination: Point) -> Result<Vec<Point>, PathError> {
        Ok(self
            .get_path_with_cost(start, destination)?
            .map(|(path, _cost)| path)
            .unwrap_or_default())
    }

    /// Like [get_path](Self::get_path), but distinguishes "no path" ([None]) from an empty path
    /// and also returns the accumulated cost at the destination.
    pub fn get_path_with_cost(
        &mut self,
        start: Point,
        destination: Point,
    ) -> Result<Option<(Vec<Point>, f64)>, PathError> {
        self.check_coordinate(start)?;
        self.check_coordinate(destination)?;
        let result = self.search(start, destination);
        self.reset();
        let result = result?;
        if result.is_none() {
            warn!("no path found from {} to {}", start, destination);
        }
        Ok(result)
    }

    /// Recomputes the cost of following `path` from `start` using the same step costs as the
    /// search. Returns [None] if a step leaves the grid, enters a blocked cell or is not between
    /// adjacent cells. The start itself may be blocked, as the search expands it regardless.
    pub fn path_cost(&self, start: Point, path: &[Point]) -> Option<f64> {
        std::iter::once(start)
            .chain(path.iter().copied())
            .tuple_windows()
            .try_fold(0.0, |cost, (from, to)| {
                let factor = match (to.x.abs_diff(from.x), to.y.abs_diff(from.y)) {
                    (0, 1) | (1, 0) => ORTHOGONAL_COST_FACTOR,
                    (1, 1) => DIAGONAL_COST_FACTOR,
                    _ => return None,
                };
                (!self.grid.is_blocked(to)).then_some(())?;
                Some(self.grid.weight(from)? * factor + cost)
            })
    }

    fn check_coordinate(&self, point: Point) -> Result<(), PathError> {
        if self.grid.in_bounds(point) {
            Ok(())
        } else {
            Err(PathError::InvalidCoordinate {
                point,
                width: self.grid.width(),
                height: self.grid.height(),
            })
        }
    }

    fn search(
        &mut self,
        start: Point,
        destination: Point,
    ) -> Result<Option<(Vec<Point>, f64)>, PathError> {
        self.destination = destination;
        // A blocked start can still be expanded, so components only rule out unblocked starts.
        if !self.grid.is_blocked(start) && self.grid.unreachable(start, destination) {
            info!("{} is not reachable from {}", destination, start);
            return Ok(None);
        }
        debug!("Computing path from {} to {}", start, destination);

        let start_ix = self.grid.get_ix(start);
        self.touched.push(start_ix);
        self.cells[start_ix].g = 0.0;
        self.open.insert(&self.cells, start_ix);

        while !self.open.is_empty() {
            let current = self.open.extract_min(&self.cells)?;
            if self.cells[current].point == destination {
                let path = self.build_path(current);
                let cost = self.cells[current].g;
                info!(
                    "Found path of {} steps with cost {} after touching {} cells",
                    path.len(),
                    cost,
                    self.touched.len()
                );
                return Ok(Some((path, cost)));
            }
            self.cells[current].closed = true;
            self.expand(current);
        }
        Ok(None)
    }

    fn expand(&mut self, current: usize) {
        let CellRecord {
            point, weight, g, ..
        } = self.cells[current];
        for (neighbour, factor) in self.grid.neighbourhood(point) {
            let n = self.grid.get_ix(neighbour);
            let cell = &mut self.cells[n];
            if cell.blocked || cell.closed {
                continue;
            }
            let h = match cell.h {
                Some(h) => h,
                None => {
                    let h = neighbour.manhattan_distance(&self.destination) as f64;
                    cell.h = Some(h);
                    self.touched.push(n);
                    h
                }
            };
            let new_g = weight * factor + g;
            // Non-strict so that later neighbours in expansion order win ties.
            if new_g <= cell.g {
                cell.parent = Some(current);
                cell.g = new_g;
                if !cell.on_open_list {
                    cell.on_open_list = true;
                    cell.f = new_g + h;
                    self.open.insert(&self.cells, n);
                }
            }
        }
    }

    /// Follows parent links back from the destination. The start has no parent and is left out.
    fn build_path(&self, destination_ix: usize) -> Vec<Point> {
        let mut path = std::iter::successors(Some(destination_ix), |&ix| self.cells[ix].parent)
            .take_while(|&ix| self.cells[ix].parent.is_some())
            .map(|ix| self.cells[ix].point)
            .collect::<Vec<Point>>();
        path.reverse();
        path
    }

    fn reset(&mut self) {
        debug!("Resetting {} touched cells", self.touched.len());
        for &ix in &self.touched {
            self.cells[ix].reset();
        }
        self.touched.clear();
        self.open.reset();
    }
}
