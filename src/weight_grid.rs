use crate::error::PathError;
use crate::{DIAGONAL_COST_FACTOR, ORTHOGONAL_COST_FACTOR};
use core::fmt;
use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use log::debug;
use num_traits::ToPrimitive;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Offsets of the Moore neighbourhood in expansion order: north-west, north, north-east, west,
/// east, south-west, south, south-east. North is decreasing `x`, west is decreasing `y`.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// [WeightGrid] is an immutable rectangle of traversal weights. A weight of exactly zero marks
/// a blocked cell, any other weight is the cost of leaving that cell. Connected components of
/// the unblocked cells (under 8-directional movement) are computed once at construction using a
/// [UnionFind] structure so that hopeless queries can be rejected without searching.
#[derive(Clone, Debug)]
pub struct WeightGrid {
    weights: SimpleValueGrid<f64>,
    width: usize,
    height: usize,
    components: UnionFind<usize>,
}

impl WeightGrid {
    /// Builds a grid from nested sequences indexed as `cells[x][y]`, so `cells.len()` is the
    /// width and every inner sequence has length equal to the height.
    pub fn from_nested<W, R>(cells: &[R]) -> Result<WeightGrid, PathError>
    where
        W: ToPrimitive,
        R: AsRef<[W]>,
    {
        let width = cells.len();
        if width == 0 {
            return Err(PathError::MalformedGrid("grid has no rows".to_owned()));
        }
        let height = cells[0].as_ref().len();
        if height == 0 {
            return Err(PathError::MalformedGrid("grid has empty rows".to_owned()));
        }
        let mut weights = SimpleValueGrid::new(width, height, 0.0);
        for (x, row) in cells.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != height {
                return Err(PathError::MalformedGrid(format!(
                    "row {} has length {}, expected {}",
                    x,
                    row.len(),
                    height
                )));
            }
            for (y, value) in row.iter().enumerate() {
                let weight = value.to_f64().ok_or_else(|| {
                    PathError::MalformedGrid(format!("weight at ({}, {}) is not a number", x, y))
                })?;
                weights.set(x as i32, y as i32, weight);
            }
        }
        let mut grid = WeightGrid {
            weights,
            width,
            height,
            components: UnionFind::new(width * height),
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// The weight stored at `point`, or [None] outside the grid.
    pub fn weight(&self, point: Point) -> Option<f64> {
        if self.in_bounds(point) {
            Some(self.weight_unchecked(point))
        } else {
            None
        }
    }

    /// Points outside the grid count as blocked.
    pub fn is_blocked(&self, point: Point) -> bool {
        self.weight(point).map_or(true, |w| w == 0.0)
    }

    /// Weight at an in-bounds point.
    pub(crate) fn weight_unchecked(&self, point: Point) -> f64 {
        self.weights.get(point.x, point.y)
    }

    pub(crate) fn get_ix(&self, point: Point) -> usize {
        point.x as usize * self.height + point.y as usize
    }

    pub(crate) fn point_at(&self, ix: usize) -> Point {
        Point::new((ix / self.height) as i32, (ix % self.height) as i32)
    }

    /// In-bounds neighbours of `point` in expansion order, each paired with the factor applied to
    /// the source weight when moving there.
    pub fn neighbourhood(&self, point: Point) -> SmallVec<[(Point, f64); 8]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dx, dy)| {
                let factor = if dx != 0 && dy != 0 {
                    DIAGONAL_COST_FACTOR
                } else {
                    ORTHOGONAL_COST_FACTOR
                };
                (Point::new(point.x + dx, point.y + dy), factor)
            })
            .filter(|(p, _)| self.in_bounds(*p))
            .collect()
    }

    /// Retrieves the component id a given [Point] belongs to. Blocked cells form singleton
    /// components.
    pub fn get_component(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some(self.components.find(self.get_ix(point)))
        } else {
            None
        }
    }

    /// Checks if start and goal are unblocked and on the same component.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component, or if either is blocked.
    pub fn unreachable(&self, start: Point, goal: Point) -> bool {
        if self.is_blocked(start) || self.is_blocked(goal) {
            return true;
        }
        !self
            .components
            .equiv(self.get_ix(start), self.get_ix(goal))
    }

    /// Links every unblocked cell to its unblocked neighbours. Only the forward half of the
    /// neighbourhood is visited since union is symmetric.
    fn generate_components(&mut self) {
        debug!(
            "Generating connected components for {}x{} grid",
            self.width, self.height
        );
        for x in 0..self.width as i32 {
            for y in 0..self.height as i32 {
                let point = Point::new(x, y);
                if self.is_blocked(point) {
                    continue;
                }
                let parent_ix = self.get_ix(point);
                for p in [
                    Point::new(x, y + 1),
                    Point::new(x + 1, y - 1),
                    Point::new(x + 1, y),
                    Point::new(x + 1, y + 1),
                ] {
                    if !self.is_blocked(p) {
                        let ix = self.get_ix(p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for WeightGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for x in 0..self.width as i32 {
            let values = (0..self.height as i32)
                .map(|y| self.weights.get(x, y))
                .collect::<Vec<f64>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
