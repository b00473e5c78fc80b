//! Flat point arena for one partition cell.

use std::sync::Arc;

use crate::river::RiverEdge;

use super::Point;

/// Offsets of the four orthogonal neighbors.
pub const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Offsets of all eight neighbors.
pub const ADJACENT: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

static ABSENT: Point = Point::ABSENT;

/// The points of one square cell plus the river edges generated inside it.
///
/// Points are stored row-major by local coordinate, `index = lx + lz * size`.
/// Stages mutate them in place; nothing reallocates the grid.
#[derive(Debug, Clone)]
pub struct Region {
    cell_x: i32,
    cell_z: i32,
    min_x: i32,
    min_z: i32,
    size: usize,
    points: Vec<Point>,
    rivers: Vec<Arc<RiverEdge>>,
}

impl Region {
    /// Allocates unset points for cell `(cell_x, cell_z)` with `size` points per side.
    pub fn new(cell_x: i32, cell_z: i32, size: usize) -> Self {
        let min_x = cell_x * size as i32;
        let min_z = cell_z * size as i32;
        let mut points = Vec::with_capacity(size * size);
        for lz in 0..size as i32 {
            for lx in 0..size as i32 {
                points.push(Point::new(min_x + lx, min_z + lz));
            }
        }
        Self {
            cell_x,
            cell_z,
            min_x,
            min_z,
            size,
            points,
            rivers: Vec::new(),
        }
    }

    pub fn cell(&self) -> (i32, i32) {
        (self.cell_x, self.cell_z)
    }

    /// Minimum grid corner, inclusive.
    pub fn min(&self) -> (i32, i32) {
        (self.min_x, self.min_z)
    }

    /// Maximum grid corner, exclusive.
    pub fn max(&self) -> (i32, i32) {
        (self.min_x + self.size as i32, self.min_z + self.size as i32)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        self.index(x, z).is_some()
    }

    /// Arena index of grid coordinate `(x, z)`.
    pub fn index(&self, x: i32, z: i32) -> Option<usize> {
        let lx = x - self.min_x;
        let lz = z - self.min_z;
        let n = self.size as i32;
        (lx >= 0 && lz >= 0 && lx < n && lz < n).then(|| lx as usize + lz as usize * self.size)
    }

    /// Local coordinate of an arena index.
    pub fn local(&self, index: usize) -> (usize, usize) {
        (index % self.size, index / self.size)
    }

    /// The point at grid `(x, z)`, or [`Point::ABSENT`] outside this region.
    pub fn at(&self, x: i32, z: i32) -> &Point {
        match self.index(x, z) {
            Some(index) => &self.points[index],
            None => &ABSENT,
        }
    }

    pub fn at_mut(&mut self, x: i32, z: i32) -> Option<&mut Point> {
        let index = self.index(x, z)?;
        self.points.get_mut(index)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// In-bounds neighbor indices of `index` for the given offsets.
    pub fn neighbors<'a>(&self, index: usize, offsets: &'a [(i32, i32)]) -> impl Iterator<Item = usize> + 'a {
        let (lx, lz) = self.local(index);
        let n = self.size as i32;
        offsets.iter().filter_map(move |&(dx, dz)| {
            let nx = lx as i32 + dx;
            let nz = lz as i32 + dz;
            (nx >= 0 && nz >= 0 && nx < n && nz < n).then(|| nx as usize + nz as usize * n as usize)
        })
    }

    /// River edges generated inside this region.
    pub fn rivers(&self) -> &[Arc<RiverEdge>] {
        &self.rivers
    }

    pub fn add_river(&mut self, edge: RiverEdge) {
        self.rivers.push(Arc::new(edge));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_carry_their_grid_coordinates() {
        let region = Region::new(-1, 2, 8);
        assert_eq!(region.min(), (-8, 16));
        assert_eq!(region.max(), (0, 24));
        for (index, point) in region.points().iter().enumerate() {
            assert_eq!(region.index(point.x, point.z), Some(index));
        }
    }

    #[test]
    fn out_of_bounds_is_absent() {
        let region = Region::new(0, 0, 4);
        assert!(region.at(4, 0).is_absent());
        assert!(region.at(-1, 2).is_absent());
        assert!(!region.at(3, 3).is_absent());
        assert!(region.index(0, 4).is_none());
    }

    #[test]
    fn corner_has_three_neighbors() {
        let region = Region::new(0, 0, 4);
        assert_eq!(region.neighbors(0, &ADJACENT).count(), 3);
        assert_eq!(region.neighbors(0, &ORTHOGONAL).count(), 2);
        let center = region.index(1, 1).expect("in bounds");
        assert_eq!(region.neighbors(center, &ADJACENT).count(), 8);
    }
}
