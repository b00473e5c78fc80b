//! A generated region plus the river edges that can reach it.

use std::sync::Arc;

use crate::river::RiverEdge;

use super::{Point, Region};

/// The query view of one partition cell.
///
/// Holds the cell's finished [`Region`] and every river edge, from this cell
/// or a neighbor, whose channel may enter it. Immutable once built.
#[derive(Debug, Clone)]
pub struct RegionPartition {
    region: Arc<Region>,
    rivers: Vec<Arc<RiverEdge>>,
}

impl RegionPartition {
    pub fn new(region: Arc<Region>, rivers: Vec<Arc<RiverEdge>>) -> Self {
        Self { region, rivers }
    }

    pub fn region(&self) -> &Arc<Region> {
        &self.region
    }

    pub fn cell(&self) -> (i32, i32) {
        self.region.cell()
    }

    /// The point at grid `(x, z)`, or [`Point::ABSENT`] outside this cell.
    pub fn at(&self, x: i32, z: i32) -> &Point {
        self.region.at(x, z)
    }

    pub fn rivers(&self) -> &[Arc<RiverEdge>] {
        &self.rivers
    }

    /// The river whose channel contains grid position `(x, z)`.
    pub fn river_at(&self, x: f32, z: f32) -> Option<&RiverEdge> {
        self.rivers.iter().map(Arc::as_ref).find(|edge| edge.contains(x, z))
    }

    /// Distance to the nearest river center line, if one lies within `reach`.
    pub fn nearest_river(&self, x: f32, z: f32, reach: f32) -> Option<f32> {
        self.rivers
            .iter()
            .filter_map(|edge| edge.distance_within(x, z, reach))
            .fold(None, |best: Option<f32>, d| Some(best.map_or(d, |b| b.min(d))))
    }

    /// True if grid position `(x, z)` is inside a river channel or a lake.
    pub fn river_or_lake_at(&self, x: f32, z: f32) -> bool {
        self.at(x.floor() as i32, z.floor() as i32).lake() || self.river_at(x, z).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn partition_with_river() -> RegionPartition {
        let mut region = Region::new(0, 0, 8);
        if let Some(point) = region.at_mut(6, 6) {
            point.set_land(true);
            point.set_lake();
        }
        let edge = RiverEdge::new(1, Vec2::new(1.5, 1.5), Vec2::new(1.5, 6.5), 0, 0.4);
        RegionPartition::new(Arc::new(region), vec![Arc::new(edge)])
    }

    #[test]
    fn rivers_and_lakes_are_water() {
        let partition = partition_with_river();
        assert!(partition.river_or_lake_at(1.5, 3.0));
        assert!(partition.river_or_lake_at(6.2, 6.9));
        assert!(!partition.river_or_lake_at(4.0, 3.0));
    }

    #[test]
    fn nearest_river_within_reach() {
        let partition = partition_with_river();
        let d = partition.nearest_river(3.5, 4.0, 3.0).expect("river in reach");
        assert!((d - 2.0).abs() < 1e-5);
        assert!(partition.nearest_river(7.5, 4.0, 3.0).is_none());
    }

    #[test]
    fn outside_points_are_absent() {
        let partition = partition_with_river();
        assert!(partition.at(-1, 0).is_absent());
        assert_eq!(partition.cell(), (0, 0));
    }
}
