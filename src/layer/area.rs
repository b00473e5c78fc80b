//! Tile-cached point queries over a layer chain.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::Layer;

/// Default tile edge length, in layer cells.
pub const DEFAULT_TILE_SIZE: usize = 16;

/// Default number of tiles retained.
pub const DEFAULT_CAPACITY: usize = 64;

/// A cached view over a layer chain.
///
/// Point queries compute the whole `T x T` tile containing the point, aligned
/// to multiples of `T`, and keep it. When more than `capacity` tiles are held
/// the least recently used one is dropped. Callers query spatially local
/// points in sequence, so most lookups hit.
///
/// An `Area` is not shared between threads; each worker builds its own from an
/// [`AreaFactory`]. A race between two areas only costs duplicate computation.
pub struct Area {
    layer: Arc<dyn Layer>,
    tile_size: usize,
    capacity: usize,
    tiles: HashMap<(i32, i32), Vec<i32>>,
    age: VecDeque<(i32, i32)>,
    misses: usize,
}

impl Area {
    pub fn new(layer: Arc<dyn Layer>, tile_size: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            layer,
            tile_size: tile_size.max(1),
            capacity,
            tiles: HashMap::with_capacity(capacity),
            age: VecDeque::with_capacity(capacity),
            misses: 0,
        }
    }

    /// Returns the layer value at `(x, z)`.
    pub fn get(&mut self, x: i32, z: i32) -> i32 {
        let t = self.tile_size as i32;
        let key = (x.div_euclid(t), z.div_euclid(t));
        if self.tiles.contains_key(&key) {
            self.touch(key);
        } else {
            self.load(key);
        }

        let index = x.rem_euclid(t) as usize + z.rem_euclid(t) as usize * self.tile_size;
        self.tiles.get(&key).map_or(0, |tile| tile[index])
    }

    /// Number of tiles currently held.
    pub fn cached_tiles(&self) -> usize {
        self.tiles.len()
    }

    /// Number of tiles computed so far, including evicted ones.
    pub fn misses(&self) -> usize {
        self.misses
    }

    fn touch(&mut self, key: (i32, i32)) {
        if self.age.back() == Some(&key) {
            return;
        }
        if let Some(position) = self.age.iter().position(|k| *k == key) {
            self.age.remove(position);
        }
        self.age.push_back(key);
    }

    fn load(&mut self, key: (i32, i32)) {
        while self.tiles.len() >= self.capacity {
            match self.age.pop_front() {
                Some(oldest) => {
                    self.tiles.remove(&oldest);
                }
                None => break,
            }
        }

        let t = self.tile_size;
        let tile = self.layer.get_ints(key.0 * t as i32, key.1 * t as i32, t, t);
        self.misses += 1;
        self.tiles.insert(key, tile);
        self.age.push_back(key);
    }
}

/// Shared recipe for creating [`Area`]s over one layer chain.
#[derive(Clone)]
pub struct AreaFactory {
    layer: Arc<dyn Layer>,
    tile_size: usize,
    capacity: usize,
}

impl AreaFactory {
    pub fn new(layer: Arc<dyn Layer>, tile_size: usize, capacity: usize) -> Self {
        Self { layer, tile_size, capacity }
    }

    pub fn create(&self) -> Area {
        Area::new(self.layer.clone(), self.tile_size, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::test_support::FnLayer;
    use crate::layer::LayerChainConfig;

    fn coordinate_layer() -> Arc<dyn Layer> {
        Arc::new(FnLayer(|x: i32, z: i32| x.wrapping_mul(31).wrapping_add(z)))
    }

    #[test]
    fn matches_direct_layer_queries() {
        let layer = LayerChainConfig::biome_blobs().build(42).expect("valid chain");
        let mut area = Area::new(layer.clone(), DEFAULT_TILE_SIZE, DEFAULT_CAPACITY);
        for z in -40..40 {
            for x in -40..40 {
                assert_eq!(area.get(x, z), layer.get(x, z), "mismatch at ({}, {})", x, z);
            }
        }
    }

    #[test]
    fn repeated_queries_hit_the_cache() {
        let mut area = Area::new(coordinate_layer(), 16, 4);
        for _ in 0..3 {
            for z in 0..16 {
                for x in 0..16 {
                    area.get(x, z);
                }
            }
        }
        assert_eq!(area.misses(), 1);
        assert_eq!(area.cached_tiles(), 1);
    }

    #[test]
    fn capacity_bounds_memory() {
        let mut area = Area::new(coordinate_layer(), 8, 3);
        for i in 0..20 {
            area.get(i * 8, 0);
        }
        assert_eq!(area.cached_tiles(), 3);
        assert_eq!(area.misses(), 20);
    }

    #[test]
    fn least_recently_used_tile_is_evicted() {
        let mut area = Area::new(coordinate_layer(), 8, 2);
        area.get(0, 0); // tile A
        area.get(8, 0); // tile B
        area.get(1, 1); // touch A
        area.get(16, 0); // tile C evicts B
        assert_eq!(area.misses(), 3);
        area.get(2, 2); // A still cached
        assert_eq!(area.misses(), 3);
        area.get(9, 0); // B reloaded
        assert_eq!(area.misses(), 4);
    }

    #[test]
    fn negative_coordinates_use_floor_alignment() {
        let mut area = Area::new(coordinate_layer(), 16, 8);
        assert_eq!(area.get(-1, -1), -31 - 1);
        assert_eq!(area.get(-16, -17), -16 * 31 - 17);
    }
}
