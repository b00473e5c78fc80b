//! Lake placement and the per-region drainage network.

use std::collections::{HashMap, VecDeque};

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::random::derive_seed;
use crate::region::{Region, RegionContext, ADJACENT, ORTHOGONAL};

use super::geometry::segments_intersect;
use super::{RiverConfig, RiverEdge};

const UNREACHED: u32 = u32::MAX;

/// Places lakes, then traces rivers from interior sources down to coastal or
/// lakeside drains and stores them as [`RiverEdge`]s on the region.
///
/// Lakes fill basins that have no ocean within `lake_search_radius`. Rivers
/// follow a breadth-first drain distance field strictly downhill and stop at
/// a drain or where they meet an earlier river. Requires distances and
/// mountain heights.
pub fn add_rivers_and_lakes(ctx: &mut RegionContext<'_>) {
    let cfg = &ctx.config.rivers;
    let region = &mut *ctx.region;
    let random = &mut ctx.random;

    let lakes = place_lakes(region, random, cfg);
    let network = DrainageNetwork::build(region, cfg);
    let rivers = network.trace_rivers(region, random, cfg, ctx.seed);
    trace!(
        cell = ?region.cell(),
        lakes,
        rivers,
        edges = region.rivers().len(),
        "placed rivers and lakes"
    );
}

fn margin(cfg: &RiverConfig) -> u8 {
    cfg.edge_margin.max(1)
}

fn center(region: &Region, index: usize) -> Vec2 {
    let point = &region.points()[index];
    Vec2::new(point.x as f32 + 0.5, point.z as f32 + 0.5)
}

/// Floods basins into lakes. Returns the number of lakes placed.
fn place_lakes(region: &mut Region, random: &mut ChaCha8Rng, cfg: &RiverConfig) -> usize {
    let mut lakes = 0;
    for index in 0..region.points().len() {
        if lakes >= cfg.max_lakes {
            break;
        }
        let point = region.points()[index];
        if !point.land()
            || point.lake()
            || point.distance_to_ocean <= cfg.lake_search_radius
            || point.distance_to_edge < margin(cfg)
        {
            continue;
        }
        let height = point.base_land_height;
        let basin = region.neighbors(index, &ADJACENT).all(|next| {
            let other = &region.points()[next];
            other.land() && other.base_land_height >= height
        });
        if !basin || random.gen::<f32>() >= cfg.lake_chance {
            continue;
        }

        flood_lake(region, index, height.saturating_add(cfg.lake_depth), cfg);
        lakes += 1;
    }
    lakes
}

fn flood_lake(region: &mut Region, start: usize, max_height: u8, cfg: &RiverConfig) {
    let mut queue = VecDeque::from([start]);
    let mut filled = vec![false; region.points().len()];
    filled[start] = true;
    let mut size = 0;

    while let Some(index) = queue.pop_front() {
        if size >= cfg.lake_max_size {
            break;
        }
        let point = &mut region.points_mut()[index];
        point.set_lake();
        point.biome = point.biome.lake_for();
        size += 1;

        for next in region.neighbors(index, &ORTHOGONAL) {
            let other = &region.points()[next];
            if !filled[next]
                && other.land()
                && !other.lake()
                && other.base_land_height <= max_height
                && other.distance_to_edge >= margin(cfg)
            {
                filled[next] = true;
                queue.push_back(next);
            }
        }
    }
}

/// Drains and the breadth-first drain distance of every land point.
struct DrainageNetwork {
    /// Steps to the nearest drain; `UNREACHED` where no drain is reachable.
    distance: Vec<u32>,
    /// For each drain, the adjacent water point it empties into.
    outlets: HashMap<usize, usize>,
}

impl DrainageNetwork {
    fn build(region: &Region, cfg: &RiverConfig) -> Self {
        let points = region.points();
        let mut distance = vec![UNREACHED; points.len()];
        let mut outlets = HashMap::new();
        let mut queue = VecDeque::new();

        for (index, point) in points.iter().enumerate() {
            if !flowing_land(region, index)
                || point.base_land_height > cfg.max_drain_height
                || point.distance_to_edge < margin(cfg)
            {
                continue;
            }
            let water = region
                .neighbors(index, &ORTHOGONAL)
                .find(|&next| !points[next].land() || points[next].lake());
            if let Some(water) = water {
                outlets.insert(index, water);
                distance[index] = 0;
                queue.push_back(index);
            }
        }

        while let Some(index) = queue.pop_front() {
            let d = distance[index];
            for next in region.neighbors(index, &ADJACENT) {
                if distance[next] == UNREACHED && flowing_land(region, next) {
                    distance[next] = d + 1;
                    queue.push_back(next);
                }
            }
        }

        Self { distance, outlets }
    }

    fn is_source(&self, region: &Region, index: usize, cfg: &RiverConfig) -> bool {
        let point = &region.points()[index];
        flowing_land(region, index)
            && !point.river()
            && point.distance_to_ocean >= cfg.min_source_distance
            && point.distance_to_edge >= margin(cfg)
            && self.distance[index] != UNREACHED
            && self.distance[index] > 0
    }

    /// Steepest strictly-downhill path from `source`. Ends on a drain, or on
    /// the first point that already carries a river.
    fn trace(&self, region: &Region, random: &mut ChaCha8Rng, source: usize) -> Vec<usize> {
        let mut path = vec![source];
        let mut current = source;
        while self.distance[current] > 0 {
            let target = self.distance[current] - 1;
            let mut best: Vec<usize> = Vec::new();
            let mut best_height = u8::MAX;
            for next in region.neighbors(current, &ADJACENT) {
                if self.distance[next] != target {
                    continue;
                }
                let height = region.points()[next].base_land_height;
                if height < best_height {
                    best_height = height;
                    best.clear();
                }
                if height == best_height {
                    best.push(next);
                }
            }
            let Some(&next) = best.get(random.gen_range(0..best.len().max(1))) else {
                break;
            };
            path.push(next);
            if region.points()[next].river() {
                break;
            }
            current = next;
        }
        path
    }

    fn trace_rivers(&self, region: &mut Region, random: &mut ChaCha8Rng, cfg: &RiverConfig, seed: u64) -> usize {
        let mut segments: Vec<(Vec2, Vec2)> = Vec::new();
        let mut vertex_at: HashMap<usize, Vec2> = HashMap::new();
        let mut rivers = 0;
        let mut edge_id = 0u64;

        for index in 0..region.points().len() {
            if rivers >= cfg.max_rivers {
                break;
            }
            if !self.is_source(region, index, cfg) || random.gen::<f32>() >= cfg.source_chance {
                continue;
            }
            let path = self.trace(region, random, index);
            if path.len() < 2 {
                continue;
            }

            let vertices = self.vertices(region, random, &path, &vertex_at, cfg);
            let crossing = vertices.windows(2).any(|pair| {
                segments
                    .iter()
                    .any(|&(a, b)| !shares_endpoint(pair[0], pair[1], a, b) && segments_intersect(pair[0], pair[1], a, b))
            });
            if crossing {
                continue;
            }

            let merged = path.last().is_some_and(|&last| region.points()[last].river());
            let flowing = if merged { &path[..path.len() - 1] } else { &path[..] };
            for &step in flowing {
                if let Some(point) = region.points_mut().get_mut(step) {
                    point.set_river();
                }
            }
            for (step, vertex) in vertex_indices(path.len(), cfg.vertex_spacing).zip(&vertices) {
                vertex_at.entry(path[step]).or_insert(*vertex);
            }
            for pair in vertices.windows(2) {
                edge_id += 1;
                let edge_seed = derive_seed(seed, edge_id);
                region.add_river(RiverEdge::new(edge_seed, pair[0], pair[1], cfg.fractal_depth, cfg.width));
                segments.push((pair[0], pair[1]));
            }
            rivers += 1;
        }
        rivers
    }

    /// Vertex positions along `path`: every `vertex_spacing` steps plus the
    /// last step. Interior vertices are jittered. A river that ends at a drain
    /// extends halfway into the water.
    fn vertices(
        &self,
        region: &Region,
        random: &mut ChaCha8Rng,
        path: &[usize],
        vertex_at: &HashMap<usize, Vec2>,
        cfg: &RiverConfig,
    ) -> Vec<Vec2> {
        let steps: Vec<usize> = vertex_indices(path.len(), cfg.vertex_spacing).collect();
        let last = steps.len() - 1;
        steps
            .iter()
            .enumerate()
            .map(|(i, &step)| {
                let index = path[step];
                if let Some(existing) = vertex_at.get(&index) {
                    return *existing;
                }
                let base = center(region, index);
                if i == 0 {
                    base
                } else if i == last {
                    match self.outlets.get(&index) {
                        Some(&water) => base + (center(region, water) - base) * 0.5,
                        None => base,
                    }
                } else if cfg.jitter > 0.0 {
                    let dx = random.gen_range(-cfg.jitter..=cfg.jitter);
                    let dz = random.gen_range(-cfg.jitter..=cfg.jitter);
                    base + Vec2::new(dx, dz)
                } else {
                    base
                }
            })
            .collect()
    }
}

/// Path steps that become vertices: `0, spacing, 2 * spacing, ...` and the last.
fn vertex_indices(len: usize, spacing: usize) -> impl Iterator<Item = usize> {
    let last = len.saturating_sub(1);
    (0..last)
        .step_by(spacing.max(1))
        .chain(std::iter::once(last))
}

fn shares_endpoint(a1: Vec2, b1: Vec2, a2: Vec2, b2: Vec2) -> bool {
    a1 == a2 || a1 == b2 || b1 == a2 || b1 == b2
}

/// Land that is not lake.
fn flowing_land(region: &Region, index: usize) -> bool {
    let point = &region.points()[index];
    point.land() && !point.lake()
}
