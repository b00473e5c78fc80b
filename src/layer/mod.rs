//! Cellular-automaton layer framework.
//!
//! A [`Layer`] maps integer grid coordinates to integer values. Generator layers
//! ([`InitLayer`]) have no parent; transform layers ([`ZoomLayer`], [`SmoothLayer`],
//! [`BlendLayer`]) request a slightly larger window from their parent and derive
//! each output cell from its neighborhood. Chains are described as data by
//! [`LayerChainConfig`] and queried through the tile-caching [`Area`].
//!
//! Output buffers are row-major: `index = local_x + local_z * width`.

mod area;
mod blend;
mod chain;
mod data;
mod init;
mod smooth;
mod zoom;

pub use area::{Area, AreaFactory, DEFAULT_CAPACITY, DEFAULT_TILE_SIZE};
pub use blend::{BlendLayer, BlendMode};
pub use chain::{LayerChainConfig, LayerChainError, LayerOp};
pub use data::{DataLayer, Drainage, PhLevel};
pub use init::InitLayer;
pub use smooth::SmoothLayer;
pub use zoom::ZoomLayer;

/// A pure integer-grid transform.
///
/// Implementations must be total over all coordinates and return identical
/// output for identical arguments. No state may change between calls.
pub trait Layer: Send + Sync {
    /// Computes the `width * height` window whose minimum corner is `(x, z)`.
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32>;

    /// Convenience single-cell query.
    fn get(&self, x: i32, z: i32) -> i32 {
        self.get_ints(x, z, 1, 1)[0]
    }
}

/// Reads the four orthogonal neighbors of `(ix, iz)` in a parent window of width `pw`.
///
/// Returns `[west, east, north, south]`.
#[inline]
pub(crate) fn orthogonal(parent: &[i32], pw: usize, ix: usize, iz: usize) -> [i32; 4] {
    [
        parent[(ix - 1) + iz * pw],
        parent[(ix + 1) + iz * pw],
        parent[ix + (iz - 1) * pw],
        parent[ix + (iz + 1) * pw],
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Layer;

    /// A layer returning a fixed function of the coordinate.
    pub struct FnLayer<F>(pub F);

    impl<F> Layer for FnLayer<F>
    where
        F: Fn(i32, i32) -> i32 + Send + Sync,
    {
        fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
            let mut out = Vec::with_capacity(width * height);
            for dz in 0..height as i32 {
                for dx in 0..width as i32 {
                    out.push((self.0)(x + dx, z + dz));
                }
            }
            out
        }
    }
}
