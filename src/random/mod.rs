//! Deterministic, order-independent randomness keyed by coordinates.
//!
//! Every probabilistic decision in generation derives its state from a seed and
//! the coordinate being computed, never from a shared sequential generator. This
//! keeps layers and stages pure: the value at `(x, z)` does not depend on which
//! other coordinates were queried first, or on which thread asked.

mod coord;

pub use coord::CoordRandom;

/// Linear-congruential seed mixer.
///
/// Folds `salt` into `seed`. Used for layer seeds and coordinate states.
#[inline]
pub fn mix_seed(seed: i64, salt: i64) -> i64 {
    seed.wrapping_mul(
        seed.wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407),
    )
    .wrapping_add(salt)
}

/// SplitMix64 finalizer. Produces a well-distributed 64 bit value from `x`.
#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Derives an independent sub-seed from `seed` and a salt.
#[inline]
pub fn derive_seed(seed: u64, salt: u64) -> u64 {
    splitmix64(seed ^ splitmix64(salt))
}

/// Stateless uniform draw in `[-1, 1)` for `(seed, id)`.
#[inline]
pub fn unit_hash(seed: u64, id: u64) -> f32 {
    let bits = derive_seed(seed, id) >> 40;
    (bits as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
}

/// Seed for region cell `(cell_x, cell_z)`.
pub fn cell_seed(world_seed: u64, cell_x: i32, cell_z: i32) -> u64 {
    let packed = ((cell_x as u32 as u64) << 32) | (cell_z as u32 as u64);
    derive_seed(world_seed, packed.wrapping_mul(7_189_234_123))
}
