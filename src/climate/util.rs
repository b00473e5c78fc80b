//! Shared helpers for climate computations.

/// Triangle wave with frequency `frequency`, in [-1, 1].
///
/// Zero at `v = 0`, peaks a quarter period later, and repeats every
/// `1 / frequency`. Climate changes at a constant rate between the extremes.
pub fn triangle(frequency: f32, v: f32) -> f32 {
    let fv = frequency * v;
    (4.0 * fv + 1.0 - 4.0 * (fv + 0.75).floor()).abs() - 1.0
}

/// Maps `t` from [-1, 1] onto `[low, high]`.
pub fn map_unit(t: f32, low: f32, high: f32) -> f32 {
    low + (t.clamp(-1.0, 1.0) + 1.0) * 0.5 * (high - low)
}
