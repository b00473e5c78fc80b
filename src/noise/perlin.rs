//! Seeded 3D gradient noise for density functions.
//!
//! [`ImprovedNoise`] is a single octave of improved Perlin noise with its own
//! permutation table and coordinate offsets. [`OctaveNoise`] layers several of
//! them at doubling frequencies and normalizes the sum into [-1, 1].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::random::derive_seed;

/// Wrap period for sample coordinates; keeps precision at large coordinates.
const ROUND_OFF: f64 = 33_554_432.0;

/// The 16 gradient directions, indexed by the low four bits of a hash.
const GRADIENT: [[i8; 3]; 16] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
    [1, 1, 0],
    [0, -1, 1],
    [-1, 1, 0],
    [0, -1, -1],
];

/// A single octave of improved Perlin noise.
#[derive(Debug, Clone)]
pub struct ImprovedNoise {
    p: [u8; 256],
    xo: f64,
    yo: f64,
    zo: f64,
}

impl ImprovedNoise {
    /// Builds the permutation table with a Fisher-Yates shuffle drawn from `rng`.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let xo = rng.gen::<f64>() * 256.0;
        let yo = rng.gen::<f64>() * 256.0;
        let zo = rng.gen::<f64>() * 256.0;

        let mut p = [0u8; 256];
        for (i, slot) in p.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for i in 0..256 {
            let offset = rng.gen_range(0..256 - i);
            p.swap(i, i + offset);
        }

        Self { p, xo, yo, zo }
    }

    /// Samples the noise; the result lies in roughly [-1, 1].
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let x = x + self.xo;
        let y = y + self.yo;
        let z = z + self.zo;

        let xf = x.floor();
        let yf = y.floor();
        let zf = z.floor();
        let (xi, yi, zi) = (xf as i32, yf as i32, zf as i32);
        let (xr, yr, zr) = (x - xf, y - yf, z - zf);

        let x0 = self.perm(xi);
        let x1 = self.perm(xi + 1);
        let xy00 = self.perm(x0 + yi);
        let xy01 = self.perm(x0 + yi + 1);
        let xy10 = self.perm(x1 + yi);
        let xy11 = self.perm(x1 + yi + 1);

        let d000 = grad_dot(self.perm(xy00 + zi), xr, yr, zr);
        let d100 = grad_dot(self.perm(xy10 + zi), xr - 1.0, yr, zr);
        let d010 = grad_dot(self.perm(xy01 + zi), xr, yr - 1.0, zr);
        let d110 = grad_dot(self.perm(xy11 + zi), xr - 1.0, yr - 1.0, zr);
        let d001 = grad_dot(self.perm(xy00 + zi + 1), xr, yr, zr - 1.0);
        let d101 = grad_dot(self.perm(xy10 + zi + 1), xr - 1.0, yr, zr - 1.0);
        let d011 = grad_dot(self.perm(xy01 + zi + 1), xr, yr - 1.0, zr - 1.0);
        let d111 = grad_dot(self.perm(xy11 + zi + 1), xr - 1.0, yr - 1.0, zr - 1.0);

        let (u, v, w) = (smoothstep(xr), smoothstep(yr), smoothstep(zr));
        lerp(
            w,
            lerp(v, lerp(u, d000, d100), lerp(u, d010, d110)),
            lerp(v, lerp(u, d001, d101), lerp(u, d011, d111)),
        )
    }

    #[inline]
    fn perm(&self, i: i32) -> i32 {
        self.p[(i & 255) as usize] as i32
    }
}

#[inline]
fn grad_dot(hash: i32, x: f64, y: f64, z: f64) -> f64 {
    let g = GRADIENT[(hash & 15) as usize];
    g[0] as f64 * x + g[1] as f64 * y + g[2] as f64 * z
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn smoothstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub(crate) fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn wrap(x: f64) -> f64 {
    x - (x / ROUND_OFF + 0.5).floor() * ROUND_OFF
}

/// Octave layout of an [`OctaveNoise`].
///
/// `first_octave` is the log2 of the lowest frequency; `-7` means the first
/// octave has a wavelength of 128 blocks. Zero amplitudes skip an octave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    pub first_octave: i32,
    pub amplitudes: Vec<f64>,
}

impl NoiseParameters {
    pub fn new(first_octave: i32, amplitudes: &[f64]) -> Self {
        Self {
            first_octave,
            amplitudes: amplitudes.to_vec(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.amplitudes.iter().any(|a| *a != 0.0) && self.amplitudes.iter().all(|a| a.is_finite())
    }
}

/// Sum of [`ImprovedNoise`] octaves at doubling frequencies.
#[derive(Debug, Clone)]
pub struct OctaveNoise {
    levels: Vec<Option<ImprovedNoise>>,
    amplitudes: Vec<f64>,
    lowest_freq_input_factor: f64,
    lowest_freq_value_factor: f64,
    max_value: f64,
}

impl OctaveNoise {
    /// Creates the noise for `seed`. Each octave draws its permutation from an
    /// independent ChaCha stream so adding an octave never reshuffles the others.
    pub fn new(seed: u64, parameters: &NoiseParameters) -> Self {
        let octaves = parameters.amplitudes.len();
        let levels = parameters
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, amplitude)| {
                (*amplitude != 0.0).then(|| {
                    let octave = (parameters.first_octave + i as i32) as i64 as u64;
                    let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(seed, octave));
                    ImprovedNoise::new(&mut rng)
                })
            })
            .collect();

        let lowest_freq_input_factor = 2.0f64.powi(parameters.first_octave);
        let lowest_freq_value_factor = if octaves == 0 {
            0.0
        } else {
            2.0f64.powi(octaves as i32 - 1) / (2.0f64.powi(octaves as i32) - 1.0)
        };

        let mut max_value = 0.0;
        let mut value_factor = lowest_freq_value_factor;
        for amplitude in &parameters.amplitudes {
            max_value += amplitude.abs() * value_factor;
            value_factor /= 2.0;
        }

        Self {
            levels,
            amplitudes: parameters.amplitudes.clone(),
            lowest_freq_input_factor,
            lowest_freq_value_factor,
            max_value,
        }
    }

    /// Raw octave sum.
    pub fn get_value(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut value = 0.0;
        let mut input_factor = self.lowest_freq_input_factor;
        let mut value_factor = self.lowest_freq_value_factor;

        for (level, amplitude) in self.levels.iter().zip(&self.amplitudes) {
            if let Some(noise) = level {
                let sample = noise.noise(wrap(x * input_factor), wrap(y * input_factor), wrap(z * input_factor));
                value += amplitude * sample * value_factor;
            }
            input_factor *= 2.0;
            value_factor /= 2.0;
        }
        value
    }

    /// Octave sum normalized by its theoretical maximum, clamped to [-1, 1].
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        if self.max_value <= 0.0 {
            return 0.0;
        }
        (self.get_value(x, y, z) / self.max_value).clamp(-1.0, 1.0)
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }
}
