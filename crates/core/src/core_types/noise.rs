//! Seeded coherent noise for terrain layout and weather variation
//!
//! Provides deterministic value noise for:
//! - Terrain banding (lakes, shrub belts, forest patches)
//! - Spatially and temporally coherent weather channels
//!
//! Each [`ValueNoise`] carries its own seed, so independent simulations
//! (parallel test runs, restarts) never share noise state. Independent
//! channels of the same generator are selected with a `layer` index.

/// Prime multipliers for lattice hashing
const SEED_X: i32 = 1619;
const SEED_Y: i32 = 31337;
const SEED_Z: i32 = 6971;
const SEED_LAYER: u32 = 1013;

/// Maximum value for positive i32 as f64 for safe conversion
const MAX_I32_POSITIVE: f64 = 0x7fff_ffff as f64;

/// Smooth interpolation function (Hermite curve)
#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Lattice cell and smoothed offset inside it
///
/// Non-finite coordinates collapse onto the origin cell. Huge ones saturate
/// the cell index, so neighbours are addressed with wrapping arithmetic.
#[inline]
fn lattice(v: f32) -> (i32, f32) {
    if !v.is_finite() {
        return (0, 0.0);
    }
    let floor = v.floor();
    (floor as i32, smoothstep((v - floor).clamp(0.0, 1.0)))
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Seeded lattice value noise
///
/// All outputs are in `[-1, 1]` and are pure functions of the seed and the
/// input coordinates.
///
/// # Example
///
/// ```
/// use wildfire_core::core_types::noise::ValueNoise;
///
/// let noise = ValueNoise::new(42);
/// let v = noise.sample_3d(1.5, 2.25, 0.1, 0);
/// assert!((-1.0..=1.0).contains(&v));
/// assert_eq!(v, ValueNoise::new(42).sample_3d(1.5, 2.25, 0.1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueNoise {
    seed: u32,
}

impl ValueNoise {
    /// Create a noise generator for the given seed
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    #[inline]
    fn layer_seed(&self, layer: u32) -> i32 {
        self.seed.wrapping_add(layer.wrapping_mul(SEED_LAYER)) as i32
    }

    /// Integer lattice hash, returns a value in [0, 1]
    #[inline]
    fn hash(&self, x: i32, y: i32, z: i32, layer: u32) -> f32 {
        let mut n = x
            .wrapping_mul(SEED_X)
            .wrapping_add(y.wrapping_mul(SEED_Y))
            .wrapping_add(z.wrapping_mul(SEED_Z))
            .wrapping_add(self.layer_seed(layer));
        n = (n << 13) ^ n;
        n = n
            .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789221))
            .wrapping_add(1376312589);
        (f64::from(n & 0x7fff_ffff) / MAX_I32_POSITIVE) as f32
    }

    /// 2D value noise at unscaled coordinates `(x / scale, y / scale)`
    ///
    /// Returns a value in [-1, 1].
    pub fn sample_2d(&self, x: f32, y: f32, scale: f32, layer: u32) -> f32 {
        let (x0, fx) = lattice(x / scale);
        let (y0, fy) = lattice(y / scale);
        let (x1, y1) = (x0.wrapping_add(1), y0.wrapping_add(1));

        let v00 = self.hash(x0, y0, 0, layer);
        let v10 = self.hash(x1, y0, 0, layer);
        let v01 = self.hash(x0, y1, 0, layer);
        let v11 = self.hash(x1, y1, 0, layer);

        let v = lerp(lerp(v00, v10, fx), lerp(v01, v11, fx), fy);

        // Convert from [0, 1] to [-1, 1]
        v * 2.0 - 1.0
    }

    /// 3D value noise at already-scaled lattice coordinates
    ///
    /// The third axis is normally time. Returns a value in [-1, 1].
    pub fn sample_3d(&self, x: f32, y: f32, z: f32, layer: u32) -> f32 {
        let (x0, fx) = lattice(x);
        let (y0, fy) = lattice(y);
        let (z0, fz) = lattice(z);
        let (x1, y1, z1) = (x0.wrapping_add(1), y0.wrapping_add(1), z0.wrapping_add(1));

        let v000 = self.hash(x0, y0, z0, layer);
        let v100 = self.hash(x1, y0, z0, layer);
        let v010 = self.hash(x0, y1, z0, layer);
        let v110 = self.hash(x1, y1, z0, layer);
        let v001 = self.hash(x0, y0, z1, layer);
        let v101 = self.hash(x1, y0, z1, layer);
        let v011 = self.hash(x0, y1, z1, layer);
        let v111 = self.hash(x1, y1, z1, layer);

        // Trilinear interpolation
        let v0 = lerp(lerp(v000, v100, fx), lerp(v010, v110, fx), fy);
        let v1 = lerp(lerp(v001, v101, fx), lerp(v011, v111, fx), fy);
        let v = lerp(v0, v1, fz);

        v * 2.0 - 1.0
    }

    /// Fractal Brownian Motion (fBm) for multi-scale variation
    ///
    /// # Parameters
    /// - `x`, `y`: Tile coordinates
    /// - `scale`: Base scale (larger = smoother blobs)
    /// - `octaves`: Number of noise layers (1-4 typical)
    /// - `persistence`: Amplitude reduction per octave (0.5 typical)
    /// - `layer`: Base layer, each octave uses the next one
    pub fn fbm_2d(
        &self,
        x: f32,
        y: f32,
        scale: f32,
        octaves: u32,
        persistence: f32,
        layer: u32,
    ) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for i in 0..octaves.max(1) {
            total += self.sample_2d(x * frequency, y * frequency, scale, layer + i) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        total / max_value
    }
}
