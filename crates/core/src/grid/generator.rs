//! Procedural terrain grid generation
//!
//! Three layouts are supported, all deterministic for a given seed:
//! - [`TerrainLayout::Uniform`]: every tile draws its kind independently
//! - [`TerrainLayout::Noise`]: fBm value noise thresholded into bands, giving
//!   lakes ringed by grass that thickens into shrub and forest
//! - [`TerrainLayout::Partitioned`]: binary space partition into rectangular
//!   patches, one terrain kind per patch

use crate::core_types::noise::ValueNoise;
use crate::error::{require_positive, Result, SimError};
use crate::grid::terrain_table::TerrainTable;
use crate::grid::tile::{Terrain, Tile};
use crate::grid::tile_grid::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Golden-ratio increment used to derive per-row RNG streams
const ROW_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Noise band upper bounds: below `WATER_BAND` is water, then grass, shrub, tree
const WATER_BAND: f32 = -0.35;
const GRASS_BAND: f32 = 0.05;
const SHRUB_BAND: f32 = 0.3;

/// Octaves used for noise layout
const LAYOUT_OCTAVES: u32 = 3;

/// How terrain kinds are laid out over the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainLayout {
    /// Independent uniform draw per tile
    Uniform,
    /// Coherent-noise thresholding
    #[default]
    Noise,
    /// Binary space partition patches
    Partitioned,
}

/// Terrain generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Layout algorithm
    pub layout: TerrainLayout,
    /// Smallest patch side for [`TerrainLayout::Partitioned`] (tiles)
    pub min_partition: usize,
    /// Feature size for [`TerrainLayout::Noise`] (tiles)
    pub noise_scale: f32,
    /// Terrain to attribute mapping
    pub table: TerrainTable,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            layout: TerrainLayout::Noise,
            min_partition: 4,
            noise_scale: 12.0,
            table: TerrainTable::default(),
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_partition == 0 {
            return Err(SimError::parameter("min_partition", "must be at least 1"));
        }
        require_positive("noise_scale", self.noise_scale)?;
        self.table.validate()
    }
}

/// Builds terrain grids from a [`TerrainConfig`]
#[derive(Debug, Clone, Default)]
pub struct TerrainGenerator {
    config: TerrainConfig,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Generate a `width x height` grid, every tile unburned
    ///
    /// Same seed and configuration always produce the same grid.
    pub fn generate(&self, width: usize, height: usize, seed: u64) -> Result<Grid> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        self.config.validate()?;

        info!(
            "Generating {}x{} terrain, layout={:?}, seed={}",
            width, height, self.config.layout, seed
        );

        let kinds = match self.config.layout {
            TerrainLayout::Uniform => uniform_layout(width, height, seed),
            TerrainLayout::Noise => noise_layout(width, height, seed, self.config.noise_scale),
            TerrainLayout::Partitioned => {
                partitioned_layout(width, height, seed, self.config.min_partition)
            }
        };

        let table = &self.config.table;
        let tiles = kinds
            .into_iter()
            .enumerate()
            .map(|(i, terrain)| Tile::new(i % width, i / width, terrain, table))
            .collect();
        let grid = Grid::from_tiles(width, height, tiles)?;

        debug!(
            "Terrain mix: grass={}, shrub={}, tree={}, water={}",
            grid.terrain_count(Terrain::Grass),
            grid.terrain_count(Terrain::Shrub),
            grid.terrain_count(Terrain::Tree),
            grid.terrain_count(Terrain::Water)
        );
        Ok(grid)
    }
}

/// Generate a grid with the default configuration
pub fn generate(width: usize, height: usize, seed: u64) -> Result<Grid> {
    TerrainGenerator::default().generate(width, height, seed)
}

/// Fold a 64-bit seed into the 32-bit noise seed
fn noise_seed(seed: u64) -> u32 {
    (seed as u32) ^ ((seed >> 32) as u32)
}

fn uniform_layout(width: usize, height: usize, seed: u64) -> Vec<Terrain> {
    // One RNG stream per row keeps the result independent of thread scheduling
    let rows: Vec<Vec<Terrain>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let row_seed = seed ^ (y as u64 + 1).wrapping_mul(ROW_SEED_STRIDE);
            let mut rng = ChaCha8Rng::seed_from_u64(row_seed);
            (0..width)
                .map(|_| Terrain::ALL[rng.random_range(0..Terrain::ALL.len())])
                .collect()
        })
        .collect();
    rows.into_iter().flatten().collect()
}

fn noise_layout(width: usize, height: usize, seed: u64, scale: f32) -> Vec<Terrain> {
    let noise = ValueNoise::new(noise_seed(seed));
    let rows: Vec<Vec<Terrain>> = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .map(|x| {
                    let v = noise.fbm_2d(x as f32, y as f32, scale, LAYOUT_OCTAVES, 0.5, 0);
                    terrain_for_band(v)
                })
                .collect()
        })
        .collect();
    rows.into_iter().flatten().collect()
}

fn terrain_for_band(value: f32) -> Terrain {
    if value < WATER_BAND {
        Terrain::Water
    } else if value < GRASS_BAND {
        Terrain::Grass
    } else if value < SHRUB_BAND {
        Terrain::Shrub
    } else {
        Terrain::Tree
    }
}

/// Axis-aligned region of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

/// Recursively split the map until every region is smaller than
/// `2 * min_partition` on both axes
fn partition(root: Region, min_partition: usize, rng: &mut ChaCha8Rng) -> Vec<Region> {
    let mut leaves = Vec::new();
    let mut stack = vec![root];
    let min_split = min_partition * 2;

    while let Some(region) = stack.pop() {
        let can_split_x = region.width >= min_split;
        let can_split_y = region.height >= min_split;
        let split_x = match (can_split_x, can_split_y) {
            (false, false) => {
                leaves.push(region);
                continue;
            }
            (true, false) => true,
            (false, true) => false,
            // Split across the longer side, coin flip on squares
            (true, true) if region.width == region.height => rng.random_bool(0.5),
            (true, true) => region.width > region.height,
        };

        if split_x {
            let cut = rng.random_range(min_partition..=region.width - min_partition);
            stack.push(Region {
                width: cut,
                ..region
            });
            stack.push(Region {
                x: region.x + cut,
                width: region.width - cut,
                ..region
            });
        } else {
            let cut = rng.random_range(min_partition..=region.height - min_partition);
            stack.push(Region {
                height: cut,
                ..region
            });
            stack.push(Region {
                y: region.y + cut,
                height: region.height - cut,
                ..region
            });
        }
    }
    leaves
}

fn partitioned_layout(width: usize, height: usize, seed: u64, min_partition: usize) -> Vec<Terrain> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let root = Region {
        x: 0,
        y: 0,
        width,
        height,
    };
    let leaves = partition(root, min_partition, &mut rng);
    debug!("Partitioned terrain into {} regions", leaves.len());

    let mut kinds = vec![Terrain::Grass; width * height];
    for leaf in leaves {
        let terrain = Terrain::ALL[rng.random_range(0..Terrain::ALL.len())];
        for y in leaf.y..leaf.y + leaf.height {
            let row = y * width;
            kinds[row + leaf.x..row + leaf.x + leaf.width].fill(terrain);
        }
    }
    kinds
}
