//! Terrain grid: tiles, attribute table and procedural generation

pub mod generator;
pub mod terrain_table;
pub mod tile;
pub mod tile_grid;

pub use generator::{generate, TerrainConfig, TerrainGenerator, TerrainLayout};
pub use terrain_table::{TerrainAttributes, TerrainTable};
pub use tile::{BurnStatus, Terrain, Tile};
pub use tile_grid::{BurnCounts, Grid};
