//! Rectangular tile grid with bounds-checked access
//!
//! Tiles are stored row-major (`y * width + x`). Dimensions are fixed for
//! the life of a run; a restart builds a new grid.

use crate::error::{Result, SimError};
use crate::grid::terrain_table::TerrainTable;
use crate::grid::tile::{BurnStatus, Terrain, Tile};
use serde::Serialize;

/// 4-connected neighbor offsets: up, down, left, right
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Number of tiles in each burn state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BurnCounts {
    pub unburned: usize,
    pub burning: usize,
    pub burnt: usize,
    pub extinguished: usize,
}

/// 2D terrain grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a grid from row-major tiles
    ///
    /// Each tile's coordinates must match its slot.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<Tile>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        if tiles.len() != width * height {
            return Err(SimError::parameter(
                "tiles",
                format!("expected {} tiles for {width}x{height}, got {}", width * height, tiles.len()),
            ));
        }
        if let Some((i, tile)) = tiles
            .iter()
            .enumerate()
            .find(|(i, t)| t.position() != (i % width, i / width))
        {
            return Err(SimError::parameter(
                "tiles",
                format!("tile at slot {i} reports position {:?}", tile.position()),
            ));
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Grid covered by a single terrain kind
    pub fn filled(
        width: usize,
        height: usize,
        terrain: Terrain,
        table: &TerrainTable,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        table.validate()?;
        let tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| Tile::new(x, y, terrain, table))
            .collect();
        Self::from_tiles(width, height, tiles)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false; grids have at least one tile
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Centre tile position
    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Tile at `(x, y)`, or `None` when out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    /// Mutable tile at `(x, y)`, or `None` when out of bounds
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        let i = self.index(x, y)?;
        Some(&mut self.tiles[i])
    }

    /// Tile at signed coordinates; negative or too-large values yield `None`
    pub fn get_signed(&self, x: isize, y: isize) -> Option<&Tile> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.get(x, y)
    }

    /// In-bounds 4-connected neighbors of `(x, y)`
    ///
    /// Coordinates falling outside the grid are silently dropped.
    pub fn neighbors4(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < self.width && ny < self.height).then_some((nx, ny))
        })
    }

    /// All tiles, row-major
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterate tiles, row-major
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Positions of tiles currently burning
    pub fn burning_positions(&self) -> Vec<(usize, usize)> {
        self.tiles
            .iter()
            .filter(|t| t.is_burning())
            .map(Tile::position)
            .collect()
    }

    /// Count tiles per burn status
    pub fn burn_counts(&self) -> BurnCounts {
        self.tiles
            .iter()
            .fold(BurnCounts::default(), |mut counts, tile| {
                match tile.burn_status() {
                    BurnStatus::Unburned => counts.unburned += 1,
                    BurnStatus::Burning => counts.burning += 1,
                    BurnStatus::Burnt => counts.burnt += 1,
                    BurnStatus::Extinguished => counts.extinguished += 1,
                }
                counts
            })
    }

    /// Count tiles of a given terrain kind
    pub fn terrain_count(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|t| t.terrain() == terrain).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grass(width: usize, height: usize) -> Grid {
        Grid::filled(width, height, Terrain::Grass, &TerrainTable::default()).unwrap()
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let table = TerrainTable::default();
        assert!(matches!(
            Grid::filled(0, 5, Terrain::Grass, &table),
            Err(SimError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(Grid::filled(5, 0, Terrain::Grass, &table).is_err());
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = grass(3, 2);
        assert!(grid.get(2, 1).is_some());
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 2).is_none());
        assert!(grid.get_signed(-1, 0).is_none());
        assert!(grid.get_signed(0, -1).is_none());
        assert_eq!(grid.get_signed(1, 1).map(Tile::position), Some((1, 1)));
    }

    #[test]
    fn test_neighbors_filter_edges() {
        let grid = grass(3, 3);
        let mut corner: Vec<_> = grid.neighbors4(0, 0).collect();
        corner.sort_unstable();
        assert_eq!(corner, vec![(0, 1), (1, 0)]);

        assert_eq!(grid.neighbors4(1, 1).count(), 4);
        assert_eq!(grid.neighbors4(2, 2).count(), 2);

        let single = grass(1, 1);
        assert_eq!(single.neighbors4(0, 0).count(), 0);
    }

    #[test]
    fn test_from_tiles_checks_positions() {
        let tiles = vec![
            Tile::with_attributes(1, 0, Terrain::Grass, 0.9, 1.0),
            Tile::with_attributes(0, 0, Terrain::Grass, 0.9, 1.0),
        ];
        assert!(Grid::from_tiles(2, 1, tiles).is_err());
        assert!(Grid::from_tiles(2, 2, Vec::new()).is_err());
    }

    #[test]
    fn test_burn_counts() {
        let mut grid = grass(4, 4);
        grid.get_mut(0, 0).unwrap().ignite();
        grid.get_mut(1, 0).unwrap().ignite();
        grid.get_mut(1, 0).unwrap().extinguish();
        let counts = grid.burn_counts();
        assert_eq!(counts.burning, 1);
        assert_eq!(counts.extinguished, 1);
        assert_eq!(counts.unburned, 14);
        assert_eq!(grid.burning_positions(), vec![(0, 0)]);
    }
}
