//! Tiles, terrain kinds and burn lifecycle

use crate::grid::terrain_table::TerrainTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fire-relevant terrain kind of a tile
///
/// Assigned once at generation and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// Open grassland, burns fast and out quickly
    Grass,
    /// Scrub and brush
    Shrub,
    /// Wooded tiles, slow to catch but long burning
    Tree,
    /// Lakes and rivers, never burn
    Water,
}

impl Terrain {
    /// Every terrain kind, in table order
    pub const ALL: [Terrain; 4] = [Terrain::Grass, Terrain::Shrub, Terrain::Tree, Terrain::Water];

    /// Lowercase name as used in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            Terrain::Grass => "grass",
            Terrain::Shrub => "shrub",
            Terrain::Tree => "tree",
            Terrain::Water => "water",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle state of a tile
///
/// `Unburned -> Burning -> {Burnt | Extinguished}`. `Burnt` and
/// `Extinguished` are terminal. The spread engine only ever produces
/// `Burning` and `Burnt`; `Extinguished` comes from external intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurnStatus {
    /// Not yet reached by fire
    #[default]
    Unburned,
    /// Actively burning, consumes fuel every step
    Burning,
    /// Fuel exhausted
    Burnt,
    /// Put out by an intervention
    Extinguished,
}

impl BurnStatus {
    /// Convert from a raw status code used by front ends
    ///
    /// Unknown codes yield `None`; callers treat them as non-burning.
    pub fn from_code(value: u8) -> Option<Self> {
        match value {
            0 => Some(BurnStatus::Unburned),
            1 => Some(BurnStatus::Burning),
            2 => Some(BurnStatus::Burnt),
            3 => Some(BurnStatus::Extinguished),
            _ => None,
        }
    }

    /// Convert to a raw status code
    pub fn as_code(&self) -> u8 {
        match self {
            BurnStatus::Unburned => 0,
            BurnStatus::Burning => 1,
            BurnStatus::Burnt => 2,
            BurnStatus::Extinguished => 3,
        }
    }

    /// Terminal states never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, BurnStatus::Burnt | BurnStatus::Extinguished)
    }
}

/// One cell of the terrain grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    x: usize,
    y: usize,
    terrain: Terrain,
    /// Ignition weight in [0, 1]
    flammability: f32,
    /// Remaining burn steps, decremented once per step while burning
    fuel: f32,
    burn_status: BurnStatus,
}

impl Tile {
    /// Create an unburned tile with attributes looked up in `table`
    pub fn new(x: usize, y: usize, terrain: Terrain, table: &TerrainTable) -> Self {
        let attributes = table.attributes(terrain);
        Self::with_attributes(x, y, terrain, attributes.flammability, attributes.fuel)
    }

    /// Create an unburned tile with explicit attributes
    ///
    /// Flammability is clamped into [0, 1] and fuel to be non-negative.
    pub fn with_attributes(
        x: usize,
        y: usize,
        terrain: Terrain,
        flammability: f32,
        fuel: f32,
    ) -> Self {
        Self {
            x,
            y,
            terrain,
            flammability: flammability.clamp(0.0, 1.0),
            fuel: fuel.max(0.0),
            burn_status: BurnStatus::Unburned,
        }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    /// Grid position as `(x, y)`
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn flammability(&self) -> f32 {
        self.flammability
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn burn_status(&self) -> BurnStatus {
        self.burn_status
    }

    pub fn is_burning(&self) -> bool {
        self.burn_status == BurnStatus::Burning
    }

    /// True if the tile could catch fire from a burning neighbor
    pub fn is_ignitable(&self) -> bool {
        self.burn_status == BurnStatus::Unburned && self.flammability > 0.0
    }

    /// Override flammability for scenario setup, clamped into [0, 1]
    pub fn set_flammability(&mut self, flammability: f32) {
        self.flammability = flammability.clamp(0.0, 1.0);
    }

    /// Override remaining fuel for scenario setup
    pub fn set_fuel(&mut self, fuel: f32) {
        self.fuel = fuel.max(0.0);
    }

    /// Force a burn status from outside the engine
    ///
    /// Returns `false` (and leaves the tile untouched) when asked to set a
    /// non-flammable tile burning, or to move a burnt or extinguished tile
    /// to any other state.
    pub fn set_burn_status(&mut self, status: BurnStatus) -> bool {
        if status == BurnStatus::Burning && self.flammability <= 0.0 {
            return false;
        }
        if self.burn_status.is_terminal() && status != self.burn_status {
            return false;
        }
        self.burn_status = status;
        true
    }

    /// Set an unburned, flammable tile burning
    pub fn ignite(&mut self) -> bool {
        if !self.is_ignitable() {
            return false;
        }
        self.burn_status = BurnStatus::Burning;
        true
    }

    /// Put out a burning tile
    pub fn extinguish(&mut self) -> bool {
        if !self.is_burning() {
            return false;
        }
        self.burn_status = BurnStatus::Extinguished;
        true
    }

    /// Consume one step of fuel; returns `true` if the tile burned out
    pub(crate) fn consume_fuel(&mut self) -> bool {
        if !self.is_burning() {
            return false;
        }
        self.fuel -= 1.0;
        if self.fuel <= 0.0 {
            self.fuel = self.fuel.max(0.0);
            self.burn_status = BurnStatus::Burnt;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_conversion() {
        for status in [
            BurnStatus::Unburned,
            BurnStatus::Burning,
            BurnStatus::Burnt,
            BurnStatus::Extinguished,
        ] {
            assert_eq!(BurnStatus::from_code(status.as_code()), Some(status));
        }
        assert_eq!(BurnStatus::from_code(4), None);
        assert_eq!(BurnStatus::from_code(255), None);
    }

    #[test]
    fn test_water_cannot_be_set_burning() {
        let mut water = Tile::new(0, 0, Terrain::Water, &TerrainTable::default());
        assert!(!water.ignite());
        assert!(!water.set_burn_status(BurnStatus::Burning));
        assert_eq!(water.burn_status(), BurnStatus::Unburned);
    }

    #[test]
    fn test_consume_fuel_burns_out() {
        let mut tile = Tile::with_attributes(1, 1, Terrain::Tree, 0.6, 2.0);
        assert!(tile.ignite());
        assert!(!tile.consume_fuel());
        assert_eq!(tile.fuel(), 1.0);
        assert!(tile.consume_fuel());
        assert_eq!(tile.burn_status(), BurnStatus::Burnt);
        assert_eq!(tile.fuel(), 0.0);
        // Burnt tiles are inert
        assert!(!tile.consume_fuel());
        assert!(!tile.ignite());
        assert_eq!(tile.fuel(), 0.0);
    }

    #[test]
    fn test_zero_fuel_burns_out_next_step() {
        let mut tile = Tile::with_attributes(0, 0, Terrain::Grass, 0.9, 0.0);
        assert!(tile.ignite());
        assert!(tile.consume_fuel());
        assert_eq!(tile.burn_status(), BurnStatus::Burnt);
    }

    #[test]
    fn test_extinguish_only_burning() {
        let mut tile = Tile::with_attributes(0, 0, Terrain::Grass, 0.9, 1.0);
        assert!(!tile.extinguish());
        tile.ignite();
        assert!(tile.extinguish());
        assert_eq!(tile.burn_status(), BurnStatus::Extinguished);
        assert!(tile.burn_status().is_terminal());
        assert!(!tile.ignite());
    }

    #[test]
    fn test_terminal_states_cannot_be_left() {
        let mut burnt = Tile::with_attributes(0, 0, Terrain::Grass, 0.9, 1.0);
        assert!(burnt.set_burn_status(BurnStatus::Burnt));
        let mut extinguished = Tile::with_attributes(1, 0, Terrain::Grass, 0.9, 1.0);
        assert!(extinguished.set_burn_status(BurnStatus::Extinguished));

        for tile in [&mut burnt, &mut extinguished] {
            let terminal = tile.burn_status();
            for status in [
                BurnStatus::Unburned,
                BurnStatus::Burning,
                BurnStatus::Burnt,
                BurnStatus::Extinguished,
            ] {
                assert_eq!(tile.set_burn_status(status), status == terminal);
                assert_eq!(tile.burn_status(), terminal);
            }
        }
    }

    #[test]
    fn test_attributes_are_clamped() {
        let tile = Tile::with_attributes(0, 0, Terrain::Shrub, 1.7, -2.0);
        assert_eq!(tile.flammability(), 1.0);
        assert_eq!(tile.fuel(), 0.0);
    }
}
