//! Terrain to fire-attribute lookup table
//!
//! | terrain | flammability | fuel |
//! |---------|--------------|------|
//! | grass   | 0.9          | 1    |
//! | shrub   | 0.8          | 2    |
//! | tree    | 0.6          | 3    |
//! | water   | 0.0          | 0    |

use crate::error::{Result, SimError};
use crate::grid::tile::Terrain;
use serde::{Deserialize, Serialize};

/// Fire attributes derived from a terrain kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainAttributes {
    /// Ignition weight in [0, 1]
    pub flammability: f32,
    /// Steps a tile keeps burning once ignited
    pub fuel: f32,
}

impl TerrainAttributes {
    pub const fn new(flammability: f32, fuel: f32) -> Self {
        Self { flammability, fuel }
    }
}

/// Per-terrain attribute table, overridable per scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTable {
    pub grass: TerrainAttributes,
    pub shrub: TerrainAttributes,
    pub tree: TerrainAttributes,
    pub water: TerrainAttributes,
}

impl Default for TerrainTable {
    fn default() -> Self {
        Self {
            grass: TerrainAttributes::new(0.9, 1.0),
            shrub: TerrainAttributes::new(0.8, 2.0),
            tree: TerrainAttributes::new(0.6, 3.0),
            water: TerrainAttributes::new(0.0, 0.0),
        }
    }
}

impl TerrainTable {
    /// Attributes for a terrain kind
    pub fn attributes(&self, terrain: Terrain) -> TerrainAttributes {
        match terrain {
            Terrain::Grass => self.grass,
            Terrain::Shrub => self.shrub,
            Terrain::Tree => self.tree,
            Terrain::Water => self.water,
        }
    }

    /// Reject out-of-range or non-finite entries
    pub fn validate(&self) -> Result<()> {
        for terrain in Terrain::ALL {
            let TerrainAttributes { flammability, fuel } = self.attributes(terrain);
            if !flammability.is_finite() || !(0.0..=1.0).contains(&flammability) {
                return Err(SimError::InvalidTerrainTable {
                    terrain: terrain.to_string(),
                    reason: format!("flammability must be within [0, 1], got {flammability}"),
                });
            }
            if !fuel.is_finite() || fuel < 0.0 {
                return Err(SimError::InvalidTerrainTable {
                    terrain: terrain.to_string(),
                    reason: format!("fuel must be finite and >= 0, got {fuel}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = TerrainTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.attributes(Terrain::Grass).flammability, 0.9);
        assert_eq!(table.attributes(Terrain::Water).flammability, 0.0);
        assert_eq!(table.attributes(Terrain::Tree).fuel, 3.0);
    }

    #[test]
    fn test_rejects_bad_flammability() {
        let table = TerrainTable {
            shrub: TerrainAttributes::new(1.5, 2.0),
            ..TerrainTable::default()
        };
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidTerrainTable { ref terrain, .. } if terrain == "shrub"
        ));
    }

    #[test]
    fn test_rejects_negative_fuel() {
        let table = TerrainTable {
            grass: TerrainAttributes::new(0.9, -1.0),
            ..TerrainTable::default()
        };
        assert!(table.validate().is_err());
    }
}
