use core::fmt;

use crate::ship::ShipType;

pub const DEFAULT_GRID_SIZE: usize = 10;
/// Largest accepted grid side; keeps the cell count far from overflow.
pub const MAX_GRID_SIZE: usize = 256;
pub const STANDARD_FLEET: [usize; 5] = [5, 4, 3, 3, 2];
pub const STANDARD_SHIP_NAMES: [&str; 5] =
    ["Carrier", "Battleship", "Cruiser", "Submarine", "Destroyer"];

/// Maximum random draws per ship before fleet placement gives up.
pub const PLACEMENT_ATTEMPTS: usize = 100;
/// Maximum random draws in hunt mode before falling back to a row-major scan.
pub const HUNT_ATTEMPTS: usize = 100;

/// Board size and fleet composition for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct GameConfig {
    pub grid_size: usize,
    pub ship_lengths: Vec<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            ship_lengths: STANDARD_FLEET.to_vec(),
        }
    }
}

impl GameConfig {
    pub fn new(grid_size: usize, ship_lengths: Vec<usize>) -> Self {
        Self {
            grid_size,
            ship_lengths,
        }
    }

    /// Check that a fleet of this shape can exist on a board of this size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                grid_size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        if self.ship_lengths.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        for (index, &length) in self.ship_lengths.iter().enumerate() {
            if length == 0 {
                return Err(ConfigError::ZeroLengthShip { index });
            }
            if length > self.grid_size {
                return Err(ConfigError::ShipTooLong {
                    index,
                    length,
                    grid_size: self.grid_size,
                });
            }
        }
        let cells = self.total_ship_cells();
        if cells > self.grid_size * self.grid_size {
            return Err(ConfigError::FleetTooLarge {
                cells,
                grid_size: self.grid_size,
            });
        }
        Ok(())
    }

    /// Sum of all ship lengths, i.e. the hits needed to destroy the fleet.
    pub fn total_ship_cells(&self) -> usize {
        self.ship_lengths.iter().fold(0, |acc, &len| acc.saturating_add(len))
    }

    /// Named ship types in fleet order.
    pub fn ship_types(&self) -> Vec<ShipType> {
        self.ship_lengths
            .iter()
            .enumerate()
            .map(|(i, &length)| ShipType::new(ship_name(i), length))
            .collect()
    }
}

/// Standard name for the ship at `index` in the fleet list.
pub fn ship_name(index: usize) -> String {
    match STANDARD_SHIP_NAMES.get(index) {
        Some(name) => (*name).to_string(),
        None => format!("Ship {}", index + 1),
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyGrid,
    GridTooLarge { grid_size: usize, max: usize },
    EmptyFleet,
    ZeroLengthShip { index: usize },
    ShipTooLong { index: usize, length: usize, grid_size: usize },
    FleetTooLarge { cells: usize, grid_size: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid => write!(f, "Grid size must be at least 1"),
            ConfigError::GridTooLarge { grid_size, max } => {
                write!(f, "Grid size {} exceeds the maximum of {}", grid_size, max)
            }
            ConfigError::EmptyFleet => write!(f, "Fleet must contain at least one ship"),
            ConfigError::ZeroLengthShip { index } => {
                write!(f, "Ship {} has length 0", index)
            }
            ConfigError::ShipTooLong {
                index,
                length,
                grid_size,
            } => write!(
                f,
                "Ship {} of length {} does not fit on a {}x{} grid",
                index, length, grid_size, grid_size
            ),
            ConfigError::FleetTooLarge { cells, grid_size } => write!(
                f,
                "Fleet needs {} cells but a {}x{} grid has {}",
                cells,
                grid_size,
                grid_size,
                grid_size.saturating_mul(*grid_size)
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
