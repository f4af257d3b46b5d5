pub mod board;
pub mod combat;
pub mod config;
pub mod content;
pub mod entities;
pub mod error;
pub mod loot;
pub mod mapgen;
pub mod movement;
mod rng;
pub mod sim;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod test_support;

pub use board::{Board, Cell};
pub use config::{CombatFormula, GenerationConfig, SimConfig};
pub use entities::{Actor, Entity, EntityHeader, StaticEntity, StaticKind};
pub use error::{ConfigError, SimError};
pub use loot::{Inventory, Item};
pub use sim::{Simulation, World};
pub use types::*;
