//! Procedural level generation split into carving, connectivity repair, and orchestration.

mod cave;
mod generator;
mod proto;
mod regions;
mod seed;

pub use cave::generate_level;
pub use generator::MapGenerator;
pub use proto::ProtoBoard;
pub use regions::{count_floor_regions, remove_disconnected_regions};
