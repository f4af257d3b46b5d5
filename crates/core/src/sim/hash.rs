//! Stable snapshot hashing for deterministic verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Simulation {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.level);
        hasher.write_u64(self.turn);
        hasher.write_u64(self.pending_ms);
        hasher.write_u8(self.phase as u8);
        hasher.write_u8(u8::from(self.outcome.is_some()));

        write_actor(&mut hasher, &self.player);
        for (_, enemy) in self.world.enemies() {
            write_actor(&mut hasher, enemy);
        }
        for cell in self.world.board.cells() {
            hasher.write_u8(cell.tile as u8);
            hasher.write_u8(cell.tag as u8);
            hasher.write_u8(cell.visibility as u8);
            hasher.write_u8(u8::from(cell.has_actor));
        }
        for at in &self.combat_queue {
            write_pos(&mut hasher, *at);
        }
        for item in &self.inventory.temp {
            hasher.write(item.id.as_bytes());
            hasher.write_u32(item.level);
            hasher.write_u32(item.quantity);
        }
        hasher.finish()
    }
}

fn write_actor(hasher: &mut Xxh3, actor: &Actor) {
    write_pos(hasher, actor.pos());
    hasher.write_i32(actor.stats.hp);
    for &pos in actor.last_cells() {
        write_pos(hasher, pos);
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.y);
    hasher.write_i32(pos.x);
}
