//! Loot table and the run's temporary inventory.

use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::rng::random_index;

pub mod keys {
    pub const LOOT_RUSTY_SWORD: &str = "loot_rusty_sword";
    pub const LOOT_BONE_CHARM: &str = "loot_bone_charm";
    pub const LOOT_MINOR_HP_POT: &str = "loot_minor_hp_pot";
    pub const LOOT_IRON_MACE: &str = "loot_iron_mace";
    pub const LOOT_WARDING_RING: &str = "loot_warding_ring";
    pub const LOOT_MAJOR_HP_POT: &str = "loot_major_hp_pot";
    pub const LOOT_STEEL_LONGSWORD: &str = "loot_steel_longsword";
}

struct LootEntry {
    id: &'static str,
    name: &'static str,
    min_level: u32,
    base_power: i32,
}

const LOOT_TABLE: [LootEntry; 7] = [
    LootEntry { id: keys::LOOT_RUSTY_SWORD, name: "Rusty Sword", min_level: 1, base_power: 2 },
    LootEntry { id: keys::LOOT_BONE_CHARM, name: "Bone Charm", min_level: 1, base_power: 1 },
    LootEntry { id: keys::LOOT_MINOR_HP_POT, name: "Minor Health Potion", min_level: 1, base_power: 10 },
    LootEntry { id: keys::LOOT_IRON_MACE, name: "Iron Mace", min_level: 2, base_power: 4 },
    LootEntry { id: keys::LOOT_WARDING_RING, name: "Warding Ring", min_level: 3, base_power: 3 },
    LootEntry { id: keys::LOOT_MAJOR_HP_POT, name: "Major Health Potion", min_level: 3, base_power: 25 },
    LootEntry { id: keys::LOOT_STEEL_LONGSWORD, name: "Steel Longsword", min_level: 4, base_power: 6 },
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    /// Level the item was rolled on.
    pub level: u32,
    pub quantity: u32,
    pub power: i32,
}

/// Rolls one stack from the entries unlocked at `level`. Power grows by one per level past the
/// entry's unlock level.
pub fn roll_item(level: u32, quantity: u32, rng: &mut ChaCha8Rng) -> Item {
    let unlocked: Vec<&LootEntry> =
        LOOT_TABLE.iter().filter(|entry| entry.min_level <= level.max(1)).collect();
    let entry = unlocked[random_index(rng, unlocked.len())];
    let bonus = level.saturating_sub(entry.min_level) as i32;
    Item { id: entry.id, name: entry.name, level, quantity, power: entry.base_power + bonus }
}

/// Items gathered during the current run, in pickup order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub temp: Vec<Item>,
}

impl Inventory {
    pub fn push(&mut self, item: Item) {
        self.temp.push(item);
    }

    pub fn len(&self) -> usize {
        self.temp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temp.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn rolls_carry_level_and_quantity() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let item = roll_item(3, 1, &mut rng);
        assert_eq!(item.level, 3);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn low_levels_only_roll_unlocked_entries() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..100 {
            let item = roll_item(1, 1, &mut rng);
            assert!(
                [keys::LOOT_RUSTY_SWORD, keys::LOOT_BONE_CHARM, keys::LOOT_MINOR_HP_POT]
                    .contains(&item.id),
                "{} is locked at level 1",
                item.id
            );
        }
    }

    #[test]
    fn same_seed_rolls_same_item() {
        let first = roll_item(5, 2, &mut ChaCha8Rng::seed_from_u64(99));
        let second = roll_item(5, 2, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[test]
    fn inventory_keeps_pickup_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut inventory = Inventory::default();
        assert!(inventory.is_empty());
        for level in 1..=3 {
            inventory.push(roll_item(level, 1, &mut rng));
        }
        let levels: Vec<u32> = inventory.temp.iter().map(|item| item.level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert_eq!(inventory.len(), 3);
    }
}
