use crate::types::{CreatureKind, Texture};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatureStats {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreaturePreset {
    pub kind: CreatureKind,
    pub stats: CreatureStats,
    pub speed: u32,
}

pub fn creature_preset(kind: CreatureKind) -> CreaturePreset {
    let (hp, attack, defense, speed) = match kind {
        CreatureKind::Player => (30, 5, 1, 10),
        CreatureKind::Skeleton => (8, 3, 0, 8),
    };
    CreaturePreset { kind, stats: CreatureStats { hp, max_hp: hp, attack, defense }, speed }
}

pub fn creature_texture(kind: CreatureKind) -> Texture {
    match kind {
        CreatureKind::Player => Texture::Player,
        CreatureKind::Skeleton => Texture::Skeleton,
    }
}
