//! Things that happened during a frame, for hosts to mirror into their scene.

use crate::monster::{MonsterId, MonsterKind};
use crate::spells::{EffectKind, SpellId};
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    Spawned {
        id: MonsterId,
        kind: MonsterKind,
        position: Vec3,
    },
    /// The entity left the registry; hosts drop its visual.
    Despawned { id: MonsterId, kind: MonsterKind },
    Damaged {
        id: MonsterId,
        amount: u32,
        hp: u32,
        source: DamageSource,
    },
    Died {
        id: MonsterId,
        kind: MonsterKind,
        source: DamageSource,
    },
    /// Swap to the iced material.
    Frozen { id: MonsterId },
    /// Restore the regular material.
    Thawed { id: MonsterId },
    SpellCast { spell: SpellId, origin: Vec3 },
    ProjectileSpawned {
        spell: SpellId,
        origin: Vec3,
        direction: Vec3,
    },
    ProjectileExpired { spell: SpellId, position: Vec3 },
    EffectSpawned {
        kind: EffectKind,
        position: Vec3,
        radius: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    Melee,
    Spell(SpellId),
}
