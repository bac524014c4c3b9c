//! Shared combat logic: stock constants and melee resolution.

use crate::events::{CombatEvent, DamageSource};
use crate::math::{PlanarExt, forward_from, wrap_angle};
use crate::registry::MonsterRegistry;
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;
use tracing::info;

/// Stock combat tuning, used by `Config::default()`.
pub mod defaults {
    pub const MELEE_RANGE: f32 = 3.0;
    pub const MELEE_DAMAGE: u32 = 12;
    pub const MELEE_COOLDOWN_SECS: f32 = 0.6;
    /// Displacement applied to every monster a swing connects with.
    pub const KNOCKBACK: f32 = 1.5;
    pub const CAST_HEIGHT: f32 = 1.5;
    pub const CENTER_HEIGHT_FACTOR: f32 = 0.9;
    /// Longest frame the simulation will integrate in one step.
    pub const MAX_FRAME_DELTA: f32 = 0.1;
}

/// Half-plane check on XZ: strictly inside `range` and strictly less than a
/// quarter turn off the attacker's facing. A target on the attacker's own XZ
/// point reads as bearing 0 (+Z), so it is hit only when facing roughly +Z.
pub fn frontal_hit_check(origin: Vec3, yaw: f32, target: Vec3, range: f32) -> bool {
    if origin.planar_distance(target) >= range {
        return false;
    }
    wrap_angle(origin.yaw_to(target) - yaw).abs() < FRAC_PI_2
}

/// Resolve one swing against every monster that is not already dead.
/// Cooldowns belong to the caller. Returns whether anything was hit.
pub fn attack(
    registry: &mut MonsterRegistry,
    player_pos: Vec3,
    player_yaw: f32,
    range: f32,
    damage: u32,
    knockback: f32,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let mut hit_any = false;

    for monster in registry.iter_mut().filter(|m| !m.is_dead()) {
        if !frontal_hit_check(player_pos, player_yaw, monster.position, range) {
            continue;
        }
        hit_any = true;

        let died = monster.apply_damage(damage);
        events.push(CombatEvent::Damaged {
            id: monster.id,
            amount: damage,
            hp: monster.hp,
            source: DamageSource::Melee,
        });

        // pushed away from the attacker
        let away = (monster.position - player_pos).with_y(0.0);
        let push = if away.length_squared() > 1e-6 {
            away.normalize()
        } else {
            forward_from(player_yaw)
        };
        monster.position += push * knockback;

        if died {
            info!("{} {} slain by melee", monster.kind.as_str(), monster.id);
            events.push(CombatEvent::Died {
                id: monster.id,
                kind: monster.kind,
                source: DamageSource::Melee,
            });
        }
    }

    hit_any
}
