//! Monster AI State Machine.
//!
//! Every frame each living monster picks its state from the current planar
//! distance to the player alone:
//!
//! - `d < attack_range` → `Attack`
//! - `d < aggro_range`  → `Chase`
//! - otherwise          → `Idle` (wander)
//!
//! There is no hysteresis, so a monster sitting on a boundary may flip state
//! every frame. `Dead` is entered only through damage and never left.

use crate::config::AiPreset;
use crate::events::CombatEvent;
use crate::math::{PlanarExt, smooth_angle, smooth_towards};
use crate::monster::{MonsterEntity, MonsterId, MonsterState};
use crate::registry::MonsterRegistry;
use crate::rng::SimRng;
use crate::terrain::Terrain;
use glam::Vec3;
use tracing::trace;

/// Attacks that landed on the player this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerHit {
    pub damage: u32,
    pub attackers: Vec<MonsterId>,
}

impl PlayerHit {
    pub fn hit(&self) -> bool {
        !self.attackers.is_empty()
    }
}

/// Advance every monster by `delta` seconds, then prune expired corpses.
pub fn update(
    registry: &mut MonsterRegistry,
    ai: &AiPreset,
    delta: f32,
    player_pos: Vec3,
    elapsed: f32,
    terrain: &dyn Terrain,
    events: &mut Vec<CombatEvent>,
) -> PlayerHit {
    let mut hit = PlayerHit::default();
    let (monsters, rng) = registry.split_mut();

    for m in monsters.iter_mut() {
        if m.is_dead() {
            step_dead(m, ai, delta);
        } else {
            step_alive(m, ai, delta, player_pos, rng, &mut hit);
            let ground = terrain.height(m.position.x, m.position.z);
            m.position.y = smooth_towards(m.position.y, ground, ai.ground_follow_rate, delta);
        }
        m.pose = m.animation.advance(delta, m.state, elapsed);
    }

    registry.prune_expired(events);
    hit
}

fn step_alive(
    m: &mut MonsterEntity,
    ai: &AiPreset,
    delta: f32,
    player_pos: Vec3,
    rng: &mut SimRng,
    hit: &mut PlayerHit,
) {
    let d = m.position.planar_distance(player_pos);
    m.attack_cooldown = (m.attack_cooldown - delta).max(0.0);

    if d < m.stats.aggro_range {
        let target = m.position.yaw_to(player_pos);
        m.facing = smooth_angle(m.facing, target, ai.turn_rate, delta);

        if d < m.stats.attack_range {
            m.state = MonsterState::Attack;
            if m.attack_cooldown <= 0.0 {
                hit.damage += m.stats.damage;
                hit.attackers.push(m.id);
                m.attack_cooldown = m.stats.attack_interval;
                trace!("{} {} lands {} damage", m.kind.as_str(), m.id, m.stats.damage);
            }
        } else {
            m.state = MonsterState::Chase;
            let dir = (player_pos - m.position).with_y(0.0).normalize_or_zero();
            m.position += dir * m.stats.speed * delta;
        }
    } else {
        m.state = MonsterState::Idle;
        wander(m, ai, delta, rng);
    }
}

fn wander(m: &mut MonsterEntity, ai: &AiPreset, delta: f32, rng: &mut SimRng) {
    m.wander_timer -= delta;
    if m.wander_timer <= 0.0 {
        m.wander_timer = ai.wander_interval;
        let offset = rng.point_in_disc(ai.wander_radius);
        m.wander_target = m.position + Vec3::new(offset.x, 0.0, offset.y);
    }

    let to = (m.wander_target - m.position).with_y(0.0);
    let dist = to.length();
    if dist > ai.arrive_distance {
        let step = (ai.wander_speed * delta).min(dist);
        m.position += to / dist * step;
        m.facing = smooth_angle(m.facing, to.x.atan2(to.z), ai.wander_turn_rate, delta);
    }
}

fn step_dead(m: &mut MonsterEntity, ai: &AiPreset, delta: f32) {
    m.death_time += delta;
    m.position.y -= ai.sink_speed * delta;
    m.scale = (1.0 - m.death_time / m.stats.corpse_secs).max(0.0);
}
