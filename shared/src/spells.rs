//! Spell/Projectile Engine.
//!
//! Two spells: a travelling frostbolt and an instant frost nova centered on
//! the caster. Both deal damage and apply a timed slow that freezes the
//! target until an absolute deadline.

use crate::config::{CombatPreset, SpellsPreset};
use crate::events::{CombatEvent, DamageSource};
use crate::math::{PlanarExt, direction_from, segment_sphere_hit};
use crate::monster::MonsterEntity;
use crate::registry::MonsterRegistry;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellId {
    Frostbolt,
    FrostNova,
}

impl SpellId {
    pub const ALL: [SpellId; 2] = [SpellId::Frostbolt, SpellId::FrostNova];

    pub fn as_str(self) -> &'static str {
        match self {
            SpellId::Frostbolt => "frostbolt",
            SpellId::FrostNova => "frost_nova",
        }
    }
}

impl FromStr for SpellId {
    type Err = CastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpellId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| CastError::UnknownSpell(s.to_string()))
    }
}

/// Why a cast was turned down. A rejected cast changes nothing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    #[error("unknown spell '{0}'")]
    UnknownSpell(String),
    #[error("{} is on cooldown for another {remaining:.2}s", .spell.as_str())]
    OnCooldown { spell: SpellId, remaining: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpellKind {
    Projectile {
        speed: f32,
        slow_secs: f32,
        impact_secs: f32,
    },
    Burst {
        slow_secs: f32,
        burst_secs: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpellDefinition {
    pub id: SpellId,
    pub cooldown_total: f32,
    /// Decays linearly to zero. Casting requires exactly zero.
    pub current_cooldown: f32,
    pub damage: u32,
    pub range: f32,
    pub kind: SpellKind,
}

impl SpellDefinition {
    pub fn ready(&self) -> bool {
        self.current_cooldown <= 0.0
    }

    /// 1.0 right after casting, 0.0 when ready. For cooldown sweeps on the HUD.
    pub fn cooldown_fraction(&self) -> f32 {
        if self.cooldown_total <= 0.0 {
            0.0
        } else {
            (self.current_cooldown / self.cooldown_total).clamp(0.0, 1.0)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub spell: SpellId,
    pub position: Vec3,
    /// Unit length.
    pub direction: Vec3,
    pub speed: f32,
    pub damage: u32,
    pub range: f32,
    pub traveled: f32,
    pub slow_secs: f32,
    impact_secs: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Expanding ring around the caster.
    Burst,
    /// Splash where a projectile connected.
    Impact,
}

/// Purely visual; any damage was resolved when it was created.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaEffect {
    pub kind: EffectKind,
    pub position: Vec3,
    pub radius: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl AreaEffect {
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Radius of the splash left by a frostbolt impact.
const IMPACT_RADIUS: f32 = 1.0;

#[derive(Clone, Debug)]
pub struct SpellEngine {
    spells: Vec<SpellDefinition>,
    projectiles: Vec<Projectile>,
    effects: Vec<AreaEffect>,
    cast_height: f32,
    center_height_factor: f32,
}

impl SpellEngine {
    pub fn new(spells: &SpellsPreset, combat: &CombatPreset) -> Self {
        let bolt = &spells.frostbolt;
        let nova = &spells.frost_nova;
        Self {
            spells: vec![
                SpellDefinition {
                    id: SpellId::Frostbolt,
                    cooldown_total: bolt.cooldown,
                    current_cooldown: 0.0,
                    damage: bolt.damage,
                    range: bolt.range,
                    kind: SpellKind::Projectile {
                        speed: bolt.speed,
                        slow_secs: bolt.slow_secs,
                        impact_secs: bolt.impact_secs,
                    },
                },
                SpellDefinition {
                    id: SpellId::FrostNova,
                    cooldown_total: nova.cooldown,
                    current_cooldown: 0.0,
                    damage: nova.damage,
                    range: nova.range,
                    kind: SpellKind::Burst {
                        slow_secs: nova.slow_secs,
                        burst_secs: nova.burst_secs,
                    },
                },
            ],
            projectiles: Vec::new(),
            effects: Vec::new(),
            cast_height: combat.cast_height,
            center_height_factor: combat.center_height_factor,
        }
    }

    pub fn spell(&self, id: SpellId) -> Option<&SpellDefinition> {
        self.spells.iter().find(|s| s.id == id)
    }

    pub fn spells(&self) -> &[SpellDefinition] {
        &self.spells
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn effects(&self) -> &[AreaEffect] {
        &self.effects
    }

    /// Parse `name` and cast it.
    pub fn cast_named(
        &mut self,
        name: &str,
        caster_pos: Vec3,
        yaw: f32,
        pitch: f32,
        now: f64,
        registry: &mut MonsterRegistry,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), CastError> {
        let id = name.parse()?;
        self.cast(id, caster_pos, yaw, pitch, now, registry, events)
    }

    pub fn cast(
        &mut self,
        id: SpellId,
        caster_pos: Vec3,
        yaw: f32,
        pitch: f32,
        now: f64,
        registry: &mut MonsterRegistry,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), CastError> {
        let spell = self
            .spells
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CastError::UnknownSpell(id.as_str().to_string()))?;
        if !spell.ready() {
            return Err(CastError::OnCooldown {
                spell: id,
                remaining: spell.current_cooldown,
            });
        }
        spell.current_cooldown = spell.cooldown_total;
        let (damage, range, kind) = (spell.damage, spell.range, spell.kind);

        debug!("cast {} at {caster_pos}", id.as_str());
        events.push(CombatEvent::SpellCast { spell: id, origin: caster_pos });

        match kind {
            SpellKind::Projectile {
                speed,
                slow_secs,
                impact_secs,
            } => {
                let origin = caster_pos + Vec3::Y * self.cast_height;
                let direction = direction_from(yaw, pitch);
                self.projectiles.push(Projectile {
                    spell: id,
                    position: origin,
                    direction,
                    speed,
                    damage,
                    range,
                    traveled: 0.0,
                    slow_secs,
                    impact_secs,
                });
                events.push(CombatEvent::ProjectileSpawned {
                    spell: id,
                    origin,
                    direction,
                });
            }
            SpellKind::Burst {
                slow_secs,
                burst_secs,
            } => {
                for m in registry.iter_mut().filter(|m| !m.is_dead()) {
                    if caster_pos.planar_distance(m.position) < range {
                        strike(m, id, damage, slow_secs, now, events);
                    }
                }
                self.spawn_effect(EffectKind::Burst, caster_pos, range, burst_secs, events);
            }
        }
        Ok(())
    }

    pub fn update(
        &mut self,
        delta: f32,
        now: f64,
        registry: &mut MonsterRegistry,
        events: &mut Vec<CombatEvent>,
    ) {
        for spell in &mut self.spells {
            spell.current_cooldown = (spell.current_cooldown - delta).max(0.0);
        }

        let center_height_factor = self.center_height_factor;
        let mut impacts = Vec::new();
        let (monsters, _) = registry.split_mut();

        self.projectiles.retain_mut(|p| {
            let p0 = p.position;
            let step = p.direction * p.speed * delta;
            let p1 = p0 + step;
            p.position = p1;
            p.traveled += step.length();

            // nearest monster along the swept segment wins
            let target = monsters
                .iter()
                .enumerate()
                .filter(|(_, m)| !m.is_dead())
                .filter_map(|(i, m)| {
                    segment_sphere_hit(p0, p1, m.hit_center(center_height_factor), m.stats.hit_radius)
                        .map(|t| (t, i))
                })
                .min_by(|a, b| a.0.total_cmp(&b.0));

            if let Some((t, i)) = target {
                strike(&mut monsters[i], p.spell, p.damage, p.slow_secs, now, events);
                impacts.push((p0 + (p1 - p0) * t, p.impact_secs));
                return false;
            }
            if p.traveled > p.range {
                events.push(CombatEvent::ProjectileExpired {
                    spell: p.spell,
                    position: p.position,
                });
                return false;
            }
            true
        });

        for (position, duration) in impacts {
            self.spawn_effect(EffectKind::Impact, position, IMPACT_RADIUS, duration, events);
        }

        self.effects.retain_mut(|e| {
            e.elapsed += delta;
            e.elapsed <= e.duration
        });
    }

    fn spawn_effect(
        &mut self,
        kind: EffectKind,
        position: Vec3,
        radius: f32,
        duration: f32,
        events: &mut Vec<CombatEvent>,
    ) {
        self.effects.push(AreaEffect {
            kind,
            position,
            radius,
            elapsed: 0.0,
            duration,
        });
        events.push(CombatEvent::EffectSpawned {
            kind,
            position,
            radius,
        });
    }
}

/// Damage plus slow, shared by bolts and bursts.
fn strike(
    m: &mut MonsterEntity,
    spell: SpellId,
    damage: u32,
    slow_secs: f32,
    now: f64,
    events: &mut Vec<CombatEvent>,
) {
    let source = DamageSource::Spell(spell);
    let died = m.apply_damage(damage);
    m.slow_until = Some(now + slow_secs as f64);
    events.push(CombatEvent::Damaged {
        id: m.id,
        amount: damage,
        hp: m.hp,
        source,
    });
    if died {
        info!("{} {} slain by {}", m.kind.as_str(), m.id, spell.as_str());
        events.push(CombatEvent::Died {
            id: m.id,
            kind: m.kind,
            source,
        });
    }
}
