//! Per-frame facade tying the registry, overlay and spell engine together.

use crate::ai::{self, PlayerHit};
use crate::combat;
use crate::config::Config;
use crate::events::CombatEvent;
use crate::registry::MonsterRegistry;
use crate::spells::{CastError, SpellEngine, SpellId};
use crate::status::StatusOverlay;
use crate::terrain::Terrain;
use glam::Vec3;

/// What the host knows at the start of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame. Clamped before use.
    pub delta: f32,
    /// Absolute time, compared against slow deadlines.
    pub now: f64,
    pub player_pos: Vec3,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// The delta actually simulated.
    pub delta: f32,
    pub player_hit: PlayerHit,
}

#[derive(Clone, Debug)]
pub struct CombatWorld {
    config: Config,
    registry: MonsterRegistry,
    overlay: StatusOverlay,
    spells: SpellEngine,
    events: Vec<CombatEvent>,
    elapsed: f32,
}

impl CombatWorld {
    pub fn new(config: Config, seed: u64) -> Self {
        let registry = MonsterRegistry::new(config.monsters.clone(), config.world.clone(), seed);
        let spells = SpellEngine::new(&config.spells, &config.combat);
        Self {
            config,
            registry,
            overlay: StatusOverlay::new(),
            spells,
            events: Vec::new(),
            elapsed: 0.0,
        }
    }

    pub fn populate(&mut self, terrain: &dyn Terrain) {
        self.registry.populate(terrain, &mut self.events);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &MonsterRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MonsterRegistry {
        &mut self.registry
    }

    pub fn overlay(&self) -> &StatusOverlay {
        &self.overlay
    }

    pub fn spells(&self) -> &SpellEngine {
        &self.spells
    }

    /// Simulated seconds since the world was created.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// One simulation frame: the overlay-wrapped AI step, respawns, then
    /// projectiles and effects.
    pub fn step(&mut self, input: FrameInput, terrain: &dyn Terrain) -> FrameReport {
        let delta = input.delta.min(self.config.world.max_frame_delta);
        self.elapsed += delta;

        let ai_preset = &self.config.ai;
        let elapsed = self.elapsed;
        let player_hit = self.overlay.update(
            &mut self.registry,
            input.now,
            &mut self.events,
            |registry, events| {
                ai::update(registry, ai_preset, delta, input.player_pos, elapsed, terrain, events)
            },
        );

        self.registry
            .tick_respawns(delta, input.player_pos, terrain, &mut self.events);
        self.spells
            .update(delta, input.now, &mut self.registry, &mut self.events);

        FrameReport { delta, player_hit }
    }

    /// Player swing. Range, damage and cooldown are the caller's.
    pub fn melee(&mut self, player_pos: Vec3, player_yaw: f32, range: f32, damage: u32) -> bool {
        combat::attack(
            &mut self.registry,
            player_pos,
            player_yaw,
            range,
            damage,
            self.config.combat.knockback,
            &mut self.events,
        )
    }

    pub fn cast(
        &mut self,
        spell: SpellId,
        caster_pos: Vec3,
        yaw: f32,
        pitch: f32,
        now: f64,
    ) -> Result<(), CastError> {
        self.spells
            .cast(spell, caster_pos, yaw, pitch, now, &mut self.registry, &mut self.events)
    }

    pub fn cast_named(
        &mut self,
        name: &str,
        caster_pos: Vec3,
        yaw: f32,
        pitch: f32,
        now: f64,
    ) -> Result<(), CastError> {
        self.spells
            .cast_named(name, caster_pos, yaw, pitch, now, &mut self.registry, &mut self.events)
    }

    /// Everything that happened since the last drain, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, CombatEvent> {
        self.events.drain(..)
    }
}
