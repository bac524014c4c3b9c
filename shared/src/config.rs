//! Tuning presets, loaded from RON.
//!
//! Every section has a `Default` so a config file only needs to name the
//! values it overrides.

use crate::combat::defaults;
use crate::monster::MonsterKind;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monsters: MonstersPreset,
    pub spells: SpellsPreset,
    pub ai: AiPreset,
    pub combat: CombatPreset,
    pub world: WorldPreset,
    pub session: SessionPreset,
}

impl Config {
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: Config = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in MonsterKind::ALL {
            let m = self.monsters.get(kind);
            let positive = [
                ("size", m.size),
                ("speed", m.speed),
                ("aggro_range", m.aggro_range),
                ("attack_range", m.attack_range),
                ("hit_radius", m.hit_radius),
                ("corpse_secs", m.corpse_secs),
            ];
            for (name, value) in positive {
                if value <= 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "{kind:?}.{name} must be positive, got {value}"
                    )));
                }
            }
            if m.hp == 0 {
                return Err(ConfigError::Invalid(format!("{kind:?}.hp must be non-zero")));
            }
            if m.attack_range >= m.aggro_range {
                return Err(ConfigError::Invalid(format!(
                    "{kind:?}.attack_range must be below aggro_range"
                )));
            }
        }

        let boss = &self.monsters.troll;
        if MonsterKind::NORMAL
            .iter()
            .any(|k| self.monsters.get(*k).aggro_range >= boss.aggro_range)
        {
            return Err(ConfigError::Invalid(
                "boss aggro_range must exceed every normal kind".into(),
            ));
        }

        let bolt = &self.spells.frostbolt;
        let nova = &self.spells.frost_nova;
        if bolt.range <= 0.0 || bolt.speed <= 0.0 || nova.range <= 0.0 {
            return Err(ConfigError::Invalid("spell range and speed must be positive".into()));
        }
        if self.world.spawn_radius_min > self.world.spawn_radius_max {
            return Err(ConfigError::Invalid(
                "spawn_radius_min must not exceed spawn_radius_max".into(),
            ));
        }
        if self.world.respawn_min_player_distance > self.world.spawn_radius_max {
            return Err(ConfigError::Invalid(
                "respawn_min_player_distance must not exceed spawn_radius_max".into(),
            ));
        }
        if self.world.max_frame_delta <= 0.0 {
            return Err(ConfigError::Invalid("max_frame_delta must be positive".into()));
        }
        Ok(())
    }
}

// ============================================================================
// MONSTERS
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterPreset {
    pub hp: u32,
    pub damage: u32,
    pub size: f32,
    pub speed: f32,
    pub aggro_range: f32,
    pub attack_range: f32,
    /// Seconds between landed attacks.
    pub attack_interval: f32,
    /// Projectile hit sphere radius.
    pub hit_radius: f32,
    /// How long the corpse lingers before removal.
    pub corpse_secs: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MonstersPreset {
    pub goblin: MonsterPreset,
    pub wolf: MonsterPreset,
    pub skeleton: MonsterPreset,
    pub troll: MonsterPreset,
}

impl MonstersPreset {
    pub fn get(&self, kind: MonsterKind) -> &MonsterPreset {
        match kind {
            MonsterKind::Goblin => &self.goblin,
            MonsterKind::Wolf => &self.wolf,
            MonsterKind::Skeleton => &self.skeleton,
            MonsterKind::Troll => &self.troll,
        }
    }
}

impl Default for MonstersPreset {
    fn default() -> Self {
        Self {
            goblin: MonsterKind::Goblin.default_preset(),
            wolf: MonsterKind::Wolf.default_preset(),
            skeleton: MonsterKind::Skeleton.default_preset(),
            troll: MonsterKind::Troll.default_preset(),
        }
    }
}

// ============================================================================
// SPELLS
// ============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellsPreset {
    pub frostbolt: FrostboltPreset,
    pub frost_nova: FrostNovaPreset,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FrostboltPreset {
    pub cooldown: f32,
    pub damage: u32,
    pub range: f32,
    pub speed: f32,
    pub slow_secs: f32,
    /// Lifetime of the impact splash.
    pub impact_secs: f32,
}

impl Default for FrostboltPreset {
    fn default() -> Self {
        Self {
            cooldown: 1.0,
            damage: 15,
            range: 30.0,
            speed: 25.0,
            slow_secs: 2.0,
            impact_secs: 0.4,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FrostNovaPreset {
    pub cooldown: f32,
    pub damage: u32,
    pub range: f32,
    pub slow_secs: f32,
    /// Lifetime of the expanding ring.
    pub burst_secs: f32,
}

impl Default for FrostNovaPreset {
    fn default() -> Self {
        Self {
            cooldown: 8.0,
            damage: 10,
            range: 8.0,
            slow_secs: 3.0,
            burst_secs: 0.6,
        }
    }
}

// ============================================================================
// BEHAVIOUR
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AiPreset {
    /// Facing smoothing rate while aggroed.
    pub turn_rate: f32,
    /// Facing smoothing rate while wandering.
    pub wander_turn_rate: f32,
    pub wander_interval: f32,
    pub wander_radius: f32,
    pub wander_speed: f32,
    /// Wanderers stop once this close to their target.
    pub arrive_distance: f32,
    pub ground_follow_rate: f32,
    pub sink_speed: f32,
}

impl Default for AiPreset {
    fn default() -> Self {
        Self {
            turn_rate: 8.0,
            wander_turn_rate: 3.0,
            wander_interval: 4.0,
            wander_radius: 5.0,
            wander_speed: 1.0,
            arrive_distance: 0.2,
            ground_follow_rate: 10.0,
            sink_speed: 0.5,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatPreset {
    pub knockback: f32,
    pub melee_range: f32,
    pub melee_damage: u32,
    /// Owned by the caller; melee resolution itself never gates on it.
    pub melee_cooldown: f32,
    /// Spell origin height above the caster's feet.
    pub cast_height: f32,
    /// Hit sphere center height as a fraction of monster size.
    pub center_height_factor: f32,
}

impl Default for CombatPreset {
    fn default() -> Self {
        Self {
            knockback: defaults::KNOCKBACK,
            melee_range: defaults::MELEE_RANGE,
            melee_damage: defaults::MELEE_DAMAGE,
            melee_cooldown: defaults::MELEE_COOLDOWN_SECS,
            cast_height: defaults::CAST_HEIGHT,
            center_height_factor: defaults::CENTER_HEIGHT_FACTOR,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldPreset {
    pub initial_monsters: u32,
    pub spawn_radius_min: f32,
    pub spawn_radius_max: f32,
    pub boss_position: (f32, f32),
    pub respawn_delay: f32,
    pub respawn_min_player_distance: f32,
    /// Ceiling applied to every frame's delta.
    pub max_frame_delta: f32,
}

impl Default for WorldPreset {
    fn default() -> Self {
        Self {
            initial_monsters: 12,
            spawn_radius_min: 15.0,
            spawn_radius_max: 60.0,
            boss_position: (0.0, 70.0),
            respawn_delay: 10.0,
            respawn_min_player_distance: 20.0,
            max_frame_delta: defaults::MAX_FRAME_DELTA,
        }
    }
}

/// Host-side session parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPreset {
    pub seed: u64,
    pub duration_secs: f32,
    pub player_spawn: (f32, f32, f32),
    pub player_hp: u32,
    pub player_speed: f32,
    /// Radius of the autopilot's patrol circuit.
    pub patrol_radius: f32,
    pub status_interval: f32,
}

impl Default for SessionPreset {
    fn default() -> Self {
        Self {
            seed: 7,
            duration_secs: 120.0,
            player_spawn: (0.0, 0.0, 0.0),
            player_hp: 200,
            player_speed: 5.0,
            patrol_radius: 30.0,
            status_interval: 5.0,
        }
    }
}
