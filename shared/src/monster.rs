//! Monster kinds, per-entity state and the single damage path.

use crate::animation::{AnimationHandle, Pose};
use crate::config::MonsterPreset;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Goblin,
    Wolf,
    Skeleton,
    /// The boss. Exactly one per session, never respawns.
    Troll,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 4] = [
        MonsterKind::Goblin,
        MonsterKind::Wolf,
        MonsterKind::Skeleton,
        MonsterKind::Troll,
    ];
    pub const NORMAL: [MonsterKind; 3] =
        [MonsterKind::Goblin, MonsterKind::Wolf, MonsterKind::Skeleton];

    pub fn is_boss(self) -> bool {
        matches!(self, MonsterKind::Troll)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MonsterKind::Goblin => "Goblin",
            MonsterKind::Wolf => "Wolf",
            MonsterKind::Skeleton => "Skeleton",
            MonsterKind::Troll => "Troll",
        }
    }

    pub fn default_preset(self) -> MonsterPreset {
        match self {
            MonsterKind::Goblin => MonsterPreset {
                hp: 30,
                damage: 5,
                size: 1.0,
                speed: 3.0,
                aggro_range: 12.0,
                attack_range: 2.0,
                attack_interval: 1.2,
                hit_radius: 1.0,
                corpse_secs: 2.0,
            },
            MonsterKind::Wolf => MonsterPreset {
                hp: 20,
                damage: 4,
                size: 0.8,
                speed: 4.5,
                aggro_range: 14.0,
                attack_range: 1.8,
                attack_interval: 1.0,
                hit_radius: 0.9,
                corpse_secs: 2.0,
            },
            MonsterKind::Skeleton => MonsterPreset {
                hp: 40,
                damage: 7,
                size: 1.1,
                speed: 2.5,
                aggro_range: 12.0,
                attack_range: 2.2,
                attack_interval: 1.5,
                hit_radius: 1.1,
                corpse_secs: 2.0,
            },
            MonsterKind::Troll => MonsterPreset {
                hp: 300,
                damage: 20,
                size: 2.5,
                speed: 2.2,
                aggro_range: 25.0,
                attack_range: 4.0,
                attack_interval: 2.5,
                hit_radius: 2.5,
                corpse_secs: 5.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterState {
    #[default]
    Idle,
    Chase,
    Attack,
    /// Terminal.
    Dead,
}

impl MonsterState {
    pub fn as_str(self) -> &'static str {
        match self {
            MonsterState::Idle => "Idle",
            MonsterState::Chase => "Chase",
            MonsterState::Attack => "Attack",
            MonsterState::Dead => "Dead",
        }
    }
}

#[derive(Clone, Debug)]
pub struct MonsterEntity {
    pub id: MonsterId,
    pub kind: MonsterKind,
    pub stats: MonsterPreset,
    pub position: Vec3,
    /// Yaw in radians.
    pub facing: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub state: MonsterState,
    /// Seconds until the next attack may land.
    pub attack_cooldown: f32,
    /// Seconds spent dead. Zero until the entity dies.
    pub death_time: f32,
    /// Absolute time before which the entity is frozen.
    pub slow_until: Option<f64>,
    /// Uniform render scale, shrinks to zero while dead.
    pub scale: f32,
    pub(crate) wander_target: Vec3,
    pub(crate) wander_timer: f32,
    pub animation: AnimationHandle,
    pub pose: Pose,
}

impl MonsterEntity {
    pub fn new(id: MonsterId, kind: MonsterKind, stats: MonsterPreset, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            facing: 0.0,
            hp: stats.hp,
            max_hp: stats.hp,
            state: MonsterState::Idle,
            attack_cooldown: 0.0,
            death_time: 0.0,
            slow_until: None,
            scale: 1.0,
            wander_target: position,
            wander_timer: 0.0,
            animation: AnimationHandle::for_kind(kind),
            pose: Pose::default(),
            stats,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind.is_boss()
    }

    pub fn is_dead(&self) -> bool {
        self.state == MonsterState::Dead
    }

    /// Frozen iff a slow is pending and the entity is still alive.
    pub fn is_frozen_at(&self, now: f64) -> bool {
        !self.is_dead() && self.slow_until.is_some_and(|until| now < until)
    }

    pub fn health_fraction(&self) -> f32 {
        self.hp as f32 / self.max_hp.max(1) as f32
    }

    /// Subtract `amount` from hp, flooring at zero. Reaching zero moves the
    /// entity to `Dead` in the same call. Returns true on the killing blow.
    /// Dead entities ignore further damage.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            self.state = MonsterState::Dead;
            self.death_time = 0.0;
            self.attack_cooldown = 0.0;
            return true;
        }
        false
    }

    /// Center of the projectile hit sphere.
    pub fn hit_center(&self, center_height_factor: f32) -> Vec3 {
        self.position + Vec3::Y * self.stats.size * center_height_factor
    }
}
