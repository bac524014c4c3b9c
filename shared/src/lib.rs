//! Combat & status-effect core for Emberglade.
//!
//! Engine-agnostic: a host feeds one [`FrameInput`] per rendered frame and
//! mirrors the resulting [`CombatEvent`]s into its scene.

pub mod ai;
pub mod animation;
pub mod combat;
pub mod config;
pub mod events;
pub mod math;
pub mod monster;
pub mod registry;
pub mod rng;
pub mod spells;
pub mod status;
pub mod terrain;
pub mod world;

pub use glam;

pub use ai::PlayerHit;
pub use config::{Config, ConfigError};
pub use events::{CombatEvent, DamageSource};
pub use monster::{MonsterEntity, MonsterId, MonsterKind, MonsterState};
pub use registry::MonsterRegistry;
pub use spells::{CastError, SpellEngine, SpellId};
pub use status::StatusOverlay;
pub use terrain::{FlatTerrain, Terrain};
pub use world::{CombatWorld, FrameInput, FrameReport};
