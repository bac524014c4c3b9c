//! Cosmetic per-kind animation. Drives the renderer's rig, never gameplay.

use crate::monster::{MonsterKind, MonsterState};
use std::f32::consts::TAU;

/// Procedural pose offsets the renderer applies on top of the base mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// Vertical body offset.
    pub bob: f32,
    /// Limb rotation in radians, mirrored left/right by the renderer.
    pub limb_swing: f32,
    /// Forward torso tilt in radians.
    pub lean: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Rig {
    Biped,
    Quadruped,
    Brute,
}

/// Opaque animation state owned by each monster.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationHandle {
    rig: Rig,
    phase: f32,
}

impl AnimationHandle {
    pub fn for_kind(kind: MonsterKind) -> Self {
        let rig = match kind {
            MonsterKind::Goblin | MonsterKind::Skeleton => Rig::Biped,
            MonsterKind::Wolf => Rig::Quadruped,
            MonsterKind::Troll => Rig::Brute,
        };
        Self { rig, phase: 0.0 }
    }

    pub fn advance(&mut self, delta: f32, state: MonsterState, elapsed: f32) -> Pose {
        let (cadence, swing, bob) = match (self.rig, state) {
            (_, MonsterState::Dead) => return Pose::default(),
            (Rig::Biped, MonsterState::Chase) => (9.0, 0.6, 0.08),
            (Rig::Quadruped, MonsterState::Chase) => (12.0, 0.8, 0.12),
            (Rig::Brute, MonsterState::Chase) => (5.0, 0.4, 0.2),
            (Rig::Brute, MonsterState::Attack) => (3.0, 1.2, 0.05),
            (_, MonsterState::Attack) => (6.0, 1.0, 0.03),
            (_, MonsterState::Idle) => (1.5, 0.1, 0.02),
        };
        self.phase = (self.phase + cadence * delta) % TAU;

        match state {
            MonsterState::Attack => Pose {
                bob: self.phase.sin().abs() * bob,
                limb_swing: self.phase.sin() * swing,
                lean: 0.3 * self.phase.sin().max(0.0),
            },
            MonsterState::Idle => Pose {
                // breathing follows shared time so idle packs don't sync up by phase
                bob: (elapsed * 2.0 + self.phase).sin() * bob,
                limb_swing: self.phase.sin() * swing,
                lean: 0.0,
            },
            _ => Pose {
                bob: (self.phase * 2.0).sin().abs() * bob,
                limb_swing: self.phase.sin() * swing,
                lean: if self.rig == Rig::Quadruped { 0.0 } else { 0.15 },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_monsters_hold_rest_pose() {
        let mut anim = AnimationHandle::for_kind(MonsterKind::Wolf);
        anim.advance(0.1, MonsterState::Chase, 0.0);
        assert_eq!(anim.advance(0.1, MonsterState::Dead, 0.1), Pose::default());
    }

    #[test]
    fn chase_swings_limbs_harder_than_idle() {
        let mut idle = AnimationHandle::for_kind(MonsterKind::Goblin);
        let mut chase = AnimationHandle::for_kind(MonsterKind::Goblin);
        let mut idle_peak: f32 = 0.0;
        let mut chase_peak: f32 = 0.0;
        for i in 0..120 {
            let t = i as f32 / 60.0;
            idle_peak = idle_peak.max(idle.advance(1.0 / 60.0, MonsterState::Idle, t).limb_swing.abs());
            chase_peak =
                chase_peak.max(chase.advance(1.0 / 60.0, MonsterState::Chase, t).limb_swing.abs());
        }
        assert!(chase_peak > idle_peak * 2.0);
    }
}
