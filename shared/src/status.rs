//! Status Effect Overlay.
//!
//! Wraps the AI step: entities whose slow is still pending are pinned to the
//! (x, z) they had when the freeze began, whatever the AI tried to do with
//! them. Attack logic still runs while frozen, so a frozen monster standing
//! next to the player keeps hitting from where it stands.
//!
//! Expiry compares against the absolute `now` the host passes in, not
//! against accumulated frame deltas.

use crate::events::CombatEvent;
use crate::monster::MonsterId;
use crate::registry::MonsterRegistry;
use glam::Vec2;
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FreezeSnapshot {
    /// (x, z) at the instant the freeze began.
    pub anchor: Vec2,
    pub since: f64,
}

#[derive(Clone, Debug, Default)]
pub struct StatusOverlay {
    frozen: HashMap<MonsterId, FreezeSnapshot>,
}

impl StatusOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self, id: MonsterId) -> bool {
        self.frozen.contains_key(&id)
    }

    pub fn snapshot(&self, id: MonsterId) -> Option<&FreezeSnapshot> {
        self.frozen.get(&id)
    }

    pub fn frozen_count(&self) -> usize {
        self.frozen.len()
    }

    /// Run `step` with freeze bookkeeping before and after it.
    pub fn update<R>(
        &mut self,
        registry: &mut MonsterRegistry,
        now: f64,
        events: &mut Vec<CombatEvent>,
        step: impl FnOnce(&mut MonsterRegistry, &mut Vec<CombatEvent>) -> R,
    ) -> R {
        for m in registry.iter() {
            let should_freeze = m.is_frozen_at(now);
            let marked = self.frozen.contains_key(&m.id);
            if should_freeze && !marked {
                self.frozen.insert(
                    m.id,
                    FreezeSnapshot {
                        anchor: Vec2::new(m.position.x, m.position.z),
                        since: now,
                    },
                );
                debug!("{} {} frozen", m.kind.as_str(), m.id);
                events.push(CombatEvent::Frozen { id: m.id });
            } else if !should_freeze && marked {
                if let Some(snap) = self.frozen.remove(&m.id) {
                    debug!("{} {} thawed after {:.2}s", m.kind.as_str(), m.id, now - snap.since);
                }
                events.push(CombatEvent::Thawed { id: m.id });
            }
        }

        let out = step(registry, events);

        for m in registry.iter_mut() {
            if let Some(snap) = self.frozen.get(&m.id) {
                m.position.x = snap.anchor.x;
                m.position.z = snap.anchor.y;
            }
        }
        // rows for entities the step pruned
        self.frozen.retain(|id, _| registry.contains(*id));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MonstersPreset, WorldPreset};
    use crate::monster::MonsterKind;
    use glam::Vec3;

    fn registry() -> MonsterRegistry {
        MonsterRegistry::new(MonstersPreset::default(), WorldPreset::default(), 2)
    }

    fn shove(reg: &mut MonsterRegistry, _: &mut Vec<CombatEvent>) {
        for m in reg.iter_mut() {
            m.position += Vec3::new(1.0, 0.5, 1.0);
        }
    }

    #[test]
    fn frozen_entities_are_pinned_in_xz_until_expiry() {
        let mut reg = registry();
        let id = reg.spawn(MonsterKind::Goblin, Vec3::new(2.0, 0.0, 3.0), &mut Vec::new());
        reg.get_mut(id).unwrap().slow_until = Some(1.0);
        let mut overlay = StatusOverlay::new();
        let mut events = Vec::new();

        for frame in 0..5 {
            overlay.update(&mut reg, frame as f64 * 0.1, &mut events, shove);
            let p = reg.get(id).unwrap().position;
            assert_eq!((p.x, p.z), (2.0, 3.0));
        }
        // height is still free to move
        assert!(reg.get(id).unwrap().position.y > 0.0);
        assert!(overlay.is_frozen(id));
        assert_eq!(overlay.snapshot(id).unwrap().since, 0.0);
        assert_eq!(events, vec![CombatEvent::Frozen { id }]);

        overlay.update(&mut reg, 1.0, &mut events, shove);
        assert!(!overlay.is_frozen(id));
        assert_eq!(events.last(), Some(&CombatEvent::Thawed { id }));
        let p = reg.get(id).unwrap().position;
        assert_eq!((p.x, p.z), (3.0, 4.0));
    }

    #[test]
    fn refreshed_slow_keeps_the_first_anchor() {
        let mut reg = registry();
        let id = reg.spawn(MonsterKind::Wolf, Vec3::ZERO, &mut Vec::new());
        reg.get_mut(id).unwrap().slow_until = Some(1.0);
        let mut overlay = StatusOverlay::new();
        let mut events = Vec::new();
        overlay.update(&mut reg, 0.0, &mut events, shove);
        reg.get_mut(id).unwrap().slow_until = Some(5.0);
        overlay.update(&mut reg, 2.0, &mut events, shove);
        let snap = overlay.snapshot(id).unwrap();
        assert_eq!(snap.anchor, Vec2::ZERO);
        assert_eq!(snap.since, 0.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn death_thaws_and_pruned_rows_are_dropped() {
        let mut reg = registry();
        let id = reg.spawn(MonsterKind::Goblin, Vec3::ZERO, &mut Vec::new());
        reg.get_mut(id).unwrap().slow_until = Some(10.0);
        let mut overlay = StatusOverlay::new();
        let mut events = Vec::new();
        overlay.update(&mut reg, 0.0, &mut events, |_, _| ());
        assert!(overlay.is_frozen(id));

        reg.get_mut(id).unwrap().apply_damage(u32::MAX);
        overlay.update(&mut reg, 0.1, &mut events, |_, _| ());
        assert!(!overlay.is_frozen(id));

        reg.get_mut(id).unwrap().slow_until = Some(10.0);
        reg.get_mut(id).unwrap().death_time = 100.0;
        overlay.update(&mut reg, 0.2, &mut events, |r, ev| {
            r.prune_expired(ev);
        });
        assert_eq!(overlay.frozen_count(), 0);
    }

    #[test]
    fn step_result_passes_through() {
        let mut reg = registry();
        let mut overlay = StatusOverlay::new();
        let n = overlay.update(&mut reg, 0.0, &mut Vec::new(), |r, _| r.len() + 41);
        assert_eq!(n, 41);
    }
}
