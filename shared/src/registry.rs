//! Monster Registry: the single owner of every live monster.

use crate::config::{MonstersPreset, WorldPreset};
use crate::events::CombatEvent;
use crate::monster::{MonsterEntity, MonsterId, MonsterKind};
use crate::rng::SimRng;
use crate::terrain::Terrain;
use glam::{Vec2, Vec3};
use tracing::{debug, info};

/// Tries per respawn to find a point far enough from the player.
const RESPAWN_PLACEMENT_TRIES: usize = 8;

#[derive(Clone, Debug)]
pub struct MonsterRegistry {
    monsters: Vec<MonsterEntity>,
    next_id: u32,
    /// Seconds left on each scheduled respawn.
    pending_respawns: Vec<f32>,
    presets: MonstersPreset,
    world: WorldPreset,
    pub(crate) rng: SimRng,
}

impl MonsterRegistry {
    pub fn new(presets: MonstersPreset, world: WorldPreset, seed: u64) -> Self {
        Self {
            monsters: Vec::new(),
            next_id: 1,
            pending_respawns: Vec::new(),
            presets,
            world,
            rng: SimRng::seeded(seed),
        }
    }

    /// Scatter the opening population and place the boss.
    pub fn populate(&mut self, terrain: &dyn Terrain, events: &mut Vec<CombatEvent>) {
        for _ in 0..self.world.initial_monsters {
            let kind = self.random_normal_kind();
            let p = self
                .rng
                .point_in_ring(self.world.spawn_radius_min, self.world.spawn_radius_max);
            self.spawn(kind, ground(terrain, p), events);
        }
        let (bx, bz) = self.world.boss_position;
        let boss = self.spawn(MonsterKind::Troll, ground(terrain, Vec2::new(bx, bz)), events);
        info!("boss {boss} waiting at ({bx:.1}, {bz:.1})");
    }

    pub fn spawn(
        &mut self,
        kind: MonsterKind,
        position: Vec3,
        events: &mut Vec<CombatEvent>,
    ) -> MonsterId {
        let id = MonsterId(self.next_id);
        self.next_id += 1;
        let stats = self.presets.get(kind).clone();
        self.monsters.push(MonsterEntity::new(id, kind, stats, position));
        debug!("spawned {} {id} at {position}", kind.as_str());
        events.push(CombatEvent::Spawned { id, kind, position });
        id
    }

    pub fn get(&self, id: MonsterId) -> Option<&MonsterEntity> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: MonsterId) -> Option<&mut MonsterEntity> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    pub fn contains(&self, id: MonsterId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonsterEntity> {
        self.monsters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MonsterEntity> {
        self.monsters.iter_mut()
    }

    /// Entities that are not dead.
    pub fn live(&self) -> impl Iterator<Item = &MonsterEntity> {
        self.monsters.iter().filter(|m| !m.is_dead())
    }

    pub fn boss(&self) -> Option<&MonsterEntity> {
        self.monsters.iter().find(|m| m.is_boss())
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    /// Monsters and the RNG borrowed together, for per-entity passes that roll dice.
    pub(crate) fn split_mut(&mut self) -> (&mut [MonsterEntity], &mut SimRng) {
        (&mut self.monsters, &mut self.rng)
    }

    pub fn pending_respawns(&self) -> usize {
        self.pending_respawns.len()
    }

    /// Remove corpses whose timer ran out. Each removed normal monster
    /// schedules exactly one respawn; the boss is gone for good.
    pub fn prune_expired(&mut self, events: &mut Vec<CombatEvent>) -> usize {
        let mut removed = Vec::new();
        self.monsters.retain(|m| {
            let expired = m.is_dead() && m.death_time > m.stats.corpse_secs;
            if expired {
                removed.push((m.id, m.kind));
            }
            !expired
        });

        for &(id, kind) in &removed {
            events.push(CombatEvent::Despawned { id, kind });
            if kind.is_boss() {
                info!("boss {id} removed, it will not return");
            } else {
                self.pending_respawns.push(self.world.respawn_delay);
                debug!("{} {id} removed, respawn in {:.1}s", kind.as_str(), self.world.respawn_delay);
            }
        }
        removed.len()
    }

    /// Count down scheduled respawns and spawn the ones that came due.
    pub fn tick_respawns(
        &mut self,
        delta: f32,
        player_pos: Vec3,
        terrain: &dyn Terrain,
        events: &mut Vec<CombatEvent>,
    ) {
        let mut due = 0;
        self.pending_respawns.retain_mut(|left| {
            *left -= delta;
            if *left <= 0.0 {
                due += 1;
                false
            } else {
                true
            }
        });

        for _ in 0..due {
            let kind = self.random_normal_kind();
            let p = self.respawn_point(player_pos);
            self.spawn(kind, ground(terrain, p), events);
        }
    }

    fn random_normal_kind(&mut self) -> MonsterKind {
        MonsterKind::NORMAL[self.rng.pick(MonsterKind::NORMAL.len())]
    }

    fn respawn_point(&mut self, player_pos: Vec3) -> Vec2 {
        let player = Vec2::new(player_pos.x, player_pos.z);
        let min_gap = self.world.respawn_min_player_distance;
        for _ in 0..RESPAWN_PLACEMENT_TRIES {
            let candidate = self
                .rng
                .point_in_ring(self.world.spawn_radius_min, self.world.spawn_radius_max);
            if candidate.distance(player) >= min_gap {
                return candidate;
            }
        }
        // outer edge of the ring, on the far side from the player
        let away = -player.normalize_or_zero();
        let away = if away == Vec2::ZERO { Vec2::Y } else { away };
        away * self.world.spawn_radius_max
    }
}

fn ground(terrain: &dyn Terrain, p: Vec2) -> Vec3 {
    Vec3::new(p.x, terrain.height(p.x, p.y), p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::FlatTerrain;

    fn registry() -> MonsterRegistry {
        MonsterRegistry::new(MonstersPreset::default(), WorldPreset::default(), 3)
    }

    fn kill(reg: &mut MonsterRegistry, id: MonsterId, dead_for: f32) {
        let m = reg.get_mut(id).unwrap();
        m.apply_damage(u32::MAX);
        m.death_time = dead_for;
    }

    #[test]
    fn populate_places_pack_and_one_boss_on_the_ground() {
        let mut reg = registry();
        let mut events = Vec::new();
        reg.populate(&FlatTerrain(2.0), &mut events);

        assert_eq!(reg.len(), WorldPreset::default().initial_monsters as usize + 1);
        assert_eq!(reg.iter().filter(|m| m.is_boss()).count(), 1);
        assert!(reg.iter().all(|m| m.position.y == 2.0));
        assert_eq!(events.len(), reg.len());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut reg = registry();
        let mut events = Vec::new();
        let a = reg.spawn(MonsterKind::Wolf, Vec3::ZERO, &mut events);
        kill(&mut reg, a, 10.0);
        reg.prune_expired(&mut events);
        let b = reg.spawn(MonsterKind::Wolf, Vec3::ZERO, &mut events);
        assert_ne!(a, b);
        assert!(!reg.contains(a));
    }

    #[test]
    fn corpse_stays_until_its_timer_is_exceeded() {
        let mut reg = registry();
        let mut events = Vec::new();
        let id = reg.spawn(MonsterKind::Goblin, Vec3::ZERO, &mut events);
        let corpse = reg.get(id).unwrap().stats.corpse_secs;

        kill(&mut reg, id, corpse);
        assert_eq!(reg.prune_expired(&mut events), 0);
        assert!(reg.contains(id));

        reg.get_mut(id).unwrap().death_time = corpse + 0.01;
        assert_eq!(reg.prune_expired(&mut events), 1);
        assert!(!reg.contains(id));
        assert_eq!(reg.pending_respawns(), 1);
    }

    #[test]
    fn removed_monster_respawns_exactly_once_after_delay() {
        let mut reg = registry();
        let mut events = Vec::new();
        let id = reg.spawn(MonsterKind::Skeleton, Vec3::ZERO, &mut events);
        kill(&mut reg, id, 100.0);
        reg.prune_expired(&mut events);
        assert!(reg.is_empty());

        let delay = WorldPreset::default().respawn_delay;
        let step = 0.5;
        let mut elapsed = 0.0;
        while elapsed + step < delay {
            reg.tick_respawns(step, Vec3::ZERO, &FlatTerrain(0.0), &mut events);
            elapsed += step;
            assert!(reg.is_empty(), "respawned early at {elapsed}");
        }
        for _ in 0..10 {
            reg.tick_respawns(step, Vec3::ZERO, &FlatTerrain(0.0), &mut events);
        }
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.pending_respawns(), 0);
        assert!(!reg.iter().next().unwrap().is_boss());
    }

    #[test]
    fn boss_never_respawns() {
        let mut reg = registry();
        let mut events = Vec::new();
        let id = reg.spawn(MonsterKind::Troll, Vec3::ZERO, &mut events);
        kill(&mut reg, id, 100.0);
        reg.prune_expired(&mut events);
        assert_eq!(reg.pending_respawns(), 0);
        for _ in 0..100 {
            reg.tick_respawns(1.0, Vec3::ZERO, &FlatTerrain(0.0), &mut events);
        }
        assert!(reg.is_empty());
        assert!(events.contains(&CombatEvent::Despawned { id, kind: MonsterKind::Troll }));
    }

    #[test]
    fn crowded_ring_falls_back_to_the_far_edge() {
        let world = WorldPreset {
            spawn_radius_min: 15.0,
            spawn_radius_max: 16.0,
            respawn_min_player_distance: 16.0,
            ..WorldPreset::default()
        };
        let mut reg = MonsterRegistry::new(MonstersPreset::default(), world, 3);
        for player in [Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(-3.0, 0.0, 12.0)] {
            for _ in 0..20 {
                let p = reg.respawn_point(player);
                assert!(p.distance(Vec2::new(player.x, player.z)) >= 16.0 - 1e-4);
                assert!(p.length() <= 16.0 + 1e-4);
            }
        }
    }

    #[test]
    fn respawns_keep_their_distance_from_the_player() {
        let mut reg = registry();
        let min_gap = WorldPreset::default().respawn_min_player_distance;
        for _ in 0..20 {
            let p = reg.respawn_point(Vec3::new(20.0, 0.0, 0.0));
            assert!(p.distance(Vec2::new(20.0, 0.0)) >= min_gap);
        }
    }
}
