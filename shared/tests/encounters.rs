use emberglade_shared::glam::Vec3;
use emberglade_shared::{
    CastError, CombatEvent, CombatWorld, Config, FlatTerrain, FrameInput, MonsterKind,
    MonsterState, SpellId,
};

const DT: f32 = 1.0 / 60.0;

/// Frame-stepped harness with a stationary player at the origin.
struct Harness {
    world: CombatWorld,
    now: f64,
    player: Vec3,
}

impl Harness {
    fn new() -> Self {
        Self {
            world: CombatWorld::new(Config::default(), 11),
            now: 0.0,
            player: Vec3::ZERO,
        }
    }

    fn spawn(&mut self, kind: MonsterKind, at: Vec3) -> emberglade_shared::MonsterId {
        self.world.registry_mut().spawn(kind, at, &mut Vec::new())
    }

    fn step(&mut self) -> emberglade_shared::FrameReport {
        self.now += DT as f64;
        self.world.step(
            FrameInput {
                delta: DT,
                now: self.now,
                player_pos: self.player,
            },
            &FlatTerrain(0.0),
        )
    }

    fn cast(&mut self, spell: SpellId, yaw: f32) -> Result<(), CastError> {
        self.world.cast(spell, self.player, yaw, 0.0, self.now)
    }
}

#[test]
fn nova_pins_a_chasing_goblin_until_the_deadline() {
    let mut h = Harness::new();
    let id = h.spawn(MonsterKind::Goblin, Vec3::new(0.0, 0.0, 6.0));
    h.step();
    assert_eq!(h.world.registry().get(id).unwrap().state, MonsterState::Chase);

    h.cast(SpellId::FrostNova, 0.0).unwrap();
    let slow_until = h.world.registry().get(id).unwrap().slow_until.unwrap();
    let anchor = h.world.registry().get(id).unwrap().position;

    while h.now + (DT as f64) < slow_until {
        h.step();
        let p = h.world.registry().get(id).unwrap().position;
        assert_eq!((p.x, p.z), (anchor.x, anchor.z), "moved while frozen at {}", h.now);
        assert!(h.world.overlay().is_frozen(id));
    }

    // past the deadline the chase resumes
    h.step();
    h.step();
    let p = h.world.registry().get(id).unwrap().position;
    assert!(p.z < anchor.z);
    assert!(!h.world.overlay().is_frozen(id));

    let events: Vec<_> = h.world.drain_events().collect();
    assert!(events.contains(&CombatEvent::Frozen { id }));
    assert!(events.contains(&CombatEvent::Thawed { id }));
}

#[test]
fn frozen_monster_still_attacks_in_place() {
    let mut h = Harness::new();
    let id = h.spawn(MonsterKind::Skeleton, Vec3::new(0.0, 0.0, 1.5));
    h.cast(SpellId::FrostNova, 0.0).unwrap();
    let report = h.step();
    assert!(h.world.overlay().is_frozen(id));
    assert_eq!(h.world.registry().get(id).unwrap().state, MonsterState::Attack);
    assert!(report.player_hit.hit());
    assert_eq!(report.player_hit.damage, 7);
}

#[test]
fn frostbolt_kill_then_corpse_removal_then_single_respawn() {
    let mut h = Harness::new();
    // chases straight down the bolt's path
    let id = h.spawn(MonsterKind::Goblin, Vec3::new(0.0, 0.0, 10.0));
    h.world.registry_mut().get_mut(id).unwrap().hp = 10;

    h.cast(SpellId::Frostbolt, 0.0).unwrap();
    assert_eq!(
        h.cast(SpellId::Frostbolt, 0.0),
        Err(CastError::OnCooldown {
            spell: SpellId::Frostbolt,
            remaining: Config::default().spells.frostbolt.cooldown,
        })
    );

    let mut frames = 0;
    while !h.world.registry().get(id).unwrap().is_dead() {
        h.step();
        frames += 1;
        assert!(frames < 120, "bolt never landed");
    }
    assert_eq!(h.world.registry().get(id).unwrap().hp, 0);
    assert!(h.world.spells().projectiles().is_empty());

    let corpse = Config::default().monsters.goblin.corpse_secs;
    let respawn = Config::default().world.respawn_delay;
    let mut gone_at = None;
    let mut spawns = 0;
    for _ in 0..((corpse + respawn + 2.0) / DT) as usize {
        h.step();
        for e in h.world.drain_events() {
            match e {
                CombatEvent::Despawned { id: gone, .. } if gone == id => gone_at = Some(h.now),
                CombatEvent::Spawned { .. } => spawns += 1,
                _ => {}
            }
        }
    }
    assert!(gone_at.is_some());
    assert_eq!(spawns, 1);
    assert_eq!(h.world.registry().len(), 1);
}

#[test]
fn slain_boss_stays_gone() {
    let mut h = Harness::new();
    let boss = h.spawn(MonsterKind::Troll, Vec3::new(0.0, 0.0, 3.0));
    let mut swings = 0;
    while !h.world.registry().get(boss).unwrap().is_dead() {
        assert!(h.world.melee(h.player, 0.0, 10.0, 100));
        swings += 1;
        assert!(swings <= 3);
    }
    for _ in 0..(30.0 / DT) as usize {
        h.step();
    }
    assert!(h.world.registry().is_empty());
    assert_eq!(h.world.registry().pending_respawns(), 0);
}

#[test]
fn nova_on_cooldown_spares_a_pack_at_point_blank() {
    let mut h = Harness::new();
    h.cast(SpellId::FrostNova, 0.0).unwrap();
    h.step();
    let pack = [
        h.spawn(MonsterKind::Goblin, Vec3::new(1.0, 0.0, 1.0)),
        h.spawn(MonsterKind::Wolf, Vec3::new(-2.0, 0.0, 0.0)),
    ];
    h.world.drain_events().for_each(drop);

    assert!(matches!(
        h.cast(SpellId::FrostNova, 0.0),
        Err(CastError::OnCooldown { .. })
    ));
    let events: Vec<_> = h.world.drain_events().collect();
    assert!(events.is_empty());
    for id in pack {
        let m = h.world.registry().get(id).unwrap();
        assert_eq!(m.hp, m.max_hp);
        assert!(m.slow_until.is_none());
        assert!(!h.world.overlay().is_frozen(id));
    }
}

#[test]
fn unknown_spell_name_is_a_no_op() {
    let mut h = Harness::new();
    h.spawn(MonsterKind::Goblin, Vec3::new(0.0, 0.0, 2.0));
    h.world.drain_events().for_each(drop);
    let err = h
        .world
        .cast_named("meteor", Vec3::ZERO, 0.0, 0.0, 0.0)
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown spell 'meteor'");
    assert_eq!(h.world.drain_events().count(), 0);
    assert!(h.world.spells().spells().iter().all(|s| s.ready()));
}

#[test]
fn populated_world_runs_a_minute_without_losing_invariants() {
    let mut h = Harness::new();
    h.world.populate(&FlatTerrain(0.0));
    for frame in 0..3600 {
        if frame % 30 == 0 {
            let _ = h.cast(SpellId::Frostbolt, (frame as f32 * 0.1).sin());
            let _ = h.cast(SpellId::FrostNova, 0.0);
            h.world.melee(h.player, 0.0, 3.0, 12);
        }
        h.step();
        for m in h.world.registry().iter() {
            assert!(m.hp <= m.max_hp);
            assert_eq!(m.hp == 0, m.state == MonsterState::Dead);
            assert!((0.0..=1.0).contains(&m.scale));
        }
        assert!(h.world.registry().iter().filter(|m| m.is_boss()).count() <= 1);
    }
}
