use super::*;
use emberglade_shared::spells::EffectKind;
use emberglade_shared::{DamageSource, MonsterRegistry, MonsterState};

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, setup_status_timer)
        .add_systems(Update, tick_status_timer.in_set(AppSystems::TickTimers))
        .add_systems(
            Update,
            (log_combat, log_status).in_set(AppSystems::React),
        );
}

#[derive(Resource, Deref, DerefMut)]
pub struct StatusTimer(pub Timer);

fn setup_status_timer(tuning: Res<Tuning>, mut commands: Commands) {
    commands.insert_resource(StatusTimer(Timer::from_seconds(
        tuning.session.status_interval,
        TimerMode::Repeating,
    )));
}

fn tick_status_timer(time: Res<Time>, mut timer: ResMut<StatusTimer>) {
    timer.tick(time.delta());
}

pub fn log_combat(mut messages: MessageReader<CombatMessage>) {
    for message in messages.read() {
        match &message.0 {
            CombatEvent::Spawned { id, kind, position } => {
                debug!("{} {id} spawned at {position}", kind.as_str());
            }
            CombatEvent::Despawned { id, kind } => {
                debug!("{} {id} despawned", kind.as_str());
            }
            CombatEvent::Damaged {
                id,
                amount,
                hp,
                source,
            } => {
                debug!("{id} took {amount} from {} ({hp} hp left)", source_name(*source));
            }
            CombatEvent::Died { id, kind, source } => {
                info!("{} {id} died to {}", kind.as_str(), source_name(*source));
            }
            CombatEvent::Frozen { id } => debug!("{id} frozen"),
            CombatEvent::Thawed { id } => debug!("{id} thawed"),
            CombatEvent::SpellCast { spell, origin } => {
                debug!("{} cast at {origin}", spell.as_str());
            }
            CombatEvent::ProjectileSpawned { spell, .. } => {
                trace!("{} projectile away", spell.as_str());
            }
            CombatEvent::ProjectileExpired { spell, position } => {
                trace!("{} fizzled at {position}", spell.as_str());
            }
            CombatEvent::EffectSpawned {
                kind,
                position,
                radius,
            } => {
                let kind = match kind {
                    EffectKind::Burst => "burst",
                    EffectKind::Impact => "impact",
                };
                trace!("{kind} r={radius:.1} at {position}");
            }
        }
    }
}

fn source_name(source: DamageSource) -> &'static str {
    match source {
        DamageSource::Melee => "melee",
        DamageSource::Spell(spell) => spell.as_str(),
    }
}

/// Boss health for the status line, or "slain" once it is gone.
pub fn boss_summary(registry: &MonsterRegistry) -> String {
    registry.boss().map_or_else(
        || "slain".to_string(),
        |b| format!("{}/{} hp ({:.0}%)", b.hp, b.max_hp, b.health_fraction() * 100.0),
    )
}

pub fn log_status(timer: Res<StatusTimer>, arena: Res<Arena>, player: Res<Player>) {
    if !timer.just_finished() {
        return;
    }

    let registry = arena.registry();
    let count = |state: MonsterState| registry.iter().filter(|m| m.state == state).count();
    let boss = boss_summary(registry);
    info!(
        "t={:.0}s player {}/{} hp | monsters: {} idle, {} chasing, {} attacking, {} dead, {} frozen | boss {boss} | {} in flight | {} respawns pending",
        arena.elapsed(),
        player.hp,
        player.max_hp,
        count(MonsterState::Idle),
        count(MonsterState::Chase),
        count(MonsterState::Attack),
        count(MonsterState::Dead),
        arena.overlay().frozen_count(),
        arena.spells().projectiles().len(),
        registry.pending_respawns(),
    );
}
