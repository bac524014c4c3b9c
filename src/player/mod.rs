//! A stand-in player that patrols a circle around its spawn point and fights
//! whatever comes close. It drives the combat world the way a real input layer
//! would: swings gated by its own cooldown, casts gated by the spell engine.
use crate::combat::{Arena, CombatMessage, FrameOutcome};
use crate::models::*;
use crate::*;
use emberglade_shared::CombatEvent;

mod autopilot;

pub use autopilot::*;

pub fn plugin(app: &mut App) {
    app.add_systems(PreStartup, spawn_player)
        .add_systems(Update, tick_melee_cooldown.in_set(AppSystems::TickTimers))
        .add_systems(
            Update,
            (patrol, fight).chain().in_set(AppSystems::Decide),
        )
        .add_systems(
            Update,
            (take_hits, count_kills, end_session).in_set(AppSystems::React),
        );
}

#[derive(Resource, Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    /// Yaw in radians, 0 faces +Z.
    pub yaw: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub speed: f32,
    pub spawn: Vec3,
    /// Angle along the patrol circle.
    pub patrol_angle: f32,
    pub melee_cooldown: Timer,
    pub kills: u32,
    pub deaths: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let session = &tuning.session;
        let spawn = Vec3::from(session.player_spawn);
        let mut melee_cooldown =
            Timer::from_seconds(tuning.combat.melee_cooldown, TimerMode::Once);
        // first swing is available once the timer is ticked
        let duration = melee_cooldown.duration();
        melee_cooldown.set_elapsed(duration);
        Self {
            position: spawn,
            yaw: 0.0,
            hp: session.player_hp,
            max_hp: session.player_hp,
            speed: session.player_speed,
            spawn,
            patrol_angle: 0.0,
            melee_cooldown,
            kills: 0,
            deaths: 0,
        }
    }

    pub fn can_swing(&self) -> bool {
        self.melee_cooldown.is_finished()
    }

    pub fn start_swing(&mut self) {
        self.melee_cooldown.reset();
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    /// Returns true when the hit was fatal.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.is_down()
    }

    pub fn respawn(&mut self) {
        self.position = self.spawn;
        self.hp = self.max_hp;
        self.patrol_angle = 0.0;
        self.deaths += 1;
    }
}

pub fn spawn_player(tuning: Res<Tuning>, mut commands: Commands) {
    let player = Player::new(&tuning);
    info!("player enters at {} with {} hp", player.position, player.hp);
    commands.insert_resource(player);
}

fn tick_melee_cooldown(time: Res<Time>, mut player: ResMut<Player>) {
    player.melee_cooldown.tick(time.delta());
}

pub fn take_hits(outcome: Res<FrameOutcome>, mut player: ResMut<Player>) {
    let hit = &outcome.player_hit;
    if !hit.hit() {
        return;
    }
    debug!(
        "player took {} from {} attacker(s), {} hp left",
        hit.damage,
        hit.attackers.len(),
        player.hp.saturating_sub(hit.damage)
    );
    if player.take_damage(hit.damage) {
        warn!("player down after {} kills, respawning at {}", player.kills, player.spawn);
        player.respawn();
    }
}

pub fn count_kills(mut messages: MessageReader<CombatMessage>, mut player: ResMut<Player>) {
    let kills = messages
        .read()
        .filter(|m| matches!(m.0, CombatEvent::Died { .. }))
        .count();
    player.kills += kills as u32;
}

pub fn end_session(
    time: Res<Time>,
    tuning: Res<Tuning>,
    player: Res<Player>,
    arena: Res<Arena>,
    mut exit: MessageWriter<AppExit>,
) {
    if time.elapsed_secs() < tuning.session.duration_secs {
        return;
    }
    let boss = if arena.registry().boss().is_some_and(|b| !b.is_dead()) {
        "standing"
    } else {
        "slain"
    };
    info!(
        "session over after {:.0}s: {} kills, {} deaths, boss {boss}",
        time.elapsed_secs(),
        player.kills,
        player.deaths
    );
    exit.write(AppExit::Success);
}
