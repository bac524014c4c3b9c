//! Hosts the engine-agnostic [`CombatWorld`] inside the Bevy app.
//!
//! The world is stepped once per `Update` with the virtual delta and the
//! real-clock elapsed time as its absolute `now`. Everything it reports is
//! re-sent as [`CombatMessage`]s so other plugins never touch the buffer.
use crate::models::*;
use crate::player::Player;
use crate::scene::Ground;
use crate::*;
use emberglade_shared::{CombatEvent, CombatWorld, FrameInput, PlayerHit};

mod report;

pub use report::*;

pub fn plugin(app: &mut App) {
    app.add_message::<CombatMessage>()
        .init_resource::<FrameOutcome>()
        .add_systems(Startup, setup_arena)
        .add_systems(Update, step_arena.in_set(AppSystems::Simulate));

    app.add_plugins(report::plugin);
}

#[derive(Resource, Deref, DerefMut)]
pub struct Arena(pub CombatWorld);

/// One [`CombatEvent`], as seen by the rest of the app.
#[derive(Message, Deref, Debug, Clone, PartialEq)]
pub struct CombatMessage(pub CombatEvent);

/// What the latest step did to the player.
#[derive(Resource, Default, Debug, Clone)]
pub struct FrameOutcome {
    pub player_hit: PlayerHit,
    pub simulated: f32,
}

pub fn setup_arena(tuning: Res<Tuning>, ground: Res<Ground>, mut commands: Commands) {
    let mut world = CombatWorld::new(tuning.0.clone(), tuning.session.seed);
    world.populate(&*ground);
    info!(
        "arena ready: {} monsters, seed {}",
        world.registry().len(),
        tuning.session.seed
    );
    commands.insert_resource(Arena(world));
}

pub fn step_arena(
    time: Res<Time>,
    real: Res<Time<Real>>,
    ground: Res<Ground>,
    player: Res<Player>,
    mut arena: ResMut<Arena>,
    mut outcome: ResMut<FrameOutcome>,
    mut messages: MessageWriter<CombatMessage>,
) {
    let report = arena.step(
        FrameInput {
            delta: time.delta_secs(),
            now: real.elapsed_secs_f64(),
            player_pos: player.position,
        },
        &*ground,
    );
    if report.delta < time.delta_secs() {
        debug!(
            "long frame {:.3}s clamped to {:.3}s",
            time.delta_secs(),
            report.delta
        );
    }

    outcome.player_hit = report.player_hit;
    outcome.simulated = report.delta;
    messages.write_batch(arena.drain_events().map(CombatMessage));
}
