use bevy::prelude::*;

mod settings;

pub use settings::*;

pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (
            AppSystems::TickTimers,
            AppSystems::Decide,
            AppSystems::Simulate,
            AppSystems::React,
        )
            .chain(),
    );

    app.add_plugins(settings::plugin);
}

/// High-level groupings of systems for the app in the [`Update`] schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum AppSystems {
    /// Tick timers.
    TickTimers,
    /// Player swings and casts, queued into the combat world.
    Decide,
    /// Step the combat world.
    Simulate,
    /// Consume the frame's outcome: damage, logs, session end.
    React,
}
