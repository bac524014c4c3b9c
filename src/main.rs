use bevy::{app::ScheduleRunnerPlugin, log, prelude::*};
use std::time::Duration;

pub mod combat;
pub mod models;
pub mod player;
pub mod scene;

/// Headless frame pacing.
const FRAME: Duration = Duration::from_micros(16_667);

fn main() {
    let mut app = App::new();

    // DEBUG
    // let filter = "info,emberglade=trace,emberglade_shared=trace".to_string();
    let filter = "info,emberglade=debug,emberglade_shared=info".to_string();
    let log_level = log::LogPlugin {
        level: log::Level::TRACE,
        filter,
        ..Default::default()
    };

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(FRAME)),
        log_level,
    ));

    // custom plugins. the order is important
    // be sure you use resources/types AFTER you add plugins that insert them
    app.add_plugins((
        models::plugin,
        scene::plugin,
        player::plugin,
        combat::plugin,
    ));

    app.run();
}
