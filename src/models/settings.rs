use super::*;
use emberglade_shared::{Config, ConfigError};

pub const CONFIG_PATH: &str = "assets/config.ron";

pub fn plugin(app: &mut App) {
    // loaded at build time so Startup systems of later plugins can rely on it
    app.insert_resource(load_tuning(CONFIG_PATH));
}

/// Combat and session tuning shared by every plugin.
#[derive(Resource, Deref, Debug, Clone, Default)]
pub struct Tuning(pub Config);

impl Tuning {
    pub fn read(path: &str) -> Result<Self, ConfigError> {
        Config::read(path).map(Self)
    }
}

pub fn load_tuning(path: &str) -> Tuning {
    match Tuning::read(path) {
        Ok(tuning) => {
            info!("loaded tuning from '{path}'");
            tuning
        }
        Err(e) => {
            info!("unable to load tuning from '{path}', switching to defaults: {e}");
            Default::default()
        }
    }
}
