use crate::config::Settings;
use crate::error::{Error, Result};

fn try_load() -> Result<Settings> {
    let settings = Settings::load()?;
    settings
        .validate()
        .map_err(|msg| Error::Config(::config::ConfigError::Message(msg)))?;
    Ok(settings)
}

/// Settings from disk and environment, or the defaults plus the reason they
/// could not be loaded. Configuration is optional and never stops a run.
pub fn load_settings() -> (Settings, Option<Error>) {
    match try_load() {
        Ok(s) => (s, None),
        Err(e) => (Settings::default(), Some(e)),
    }
}
