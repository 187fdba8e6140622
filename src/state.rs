use std::path::PathBuf;
use crate::config::{InpaintDefaults, RelayConfig};
use crate::error::RelayError;
use crate::relay::RelayClient;

// app's shared state, read-only after startup
pub struct AppState {
    pub relay: RelayClient,
    pub inpaint: InpaintDefaults, // images used when the caller sends none
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        Ok(Self {
            relay: RelayClient::new(&config)?,
            inpaint: config.inpaint,
            static_dir: config.static_dir,
        })
    }
}
