pub mod types;

use std::path::Path;

use tracing::info;

use crate::error::{AirbrbError, Result};
use types::Config;

/// Load YAML configuration. A missing file is not an error; every field
/// has a usable default, so a bare checkout talks to a local backend.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!(path = %path.display(), "no config file, running on defaults");
        return Ok(Config::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| AirbrbError::Config(format!("cannot read {}: {e}", path.display())))?;
    Ok(serde_yml::from_str(&raw)?)
}
