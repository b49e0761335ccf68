use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::BroadenError;
use crate::spectrum::BroadeningParams;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "RUSTY_IR_CONFIG";

// ---------------------------------------------------------------------------
// ViewerConfig
// ---------------------------------------------------------------------------

/// Start-up settings for the viewer. Every field is optional in the file:
///
/// ```json
/// {
///   "broadening": { "width": 8.0, "shape": "gaussian", "resolution": 1000 },
///   "normalize": true,
///   "show_sticks": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub broadening: BroadeningParams,
    /// Min-max scale every profile to `[0, 1]` before plotting.
    pub normalize: bool,
    /// Draw the discrete lines under the broadened curve.
    pub show_sticks: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            broadening: BroadeningParams::default(),
            normalize: false,
            show_sticks: true,
        }
    }
}

impl ViewerConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ViewerConfig = serde_json::from_str(&text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$RUSTY_IR_CONFIG`, or defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), BroadenError> {
        let width = self.broadening.width;
        if !width.is_finite() || width <= 0.0 {
            return Err(BroadenError::invalid(format!(
                "config width must be positive, got {width}"
            )));
        }
        if self.broadening.resolution < 1 {
            return Err(BroadenError::invalid("config resolution must be at least 1"));
        }
        Ok(())
    }
}
