// SPDX-License-Identifier: GPL-3.0-only

//! Persisted render configuration

use crate::errors::GlResult;
use crate::shaders::{ColorAdjustment, YuvConversion};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings an embedding renderer keeps between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Scalers and conversion method
    pub conversion: YuvConversion,
    /// Brightness, contrast, hue, saturation and gammas
    pub adjustment: ColorAdjustment,
    /// Rows per texture upload, 0 uploads whole frames
    pub slice_height: i32,
    /// Use rectangle textures instead of power-of-two 2D textures
    pub rectangle_textures: bool,
    /// Extension names to add to what the driver reports
    pub extra_extensions: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            conversion: YuvConversion::default(),
            adjustment: ColorAdjustment::NEUTRAL,
            slice_height: 0,
            rectangle_textures: false,
            extra_extensions: None,
        }
    }
}

impl RenderConfig {
    /// `<config dir>/glyuv/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("glyuv").join("config.json"))
    }

    /// Read `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> GlResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Like [`RenderConfig::load`], falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Write to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> GlResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }
}
