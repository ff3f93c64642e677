use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilewalk_engine::{
    Extent, PixelPos, TileLayout, DEFAULT_PLAYER_EXTENT_PX, DEFAULT_PLAYER_INSET_PX,
    DEFAULT_TILE_SIZE_PX, DEFAULT_VIEWPORT,
};
use tracing::info;

use super::gameplay::Variant;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config json at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("validation failed at {path}: {message}")]
    Invalid { path: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DemoConfig {
    pub(crate) variant: Variant,
    /// Relative paths resolve against the project root.
    pub(crate) level: Option<PathBuf>,
    pub(crate) viewport: Extent,
    pub(crate) layout: LayoutConfig,
    pub(crate) window_title: Option<String>,
    pub(crate) echo_frames: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            level: None,
            viewport: DEFAULT_VIEWPORT,
            layout: LayoutConfig::default(),
            window_title: None,
            echo_frames: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LayoutConfig {
    pub(crate) tile_width: i32,
    pub(crate) tile_height: i32,
    pub(crate) player_inset_x: i32,
    pub(crate) player_inset_y: i32,
    pub(crate) player_width: i32,
    pub(crate) player_height: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_SIZE_PX,
            tile_height: DEFAULT_TILE_SIZE_PX,
            player_inset_x: DEFAULT_PLAYER_INSET_PX.x,
            player_inset_y: DEFAULT_PLAYER_INSET_PX.y,
            player_width: DEFAULT_PLAYER_EXTENT_PX.width,
            player_height: DEFAULT_PLAYER_EXTENT_PX.height,
        }
    }
}

impl From<LayoutConfig> for TileLayout {
    fn from(config: LayoutConfig) -> Self {
        TileLayout {
            tile: Extent::new(config.tile_width, config.tile_height),
            player_inset: PixelPos::new(config.player_inset_x, config.player_inset_y),
            player_extent: Extent::new(config.player_width, config.player_height),
        }
    }
}

impl DemoConfig {
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&raw)?;
        info!(
            path = %path.display(),
            variant = config.variant.label(),
            "config_loaded"
        );
        Ok(config)
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let config = match serde_path_to_error::deserialize::<_, DemoConfig>(&mut deserializer) {
            Ok(config) => config,
            Err(error) => {
                let path = error.path().to_string();
                let source = error.into_inner();
                let path = if path.is_empty() { ".".to_string() } else { path };
                return Err(ConfigError::Parse {
                    path,
                    message: source.to_string(),
                });
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;
        positive("layout.tile_width", self.layout.tile_width)?;
        positive("layout.tile_height", self.layout.tile_height)?;
        Ok(())
    }

    pub(crate) fn tile_layout(&self) -> TileLayout {
        self.layout.into()
    }
}

fn positive(path: &'static str, value: i32) -> Result<(), ConfigError> {
    if value > 0 {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        path,
        message: format!("expected a positive pixel size, got {value}"),
    })
}
