use std::env;
use std::path::PathBuf;

use crate::autodesign::{GenerationConfig, OptimizerConfig};
use crate::models::AlbumSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub manifest_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub project_name: String,
    pub settings: AlbumSettings,
    pub generation: GenerationConfig,
    pub optimizer: OptimizerConfig,
    pub optimize: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let defaults = AlbumSettings::default();

        Ok(Config {
            manifest_path: PathBuf::from(var("ALBUM_LAYOUT_MANIFEST", "./photos.json")),
            output_path: lookup("ALBUM_LAYOUT_OUTPUT").map(PathBuf::from),
            project_name: var("ALBUM_LAYOUT_PROJECT_NAME", "Untitled Album"),
            settings: AlbumSettings {
                width: var("ALBUM_LAYOUT_PAGE_WIDTH", "12.0").parse()?,
                height: var("ALBUM_LAYOUT_PAGE_HEIGHT", "12.0").parse()?,
                bleed_size: var("ALBUM_LAYOUT_BLEED", "0.125").parse()?,
                safe_zone_size: var("ALBUM_LAYOUT_SAFE_ZONE", "0.25").parse()?,
                ..defaults
            },
            generation: GenerationConfig {
                max_photos_per_page: var("ALBUM_LAYOUT_MAX_PHOTOS_PER_PAGE", "6").parse()?,
            },
            optimizer: OptimizerConfig {
                balance_tolerance: var("ALBUM_LAYOUT_BALANCE_TOLERANCE", "1.0").parse()?,
            },
            optimize: var("ALBUM_LAYOUT_OPTIMIZE", "true").parse()?,
        })
    }
}
