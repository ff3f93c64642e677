use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::AppPaths;

use super::level::{LevelError, LevelGrid};

pub const DEFAULT_LEVEL_FILE: &str = "map.txt";

pub fn default_level_path(app_paths: &AppPaths) -> PathBuf {
    app_paths.levels_dir.join(DEFAULT_LEVEL_FILE)
}

pub fn load_level_file(path: &Path) -> Result<LevelGrid, LevelError> {
    let raw = fs::read_to_string(path).map_err(|source| LevelError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = LevelGrid::parse(&raw)?;
    info!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "level_loaded"
    );
    Ok(grid)
}
