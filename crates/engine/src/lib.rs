use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
pub mod content;

pub use app::{
    apply_offset, build_resolver, center_offset, move_bounded, move_toroidal, parse_action_line,
    run_frames, ActionLine, AppError, BoundedMove, BoundedResolver, Camera, CameraOffset,
    Direction, Extent, Frame, InputAction, LoopConfig, LoopMetricsSnapshot, MoveError,
    MoveOutcome, MoveResolver, MovementPolicy, PixelPos, ResolvedMove, Session, SessionConfig,
    Sprite, SpriteKind, Step, TextRenderer, TileLayout, ToroidalMove, ToroidalResolver,
    BACKGROUND_GLYPH, DEFAULT_PLAYER_EXTENT_PX, DEFAULT_PLAYER_INSET_PX, DEFAULT_TILE_SIZE_PX,
    DEFAULT_VIEWPORT,
};
pub use content::{
    default_level_path, load_level_file, CellKind, GridPos, LevelError, LevelGrid,
    DEFAULT_LEVEL_FILE, EMPTY_GLYPH, PLAYER_GLYPH, WALL_GLYPH,
};

pub const ROOT_ENV_VAR: &str = "TILEWALK_ROOT";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub levels_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error(
        "TILEWALK_ROOT is set but does not point to a valid project root: {path}\n\
A valid root must contain Cargo.toml and either crates/ or assets/."
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "Could not detect project root by walking upward from executable directory: {start_dir}\n\
Expected a directory containing Cargo.toml and either crates/ or assets/.\n\
Set {env_var} explicitly, for example:\n\
export {env_var}=\"/path/to/tilewalk\""
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    let levels_dir = root.join("assets").join("levels");
    Ok(AppPaths { root, levels_dir })
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let raw = PathBuf::from(value);
            let normalized = normalize_path(&raw);
            if is_repo_marker(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot { path: normalized })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;

            for candidate in exe_dir.ancestors() {
                if is_repo_marker(candidate) {
                    return Ok(normalize_path(candidate));
                }
            }

            Err(StartupError::RootNotFound {
                start_dir: normalize_path(&exe_dir),
                env_var: ROOT_ENV_VAR,
            })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn is_repo_marker(path: &Path) -> bool {
    let cargo_toml = path.join("Cargo.toml").is_file();
    let has_crates = path.join("crates").is_dir();
    let has_assets = path.join("assets").is_dir();

    cargo_toml && (has_crates || has_assets)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn repo_marker_requires_cargo_toml() {
        let cwd = env::current_dir().expect("cwd");
        assert!(!is_repo_marker(&cwd.join("definitely_not_a_marker")));
    }

    #[test]
    fn repo_marker_accepts_cargo_toml_with_assets() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("Cargo.toml"), "[workspace]\n").expect("manifest");
        assert!(!is_repo_marker(temp.path()));
        fs::create_dir_all(temp.path().join("assets").join("levels")).expect("assets");
        assert!(is_repo_marker(temp.path()));
    }
}
