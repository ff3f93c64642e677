mod level;
mod loader;

pub use level::{
    CellKind, GridPos, LevelError, LevelGrid, EMPTY_GLYPH, PLAYER_GLYPH, WALL_GLYPH,
};
pub use loader::{default_level_path, load_level_file, DEFAULT_LEVEL_FILE};
