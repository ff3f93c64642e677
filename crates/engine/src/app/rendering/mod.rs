mod renderer;
mod transform;

pub use renderer::{Frame, Sprite, SpriteKind, TextRenderer, BACKGROUND_GLYPH};
pub use transform::{
    TileLayout, DEFAULT_PLAYER_EXTENT_PX, DEFAULT_PLAYER_INSET_PX, DEFAULT_TILE_SIZE_PX,
};
