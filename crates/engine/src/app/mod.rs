mod camera;
mod input;
mod loop_runner;
mod metrics;
mod movement;
mod rendering;
mod session;

pub use camera::{apply_offset, center_offset, Camera, CameraOffset, Extent, PixelPos};
pub use input::{parse_action_line, ActionLine, Direction, InputAction, Step};
pub use loop_runner::{run_frames, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use movement::{
    build_resolver, move_bounded, move_toroidal, BoundedMove, BoundedResolver, MoveError,
    MoveOutcome, MoveResolver, MovementPolicy, ResolvedMove, ToroidalMove, ToroidalResolver,
};
pub use rendering::{
    Frame, Sprite, SpriteKind, TextRenderer, TileLayout, BACKGROUND_GLYPH,
    DEFAULT_PLAYER_EXTENT_PX, DEFAULT_PLAYER_INSET_PX, DEFAULT_TILE_SIZE_PX,
};
pub use session::{Session, SessionConfig, DEFAULT_VIEWPORT};
