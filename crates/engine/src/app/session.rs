use tracing::{debug, info};

use crate::content::{GridPos, LevelError, LevelGrid};

use super::camera::{Camera, CameraOffset, Extent};
use super::input::{Direction, Step};
use super::movement::{build_resolver, MoveError, MoveResolver, MovementPolicy, ResolvedMove};
use super::rendering::{Sprite, SpriteKind, TileLayout};

pub const DEFAULT_VIEWPORT: Extent = Extent::new(300, 300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub policy: MovementPolicy,
    pub camera_enabled: bool,
    pub layout: TileLayout,
    pub viewport: Extent,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            policy: MovementPolicy::Bounded,
            camera_enabled: true,
            layout: TileLayout::default(),
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

/// One player on one map. Owns its grid, position, and camera; sessions
/// never share state.
pub struct Session {
    config: SessionConfig,
    resolver: Box<dyn MoveResolver>,
    player: GridPos,
    camera: Camera,
}

impl Session {
    pub fn start(config: SessionConfig, source: LevelGrid) -> Result<Self, LevelError> {
        let player = source.find_player_start()?;
        let (width, height) = (source.width(), source.height());
        let resolver = build_resolver(config.policy, source, player)?;
        let mut session = Self {
            config,
            resolver,
            player,
            camera: Camera::default(),
        };
        session.refresh_camera();
        info!(
            policy = config.policy.label(),
            camera_enabled = config.camera_enabled,
            width,
            height,
            player = %player,
            "session_started"
        );
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn policy(&self) -> MovementPolicy {
        self.resolver.policy()
    }

    pub fn player(&self) -> GridPos {
        self.player
    }

    pub fn grid(&self) -> &LevelGrid {
        self.resolver.grid()
    }

    pub fn step(&mut self, direction: Direction) -> Result<ResolvedMove, MoveError> {
        self.request(direction.step())
    }

    /// Applies a raw step. Rejected steps leave the session untouched.
    pub fn request(&mut self, step: Step) -> Result<ResolvedMove, MoveError> {
        let resolved = self.resolver.resolve(self.player, step)?;
        self.player = resolved.position;
        Ok(resolved)
    }

    /// Recenters the camera on the player sprite. Always zero when the camera
    /// is disabled.
    pub fn refresh_camera(&mut self) -> CameraOffset {
        if !self.config.camera_enabled {
            return CameraOffset::default();
        }
        let layout = self.config.layout;
        let offset = self.camera.update(
            layout.player_origin_px(self.player),
            layout.player_extent,
            self.config.viewport,
        );
        debug!(dx = offset.dx, dy = offset.dy, "camera_updated");
        offset
    }

    pub fn camera_offset(&self) -> CameraOffset {
        if self.config.camera_enabled {
            self.camera.offset()
        } else {
            CameraOffset::default()
        }
    }

    /// Tiles in row-major order followed by the player, in world pixels.
    pub fn sprites(&self) -> Vec<Sprite> {
        let layout = self.config.layout;
        let grid = self.grid();
        let mut sprites = Vec::with_capacity(grid.width() * grid.height() + 1);
        sprites.extend(grid.cells().map(|(pos, kind)| Sprite {
            kind: SpriteKind::Tile(kind),
            origin: layout.tile_origin_px(pos),
            extent: layout.tile,
        }));
        sprites.push(Sprite {
            kind: SpriteKind::Player,
            origin: layout.player_origin_px(self.player),
            extent: layout.player_extent,
        });
        sprites
    }
}
