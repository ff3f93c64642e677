use crate::app::camera::{apply_offset, CameraOffset, Extent, PixelPos};
use crate::content::GridPos;

pub const DEFAULT_TILE_SIZE_PX: i32 = 50;
pub const DEFAULT_PLAYER_INSET_PX: PixelPos = PixelPos::new(15, 5);
pub const DEFAULT_PLAYER_EXTENT_PX: Extent = Extent::new(20, 40);

/// Pixel placement of grid cells and of the player sprite inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    pub tile: Extent,
    pub player_inset: PixelPos,
    pub player_extent: Extent,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            tile: Extent::new(DEFAULT_TILE_SIZE_PX, DEFAULT_TILE_SIZE_PX),
            player_inset: DEFAULT_PLAYER_INSET_PX,
            player_extent: DEFAULT_PLAYER_EXTENT_PX,
        }
    }
}

impl TileLayout {
    pub fn tile_origin_px(&self, pos: GridPos) -> PixelPos {
        PixelPos {
            x: self.tile.width.saturating_mul(pos.x),
            y: self.tile.height.saturating_mul(pos.y),
        }
    }

    pub fn player_origin_px(&self, pos: GridPos) -> PixelPos {
        let tile = self.tile_origin_px(pos);
        PixelPos {
            x: tile.x.saturating_add(self.player_inset.x),
            y: tile.y.saturating_add(self.player_inset.y),
        }
    }

    /// Character cell a sprite lands in once drawn with `offset`, using the
    /// sprite's center so partially scrolled sprites snap to one cell.
    pub fn screen_cell(
        &self,
        origin: PixelPos,
        extent: Extent,
        offset: CameraOffset,
    ) -> Option<(usize, usize)> {
        if self.tile.width <= 0 || self.tile.height <= 0 {
            return None;
        }
        let screen = apply_offset(origin, offset);
        let center_x = screen.x.saturating_add(extent.width.div_euclid(2));
        let center_y = screen.y.saturating_add(extent.height.div_euclid(2));
        let column = usize::try_from(center_x.div_euclid(self.tile.width)).ok()?;
        let row = usize::try_from(center_y.div_euclid(self.tile.height)).ok()?;
        Some((column, row))
    }

    /// Number of whole tiles that fit in `viewport` on each axis, at least one.
    pub fn cells_in(&self, viewport: Extent) -> (usize, usize) {
        let columns = if self.tile.width > 0 {
            viewport.width / self.tile.width
        } else {
            0
        };
        let rows = if self.tile.height > 0 {
            viewport.height / self.tile.height
        } else {
            0
        };
        (
            usize::try_from(columns).unwrap_or(0).max(1),
            usize::try_from(rows).unwrap_or(0).max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_sprite_sits_inset_inside_its_tile() {
        let layout = TileLayout::default();
        assert_eq!(layout.tile_origin_px(GridPos::new(2, 3)), PixelPos::new(100, 150));
        assert_eq!(layout.player_origin_px(GridPos::new(2, 3)), PixelPos::new(115, 155));
    }

    #[test]
    fn screen_cell_uses_sprite_center_and_offset() {
        let layout = TileLayout::default();
        let tile = Extent::new(50, 50);
        let origin = layout.tile_origin_px(GridPos::new(1, 1));
        assert_eq!(
            layout.screen_cell(origin, tile, CameraOffset::default()),
            Some((1, 1))
        );
        assert_eq!(
            layout.screen_cell(origin, tile, CameraOffset { dx: 75, dy: -50 }),
            Some((3, 0))
        );
        assert_eq!(
            layout.screen_cell(origin, tile, CameraOffset { dx: -100, dy: 0 }),
            None
        );
    }

    #[test]
    fn viewport_cell_count_never_drops_to_zero() {
        let layout = TileLayout::default();
        assert_eq!(layout.cells_in(Extent::new(300, 300)), (6, 6));
        assert_eq!(layout.cells_in(Extent::new(320, 90)), (6, 1));
        assert_eq!(layout.cells_in(Extent::new(10, -40)), (1, 1));
    }
}
