use crate::app::camera::{CameraOffset, Extent, PixelPos};
use crate::content::CellKind;

use super::transform::TileLayout;

pub const BACKGROUND_GLYPH: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Tile(CellKind),
    Player,
}

impl SpriteKind {
    pub fn glyph(self) -> char {
        match self {
            SpriteKind::Tile(CellKind::Wall) => CellKind::Wall.glyph(),
            SpriteKind::Tile(_) => CellKind::Empty.glyph(),
            SpriteKind::Player => CellKind::PlayerStart.glyph(),
        }
    }
}

/// One drawable entity in world pixels, before the camera offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub origin: PixelPos,
    pub extent: Extent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

/// Draws sprites into a character framebuffer, one character per tile.
/// Later sprites overwrite earlier ones; anything off screen is clipped.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    layout: TileLayout,
    viewport: Extent,
    frame: Vec<char>,
}

impl TextRenderer {
    pub fn new(layout: TileLayout, viewport: Extent) -> Self {
        Self {
            layout,
            viewport,
            frame: Vec::new(),
        }
    }

    pub fn layout(&self) -> TileLayout {
        self.layout
    }

    pub fn viewport(&self) -> Extent {
        self.viewport
    }

    pub fn render(&mut self, sprites: &[Sprite], offset: CameraOffset) -> Frame {
        let (columns, rows) = self.layout.cells_in(self.viewport);
        self.frame.clear();
        self.frame.resize(columns * rows, BACKGROUND_GLYPH);

        for sprite in sprites {
            let Some((column, row)) = self.layout.screen_cell(sprite.origin, sprite.extent, offset)
            else {
                continue;
            };
            if column >= columns || row >= rows {
                continue;
            }
            self.frame[row * columns + column] = sprite.kind.glyph();
        }

        let lines = self
            .frame
            .chunks(columns)
            .map(|row| row.iter().collect::<String>())
            .collect();
        Frame { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::GridPos;

    fn tile(layout: &TileLayout, x: i32, y: i32, kind: CellKind) -> Sprite {
        Sprite {
            kind: SpriteKind::Tile(kind),
            origin: layout.tile_origin_px(GridPos::new(x, y)),
            extent: layout.tile,
        }
    }

    #[test]
    fn draws_tiles_then_player_on_top() {
        let layout = TileLayout::default();
        let mut renderer = TextRenderer::new(layout, Extent::new(100, 50));
        let sprites = [
            tile(&layout, 0, 0, CellKind::Wall),
            tile(&layout, 1, 0, CellKind::PlayerStart),
            Sprite {
                kind: SpriteKind::Player,
                origin: layout.player_origin_px(GridPos::new(1, 0)),
                extent: layout.player_extent,
            },
        ];
        let frame = renderer.render(&sprites, CameraOffset::default());
        assert_eq!(frame.lines(), ["#@".to_string()]);
    }

    #[test]
    fn offset_scrolls_and_clips() {
        let layout = TileLayout::default();
        let mut renderer = TextRenderer::new(layout, Extent::new(150, 100));
        let sprites = [
            tile(&layout, 0, 0, CellKind::Wall),
            tile(&layout, 1, 0, CellKind::Empty),
            tile(&layout, 5, 5, CellKind::Wall),
        ];
        let frame = renderer.render(&sprites, CameraOffset { dx: 50, dy: 50 });
        assert_eq!(frame.into_text(), "   \n #.");
    }
}
