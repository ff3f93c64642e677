use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CameraOffset {
    pub dx: i32,
    pub dy: i32,
}

/// Offset that puts the center of `target` at the center of `viewport`:
/// `-(target + target_extent / 2 - viewport / 2)` per axis, flooring halves.
pub fn center_offset(target: PixelPos, target_extent: Extent, viewport: Extent) -> CameraOffset {
    CameraOffset {
        dx: center_axis(target.x, target_extent.width, viewport.width),
        dy: center_axis(target.y, target_extent.height, viewport.height),
    }
}

fn center_axis(target: i32, extent: i32, viewport: i32) -> i32 {
    let target_center = target.saturating_add(extent.div_euclid(2));
    target_center
        .saturating_sub(viewport.div_euclid(2))
        .saturating_neg()
}

/// Tracks a single target and remembers the last offset for [`Camera::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Camera {
    offset: CameraOffset,
}

impl Camera {
    pub fn update(
        &mut self,
        target: PixelPos,
        target_extent: Extent,
        viewport: Extent,
    ) -> CameraOffset {
        self.offset = center_offset(target, target_extent, viewport);
        self.offset
    }

    pub fn offset(&self) -> CameraOffset {
        self.offset
    }

    pub fn apply(&self, position: PixelPos) -> PixelPos {
        apply_offset(position, self.offset)
    }
}

pub fn apply_offset(position: PixelPos, offset: CameraOffset) -> PixelPos {
    PixelPos {
        x: position.x.saturating_add(offset.dx),
        y: position.y.saturating_add(offset.dy),
    }
}
