use bevy::math::{Rect, Vec2};

use crate::layout::{XPos, YPos};

/// Pixel layout of the grid for a given container width.
///
/// Offsets are measured from the top-left corner of the container, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGeometry {
    pub container_width: f32,
    pub block_height: f32,
    pub gap: f32,
}

impl TileGeometry {
    pub fn offset_x(&self, x: XPos) -> f32 {
        match x {
            XPos::Left => 0.0,
            XPos::Right => self.container_width / 2.0 + self.gap / 2.0,
        }
    }

    pub fn offset_y(&self, y: YPos) -> f32 {
        match y {
            YPos::Top => 0.0,
            YPos::Bottom => self.block_height + self.gap,
        }
    }

    pub fn tile_width(&self, active: bool) -> f32 {
        if active {
            self.container_width
        } else {
            self.container_width / 2.0 - self.gap / 2.0
        }
    }

    /// Width of one column of content inside a tile.
    pub fn column_width(&self) -> f32 {
        self.container_width / 2.0
    }

    pub fn grid_height(&self) -> f32 {
        self.block_height.mul_add(2.0, self.gap)
    }

    /// World position of the container's top-left corner, the grid being centered on the origin.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(-self.container_width / 2.0, self.grid_height() / 2.0)
    }

    /// World position of a tile's top-left corner.
    pub fn to_world(&self, offset_x: f32, offset_y: f32) -> Vec2 {
        self.origin() + Vec2::new(offset_x, -offset_y)
    }

    /// World rectangle covered by a tile whose top-left corner is `top_left`.
    pub fn tile_rect(&self, top_left: Vec2, width: f32) -> Rect {
        Rect::new(
            top_left.x,
            top_left.y - self.block_height,
            top_left.x + width,
            top_left.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(container_width: f32) -> TileGeometry {
        TileGeometry {
            container_width,
            block_height: 400.0,
            gap: 20.0,
        }
    }

    #[test]
    fn offsets_follow_the_position_table() {
        let geometry = geometry(1000.0);

        assert_eq!(geometry.offset_x(XPos::Left), 0.0, "left column starts at 0");
        assert_eq!(geometry.offset_x(XPos::Right), 510.0, "right column is half + half gap");
        assert_eq!(geometry.offset_y(YPos::Top), 0.0, "top row starts at 0");
        assert_eq!(geometry.offset_y(YPos::Bottom), 420.0, "bottom row is block + gap");
        assert_eq!(geometry.grid_height(), 820.0, "two blocks and a gap");
    }

    #[test]
    fn widths_split_the_container() {
        let geometry = geometry(1000.0);

        assert_eq!(geometry.tile_width(true), 1000.0, "active tile spans the row");
        assert_eq!(geometry.tile_width(false), 490.0, "inactive tile leaves half a gap");
        assert_eq!(
            geometry.offset_x(XPos::Right) + geometry.tile_width(false),
            geometry.tile_width(true),
            "right tile ends flush with the container"
        );
    }

    #[test]
    fn widths_scale_with_the_container() {
        let narrow = geometry(600.0);
        let wide = geometry(1200.0);

        assert_eq!(wide.tile_width(true), 2.0 * narrow.tile_width(true), "active scales");
        assert_eq!(
            wide.tile_width(false),
            2.0 * narrow.tile_width(false) + 10.0,
            "inactive scales with a constant gap"
        );
    }

    #[test]
    fn world_rects_tile_the_container() {
        let geometry = geometry(1000.0);
        let top_left = geometry.to_world(
            geometry.offset_x(XPos::Left),
            geometry.offset_y(YPos::Top),
        );
        let bottom_right = geometry.to_world(
            geometry.offset_x(XPos::Right),
            geometry.offset_y(YPos::Bottom),
        );

        assert_eq!(top_left, Vec2::new(-500.0, 410.0), "grid is centered on the origin");
        let rect = geometry.tile_rect(bottom_right, geometry.tile_width(false));
        assert_eq!(rect.max.x, 500.0, "right tile reaches the container edge");
        assert_eq!(rect.min.y, -410.0, "bottom tile reaches the grid bottom");
        assert!(
            !rect.contains(Vec2::new(0.0, -200.0)),
            "gap between columns belongs to no tile"
        );
    }
}
