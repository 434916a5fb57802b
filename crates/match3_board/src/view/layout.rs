use bevy::prelude::*;

use crate::board::coord::Coord;

/// Side of one board cell in world units.
pub const CELL_SIZE: f32 = 50.0;

/// Maps board cells to world positions. The board is centred on the world
/// origin and row 0 is drawn at the bottom.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub width: u32,
    pub height: u32,
    pub cell_size: f32,
}

impl BoardLayout {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cell_size: CELL_SIZE,
        }
    }

    fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.cell_size / 2.0
    }

    /// Centre of `cell` in world space. Works for cells outside the board,
    /// such as drop-in spawn points above it.
    pub fn cell_to_world(&self, cell: Coord) -> Vec2 {
        Vec2::new(cell.x as f32 + 0.5, cell.y as f32 + 0.5) * self.cell_size - self.half_extent()
    }

    /// The board cell under `position`, if any.
    pub fn world_to_cell(&self, position: Vec2) -> Option<Coord> {
        let local = (position + self.half_extent()) / self.cell_size;
        let cell = Coord::new(local.x.floor() as i32, local.y.floor() as i32);
        let inside = (0..self.width as i32).contains(&cell.x) && (0..self.height as i32).contains(&cell.y);
        inside.then_some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_round_trip_through_their_centres() {
        let layout = BoardLayout::new(8, 6);
        for x in 0..8 {
            for y in 0..6 {
                let cell = Coord::new(x, y);
                assert_eq!(
                    layout.world_to_cell(layout.cell_to_world(cell)),
                    Some(cell),
                    "centre of {cell} maps back"
                );
            }
        }
    }

    #[test]
    fn board_is_centred_with_row_zero_at_the_bottom() {
        let layout = BoardLayout::new(2, 2);
        assert_eq!(
            layout.cell_to_world(Coord::new(0, 0)),
            Vec2::new(-25.0, -25.0),
            "bottom left"
        );
        assert_eq!(
            layout.cell_to_world(Coord::new(1, 1)),
            Vec2::new(25.0, 25.0),
            "top right"
        );
    }

    #[test]
    fn positions_off_the_board_map_to_nothing() {
        let layout = BoardLayout::new(4, 4);
        assert_eq!(layout.world_to_cell(Vec2::new(-101.0, 0.0)), None, "left edge");
        assert_eq!(layout.world_to_cell(Vec2::new(0.0, 100.5)), None, "top edge");
        assert_eq!(
            layout.world_to_cell(Vec2::new(-99.0, -99.0)),
            Some(Coord::new(0, 0)),
            "just inside the corner"
        );
    }
}
