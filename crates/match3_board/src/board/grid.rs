use tracing::{trace, warn};

use super::coord::Coord;
use super::piece::Piece;

/// Static background cell. Created once with the grid and never moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    coord: Coord,
}

impl Tile {
    pub const fn coord(&self) -> Coord {
        self.coord
    }
}

/// Outcome of [`Grid::place`].
#[derive(Debug, PartialEq, Eq)]
pub enum Placement {
    /// The piece is now stored in the grid. `displaced` holds the previous
    /// occupant of the cell, if there was one.
    Stored { displaced: Option<Piece> },
    /// The coordinate was outside the board. The piece carries the stamped
    /// coordinate but was not stored.
    Rejected(Piece),
}

/// A piece sliding from one cell to another, produced by collapse and shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    pub from: Coord,
    pub to: Coord,
}

impl Fall {
    /// Number of rows travelled.
    pub const fn distance(&self) -> u32 {
        self.from.manhattan(self.to)
    }
}

/// Fixed-size storage of tiles and piece occupancy, stored column-major.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    pieces: Vec<Option<Piece>>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width as i32;
        let height = height as i32;
        let tiles = (0..width)
            .flat_map(|x| (0..height).map(move |y| Tile { coord: Coord::new(x, y) }))
            .collect::<Vec<_>>();
        let pieces = vec![None; tiles.len()];
        Self {
            width,
            height,
            tiles,
            pieces,
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn is_within_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    const fn index(&self, coord: Coord) -> Option<usize> {
        if self.is_within_bounds(coord) {
            Some((coord.x * self.height + coord.y) as usize)
        } else {
            None
        }
    }

    /// Every cell, column by column from the bottom-left corner.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        self.index(coord).and_then(|index| self.tiles.get(index))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn piece(&self, coord: Coord) -> Option<&Piece> {
        self.index(coord)
            .and_then(|index| self.pieces.get(index))
            .and_then(Option::as_ref)
    }

    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.piece(coord).is_none()
    }

    /// All placed pieces.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().flatten()
    }

    /// Cells inside the board that hold no piece.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|coord| self.is_empty_at(*coord))
    }

    /// Stores `piece` at `coord`.
    ///
    /// The coordinate is stamped on the piece unconditionally, while the write
    /// to storage only happens inside the board. An out-of-bounds placement
    /// hands the stamped piece back instead of storing it.
    pub fn place(&mut self, mut piece: Piece, coord: Coord) -> Placement {
        piece.set_coord(coord);
        let Some(slot) = self.index(coord).and_then(|index| self.pieces.get_mut(index)) else {
            warn!("Placement of piece {:?} at {coord} is outside the board", piece.id());
            return Placement::Rejected(piece);
        };
        Placement::Stored {
            displaced: slot.replace(piece),
        }
    }

    /// Lifts the piece out of `coord`, leaving the cell empty.
    pub fn take(&mut self, coord: Coord) -> Option<Piece> {
        self.index(coord)
            .and_then(|index| self.pieces.get_mut(index))
            .and_then(Option::take)
    }

    /// Removes the occupant of `coord`. Clearing an empty cell is a no-op and
    /// clearing outside the board logs a warning.
    pub fn clear(&mut self, coord: Coord) -> Option<Piece> {
        if !self.is_within_bounds(coord) {
            warn!("Ignoring clear at {coord}, outside the board");
            return None;
        }
        let removed = self.take(coord);
        if let Some(piece) = &removed {
            trace!("Cleared piece {:?} at {coord}", piece.id());
        }
        removed
    }

    /// Removes every piece from the board.
    pub fn clear_all(&mut self) -> Vec<Piece> {
        self.pieces.iter_mut().filter_map(Option::take).collect()
    }

    /// Exchanges the occupants of two cells, restamping their coordinates.
    /// Returns `false` without touching anything when either cell is outside
    /// the board.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        if !self.is_within_bounds(a) || !self.is_within_bounds(b) {
            return false;
        }
        let first = self.take(a);
        let second = self.take(b);
        if let Some(piece) = first {
            self.place(piece, b);
        }
        if let Some(piece) = second {
            self.place(piece, a);
        }
        true
    }

    /// Computes how `column` settles under gravity without mutating the grid.
    ///
    /// Every empty cell, scanning up from row 0, is filled by the lowest piece
    /// above it. The relative order of the surviving pieces is preserved.
    pub fn plan_collapse(&self, column: i32) -> Vec<Fall> {
        let mut falls = Vec::new();
        let mut next_free = 0;
        for y in 0..self.height {
            let from = Coord::new(column, y);
            if self.is_empty_at(from) {
                continue;
            }
            if y != next_free {
                falls.push(Fall {
                    from,
                    to: Coord::new(column, next_free),
                });
            }
            next_free += 1;
        }
        falls
    }

    /// Settles `column` under gravity in place and returns the moves made.
    pub fn collapse_column(&mut self, column: i32) -> Vec<Fall> {
        let falls = self.plan_collapse(column);
        for fall in &falls {
            if let Some(piece) = self.take(fall.from) {
                self.place(piece, fall.to);
            }
        }
        falls
    }

    /// Randomly permutes every placed piece over the occupied cells.
    pub fn shuffle(&mut self, rng: &mut fastrand::Rng) -> Vec<Fall> {
        let occupied = self
            .coords()
            .filter(|coord| !self.is_empty_at(*coord))
            .collect::<Vec<_>>();
        let mut destinations = occupied.clone();
        rng.shuffle(&mut destinations);

        let lifted = occupied
            .iter()
            .filter_map(|coord| self.take(*coord))
            .collect::<Vec<_>>();
        let mut moves = Vec::with_capacity(lifted.len());
        for (piece, to) in lifted.into_iter().zip(destinations) {
            let from = piece.coord();
            self.place(piece, to);
            if from != to {
                moves.push(Fall { from, to });
            }
        }
        moves
    }
}
