use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// Visual-match category of a piece. Pieces only ever compare by this value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MatchValue(pub u8);

impl Display for MatchValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a piece for its whole lifetime, used by renderers to
/// track the visual that belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(pub u64);

/// A game piece.
///
/// Pieces are not `Copy`: a piece is owned by the [`Grid`](super::grid::Grid)
/// while placed and handed to the animator for the length of a move.
/// Dropping a piece destroys it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    value: MatchValue,
    coord: Coord,
}

impl Piece {
    pub const fn new(id: PieceId, value: MatchValue, coord: Coord) -> Self {
        Self { id, value, coord }
    }

    pub const fn id(&self) -> PieceId {
        self.id
    }

    pub const fn value(&self) -> MatchValue {
        self.value
    }

    /// Last logical coordinate stamped on this piece.
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    pub(crate) const fn set_coord(&mut self, coord: Coord) {
        self.coord = coord;
    }
}
