use super::coord::Coord;
use super::swap::is_adjacent;

/// Pending press/drag state between a click and its release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapGesture {
    source: Option<Coord>,
    target: Option<Coord>,
}

impl SwapGesture {
    pub const fn source(&self) -> Option<Coord> {
        self.source
    }

    pub const fn target(&self) -> Option<Coord> {
        self.target
    }

    /// Records `cell` as the source unless one is already pending.
    pub const fn press(&mut self, cell: Coord) {
        if self.source.is_none() {
            self.source = Some(cell);
        }
    }

    /// Records `cell` as the target when it is next to the source, and
    /// forgets any target otherwise.
    pub const fn drag(&mut self, cell: Coord) {
        self.target = match self.source {
            Some(source) if is_adjacent(source, cell) => Some(cell),
            _ => None,
        };
    }

    /// Clears both pins and returns the pair when both were set.
    pub const fn release(&mut self) -> Option<(Coord, Coord)> {
        let pair = match (self.source, self.target) {
            (Some(source), Some(target)) => Some((source, target)),
            _ => None,
        };
        self.source = None;
        self.target = None;
        pair
    }
}
