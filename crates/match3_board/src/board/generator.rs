use tracing::{debug, info, warn};

use super::coord::{Coord, Step};
use super::grid::{Grid, Placement};
use super::matching::MatchFinder;
use super::piece::{MatchValue, Piece, PieceId};

/// Default bound on rerolls of a single cell during a fill.
pub const DEFAULT_FILL_RETRY_CAP: u32 = 100;

/// What a [`BoardGenerator::fill_board`] pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Cells that received a new piece, in fill order.
    pub filled: Vec<Coord>,
    /// Cells whose reroll bound ran out; they may still start a match.
    pub exhausted: Vec<Coord>,
    /// Pieces created and destroyed again by rerolls.
    pub discarded: u32,
}

/// Creates pieces with random match values and fills empty cells so that no
/// new piece completes a run with the cells already filled.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    rng: fastrand::Rng,
    palette_size: u8,
    retry_cap: Option<u32>,
    next_id: u64,
}

impl BoardGenerator {
    pub fn new(seed: u64, palette_size: u8, retry_cap: Option<u32>) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            palette_size,
            retry_cap,
            next_id: 0,
        }
    }

    pub const fn palette_size(&self) -> u8 {
        self.palette_size
    }

    pub const fn rng_mut(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }

    /// A fresh piece with a uniformly random value from the palette.
    pub fn spawn(&mut self, coord: Coord) -> Piece {
        self.next_id += 1;
        let value = MatchValue(self.rng.u8(..self.palette_size));
        Piece::new(PieceId(self.next_id), value, coord)
    }

    /// Places a random piece at `coord`. Returns its id, or `None` when the
    /// cell lies outside the board and the piece was dropped.
    pub fn fill_cell(&mut self, grid: &mut Grid, coord: Coord) -> Option<PieceId> {
        let piece = self.spawn(coord);
        let id = piece.id();
        match grid.place(piece, coord) {
            Placement::Stored { displaced } => {
                if let Some(displaced) = displaced {
                    warn!("Fill at {coord} replaced piece {:?}", displaced.id());
                }
                Some(id)
            }
            Placement::Rejected(_) => None,
        }
    }

    /// True when the piece at `coord` completes a run toward the cells that
    /// are filled before it: leftward or downward.
    pub fn has_seed_match(finder: &MatchFinder, grid: &Grid, coord: Coord) -> bool {
        [Step::LEFT, Step::DOWN].into_iter().any(|step| {
            finder
                .scan_direction(grid, coord, step, finder.min_length())
                .is_some()
        })
    }

    /// Fills every empty cell column by column from the bottom-left corner,
    /// rerolling a cell while it seeds a match.
    ///
    /// Rerolls stop after the retry cap; the last value is then kept.
    pub fn fill_board(&mut self, finder: &MatchFinder, grid: &mut Grid) -> FillReport {
        let mut report = FillReport::default();
        let empty = grid.empty_cells().collect::<Vec<_>>();

        for coord in empty {
            if self.fill_cell(grid, coord).is_none() {
                continue;
            }
            let mut rerolls = 0;
            while Self::has_seed_match(finder, grid, coord) {
                if self.retry_cap.is_some_and(|cap| rerolls >= cap) {
                    info!("Match found at {coord} after {rerolls} rerolls, keeping it");
                    report.exhausted.push(coord);
                    break;
                }
                grid.clear(coord);
                report.discarded += 1;
                self.fill_cell(grid, coord);
                rerolls += 1;
            }
            report.filled.push(coord);
        }

        debug!(
            "Filled {} cells ({} rerolls, {} exhausted)",
            report.filled.len(),
            report.discarded,
            report.exhausted.len()
        );
        report
    }
}
