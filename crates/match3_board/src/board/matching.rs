//! Run detection.
//!
//! A run is a strictly contiguous line of pieces sharing a [`MatchValue`].
//! Queries return [`MatchSet`]s keyed by cell, so a piece is reported at
//! most once no matter how many runs it belongs to.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use super::coord::{Axis, Coord, Step};
use super::grid::Grid;
use super::piece::{MatchValue, Piece};

/// Shortest run that counts as a match.
pub const MIN_MATCH_LENGTH: usize = 3;

/// A de-duplicated set of matched pieces keyed by cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet(BTreeMap<Coord, Piece>);

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.0.contains_key(&coord)
    }

    /// Adds a piece, keyed by its current coordinate.
    pub fn insert(&mut self, piece: Piece) {
        self.0.insert(piece.coord(), piece);
    }

    pub fn union(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.0.keys().copied()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.0.values()
    }

    pub fn values(&self) -> BTreeSet<MatchValue> {
        self.0.values().map(Piece::value).collect()
    }

    /// Distinct columns holding at least one matched piece.
    pub fn columns(&self) -> BTreeSet<i32> {
        self.0.keys().map(|coord| coord.x).collect()
    }
}

impl FromIterator<Piece> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Piece>>(iter: I) -> Self {
        Self(iter.into_iter().map(|piece| (piece.coord(), piece)).collect())
    }
}

impl Extend<Piece> for MatchSet {
    fn extend<I: IntoIterator<Item = Piece>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|piece| (piece.coord(), piece)));
    }
}

impl IntoIterator for MatchSet {
    type Item = Piece;
    type IntoIter = btree_map::IntoValues<Coord, Piece>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

/// Stateless run finder over a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFinder {
    min_length: usize,
}

impl Default for MatchFinder {
    fn default() -> Self {
        Self {
            min_length: MIN_MATCH_LENGTH,
        }
    }
}

impl MatchFinder {
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    /// Walks from `origin` along `step`, collecting pieces with the origin's
    /// value until an empty cell, the board edge or a different value.
    ///
    /// Returns `None` when the origin is empty or outside the board, or when
    /// the run (origin included) is shorter than `min_length`.
    pub fn scan_direction(
        &self,
        grid: &Grid,
        origin: Coord,
        step: Step,
        min_length: usize,
    ) -> Option<Vec<Piece>> {
        let anchor = grid.piece(origin)?;
        let mut run = vec![anchor.clone()];

        if !step.is_zero() {
            let longest = grid.width().max(grid.height());
            for distance in 1..longest {
                let Some(next) = grid.piece(origin.offset(step, distance)) else {
                    break;
                };
                if next.value() != anchor.value() {
                    break;
                }
                run.push(next.clone());
            }
        }

        (run.len() >= min_length).then_some(run)
    }

    /// Both halves of `axis` through `origin`, each needing the anchor plus
    /// one neighbour, combined when they total at least `min_length` pieces.
    pub fn find_line_matches(&self, grid: &Grid, origin: Coord, axis: Axis) -> Option<MatchSet> {
        let combined = axis
            .steps()
            .into_iter()
            .filter_map(|step| self.scan_direction(grid, origin, step, 2))
            .flatten()
            .collect::<MatchSet>();
        (combined.len() >= self.min_length).then_some(combined)
    }

    /// Horizontal and vertical matches through `origin`.
    pub fn find_matches_at(&self, grid: &Grid, origin: Coord) -> MatchSet {
        let mut matches = MatchSet::new();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if let Some(line) = self.find_line_matches(grid, origin, axis) {
                matches.union(line);
            }
        }
        matches
    }

    /// Matches through the current coordinate of each given piece.
    pub fn find_matches_for<'a>(
        &self,
        grid: &Grid,
        pieces: impl IntoIterator<Item = &'a Piece>,
    ) -> MatchSet {
        self.find_matches_at_cells(grid, pieces.into_iter().map(Piece::coord))
    }

    /// Matches through each of the given cells.
    pub fn find_matches_at_cells(
        &self,
        grid: &Grid,
        cells: impl IntoIterator<Item = Coord>,
    ) -> MatchSet {
        let mut matches = MatchSet::new();
        for cell in cells {
            matches.union(self.find_matches_at(grid, cell));
        }
        matches
    }

    /// Every match on the board.
    pub fn find_all_matches(&self, grid: &Grid) -> MatchSet {
        self.find_matches_at_cells(grid, grid.coords())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::board::grid_from_rows;
    use crate::board::piece::PieceId;

    fn sorted_coords(matches: &MatchSet) -> Vec<(i32, i32)> {
        matches.coords().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn scan_stops_at_mismatch() {
        let grid = grid_from_rows(&["AAB"]);
        let finder = MatchFinder::default();

        let run = finder.scan_direction(&grid, Coord::new(0, 0), Step::RIGHT, 2);
        assert_eq!(run.map(|r| r.len()), Some(2), "run ends before B");
        assert!(
            finder
                .scan_direction(&grid, Coord::new(0, 0), Step::RIGHT, 3)
                .is_none(),
            "a short run is no match"
        );
    }

    #[test]
    fn scan_from_empty_or_outside_is_no_match() {
        let grid = grid_from_rows(&[".AA"]);
        let finder = MatchFinder::default();
        assert!(
            finder
                .scan_direction(&grid, Coord::new(0, 0), Step::RIGHT, 1)
                .is_none(),
            "empty anchor"
        );
        assert!(
            finder
                .scan_direction(&grid, Coord::new(-1, 0), Step::RIGHT, 1)
                .is_none(),
            "anchor outside the board"
        );
    }

    #[test]
    fn scan_stops_at_gap() {
        let grid = grid_from_rows(&["AA.AA"]);
        let finder = MatchFinder::default();
        let run = finder.scan_direction(&grid, Coord::new(0, 0), Step::RIGHT, 1);
        assert_eq!(run.map(|r| r.len()), Some(2), "a gap ends the run");
    }

    #[test]
    fn line_match_combines_both_halves() {
        let grid = grid_from_rows(&["BAAAB"]);
        let finder = MatchFinder::default();

        let matches = finder.find_line_matches(&grid, Coord::new(2, 0), Axis::Horizontal);
        assert_eq!(
            matches.as_ref().map(sorted_coords),
            Some(vec![(1, 0), (2, 0), (3, 0)]),
            "one neighbour on each side plus the anchor"
        );
        assert!(
            finder
                .find_line_matches(&grid, Coord::new(2, 0), Axis::Vertical)
                .is_none(),
            "no vertical run"
        );
    }

    #[test]
    fn matches_at_unions_cross_shape_without_duplicates() {
        let grid = grid_from_rows(&[
            "BAB", //
            "AAA", //
            "BAB",
        ]);
        let finder = MatchFinder::default();

        let matches = finder.find_matches_at(&grid, Coord::new(1, 1));
        assert_eq!(matches.len(), 5, "shared anchor counted once");
    }

    #[test]
    fn swapped_example_reports_top_row_run() {
        // row0=[A,A,B], row1=[B,B,A], row2=[A,B,B] with row 0 at the bottom.
        let mut grid = grid_from_rows(&[
            "ABB", //
            "BBA", //
            "AAB",
        ]);
        grid.swap(Coord::new(2, 0), Coord::new(2, 1));

        let matches = MatchFinder::default().find_matches_at(&grid, Coord::new(0, 0));
        assert_eq!(
            sorted_coords(&matches),
            vec![(0, 0), (1, 0), (2, 0)],
            "row 0 becomes A A A"
        );
    }

    #[test]
    fn matches_for_pieces_follow_their_coordinates() {
        let grid = grid_from_rows(&[
            "ABC", //
            "ABC", //
            "ABD",
        ]);
        let finder = MatchFinder::default();
        let probes = [Coord::new(0, 0), Coord::new(1, 2), Coord::new(2, 1)]
            .iter()
            .filter_map(|coord| grid.piece(*coord).cloned())
            .collect::<Vec<_>>();

        let matches = finder.find_matches_for(&grid, &probes);
        assert_eq!(matches.len(), 6, "columns A and B, not the broken C column");
        assert_eq!(matches.columns().len(), 2, "two columns touched");
    }

    #[test]
    fn all_matches_on_stable_board_is_empty() {
        let grid = grid_from_rows(&[
            "ABAB", //
            "BABA", //
            "ABAB",
        ]);
        assert!(
            MatchFinder::default().find_all_matches(&grid).is_empty(),
            "checkerboard has no runs"
        );
    }

    fn arbitrary_grid() -> impl Strategy<Value = Grid> {
        (1u32..7, 1u32..7)
            .prop_flat_map(|(width, height)| {
                let cells = (width * height) as usize;
                (
                    Just((width, height)),
                    proptest::collection::vec(proptest::option::of(0u8..3), cells),
                )
            })
            .prop_map(|((width, height), cells)| {
                let mut grid = Grid::new(width, height);
                let coords = grid.coords().collect::<Vec<_>>();
                for (id, (coord, value)) in coords.into_iter().zip(cells).enumerate() {
                    if let Some(value) = value {
                        let piece = Piece::new(PieceId(id as u64), MatchValue(value), coord);
                        grid.place(piece, coord);
                    }
                }
                grid
            })
    }

    proptest! {
        #[test]
        fn matches_never_repeat_a_piece(grid in arbitrary_grid()) {
            let finder = MatchFinder::default();
            for coord in grid.coords() {
                let matches = finder.find_matches_at(&grid, coord);
                let mut ids = matches.pieces().map(Piece::id).collect::<Vec<_>>();
                let reported = ids.len();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), reported);
                prop_assert!(matches.is_empty() || matches.len() >= MIN_MATCH_LENGTH);
            }
        }

        #[test]
        fn every_match_holds_a_single_value(grid in arbitrary_grid()) {
            let finder = MatchFinder::default();
            for coord in grid.coords() {
                let matches = finder.find_matches_at(&grid, coord);
                if !matches.is_empty() {
                    prop_assert!(matches.contains(coord));
                    prop_assert_eq!(matches.values().len(), 1);
                }
            }
        }
    }
}
