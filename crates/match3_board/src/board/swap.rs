use super::coord::Coord;
use super::error::SwapRejected;
use super::grid::Grid;
use super::matching::MatchFinder;

/// True when the cells differ by exactly one step along exactly one axis.
pub const fn is_adjacent(a: Coord, b: Coord) -> bool {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    (dx == 1 && dy == 0) || (dx == 0 && dy == 1)
}

/// Checks that a swap between `a` and `b` can be attempted: both cells lie
/// on the board, hold a piece and are adjacent.
pub fn validate(grid: &Grid, a: Coord, b: Coord) -> Result<(), SwapRejected> {
    for cell in [a, b] {
        if !grid.is_within_bounds(cell) {
            return Err(SwapRejected::OutOfBounds(cell));
        }
    }
    if a == b {
        return Err(SwapRejected::SameCell(a));
    }
    if !is_adjacent(a, b) {
        return Err(SwapRejected::NotAdjacent {
            first: a,
            second: b,
        });
    }
    for cell in [a, b] {
        if grid.is_empty_at(cell) {
            return Err(SwapRejected::EmptyCell(cell));
        }
    }
    Ok(())
}

/// Whether exchanging the pieces at `a` and `b` would produce a match at
/// either cell. The grid itself is left untouched.
pub fn swap_produces_match(finder: &MatchFinder, grid: &Grid, a: Coord, b: Coord) -> bool {
    if validate(grid, a, b).is_err() {
        return false;
    }
    let mut trial = grid.clone();
    trial.swap(a, b);
    !finder.find_matches_at(&trial, a).is_empty() || !finder.find_matches_at(&trial, b).is_empty()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::board::piece::{MatchValue, Piece, PieceId};

    fn grid_with_values(width: u32, values: &[u8]) -> Grid {
        let mut grid = Grid::new(width, values.len() as u32 / width);
        let coords = grid.coords().collect::<Vec<_>>();
        for (index, (coord, value)) in coords.into_iter().zip(values).enumerate() {
            grid.place(
                Piece::new(PieceId(index as u64), MatchValue(*value), coord),
                coord,
            );
        }
        grid
    }

    #[test]
    fn adjacency_is_four_directional() {
        let centre = Coord::new(1, 1);
        assert!(is_adjacent(centre, Coord::new(2, 1)), "right");
        assert!(is_adjacent(centre, Coord::new(1, 0)), "below");
        assert!(!is_adjacent(centre, Coord::new(2, 2)), "diagonal");
        assert!(!is_adjacent(centre, Coord::new(3, 1)), "two away");
        assert!(!is_adjacent(centre, centre), "itself");
    }

    #[test]
    fn validate_reports_the_first_problem() {
        let mut grid = grid_with_values(2, &[0, 1, 2, 3]);
        assert_eq!(
            validate(&grid, Coord::new(0, 0), Coord::new(1, 1)),
            Err(SwapRejected::NotAdjacent {
                first: Coord::new(0, 0),
                second: Coord::new(1, 1),
            }),
            "diagonal cells"
        );
        assert_eq!(
            validate(&grid, Coord::new(0, 0), Coord::new(-1, 0)),
            Err(SwapRejected::OutOfBounds(Coord::new(-1, 0))),
            "cell outside"
        );
        grid.clear(Coord::new(0, 1));
        assert_eq!(
            validate(&grid, Coord::new(0, 0), Coord::new(0, 1)),
            Err(SwapRejected::EmptyCell(Coord::new(0, 1))),
            "empty cell"
        );
    }

    #[test]
    fn hypothetical_swap_leaves_grid_untouched() {
        // Column-major: column 0 = [A, A, B], column 1 = [C, C, A].
        let grid = grid_with_values(2, &[0, 0, 1, 2, 2, 0]);
        let finder = MatchFinder::default();
        let before = grid.pieces().cloned().collect::<Vec<_>>();

        assert!(
            swap_produces_match(&finder, &grid, Coord::new(0, 2), Coord::new(1, 2)),
            "A moves on top of A A"
        );
        assert!(
            !swap_produces_match(&finder, &grid, Coord::new(0, 0), Coord::new(1, 0)),
            "no run after exchanging the bottom row"
        );
        assert_eq!(grid.pieces().cloned().collect::<Vec<_>>(), before, "grid unchanged");
    }

    proptest! {
        #[test]
        fn adjacency_is_symmetric(ax in -3i32..10, ay in -3i32..10, bx in -3i32..10, by in -3i32..10) {
            let a = Coord::new(ax, ay);
            let b = Coord::new(bx, by);
            prop_assert_eq!(is_adjacent(a, b), is_adjacent(b, a));
        }
    }
}
