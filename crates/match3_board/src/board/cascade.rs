//! The swap → clear → collapse → refill state machine.
//!
//! The engine never waits on its own. It hands moves to an [`Animator`],
//! counts them as in flight, and only advances once every moved piece has
//! been handed back through [`CascadeEngine::complete_move`]. Hosts call
//! [`CascadeEngine::tick`] once per frame.

use std::collections::BTreeMap;

use tracing::{debug, info, trace, warn};

use super::animator::{Animator, ClearEffect, MoveRequest};
use super::config::BoardConfig;
use super::coord::Coord;
use super::error::{ConfigError, SwapRejected};
use super::generator::BoardGenerator;
use super::gesture::SwapGesture;
use super::grid::{Grid, Placement};
use super::matching::{MatchFinder, MatchSet};
use super::piece::{Piece, PieceId};
use super::swap;

/// Coarse engine state as seen by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeState {
    /// Accepting swaps.
    Idle,
    /// A swap, or the swap back after a miss, is animating.
    AwaitingSwapAnimation,
    /// Clearing, collapsing and refilling until the board is stable.
    Resolving,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Swapping { first: Coord, second: Coord },
    Reverting,
    Highlighting { matches: MatchSet, remaining: f32 },
    Collapsing { moved: Vec<Coord> },
    /// `shuffle_after` is set once the pass cap was hit before the refill.
    Refilling { shuffle_after: bool },
    Shuffling,
}

pub struct CascadeEngine {
    config: BoardConfig,
    grid: Grid,
    finder: MatchFinder,
    generator: BoardGenerator,
    gesture: SwapGesture,
    phase: Phase,
    input_enabled: bool,
    in_flight: BTreeMap<PieceId, Coord>,
    passes: u32,
}

impl CascadeEngine {
    /// Builds the tiles and fills the board without animation.
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        let mut engine = Self::assemble(config, grid, seed);
        let report = engine.generator.fill_board(&engine.finder, &mut engine.grid);
        info!(
            "Board {}x{} filled with {} pieces ({} cells kept a match)",
            engine.grid.width(),
            engine.grid.height(),
            report.filled.len(),
            report.exhausted.len()
        );
        Ok(engine)
    }

    /// Starts from an existing grid. The grid's size overrides the
    /// configured dimensions; empty cells stay empty until a refill.
    pub fn with_grid(config: BoardConfig, grid: Grid, seed: u64) -> Result<Self, ConfigError> {
        let config = BoardConfig {
            width: grid.width() as u32,
            height: grid.height() as u32,
            ..config
        };
        config.validate()?;
        Ok(Self::assemble(config, grid, seed))
    }

    fn assemble(config: BoardConfig, grid: Grid, seed: u64) -> Self {
        let generator = BoardGenerator::new(seed, config.palette_size, config.fill_retry_cap);
        Self {
            config,
            grid,
            finder: MatchFinder::default(),
            generator,
            gesture: SwapGesture::default(),
            phase: Phase::Idle,
            input_enabled: true,
            in_flight: BTreeMap::new(),
            passes: 0,
        }
    }

    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn finder(&self) -> &MatchFinder {
        &self.finder
    }

    pub const fn gesture(&self) -> &SwapGesture {
        &self.gesture
    }

    pub const fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Moves handed to the animator that have not come back yet.
    pub fn pending_moves(&self) -> usize {
        self.in_flight.len()
    }

    /// Re-match passes taken by the current or last resolution.
    pub const fn passes(&self) -> u32 {
        self.passes
    }

    pub const fn state(&self) -> CascadeState {
        match self.phase {
            Phase::Idle => CascadeState::Idle,
            Phase::Swapping { .. } | Phase::Reverting => CascadeState::AwaitingSwapAnimation,
            Phase::Highlighting { .. }
            | Phase::Collapsing { .. }
            | Phase::Refilling { .. }
            | Phase::Shuffling => CascadeState::Resolving,
        }
    }

    pub const fn on_cell_pressed(&mut self, cell: Coord) {
        self.gesture.press(cell);
    }

    pub const fn on_cell_dragged(&mut self, cell: Coord) {
        self.gesture.drag(cell);
    }

    /// Ends a gesture. When both a source and an adjacent target were pinned
    /// the swap is submitted and its outcome returned.
    pub fn on_release(&mut self, animator: &mut impl Animator) -> Option<Result<(), SwapRejected>> {
        let (source, target) = self.gesture.release()?;
        Some(self.submit_swap(source, target, animator))
    }

    /// Starts animating a tentative swap. Rejected requests change nothing.
    pub fn submit_swap(
        &mut self,
        first: Coord,
        second: Coord,
        animator: &mut impl Animator,
    ) -> Result<(), SwapRejected> {
        if !self.input_enabled {
            debug!("Swap {first} <-> {second} ignored, input disabled");
            return Err(SwapRejected::InputDisabled);
        }
        swap::validate(&self.grid, first, second)
            .inspect_err(|err| debug!("Swap {first} <-> {second} rejected: {err}"))?;

        self.input_enabled = false;
        let lifted = [self.grid.take(first), self.grid.take(second)];
        let [Some(first_piece), Some(second_piece)] = lifted else {
            // Validation guarantees both cells are occupied.
            warn!("Swap {first} <-> {second} lost a piece");
            self.finish();
            return Ok(());
        };
        self.send(first_piece, first, second, self.config.move_duration, animator);
        self.send(second_piece, second, first, self.config.move_duration, animator);
        self.phase = Phase::Swapping { first, second };
        Ok(())
    }

    /// Shuffles every piece while idle. Returns `false` when busy.
    pub fn request_shuffle(&mut self, animator: &mut impl Animator) -> bool {
        if !self.input_enabled {
            return false;
        }
        self.input_enabled = false;
        self.start_shuffle(animator);
        true
    }

    /// Hands a moved piece back. Placement stamps `to` on the piece even when
    /// it lies outside the board, in which case the piece is dropped.
    pub fn complete_move(&mut self, piece: Piece, to: Coord) {
        match self.in_flight.remove(&piece.id()) {
            Some(expected) if expected != to => {
                warn!("Piece {:?} arrived at {to}, expected {expected}", piece.id());
            }
            Some(_) => {}
            None => warn!("Piece {:?} arrived at {to} without a pending move", piece.id()),
        }
        match self.grid.place(piece, to) {
            Placement::Stored {
                displaced: Some(displaced),
            } => warn!("Arrival at {to} displaced piece {:?}", displaced.id()),
            Placement::Stored { displaced: None } => {}
            Placement::Rejected(piece) => {
                warn!("Dropping piece {:?} that arrived off the board", piece.id());
            }
        }
    }

    /// Advances the state machine as far as finished moves allow. `dt` is the
    /// time since the previous tick and only drives the highlight pause.
    pub fn tick(&mut self, dt: f32, animator: &mut impl Animator) {
        if let Phase::Highlighting { remaining, .. } = &mut self.phase {
            *remaining -= dt;
        }
        while self.step(animator) {}
    }

    fn step(&mut self, animator: &mut impl Animator) -> bool {
        if !self.in_flight.is_empty() {
            return false;
        }
        match core::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => return false,
            Phase::Swapping { first, second } => self.resolve_swap(first, second, animator),
            Phase::Reverting | Phase::Shuffling => self.finish(),
            Phase::Highlighting { matches, remaining } if remaining > 0.0 => {
                self.phase = Phase::Highlighting { matches, remaining };
                return false;
            }
            Phase::Highlighting { matches, .. } => self.clear_and_collapse(matches, animator),
            Phase::Collapsing { moved } => self.after_collapse(&moved, animator),
            Phase::Refilling { shuffle_after } => self.after_refill(shuffle_after, animator),
        }
        true
    }

    fn resolve_swap(&mut self, first: Coord, second: Coord, animator: &mut impl Animator) {
        let mut matches = self.finder.find_matches_at(&self.grid, first);
        matches.union(self.finder.find_matches_at(&self.grid, second));

        if matches.is_empty() {
            debug!("Swap {first} <-> {second} made no match, swapping back");
            let lifted = [self.grid.take(first), self.grid.take(second)];
            for (piece, from, to) in lifted
                .into_iter()
                .zip([(first, second), (second, first)])
                .filter_map(|(piece, (from, to))| piece.map(|piece| (piece, from, to)))
            {
                self.send(piece, from, to, self.config.move_duration, animator);
            }
            self.phase = Phase::Reverting;
            return;
        }

        self.passes = 0;
        self.begin_clear(matches, animator);
    }

    fn begin_clear(&mut self, matches: MatchSet, animator: &mut impl Animator) {
        debug!("Clearing {} matched pieces (pass {})", matches.len(), self.passes);
        for piece in matches.pieces() {
            animator.highlight_tile(piece.coord(), Some(piece.value()));
        }
        self.phase = Phase::Highlighting {
            matches,
            remaining: self.config.clear_delay,
        };
    }

    fn clear_and_collapse(&mut self, matches: MatchSet, animator: &mut impl Animator) {
        let match_size = matches.len();
        let columns = matches.columns();

        for matched in matches {
            let at = matched.coord();
            animator.trigger_clear_effect(ClearEffect {
                at,
                value: matched.value(),
                match_size,
            });
            animator.highlight_tile(at, None);
            if let Some(removed) = self.grid.clear(at) {
                animator.piece_destroyed(&removed);
            }
        }

        let mut moved = Vec::new();
        for column in columns {
            for fall in self.grid.plan_collapse(column) {
                let Some(piece) = self.grid.take(fall.from) else {
                    continue;
                };
                let duration = self.config.collapse_duration(fall.distance());
                self.send(piece, fall.from, fall.to, duration, animator);
                moved.push(fall.to);
            }
        }
        trace!("Collapsing {} pieces", moved.len());
        self.phase = Phase::Collapsing { moved };
    }

    fn after_collapse(&mut self, moved: &[Coord], animator: &mut impl Animator) {
        if self.config.chain_before_refill {
            let chained = self
                .finder
                .find_matches_at_cells(&self.grid, moved.iter().copied());
            if !chained.is_empty() {
                if self.next_pass() {
                    self.begin_clear(chained, animator);
                } else {
                    self.refill(true, animator);
                }
                return;
            }
        }
        self.refill(false, animator);
    }

    fn refill(&mut self, shuffle_after: bool, animator: &mut impl Animator) {
        let report = self.generator.fill_board(&self.finder, &mut self.grid);
        let drop = self.config.refill_drop_offset as i32;
        for to in report.filled {
            let Some(piece) = self.grid.take(to) else {
                continue;
            };
            let from = Coord::new(to.x, to.y + drop);
            self.send(piece, from, to, self.config.refill_move_time, animator);
        }
        self.phase = Phase::Refilling { shuffle_after };
    }

    fn after_refill(&mut self, shuffle_after: bool, animator: &mut impl Animator) {
        if shuffle_after {
            self.start_shuffle(animator);
            return;
        }
        let matches = self.finder.find_all_matches(&self.grid);
        if matches.is_empty() {
            debug!("Board settled after {} passes", self.passes);
            self.finish();
        } else if self.next_pass() {
            self.begin_clear(matches, animator);
        } else {
            self.start_shuffle(animator);
        }
    }

    /// Counts another re-match pass. Returns `false` once the cap is reached,
    /// after which the board is refilled if needed, shuffled and accepted.
    fn next_pass(&mut self) -> bool {
        self.passes += 1;
        if self
            .config
            .max_cascade_passes
            .is_some_and(|cap| self.passes >= cap)
        {
            warn!(
                "Board still matching after {} passes, shuffling and accepting it",
                self.passes
            );
            return false;
        }
        true
    }

    fn start_shuffle(&mut self, animator: &mut impl Animator) {
        let moves = self.grid.shuffle(self.generator.rng_mut());
        debug!("Shuffling {} pieces", moves.len());
        for shuffled in moves {
            let Some(piece) = self.grid.take(shuffled.to) else {
                continue;
            };
            self.send(
                piece,
                shuffled.from,
                shuffled.to,
                self.config.move_duration,
                animator,
            );
        }
        self.phase = Phase::Shuffling;
    }

    fn send(
        &mut self,
        piece: Piece,
        from: Coord,
        to: Coord,
        duration: f32,
        animator: &mut impl Animator,
    ) {
        self.in_flight.insert(piece.id(), to);
        animator.move_piece(MoveRequest {
            piece,
            from,
            to,
            duration,
        });
    }

    fn finish(&mut self) {
        self.phase = Phase::Idle;
        self.input_enabled = true;
    }
}
