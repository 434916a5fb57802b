//! Driving the engine without a renderer: every requested move is queued
//! and completed on demand, as if it had finished instantly.

use std::collections::BTreeMap;

use super::animator::{Animator, ClearEffect, MoveRequest};
use super::cascade::{CascadeEngine, CascadeState};
use super::coord::Coord;
use super::error::EngineError;
use super::piece::{MatchValue, Piece, PieceId};

#[derive(Debug, Default)]
pub struct QueuedAnimator {
    moves: Vec<MoveRequest>,
    effects: Vec<ClearEffect>,
    destroyed: Vec<PieceId>,
    highlighted: BTreeMap<Coord, MatchValue>,
}

impl QueuedAnimator {
    /// Moves requested and not yet completed.
    pub fn pending(&self) -> &[MoveRequest] {
        &self.moves
    }

    pub fn effects(&self) -> &[ClearEffect] {
        &self.effects
    }

    pub fn destroyed(&self) -> &[PieceId] {
        &self.destroyed
    }

    pub const fn highlighted(&self) -> &BTreeMap<Coord, MatchValue> {
        &self.highlighted
    }

    /// Hands every queued piece back to the engine at its destination.
    pub fn complete_all(&mut self, engine: &mut CascadeEngine) -> usize {
        let moves = core::mem::take(&mut self.moves);
        let completed = moves.len();
        for request in moves {
            engine.complete_move(request.piece, request.to);
        }
        completed
    }

    /// Ticks and completes moves until the engine is idle with nothing in
    /// flight. Returns the number of steps taken.
    pub fn run_until_idle(
        &mut self,
        engine: &mut CascadeEngine,
        max_steps: usize,
    ) -> Result<usize, EngineError> {
        for step in 0..max_steps {
            engine.tick(f32::MAX, self);
            if engine.state() == CascadeState::Idle && self.moves.is_empty() {
                return Ok(step);
            }
            self.complete_all(engine);
        }
        Err(EngineError::Stalled { steps: max_steps })
    }
}

impl Animator for QueuedAnimator {
    fn move_piece(&mut self, request: MoveRequest) {
        self.moves.push(request);
    }

    fn trigger_clear_effect(&mut self, effect: ClearEffect) {
        self.effects.push(effect);
    }

    fn piece_destroyed(&mut self, piece: &Piece) {
        self.destroyed.push(piece.id());
    }

    fn highlight_tile(&mut self, at: Coord, value: Option<MatchValue>) {
        match value {
            Some(value) => self.highlighted.insert(at, value),
            None => self.highlighted.remove(&at),
        };
    }
}
