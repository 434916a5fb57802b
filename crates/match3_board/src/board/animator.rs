use super::coord::Coord;
use super::piece::{MatchValue, Piece};

/// A timed move of one piece. The request owns the piece until the move
/// completes and it is handed back through
/// [`CascadeEngine::complete_move`](super::cascade::CascadeEngine::complete_move).
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRequest {
    pub piece: Piece,
    /// Where the move starts. May lie above the board for drop-ins.
    pub from: Coord,
    pub to: Coord,
    /// Seconds the move takes.
    pub duration: f32,
}

/// A cleared piece, for visual and audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearEffect {
    pub at: Coord,
    pub value: MatchValue,
    /// Size of the match set the piece was cleared with.
    pub match_size: usize,
}

/// Side-effecting collaborator driven by the cascade engine.
///
/// Implementors hold no decision logic. Every [`MoveRequest`] must eventually
/// be completed by handing its piece back to the engine, otherwise the
/// engine keeps waiting.
pub trait Animator {
    fn move_piece(&mut self, request: MoveRequest);

    fn trigger_clear_effect(&mut self, effect: ClearEffect);

    /// A piece left the board for good.
    fn piece_destroyed(&mut self, _piece: &Piece) {}

    /// Highlights a tile with a match value, or resets it with `None`.
    fn highlight_tile(&mut self, _at: Coord, _value: Option<MatchValue>) {}
}
