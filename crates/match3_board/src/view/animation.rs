use bevy::prelude::*;

use super::Board;
use crate::board::coord::Coord;
use crate::board::easing::Easing;
use crate::board::piece::Piece;

/// An eased move of a piece sprite. The component carries the piece until
/// it arrives, then hands it back to the engine.
#[derive(Component, Debug)]
pub struct MoveTo {
    pub piece: Option<Piece>,
    pub start: Vec2,
    pub target: Vec2,
    pub dest: Coord,
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
}

impl MoveTo {
    /// Advances the tween and returns the new position along with whether
    /// the move is done.
    pub fn advance(&mut self, dt: f32) -> (Vec2, bool) {
        self.elapsed += dt;
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return (self.target, true);
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        (self.start.lerp(self.target, t), false)
    }
}

pub fn animate_moves(
    mut commands: Commands,
    time: Res<Time>,
    mut board: ResMut<Board>,
    mut moves: Query<(Entity, &mut Transform, &mut MoveTo)>,
) {
    for (entity, mut transform, mut move_to) in &mut moves {
        let (position, arrived) = move_to.advance(time.delta_secs());
        transform.translation = position.extend(transform.translation.z);
        if !arrived {
            continue;
        }
        commands.entity(entity).remove::<MoveTo>();
        let dest = move_to.dest;
        match move_to.piece.take() {
            Some(piece) => board.complete_move(piece, dest),
            None => warn!("Move of {entity:?} to {dest} finished without a piece"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::{MatchValue, PieceId};

    fn tween(duration: f32) -> MoveTo {
        MoveTo {
            piece: Some(Piece::new(PieceId(1), MatchValue(0), Coord::default())),
            start: Vec2::ZERO,
            target: Vec2::new(100.0, 0.0),
            dest: Coord::new(2, 0),
            duration,
            elapsed: 0.0,
            easing: Easing::Linear,
        }
    }

    #[test]
    fn tween_reaches_target_after_duration() {
        let mut move_to = tween(1.0);
        let (halfway, done) = move_to.advance(0.5);
        assert!(!done, "still moving");
        assert!((halfway.x - 50.0).abs() < 1e-4, "linear halfway point");

        let (end, done) = move_to.advance(0.6);
        assert!(done, "finished");
        assert_eq!(end, Vec2::new(100.0, 0.0), "snaps to the target");
    }

    #[test]
    fn zero_duration_arrives_at_once() {
        let mut move_to = tween(0.0);
        assert_eq!(
            move_to.advance(0.0),
            (Vec2::new(100.0, 0.0), true),
            "instant move"
        );
    }
}
