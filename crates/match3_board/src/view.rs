//! Bevy front end: draws the board, feeds pointer input to the engine and
//! plays back the moves it requests.

use bevy::prelude::*;
use bevy::utils::HashMap;

mod animation;
mod effects;
mod layout;
mod pointer;

use animation::{MoveTo, animate_moves};
use effects::{animate_bursts, piece_color, spawn_burst, tile_color};
pub use layout::{BoardLayout, CELL_SIZE};
use pointer::{handle_pointer, handle_shuffle_key};

use crate::board::animator::{Animator, ClearEffect, MoveRequest};
use crate::board::cascade::CascadeEngine;
use crate::board::coord::Coord;
use crate::board::piece::{MatchValue, Piece, PieceId};

#[derive(Resource, Deref, DerefMut)]
pub struct Board(pub CascadeEngine);

/// Requests made by the engine during a frame, applied to the world by
/// [`apply_requests`].
#[derive(Resource, Default)]
pub struct BoardRequests {
    moves: Vec<MoveRequest>,
    effects: Vec<ClearEffect>,
    destroyed: Vec<PieceId>,
    highlights: Vec<(Coord, Option<MatchValue>)>,
}

impl Animator for BoardRequests {
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
        self.highlights.push((at, value));
    }
}

#[derive(Resource, Default)]
struct PieceSprites(HashMap<PieceId, Entity>);

#[derive(Resource, Default)]
struct TileSprites(HashMap<Coord, Entity>);

/// Expects a [`Board`] resource to be inserted before startup.
pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardRequests>()
            .init_resource::<PieceSprites>()
            .init_resource::<TileSprites>()
            .add_systems(Startup, setup)
            .add_systems(
                Update,
                (
                    handle_pointer,
                    handle_shuffle_key,
                    tick_engine,
                    apply_requests,
                    animate_moves,
                    animate_bursts,
                )
                    .chain(),
            );
    }
}

fn spawn_piece(commands: &mut Commands, piece: &Piece, position: Vec2) -> Entity {
    commands
        .spawn((
            Sprite::from_color(piece_color(piece.value()), Vec2::splat(CELL_SIZE * 0.8)),
            Transform::from_translation(position.extend(1.0)),
            Name::new(format!("Piece {}", piece.id().0)),
        ))
        .id()
}

fn setup(
    mut commands: Commands,
    board: Res<Board>,
    mut pieces: ResMut<PieceSprites>,
    mut tiles: ResMut<TileSprites>,
) {
    commands.spawn(Camera2d);

    let grid = board.grid();
    let layout = BoardLayout::new(grid.width() as u32, grid.height() as u32);
    commands.insert_resource(layout);

    for tile in grid.tiles() {
        let at = tile.coord();
        let entity = commands
            .spawn((
                Sprite::from_color(tile_color(None), Vec2::splat(CELL_SIZE * 0.95)),
                Transform::from_translation(layout.cell_to_world(at).extend(0.0)),
                Name::new(format!("Tile {at}")),
            ))
            .id();
        tiles.0.insert(at, entity);
    }
    for piece in grid.pieces() {
        let entity = spawn_piece(&mut commands, piece, layout.cell_to_world(piece.coord()));
        pieces.0.insert(piece.id(), entity);
    }
    info!("Spawned {} tiles and {} pieces", tiles.0.len(), pieces.0.len());
}

fn tick_engine(time: Res<Time>, mut board: ResMut<Board>, mut requests: ResMut<BoardRequests>) {
    board.tick(time.delta_secs(), &mut *requests);
}

fn apply_requests(
    mut commands: Commands,
    board: Res<Board>,
    layout: Res<BoardLayout>,
    mut requests: ResMut<BoardRequests>,
    mut pieces: ResMut<PieceSprites>,
    tiles: Res<TileSprites>,
    mut tile_sprites: Query<&mut Sprite>,
) {
    for (at, value) in requests.highlights.drain(..) {
        let Some(entity) = tiles.0.get(&at).copied() else {
            warn!("Could not find tile at {at}");
            continue;
        };
        let Ok(mut sprite) = tile_sprites.get_mut(entity) else {
            continue;
        };
        sprite.color = tile_color(value);
    }

    for id in requests.destroyed.drain(..) {
        match pieces.0.remove(&id) {
            Some(entity) => commands.entity(entity).despawn_recursive(),
            None => warn!("Could not find sprite of piece {}", id.0),
        }
    }

    for effect in requests.effects.drain(..) {
        spawn_burst(&mut commands, effect, layout.cell_to_world(effect.at), CELL_SIZE);
    }

    let easing = board.config().easing;
    for request in requests.moves.drain(..) {
        let start = layout.cell_to_world(request.from);
        let entity = *pieces
            .0
            .entry(request.piece.id())
            .or_insert_with(|| spawn_piece(&mut commands, &request.piece, start));
        commands.entity(entity).insert(MoveTo {
            start,
            target: layout.cell_to_world(request.to),
            dest: request.to,
            duration: request.duration,
            elapsed: 0.0,
            easing,
            piece: Some(request.piece),
        });
    }
}
