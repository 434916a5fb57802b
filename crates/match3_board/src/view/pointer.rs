use bevy::prelude::*;

use super::layout::BoardLayout;
use super::{Board, BoardRequests};

/// Where the pointer is this frame, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pointer {
    Pressed(Vec2),
    Held(Vec2),
    Released,
}

fn read_pointer(
    buttons: &ButtonInput<MouseButton>,
    touches: &Touches,
    window: &Window,
) -> Option<Pointer> {
    if buttons.just_pressed(MouseButton::Left) {
        return window.cursor_position().map(Pointer::Pressed);
    }
    if buttons.just_released(MouseButton::Left) || touches.any_just_released() {
        return Some(Pointer::Released);
    }
    if buttons.pressed(MouseButton::Left) {
        return window.cursor_position().map(Pointer::Held);
    }
    if let Some(touch) = touches.iter_just_pressed().next() {
        return Some(Pointer::Pressed(touch.position()));
    }
    touches.iter().next().map(|touch| Pointer::Held(touch.position()))
}

pub fn handle_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    layout: Res<BoardLayout>,
    mut board: ResMut<Board>,
    mut requests: ResMut<BoardRequests>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(pointer) = read_pointer(&buttons, &touches, window) else {
        return;
    };
    let Ok((camera, camera_transform)) = camera.get_single() else {
        error!("Could not find camera");
        return;
    };
    let cell_at = |position: Vec2| {
        camera
            .viewport_to_world_2d(camera_transform, position)
            .ok()
            .and_then(|world| layout.world_to_cell(world))
    };

    match pointer {
        Pointer::Pressed(position) => {
            if let Some(cell) = cell_at(position) {
                board.on_cell_pressed(cell);
            }
        }
        Pointer::Held(position) => {
            if let Some(cell) = cell_at(position) {
                board.on_cell_dragged(cell);
            }
        }
        Pointer::Released => match board.on_release(&mut *requests) {
            Some(Err(err)) => info!("Swap rejected: {err}"),
            Some(Ok(())) | None => {}
        },
    }
}

pub fn handle_shuffle_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut board: ResMut<Board>,
    mut requests: ResMut<BoardRequests>,
) {
    if keys.just_pressed(KeyCode::KeyS) && !board.request_shuffle(&mut *requests) {
        info!("Board is busy, shuffle ignored");
    }
}
