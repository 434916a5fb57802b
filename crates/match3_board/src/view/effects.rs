use bevy::prelude::*;

use crate::board::animator::ClearEffect;
use crate::board::piece::MatchValue;

const TILE_COLOR: Color = Color::srgb(0.15, 0.15, 0.2);
const BURST_FRAMES: u8 = 4;

/// Colour a piece of `value` is drawn with.
pub fn piece_color(value: MatchValue) -> Color {
    Color::hsl((f32::from(value.0) * 67.0) % 360.0, 0.7, 0.55)
}

/// Resting tile colour, or a dimmed piece colour while highlighted.
pub fn tile_color(highlight: Option<MatchValue>) -> Color {
    highlight.map_or(TILE_COLOR, |value| piece_color(value).darker(0.2))
}

/// A short expanding burst left where a piece was cleared.
#[derive(Component)]
pub struct Burst {
    timer: Timer,
    frame: u8,
}

pub fn spawn_burst(commands: &mut Commands, effect: ClearEffect, position: Vec2, size: f32) {
    // Bigger matches get a slightly bigger burst.
    let scale = 1.0 + 0.1 * effect.match_size.saturating_sub(3) as f32;
    commands.spawn((
        Sprite::from_color(piece_color(effect.value), Vec2::splat(size * scale)),
        Transform::from_translation(position.extend(2.0)),
        Burst {
            timer: Timer::from_seconds(0.1, TimerMode::Repeating),
            frame: 0,
        },
    ));
}

pub fn animate_bursts(
    mut commands: Commands,
    time: Res<Time>,
    mut bursts: Query<(Entity, &mut Burst, &mut Sprite, &mut Transform)>,
) {
    for (entity, mut burst, mut sprite, mut transform) in &mut bursts {
        burst.timer.tick(time.delta());
        if !burst.timer.just_finished() {
            continue;
        }
        if burst.frame + 1 == BURST_FRAMES {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        burst.frame += 1;
        let progress = f32::from(burst.frame) / f32::from(BURST_FRAMES);
        transform.scale = Vec3::splat(1.0 + progress);
        sprite.color.set_alpha(1.0 - progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_changes_tile_colour() {
        assert_eq!(tile_color(None), TILE_COLOR, "resting tile");
        assert_ne!(
            tile_color(Some(MatchValue(2))),
            TILE_COLOR,
            "highlighted tile"
        );
    }

    #[test]
    fn neighbouring_values_get_distinct_colours() {
        for value in 0..8u8 {
            assert_ne!(
                piece_color(MatchValue(value)),
                piece_color(MatchValue(value + 1)),
                "value {value}"
            );
        }
    }
}
