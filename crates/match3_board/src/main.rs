use bevy::app::AppExit;

fn main() -> AppExit {
    match3_board::run()
}
