//! A match-3 board: swap adjacent pieces, clear runs of three or more,
//! let the rest fall and refill from above until the board settles.
//!
//! [`board`] holds the renderer-independent engine. [`view`] draws it with
//! Bevy.

use bevy::prelude::*;

pub mod app;
pub mod board;
pub mod view;

use board::cascade::CascadeEngine;
use board::config::BoardConfig;
use view::{Board, BoardPlugin};

pub fn run() -> AppExit {
    run_with(BoardConfig::default())
}

pub fn run_with(config: BoardConfig) -> AppExit {
    let mut app = app::default_app(env!("CARGO_PKG_NAME"));

    let seed = fastrand::u64(..);
    let engine = match CascadeEngine::new(config, seed) {
        Ok(engine) => engine,
        Err(err) => {
            error!("Invalid board configuration: {err}");
            return AppExit::error();
        }
    };
    info!("Starting board with seed {seed}");

    app.insert_resource(Board(engine)).add_plugins(BoardPlugin).run()
}
