mod app;
mod board;
mod game;
mod powerup;
mod score;
mod snake;
mod term;

use std::fs::File;

use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);
pub type Coords = (i32, i32);

const LOG_FILE: &str = "snake.log";

fn main() {
    // Stdout belongs to the raw-mode alternate screen, so logs go to a file
    if let Ok(file) = File::create(LOG_FILE) {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }
    info!("starting up");

    let mut app = app::App::new();
    app.run();
}
