#![doc = include_str!("../../README.md")]

mod automap;
mod cli;
mod config;
mod d_main;
mod finale;
mod input;
mod intermission;
mod loader;
mod menu;
mod renderer;
mod statusbar;
mod surface;
mod timestep;

pub use cli::CLIOptions;

use std::error::Error;

use crate::config::UserConfig;
use crate::input::QueueInput;
use crate::loader::DirLoader;
use crate::renderer::HeadlessRenderer;
use crate::surface::TextSurface;
use d_main::d_heretic_loop;
use gamestate::{Game, GameOptions, identify_version};
use log::info;
use simplelog::TermLogger;
use std::path::Path;

const BASE_DIR: &str = "room4heretic/";

/// The main `game-exe` crate should take care of initialising a few things
fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    let mut game_options = GameOptions::from(options.clone());
    game_options.widgets = user_config.widgets.to_widget_config();

    if !Path::new(&game_options.iwad).is_dir() {
        return Err(format!("Resource directory not found: {}", game_options.iwad).into());
    }
    let loader = DirLoader::new(&game_options.iwad);
    let (game_mode, description) = identify_version(&loader);
    info!("Playing {description}");

    let game = Game::new(game_options, game_mode);
    let rend = HeadlessRenderer::new(10);
    let sink = TextSurface::new();
    let input = QueueInput::new();

    d_heretic_loop(game, input, rend, loader, sink, options);

    Ok(())
}
