//! The main loop driver. The primary function attempts to run all due
//! tics then displays the result. Actual game state lives in the `Game`
//! object; this module owns the ordering of one frame: player view first,
//! then the mutually exclusive automap/visplane overlay, statusbar,
//! diagnostic widgets, pause indicator, HUD messages, menu, and the
//! critical message on the very top. `present` is called exactly once per
//! frame, at the end.

use crate::CLIOptions;
use crate::automap::Automap;
use crate::finale::Finale;
use crate::input::InputSource;
use crate::intermission::Intermission;
use crate::menu::Menu;
use crate::statusbar::Statusbar;
use crate::timestep::TimeStep;
use crl_widgets::FrameView;
use gamestate::Game;
use gamestate::subsystems::Subsystems;
use gamestate_traits::{
    GameState, GameTraits, Key, PlayRenderer, ResourceLoader, SubsystemTrait, TextColor,
    TextRender,
};
use hud_messages::Messages;
use log::warn;
use render_traits::run_commands;
use std::time::Duration;

/// The concrete subsystem set this executable wires up.
type GameSubsystems = Subsystems<Statusbar, Messages, Intermission, Finale, Automap>;

/// Runs until the game quits.
pub fn d_heretic_loop<R, L, I, S>(
    mut game: Game,
    mut input: I,
    mut rend: R,
    loader: L,
    mut sink: S,
    options: CLIOptions,
) where
    R: PlayRenderer,
    L: ResourceLoader,
    I: InputSource,
    S: TextRender,
{
    let mut timestep = TimeStep::new();
    let mut fps = 0;

    let mut menu = Menu::new();
    menu.init(&game);
    let mut subsystems = GameSubsystems {
        statusbar: Statusbar::new(),
        hud_msgs: Messages::new(),
        intermission: Intermission::new(),
        finale: Finale::new(),
        automap: Automap::new(),
    };
    subsystems.statusbar.init(&game);
    subsystems.hud_msgs.init(&game);
    subsystems.intermission.init(&game);
    subsystems.finale.init(&game);
    subsystems.automap.init(&game);

    while game.running() {
        try_run_tics(&mut game, &mut input, &mut menu, &mut subsystems, &mut timestep);

        if let Some(data) = timestep.frame_rate() {
            fps = data.frames;
        }

        if !options.nodrawers {
            d_display(
                &mut rend,
                &mut subsystems,
                &mut menu,
                &mut game,
                &loader,
                fps,
                &mut sink,
            );
        }

        // The sink's present does not block the way a vsync flip would.
        std::thread::sleep(Duration::from_millis(1));
    }
}

/// Compose and present one frame. Never runs game logic; everything it
/// reads was settled by the tickers.
///
/// D_Display
fn d_display<R, L, S>(
    rend: &mut R,
    subsystems: &mut GameSubsystems,
    menu: &mut Menu,
    game: &mut Game,
    loader: &L,
    fps: u32,
    sink: &mut S,
) where
    R: PlayRenderer,
    L: ResourceLoader,
    S: TextRender,
{
    // A queued view-size change takes effect before anything renders.
    if let Some(blocks) = game.set_view_size.take() {
        rend.set_view_size(blocks);
    }

    match game.gamestate {
        GameState::Level => {
            if game.game_tic != 0 && rend.viewport_valid() {
                game.counters.begin_frame();
                rend.render_player_view(&mut game.counters, sink);
                game.sync_playsim_counters();

                if game.automap_active {
                    subsystems.automap.draw(sink);
                } else {
                    rend.draw_visplane_overlay(sink);
                }
                subsystems.statusbar.draw(sink);

                let view = FrameView {
                    counters: &game.counters,
                    limits: &game.limits,
                    config: game.widget_config(),
                    tic: game.game_tic,
                    fps,
                    level_time: game.level_time,
                    automap_active: game.automap_active,
                    deathmatch: game.options.deathmatch,
                    player_in_game: game.player_in_game,
                    player: game.player.view,
                    demo: game.demo_view(),
                    powerups: game.player.powerups,
                    target: game.player.target,
                };
                let commands = crl_widgets::compose(&view, &*sink);
                run_commands(&commands, sink);
            }
        }
        GameState::Intermission => subsystems.intermission.draw(sink),
        GameState::Finale => subsystems.finale.draw(sink),
        GameState::DemoScreen => page_drawer(rend, game, loader, sink),
    }

    if game.paused && !menu.active() && !game.ask_for_quit {
        let (x, y) = pause_indicator_pos(game.options.netgame, rend.view_window_y());
        match loader.get("PAUSED") {
            Ok(patch) => sink.draw_patch(&patch, x, y),
            Err(_) => {
                let width = sink.text_width("PAUSED");
                sink.draw_text("PAUSED", x - width / 2, y, TextColor::White);
            }
        }
    }

    subsystems.hud_msgs.draw(sink);
    // Menus go over everything except the critical message.
    menu.draw(sink);
    hud_messages::draw_critical(&game.critical, game.game_tic, sink);
    // TODO: NetUpdate(); // send out any new accumulation

    sink.present();
}

/// Single-player centres the indicator above the viewport; net games use
/// a fixed position so all players see it in the same place.
const fn pause_indicator_pos(netgame: bool, view_window_y: i32) -> (i32, i32) {
    if netgame { (160, 70) } else { (160, view_window_y + 5) }
}

/// Attract loop frame: a full-screen page with an optional advisory
/// notice, or the demo playback view.
///
/// D_PageDrawer
fn page_drawer<R, L, S>(rend: &mut R, game: &mut Game, loader: &L, sink: &mut S)
where
    R: PlayRenderer,
    L: ResourceLoader,
    S: TextRender,
{
    if game.current_page().is_demo() {
        game.counters.begin_frame();
        rend.render_player_view(&mut game.counters, sink);
        return;
    }

    match loader.get(game.page_name) {
        Ok(page) => sink.draw_raw_screen(&page),
        // A missing page is soft; the loop advances past it.
        Err(e) => warn!("Page drawer: {e}"),
    }
    if game.page_advisory {
        if let Ok(patch) = loader.get("ADVISOR") {
            sink.draw_patch(&patch, 4, 160);
        }
    }
}

fn try_run_tics<I: InputSource>(
    game: &mut Game,
    input: &mut I,
    menu: &mut Menu,
    subsystems: &mut GameSubsystems,
    timestep: &mut TimeStep,
) {
    process_events(game, input, menu, subsystems); // D_ProcessEvents

    timestep.run_this(|_| {
        // Did the menu take control of this tic?
        if menu.ticker(game) {
            // Keep the tic counter (and with it the blink phases) moving.
            game.advance_tic();
            return;
        }
        game.ticker(); // G_Ticker
        subsystems.statusbar.ticker(game);
        subsystems.hud_msgs.ticker(game);
        match game.gamestate {
            GameState::Intermission => {
                subsystems.intermission.ticker(game);
            }
            GameState::Finale => {
                subsystems.finale.ticker(game);
            }
            GameState::Level if game.automap_active => {
                subsystems
                    .automap
                    .set_player_pos(game.player.view.x, game.player.view.y);
                subsystems.automap.ticker(game);
            }
            _ => {}
        }
    });
}

/// Drain the frame's input through the responder chain, first match wins:
/// finale, menu, intermission, then the game bindings.
fn process_events<I: InputSource>(
    game: &mut Game,
    input: &mut I,
    menu: &mut Menu,
    subsystems: &mut GameSubsystems,
) {
    while let Some(key) = input.next_key() {
        if game.gamestate == GameState::Finale && subsystems.finale.responder(key, game) {
            continue;
        }
        if menu.responder(key, game) {
            continue;
        }
        if game.gamestate == GameState::Intermission
            && subsystems.intermission.responder(key, game)
        {
            continue;
        }
        g_responder(key, game);
    }
}

/// In-level bindings not belonging to any subsystem.
///
/// G_Responder
fn g_responder(key: Key, game: &mut Game) -> bool {
    if game.gamestate != GameState::Level {
        return false;
    }
    match key {
        Key::Char('p') => {
            game.toggle_pause_game();
            true
        }
        Key::Tab => {
            game.automap_active = !game.automap_active;
            true
        }
        _ => false,
    }
}
