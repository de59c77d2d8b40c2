//! Game state, fairly self-descriptive but bares expanding on in a little
//! more detail.
//!
//! The state of the game can be a few states only:
//!
//! - level playing
//! - intermission/finale
//! - attract-demo loop
//!
//! State is changed through `GameTraits` functions which queue a
//! `GameAction`; the action takes effect on the next tic. The primary state
//! is either demo-play or level-play.
//!
//! The game also owns everything the diagnostic overlay reads each frame:
//! the renderer work counters, the limit table, the widget config, demo
//! playback progress and the HUD message state. Ownership is cooperative
//! and per-tic: the renderer writes counters during the display pass,
//! the compositor reads them afterwards, all on the one thread.

pub mod demo;
pub mod game_impl;
pub mod subsystems;

use crl_stats::{CompatMode, CounterLimits, FrameCounters, WidgetConfig};
use crl_widgets::{DemoView, PlayerView, PowerupView, TargetView};
use demo::{DemoPage, DemoSequence, SequenceAction};
use gamestate_traits::{GameMode, GameState, ResourceLoader, Skill};
use hud_messages::CriticalMessage;
use log::{info, warn};

pub const MAXPLAYERS: usize = 4;

/// Description of the unregistered shareware release.
pub const DESC_SHAREWARE: &str = "Heretic (shareware)";
/// Description of the registered release.
pub const DESC_REGISTERED: &str = "Heretic (registered)";
/// Description of the retail release with the extra episodes.
pub const DESC_RETAIL: &str = "Heretic: Shadow of the Serpent Riders";

/// Options specific to a game session, mostly from CLI and user config.
pub struct GameOptions {
    pub iwad: String,
    pub no_monsters: bool,
    pub respawn_parm: bool,
    pub deathmatch: bool,
    pub netgame: bool,
    pub skill: Skill,
    pub episode: usize,
    pub map: usize,
    pub autostart: bool,
    pub compat_mode: CompatMode,
    /// Play the built-in attract demos between title pages.
    pub internal_demos: bool,
    pub widgets: WidgetConfig,
    pub verbose: log::LevelFilter,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            iwad: "heretic.wad".to_string(),
            no_monsters: false,
            respawn_parm: false,
            deathmatch: false,
            netgame: false,
            skill: Skill::default(),
            episode: 1,
            map: 1,
            autostart: false,
            compat_mode: CompatMode::Vanilla,
            internal_demos: true,
            widgets: WidgetConfig::default(),
            verbose: log::LevelFilter::Info,
        }
    }
}

/// Probe the loaded resource set for which release this is. The retail
/// version is marked by the EXTENDED lump; shareware lacks episode 2.
pub fn identify_version(loader: &impl ResourceLoader) -> (GameMode, &'static str) {
    if loader.get("E2M1").is_err() {
        (GameMode::Shareware, DESC_SHAREWARE)
    } else if loader.get("EXTENDED").is_ok() {
        (GameMode::Retail, DESC_RETAIL)
    } else {
        (GameMode::Registered, DESC_REGISTERED)
    }
}

/// Deferred state changes, applied at the top of the next tic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameAction {
    None,
    NewGame {
        skill: Skill,
        episode: usize,
        map: usize,
    },
    Title,
}

/// Demo playback/recording progress, updated by the demo reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoProgress {
    pub playback: bool,
    pub recording: bool,
    pub elapsed_tics: i32,
    pub total_tics: i32,
}

/// Per-player data the widgets and statusbar read. The simulation
/// collaborator updates this each tic.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerHud {
    pub status: gamestate_traits::PlayerStatus,
    pub view: PlayerView,
    pub powerups: PowerupView,
    pub target: Option<TargetView>,
}

pub struct Game {
    pub options: GameOptions,
    pub game_mode: GameMode,
    pub gamestate: GameState,
    pub game_tic: u32,
    pub level_time: i32,
    pub paused: bool,
    /// A quit confirmation prompt is up; suppresses the pause indicator.
    pub ask_for_quit: bool,
    pub usergame: bool,
    pub automap_active: bool,
    pub consoleplayer: usize,
    pub player_in_game: [bool; MAXPLAYERS],
    pub player: PlayerHud,
    /// Queued one-line message for the HUD.
    pub pending_msg: Option<String>,
    pub critical: CriticalMessage,

    /// Renderer work counts for the frame being displayed.
    pub counters: FrameCounters,
    pub limits: CounterLimits,
    /// Playsim activity mirrored into the counters each display pass.
    pub active_plats: i32,
    pub active_line_anims: i32,

    pub demo: DemoProgress,
    pub demo_sequence: DemoSequence,
    /// Name of the page lump currently shown in the demo loop.
    pub page_name: &'static str,
    /// Draw the advisory patch over the current page.
    pub page_advisory: bool,

    /// Pending view-size change in screenblocks, consumed by the
    /// orchestrator before the next render.
    pub set_view_size: Option<usize>,

    game_action: GameAction,
    running: bool,
}

impl Game {
    pub fn new(options: GameOptions, game_mode: GameMode) -> Self {
        let limits = CounterLimits::new(options.compat_mode);
        let mut player_in_game = [false; MAXPLAYERS];
        player_in_game[0] = true;

        let mut game = Self {
            game_mode,
            gamestate: GameState::DemoScreen,
            game_tic: 0,
            level_time: 0,
            paused: false,
            ask_for_quit: false,
            usergame: false,
            automap_active: false,
            consoleplayer: 0,
            player_in_game,
            player: PlayerHud::default(),
            pending_msg: None,
            critical: CriticalMessage::default(),
            counters: FrameCounters::default(),
            limits,
            active_plats: 0,
            active_line_anims: 0,
            demo: DemoProgress::default(),
            demo_sequence: DemoSequence::new(),
            page_name: "TITLE",
            page_advisory: false,
            set_view_size: None,
            game_action: GameAction::None,
            running: true,
            options,
        };

        if game.options.autostart {
            game.game_action = GameAction::NewGame {
                skill: game.options.skill,
                episode: game.options.episode,
                map: game.options.map,
            };
        } else {
            game.do_advance_demo();
        }
        game
    }

    pub const fn running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, run: bool) {
        self.running = run;
    }

    /// Widget visibility config as read by the compositor each frame.
    pub const fn widget_config(&self) -> &WidgetConfig {
        &self.options.widgets
    }

    pub fn demo_view(&self) -> DemoView {
        DemoView {
            playback: self.demo.playback,
            recording: self.demo.recording,
            elapsed_tics: self.demo.elapsed_tics,
            total_tics: self.demo.total_tics,
        }
    }

    /// Advance the attract sequence one step and act on the result.
    fn do_advance_demo(&mut self) {
        self.usergame = false;
        self.paused = false;
        self.gamestate = GameState::DemoScreen;

        let shareware = self.game_mode == GameMode::Shareware;
        match self
            .demo_sequence
            .advance(self.options.internal_demos, shareware)
        {
            SequenceAction::ShowPage {
                name, advisory, ..
            } => {
                self.page_name = name;
                self.page_advisory = advisory;
                self.demo.playback = false;
            }
            SequenceAction::PlayDemo(name) => {
                self.defered_play_demo(name);
            }
        }
    }

    /// Queue playback of a named demo lump. Duration comes from the demo
    /// reader collaborator; a zero length advances on the next tic.
    pub fn defered_play_demo(&mut self, name: &str) {
        info!("Playing demo {name}");
        self.demo.playback = true;
        self.demo.elapsed_tics = 0;
    }

    /// One simulation tic. Called zero or more times per frame by the
    /// main loop catch-up, never concurrently with drawing.
    pub fn ticker(&mut self) {
        match self.game_action {
            GameAction::NewGame { skill, episode, map } => {
                self.init_new(skill, episode, map);
            }
            GameAction::Title => {
                self.demo_sequence.reset();
                self.gamestate = GameState::DemoScreen;
                self.usergame = false;
                self.do_advance_demo();
            }
            GameAction::None => {}
        }
        self.game_action = GameAction::None;

        match self.gamestate {
            GameState::Level => {
                if !self.paused {
                    self.level_time += 1;
                    if self.demo.recording {
                        self.demo.elapsed_tics += 1;
                    }
                }
            }
            GameState::DemoScreen => self.page_ticker(),
            GameState::Intermission | GameState::Finale => {}
        }

        self.advance_tic();
    }

    /// Advance the tic counter and time-based message state without
    /// running the game. Used when a subsystem (the menu) has taken the
    /// tic, so blink phases keep moving.
    pub fn advance_tic(&mut self) {
        self.critical.ticker();
        self.game_tic += 1;
    }

    /// Handles timing for the attract pages, and watches demo playback
    /// for completion.
    fn page_ticker(&mut self) {
        if self.demo_sequence.page().is_demo() {
            if self.demo.playback {
                self.demo.elapsed_tics += 1;
                if self.demo.elapsed_tics >= self.demo.total_tics {
                    self.demo.playback = false;
                    self.do_advance_demo();
                }
            } else {
                // Playback was cancelled or never began.
                self.do_advance_demo();
            }
        } else if self.demo_sequence.ticker() {
            self.do_advance_demo();
        }
    }

    fn init_new(&mut self, skill: Skill, episode: usize, map: usize) {
        if self.game_mode == GameMode::Shareware && episode > 1 {
            warn!("Shareware has episode 1 only, starting E1M1");
            self.init_new(skill, 1, 1);
            return;
        }
        info!("New game: E{episode}M{map} skill {skill:?}");
        self.options.skill = skill;
        self.options.episode = episode;
        self.options.map = map;
        self.gamestate = GameState::Level;
        self.usergame = true;
        self.paused = false;
        self.automap_active = false;
        self.demo.playback = false;
        self.level_time = 0;
        self.player = PlayerHud {
            status: gamestate_traits::PlayerStatus {
                health: 100,
                armor: 0,
                ready_ammo: 50,
                max_ammo: 100,
            },
            ..PlayerHud::default()
        };
        self.pending_msg = Some("A NEW GAME HAS BEGUN".to_string());
    }

    /// Mirror playsim activity into the frame counters. Called by the
    /// orchestrator after the renderer has written its counts.
    pub fn sync_playsim_counters(&mut self) {
        self.counters.plats = self.active_plats;
        self.counters.line_anims = self.active_line_anims;
    }

    pub const fn current_page(&self) -> DemoPage {
        self.demo_sequence.page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamestate_traits::GameTraits;

    fn demo_game() -> Game {
        Game::new(GameOptions::default(), GameMode::Registered)
    }

    #[test]
    fn starts_on_the_title_page() {
        let game = demo_game();
        assert_eq!(game.gamestate, GameState::DemoScreen);
        assert_eq!(game.current_page(), DemoPage::TitleScreen);
        assert_eq!(game.page_name, "TITLE");
        assert!(!game.page_advisory);
    }

    #[test]
    fn title_page_times_out_to_advisory() {
        let mut game = demo_game();
        for _ in 0..=210 {
            game.ticker();
        }
        assert_eq!(game.current_page(), DemoPage::AdvisoryScreen);
        assert!(game.page_advisory);
    }

    #[test]
    fn demo_playback_completion_advances_sequence() {
        let mut game = demo_game();
        // Run out title and advisory pages.
        for _ in 0..(211 + 141) {
            game.ticker();
        }
        assert_eq!(game.current_page(), DemoPage::Demo1);
        assert!(game.demo.playback);

        game.demo.total_tics = 10;
        for _ in 0..10 {
            game.ticker();
        }
        assert_eq!(game.current_page(), DemoPage::CreditScreen);
        assert!(!game.demo.playback);
    }

    #[test]
    fn internal_demos_disabled_cycles_pages_only() {
        let mut game = Game::new(
            GameOptions {
                internal_demos: false,
                ..GameOptions::default()
            },
            GameMode::Registered,
        );
        for _ in 0..10_000 {
            game.ticker();
            assert!(
                !game.current_page().is_demo(),
                "demo pages must be bypassed"
            );
        }
    }

    #[test]
    fn new_game_enters_level_and_queues_message() {
        let mut game = demo_game();
        game.defered_init_new(Skill::Hard, 1, 3);
        game.ticker();
        assert_eq!(game.gamestate, GameState::Level);
        assert!(game.usergame);
        assert_eq!(game.player_msg_take().as_deref(), Some("A NEW GAME HAS BEGUN"));
        assert_eq!(game.player_msg_take(), None);
    }

    #[test]
    fn shareware_clamps_episode() {
        let mut game = Game::new(GameOptions::default(), GameMode::Shareware);
        game.defered_init_new(Skill::Medium, 3, 5);
        game.ticker();
        assert_eq!(game.options.episode, 1);
        assert_eq!(game.options.map, 1);
    }

    #[test]
    fn level_time_freezes_while_paused() {
        let mut game = demo_game();
        game.defered_init_new(Skill::Medium, 1, 1);
        game.ticker();
        game.ticker();
        assert_eq!(game.level_time, 1);
        game.toggle_pause_game();
        game.ticker();
        assert_eq!(game.level_time, 1);
    }

    #[test]
    fn start_title_returns_to_demo_loop() {
        let mut game = demo_game();
        game.defered_init_new(Skill::Medium, 1, 1);
        game.ticker();
        assert_eq!(game.gamestate, GameState::Level);
        game.start_title();
        game.ticker();
        assert_eq!(game.gamestate, GameState::DemoScreen);
        assert_eq!(game.current_page(), DemoPage::TitleScreen);
    }
}
