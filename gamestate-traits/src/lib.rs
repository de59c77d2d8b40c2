//! Exposes an API of sorts that allows crates for things like the statusbar
//! and intermission screens to get certain information they require or cause
//! a gamestate change, without depending on the `gamestate` crate itself.
//!
//! Also home to the collaborator contracts: the renderer that fills the
//! frame counters, and the resource loader that resolves named assets.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

pub use crl_stats::{FrameCounters, TICRATE};
pub use render_traits::{
    DrawCommand, SCREENHEIGHT, SCREENWIDTH, TextColor, TextMeasure, TextRender,
};

/// The current state of the game: whether we are playing a level, gazing at
/// the intermission screen, the finale, or the attract-demo loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    /// Where all the actual gameplay happens, including net and deathmatch
    /// play.
    Level,
    Intermission,
    Finale,
    /// The default startup mode: cycling title pages and recorded demos
    /// until a game starts.
    DemoScreen,
}

/// Which release of the game assets is loaded. Shareware lacks episodes 2+
/// and shows the mail-order page in the attract loop.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd)]
pub enum GameMode {
    #[default]
    Shareware,
    Registered,
    Retail,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd)]
pub enum Skill {
    Baby,
    Easy,
    #[default]
    Medium,
    Hard,
    Nightmare,
}

impl FromStr for Skill {
    type Err = std::io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Baby),
            "1" => Ok(Self::Easy),
            "2" => Ok(Self::Medium),
            "3" => Ok(Self::Hard),
            "4" => Ok(Self::Nightmare),
            _ => Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "Invalid skill, use 0-4",
            )),
        }
    }
}

/// A drained input event. The event source collaborator produces a finite
/// queue of these per frame; the responder chain consumes them with
/// first-match-wins semantics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Basic per-player numbers the statusbar displays.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerStatus {
    pub health: i32,
    pub armor: i32,
    pub ready_ammo: i32,
    pub max_ammo: i32,
}

/// Universal game traits. To be implemented by the Game.
pub trait GameTraits {
    /// Helper to start a new game, e.g. from menus.
    fn defered_init_new(&mut self, skill: Skill, episode: usize, map: usize);

    /// Shareware, registered and retail differ in available episodes and
    /// which attract pages are shown.
    fn get_mode(&self) -> GameMode;

    /// Pauses the game loop (stops gameplay input and thinkers running).
    fn toggle_pause_game(&mut self);

    /// Exit the game. There will be no confirmation.
    fn quit_game(&mut self);

    /// Raise or clear the quit confirmation prompt. While it is up the
    /// pause indicator is suppressed.
    fn set_quit_prompt(&mut self, up: bool);

    fn quit_prompt(&self) -> bool;

    /// Tell the game the level is completed and the next state should begin.
    fn level_done(&mut self);

    /// The intermission tally is finished; move on to the finale.
    fn intermission_done(&mut self);

    /// The finale has played out; fall back to the attract loop.
    fn finale_done(&mut self);

    /// Drop back to the attract-demo loop.
    fn start_title(&mut self);

    /// Basic player statistics (console player).
    fn player_status(&self) -> PlayerStatus;

    /// Takes the player message waiting and replaces it with None.
    fn player_msg_take(&mut self) -> Option<String>;
}

/// To be implemented by subsystem type things (HUD, automap, statusbar,
/// intermission, menu).
pub trait SubsystemTrait {
    /// Possibly initialise the subsystem.
    fn init(&mut self, game: &impl GameTraits);

    /// Return true if the responder took the event.
    fn responder(&mut self, key: Key, game: &mut impl GameTraits) -> bool;

    /// Responds to changes in the game or affects the game. Returning true
    /// means the subsystem took control of the tic (menus do this).
    fn ticker(&mut self, game: &mut impl GameTraits) -> bool;

    /// Draw this subsystem to the sink.
    fn draw(&mut self, sink: &mut impl TextRender);
}

/// Renderer collaborator. Must fully populate `FrameCounters` before
/// returning from `render_player_view`; the compositor reads them in the
/// same display pass.
pub trait PlayRenderer {
    fn render_player_view(&mut self, counters: &mut FrameCounters, sink: &mut impl TextRender);

    /// The overlayed visplane view shown when the automap is closed.
    fn draw_visplane_overlay(&mut self, sink: &mut impl TextRender);

    /// Recompute viewport geometry for a new view size. Must happen before
    /// any rendering call in the same frame.
    fn set_view_size(&mut self, blocks: usize);

    fn viewport_valid(&self) -> bool;

    /// Top of the 3D viewport, used to place the pause indicator.
    fn view_window_y(&self) -> i32;
}

#[derive(Debug)]
pub enum ResourceError {
    NotFound(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound(name) => write!(f, "resource not found: {name}"),
        }
    }
}

impl Error for ResourceError {}

/// Resource loader collaborator: resolves named graphical/text assets.
pub trait ResourceLoader {
    /// Returns the raw asset bytes, or `NotFound`. Callers treat a miss
    /// during frame composition as soft: the widget or page is omitted.
    fn get(&self, name: &str) -> Result<Vec<u8>, ResourceError>;
}
