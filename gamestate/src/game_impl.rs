//! The `GameTraits` impl: the slim interface subsystems (menu, statusbar,
//! intermission, finale) use to read from or act on the `Game`.

use crate::{Game, GameAction};
use gamestate_traits::{GameMode, GameTraits, PlayerStatus, Skill};

impl GameTraits for Game {
    /// Doom function name `G_DeferedInitNew`
    fn defered_init_new(&mut self, skill: Skill, episode: usize, map: usize) {
        self.game_action = GameAction::NewGame {
            skill,
            episode,
            map,
        };
    }

    fn get_mode(&self) -> GameMode {
        self.game_mode
    }

    fn toggle_pause_game(&mut self) {
        self.paused = !self.paused;
    }

    fn quit_game(&mut self) {
        self.set_running(false);
    }

    fn set_quit_prompt(&mut self, up: bool) {
        self.ask_for_quit = up;
    }

    fn quit_prompt(&self) -> bool {
        self.ask_for_quit
    }

    fn level_done(&mut self) {
        self.gamestate = gamestate_traits::GameState::Intermission;
    }

    fn intermission_done(&mut self) {
        self.gamestate = gamestate_traits::GameState::Finale;
    }

    fn finale_done(&mut self) {
        self.start_title();
    }

    fn start_title(&mut self) {
        self.game_action = GameAction::Title;
    }

    fn player_status(&self) -> PlayerStatus {
        self.player.status
    }

    fn player_msg_take(&mut self) -> Option<String> {
        self.pending_msg.take()
    }
}
