//! Transient HUD text: the one-line player message at the top of the
//! screen, and the two-line critical message that overrides everything
//! else on screen (it signals engine-critical conditions like counter
//! overflows the player must see immediately, so the orchestrator draws it
//! last, above the menu).

use crl_stats::blink_phase;
use gamestate_traits::{
    GameTraits, Key, SCREENWIDTH, SubsystemTrait, TICRATE, TextColor, TextRender,
};

/// How long a player message stays up.
const MESSAGE_TICS: i32 = 4 * TICRATE;

/// The player message line. Picks up queued messages from the game each
/// tic and counts them down.
#[derive(Debug, Default)]
pub struct Messages {
    line: Option<String>,
    tics: i32,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        if self.tics > 0 {
            self.line.as_deref()
        } else {
            None
        }
    }
}

impl SubsystemTrait for Messages {
    fn init(&mut self, _game: &impl GameTraits) {
        self.line = None;
        self.tics = 0;
    }

    fn responder(&mut self, _key: Key, _game: &mut impl GameTraits) -> bool {
        false
    }

    fn ticker(&mut self, game: &mut impl GameTraits) -> bool {
        if let Some(msg) = game.player_msg_take() {
            self.line = Some(msg);
            self.tics = MESSAGE_TICS;
        }
        if self.tics > 0 {
            self.tics -= 1;
        }
        false
    }

    fn draw(&mut self, sink: &mut impl TextRender) {
        if let Some(line) = self.current() {
            let x = SCREENWIDTH / 2 - sink.text_width(line) / 2;
            sink.draw_text(line, x, 1, TextColor::White);
        }
    }
}

/// Critical message pair with its remaining display tics. Held by the
/// game, drawn by the orchestrator as the topmost layer.
#[derive(Debug, Default, Clone)]
pub struct CriticalMessage {
    pub line1: String,
    pub line2: String,
    pub tics: i32,
}

impl CriticalMessage {
    pub fn set(&mut self, line1: impl Into<String>, line2: impl Into<String>, tics: i32) {
        self.line1 = line1.into();
        self.line2 = line2.into();
        self.tics = tics;
    }

    pub fn ticker(&mut self) {
        if self.tics > 0 {
            self.tics -= 1;
        }
    }

    pub fn active(&self) -> bool {
        self.tics > 0 && !self.line1.is_empty() && !self.line2.is_empty()
    }
}

/// Draws the critical pair on the second and third text rows, flashing
/// with the tic cadence so it cannot be mistaken for a normal message.
pub fn draw_critical(msg: &CriticalMessage, tic: u32, sink: &mut impl TextRender) {
    if !msg.active() {
        return;
    }
    let colour = if blink_phase(tic) {
        TextColor::Gray
    } else {
        TextColor::White
    };
    sink.draw_text(&msg.line1, 10, 10, colour);
    sink.draw_text(&msg.line2, 10, 20, colour);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamestate_traits::{GameMode, PlayerStatus, Skill};

    #[derive(Default)]
    struct TestGame {
        msg: Option<String>,
    }

    impl GameTraits for TestGame {
        fn defered_init_new(&mut self, _s: Skill, _e: usize, _m: usize) {}
        fn get_mode(&self) -> GameMode {
            GameMode::Shareware
        }
        fn toggle_pause_game(&mut self) {}
        fn quit_game(&mut self) {}
        fn set_quit_prompt(&mut self, _up: bool) {}
        fn quit_prompt(&self) -> bool {
            false
        }
        fn level_done(&mut self) {}
        fn intermission_done(&mut self) {}
        fn finale_done(&mut self) {}
        fn start_title(&mut self) {}
        fn player_status(&self) -> PlayerStatus {
            PlayerStatus::default()
        }
        fn player_msg_take(&mut self) -> Option<String> {
            self.msg.take()
        }
    }

    #[test]
    fn message_counts_down_and_expires() {
        let mut game = TestGame {
            msg: Some("A NEW GAME HAS BEGUN".into()),
        };
        let mut messages = Messages::new();

        messages.ticker(&mut game);
        assert_eq!(messages.current(), Some("A NEW GAME HAS BEGUN"));

        for _ in 0..MESSAGE_TICS {
            messages.ticker(&mut game);
        }
        assert_eq!(messages.current(), None);
    }

    #[test]
    fn newer_message_replaces_older() {
        let mut game = TestGame {
            msg: Some("FIRST".into()),
        };
        let mut messages = Messages::new();
        messages.ticker(&mut game);

        game.msg = Some("SECOND".into());
        messages.ticker(&mut game);
        assert_eq!(messages.current(), Some("SECOND"));
    }

    #[test]
    fn critical_needs_both_lines() {
        let mut msg = CriticalMessage::default();
        assert!(!msg.active());
        msg.set("RENDERER OVERFLOW", "", 35);
        assert!(!msg.active());
        msg.set("RENDERER OVERFLOW", "VISPLANE LIMIT HIT", 2);
        assert!(msg.active());
        msg.ticker();
        msg.ticker();
        assert!(!msg.active());
    }
}
