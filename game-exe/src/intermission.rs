//! End-of-level tally screen. Holds until the player presses space or
//! enter, then hands over to the finale.

use gamestate_traits::{
    GameTraits, Key, SCREENWIDTH, SubsystemTrait, TextColor, TextRender,
};

#[derive(Debug, Default)]
pub struct Intermission {
    tics: i32,
}

impl Intermission {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubsystemTrait for Intermission {
    fn init(&mut self, _game: &impl GameTraits) {
        self.tics = 0;
    }

    fn responder(&mut self, key: Key, game: &mut impl GameTraits) -> bool {
        match key {
            Key::Space | Key::Enter => {
                game.intermission_done();
                true
            }
            _ => false,
        }
    }

    fn ticker(&mut self, _game: &mut impl GameTraits) -> bool {
        self.tics += 1;
        false
    }

    fn draw(&mut self, sink: &mut impl TextRender) {
        let line = "LEVEL FINISHED";
        let x = SCREENWIDTH / 2 - sink.text_width(line) / 2;
        sink.draw_text(line, x, 60, TextColor::Yellow);

        let line = "PRESS SPACE TO CONTINUE";
        let x = SCREENWIDTH / 2 - sink.text_width(line) / 2;
        sink.draw_text(line, x, 120, TextColor::LightGray);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamestate::{Game, GameOptions};
    use gamestate_traits::{GameMode, GameState, Skill};

    #[test]
    fn space_moves_on_to_the_finale() {
        let mut game = Game::new(GameOptions::default(), GameMode::Registered);
        game.defered_init_new(Skill::Medium, 1, 1);
        game.ticker();
        game.level_done();
        assert_eq!(game.gamestate, GameState::Intermission);

        let mut inter = Intermission::new();
        assert!(!inter.responder(Key::Up, &mut game));
        assert!(inter.responder(Key::Space, &mut game));
        assert_eq!(game.gamestate, GameState::Finale);
    }
}
