//! Overhead map placeholder. Mutually exclusive with the visplane overlay;
//! the orchestrator draws exactly one of the two per level frame.

use gamestate_traits::{GameTraits, Key, SubsystemTrait, TextColor, TextRender};

#[derive(Debug, Default)]
pub struct Automap {
    player_x: i32,
    player_y: i32,
}

impl Automap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_player_pos(&mut self, x: i32, y: i32) {
        self.player_x = x;
        self.player_y = y;
    }
}

impl SubsystemTrait for Automap {
    fn init(&mut self, _game: &impl GameTraits) {}

    fn responder(&mut self, _key: Key, _game: &mut impl GameTraits) -> bool {
        false
    }

    fn ticker(&mut self, _game: &mut impl GameTraits) -> bool {
        false
    }

    fn draw(&mut self, sink: &mut impl TextRender) {
        sink.draw_text("AUTOMAP", 4, 8, TextColor::White);
        let pos = format!("({}, {})", self.player_x, self.player_y);
        sink.draw_text(&pos, 4, 18, TextColor::LightGray);
    }
}
