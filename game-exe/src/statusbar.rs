//! Text statusbar. Caches the player status during the ticker and draws
//! it as a single row under the viewport.

use gamestate_traits::{
    GameTraits, Key, PlayerStatus, SubsystemTrait, TextColor, TextRender,
};

const STATUS_Y: i32 = 190;

#[derive(Debug, Default)]
pub struct Statusbar {
    status: PlayerStatus,
}

impl Statusbar {
    pub fn new() -> Self {
        Self::default()
    }

    fn health_colour(&self) -> TextColor {
        if self.status.health > 50 {
            TextColor::Green
        } else if self.status.health > 20 {
            TextColor::Yellow
        } else {
            TextColor::Red
        }
    }
}

impl SubsystemTrait for Statusbar {
    fn init(&mut self, game: &impl GameTraits) {
        self.status = game.player_status();
    }

    fn responder(&mut self, _key: Key, _game: &mut impl GameTraits) -> bool {
        false
    }

    fn ticker(&mut self, game: &mut impl GameTraits) -> bool {
        self.status = game.player_status();
        false
    }

    fn draw(&mut self, sink: &mut impl TextRender) {
        let health = format!("HEALTH {}", self.status.health);
        sink.draw_text(&health, 8, STATUS_Y, self.health_colour());

        let armor = format!("ARMOR {}", self.status.armor);
        sink.draw_text(&armor, 96, STATUS_Y, TextColor::LightGray);

        let ammo = format!("AMMO {}/{}", self.status.ready_ammo, self.status.max_ammo);
        sink.draw_text(&ammo, 184, STATUS_Y, TextColor::LightGray);
    }
}
