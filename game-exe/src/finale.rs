//! Episode-end text screen. Reveals its text a character at a time, then
//! waits for the player before dropping back to the attract loop.

use gamestate_traits::{GameTraits, Key, SubsystemTrait, TextColor, TextRender};

const FINALE_TEXT: [&str; 3] = [
    "WITH THE DESTRUCTION OF THE IRON",
    "LICHES AND THEIR MINIONS, THE LAST",
    "OF THE UNDEAD ARE CLEARED FROM THIS PLANE.",
];
/// Tics per revealed character.
const REVEAL_RATE: i32 = 3;

#[derive(Debug, Default)]
pub struct Finale {
    tics: i32,
}

impl Finale {
    pub fn new() -> Self {
        Self::default()
    }

    fn revealed(&self) -> usize {
        (self.tics / REVEAL_RATE).max(0) as usize
    }
}

impl SubsystemTrait for Finale {
    fn init(&mut self, _game: &impl GameTraits) {
        self.tics = 0;
    }

    fn responder(&mut self, key: Key, game: &mut impl GameTraits) -> bool {
        match key {
            Key::Space | Key::Enter => {
                game.finale_done();
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
        let mut remaining = self.revealed();
        for (i, line) in FINALE_TEXT.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let shown = remaining.min(line.len());
            sink.draw_text(&line[..shown], 20, 40 + i as i32 * 10, TextColor::White);
            remaining -= shown;
        }
    }
}
