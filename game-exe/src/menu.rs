//! A small in-game menu. Escape opens it, cursor keys move, enter
//! activates. Quitting asks for confirmation; while that prompt is up the
//! orchestrator suppresses the pause indicator.

use gamestate_traits::{
    GameTraits, Key, SCREENWIDTH, Skill, SubsystemTrait, TextColor, TextRender,
};

const ITEMS: [&str; 3] = ["NEW GAME", "END GAME", "QUIT GAME"];
const ITEM_X: i32 = 110;
const ITEM_Y: i32 = 60;
const ITEM_STEP: i32 = 10;

#[derive(Debug, Default)]
pub struct Menu {
    active: bool,
    cursor: usize,
    quit_confirm: bool,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn active(&self) -> bool {
        self.active
    }

    fn close(&mut self) {
        self.active = false;
        self.quit_confirm = false;
    }
}

impl SubsystemTrait for Menu {
    fn init(&mut self, _game: &impl GameTraits) {
        self.close();
        self.cursor = 0;
    }

    fn responder(&mut self, key: Key, game: &mut impl GameTraits) -> bool {
        if self.quit_confirm {
            if key == Key::Char('y') {
                game.quit_game();
            } else {
                // Anything else backs out of quitting.
                self.quit_confirm = false;
                game.set_quit_prompt(false);
            }
            return true;
        }

        if !self.active {
            if key == Key::Escape {
                self.active = true;
                self.cursor = 0;
                return true;
            }
            return false;
        }

        match key {
            Key::Escape => self.close(),
            Key::Up => self.cursor = self.cursor.checked_sub(1).unwrap_or(ITEMS.len() - 1),
            Key::Down => self.cursor = (self.cursor + 1) % ITEMS.len(),
            Key::Enter => match self.cursor {
                0 => {
                    game.defered_init_new(Skill::default(), 1, 1);
                    self.close();
                }
                1 => {
                    game.start_title();
                    self.close();
                }
                _ => {
                    self.quit_confirm = true;
                    game.set_quit_prompt(true);
                }
            },
            _ => {}
        }
        // An open menu eats every key.
        true
    }

    fn ticker(&mut self, _game: &mut impl GameTraits) -> bool {
        self.active
    }

    fn draw(&mut self, sink: &mut impl TextRender) {
        if self.quit_confirm {
            let line = "ARE YOU SURE YOU WANT TO QUIT? (Y/N)";
            let x = SCREENWIDTH / 2 - sink.text_width(line) / 2;
            sink.draw_text(line, x, 90, TextColor::White);
            return;
        }
        if !self.active {
            return;
        }
        for (i, item) in ITEMS.iter().enumerate() {
            let y = ITEM_Y + i as i32 * ITEM_STEP;
            let colour = if i == self.cursor {
                TextColor::White
            } else {
                TextColor::Gray
            };
            if i == self.cursor {
                sink.draw_text("*", ITEM_X - 10, y, TextColor::Red);
            }
            sink.draw_text(item, ITEM_X, y, colour);
        }
    }
}
