//! A stand-in `PlayRenderer`. Owns the viewport geometry and produces a
//! deterministic per-frame workload in the counters so the diagnostic
//! overlay has live numbers to classify. A software renderer slots in
//! behind the same trait without touching the orchestrator.

use gamestate_traits::{FrameCounters, PlayRenderer, SCREENHEIGHT, TextRender};
use log::trace;

/// Height of the statusbar region excluded from the 3D viewport.
const SBARHEIGHT: i32 = 42;
const MIN_BLOCKS: usize = 3;
const MAX_BLOCKS: usize = 11;

pub struct HeadlessRenderer {
    screenblocks: usize,
    view_height: i32,
    view_window_y: i32,
    valid: bool,
    /// Frames rendered, drives the synthetic workload.
    frame: i32,
}

impl HeadlessRenderer {
    pub fn new(screenblocks: usize) -> Self {
        let mut rend = Self {
            screenblocks: 0,
            view_height: 0,
            view_window_y: 0,
            valid: false,
            frame: 0,
        };
        rend.set_view_size(screenblocks);
        rend
    }

    pub const fn screenblocks(&self) -> usize {
        self.screenblocks
    }
}

impl PlayRenderer for HeadlessRenderer {
    fn render_player_view(&mut self, counters: &mut FrameCounters, _sink: &mut impl TextRender) {
        self.frame += 1;
        // Stable pseudo-workload so the overlay shows moving values.
        let f = self.frame;
        counters.sprites = 16 + (f * 7) % 48;
        counters.segs = 64 + (f * 13) % 160;
        counters.check_planes = 12 + (f * 3) % 40;
        counters.find_planes = 8 + (f * 5) % 32;
        counters.openings = 256 + (f * 31) % 2048;
        trace!(
            "Rendered frame {f}: {} sprites, {} segs",
            counters.sprites, counters.segs
        );
    }

    fn draw_visplane_overlay(&mut self, _sink: &mut impl TextRender) {
        trace!("Visplane overlay pass");
    }

    fn set_view_size(&mut self, blocks: usize) {
        let blocks = blocks.clamp(MIN_BLOCKS, MAX_BLOCKS);
        self.screenblocks = blocks;
        if blocks == MAX_BLOCKS {
            self.view_height = SCREENHEIGHT;
            self.view_window_y = 0;
        } else {
            self.view_height = (blocks as i32 * (SCREENHEIGHT - SBARHEIGHT) / 10) & !7;
            self.view_window_y = (SCREENHEIGHT - SBARHEIGHT - self.view_height) / 2;
        }
        self.valid = true;
    }

    fn viewport_valid(&self) -> bool {
        self.valid
    }

    fn view_window_y(&self) -> i32 {
        self.view_window_y
    }
}
