//! A buffering render sink. Draw calls append to an ordered operation log
//! for the current frame; `present` closes the frame. The log from the last
//! presented frame stays readable until the next frame begins drawing,
//! which is what the loop (and the tests) inspect.

use log::trace;
use render_traits::{TextColor, TextMeasure, TextRender};

/// Pixel width of one glyph in the small HUD font.
const FONT_WIDTH: i32 = 4;

/// One recorded sink operation, in draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOp {
    Text {
        text: String,
        x: i32,
        y: i32,
        colour: TextColor,
    },
    Bar {
        x: i32,
        y: i32,
        width: i32,
        colour: TextColor,
    },
    RawScreen {
        bytes: usize,
    },
    Patch {
        bytes: usize,
        x: i32,
        y: i32,
    },
    /// Frame boundary marker.
    Present,
}

#[derive(Debug, Default)]
pub struct TextSurface {
    ops: Vec<SinkOp>,
    presented: bool,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The operation log of the frame being drawn, or of the last
    /// presented frame if nothing has been drawn since.
    pub fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    /// Iterate the text operations of the frame, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, i32, i32, TextColor)> {
        self.ops.iter().filter_map(|op| match op {
            SinkOp::Text { text, x, y, colour } => Some((text.as_str(), *x, *y, *colour)),
            _ => None,
        })
    }

    pub fn presents(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SinkOp::Present))
            .count()
    }

    /// First draw after a present starts a fresh frame.
    fn frame_boundary(&mut self) {
        if self.presented {
            self.ops.clear();
            self.presented = false;
        }
    }
}

impl TextMeasure for TextSurface {
    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * FONT_WIDTH
    }
}

impl TextRender for TextSurface {
    fn draw_text(&mut self, text: &str, x: i32, y: i32, colour: TextColor) {
        self.frame_boundary();
        self.ops.push(SinkOp::Text {
            text: text.to_string(),
            x,
            y,
            colour,
        });
    }

    fn draw_bar(&mut self, x: i32, y: i32, width: i32, colour: TextColor) {
        self.frame_boundary();
        self.ops.push(SinkOp::Bar { x, y, width, colour });
    }

    fn draw_raw_screen(&mut self, data: &[u8]) {
        self.frame_boundary();
        self.ops.push(SinkOp::RawScreen { bytes: data.len() });
    }

    fn draw_patch(&mut self, data: &[u8], x: i32, y: i32) {
        self.frame_boundary();
        self.ops.push(SinkOp::Patch {
            bytes: data.len(),
            x,
            y,
        });
    }

    fn present(&mut self) {
        self.ops.push(SinkOp::Present);
        self.presented = true;
        trace!("Presented frame with {} ops", self.ops.len());
    }
}
