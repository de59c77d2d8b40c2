//! The contracts between the frame orchestrator and whatever actually puts
//! text and pixels on screen. The engine core never talks to a video surface
//! directly; it emits `DrawCommand` and hands them to a `TextRender` sink.

use std::fmt;

/// Base horizontal resolution all widget offsets are tuned against.
pub const SCREENWIDTH: i32 = 320;
/// Base vertical resolution.
pub const SCREENHEIGHT: i32 = 200;

/// Translation-table colours available to HUD text. These map to the
/// `cr[]` colour translation ranges of the original renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Gray,
    LightGray,
    White,
    Green,
    Yellow,
    Red,
    Brown,
    Indigo,
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextColor::Gray => "gray",
            TextColor::LightGray => "lightgray",
            TextColor::White => "white",
            TextColor::Green => "green",
            TextColor::Yellow => "yellow",
            TextColor::Red => "red",
            TextColor::Brown => "brown",
            TextColor::Indigo => "indigo",
        };
        f.write_str(name)
    }
}

/// A single buffered draw operation. The widget compositor produces an
/// ordered `Vec<DrawCommand>` per frame; ordering is significant since
/// later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Text {
        text: String,
        x: i32,
        y: i32,
        colour: TextColor,
    },
    /// A horizontal gauge segment, used by the demo progress bar.
    Bar {
        x: i32,
        y: i32,
        width: i32,
        colour: TextColor,
    },
}

impl DrawCommand {
    pub fn text(text: impl Into<String>, x: i32, y: i32, colour: TextColor) -> Self {
        Self::Text {
            text: text.into(),
            x,
            y,
            colour,
        }
    }
}

/// Font metrics only. Split out from `TextRender` so the compositor can
/// right-align text without mutable access to the sink.
pub trait TextMeasure {
    /// Pixel width of `text` in the small HUD font.
    fn text_width(&self, text: &str) -> i32;
}

/// The output sink. Accepts positioned text plus an explicit present call.
/// Implementations must never block inside `draw_*`; `present` flips the
/// finished frame to screen.
pub trait TextRender: TextMeasure {
    fn draw_text(&mut self, text: &str, x: i32, y: i32, colour: TextColor);

    fn draw_bar(&mut self, x: i32, y: i32, width: i32, colour: TextColor);

    /// Blit a full-screen raw page (title/credit screens). The blob comes
    /// straight from the resource loader.
    fn draw_raw_screen(&mut self, data: &[u8]);

    /// Blit a positioned patch (the advisory notice, the PAUSED graphic).
    fn draw_patch(&mut self, data: &[u8], x: i32, y: i32);

    /// Flush buffered drawing to the display.
    fn present(&mut self);
}

/// Replay a compositor command list into a sink, in order.
pub fn run_commands(commands: &[DrawCommand], sink: &mut impl TextRender) {
    for cmd in commands {
        match cmd {
            DrawCommand::Text { text, x, y, colour } => sink.draw_text(text, *x, *y, *colour),
            DrawCommand::Bar {
                x,
                y,
                width,
                colour,
            } => sink.draw_bar(*x, *y, *width, *colour),
        }
    }
}
