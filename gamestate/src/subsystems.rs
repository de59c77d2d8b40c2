//! A subsystem is a self-contained overlay entity: it can initialise its
//! state, respond to input, tick, and draw. The methods on
//! `SubsystemTrait` provide access to `GameTraits` and the text sink.

use gamestate_traits::SubsystemTrait;

/// Blob of the various tickers required during gameplay; this exists
/// mostly to pass things around as some functions can end up with quite a
/// few args.
pub struct Subsystems<S, H, I, F, A>
where
    S: SubsystemTrait,
    H: SubsystemTrait,
    I: SubsystemTrait,
    F: SubsystemTrait,
    A: SubsystemTrait,
{
    /// Shows the player's current status, updated every tick.
    pub statusbar: S,
    /// Timeout-displayed HUD messages.
    pub hud_msgs: H,
    /// End-of-level tally; its ticker calls `level_done()` handling.
    pub intermission: I,
    /// The episode-end text screen.
    pub finale: F,
    /// Overhead map, mutually exclusive with the visplane overlay.
    pub automap: A,
}
