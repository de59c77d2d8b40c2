//! The diagnostic widget compositor.
//!
//! `compose` is a pure function: given the counters the renderer just
//! filled, the limit table, the user's widget config and the current tic it
//! returns the ordered draw-command list for every enabled overlay widget.
//! Calling it twice with the same inputs yields the same commands, and it
//! never touches the counters it reads. The orchestrator replays the list
//! into the sink after the player view is drawn.
//!
//! Screen offsets are hand-tuned against the 320x200 base resolution and
//! chosen so no two widgets can overlap.

use crl_stats::{
    CounterLimits, FrameCounters, TICRATE, WidgetConfig, WidgetMode, label_color, powerup_color,
    value_color,
};
use render_traits::{DrawCommand, SCREENHEIGHT, SCREENWIDTH, TextColor, TextMeasure};

/// Player data the widgets display. Gathered by the game ticker, read-only
/// here.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerView {
    pub x: i32,
    pub y: i32,
    pub angle: i32,
    pub kills: i32,
    pub total_kills: i32,
    pub items: i32,
    pub total_items: i32,
    pub secrets: i32,
    pub total_secrets: i32,
    /// Frag counts in team order green, indigo, brown, red.
    pub frags: [i32; 4],
}

/// Demo playback/recording progress for the timer and bar widgets.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoView {
    pub playback: bool,
    pub recording: bool,
    pub elapsed_tics: i32,
    pub total_tics: i32,
}

/// Remaining powerup tics, zero when not active.
#[derive(Debug, Default, Clone, Copy)]
pub struct PowerupView {
    pub invulnerability: i32,
    pub invisibility: i32,
    pub radiation: i32,
    pub amplifier: i32,
}

/// Health of the mobj under the crosshair, if any.
#[derive(Debug, Clone, Copy)]
pub struct TargetView {
    pub health: i32,
    pub max_health: i32,
}

/// Everything `compose` reads for one frame. Built fresh by the
/// orchestrator each display pass; nothing in here outlives the frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'f> {
    pub counters: &'f FrameCounters,
    pub limits: &'f CounterLimits,
    pub config: &'f WidgetConfig,
    pub tic: u32,
    pub fps: u32,
    pub level_time: i32,
    pub automap_active: bool,
    pub deathmatch: bool,
    pub player_in_game: [bool; 4],
    pub player: PlayerView,
    pub demo: DemoView,
    pub powerups: PowerupView,
    pub target: Option<TargetView>,
}

/// Which config mode gates a counter widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WidgetGroup {
    Playstate,
    Render,
}

/// One row of the counter readout. Adding a counter widget is a table
/// entry, not new control flow.
struct CounterWidget {
    label: &'static str,
    y: i32,
    group: WidgetGroup,
    value: fn(&FrameCounters) -> i32,
    limit: fn(&CounterLimits) -> i32,
}

const LABEL_X: i32 = 0;
const VALUE_X: i32 = 32;

const COUNTER_WIDGETS: [CounterWidget; 6] = [
    CounterWidget {
        label: "PLT:",
        y: 70,
        group: WidgetGroup::Playstate,
        value: |c| c.plats,
        limit: |l| l.plats,
    },
    CounterWidget {
        label: "ANI:",
        y: 80,
        group: WidgetGroup::Playstate,
        value: |c| c.line_anims,
        limit: |l| l.line_anims,
    },
    CounterWidget {
        label: "SPR:",
        y: 100,
        group: WidgetGroup::Render,
        value: |c| c.sprites,
        limit: |l| l.sprites,
    },
    CounterWidget {
        label: "SEG:",
        y: 110,
        group: WidgetGroup::Render,
        value: |c| c.segs,
        limit: |l| l.segs,
    },
    CounterWidget {
        label: "PLN:",
        y: 120,
        group: WidgetGroup::Render,
        value: |c| c.total_planes(),
        limit: |l| l.planes,
    },
    CounterWidget {
        label: "OPN:",
        y: 130,
        group: WidgetGroup::Render,
        value: |c| c.openings,
        limit: |l| l.openings,
    },
];

/// Produce the frame's widget draw commands. Order matters only for
/// paint-over; positions are disjoint by construction.
pub fn compose(view: &FrameView, fonts: &impl TextMeasure) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(24);

    draw_coords(view, &mut out);
    draw_counters(view, &mut out);
    draw_kis(view, fonts, &mut out);
    draw_powerups(view, fonts, &mut out);
    draw_target_health(view, &mut out);
    draw_demo_timer(view, fonts, &mut out);
    draw_demo_bar(view, &mut out);
    draw_fps(view, fonts, &mut out);

    out
}

fn draw_coords(view: &FrameView, out: &mut Vec<DrawCommand>) {
    if view.config.coords == WidgetMode::Off {
        return;
    }
    let p = &view.player;
    out.push(DrawCommand::text("X:", LABEL_X, 30, TextColor::Gray));
    out.push(DrawCommand::text("Y:", LABEL_X, 40, TextColor::Gray));
    out.push(DrawCommand::text("ANG:", LABEL_X, 50, TextColor::Gray));
    out.push(DrawCommand::text(format!("{}", p.x), 16, 30, TextColor::Green));
    out.push(DrawCommand::text(format!("{}", p.y), 16, 40, TextColor::Green));
    out.push(DrawCommand::text(
        format!("{}", p.angle),
        32,
        50,
        TextColor::Green,
    ));
}

fn draw_counters(view: &FrameView, out: &mut Vec<DrawCommand>) {
    for w in COUNTER_WIDGETS.iter() {
        let mode = match w.group {
            WidgetGroup::Playstate => view.config.playstate,
            WidgetGroup::Render => view.config.render_stats,
        };
        let value = (w.value)(view.counters);
        let limit = (w.limit)(view.limits);

        let show = match mode {
            WidgetMode::Off => false,
            WidgetMode::Always => true,
            WidgetMode::OverLimit => value > limit,
        };
        if !show {
            continue;
        }

        out.push(DrawCommand::text(
            w.label,
            LABEL_X,
            w.y,
            label_color(value, limit, view.tic),
        ));
        out.push(DrawCommand::text(
            format!("{value}/{limit}"),
            VALUE_X,
            w.y,
            value_color(value, limit, view.tic),
        ));
    }
}

/// Colour for a collected/total pair: all collected (or nothing to
/// collect) is green, none collected red, partial yellow.
fn kis_color(have: i32, total: i32) -> TextColor {
    if total == 0 || have >= total {
        TextColor::Green
    } else if have == 0 {
        TextColor::Red
    } else {
        TextColor::Yellow
    }
}

fn draw_kis(view: &FrameView, fonts: &impl TextMeasure, out: &mut Vec<DrawCommand>) {
    if view.config.kis_stats == WidgetMode::Off {
        return;
    }
    // Sits just under the counter block; the automap claims the bottom
    // rows so shift up while it is open.
    let y = if view.automap_active { 152 } else { 160 };

    if !view.deathmatch {
        let p = &view.player;
        let mut x = LABEL_X;
        let pairs = [
            ("K ", p.kills, p.total_kills),
            ("I ", p.items, p.total_items),
            ("S ", p.secrets, p.total_secrets),
        ];
        for (label, have, total) in pairs {
            out.push(DrawCommand::text(label, x, y, TextColor::Gray));
            x += fonts.text_width(label);
            let text = format!("{have}/{total} ");
            let width = fonts.text_width(&text);
            out.push(DrawCommand::text(text, x, y, kis_color(have, total)));
            x += width;
        }
    } else {
        // Four team columns, one per occupied slot. Absent slots emit
        // nothing so the remaining columns pack left.
        let teams = [
            ("G ", TextColor::Green),
            ("I ", TextColor::Indigo),
            ("B ", TextColor::Brown),
            ("R ", TextColor::Red),
        ];
        let mut x = LABEL_X;
        for (slot, (label, colour)) in teams.iter().enumerate() {
            if !view.player_in_game[slot] {
                continue;
            }
            out.push(DrawCommand::text(*label, x, y, *colour));
            x += fonts.text_width(label);
            let text = format!("{} ", view.player.frags[slot]);
            out.push(DrawCommand::text(text.clone(), x, y, *colour));
            x += fonts.text_width(&text);
        }
    }
}

fn draw_powerups(view: &FrameView, fonts: &impl TextMeasure, out: &mut Vec<DrawCommand>) {
    if view.config.powerups == WidgetMode::Off {
        return;
    }
    // Label, remaining seconds, full duration in seconds, row.
    let rows = [
        ("INVL:", view.powerups.invulnerability, 30, 108),
        ("INVS:", view.powerups.invisibility, 60, 117),
        ("RAD:", view.powerups.radiation, 60, 126),
        ("AMP:", view.powerups.amplifier, 120, 135),
    ];
    for (label, remaining, max, y) in rows {
        if remaining <= 0 {
            continue;
        }
        out.push(DrawCommand::text(
            label,
            292 - fonts.text_width(label),
            y,
            TextColor::Gray,
        ));
        out.push(DrawCommand::text(
            format!("{remaining}"),
            296,
            y,
            powerup_color(remaining, max),
        ));
    }
}

fn draw_target_health(view: &FrameView, out: &mut Vec<DrawCommand>) {
    if !view.config.target_health {
        return;
    }
    let Some(target) = view.target else {
        return;
    };
    out.push(DrawCommand::text("TGT:", LABEL_X, 140, TextColor::Gray));
    out.push(DrawCommand::text(
        format!("{}/{}", target.health, target.max_health),
        VALUE_X,
        140,
        powerup_color(target.health, target.max_health),
    ));
}

fn format_time(tics: i32) -> String {
    let seconds = tics.max(0) / TICRATE;
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

fn draw_demo_timer(view: &FrameView, fonts: &impl TextMeasure, out: &mut Vec<DrawCommand>) {
    let demo = &view.demo;
    let timer = view.config.demo_timer;

    let tics = if demo.playback && timer.shows_playback() {
        if view.config.demo_timer_countdown {
            demo.total_tics - demo.elapsed_tics
        } else {
            demo.elapsed_tics
        }
    } else if demo.recording && timer.shows_recording() {
        view.level_time
    } else {
        return;
    };

    let text = format_time(tics);
    let x = SCREENWIDTH - 8 - fonts.text_width(&text);
    out.push(DrawCommand::text(text, x, 10, TextColor::LightGray));
}

fn draw_demo_bar(view: &FrameView, out: &mut Vec<DrawCommand>) {
    if !view.config.demo_bar || !view.demo.playback {
        return;
    }
    if view.demo.total_tics <= 0 {
        // Unknown length; a bar would be meaningless.
        return;
    }
    let progress =
        (view.demo.elapsed_tics.clamp(0, view.demo.total_tics) as i64 * SCREENWIDTH as i64
            / view.demo.total_tics as i64) as i32;
    out.push(DrawCommand::Bar {
        x: 0,
        y: SCREENHEIGHT - 2,
        width: SCREENWIDTH,
        colour: TextColor::Gray,
    });
    out.push(DrawCommand::Bar {
        x: 0,
        y: SCREENHEIGHT - 2,
        width: progress,
        colour: TextColor::White,
    });
}

fn draw_fps(view: &FrameView, fonts: &impl TextMeasure, out: &mut Vec<DrawCommand>) {
    if !view.config.show_fps {
        return;
    }
    let fps = format!("{}", view.fps);
    let label = "FPS";
    // Small width adjustments so a thinner or thicker custom font still
    // lands the pair flush to the right edge.
    out.push(DrawCommand::text(
        fps.clone(),
        SCREENWIDTH - 11 - fonts.text_width(&fps) - fonts.text_width(label),
        30,
        TextColor::Gray,
    ));
    out.push(DrawCommand::text(
        label,
        SCREENWIDTH - 7 - fonts.text_width(label),
        30,
        TextColor::Gray,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crl_stats::{CompatMode, DemoTimerMode};

    /// Fixed-advance font, 4px per char like the small HUD font's narrow
    /// glyphs.
    struct FixedFont;

    impl TextMeasure for FixedFont {
        fn text_width(&self, text: &str) -> i32 {
            text.chars().count() as i32 * 4
        }
    }

    fn base_view<'f>(
        counters: &'f FrameCounters,
        limits: &'f CounterLimits,
        config: &'f WidgetConfig,
    ) -> FrameView<'f> {
        FrameView {
            counters,
            limits,
            config,
            tic: 0,
            fps: 35,
            level_time: 0,
            automap_active: false,
            deathmatch: false,
            player_in_game: [true, false, false, false],
            player: PlayerView::default(),
            demo: DemoView::default(),
            powerups: PowerupView::default(),
            target: None,
        }
    }

    fn texts(cmds: &[DrawCommand]) -> Vec<(String, i32, i32, TextColor)> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, x, y, colour } => {
                    Some((text.clone(), *x, *y, *colour))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn compose_is_idempotent() {
        let mut counters = FrameCounters::default();
        counters.sprites = 130;
        counters.plats = 12;
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            coords: WidgetMode::Always,
            playstate: WidgetMode::Always,
            render_stats: WidgetMode::Always,
            show_fps: true,
            ..Default::default()
        };
        let view = base_view(&counters, &limits, &config);

        let a = compose(&view, &FixedFont);
        let b = compose(&view, &FixedFont);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn over_limit_mode_emits_nothing_while_under() {
        let mut counters = FrameCounters::default();
        counters.sprites = 90;
        counters.segs = 100;
        counters.check_planes = 30;
        counters.openings = 500;
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            render_stats: WidgetMode::OverLimit,
            playstate: WidgetMode::OverLimit,
            ..Default::default()
        };
        let view = base_view(&counters, &limits, &config);

        assert!(compose(&view, &FixedFont).is_empty());
    }

    #[test]
    fn over_limit_mode_surfaces_the_offender_only() {
        let mut counters = FrameCounters::default();
        counters.sprites = 130; // over 128
        counters.segs = 100;
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            render_stats: WidgetMode::OverLimit,
            ..Default::default()
        };
        let view = base_view(&counters, &limits, &config);

        let cmds = texts(&compose(&view, &FixedFont));
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].0, "SPR:");
        assert_eq!(cmds[1].0, "130/128");
    }

    #[test]
    fn sprite_counter_colour_families() {
        let mut counters = FrameCounters::default();
        counters.sprites = 130;
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            render_stats: WidgetMode::Always,
            ..Default::default()
        };
        let mut view = base_view(&counters, &limits, &config);

        // 130 > 128: both scales in the over-budget family whatever the
        // blink phase.
        for tic in [0u32, 8] {
            view.tic = tic;
            let cmds = texts(&compose(&view, &FixedFont));
            let (label, value) = (&cmds[0], &cmds[1]);
            assert!(matches!(label.3, TextColor::Gray | TextColor::LightGray));
            assert!(matches!(value.3, TextColor::Red | TextColor::Yellow));
        }

        // Exactly at the limit: neutral/equal family on both scales.
        let mut counters = FrameCounters::default();
        counters.sprites = 128;
        let view2 = FrameView {
            counters: &counters,
            ..view
        };
        let cmds = texts(&compose(&view2, &FixedFont));
        assert_eq!(cmds[0].3, TextColor::LightGray);
        assert_eq!(cmds[1].3, TextColor::Yellow);
    }

    #[test]
    fn plane_widget_gates_on_combined_total() {
        let mut counters = FrameCounters::default();
        counters.check_planes = 70;
        counters.find_planes = 70; // 140 combined, each under 128 alone
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            render_stats: WidgetMode::OverLimit,
            ..Default::default()
        };
        let view = base_view(&counters, &limits, &config);

        let cmds = texts(&compose(&view, &FixedFont));
        assert_eq!(cmds[0].0, "PLN:");
        assert_eq!(cmds[1].0, "140/128");
    }

    #[test]
    fn frag_columns_are_contiguous_and_ordered() {
        let counters = FrameCounters::default();
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            kis_stats: WidgetMode::Always,
            ..Default::default()
        };
        let mut view = base_view(&counters, &limits, &config);
        view.deathmatch = true;
        view.player.frags = [3, 5, 7, 9];

        // Green and red present, indigo and brown absent.
        view.player_in_game = [true, false, false, true];
        let cmds = texts(&compose(&view, &FixedFont));
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds[0].0, "G ");
        assert_eq!(cmds[2].0, "R ");
        // Red column starts exactly where the green column ended.
        let green_end = cmds[1].1 + FixedFont.text_width(&cmds[1].0);
        assert_eq!(cmds[2].1, green_end);

        // All four present keeps team order.
        view.player_in_game = [true; 4];
        let cmds = texts(&compose(&view, &FixedFont));
        let labels: Vec<&str> = cmds.iter().step_by(2).map(|c| c.0.as_str()).collect();
        assert_eq!(labels, ["G ", "I ", "B ", "R "]);
        let mut x = 0;
        for c in &cmds {
            assert_eq!(c.1, x, "columns must pack with no gap");
            x += FixedFont.text_width(&c.0);
        }
    }

    #[test]
    fn kis_replaced_by_frags_in_deathmatch() {
        let counters = FrameCounters::default();
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            kis_stats: WidgetMode::Always,
            ..Default::default()
        };
        let mut view = base_view(&counters, &limits, &config);
        view.player.kills = 5;
        view.player.total_kills = 10;

        let single = texts(&compose(&view, &FixedFont));
        assert_eq!(single[0].0, "K ");
        assert_eq!(single[1].0, "5/10 ");
        assert_eq!(single[1].3, TextColor::Yellow);

        view.deathmatch = true;
        let dm = texts(&compose(&view, &FixedFont));
        assert!(dm.iter().all(|c| c.0 != "K "));
    }

    #[test]
    fn demo_timer_modes_and_direction() {
        let counters = FrameCounters::default();
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            demo_timer: DemoTimerMode::Playback,
            ..Default::default()
        };
        let mut view = base_view(&counters, &limits, &config);
        view.demo = DemoView {
            playback: true,
            recording: false,
            elapsed_tics: 70 * TICRATE,
            total_tics: 100 * TICRATE,
        };

        let cmds = texts(&compose(&view, &FixedFont));
        assert_eq!(cmds[0].0, "00:01:10");

        let config = WidgetConfig {
            demo_timer: DemoTimerMode::Playback,
            demo_timer_countdown: true,
            ..Default::default()
        };
        let view2 = FrameView {
            config: &config,
            ..view
        };
        let cmds = texts(&compose(&view2, &FixedFont));
        assert_eq!(cmds[0].0, "00:00:30");

        // Recording-only mode shows nothing during playback.
        let config = WidgetConfig {
            demo_timer: DemoTimerMode::Recording,
            ..Default::default()
        };
        let view3 = FrameView {
            config: &config,
            ..view
        };
        assert!(compose(&view3, &FixedFont).is_empty());
    }

    #[test]
    fn demo_bar_scales_with_progress() {
        let counters = FrameCounters::default();
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            demo_bar: true,
            ..Default::default()
        };
        let mut view = base_view(&counters, &limits, &config);
        view.demo = DemoView {
            playback: true,
            recording: false,
            elapsed_tics: 50,
            total_tics: 200,
        };

        let cmds = compose(&view, &FixedFont);
        assert_eq!(cmds.len(), 2);
        match &cmds[1] {
            DrawCommand::Bar { width, .. } => assert_eq!(*width, SCREENWIDTH / 4),
            other => panic!("expected bar, got {other:?}"),
        }
    }

    #[test]
    fn fps_widget_right_aligns() {
        let counters = FrameCounters::default();
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            show_fps: true,
            ..Default::default()
        };
        let mut view = base_view(&counters, &limits, &config);
        view.fps = 35;

        let cmds = texts(&compose(&view, &FixedFont));
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].0, "35");
        assert_eq!(cmds[0].1, SCREENWIDTH - 11 - 8 - 12);
        assert_eq!(cmds[1].0, "FPS");
        assert_eq!(cmds[1].1, SCREENWIDTH - 7 - 12);
    }

    #[test]
    fn powerup_rows_skip_inactive() {
        let counters = FrameCounters::default();
        let limits = CounterLimits::vanilla();
        let config = WidgetConfig {
            powerups: WidgetMode::Always,
            ..Default::default()
        };
        let mut view = base_view(&counters, &limits, &config);
        view.powerups = PowerupView {
            invulnerability: 0,
            invisibility: 45,
            radiation: 0,
            amplifier: 10,
        };

        let cmds = texts(&compose(&view, &FixedFont));
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds[0].0, "INVS:");
        assert_eq!(cmds[1].3, TextColor::Green);
        assert_eq!(cmds[2].0, "AMP:");
        assert_eq!(cmds[3].3, TextColor::Red);
    }
}
