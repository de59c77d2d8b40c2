use argh::FromArgs;
use crl_stats::CompatMode;
use gamestate::GameOptions;
use gamestate_traits::Skill;

/// CLI options for the game-exe
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// path to the game resource directory
    #[argh(option, default = "Default::default()")]
    pub iwad: String,
    /// disable monsters
    #[argh(option, default = "false")]
    pub no_monsters: bool,
    /// start a deathmatch game
    #[argh(option, default = "false")]
    pub deathmatch: bool,
    /// set the game skill, 0-4 (0: easiest, 4: hardest)
    #[argh(option)]
    pub skill: Option<Skill>,
    /// select episode
    #[argh(option)]
    pub episode: Option<usize>,
    /// select level in episode
    #[argh(option)]
    pub map: Option<usize>,
    /// classify counters against extended limits instead of vanilla
    #[argh(option)]
    pub extended_limits: Option<bool>,
    /// skip the built-in attract demos
    #[argh(option)]
    pub no_internal_demos: Option<bool>,
    /// run the game loop without any drawing, for comparative timing
    #[argh(option, default = "false")]
    pub nodrawers: bool,
}

impl From<CLIOptions> for GameOptions {
    fn from(g: CLIOptions) -> Self {
        GameOptions {
            iwad: g.iwad,
            no_monsters: g.no_monsters,
            deathmatch: g.deathmatch,
            skill: g.skill.unwrap_or_default(),
            episode: g.episode.unwrap_or(1),
            map: g.map.unwrap_or(1),
            autostart: g.episode.is_some() || g.map.is_some(),
            compat_mode: if g.extended_limits.unwrap_or(false) {
                CompatMode::Extended
            } else {
                CompatMode::Vanilla
            },
            internal_demos: !g.no_internal_demos.unwrap_or(false),
            verbose: g.verbose.unwrap_or(log::LevelFilter::Warn),
            ..GameOptions::default()
        }
    }
}
