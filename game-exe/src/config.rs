//! User configuration options. Widget visibility modes are stored as plain
//! integers; anything out of range clamps to the nearest valid mode on
//! load rather than failing.

use crate::{BASE_DIR, CLIOptions};
use crl_stats::{DemoTimerMode, WidgetConfig, WidgetMode};
use dirs::config_dir;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::{File, OpenOptions, create_dir},
    io::{Read, Write},
    path::PathBuf,
};

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> PathBuf {
    let mut dir =
        config_dir().unwrap_or_else(|| panic!("{}: Couldn't open user config dir", LOG_TAG));
    dir.push(BASE_DIR);
    if !dir.exists() {
        create_dir(&dir)
            .unwrap_or_else(|e| panic!("{}: Couldn't create {:?}: {}", LOG_TAG, dir, e));
    }
    dir.push("user.toml");
    dir
}

/// Raw widget entries as persisted. Modes are integers 0/1/2
/// (off/always/over-limit); the demo timer is 0-3.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetEntries {
    pub coords: i32,
    pub playstate: i32,
    pub render_stats: i32,
    pub kis_stats: i32,
    pub powerups: i32,
    pub show_fps: bool,
    pub demo_timer: i32,
    pub demo_timer_countdown: bool,
    pub demo_bar: bool,
    pub target_health: bool,
}

impl Default for WidgetEntries {
    fn default() -> Self {
        Self {
            coords: 0,
            playstate: 0,
            render_stats: 1,
            kis_stats: 0,
            powerups: 0,
            show_fps: false,
            demo_timer: 0,
            demo_timer_countdown: false,
            demo_bar: true,
            target_health: false,
        }
    }
}

impl WidgetEntries {
    /// Clamping conversion into the typed config the compositor reads.
    pub fn to_widget_config(&self) -> WidgetConfig {
        WidgetConfig {
            coords: WidgetMode::from_index(self.coords),
            playstate: WidgetMode::from_index(self.playstate),
            render_stats: WidgetMode::from_index(self.render_stats),
            kis_stats: WidgetMode::from_index(self.kis_stats),
            powerups: WidgetMode::from_index(self.powerups),
            show_fps: self.show_fps,
            demo_timer: DemoTimerMode::from_index(self.demo_timer),
            demo_timer_countdown: self.demo_timer_countdown,
            demo_bar: self.demo_bar,
            target_health: self.target_health,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub iwad: String,
    pub extended_limits: bool,
    pub internal_demos: bool,
    pub widgets: WidgetEntries,
}

impl UserConfig {
    /// `load` will attempt to read the config, and panic if errored
    pub fn load() -> Self {
        let path = get_cfg_file();

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.clone())
            .unwrap_or_else(|e| panic!("Couldn't open {:?}, {}", path, e));
        let mut buf = String::new();
        if let Ok(read_len) = file.read_to_string(&mut buf) {
            if read_len == 0 {
                return UserConfig::create_default(&mut file);
            } else {
                if let Ok(data) = toml::from_str(&buf) {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return data;
                }
                warn!("Could not deserialise {:?}, recreating config", path);
            }
        }
        UserConfig::create_default(&mut file)
    }

    fn create_default(file: &mut File) -> Self {
        let config = UserConfig {
            internal_demos: true,
            ..UserConfig::default()
        };
        info!("Created default user config file");
        // Should be okay to unwrap this as it is a Default
        let data = toml::to_string(&config).unwrap();
        file.write_all(data.as_bytes())
            .unwrap_or_else(|_| panic!("Could not write {:?}", get_cfg_file()));
        info!("Saved user config to {:?}", get_cfg_file());
        config
    }

    pub fn write(&self) {
        let mut file = File::create(get_cfg_file()).expect("Couldn't overwrite config");
        let data = toml::to_string_pretty(self).expect("Parse config to TOML failed");
        file.write_all(data.as_bytes())
            .unwrap_or_else(|err| error!("Could not write config: {}", err));
    }

    /// Sync the CLI options and user options with each other. CLI wins
    /// when both are set.
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        if !cli.iwad.is_empty() && cli.iwad != self.iwad {
            cli.iwad.clone_into(&mut self.iwad);
            info!("Resource dir changed to: {}", &cli.iwad);
        } else {
            self.iwad.clone_into(&mut cli.iwad);
        }

        if let Some(f) = cli.extended_limits {
            if f != self.extended_limits {
                self.extended_limits = f;
            }
        } else {
            cli.extended_limits = Some(self.extended_limits);
        }

        if let Some(f) = cli.no_internal_demos {
            if f != !self.internal_demos {
                self.internal_demos = !f;
            }
        } else {
            cli.no_internal_demos = Some(!self.internal_demos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_entries_clamp_to_valid_modes() {
        let entries = WidgetEntries {
            coords: -3,
            playstate: 1,
            render_stats: 17,
            kis_stats: 2,
            powerups: 0,
            demo_timer: 9,
            ..WidgetEntries::default()
        };
        let config = entries.to_widget_config();
        assert_eq!(config.coords, WidgetMode::Off);
        assert_eq!(config.playstate, WidgetMode::Always);
        assert_eq!(config.render_stats, WidgetMode::OverLimit);
        assert_eq!(config.kis_stats, WidgetMode::OverLimit);
        assert_eq!(config.powerups, WidgetMode::Off);
        assert_eq!(config.demo_timer, DemoTimerMode::Both);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = UserConfig {
            iwad: "/data/heretic".into(),
            extended_limits: true,
            internal_demos: false,
            widgets: WidgetEntries {
                render_stats: 2,
                show_fps: true,
                ..WidgetEntries::default()
            },
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: UserConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.iwad, config.iwad);
        assert!(back.extended_limits);
        assert!(!back.internal_demos);
        assert_eq!(back.widgets.render_stats, 2);
        assert!(back.widgets.show_fps);
    }

    #[test]
    fn unknown_fields_fall_back_to_defaults() {
        let back: UserConfig = toml::from_str("iwad = \"/tmp/x\"\n").unwrap();
        assert_eq!(back.iwad, "/tmp/x");
        assert_eq!(back.widgets.render_stats, 1);
        assert!(back.widgets.demo_bar);
    }
}
