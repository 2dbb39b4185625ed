//! Configuration loading.
//!
//! Reads `config.json` from the config directory and applies environment
//! variable overrides. The file is never written: life totals are not
//! persisted between runs.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::constants::{
    BLINK_INTERVAL_MS, EVENT_QUEUE_CAPACITY, INITIAL_LIFE, LONG_PRESS_THRESHOLD_MS,
    POLL_INTERVAL_MS, RELEASE_GAP_MS, REPEAT_RELEASE_GAP_MS,
};
use crate::input::ReleaseMode;

/// Runtime settings for life-totals.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Life total every quadrant starts with.
    pub initial_life: i64,
    /// Back hold, in milliseconds, that exits the app.
    pub long_press_ms: u64,
    /// Edit-mode frame blink period in milliseconds.
    pub blink_interval_ms: u64,
    /// Scheduler queue wait before an idle redraw, in milliseconds.
    pub poll_interval_ms: u64,
    /// Capacity of the input event queue.
    pub queue_capacity: usize,
    /// Silence after a lone key press that counts as a release, in
    /// milliseconds. Only used when the terminal cannot report releases.
    pub release_gap_ms: u64,
    /// Silence after an autorepeat press that counts as a release, in
    /// milliseconds. Only used when the terminal cannot report releases.
    pub repeat_release_gap_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_life: INITIAL_LIFE,
            long_press_ms: LONG_PRESS_THRESHOLD_MS,
            blink_interval_ms: BLINK_INTERVAL_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
            queue_capacity: EVENT_QUEUE_CAPACITY,
            release_gap_ms: RELEASE_GAP_MS,
            repeat_release_gap_ms: REPEAT_RELEASE_GAP_MS,
        }
    }
}

impl Config {
    /// Returns the configuration directory path.
    ///
    /// `LIFE_TOTALS_CONFIG_DIR` wins; otherwise the platform config dir
    /// (Linux: `~/.config/life-totals`).
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("LIFE_TOTALS_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join("life-totals"))
    }

    /// Loads configuration from the config directory, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let dir = Self::config_dir()?;
        let mut config = Self::load_from_dir(&dir)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reads `config.json` in `dir`, falling back to defaults when absent.
    ///
    /// A file that exists but does not parse is an error.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join("config.json");
        if !config_path.exists() {
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Overrides fields from `LIFE_TOTALS_*` variables. Values that do not
    /// parse are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parse<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            name: &str,
            slot: &mut T,
        ) {
            if let Some(value) = lookup(name) {
                match value.trim().parse() {
                    Ok(parsed) => *slot = parsed,
                    Err(_) => log::warn!("Ignoring unparseable {}={:?}", name, value),
                }
            }
        }

        parse(&lookup, "LIFE_TOTALS_INITIAL_LIFE", &mut self.initial_life);
        parse(&lookup, "LIFE_TOTALS_LONG_PRESS_MS", &mut self.long_press_ms);
        parse(&lookup, "LIFE_TOTALS_BLINK_INTERVAL_MS", &mut self.blink_interval_ms);
        parse(&lookup, "LIFE_TOTALS_POLL_INTERVAL_MS", &mut self.poll_interval_ms);
        parse(&lookup, "LIFE_TOTALS_QUEUE_CAPACITY", &mut self.queue_capacity);
        parse(&lookup, "LIFE_TOTALS_RELEASE_GAP_MS", &mut self.release_gap_ms);
        parse(
            &lookup,
            "LIFE_TOTALS_REPEAT_RELEASE_GAP_MS",
            &mut self.repeat_release_gap_ms,
        );
    }

    /// Rejects settings the loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.long_press_ms > 0, "long_press_ms must be positive");
        ensure!(self.blink_interval_ms > 0, "blink_interval_ms must be positive");
        ensure!(self.poll_interval_ms > 0, "poll_interval_ms must be positive");
        ensure!(self.queue_capacity > 0, "queue_capacity must be positive");
        ensure!(self.release_gap_ms > 0, "release_gap_ms must be positive");
        ensure!(
            self.repeat_release_gap_ms > 0,
            "repeat_release_gap_ms must be positive"
        );
        ensure!(
            self.repeat_release_gap_ms <= self.release_gap_ms,
            "repeat_release_gap_ms ({}) must not exceed release_gap_ms ({})",
            self.repeat_release_gap_ms,
            self.release_gap_ms
        );
        // An inferred release lands a gap after the last press, so a tapped
        // Back would otherwise measure as a long hold
        ensure!(
            self.release_gap_ms < self.long_press_ms,
            "release_gap_ms ({}) must be below long_press_ms ({})",
            self.release_gap_ms,
            self.long_press_ms
        );
        Ok(())
    }

    /// How the input translator detects key releases.
    ///
    /// Terminals with keyboard enhancement report releases; everything else
    /// gets releases inferred from the configured gaps.
    #[must_use]
    pub fn release_mode(&self, keyboard_enhanced: bool) -> ReleaseMode {
        if keyboard_enhanced {
            ReleaseMode::Reported
        } else {
            ReleaseMode::Inferred {
                first_gap_ms: self.release_gap_ms,
                repeat_gap_ms: self.repeat_release_gap_ms,
            }
        }
    }
}
