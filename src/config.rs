//! Configuration management for the keyboard gate
//!
//! Provides persistent configuration that is automatically loaded from a
//! platform-specific config file.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/keyboard-gate/config.toml` |
//! | macOS | `~/Library/Application Support/keyboard-gate/config.toml` |
//! | Windows | `%APPDATA%\keyboard-gate\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use keyboard_gate::Config;
//!
//! // Load existing config or use defaults
//! let mut config = Config::load().unwrap_or_default();
//!
//! // Modify settings
//! config.gate.passphrase = "open sesame".to_string();
//!
//! // Save to disk
//! config.save().expect("Failed to save config");
//! ```

use crate::keys::GateKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Passphrase used when the configured one cannot be typed on the gate
pub const DEFAULT_PASSPHRASE: &str = "yesh";

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error reading or writing config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the path to the config file.
///
/// Creates the config directory if it doesn't exist.
///
/// # Platform-specific paths
///
/// - Linux: `~/.config/keyboard-gate/config.toml`
/// - macOS: `~/Library/Application Support/keyboard-gate/config.toml`
/// - Windows: `%APPDATA%\keyboard-gate\config.toml`
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = config_dir.join("keyboard-gate");

    // Create directory if it doesn't exist
    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }

    Ok(app_dir.join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Gate behavior (passphrase, skip, backdrop)
    #[serde(default)]
    pub gate: GateConfig,
    /// Reveal sequence and error timing
    #[serde(default)]
    pub timing: TimingConfig,
    /// Hint highlighting
    #[serde(default)]
    pub hints: HintConfig,
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Gate behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Passphrase that unlocks the gate
    pub passphrase: String,
    /// Skip the gate entirely and open on the content
    pub skip: bool,
    /// What renders behind the gate and stays behind the content
    pub backdrop: BackdropMode,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            passphrase: DEFAULT_PASSPHRASE.to_string(),
            skip: false,
            backdrop: BackdropMode::PlainDark,
        }
    }
}

impl GateConfig {
    /// The passphrase as the gate uses it: lowercase, and every
    /// character typable on the gate layout. A passphrase that fails
    /// those checks falls back to [`DEFAULT_PASSPHRASE`] with a
    /// warning, so the gate can never be impossible to pass.
    pub fn effective_passphrase(&self) -> String {
        let lowered = self.passphrase.to_lowercase();
        let typable =
            !lowered.is_empty() && lowered.chars().all(|c| GateKey::from_char(c).is_some());
        if typable {
            lowered
        } else {
            log::warn!(
                "passphrase {:?} is not typable on the gate layout, using {:?}",
                self.passphrase,
                DEFAULT_PASSPHRASE
            );
            DEFAULT_PASSPHRASE.to_string()
        }
    }
}

/// Background rendering mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BackdropMode {
    /// Flat dark background
    PlainDark,
    /// A dim keyboard echo that keeps reacting to keystrokes
    AnimatedKeyboard,
}

/// Reveal sequence and error timing, all in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Pause after launch before the gate fades in
    pub gate_fade_in_ms: u64,
    /// Gate fade-out length; the content swaps in when it ends
    pub content_swap_ms: u64,
    /// Content fade-in length before it settles
    pub content_settle_ms: u64,
    /// How long a failed entry shows the error line if left alone
    pub error_clear_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            gate_fade_in_ms: 100,
            content_swap_ms: 500,
            content_settle_ms: 700,
            error_clear_ms: 2000,
        }
    }
}

impl TimingConfig {
    pub fn gate_fade_in(&self) -> Duration {
        Duration::from_millis(self.gate_fade_in_ms)
    }

    pub fn content_swap(&self) -> Duration {
        Duration::from_millis(self.content_swap_ms)
    }

    pub fn content_settle(&self) -> Duration {
        Duration::from_millis(self.content_settle_ms)
    }

    pub fn error_clear(&self) -> Duration {
        Duration::from_millis(self.error_clear_ms)
    }
}

/// Hint highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintConfig {
    /// Which strategy drives the highlight
    pub strategy: HintStrategyKind,
    /// Fixed cycle: dwell on an ordinary character
    pub step_ms: u64,
    /// Fixed cycle: dwell on the last character before the submit key
    pub pre_submit_ms: u64,
    /// Fixed cycle: dwell on the submit key before the cycle wraps
    pub cycle_pause_ms: u64,
    /// Fixed cycle: full cycles before hints stop for good
    pub max_cycles: u32,
    /// Adaptive: shortest idle delay before a hint shows
    pub adaptive_floor_ms: u64,
    /// Adaptive: longest idle delay before a hint shows
    pub adaptive_ceiling_ms: u64,
    /// Adaptive: how many keystroke gaps feed the cadence estimate
    pub cadence_window: usize,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            strategy: HintStrategyKind::FixedCycle,
            step_ms: 600,
            pre_submit_ms: 500,
            cycle_pause_ms: 1200,
            max_cycles: 2,
            adaptive_floor_ms: 400,
            adaptive_ceiling_ms: 1500,
            cadence_window: 5,
        }
    }
}

impl HintConfig {
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    pub fn pre_submit(&self) -> Duration {
        Duration::from_millis(self.pre_submit_ms)
    }

    pub fn cycle_pause(&self) -> Duration {
        Duration::from_millis(self.cycle_pause_ms)
    }

    pub fn adaptive_floor(&self) -> Duration {
        Duration::from_millis(self.adaptive_floor_ms)
    }

    pub fn adaptive_ceiling(&self) -> Duration {
        Duration::from_millis(self.adaptive_ceiling_ms)
    }
}

/// Hint strategy options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HintStrategyKind {
    /// Free-running highlight over the passphrase keys then the submit
    /// key, for a capped number of cycles
    FixedCycle,
    /// Highlight the next needed key after an idle gap scaled by the
    /// user's typing cadence
    Adaptive,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Refresh rate for UI updates (in Hz)
    pub refresh_rate_hz: u32,
    /// Color theme (dark/light)
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: 60,
            theme: Theme::Dark,
        }
    }
}

/// Color theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use keyboard_gate::Config;
    ///
    /// let config = Config::load().unwrap_or_default();
    /// println!("Passphrase: {}", config.gate.passphrase);
    /// ```
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// Useful for testing or using custom config locations.
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    ///
    /// Creates the config directory and file if they don't exist.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    ///
    /// Useful for testing or using custom config locations.
    pub fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get UI refresh interval as Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.ui.refresh_rate_hz as u64)
    }
}
