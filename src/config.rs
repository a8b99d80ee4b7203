//! Display configuration persistence.
//!
//! Stores timing and geometry settings as JSON at
//! `~/.local/share/chat-hud/config.json`. Loaded once on startup; saved on
//! every change so the file is always current. The display core never
//! touches disk on the frame path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default config file path.
fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chat-hud")
        .join("config.json")
}

/// Timing and geometry settings for chat displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// How long a line stays fresh on screen, in milliseconds.
    #[serde(default = "default_expire_ms")]
    pub expire_ms: u32,
    /// Fade-out duration after expiry (bottom-anchored displays).
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u32,
    /// Scroll transition duration when the visible window shifts.
    #[serde(default = "default_scroll_ms")]
    pub scroll_ms: u32,
    /// Structural display maximum; the ring holds one slot more.
    #[serde(default = "default_max_messages")]
    pub max_messages: u32,
    /// Left margin for rendered lines, in pixels.
    #[serde(default = "default_x_margin")]
    pub x_margin: f32,
    /// Path the config was loaded from (not serialized).
    #[serde(skip)]
    path: PathBuf,
}

fn default_expire_ms() -> u32 { 8000 }
fn default_fade_ms() -> u32 { 100 }
fn default_scroll_ms() -> u32 { 100 }
fn default_max_messages() -> u32 { 24 }
fn default_x_margin() -> f32 { 15.0 }

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            expire_ms: default_expire_ms(),
            fade_ms: default_fade_ms(),
            scroll_ms: default_scroll_ms(),
            max_messages: default_max_messages(),
            x_margin: default_x_margin(),
            path: default_path(),
        }
    }
}

impl ChatConfig {
    /// Load from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = default_path();
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        config.path = path;
        config
    }

    /// Load from an explicit path, surfacing I/O and parse errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&contents)?;
        config.path = path.to_path_buf();
        Ok(config)
    }

    /// Persist current config to disk.
    pub fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = std::fs::write(&self.path, json);
        }
    }
}
