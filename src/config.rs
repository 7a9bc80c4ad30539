//! User configuration — carousel geometry, spring feel and frame rate.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/revolver/config.toml` (default `~/.config/revolver/config.toml`).
//! Unknown keys are ignored and out-of-range values are clamped, so a hand
//! edited file can never stop the carousel from starting.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::engine::Geometry;
use crate::core::spring::SpringConfig;

// ───────────────────────────────────────── config ────────────

/// Application configuration.  Sizes are in terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub item_width: f64,
    pub item_height: f64,
    pub items_gap: f64,
    pub spring_stiffness: f64,
    pub spring_damping: f64,
    pub spring_precision: f64,
    /// Animation frame interval.
    pub frame_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let spring = SpringConfig::default();
        Self {
            item_width: 12.0,
            item_height: 5.0,
            items_gap: 2.0,
            spring_stiffness: spring.stiffness,
            spring_damping: spring.damping,
            spring_precision: spring.precision,
            frame_ms: 16,
        }
    }
}

impl AppConfig {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.item_width, self.item_height).with_gap(self.items_gap)
    }

    pub fn spring(&self) -> SpringConfig {
        SpringConfig {
            stiffness: self.spring_stiffness,
            damping: self.spring_damping,
            precision: self.spring_precision,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Bring every field into its supported range.  Geometry is rounded to
    /// whole cells, since a card can only be drawn on cell boundaries and the
    /// pitch must match what is drawn.  Non-finite values fall back to the
    /// defaults.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        let fit = |v: f64, fallback: f64, lo: f64, hi: f64| {
            if v.is_finite() {
                v.clamp(lo, hi)
            } else {
                fallback
            }
        };
        Self {
            item_width: fit(self.item_width.round(), defaults.item_width, 1.0, 200.0),
            item_height: fit(self.item_height.round(), defaults.item_height, 1.0, 100.0),
            items_gap: fit(self.items_gap.round(), defaults.items_gap, 0.0, 100.0),
            spring_stiffness: fit(self.spring_stiffness, defaults.spring_stiffness, 1.0, 5_000.0),
            spring_damping: fit(self.spring_damping, defaults.spring_damping, 0.0, 500.0),
            spring_precision: fit(self.spring_precision, defaults.spring_precision, 0.0001, 1.0),
            frame_ms: self.frame_ms.clamp(4, 100),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk, returning where it was written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if key == "frame_ms" {
                if let Ok(v) = value.parse::<u64>() {
                    config.frame_ms = v;
                }
                continue;
            }

            let Ok(v) = value.parse::<f64>() else {
                tracing::debug!(key, value, "ignoring unparsable config value");
                continue;
            };
            if !v.is_finite() {
                continue;
            }
            match key {
                "item_width" => config.item_width = v,
                "item_height" => config.item_height = v,
                "items_gap" => config.items_gap = v,
                "spring_stiffness" => config.spring_stiffness = v,
                "spring_damping" => config.spring_damping = v,
                "spring_precision" => config.spring_precision = v,
                _ => {}
            }
        }

        config.clamped()
    }

    pub fn serialise(&self) -> String {
        let lines = [
            "# revolver configuration".to_string(),
            String::new(),
            "# Geometry (terminal cells)".to_string(),
            format!("item_width = {}", self.item_width),
            format!("item_height = {}", self.item_height),
            format!("items_gap = {}", self.items_gap),
            String::new(),
            "# Spring".to_string(),
            format!("spring_stiffness = {}", self.spring_stiffness),
            format!("spring_damping = {}", self.spring_damping),
            format!("spring_precision = {}", self.spring_precision),
            String::new(),
            "# Animation frame interval (ms)".to_string(),
            format!("frame_ms = {}", self.frame_ms),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/revolver/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("revolver").join("config.toml")
}
