//! Presentation parameters.
//!
//! Every numeric boundary in the page (motion ranges and rates, intro
//! delays, petal counts, spring tuning) is a tunable presentation value,
//! not a contract. This module gives them one JSON-loadable home with
//! per-field defaults matching the stock stage.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cursor::SpringParams;
use crate::ease::Easing;
use crate::intro::IntroTimings;
use crate::petals::PetalConfig;
use crate::rig::{Motion, ScrollRange};

fn default_pages() -> f32 {
    4.0
}
fn default_scroll_damping() -> f32 {
    0.2
}
fn default_hero_motion() -> Motion {
    Motion::Lift {
        range: ScrollRange::new(0.0, 0.33),
        rise: 5.0,
        recede: 5.0,
        turn: 0.5,
        easing: Easing::Linear,
    }
}
fn default_gate_motion() -> Motion {
    Motion::Approach {
        lead: 10.0,
        rate: 25.0,
    }
}
fn default_lantern_motion() -> Motion {
    Motion::Descend { rate: 15.0 }
}

/// Full parameter set for one page mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Virtual page count of the scroll container.
    #[serde(default = "default_pages")]
    pub pages: f32,

    /// Time constant for scroll smoothing, seconds. Zero disables it.
    #[serde(default = "default_scroll_damping")]
    pub scroll_damping: f32,

    #[serde(default = "default_hero_motion")]
    pub hero_motion: Motion,

    #[serde(default = "default_gate_motion")]
    pub gate_motion: Motion,

    #[serde(default = "default_lantern_motion")]
    pub lantern_motion: Motion,

    #[serde(default)]
    pub intro: IntroTimings,

    #[serde(default)]
    pub petals: PetalConfig,

    #[serde(default)]
    pub cursor_spring: SpringParams,

    /// Click clip on disk. None disables the cue.
    #[serde(default)]
    pub click_clip: Option<PathBuf>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            scroll_damping: default_scroll_damping(),
            hero_motion: default_hero_motion(),
            gate_motion: default_gate_motion(),
            lantern_motion: default_lantern_motion(),
            intro: IntroTimings::default(),
            petals: PetalConfig::default(),
            cursor_spring: SpringParams::default(),
            click_clip: None,
        }
    }
}

impl PageConfig {
    /// Load from a JSON file; absent fields fall back to defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {:?}", path))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {:?}", path))?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Sanity-check the tunables.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.pages <= 0.0 {
            return Err("pages must be positive".to_string());
        }
        if self.scroll_damping < 0.0 {
            return Err("scrollDamping must not be negative".to_string());
        }
        if self.petals.count == 0 {
            return Err("petals.count must be at least 1".to_string());
        }
        if self.petals.floor >= self.petals.ceiling {
            return Err("petals.floor must be below petals.ceiling".to_string());
        }
        let timings = [
            self.intro.hold,
            self.intro.flash,
            self.intro.wipe,
            self.intro.fade,
            self.intro.finish,
        ];
        if timings.iter().any(|t| *t < 0.0) {
            return Err("intro delays must not be negative".to_string());
        }
        Ok(())
    }
}
