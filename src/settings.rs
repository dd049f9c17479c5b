//! Machine settings and presets
//!
//! Persisted separately from the prize list in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LotteryError;
use crate::platform::storage;

/// How the reveal transition looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransitionStyle {
    /// Play the draw video, then show the winner
    #[default]
    Video,
    /// Play the draw video followed by a light flash
    VideoWithLight,
}

/// How a revealed winner goes away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Dismissal {
    /// Wait for the user to click the winner
    #[default]
    Click,
    /// Clear on a timer (`auto_dismiss_ms`)
    Auto,
}

/// Named setting bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Video, then click the winner away
    #[default]
    Classic,
    /// Video plus light flash, winner clears itself
    LightShow,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::LightShow => "LightShow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "lightshow" | "light_show" | "light" => Some(Preset::LightShow),
            _ => None,
        }
    }
}

/// Lottery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: Preset,

    // === Physics ===
    pub gravity: f32,
    pub damping: f32,
    pub restitution: f32,
    pub initial_speed: f32,
    pub shake_strength: f32,

    // === Layout ===
    pub ball_radius: f32,
    pub padding: f32,
    pub placement_buffer: f32,
    pub max_placement_attempts: u32,

    // === Reveal ===
    pub transition: TransitionStyle,
    pub dismissal: Dismissal,
    /// Delay substituted for the video when it is missing or fails
    pub video_fallback_ms: u32,
    pub post_video_delay_ms: u32,
    pub light_effect_ms: u32,
    pub auto_dismiss_ms: u32,
    /// Source for the draw video, if the user configured one
    pub video_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: Preset::Classic,

            gravity: GRAVITY,
            damping: DAMPING,
            restitution: RESTITUTION,
            initial_speed: INITIAL_SPEED,
            shake_strength: SHAKE_STRENGTH,

            ball_radius: BALL_RADIUS,
            padding: LAYOUT_PADDING,
            placement_buffer: PLACEMENT_BUFFER,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,

            transition: TransitionStyle::Video,
            dismissal: Dismissal::Click,
            video_fallback_ms: VIDEO_FALLBACK_MS,
            post_video_delay_ms: POST_VIDEO_DELAY_MS,
            light_effect_ms: LIGHT_EFFECT_MS,
            auto_dismiss_ms: AUTO_DISMISS_MS,
            video_url: None,
        }
    }
}

impl Settings {
    /// Create settings from a preset (applies preset defaults)
    pub fn from_preset(preset: Preset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a preset (updates the reveal-related settings)
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;
        match preset {
            Preset::Classic => {
                self.transition = TransitionStyle::Video;
                self.dismissal = Dismissal::Click;
                self.ball_radius = BALL_RADIUS;
            }
            Preset::LightShow => {
                // Fewer, larger balls in the light-show variant
                self.transition = TransitionStyle::VideoWithLight;
                self.dismissal = Dismissal::Auto;
                self.ball_radius = 25.0;
            }
        }
    }

    /// Use `url` as the draw video. A blank value clears it.
    pub fn set_video_url(&mut self, url: &str) {
        let url = url.trim();
        self.video_url = (!url.is_empty()).then(|| url.to_string());
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), LotteryError> {
        let magnitudes = [
            ("gravity", self.gravity),
            ("initial_speed", self.initial_speed),
            ("shake_strength", self.shake_strength),
            ("padding", self.padding),
            ("placement_buffer", self.placement_buffer),
        ];
        for (name, value) in magnitudes {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LotteryError::InvalidSettings(format!(
                    "{} must be finite and not negative, got {}",
                    name, value
                )));
            }
        }
        if !(self.ball_radius > 0.0 && self.ball_radius.is_finite()) {
            return Err(LotteryError::InvalidSettings(format!(
                "ball_radius must be positive, got {}",
                self.ball_radius
            )));
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(LotteryError::InvalidSettings(format!(
                "restitution must be in (0, 1], got {}",
                self.restitution
            )));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(LotteryError::InvalidSettings(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(LotteryError::InvalidSettings(
                "max_placement_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "lottery_settings";

    /// Load settings from LocalStorage, falling back to defaults when missing
    /// or invalid
    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => match settings.validate() {
                Ok(()) => {
                    log::info!("Loaded settings ({})", settings.preset.as_str());
                    settings
                }
                Err(e) => {
                    log::warn!("Stored settings rejected: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) -> Result<(), LotteryError> {
        storage::save_json(Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
