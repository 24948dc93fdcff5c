//! Render settings
//!
//! Supplied by the host page at mount time. Nothing here is persisted and
//! nothing here changes the simulation.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Parallax stars drawn per frame
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 30,
            QualityPreset::High => 60,
        }
    }

    /// Whether the runner is drawn as a full sprite or a plain box
    pub fn detailed_sprites(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (jump dust, crash burst)
    pub particles: bool,
    /// Score/best text inside the canvas
    pub show_hud: bool,
    /// Hold the starfield still
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_hud: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset disables particles for performance
        if preset == QualityPreset::Low {
            self.particles = false;
        }
    }

    /// Same host toggles under another preset; particles follow the preset
    pub fn with_quality(&self, preset: QualityPreset) -> Self {
        Self {
            show_hud: self.show_hud,
            reduced_motion: self.reduced_motion,
            ..Self::from_preset(preset)
        }
    }

    /// Parse host-provided JSON, falling back to defaults on bad input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(json) {
            Ok(mut settings) => {
                settings.apply_preset(settings.quality);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Parallax stars drawn per frame
    pub fn star_count(&self) -> usize {
        self.quality.star_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_low_preset_drops_particles() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.particles);
        assert_eq!(settings.star_count(), 0);
        assert!(Settings::from_preset(QualityPreset::High).particles);
    }

    #[test]
    fn test_with_quality_keeps_host_toggles() {
        let low = Settings {
            show_hud: false,
            reduced_motion: true,
            ..Settings::from_preset(QualityPreset::Low)
        };
        let high = low.with_quality(QualityPreset::High);
        assert_eq!(high.quality, QualityPreset::High);
        assert!(high.particles);
        assert!(!high.show_hud);
        assert!(high.reduced_motion);
        assert!(!high.with_quality(QualityPreset::Low).particles);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json_or_default(Some(r#"{ "show_hud": false }"#));
        assert!(!settings.show_hud);
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_low_quality_json_drops_particles() {
        let settings = Settings::from_json_or_default(Some(r#"{ "quality": "Low" }"#));
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(!settings.particles);
        assert_eq!(settings.star_count(), 0);

        // Explicit particles can't override the preset
        let settings =
            Settings::from_json_or_default(Some(r#"{ "quality": "Low", "particles": true }"#));
        assert!(!settings.particles);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert_eq!(Settings::from_json_or_default(Some("{")), Settings::default());
        assert_eq!(Settings::from_json_or_default(Some("  ")), Settings::default());
        assert_eq!(Settings::from_json_or_default(None), Settings::default());
    }
}
