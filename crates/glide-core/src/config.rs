use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::motion::EasingType;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub magnetic: MagneticConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub lazy: LazyConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
    #[serde(default)]
    pub parallax: ParallaxConfig,
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Scroll-triggered reveal settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Intersection ratio (0.0-1.0) at which an element counts as visible
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Pixels added around the viewport so reveals start slightly early
    #[serde(default = "default_reveal_margin")]
    pub root_margin_px: f64,
    /// Vertical offset of a pending element
    #[serde(default = "default_reveal_offset")]
    pub offset_y: f64,
    /// CSS transition duration for the reveal
    #[serde(default = "default_reveal_transition")]
    pub transition_ms: u64,
    /// Delay added per element in scan order
    #[serde(default = "default_reveal_stagger")]
    pub stagger_ms: u64,
    /// Upper bound for the staggered delay
    #[serde(default = "default_reveal_max_stagger")]
    pub max_stagger_ms: u64,
    /// Every element still pending after this delay is revealed unconditionally
    #[serde(default = "default_safety_net")]
    pub safety_net_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
            root_margin_px: default_reveal_margin(),
            offset_y: default_reveal_offset(),
            transition_ms: default_reveal_transition(),
            stagger_ms: default_reveal_stagger(),
            max_stagger_ms: default_reveal_max_stagger(),
            safety_net_ms: default_safety_net(),
        }
    }
}

/// Momentum scroll settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable momentum scrolling for anchor links
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Per-frame spring factor (0.0-0.5, exclusive)
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// Velocity below which the animation may settle
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Distance below which the animation may settle
    #[serde(default = "default_snap_distance")]
    pub snap_distance: f64,
    /// Frames after which the engine snaps to its target regardless
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
    /// Space kept above an anchor target (fixed header height)
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset: f64,
    /// Honor the user's reduced-motion preference
    #[serde(default = "default_true")]
    pub respect_reduced_motion: bool,
    /// Offset after which the back-to-top button shows
    #[serde(default = "default_back_to_top")]
    pub back_to_top_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            ease_factor: default_ease_factor(),
            epsilon: default_epsilon(),
            snap_distance: default_snap_distance(),
            max_frames: default_max_frames(),
            anchor_offset: default_anchor_offset(),
            respect_reduced_motion: default_true(),
            back_to_top_threshold: default_back_to_top(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Offset after which the header gets the `scrolled` class
    #[serde(default = "default_header_threshold")]
    pub scrolled_threshold: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: default_header_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Fade-in delay added per nav link
    #[serde(default = "default_link_stagger")]
    pub link_stagger_ms: u64,
    /// Matches the CSS close transition; the `active` class goes after it
    #[serde(default = "default_close_delay")]
    pub close_delay_ms: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            link_stagger_ms: default_link_stagger(),
            close_delay_ms: default_close_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Minimum horizontal travel for a touch gesture to count as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    #[serde(default = "default_slide_duration")]
    pub slide_duration_ms: u64,
    #[serde(default = "default_power2_out")]
    pub easing: EasingType,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            slide_duration_ms: default_slide_duration(),
            easing: default_power2_out(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagneticConfig {
    /// Fraction of the pointer's distance from centre applied as offset
    #[serde(default = "default_magnetic_strength")]
    pub strength: f64,
    #[serde(default = "default_magnetic_duration")]
    pub duration_ms: u64,
    #[serde(default = "default_power2_out")]
    pub easing: EasingType,
    /// Curve used when the pointer leaves and the button springs back
    #[serde(default = "default_release_easing")]
    pub release_easing: EasingType,
    /// Card hover lift in pixels (negative moves up)
    #[serde(default = "default_hover_lift")]
    pub hover_lift: f64,
    #[serde(default = "default_hover_scale")]
    pub hover_scale: f64,
    #[serde(default = "default_hover_duration")]
    pub hover_duration_ms: u64,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: default_magnetic_strength(),
            duration_ms: default_magnetic_duration(),
            easing: default_power2_out(),
            release_easing: default_release_easing(),
            hover_lift: default_hover_lift(),
            hover_scale: default_hover_scale(),
            hover_duration_ms: default_hover_duration(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    #[serde(default = "default_counter_duration")]
    pub duration_ms: u64,
    /// Assumed frame length used to derive the per-frame increment
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Intersection ratio (0.0-1.0) at which a counter starts
    #[serde(default)]
    pub threshold: f64,
    /// Pixels added above and below the viewport; negative values wait until
    /// the counter is well inside it
    #[serde(default = "default_counter_margin")]
    pub root_margin_px: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_counter_duration(),
            frame_ms: default_frame_ms(),
            threshold: 0.0,
            root_margin_px: default_counter_margin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    #[serde(default = "default_follower_duration")]
    pub follower_duration_ms: u64,
    #[serde(default = "default_power2_out")]
    pub easing: EasingType,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            follower_duration_ms: default_follower_duration(),
            easing: default_power2_out(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LazyConfig {
    /// Images start loading this many pixels before they scroll into view
    #[serde(default = "default_lazy_margin")]
    pub root_margin_px: f64,
    #[serde(default = "default_lazy_fade")]
    pub fade_ms: u64,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            root_margin_px: default_lazy_margin(),
            fade_ms: default_lazy_fade(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingConfig {
    #[serde(default = "default_loading_hide")]
    pub hide_after_ms: u64,
    /// Delay between fading the screen out and removing it from the DOM
    #[serde(default = "default_loading_remove")]
    pub remove_after_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            hide_after_ms: default_loading_hide(),
            remove_after_ms: default_loading_remove(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxConfig {
    /// Speed used when an element has no `data-speed` attribute
    #[serde(default = "default_parallax_speed")]
    pub default_speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            default_speed: default_parallax_speed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Text shown in place of a form after a valid submission
    #[serde(default = "default_success_message")]
    pub success_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            success_message: default_success_message(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_margin() -> f64 {
    100.0
}

fn default_reveal_offset() -> f64 {
    30.0
}

fn default_reveal_transition() -> u64 {
    800
}

fn default_reveal_stagger() -> u64 {
    150
}

fn default_reveal_max_stagger() -> u64 {
    600
}

fn default_safety_net() -> u64 {
    3000
}

fn default_ease_factor() -> f64 {
    0.15
}

fn default_epsilon() -> f64 {
    0.1
}

fn default_snap_distance() -> f64 {
    0.5
}

fn default_max_frames() -> u32 {
    600 // 10 seconds at 60fps
}

fn default_anchor_offset() -> f64 {
    100.0
}

fn default_back_to_top() -> f64 {
    300.0
}

fn default_header_threshold() -> f64 {
    100.0
}

fn default_link_stagger() -> u64 {
    100
}

fn default_close_delay() -> u64 {
    300
}

fn default_swipe_threshold() -> f64 {
    50.0
}

fn default_slide_duration() -> u64 {
    600
}

fn default_power2_out() -> EasingType {
    EasingType::Power2Out
}

fn default_release_easing() -> EasingType {
    EasingType::ElasticOut {
        amplitude: 1.0,
        period: 0.5,
    }
}

fn default_magnetic_strength() -> f64 {
    0.2
}

fn default_magnetic_duration() -> u64 {
    800
}

fn default_hover_lift() -> f64 {
    -15.0
}

fn default_hover_scale() -> f64 {
    1.03
}

fn default_hover_duration() -> u64 {
    500
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_frame_ms() -> u64 {
    16 // ~60fps
}

fn default_counter_margin() -> f64 {
    -150.0
}

fn default_follower_duration() -> u64 {
    600
}

fn default_lazy_margin() -> f64 {
    200.0
}

fn default_lazy_fade() -> u64 {
    800
}

fn default_loading_hide() -> u64 {
    2000
}

fn default_loading_remove() -> u64 {
    1000
}

fn default_parallax_speed() -> f64 {
    0.3
}

fn default_success_message() -> String {
    "Thank you! We'll be in touch soon.".to_string()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a TOML file, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the JSON object a page passes to the web entry point
    pub fn from_json(content: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/glide/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("glide")
            .join("config.toml")
    }

    /// Reject values the engines cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let reveal = &self.reveal;
        if !(0.0..=1.0).contains(&reveal.threshold) {
            return Err(crate::Error::Config(format!(
                "reveal.threshold must be within 0.0..=1.0, got {}",
                reveal.threshold
            )));
        }
        let scroll = &self.scroll;
        if !(scroll.ease_factor > 0.0 && scroll.ease_factor < 0.5) {
            return Err(crate::Error::Config(format!(
                "scroll.ease_factor must be within (0.0, 0.5), got {}",
                scroll.ease_factor
            )));
        }
        if scroll.epsilon <= 0.0 || scroll.snap_distance <= 0.0 {
            return Err(crate::Error::Config(
                "scroll.epsilon and scroll.snap_distance must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.counter.threshold) {
            return Err(crate::Error::Config(format!(
                "counter.threshold must be within 0.0..=1.0, got {}",
                self.counter.threshold
            )));
        }
        if self.counter.frame_ms == 0 {
            return Err(crate::Error::Config("counter.frame_ms must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.reveal.offset_y, 30.0);
        assert_eq!(config.carousel.swipe_threshold, 50.0);
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.magnetic.easing, EasingType::Power2Out);
        assert!(config.scroll.smooth_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [menu]
            close_delay_ms = 450

            [magnetic]
            release_easing = "elastic.out(1.2, 0.4)"
            "#,
        )
        .unwrap();
        assert_eq!(config.menu.close_delay_ms, 450);
        assert_eq!(config.menu.link_stagger_ms, 100);
        assert_eq!(
            config.magnetic.release_easing,
            EasingType::ElasticOut {
                amplitude: 1.2,
                period: 0.4
            }
        );
    }

    #[test]
    fn test_json_config() {
        let config = AppConfig::from_json(r#"{"reveal": {"safety_net_ms": 1500}}"#).unwrap();
        assert_eq!(config.reveal.safety_net_ms, 1500);
        assert_eq!(config.reveal.threshold, 0.1);
    }

    #[test]
    fn test_rejects_unstable_ease_factor() {
        let err = AppConfig::from_toml("[scroll]\nease_factor = 0.9\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_counter_trigger_settings() {
        let config = AppConfig::from_toml("[counter]\nroot_margin_px = -80.0\n").unwrap();
        assert_eq!(config.counter.root_margin_px, -80.0);
        assert_eq!(config.counter.threshold, 0.0);
        assert_eq!(config.counter.duration_ms, 2000);

        let err = AppConfig::from_toml("[counter]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_easing() {
        let err = AppConfig::from_toml("[cursor]\neasing = \"bounce.sideways\"\n").unwrap_err();
        assert!(matches!(err, crate::Error::Toml(_)));
    }

    #[test]
    fn test_round_trip_pretty_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.magnetic.release_easing, config.magnetic.release_easing);
    }
}
