use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::AdvisorConfig;
use crate::image::with_image_params;
use crate::level::OptimizationLevel;
use crate::probe::DeviceClass;
use crate::probe::DeviceProbe;
use std::time::Duration;
use std::time::Instant;

/// Animation parameters handed to UI code.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationConfig {
    pub duration_seconds: f32,
    pub easing_curve: String,
    pub skip_animations: bool,
}

/// Frame-rate driven animation budget. One instance per application root;
/// `sample_frame` is meant to be called once per rendered frame.
///
/// Levels drop as soon as a window measures below a threshold, but only
/// return to high after `upgrade_windows` consecutive windows at or above
/// `upgrade_fps`.
#[derive(Debug)]
pub struct PerformanceAdvisor<C: Clock = SystemClock> {
    config: AdvisorConfig,
    clock: C,
    frames: u32,
    window_start: Instant,
    fps: u32,
    level: OptimizationLevel,
    good_windows: u32,
    device: DeviceClass,
    reduced_motion: bool,
}

impl PerformanceAdvisor<SystemClock> {
    pub fn with_system_clock(config: AdvisorConfig) -> Self {
        Self::new(config, SystemClock)
    }
}

impl<C: Clock> PerformanceAdvisor<C> {
    pub fn new(config: AdvisorConfig, clock: C) -> Self {
        let window_start = clock.now();
        Self {
            config,
            clock,
            frames: 0,
            window_start,
            fps: 60,
            level: OptimizationLevel::High,
            good_windows: 0,
            device: DeviceClass::default(),
            reduced_motion: false,
        }
    }

    /// Read device signals once. A low-end device starts at medium; it can
    /// still earn high through sustained frame rate.
    pub fn detect_device_class(&mut self, probe: &dyn DeviceProbe) -> &DeviceClass {
        self.device = DeviceClass::detect(probe);
        if let Some(reduced) = probe.prefers_reduced_motion() {
            self.reduced_motion = reduced;
        }
        if self.device.is_low_end && self.level == OptimizationLevel::High {
            self.set_level(OptimizationLevel::Medium, self.fps);
        }
        tracing::debug!(
            memory_gb = ?self.device.memory_gb,
            cores = ?self.device.cores,
            network = ?self.device.network,
            low_end = self.device.is_low_end,
            "device class detected"
        );
        &self.device
    }

    /// Count one frame. Returns the measured FPS when this frame closed a
    /// sampling window.
    pub fn sample_frame(&mut self) -> Option<u32> {
        self.frames = self.frames.saturating_add(1);
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_millis(self.config.window_ms) || elapsed.is_zero() {
            return None;
        }
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let fps = (f64::from(self.frames) * 1000.0 / elapsed_ms).round() as u32;
        self.frames = 0;
        self.window_start = now;
        self.observe_fps(fps);
        Some(fps)
    }

    /// Re-evaluate the level from one window's FPS. Hosts that measure frame
    /// rate themselves can call this directly.
    pub fn observe_fps(&mut self, fps: u32) {
        self.fps = fps;
        let cfg = &self.config;
        let next = if fps < cfg.low_fps {
            self.good_windows = 0;
            OptimizationLevel::Low
        } else if fps < cfg.medium_fps {
            self.good_windows = 0;
            match self.level {
                OptimizationLevel::High => OptimizationLevel::Medium,
                other => other,
            }
        } else if fps >= cfg.upgrade_fps {
            self.good_windows = self.good_windows.saturating_add(1);
            if self.good_windows >= cfg.upgrade_windows {
                OptimizationLevel::High
            } else {
                self.level
            }
        } else {
            self.good_windows = 0;
            self.level
        };
        self.set_level(next, fps);
    }

    fn set_level(&mut self, next: OptimizationLevel, fps: u32) {
        if next != self.level {
            tracing::info!(from = %self.level, to = %next, fps, "optimization level changed");
            self.level = next;
        }
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn level(&self) -> OptimizationLevel {
        self.level
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn device(&self) -> &DeviceClass {
        &self.device
    }

    pub fn is_low_end_device(&self) -> bool {
        self.device.is_low_end
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Reduced motion always wins over the measured level.
    pub fn animation_config(&self) -> AnimationConfig {
        if self.reduced_motion {
            return AnimationConfig {
                duration_seconds: 0.0,
                easing_curve: "linear".to_string(),
                skip_animations: true,
            };
        }
        let (duration_seconds, easing, skip_animations) = match self.level {
            OptimizationLevel::Low => (0.0, "linear", true),
            OptimizationLevel::Medium => (0.2, "ease-out", false),
            OptimizationLevel::High => (0.4, "ease-in-out", false),
        };
        AnimationConfig {
            duration_seconds,
            easing_curve: easing.to_string(),
            skip_animations,
        }
    }

    /// Scale a particle budget: 30% (at least 5) on low, 60% (at least 10)
    /// on medium, unchanged on high.
    pub fn optimal_particle_count(&self, base: u32) -> u32 {
        let scaled = |factor: f64, floor: u32| ((f64::from(base) * factor).round() as u32).max(floor);
        match self.level {
            OptimizationLevel::Low => scaled(0.3, 5),
            OptimizationLevel::Medium => scaled(0.6, 10),
            OptimizationLevel::High => base,
        }
    }

    /// Add width/quality hints to an image URL. Slow connections always get
    /// the configured slow-network quality.
    pub fn optimized_image_url(&self, url: &str, width: Option<u32>, quality: Option<u8>) -> String {
        let quality = if self.device.network.is_some_and(|n| n.is_slow()) {
            self.config.slow_network_image_quality
        } else {
            quality.unwrap_or(self.config.default_image_quality)
        };
        with_image_params(url, width, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::probe::StaticProbe;
    use pretty_assertions::assert_eq;

    fn advisor() -> PerformanceAdvisor<ManualClock> {
        PerformanceAdvisor::new(AdvisorConfig::default(), ManualClock::new())
    }

    #[test]
    fn starts_high() {
        let a = advisor();
        assert_eq!(a.level(), OptimizationLevel::High);
        assert_eq!(a.fps(), 60);
    }

    #[test]
    fn medium_band_only_downgrades() {
        let mut a = advisor();
        a.observe_fps(50);
        assert_eq!(a.level(), OptimizationLevel::Medium);
        a.observe_fps(20);
        assert_eq!(a.level(), OptimizationLevel::Low);
        a.observe_fps(50);
        assert_eq!(a.level(), OptimizationLevel::Low);
    }

    #[test]
    fn dead_band_resets_upgrade_streak() {
        let mut a = advisor();
        a.observe_fps(30);
        a.observe_fps(60);
        a.observe_fps(60);
        a.observe_fps(56);
        a.observe_fps(60);
        a.observe_fps(60);
        assert_eq!(a.level(), OptimizationLevel::Low);
        a.observe_fps(60);
        assert_eq!(a.level(), OptimizationLevel::High);
    }

    #[test]
    fn particle_scaling() {
        let mut a = advisor();
        assert_eq!(a.optimal_particle_count(100), 100);
        a.observe_fps(50);
        assert_eq!(a.optimal_particle_count(100), 60);
        assert_eq!(a.optimal_particle_count(5), 10);
        a.observe_fps(10);
        assert_eq!(a.optimal_particle_count(100), 30);
        assert_eq!(a.optimal_particle_count(4), 5);
    }

    #[test]
    fn animation_config_per_level() {
        let mut a = advisor();
        assert_eq!(
            a.animation_config(),
            AnimationConfig {
                duration_seconds: 0.4,
                easing_curve: "ease-in-out".into(),
                skip_animations: false,
            }
        );
        a.observe_fps(50);
        assert_eq!(a.animation_config().easing_curve, "ease-out");
        a.observe_fps(10);
        let low = a.animation_config();
        assert!(low.skip_animations);
        assert_eq!(low.duration_seconds, 0.0);
    }

    #[test]
    fn reduced_motion_overrides_high_level() {
        let mut a = advisor();
        a.detect_device_class(&StaticProbe {
            reduced_motion: Some(true),
            ..Default::default()
        });
        assert_eq!(a.level(), OptimizationLevel::High);
        assert!(a.animation_config().skip_animations);
        a.set_reduced_motion(false);
        assert!(!a.animation_config().skip_animations);
    }

    #[test]
    fn low_end_device_starts_medium() {
        let mut a = advisor();
        let class = a
            .detect_device_class(&StaticProbe {
                cores: Some(2),
                ..Default::default()
            })
            .clone();
        assert!(class.is_low_end);
        assert_eq!(a.level(), OptimizationLevel::Medium);
    }

    #[test]
    fn slow_network_forces_image_quality() {
        let mut a = advisor();
        assert_eq!(a.optimized_image_url("/a.jpg", Some(400), None), "/a.jpg?w=400&q=80");
        assert_eq!(a.optimized_image_url("/a.jpg", None, Some(90)), "/a.jpg?q=90");
        a.detect_device_class(&StaticProbe {
            network: Some("2g".into()),
            ..Default::default()
        });
        assert_eq!(a.optimized_image_url("/a.jpg", None, Some(90)), "/a.jpg?q=60");
        assert_eq!(a.optimized_image_url("/a.jpg?q=90", None, Some(90)), "/a.jpg?q=60");
        assert_eq!(
            a.optimized_image_url("https://cdn.example.com/a.jpg?q=90", Some(400), None),
            "https://cdn.example.com/a.jpg?w=400&q=60"
        );
    }
}
