/// Tuning knobs for `PerformanceAdvisor`. Every field has a default, so a
/// partial `[performance]` table is enough.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Length of one FPS sampling window.
    pub window_ms: u64,
    /// Below this the level drops to low immediately.
    pub low_fps: u32,
    /// Below this a high level drops to medium immediately.
    pub medium_fps: u32,
    /// Windows at or above this count towards an upgrade.
    pub upgrade_fps: u32,
    /// Consecutive good windows needed before returning to high.
    pub upgrade_windows: u32,
    pub default_image_quality: u8,
    /// Forced quality on 2g and slower connections.
    pub slow_network_image_quality: u8,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            window_ms: 1000,
            low_fps: 45,
            medium_fps: 55,
            upgrade_fps: 58,
            upgrade_windows: 3,
            default_image_quality: 80,
            slow_network_image_quality: 60,
        }
    }
}
