//! Screen size presets and TLS version choices offered to the user.

use serde::Serialize;

/// A standard desktop size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenPreset {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Human-readable label
    pub label: &'static str,
}

impl ScreenPreset {
    const fn new(width: i32, height: i32, label: &'static str) -> Self {
        Self {
            width,
            height,
            label,
        }
    }
}

impl std::fmt::Display for ScreenPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

/// Desktop sizes in ascending order
pub const SCREEN_PRESETS: [ScreenPreset; 18] = [
    ScreenPreset::new(640, 480, "640 x 480 pixels"),
    ScreenPreset::new(800, 600, "800 x 600 pixels"),
    ScreenPreset::new(1024, 768, "1024 x 768 pixels"),
    ScreenPreset::new(1152, 864, "1152 x 864 pixels"),
    ScreenPreset::new(1280, 720, "1280 x 720 pixels"),
    ScreenPreset::new(1280, 800, "1280 x 800 pixels"),
    ScreenPreset::new(1280, 960, "1280 x 960 pixels"),
    ScreenPreset::new(1366, 768, "1366 x 768 pixels"),
    ScreenPreset::new(1440, 900, "1440 x 900 pixels"),
    ScreenPreset::new(1600, 900, "1600 x 900 pixels"),
    ScreenPreset::new(1680, 1050, "1680 x 1050 pixels"),
    ScreenPreset::new(1920, 1080, "1920 x 1080 pixels"),
    ScreenPreset::new(1920, 1200, "1920 x 1200 pixels"),
    ScreenPreset::new(2560, 1080, "2560 x 1080 pixels"),
    ScreenPreset::new(2560, 1440, "2560 x 1440 pixels"),
    ScreenPreset::new(2560, 1600, "2560 x 1600 pixels"),
    ScreenPreset::new(3440, 1440, "3440 x 1440 pixels"),
    ScreenPreset::new(3840, 2160, "3840 x 2160 pixels"),
];

/// Finds the preset matching an exact width and height
#[must_use]
pub fn preset_index(width: i32, height: i32) -> Option<usize> {
    SCREEN_PRESETS
        .iter()
        .position(|p| p.width == width && p.height == height)
}

/// TLS versions selectable for RDP; the empty string means "client default"
pub const TLS_VERSIONS: [&str; 4] = ["", "1.0", "1.1", "1.2"];

/// Position of `value` in [`TLS_VERSIONS`], `0` for empty or unknown values
#[must_use]
pub fn tls_version_index(value: &str) -> usize {
    TLS_VERSIONS
        .iter()
        .skip(1)
        .position(|v| *v == value)
        .map_or(0, |i| i + 1)
}
