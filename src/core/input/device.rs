//=========================================================================
// Device Profile
//=========================================================================
//
// Capability snapshot used to classify the host as mobile or desktop.
//
// Classification:
//   touch_capable && (platform matches mobile pattern || viewport < 768)
//
//=========================================================================

//=== Constants ===========================================================

/// Viewports narrower than this (logical pixels) count as mobile.
pub const MOBILE_VIEWPORT_THRESHOLD: f32 = 768.0;

/// Lowercase fragments that identify a mobile platform descriptor.
const MOBILE_PLATFORM_PATTERNS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Short mobile identifiers that only count as whole words ("Studios" and
/// "bios" are not iOS).
const MOBILE_PLATFORM_WORDS: &[&str] = &["ios"];

//=== DeviceProfile =======================================================

/// What the host reports about its input hardware and screen.
///
/// `platform` plays the role a user-agent string plays in a browser: a free
/// text descriptor matched against known mobile patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    pub touch_capable: bool,
    pub keyboard_available: bool,
    pub platform: String,
    pub viewport_width: f32,
}

impl DeviceProfile {
    /// Profile of the running host, with a viewport width to be refreshed
    /// once the window exists.
    pub fn detect() -> Self {
        let mobile_os = cfg!(any(target_os = "android", target_os = "ios"));
        Self {
            touch_capable: mobile_os,
            keyboard_available: !mobile_os,
            platform: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            viewport_width: 1280.0,
        }
    }

    /// Desktop profile with a keyboard and no touch surface.
    pub fn desktop(viewport_width: f32) -> Self {
        Self {
            touch_capable: false,
            keyboard_available: true,
            platform: "desktop".to_string(),
            viewport_width,
        }
    }

    /// Returns a copy with an updated viewport width.
    pub fn with_viewport_width(mut self, width: f32) -> Self {
        self.viewport_width = width;
        self
    }

    /// Applies the mobile heuristic to this snapshot.
    pub fn is_mobile(&self) -> bool {
        self.touch_capable
            && (matches_mobile_platform(&self.platform)
                || self.viewport_width < MOBILE_VIEWPORT_THRESHOLD)
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::detect()
    }
}

fn matches_mobile_platform(platform: &str) -> bool {
    let platform = platform.to_ascii_lowercase();
    if MOBILE_PLATFORM_PATTERNS
        .iter()
        .any(|pattern| platform.contains(pattern))
    {
        return true;
    }

    platform
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| MOBILE_PLATFORM_WORDS.contains(&word))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(touch: bool, platform: &str, width: f32) -> DeviceProfile {
        DeviceProfile {
            touch_capable: touch,
            keyboard_available: true,
            platform: platform.to_string(),
            viewport_width: width,
        }
    }

    #[test]
    fn touch_phone_is_mobile() {
        assert!(profile(true, "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", 1024.0).is_mobile());
    }

    #[test]
    fn pattern_match_is_case_insensitive() {
        assert!(profile(true, "ANDROID 14", 1920.0).is_mobile());
    }

    #[test]
    fn ios_matches_only_as_a_word() {
        assert!(profile(true, "ios aarch64", 1920.0).is_mobile());
        assert!(profile(true, "iOS/17.2", 1920.0).is_mobile());
        assert!(!profile(true, "Windows Studios", 1920.0).is_mobile());
        assert!(!profile(true, "bios x86_64", 1920.0).is_mobile());
    }

    #[test]
    fn touch_laptop_with_narrow_window_is_mobile() {
        assert!(profile(true, "linux x86_64", 600.0).is_mobile());
    }

    #[test]
    fn touch_laptop_with_wide_window_is_desktop() {
        assert!(!profile(true, "linux x86_64", 1440.0).is_mobile());
    }

    #[test]
    fn no_touch_is_never_mobile() {
        assert!(!profile(false, "Android", 320.0).is_mobile());
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(!profile(true, "windows", MOBILE_VIEWPORT_THRESHOLD).is_mobile());
        assert!(profile(true, "windows", MOBILE_VIEWPORT_THRESHOLD - 1.0).is_mobile());
    }

    #[test]
    fn desktop_profile_has_keyboard_only() {
        let desktop = DeviceProfile::desktop(1280.0);
        assert!(desktop.keyboard_available);
        assert!(!desktop.touch_capable);
        assert!(!desktop.is_mobile());
    }
}
