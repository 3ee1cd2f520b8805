// Device profiles - Emulation settings per target browser
//
// Values follow Playwright's device descriptor registry.
//
// See: https://playwright.dev/docs/emulation#devices

use serde::Serialize;

/// Browser engine a profile runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Chromium,
    Firefox,
    Webkit,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Chromium => "chromium",
            Engine::Firefox => "firefox",
            Engine::Webkit => "webkit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

/// Emulated device: engine, release channel and context options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceProfile {
    pub name: &'static str,
    pub engine: Engine,
    /// Branded build of the engine (e.g. `msedge`)
    pub channel: Option<&'static str>,
    pub user_agent: &'static str,
    pub viewport: ViewportSize,
    pub device_scale_factor: f64,
    pub is_mobile: bool,
    pub has_touch: bool,
}

impl DeviceProfile {
    /// Settings of `top` layered over `self`: every field `top` defines wins.
    ///
    /// Desktop descriptors define every field, so layering one over a
    /// mobile descriptor yields the desktop settings.
    pub fn overlaid_with(&self, top: &DeviceProfile) -> DeviceProfile {
        DeviceProfile {
            name: self.name,
            ..top.clone()
        }
    }
}

const DESKTOP_VIEWPORT: ViewportSize = ViewportSize {
    width: 1280,
    height: 720,
};

pub const DESKTOP_CHROME: DeviceProfile = DeviceProfile {
    name: "Desktop Chrome",
    engine: Engine::Chromium,
    channel: None,
    user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36",
    viewport: DESKTOP_VIEWPORT,
    device_scale_factor: 1.0,
    is_mobile: false,
    has_touch: false,
};

pub const DESKTOP_EDGE: DeviceProfile = DeviceProfile {
    name: "Desktop Edge",
    engine: Engine::Chromium,
    channel: Some("msedge"),
    user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36 Edg/139.0.0.0",
    viewport: DESKTOP_VIEWPORT,
    device_scale_factor: 1.0,
    is_mobile: false,
    has_touch: false,
};

pub const DESKTOP_FIREFOX: DeviceProfile = DeviceProfile {
    name: "Desktop Firefox",
    engine: Engine::Firefox,
    channel: None,
    user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:141.0) Gecko/20100101 Firefox/141.0",
    viewport: DESKTOP_VIEWPORT,
    device_scale_factor: 1.0,
    is_mobile: false,
    has_touch: false,
};

pub const DESKTOP_SAFARI: DeviceProfile = DeviceProfile {
    name: "Desktop Safari",
    engine: Engine::Webkit,
    channel: None,
    user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/26.0 Safari/605.1.15",
    viewport: DESKTOP_VIEWPORT,
    device_scale_factor: 2.0,
    is_mobile: false,
    has_touch: false,
};

pub const PIXEL_5: DeviceProfile = DeviceProfile {
    name: "Pixel 5",
    engine: Engine::Chromium,
    channel: None,
    user_agent: "Mozilla/5.0 (Linux; Android 11; Pixel 5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Mobile Safari/537.36",
    viewport: ViewportSize {
        width: 393,
        height: 727,
    },
    device_scale_factor: 2.75,
    is_mobile: true,
    has_touch: true,
};

pub const IPHONE_12: DeviceProfile = DeviceProfile {
    name: "iPhone 12",
    engine: Engine::Webkit,
    channel: None,
    user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 14_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Mobile/15E148 Safari/604.1",
    viewport: ViewportSize {
        width: 390,
        height: 664,
    },
    device_scale_factor: 3.0,
    is_mobile: true,
    has_touch: true,
};

/// Every registered profile.
pub const ALL: &[&DeviceProfile] = &[
    &DESKTOP_CHROME,
    &DESKTOP_EDGE,
    &DESKTOP_FIREFOX,
    &DESKTOP_SAFARI,
    &PIXEL_5,
    &IPHONE_12,
];

/// Looks a profile up by its descriptor name (e.g. `"Pixel 5"`).
pub fn by_name(name: &str) -> Option<&'static DeviceProfile> {
    ALL.iter().copied().find(|profile| profile.name == name)
}
