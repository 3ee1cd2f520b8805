// Configuration - Suite settings from `.env.<TEST_ENV>` and the environment
//
// `SuiteConfig::load` selects the environment file from `TEST_ENV`
// (default `dev`) and fails fast when it does not exist. Process environment
// variables take precedence over values from the file. Resolution itself is
// the pure `SuiteConfig::from_lookup`.
//
// CI=true forces headless mode, 3 workers and 2 retries.

use crate::base_page::FacadeSettings;
use crate::devices::{self, DeviceProfile, ViewportSize};
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TEST_ENV: &str = "dev";
pub const DEFAULT_BASE_URL: &str = "https://automationexercise.com";
pub const DEFAULT_VIEWPORT: ViewportSize = ViewportSize {
    width: 1920,
    height: 1080,
};
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_OUTPUT_DIR: &str = "test-results";

const CI_WORKERS: usize = 3;
const CI_RETRIES: u32 = 2;

/// Browser/device target selected by `BROWSER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrowserKind {
    Chrome,
    Firefox,
    Safari,
    MobileChrome,
    MobileSafari,
    MobileFirefox,
    Edge,
}

impl BrowserKind {
    pub const ALL: &'static [BrowserKind] = &[
        BrowserKind::Chrome,
        BrowserKind::Firefox,
        BrowserKind::Safari,
        BrowserKind::MobileChrome,
        BrowserKind::MobileSafari,
        BrowserKind::MobileFirefox,
        BrowserKind::Edge,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Safari => "safari",
            BrowserKind::MobileChrome => "mobile-chrome",
            BrowserKind::MobileSafari => "mobile-safari",
            BrowserKind::MobileFirefox => "mobile-firefox",
            BrowserKind::Edge => "edge",
        }
    }

    /// Resolves a `BROWSER` value; unknown keys fall back to Chrome.
    pub fn resolve(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown browser '{}', falling back to chrome", value);
            BrowserKind::Chrome
        })
    }

    /// Emulation settings for this target.
    pub fn device(&self) -> DeviceProfile {
        match self {
            BrowserKind::Chrome => devices::DESKTOP_CHROME,
            BrowserKind::Firefox => devices::DESKTOP_FIREFOX,
            BrowserKind::Safari => devices::DESKTOP_SAFARI,
            BrowserKind::MobileChrome => devices::PIXEL_5,
            BrowserKind::MobileSafari => devices::IPHONE_12,
            BrowserKind::MobileFirefox => devices::PIXEL_5.overlaid_with(&devices::DESKTOP_FIREFOX),
            BrowserKind::Edge => devices::DESKTOP_EDGE,
        }
    }

    /// Whether `VIEWPORT_WIDTH`/`VIEWPORT_HEIGHT` override the device viewport.
    pub fn uses_configured_viewport(&self) -> bool {
        matches!(
            self,
            BrowserKind::Chrome | BrowserKind::Firefox | BrowserKind::Safari | BrowserKind::Edge
        )
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BrowserKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| Error::InvalidConfig {
                key: "BROWSER".to_string(),
                message: format!(
                    "unknown browser '{}' (expected one of: {})",
                    s,
                    BrowserKind::ALL
                        .iter()
                        .map(|k| k.key())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Resolved settings of one suite run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub test_env: String,
    pub base_url: Url,
    pub browser: BrowserKind,
    pub headless: bool,
    /// Viewport for desktop targets
    pub viewport: ViewportSize,
    /// Run tests of one suite concurrently instead of in declaration order
    pub parallel: bool,
    pub workers: usize,
    pub retries: u32,
    /// Per-test timeout, applied to each attempt; `None` when `TIMEOUT=0`
    pub timeout: Option<Duration>,
    pub output_dir: PathBuf,
    pub screenshot_dir: PathBuf,
    pub ci: bool,
}

impl SuiteConfig {
    /// Loads `<root>/.env.<TEST_ENV>` layered under the process environment.
    pub fn load(root: &Path) -> Result<Self> {
        let test_env =
            std::env::var("TEST_ENV").unwrap_or_else(|_| DEFAULT_TEST_ENV.to_string());
        Self::load_env(root, &test_env)
    }

    /// Like [`SuiteConfig::load`], for an explicit environment name.
    pub fn load_env(root: &Path, test_env: &str) -> Result<Self> {
        tracing::info!("Loading environment configuration for: {}", test_env);
        let file_values = read_env_file(root, test_env)?;

        let mut config = Self::from_lookup(test_env, |key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_values.get(key).cloned())
        })?;
        config.output_dir = root.join(&config.output_dir);
        config.screenshot_dir = root.join(&config.screenshot_dir);
        Ok(config)
    }

    /// Resolves every setting from `lookup`, applying defaults and CI
    /// overrides. Relative directories are returned as given.
    pub fn from_lookup<F>(test_env: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ci = lookup("CI").as_deref() == Some("true");

        let base_url = lookup("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|e| Error::InvalidConfig {
            key: "BASE_URL".to_string(),
            message: format!("'{}': {}", base_url, e),
        })?;

        let browser = lookup("BROWSER")
            .map(|value| BrowserKind::resolve(&value))
            .unwrap_or(BrowserKind::Chrome);

        let headless = if ci {
            true
        } else {
            lookup("HEADLESS")
                .map(|value| value.to_lowercase() == "true")
                .unwrap_or(true)
        };

        let viewport = ViewportSize {
            width: dimension(lookup("VIEWPORT_WIDTH"), DEFAULT_VIEWPORT.width),
            height: dimension(lookup("VIEWPORT_HEIGHT"), DEFAULT_VIEWPORT.height),
        };

        let parallel = lookup("PARALLEL").is_some_and(|value| value == "true");

        let workers = if ci {
            CI_WORKERS
        } else {
            parse_number(&lookup, "WORKERS", 1usize)?
        };
        if workers == 0 {
            return Err(Error::InvalidConfig {
                key: "WORKERS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let retries = if ci {
            CI_RETRIES
        } else {
            parse_number(&lookup, "RETRIES", 0u32)?
        };

        // 0 disables the per-test timeout
        let timeout = match parse_number(&lookup, "TIMEOUT", DEFAULT_TIMEOUT_MS)? {
            0 => None,
            millis => Some(Duration::from_millis(millis)),
        };

        Ok(Self {
            test_env: test_env.to_string(),
            base_url,
            browser,
            headless,
            viewport,
            parallel,
            workers,
            retries,
            timeout,
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            screenshot_dir: lookup("SCREENSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(crate::base_page::DEFAULT_SCREENSHOT_DIR)),
            ci,
        })
    }

    /// Device settings with the configured viewport applied where it overrides.
    pub fn device(&self) -> DeviceProfile {
        let mut device = self.browser.device();
        if self.browser.uses_configured_viewport() {
            device.viewport = self.viewport;
        }
        device
    }

    /// Facade settings for page objects of this run.
    pub fn facade_settings(&self) -> FacadeSettings {
        FacadeSettings::default()
            .with_base_url(self.base_url.clone())
            .with_screenshot_dir(&self.screenshot_dir)
    }
}

fn read_env_file(root: &Path, test_env: &str) -> Result<HashMap<String, String>> {
    let path = root.join(format!(".env.{}", test_env));
    if !path.is_file() {
        return Err(Error::EnvFileNotFound {
            env: test_env.to_string(),
            path,
        });
    }

    let invalid = |e: dotenvy::Error| Error::InvalidConfig {
        key: path.display().to_string(),
        message: e.to_string(),
    };
    dotenvy::from_path_iter(&path)
        .map_err(invalid)?
        .map(|item| item.map_err(invalid))
        .collect()
}

// Missing, unparsable or zero dimensions fall back to the default.
fn dimension(value: Option<String>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

fn parse_number<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| Error::InvalidConfig {
            key: key.to_string(),
            message: format!("'{}': {}", value, e),
        }),
    }
}
