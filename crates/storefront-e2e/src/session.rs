// BrowserSession - Playwright server and browser for one suite run
//
// Launched once per run from the suite configuration. Each test attempt gets
// a fresh browser context (and page) with the device's emulation settings,
// so no cookies or storage leak between tests.
//
// See: https://playwright.dev/docs/browser-contexts

use crate::base_page::FacadeSettings;
use crate::config::SuiteConfig;
use crate::devices::{DeviceProfile, Engine};
use crate::error::{Error, Result};
use crate::fixture::Fixture;
use async_trait::async_trait;
use playwright_rs::{Browser, BrowserContextOptions, LaunchOptions, Playwright, RecordVideo, Viewport};
use std::path::Path;
use std::sync::Arc;

/// Source of fresh per-attempt fixtures.
#[async_trait]
pub trait FixtureFactory: Send + Sync {
    /// Opens a fixture; when `video_dir` is set the page is recorded there.
    async fn new_fixture(&self, video_dir: Option<&Path>) -> Result<Fixture>;
}

pub struct BrowserSession {
    playwright: Playwright,
    browser: Browser,
    device: DeviceProfile,
    facade: Arc<FacadeSettings>,
}

impl BrowserSession {
    /// Starts Playwright and launches the configured browser.
    pub async fn launch(config: &SuiteConfig) -> Result<Self> {
        let device = config.device();
        tracing::info!(
            "Launching {} ({}, {}, headless={})",
            config.browser,
            device.name,
            device.engine.as_str(),
            config.headless
        );

        let playwright = Playwright::launch()
            .await
            .map_err(|e| Error::from(e).context("start Playwright"))?;

        let browser_type = match device.engine {
            Engine::Chromium => playwright.chromium(),
            Engine::Firefox => playwright.firefox(),
            Engine::Webkit => playwright.webkit(),
        };

        let mut options = LaunchOptions::new().headless(config.headless);
        if let Some(channel) = device.channel {
            options = options.channel(channel.to_string());
        }

        let browser = match browser_type.launch_with_options(options).await {
            Ok(browser) => browser,
            Err(e) => {
                // Don't leave the driver process behind
                let _ = playwright.shutdown().await;
                return Err(Error::from(e).context(format!("launch {}", config.browser)));
            }
        };

        Ok(Self {
            playwright,
            browser,
            device,
            facade: Arc::new(config.facade_settings()),
        })
    }

    pub fn device(&self) -> &DeviceProfile {
        &self.device
    }

    fn context_options(&self, video_dir: Option<&Path>) -> BrowserContextOptions {
        let viewport = Viewport {
            width: self.device.viewport.width,
            height: self.device.viewport.height,
        };
        let mut builder = BrowserContextOptions::builder()
            .viewport(viewport.clone())
            .user_agent(self.device.user_agent.to_string())
            .device_scale_factor(self.device.device_scale_factor)
            .has_touch(self.device.has_touch);

        // Firefox has no mobile emulation
        if self.device.engine != Engine::Firefox {
            builder = builder.is_mobile(self.device.is_mobile);
        }

        if let Some(dir) = video_dir {
            builder = builder.record_video(RecordVideo {
                dir: dir.display().to_string(),
                size: Some(viewport),
            });
        }

        builder.build()
    }

    /// Shuts the browser and the Playwright server down.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        Ok(())
    }
}

#[async_trait]
impl FixtureFactory for BrowserSession {
    async fn new_fixture(&self, video_dir: Option<&Path>) -> Result<Fixture> {
        let context = self
            .browser
            .new_context_with_options(self.context_options(video_dir))
            .await?;
        let page = match context.new_page().await {
            Ok(page) => page,
            Err(e) => {
                let _ = context.close().await;
                return Err(e.into());
            }
        };
        Ok(Fixture::new(Arc::new(page), Arc::clone(&self.facade)).with_context(context))
    }
}
