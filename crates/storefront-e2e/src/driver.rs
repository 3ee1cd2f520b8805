// Driver - Page-handle capability consumed by the facade
//
// The facade never talks to Playwright directly. It drives a `PageDriver`,
// the minimal set of page capabilities the page objects need: navigation,
// selector resolution, state and text reads, input actions, screenshots.
//
// Architecture:
// - `PageDriver` is object safe and shared as `Arc<dyn PageDriver>`
// - `playwright_rs::Page` implements it directly
// - Element-scoped calls target the FIRST match of a selector, mirroring
//   Playwright's non-strict page-level API (`page.click(selector)` etc.)
//
// See: https://playwright.dev/docs/api/class-page

use crate::error::{Error, Result};
use async_trait::async_trait;
use playwright_rs::protocol::{
    CheckOptions, ClickOptions, FillOptions, GotoOptions, HoverOptions, MouseButton, Page,
    ScreenshotOptions, SelectOptions, WaitUntil,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared handle to one browser tab, owned by a single test's fixture.
pub type SharedDriver = Arc<dyn PageDriver>;

/// Interval between state polls while waiting on the page.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Mouse gesture used by [`PageDriver::click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickKind {
    /// Single left click
    #[default]
    Single,
    /// Left double click
    Double,
    /// Single right click (context menu)
    Right,
}

/// Capabilities of a single browser page.
///
/// Every method suspends until the browser settles the request. Action
/// methods fail if the element cannot be found or is not interactable
/// within the driver's action timeout.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Starts navigation to an absolute URL and waits for the response to commit.
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Waits for the document to finish loading.
    ///
    /// Returns `Ok(false)` when `timeout` elapses first.
    async fn wait_for_load(&self, timeout: Duration) -> Result<bool>;

    /// The last committed URL of the page.
    fn url(&self) -> String;

    async fn title(&self) -> Result<String>;

    /// Number of elements currently matching `selector`.
    async fn count(&self, selector: &str) -> Result<usize>;

    /// Whether the first match is visible right now. `false` when nothing matches.
    async fn is_visible(&self, selector: &str) -> Result<bool>;

    /// Raw `textContent` of the first match.
    async fn text_content(&self, selector: &str) -> Result<Option<String>>;

    async fn get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>>;

    async fn input_value(&self, selector: &str) -> Result<String>;

    async fn is_checked(&self, selector: &str) -> Result<bool>;

    async fn is_enabled(&self, selector: &str) -> Result<bool>;

    async fn click(&self, selector: &str, kind: ClickKind) -> Result<()>;

    async fn hover(&self, selector: &str) -> Result<()>;

    async fn fill(&self, selector: &str, text: &str) -> Result<()>;

    async fn clear(&self, selector: &str) -> Result<()>;

    async fn set_checked(&self, selector: &str, checked: bool) -> Result<()>;

    /// Selects an option by value; returns the values now selected.
    async fn select_option(&self, selector: &str, value: &str) -> Result<Vec<String>>;

    async fn set_input_files(&self, selector: &str, files: &[PathBuf]) -> Result<()>;

    async fn scroll_into_view(&self, selector: &str) -> Result<()>;

    /// Presses a key on the focused element (keyboard-level, not element-scoped).
    async fn press_key(&self, key: &str) -> Result<()>;

    /// Captures the viewport as PNG into `path`.
    async fn screenshot(&self, path: &Path) -> Result<()>;

    async fn reload(&self) -> Result<()>;

    async fn go_back(&self) -> Result<()>;

    async fn go_forward(&self) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Narrows a selector to its first match.
pub(crate) fn first_match(selector: &str) -> String {
    format!("{} >> nth=0", selector)
}

/// Narrows a selector to its `index`-th match (0-based, DOM order).
pub(crate) fn nth_match(selector: &str, index: usize) -> String {
    format!("{} >> nth={}", selector, index)
}

// Resolves CSS or XPath in the page and scrolls the first match into view.
// Returns false when the DOM APIs cannot resolve the selector, e.g. for
// Playwright-only pseudo classes such as `:has-text()`.
const SCROLL_INTO_VIEW_SCRIPT: &str = r#"(selector) => {
  let el = null;
  try {
    if (selector.startsWith('//') || selector.startsWith('xpath=')) {
      const path = selector.replace(/^xpath=/, '');
      el = document.evaluate(path, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
    } else {
      el = document.querySelector(selector.replace(/^css=/, ''));
    }
  } catch (e) {
    return false;
  }
  if (!el) return false;
  el.scrollIntoView({ block: 'center', inline: 'nearest' });
  return true;
}"#;

#[async_trait]
impl PageDriver for Page {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        let options = GotoOptions::new()
            .timeout(timeout)
            .wait_until(WaitUntil::Commit);
        Page::goto(self, url, Some(options)).await?;
        Ok(())
    }

    async fn wait_for_load(&self, timeout: Duration) -> Result<bool> {
        let start = Instant::now();
        loop {
            // Evaluation fails while the old document is torn down; keep polling.
            match self.evaluate_value("document.readyState").await {
                Ok(state) if state == "complete" => return Ok(true),
                Ok(_) => {}
                Err(e) => tracing::debug!("readyState poll failed: {}", e),
            }

            if start.elapsed() >= timeout {
                return Ok(false);
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    fn url(&self) -> String {
        Page::url(self)
    }

    async fn title(&self) -> Result<String> {
        Ok(Page::title(self).await?)
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.locator(selector).await.count().await?)
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        Ok(self.locator(&first_match(selector)).await.is_visible().await?)
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        Ok(self
            .locator(&first_match(selector))
            .await
            .text_content()
            .await?)
    }

    async fn get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        Ok(self
            .locator(&first_match(selector))
            .await
            .get_attribute(name)
            .await?)
    }

    async fn input_value(&self, selector: &str) -> Result<String> {
        Ok(self
            .locator(&first_match(selector))
            .await
            .input_value(None)
            .await?)
    }

    async fn is_checked(&self, selector: &str) -> Result<bool> {
        Ok(self.locator(&first_match(selector)).await.is_checked().await?)
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool> {
        Ok(self.locator(&first_match(selector)).await.is_enabled().await?)
    }

    async fn click(&self, selector: &str, kind: ClickKind) -> Result<()> {
        let locator = self.locator(&first_match(selector)).await;
        match kind {
            ClickKind::Single => locator.click(None).await?,
            ClickKind::Double => locator.dblclick(None).await?,
            ClickKind::Right => {
                let options = ClickOptions::builder().button(MouseButton::Right).build();
                locator.click(Some(options)).await?
            }
        }
        Ok(())
    }

    async fn hover(&self, selector: &str) -> Result<()> {
        self.locator(&first_match(selector))
            .await
            .hover(None::<HoverOptions>)
            .await?;
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        self.locator(&first_match(selector))
            .await
            .fill(text, None::<FillOptions>)
            .await?;
        Ok(())
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        self.locator(&first_match(selector))
            .await
            .clear(None::<FillOptions>)
            .await?;
        Ok(())
    }

    async fn set_checked(&self, selector: &str, checked: bool) -> Result<()> {
        self.locator(&first_match(selector))
            .await
            .set_checked(checked, None::<CheckOptions>)
            .await?;
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<Vec<String>> {
        Ok(self
            .locator(&first_match(selector))
            .await
            .select_option(value, None::<SelectOptions>)
            .await?)
    }

    async fn set_input_files(&self, selector: &str, files: &[PathBuf]) -> Result<()> {
        let locator = self.locator(&first_match(selector)).await;
        match files {
            [single] => locator.set_input_files(single, None).await?,
            many => {
                let refs: Vec<&PathBuf> = many.iter().collect();
                locator.set_input_files_multiple(&refs, None).await?
            }
        }
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<()> {
        // Playwright's selector engine decides whether the element exists
        let locator = self.locator(&first_match(selector)).await;
        if locator.count().await? == 0 {
            return Err(Error::ElementNotFound {
                selector: selector.to_string(),
                action: "scroll into view",
            });
        }

        let scrolled: bool = self
            .evaluate(SCROLL_INTO_VIEW_SCRIPT, Some(&selector.to_string()))
            .await?;
        if !scrolled {
            // Hovering makes Playwright scroll the element into view itself
            tracing::debug!("Scrolling '{}' via hover", selector);
            locator.hover(None::<HoverOptions>).await?;
        }
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        self.keyboard().press(key, None).await?;
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.screenshot_to_file(path, None::<ScreenshotOptions>)
            .await?;
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        Page::reload(self, None).await?;
        Ok(())
    }

    async fn go_back(&self) -> Result<()> {
        self.evaluate_expression("history.back()").await?;
        Ok(())
    }

    async fn go_forward(&self) -> Result<()> {
        self.evaluate_expression("history.forward()").await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Page::close(self).await?;
        Ok(())
    }
}
