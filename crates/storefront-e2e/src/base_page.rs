// BasePage - Element interaction facade shared by all page objects
//
// Translates semantic intents (click, fill, wait, read) into driver calls and
// normalizes timeouts, absence and multi-element reads.
//
// Error contract:
// - Checks (visibility, text and attribute reads, text/count verification)
//   never fail; they resolve to `false`, `None` or an empty list.
// - Explicit waits and actions propagate failures to the calling test.
// - A navigation whose load signal times out is logged and tolerated.

use crate::driver::{ClickKind, POLL_INTERVAL, SharedDriver, nth_match};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Default time allowed for a navigation to commit.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default time allowed for the load signal after a navigation.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for visibility checks.
pub const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for explicit waits.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long `verify_element_text` waits for the element to attach.
const VERIFY_TEXT_ATTACH_TIMEOUT: Duration = Duration::from_secs(3);

/// Default directory for named screenshots.
pub const DEFAULT_SCREENSHOT_DIR: &str = "tests/screenshots";

/// Element state an explicit wait can block on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// At least one match is in the DOM
    Attached,
    /// No match is in the DOM
    Detached,
    /// The first match is rendered and visible
    Visible,
    /// No visible match (absent or hidden)
    Hidden,
}

impl ElementState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementState::Attached => "attached",
            ElementState::Detached => "detached",
            ElementState::Visible => "visible",
            ElementState::Hidden => "hidden",
        }
    }
}

/// Facade configuration shared by every page object of a test.
#[derive(Debug, Clone)]
pub struct FacadeSettings {
    /// Relative URLs passed to `navigate_to` are resolved against this
    pub base_url: Option<Url>,
    /// Target directory of `take_screenshot`
    pub screenshot_dir: PathBuf,
    pub navigation_timeout: Duration,
    pub load_timeout: Duration,
    /// Timeout of `is_element_visible` and the page predicates built on it
    pub visibility_timeout: Duration,
}

impl Default for FacadeSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
        }
    }
}

impl FacadeSettings {
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    pub fn with_visibility_timeout(mut self, timeout: Duration) -> Self {
        self.visibility_timeout = timeout;
        self
    }
}

/// Semantic operations over one page handle.
///
/// Page objects hold a `BasePage` rather than extending it; clones share the
/// same underlying page.
#[derive(Clone)]
pub struct BasePage {
    driver: SharedDriver,
    settings: Arc<FacadeSettings>,
}

impl std::fmt::Debug for BasePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasePage")
            .field("url", &self.driver.url())
            .field("settings", &self.settings)
            .finish()
    }
}

impl BasePage {
    pub fn new(driver: SharedDriver, settings: Arc<FacadeSettings>) -> Self {
        Self { driver, settings }
    }

    /// The page handle this facade drives.
    pub fn driver(&self) -> &SharedDriver {
        &self.driver
    }

    pub fn settings(&self) -> &FacadeSettings {
        &self.settings
    }

    // Navigation

    /// Resolves `url` against the base URL; absolute URLs pass through.
    pub fn resolve_url(&self, url: &str) -> Result<String> {
        let resolved = match &self.settings.base_url {
            Some(base) => base.join(url)?,
            None => Url::parse(url)?,
        };
        Ok(resolved.to_string())
    }

    /// Loads `url`, then waits for the page to finish loading.
    ///
    /// Navigation errors propagate; a load signal that never arrives only
    /// logs a warning, since later visibility checks are the real assertions.
    pub async fn navigate_to(&self, url: &str) -> Result<()> {
        let target = self.resolve_url(url)?;
        tracing::debug!("Navigating to {}", target);
        self.driver
            .goto(&target, self.settings.navigation_timeout)
            .await
            .map_err(|e| e.context(format!("navigate to {}", target)))?;
        self.wait_for_page_load(self.settings.load_timeout).await;
        Ok(())
    }

    /// Waits for the load signal; logs a warning instead of failing on timeout.
    pub async fn wait_for_page_load(&self, timeout: Duration) {
        match self.driver.wait_for_load(timeout).await {
            Ok(true) => {}
            Ok(false) => tracing::warn!("Page did not load within {}s", timeout.as_secs()),
            Err(e) => tracing::warn!("Page load state unavailable: {}", e),
        }
    }

    /// Waits until the URL differs from the URL at call time.
    pub async fn wait_for_navigation(&self, timeout: Duration) -> Result<()> {
        let from = self.driver.url();
        self.wait_for_url_change(&from, timeout).await
    }

    /// Waits until the URL differs from `from`, e.g. a URL captured before
    /// clicking a link.
    pub async fn wait_for_url_change(&self, from: &str, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            if self.driver.url() != from {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(Error::NavigationTimeout {
                    from: from.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub fn get_current_url(&self) -> String {
        self.driver.url()
    }

    /// Whether the current URL contains `fragment`.
    pub fn url_contains(&self, fragment: &str) -> bool {
        self.driver.url().contains(fragment)
    }

    /// Whether the current URL's path is exactly `path`.
    pub fn url_path_is(&self, path: &str) -> bool {
        Url::parse(&self.driver.url())
            .map(|u| u.path() == path)
            .unwrap_or(false)
    }

    pub async fn get_page_title(&self) -> Result<String> {
        self.driver.title().await
    }

    pub async fn reload(&self) -> Result<()> {
        self.driver.reload().await
    }

    pub async fn go_back(&self) -> Result<()> {
        self.driver.go_back().await
    }

    pub async fn go_forward(&self) -> Result<()> {
        self.driver.go_forward().await
    }

    pub async fn close(&self) -> Result<()> {
        self.driver.close().await
    }

    // Explicit waits

    /// Blocks until the element reaches `state`; fails with
    /// [`Error::WaitTimeout`] once `timeout` elapses.
    pub async fn wait_for_state(
        &self,
        selector: &str,
        state: ElementState,
        timeout: Duration,
    ) -> Result<()> {
        let start = Instant::now();
        loop {
            if self.reached(selector, state).await? {
                return Ok(());
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(Error::WaitTimeout {
                    selector: selector.to_string(),
                    state: state.as_str(),
                    timeout,
                });
            }

            tokio::time::sleep(POLL_INTERVAL.min(timeout - elapsed)).await;
        }
    }

    async fn reached(&self, selector: &str, state: ElementState) -> Result<bool> {
        Ok(match state {
            ElementState::Attached => self.driver.count(selector).await? > 0,
            ElementState::Detached => self.driver.count(selector).await? == 0,
            ElementState::Visible => self.driver.is_visible(selector).await?,
            ElementState::Hidden => !self.driver.is_visible(selector).await?,
        })
    }

    /// Waits for the element to be visible.
    pub async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.wait_for_state(selector, ElementState::Visible, timeout)
            .await
    }

    pub async fn wait_for_element_attached(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.wait_for_state(selector, ElementState::Attached, timeout)
            .await
    }

    pub async fn wait_for_element_detached(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.wait_for_state(selector, ElementState::Detached, timeout)
            .await
    }

    pub async fn wait_for_element_to_be_visible(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.wait_for_state(selector, ElementState::Visible, timeout)
            .await
    }

    pub async fn wait_for_element_to_be_hidden(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.wait_for_state(selector, ElementState::Hidden, timeout)
            .await
    }

    /// Waits for an element whose text matches `text` to be visible.
    pub async fn wait_for_text(&self, text: &str) -> Result<()> {
        self.wait_for_state(
            &format!("text={}", text),
            ElementState::Visible,
            DEFAULT_WAIT_TIMEOUT,
        )
        .await
    }

    pub async fn wait_for_timeout(&self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    // Checks

    /// Whether the element becomes visible within `timeout`. Never fails.
    pub async fn is_element_visible_within(&self, selector: &str, timeout: Duration) -> bool {
        match self
            .wait_for_state(selector, ElementState::Visible, timeout)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("'{}' not visible: {}", selector, e);
                false
            }
        }
    }

    /// Whether the element becomes visible within the visibility timeout
    /// (5s unless configured otherwise).
    pub async fn is_element_visible(&self, selector: &str) -> bool {
        self.is_element_visible_within(selector, self.settings.visibility_timeout)
            .await
    }

    /// Checks every selector in order; true only if all become visible.
    pub async fn are_elements_visible(&self, selectors: &[&str]) -> bool {
        for selector in selectors {
            if !self.is_element_visible(selector).await {
                return false;
            }
        }
        true
    }

    /// Trimmed text of the first match, `None` if absent or unreadable.
    pub async fn get_text(&self, selector: &str) -> Option<String> {
        match self.driver.count(selector).await {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("get_text('{}'): {}", selector, e);
                return None;
            }
        }

        match self.driver.text_content(selector).await {
            Ok(text) => text.map(|t| t.trim().to_string()),
            Err(e) => {
                tracing::debug!("get_text('{}'): {}", selector, e);
                None
            }
        }
    }

    /// Trimmed text of every match in DOM order, skipping blank entries.
    ///
    /// Returns an empty list when nothing matches or any read fails.
    pub async fn get_list_of_text(&self, selector: &str) -> Vec<String> {
        match self.collect_texts(selector).await {
            Ok(texts) => texts,
            Err(e) => {
                tracing::debug!("get_list_of_text('{}'): {}", selector, e);
                Vec::new()
            }
        }
    }

    async fn collect_texts(&self, selector: &str) -> Result<Vec<String>> {
        let count = self.driver.count(selector).await?;
        let mut texts = Vec::with_capacity(count);
        for index in 0..count {
            let text = self.driver.text_content(&nth_match(selector, index)).await?;
            if let Some(text) = text {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    texts.push(trimmed.to_string());
                }
            }
        }
        Ok(texts)
    }

    /// Attribute of the first match, `None` if the element or attribute is absent.
    pub async fn get_attribute(&self, selector: &str, attribute: &str) -> Option<String> {
        match self.driver.count(selector).await {
            Ok(n) if n > 0 => self
                .driver
                .get_attribute(selector, attribute)
                .await
                .unwrap_or_else(|e| {
                    tracing::debug!("get_attribute('{}', {}): {}", selector, attribute, e);
                    None
                }),
            _ => None,
        }
    }

    /// Whether the first match's text contains `expected`. Never fails.
    pub async fn verify_element_text(&self, selector: &str, expected: &str) -> bool {
        // Absence is decided by the read below.
        let _ = self
            .wait_for_element_attached(selector, VERIFY_TEXT_ATTACH_TIMEOUT)
            .await;
        match self.driver.text_content(selector).await {
            Ok(Some(text)) => text.contains(expected),
            _ => false,
        }
    }

    /// Whether exactly `expected` elements match. Never fails.
    pub async fn verify_element_count(&self, selector: &str, expected: usize) -> bool {
        matches!(self.driver.count(selector).await, Ok(n) if n == expected)
    }

    // Reads that propagate

    pub async fn count_elements(&self, selector: &str) -> Result<usize> {
        self.driver.count(selector).await
    }

    pub async fn get_input_value(&self, selector: &str) -> Result<String> {
        self.driver.input_value(selector).await
    }

    pub async fn is_checked(&self, selector: &str) -> Result<bool> {
        self.driver.is_checked(selector).await
    }

    pub async fn is_enabled(&self, selector: &str) -> Result<bool> {
        self.driver.is_enabled(selector).await
    }

    pub async fn is_disabled(&self, selector: &str) -> Result<bool> {
        Ok(!self.driver.is_enabled(selector).await?)
    }

    // Actions

    pub async fn click_element(&self, selector: &str) -> Result<()> {
        tracing::debug!("click {}", selector);
        self.driver.click(selector, ClickKind::Single).await
    }

    /// Clicks the `index`-th match (0-based, DOM order).
    pub async fn click_nth(&self, selector: &str, index: usize) -> Result<()> {
        let target = nth_match(selector, index);
        tracing::debug!("click {}", target);
        self.driver.click(&target, ClickKind::Single).await
    }

    pub async fn double_click(&self, selector: &str) -> Result<()> {
        self.driver.click(selector, ClickKind::Double).await
    }

    pub async fn right_click(&self, selector: &str) -> Result<()> {
        self.driver.click(selector, ClickKind::Right).await
    }

    pub async fn hover(&self, selector: &str) -> Result<()> {
        self.driver.hover(selector).await
    }

    pub async fn fill_input_field(&self, selector: &str, text: &str) -> Result<()> {
        tracing::debug!("fill {} with '{}'", selector, text);
        self.driver.fill(selector, text).await
    }

    pub async fn clear_field(&self, selector: &str) -> Result<()> {
        self.driver.clear(selector).await
    }

    pub async fn check_checkbox(&self, selector: &str) -> Result<()> {
        self.driver.set_checked(selector, true).await
    }

    pub async fn uncheck_checkbox(&self, selector: &str) -> Result<()> {
        self.driver.set_checked(selector, false).await
    }

    pub async fn select_option(&self, selector: &str, value: &str) -> Result<Vec<String>> {
        self.driver.select_option(selector, value).await
    }

    pub async fn upload_file(&self, selector: &str, files: &[PathBuf]) -> Result<()> {
        self.driver.set_input_files(selector, files).await
    }

    pub async fn press_key(&self, key: &str) -> Result<()> {
        self.driver.press_key(key).await
    }

    pub async fn scroll_to_element(&self, selector: &str) -> Result<()> {
        self.driver.scroll_into_view(selector).await
    }

    // Artifacts

    /// Saves `<screenshot_dir>/<name>.png` and returns its path.
    pub async fn take_screenshot(&self, name: &str) -> Result<PathBuf> {
        let path = self.settings.screenshot_dir.join(format!("{}.png", name));
        self.screenshot_to(&path).await?;
        Ok(path)
    }

    /// Saves a screenshot at `path`, creating parent directories as needed.
    pub async fn screenshot_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            // create_dir_all succeeds if another worker created it first
            tokio::fs::create_dir_all(dir).await?;
        }
        self.driver.screenshot(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDriver, FakeElement};

    fn facade(driver: Arc<FakeDriver>) -> BasePage {
        let base = Url::parse("https://shop.test").unwrap();
        BasePage::new(
            driver,
            Arc::new(FacadeSettings::default().with_base_url(base)),
        )
    }

    #[test]
    fn test_resolve_url() {
        let page = facade(FakeDriver::new("about:blank"));
        assert_eq!(page.resolve_url("/").unwrap(), "https://shop.test/");
        assert_eq!(
            page.resolve_url("/products").unwrap(),
            "https://shop.test/products"
        );
        assert_eq!(
            page.resolve_url("http://other.test/x").unwrap(),
            "http://other.test/x"
        );

        let no_base = BasePage::new(
            FakeDriver::new("about:blank"),
            Arc::new(FacadeSettings::default()),
        );
        assert!(matches!(no_base.resolve_url("/products"), Err(Error::Url(_))));
    }

    #[tokio::test]
    async fn test_navigate_tolerates_load_timeout() {
        let driver = FakeDriver::new("about:blank");
        driver.set_loaded(false);
        let settings = FacadeSettings {
            load_timeout: Duration::from_millis(50),
            ..FacadeSettings::default().with_base_url(Url::parse("https://shop.test").unwrap())
        };
        let page = BasePage::new(driver.clone(), Arc::new(settings));

        page.navigate_to("/products").await.unwrap();
        assert_eq!(page.get_current_url(), "https://shop.test/products");
        assert_eq!(driver.actions(), vec!["goto https://shop.test/products"]);
    }

    #[tokio::test]
    async fn test_list_of_text_filters_blank_and_keeps_order() {
        let driver = FakeDriver::new("https://shop.test/products");
        driver.set(
            "p.title",
            vec![
                FakeElement::text("  Blue Top "),
                FakeElement::text("   "),
                FakeElement::text("Men Tshirt"),
                FakeElement {
                    text: None,
                    ..FakeElement::text("")
                },
                FakeElement::text("\n\tWinter Top\n"),
            ],
        );
        let page = facade(driver);

        assert_eq!(
            page.get_list_of_text("p.title").await,
            vec!["Blue Top", "Men Tshirt", "Winter Top"]
        );
    }

    #[tokio::test]
    async fn test_list_of_text_sentinels() {
        let driver = FakeDriver::new("https://shop.test/products");
        driver.set("p.broken", vec![FakeElement::text("x")]);
        driver.break_selector("p.broken");
        let page = facade(driver);

        assert!(page.get_list_of_text("p.none").await.is_empty());
        assert!(page.get_list_of_text("p.broken").await.is_empty());
    }

    #[tokio::test]
    async fn test_get_text_and_attribute_sentinels() {
        let driver = FakeDriver::new("https://shop.test/");
        driver.set(
            "h2",
            vec![FakeElement::text("  Blue Top  ").with_attribute("data-id", "1")],
        );
        let page = facade(driver);

        assert_eq!(page.get_text("h2").await.as_deref(), Some("Blue Top"));
        assert_eq!(page.get_text("h3").await, None);
        assert_eq!(
            page.get_attribute("h2", "data-id").await.as_deref(),
            Some("1")
        );
        assert_eq!(page.get_attribute("h2", "missing").await, None);
        assert_eq!(page.get_attribute("h3", "data-id").await, None);
    }

    #[tokio::test]
    async fn test_is_element_visible_returns_false_on_timeout() {
        let driver = FakeDriver::new("https://shop.test/");
        driver.set("#hidden", vec![FakeElement::hidden("secret")]);
        driver.set("#broken", vec![FakeElement::text("x")]);
        driver.break_selector("#broken");
        let page = facade(driver);

        let short = Duration::from_millis(150);
        assert!(!page.is_element_visible_within("#missing", short).await);
        assert!(!page.is_element_visible_within("#hidden", short).await);
        assert!(!page.is_element_visible_within("#broken", short).await);
    }

    #[tokio::test]
    async fn test_is_element_visible_waits_for_late_element() {
        let driver = FakeDriver::new("https://shop.test/");
        driver.set_after(
            "#late",
            Duration::from_millis(200),
            vec![FakeElement::text("here")],
        );
        let page = facade(driver);

        assert!(
            page.is_element_visible_within("#late", Duration::from_secs(2))
                .await
        );
    }

    #[tokio::test]
    async fn test_explicit_waits_propagate_timeout() {
        let driver = FakeDriver::new("https://shop.test/");
        driver.set("#modal", vec![FakeElement::text("Added!")]);
        let page = facade(driver.clone());

        let err = page
            .wait_for_element_detached("#modal", Duration::from_millis(150))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::WaitTimeout {
                state: "detached",
                ..
            }
        ));

        driver.remove_after("#modal", Duration::from_millis(100));
        page.wait_for_element_detached("#modal", Duration::from_secs(2))
            .await
            .unwrap();
        page.wait_for_element_to_be_hidden("#modal", Duration::from_millis(10))
            .await
            .unwrap();

        let err = page
            .wait_for_element_attached("#never", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Timed out after 100ms waiting for '#never' to be attached"
        );
    }

    #[tokio::test]
    async fn test_verify_helpers() {
        let driver = FakeDriver::new("https://shop.test/");
        driver.set(
            "li",
            vec![FakeElement::text("Rs. 500"), FakeElement::text("Rs. 400")],
        );
        let page = facade(driver);

        assert!(page.verify_element_text("li", "500").await);
        assert!(!page.verify_element_text("li", "400").await);
        assert!(page.verify_element_count("li", 2).await);
        assert!(!page.verify_element_count("li", 1).await);
        assert!(page.verify_element_count("td", 0).await);
    }

    #[tokio::test]
    async fn test_actions_propagate_missing_element() {
        let driver = FakeDriver::new("https://shop.test/");
        let page = facade(driver);

        assert!(page.click_element("#missing").await.is_err());
        assert!(page.fill_input_field("#missing", "x").await.is_err());
        assert!(page.clear_field("#missing").await.is_err());
        assert!(page.check_checkbox("#missing").await.is_err());
        assert!(page.get_input_value("#missing").await.is_err());
    }

    #[tokio::test]
    async fn test_input_actions() {
        let driver = FakeDriver::new("https://shop.test/");
        driver.set("#qty", vec![FakeElement::input("1")]);
        driver.set("#agree", vec![FakeElement::input("")]);
        driver.set("a.item", vec![FakeElement::text("a"), FakeElement::text("b")]);
        let page = facade(driver.clone());

        page.clear_field("#qty").await.unwrap();
        assert_eq!(page.get_input_value("#qty").await.unwrap(), "");
        page.fill_input_field("#qty", "4").await.unwrap();
        assert_eq!(page.get_input_value("#qty").await.unwrap(), "4");

        page.check_checkbox("#agree").await.unwrap();
        assert!(page.is_checked("#agree").await.unwrap());
        page.uncheck_checkbox("#agree").await.unwrap();
        assert!(!page.is_checked("#agree").await.unwrap());
        assert!(!page.is_disabled("#agree").await.unwrap());

        page.click_nth("a.item", 1).await.unwrap();
        page.right_click("a.item").await.unwrap();
        page.press_key("Enter").await.unwrap();

        page.double_click("a.item").await.unwrap();
        page.hover("a.item").await.unwrap();
        page.scroll_to_element("a.item").await.unwrap();
        page.upload_file("#qty", &[PathBuf::from("avatar.png")])
            .await
            .unwrap();

        let actions = driver.actions();
        assert!(actions.contains(&"click(Single) a.item >> nth=1".to_string()));
        assert!(actions.contains(&"click(Right) a.item".to_string()));
        assert!(actions.contains(&"press Enter".to_string()));
        assert!(actions.contains(&"click(Double) a.item".to_string()));
        assert!(actions.contains(&"hover a.item".to_string()));
        assert!(actions.contains(&"scroll a.item".to_string()));
        assert!(actions.contains(&"upload #qty (1 files)".to_string()));
    }

    #[tokio::test]
    async fn test_input_actions_on_missing_element_fail() {
        let driver = FakeDriver::new("https://shop.test/");
        let page = facade(driver.clone());

        assert!(page.double_click("#missing").await.is_err());
        assert!(page.hover("#missing").await.is_err());
        assert!(
            page.upload_file("#missing", &[PathBuf::from("avatar.png")])
                .await
                .is_err()
        );
        let err = page.scroll_to_element("#missing").await.unwrap_err();
        assert!(
            matches!(&err, Error::ElementNotFound { selector, .. } if selector == "#missing"),
            "{}",
            err
        );
        assert!(driver.actions().is_empty());
    }

    #[tokio::test]
    async fn test_take_screenshot_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join("nested").join("screenshots");
        let driver = FakeDriver::new("https://shop.test/");
        let page = BasePage::new(
            driver.clone(),
            Arc::new(FacadeSettings::default().with_screenshot_dir(&shots)),
        );

        let first = page.take_screenshot("home").await.unwrap();
        // A second capture into the existing directory still succeeds
        let second = page.take_screenshot("cart").await.unwrap();

        assert_eq!(first, shots.join("home.png"));
        assert!(first.exists());
        assert!(second.exists());
        assert_eq!(driver.screenshots().len(), 2);
    }

    #[tokio::test]
    async fn test_wait_for_navigation() {
        let driver = FakeDriver::new("https://shop.test/");
        let page = facade(driver.clone());

        let err = page
            .wait_for_navigation(Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NavigationTimeout { .. }));

        let waiter = {
            let page = page.clone();
            tokio::spawn(async move { page.wait_for_navigation(Duration::from_secs(2)).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        driver.set_url("https://shop.test/products");
        waiter.await.unwrap().unwrap();
    }

    #[test]
    fn test_url_predicates() {
        let driver = FakeDriver::new("https://shop.test/product_details/3");
        let page = facade(driver.clone());

        assert!(page.url_contains("/product_details/"));
        assert!(!page.url_contains("/view_cart"));
        assert!(!page.url_path_is("/"));

        driver.set_url("https://shop.test/");
        assert!(page.url_path_is("/"));
    }
}
