// In-memory PageDriver for unit tests
//
// Holds a flat "DOM": selector string -> ordered list of elements. Elements
// can be scheduled to appear or disappear after a delay to exercise the
// facade's waits, and selectors can be poisoned to make every driver call
// on them fail.

use crate::base_page::{BasePage, FacadeSettings};
use crate::driver::{ClickKind, PageDriver};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Base URL of facades built by [`fake_base`].
pub(crate) const FAKE_ORIGIN: &str = "https://shop.test";

/// Facade over `driver` resolving against [`FAKE_ORIGIN`], with a short
/// visibility timeout so negative predicates return quickly.
pub(crate) fn fake_base(driver: Arc<FakeDriver>) -> BasePage {
    let settings = FacadeSettings::default()
        .with_base_url(url::Url::parse(FAKE_ORIGIN).unwrap())
        .with_visibility_timeout(Duration::from_millis(150));
    BasePage::new(driver, Arc::new(settings))
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement {
    pub text: Option<String>,
    pub visible: bool,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub attributes: HashMap<String, String>,
}

impl FakeElement {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            visible: true,
            ..Default::default()
        }
    }

    pub fn hidden(text: &str) -> Self {
        Self {
            visible: false,
            ..Self::text(text)
        }
    }

    pub fn input(value: &str) -> Self {
        Self {
            text: Some(String::new()),
            visible: true,
            value: value.to_string(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Default)]
struct FakeState {
    url: String,
    title: String,
    loaded: bool,
    elements: HashMap<String, Vec<FakeElement>>,
    scheduled: Vec<(Instant, String, Option<Vec<FakeElement>>)>,
    broken: HashSet<String>,
    links: HashMap<String, String>,
    actions: Vec<String>,
    screenshots: Vec<PathBuf>,
}

#[derive(Default)]
pub(crate) struct FakeDriver {
    state: Mutex<FakeState>,
}

impl FakeDriver {
    pub fn new(url: &str) -> Arc<Self> {
        let driver = Self::default();
        {
            let mut state = driver.state.lock().unwrap();
            state.url = url.to_string();
            state.loaded = true;
        }
        Arc::new(driver)
    }

    pub fn set(&self, selector: &str, elements: Vec<FakeElement>) {
        self.state
            .lock()
            .unwrap()
            .elements
            .insert(selector.to_string(), elements);
    }

    /// Elements appear under `selector` once `delay` has passed.
    pub fn set_after(&self, selector: &str, delay: Duration, elements: Vec<FakeElement>) {
        self.state.lock().unwrap().scheduled.push((
            Instant::now() + delay,
            selector.to_string(),
            Some(elements),
        ));
    }

    /// Elements under `selector` are removed once `delay` has passed.
    pub fn remove_after(&self, selector: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .scheduled
            .push((Instant::now() + delay, selector.to_string(), None));
    }

    /// Every driver call on `selector` fails from now on.
    pub fn break_selector(&self, selector: &str) {
        self.state
            .lock()
            .unwrap()
            .broken
            .insert(selector.to_string());
    }

    /// Clicking `selector` moves the page to `url`.
    pub fn navigate_on_click(&self, selector: &str, url: &str) {
        self.state
            .lock()
            .unwrap()
            .links
            .insert(selector.to_string(), url.to_string());
    }

    pub fn set_url(&self, url: &str) {
        self.state.lock().unwrap().url = url.to_string();
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.state.lock().unwrap().loaded = loaded;
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().screenshots.clone()
    }

    fn record(&self, action: String) {
        self.state.lock().unwrap().actions.push(action);
    }

    // Applies due scheduled changes, then resolves `selector` (with an
    // optional `>> nth=i` suffix) to matching elements.
    fn resolve(&self, selector: &str) -> Result<Vec<FakeElement>> {
        let mut state = self.state.lock().unwrap();
        let now = Instant::now();
        let (due, pending): (Vec<_>, Vec<_>) = state
            .scheduled
            .drain(..)
            .partition(|(at, _, _)| *at <= now);
        state.scheduled = pending;
        for (_, key, change) in due {
            match change {
                Some(elements) => {
                    state.elements.insert(key, elements);
                }
                None => {
                    state.elements.remove(&key);
                }
            }
        }

        let (base, index) = split_nth(selector);
        if state.broken.contains(base) {
            return Err(Error::Assertion(format!("fake driver: broken selector {}", base)));
        }
        let all = state.elements.get(base).cloned().unwrap_or_default();
        Ok(match index {
            Some(i) => all.into_iter().skip(i).take(1).collect(),
            None => all,
        })
    }

    fn first(&self, selector: &str) -> Result<FakeElement> {
        self.resolve(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Assertion(format!("fake driver: no element for {}", selector)))
    }

    fn update_first(&self, selector: &str, f: impl FnOnce(&mut FakeElement)) -> Result<()> {
        self.first(selector)?;
        let (base, index) = split_nth(selector);
        let mut state = self.state.lock().unwrap();
        if let Some(el) = state
            .elements
            .get_mut(base)
            .and_then(|els| els.get_mut(index.unwrap_or(0)))
        {
            f(el);
        }
        Ok(())
    }
}

fn split_nth(selector: &str) -> (&str, Option<usize>) {
    match selector.rsplit_once(" >> nth=") {
        Some((base, n)) => (base, n.parse().ok()),
        None => (selector, None),
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn goto(&self, url: &str, _timeout: Duration) -> Result<()> {
        self.record(format!("goto {}", url));
        self.state.lock().unwrap().url = url.to_string();
        Ok(())
    }

    async fn wait_for_load(&self, timeout: Duration) -> Result<bool> {
        let loaded = self.state.lock().unwrap().loaded;
        if !loaded {
            tokio::time::sleep(timeout).await;
        }
        Ok(loaded)
    }

    fn url(&self) -> String {
        self.state.lock().unwrap().url.clone()
    }

    async fn title(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().title.clone())
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.resolve(selector)?.len())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        Ok(self
            .resolve(selector)?
            .first()
            .map(|el| el.visible)
            .unwrap_or(false))
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        Ok(self.first(selector)?.text)
    }

    async fn get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        Ok(self.first(selector)?.attributes.get(name).cloned())
    }

    async fn input_value(&self, selector: &str) -> Result<String> {
        Ok(self.first(selector)?.value)
    }

    async fn is_checked(&self, selector: &str) -> Result<bool> {
        Ok(self.first(selector)?.checked)
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool> {
        Ok(!self.first(selector)?.disabled)
    }

    async fn click(&self, selector: &str, kind: ClickKind) -> Result<()> {
        self.first(selector)?;
        self.record(format!("click({:?}) {}", kind, selector));
        let mut state = self.state.lock().unwrap();
        if let Some(url) = state.links.get(split_nth(selector).0).cloned() {
            state.url = url;
        }
        Ok(())
    }

    async fn hover(&self, selector: &str) -> Result<()> {
        self.first(selector)?;
        self.record(format!("hover {}", selector));
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        self.update_first(selector, |el| el.value = text.to_string())?;
        self.record(format!("fill {} = {}", selector, text));
        Ok(())
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        self.update_first(selector, |el| el.value.clear())?;
        self.record(format!("clear {}", selector));
        Ok(())
    }

    async fn set_checked(&self, selector: &str, checked: bool) -> Result<()> {
        self.update_first(selector, |el| el.checked = checked)?;
        self.record(format!("checked {} = {}", selector, checked));
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<Vec<String>> {
        self.update_first(selector, |el| el.value = value.to_string())?;
        self.record(format!("select {} = {}", selector, value));
        Ok(vec![value.to_string()])
    }

    async fn set_input_files(&self, selector: &str, files: &[PathBuf]) -> Result<()> {
        self.first(selector)?;
        self.record(format!("upload {} ({} files)", selector, files.len()));
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<()> {
        if self.resolve(selector)?.is_empty() {
            return Err(Error::ElementNotFound {
                selector: selector.to_string(),
                action: "scroll into view",
            });
        }
        self.record(format!("scroll {}", selector));
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        self.record(format!("press {}", key));
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, b"\x89PNG").await?;
        self.state.lock().unwrap().screenshots.push(path.to_path_buf());
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.record("reload".to_string());
        Ok(())
    }

    async fn go_back(&self) -> Result<()> {
        self.record("back".to_string());
        Ok(())
    }

    async fn go_forward(&self) -> Result<()> {
        self.record("forward".to_string());
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.record("close".to_string());
        Ok(())
    }
}
