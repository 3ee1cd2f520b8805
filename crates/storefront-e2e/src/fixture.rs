// Fixture - Per-test page objects bound to one page handle
//
// Page objects are built lazily on first access and share the fixture's
// page handle and facade settings. A fixture belongs to exactly one test
// attempt; `close` tears down the browser context behind it.

use crate::base_page::{BasePage, FacadeSettings};
use crate::driver::SharedDriver;
use crate::error::Result;
use crate::pages::{CartPage, HomePage, ProductDetailsPage, ProductsPage};
use playwright_rs::BrowserContext;
use std::sync::{Arc, OnceLock};

pub struct Fixture {
    base: BasePage,
    context: Option<BrowserContext>,
    home: OnceLock<HomePage>,
    products: OnceLock<ProductsPage>,
    product_details: OnceLock<ProductDetailsPage>,
    cart: OnceLock<CartPage>,
}

impl std::fmt::Debug for Fixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fixture")
            .field("base", &self.base)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

impl Fixture {
    /// Fixture over an existing page handle.
    pub fn new(driver: SharedDriver, settings: Arc<FacadeSettings>) -> Self {
        Self {
            base: BasePage::new(driver, settings),
            context: None,
            home: OnceLock::new(),
            products: OnceLock::new(),
            product_details: OnceLock::new(),
            cart: OnceLock::new(),
        }
    }

    /// Closes `context` (and with it the page) when the fixture is closed.
    pub fn with_context(mut self, context: BrowserContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Facade over the fixture's page, for steps outside any page object.
    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub fn home_page(&self) -> Result<&HomePage> {
        lazy(&self.home, || HomePage::new(self.base.clone()))
    }

    pub fn products_page(&self) -> Result<&ProductsPage> {
        lazy(&self.products, || ProductsPage::new(self.base.clone()))
    }

    pub fn product_details_page(&self) -> Result<&ProductDetailsPage> {
        lazy(&self.product_details, || {
            ProductDetailsPage::new(self.base.clone())
        })
    }

    pub fn cart_page(&self) -> Result<&CartPage> {
        lazy(&self.cart, || CartPage::new(self.base.clone()))
    }

    /// Closes the browser context, or just the page for bare fixtures.
    pub async fn close(self) -> Result<()> {
        match self.context {
            Some(context) => context.close().await?,
            None => self.base.close().await?,
        }
        Ok(())
    }
}

fn lazy<P>(cell: &OnceLock<P>, build: impl FnOnce() -> Result<P>) -> Result<&P> {
    if let Some(page) = cell.get() {
        return Ok(page);
    }
    let page = build()?;
    Ok(cell.get_or_init(|| page))
}
