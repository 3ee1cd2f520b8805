//! storefront-e2e: Page-object end-to-end suite for the automationexercise.com storefront
//!
//! The suite drives a real browser through Playwright. Page objects
//! ([`HomePage`], [`ProductsPage`], [`ProductDetailsPage`], [`CartPage`])
//! wrap a shared [`BasePage`] facade, which turns selectors into waits,
//! reads and actions. A [`Fixture`] hands every test attempt its own page
//! objects over a fresh browser context, and the [`Runner`] executes the
//! [`scenarios`] with retries, per-test timeouts and failure artifacts.
//!
//! # Examples
//!
//! ## Running the suite
//!
//! ```ignore
//! use storefront_e2e::{BrowserSession, Runner, SuiteConfig, scenarios};
//!
//! #[tokio::main]
//! async fn main() -> storefront_e2e::Result<()> {
//!     storefront_e2e::logging::init();
//!
//!     // Reads .env.<TEST_ENV> from the project root
//!     let config = SuiteConfig::load(std::path::Path::new("."))?;
//!     let session = BrowserSession::launch(&config).await?;
//!
//!     let report = Runner::new(&session, &config).run(&scenarios::all()).await;
//!     report.write(&config.output_dir).await?;
//!
//!     session.close().await?;
//!     assert!(report.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Driving page objects directly
//!
//! ```ignore
//! use storefront_e2e::{BrowserSession, FixtureFactory, SuiteConfig};
//!
//! let fixture = session.new_fixture(None).await?;
//! let home = fixture.home_page()?;
//! home.navigate_to_home_page().await?;
//! assert!(home.is_home_page_visible().await);
//!
//! home.click_products_nav_item().await?;
//! let products = fixture.products_page()?;
//! products.search_for_product("Jeans").await?;
//! println!("{:?}", products.get_list_of_product_title().await);
//! fixture.close().await?;
//! ```

pub mod base_page;
pub mod config;
pub mod devices;
pub mod driver;
mod error;
pub mod fixture;
pub mod locators;
pub mod logging;
#[cfg(feature = "mock-site")]
pub mod mock_site;
pub mod pages;
pub mod runner;
pub mod scenarios;
pub mod session;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};

// Facade and page objects
pub use base_page::{BasePage, ElementState, FacadeSettings};
pub use pages::{CartPage, HomePage, ProductDetails, ProductDetailsPage, ProductsPage};

// Per-test fixtures and the browser behind them
pub use driver::{PageDriver, SharedDriver};
pub use fixture::Fixture;
pub use session::{BrowserSession, FixtureFactory};

// Configuration and execution
pub use config::{BrowserKind, SuiteConfig};
pub use devices::{DeviceProfile, Engine};
pub use runner::{RunReport, Runner, TestStatus};
pub use scenarios::Scenario;
