// Scenarios - The storefront user journeys
//
// Each scenario drives the page objects of one fixture and fails with
// `Error::Assertion` on the first expectation that does not hold.
// Checkpoints are logged at info.

use crate::error::{Error, Result};
use crate::fixture::Fixture;
use crate::{verify, verify_eq};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use regex::Regex;

pub const PRODUCT_SEARCH_SUITE: &str = "Product Search Tests - Test Case 1";
pub const ADD_TO_CART_SUITE: &str = "Add to Cart Tests - Test Case 2";

/// Terms expected to match at least one product each.
pub const SEARCH_TERMS: [&str; 3] = ["Men Tshirt", "Jeans", "Winter Top"];

/// Term expected to match nothing.
pub const ABSENT_PRODUCT: &str = "NonExistentProduct12345";

/// Quantity put into the cart by the add-to-cart journey.
pub const CART_QUANTITY: u32 = 4;

pub type ScenarioFn = for<'a> fn(&'a Fixture) -> BoxFuture<'a, Result<()>>;

/// One named test of a suite.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub suite: &'static str,
    pub name: &'static str,
    pub run: ScenarioFn,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("suite", &self.suite)
            .field("name", &self.name)
            .finish()
    }
}

impl Scenario {
    /// `<suite> > <name>`
    pub fn title(&self) -> String {
        format!("{} > {}", self.suite, self.name)
    }

    /// Filesystem-safe form of the title, used for artifact directories.
    pub fn slug(&self) -> String {
        let mut slug = String::new();
        for c in self.title().chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.trim_end_matches('-').to_string()
    }
}

/// Every scenario, in declaration order.
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            suite: PRODUCT_SEARCH_SUITE,
            name: "Verify user can search for products successfully (existent products)",
            run: run_search_existing_products,
        },
        Scenario {
            suite: PRODUCT_SEARCH_SUITE,
            name: "Verify search with no results (non-existent product)",
            run: run_search_absent_product,
        },
        Scenario {
            suite: ADD_TO_CART_SUITE,
            name: "Verify user can add a product to cart with a custom quantity",
            run: run_add_product_to_cart,
        },
    ]
}

fn run_search_existing_products(fx: &Fixture) -> BoxFuture<'_, Result<()>> {
    search_existing_products(fx).boxed()
}

fn run_search_absent_product(fx: &Fixture) -> BoxFuture<'_, Result<()>> {
    search_absent_product(fx).boxed()
}

fn run_add_product_to_cart(fx: &Fixture) -> BoxFuture<'_, Result<()>> {
    add_product_to_cart(fx).boxed()
}

/// Scenarios whose title matches `pattern` (a regular expression).
pub fn filter(scenarios: Vec<Scenario>, pattern: &str) -> Result<Vec<Scenario>> {
    let re = Regex::new(pattern).map_err(|e| Error::InvalidConfig {
        key: "grep".to_string(),
        message: e.to_string(),
    })?;
    Ok(scenarios
        .into_iter()
        .filter(|scenario| re.is_match(&scenario.title()))
        .collect())
}

// Home page, then the products listing through the navbar.
async fn open_products_page(fx: &Fixture) -> Result<()> {
    let home = fx.home_page()?;
    let products = fx.products_page()?;

    home.navigate_to_home_page().await?;
    verify!(home.is_home_page_visible().await, "home page is not visible");
    tracing::info!("Navigated to home page");

    home.click_products_nav_item().await?;
    verify!(
        products.is_products_page_visible().await,
        "products page is not visible"
    );
    tracing::info!("Clicked on \"Products\" from navbar");
    Ok(())
}

/// Every search term yields results, and every result title contains the
/// term (case-insensitive).
pub async fn search_existing_products(fx: &Fixture) -> Result<()> {
    open_products_page(fx).await?;
    let products = fx.products_page()?;

    for term in SEARCH_TERMS {
        products.search_for_product(term).await?;
        let titles = products.get_list_of_product_title().await;
        tracing::info!("Searched for product: {}", term);

        verify!(!titles.is_empty(), "no products found for '{}'", term);
        let needle = term.to_lowercase();
        for title in &titles {
            verify!(
                title.to_lowercase().contains(&needle),
                "product '{}' does not match search term '{}'",
                title,
                term
            );
        }
        tracing::info!(
            "Verified that all displayed products contain the search term: {}",
            term
        );
    }
    Ok(())
}

/// Searching for a product that does not exist lists nothing.
pub async fn search_absent_product(fx: &Fixture) -> Result<()> {
    open_products_page(fx).await?;
    let products = fx.products_page()?;

    products.search_for_product(ABSENT_PRODUCT).await?;
    tracing::info!("Searched for a non-existent product");

    let titles = products.get_list_of_product_title().await;
    verify!(
        titles.is_empty(),
        "expected no products for '{}', found {:?}",
        ABSENT_PRODUCT,
        titles
    );
    tracing::info!("Verified that no products are displayed for non-existent product search");
    Ok(())
}

/// A product added with a custom quantity shows up as the single cart line
/// with that quantity.
pub async fn add_product_to_cart(fx: &Fixture) -> Result<()> {
    let home = fx.home_page()?;
    let details = fx.product_details_page()?;
    let cart = fx.cart_page()?;

    home.navigate_to_home_page().await?;
    verify!(home.is_home_page_visible().await, "home page is not visible");
    tracing::info!("Navigated to home page");

    home.click_view_product_page_link(0).await?;
    tracing::info!("Clicked \"View Product\" for the first product on home page");

    verify!(
        details.is_product_details_page_visible().await,
        "product details page is not visible"
    );
    verify!(
        details.are_product_details_available().await,
        "product details are incomplete"
    );
    tracing::info!("Verified that product details page and product details are visible");

    details.set_product_quantity(CART_QUANTITY).await?;
    verify_eq!(
        details.get_product_quantity().await?,
        CART_QUANTITY.to_string(),
        "quantity input"
    );
    tracing::info!("Increased product quantity to {}", CART_QUANTITY);

    details.click_add_to_cart_button().await?;
    verify!(details.is_cart_modal_visible().await, "cart modal is not visible");
    tracing::info!("Clicked \"Add to cart\" button");

    details.click_view_cart_link().await?;
    verify!(cart.is_cart_page_visible().await, "cart page is not visible");
    tracing::info!("Clicked \"View Cart\" link in the modal");

    verify_eq!(cart.get_product_count_in_cart().await?, 1, "cart lines");
    let quantities = cart.get_product_quantities_in_cart().await;
    verify_eq!(
        quantities.first().cloned(),
        Some(CART_QUANTITY.to_string()),
        "quantity in cart"
    );
    tracing::info!("Verified that product is displayed in cart page with exact quantity");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_page::FacadeSettings;
    use crate::testing::{FakeDriver, FakeElement};
    use std::sync::Arc;

    #[test]
    fn test_catalog() {
        let scenarios = all();
        assert_eq!(scenarios.len(), 3);
        assert_eq!(
            scenarios
                .iter()
                .filter(|s| s.suite == PRODUCT_SEARCH_SUITE)
                .count(),
            2
        );
    }

    #[test]
    fn test_slug() {
        let scenarios = all();
        assert_eq!(
            scenarios[1].slug(),
            "product-search-tests-test-case-1-verify-search-with-no-results-non-existent-product"
        );
        for scenario in &scenarios {
            assert!(!scenario.slug().ends_with('-'));
        }
    }

    #[test]
    fn test_filter() {
        let cart = filter(all(), "(?i)add to cart").unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].suite, ADD_TO_CART_SUITE);

        assert_eq!(filter(all(), "Test Case 1").unwrap().len(), 2);
        assert!(filter(all(), "nothing matches this").unwrap().is_empty());
        assert!(filter(all(), "(unclosed").is_err());
    }

    // A scenario against a page that never renders fails with an assertion,
    // not a driver error.
    #[tokio::test]
    async fn test_scenario_fails_on_invisible_home_page() {
        let driver = FakeDriver::new("about:blank");
        let settings = FacadeSettings::default()
            .with_base_url(url::Url::parse("https://shop.test").unwrap())
            .with_visibility_timeout(std::time::Duration::from_millis(50));
        let fixture = Fixture::new(driver, Arc::new(settings));

        let err = add_product_to_cart(&fixture).await.unwrap_err();
        assert!(err.is_assertion());
        assert_eq!(err.to_string(), "Assertion failed: home page is not visible");
    }

    #[tokio::test]
    async fn test_absent_search_fails_when_results_are_listed() {
        let driver = FakeDriver::new("about:blank");
        let settings = FacadeSettings::default()
            .with_base_url(url::Url::parse("https://shop.test").unwrap());
        let fixture = Fixture::new(driver.clone(), Arc::new(settings));

        let home = fixture.home_page().unwrap();
        let products = fixture.products_page().unwrap();
        for element in [
            crate::pages::HomeElement::Logo,
            crate::pages::HomeElement::HomeNavItem,
            crate::pages::HomeElement::ProductsNavItem,
        ] {
            driver.set(home.locator(element), vec![FakeElement::text("")]);
        }
        for element in [
            crate::pages::ProductsElement::ProductsHeader,
            crate::pages::ProductsElement::SearchButton,
        ] {
            driver.set(products.locator(element), vec![FakeElement::text("")]);
        }
        driver.set(
            products.locator(crate::pages::ProductsElement::SearchInput),
            vec![FakeElement::input("")],
        );
        driver.set(
            products.locator(crate::pages::ProductsElement::ProductTitles),
            vec![FakeElement::text("Blue Top")],
        );

        driver.navigate_on_click(
            home.locator(crate::pages::HomeElement::ProductsNavItem),
            "https://shop.test/products",
        );
        driver.navigate_on_click(
            products.locator(crate::pages::ProductsElement::SearchButton),
            "https://shop.test/products?search=NonExistentProduct12345",
        );

        let err = search_absent_product(&fixture).await.unwrap_err();
        assert!(err.is_assertion(), "{}", err);
        assert!(err.to_string().contains("Blue Top"));
    }
}
