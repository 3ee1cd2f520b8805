// ProductsPage - "All Products" listing with search

use crate::base_page::BasePage;
use crate::error::Result;
use crate::locators::{LocatorMap, PageElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductsElement {
    ProductsHeader,
    SearchInput,
    SearchButton,
    ProductsList,
    ProductTitles,
}

impl PageElement for ProductsElement {
    const PAGE: &'static str = "ProductsPage";
    const ALL: &'static [Self] = &[
        ProductsElement::ProductsHeader,
        ProductsElement::SearchInput,
        ProductsElement::SearchButton,
        ProductsElement::ProductsList,
        ProductsElement::ProductTitles,
    ];
}

const LOCATORS: &[(ProductsElement, &str)] = &[
    (ProductsElement::ProductsHeader, r#"//h2[text()="All Products"]"#),
    (ProductsElement::SearchInput, r#"input[id="search_product"]"#),
    (ProductsElement::SearchButton, r#"button[id="submit_search"]"#),
    (
        ProductsElement::ProductsList,
        ".features_items .product-image-wrapper",
    ),
    (
        ProductsElement::ProductTitles,
        r#"div.single-products div[class*="productinfo"] p"#,
    ),
];

#[derive(Debug, Clone)]
pub struct ProductsPage {
    base: BasePage,
    locators: LocatorMap<ProductsElement>,
}

impl ProductsPage {
    pub fn new(base: BasePage) -> Result<Self> {
        Ok(Self {
            base,
            locators: LocatorMap::new(LOCATORS)?,
        })
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub fn locator(&self, element: ProductsElement) -> &'static str {
        self.locators.get(element)
    }

    /// The "All Products" header is visible and the URL contains `/products`.
    pub async fn is_products_page_visible(&self) -> bool {
        let header_visible = self
            .base
            .is_element_visible(self.locator(ProductsElement::ProductsHeader))
            .await;
        header_visible && self.base.url_contains("/products")
    }

    /// Types `term` into the search box and submits it.
    ///
    /// Submitting navigates to the results URL; returns once that page loaded.
    pub async fn search_for_product(&self, term: &str) -> Result<()> {
        self.base
            .fill_input_field(self.locator(ProductsElement::SearchInput), term)
            .await?;
        let before = self.base.get_current_url();
        self.base
            .click_element(self.locator(ProductsElement::SearchButton))
            .await?;

        let settings = self.base.settings();
        // Repeating the current search keeps the URL
        if let Err(e) = self
            .base
            .wait_for_url_change(&before, settings.navigation_timeout)
            .await
        {
            tracing::warn!("Search for '{}' did not navigate: {}", term, e);
        }
        self.base.wait_for_page_load(settings.load_timeout).await;
        Ok(())
    }

    /// Titles of the listed products, in page order.
    pub async fn get_list_of_product_title(&self) -> Vec<String> {
        let titles = self
            .base
            .get_list_of_text(self.locator(ProductsElement::ProductTitles))
            .await;
        tracing::info!("Product Titles: {:?}", titles);
        titles
    }

    /// Number of product cards currently listed.
    pub async fn get_product_count(&self) -> Result<usize> {
        self.base
            .count_elements(self.locator(ProductsElement::ProductsList))
            .await
    }
}
