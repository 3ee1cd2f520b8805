// HomePage - Landing page with the main navigation and featured products

use crate::base_page::BasePage;
use crate::error::Result;
use crate::locators::{LocatorMap, PageElement};

/// Elements of the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeElement {
    Logo,
    HomeNavItem,
    ProductsNavItem,
    SignupLoginNavItem,
    /// Every "View Product" link of the featured items
    ViewProductLink,
}

impl PageElement for HomeElement {
    const PAGE: &'static str = "HomePage";
    const ALL: &'static [Self] = &[
        HomeElement::Logo,
        HomeElement::HomeNavItem,
        HomeElement::ProductsNavItem,
        HomeElement::SignupLoginNavItem,
        HomeElement::ViewProductLink,
    ];
}

const LOCATORS: &[(HomeElement, &str)] = &[
    (
        HomeElement::Logo,
        r#"div[class*="logo"] img[alt="Website for automation practice"]"#,
    ),
    (HomeElement::HomeNavItem, r#"ul[class*="navbar-nav"] a[href="/"]"#),
    (
        HomeElement::ProductsNavItem,
        r#"ul[class*="navbar-nav"] a[href="/products"]"#,
    ),
    (HomeElement::SignupLoginNavItem, r#"a[href="/login"]"#),
    (HomeElement::ViewProductLink, r#"a[href*="/product_details/"]"#),
];

#[derive(Debug, Clone)]
pub struct HomePage {
    base: BasePage,
    locators: LocatorMap<HomeElement>,
}

impl HomePage {
    pub fn new(base: BasePage) -> Result<Self> {
        Ok(Self {
            base,
            locators: LocatorMap::new(LOCATORS)?,
        })
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub fn locator(&self, element: HomeElement) -> &'static str {
        self.locators.get(element)
    }

    pub async fn navigate_to_home_page(&self) -> Result<()> {
        self.base.navigate_to("/").await
    }

    /// Logo and both nav items are visible and the URL path is `/`.
    pub async fn is_home_page_visible(&self) -> bool {
        let elements_visible = self
            .base
            .are_elements_visible(&[
                self.locator(HomeElement::Logo),
                self.locator(HomeElement::HomeNavItem),
                self.locator(HomeElement::ProductsNavItem),
            ])
            .await;
        elements_visible && self.base.url_path_is("/")
    }

    pub async fn click_products_nav_item(&self) -> Result<()> {
        self.base
            .click_element(self.locator(HomeElement::ProductsNavItem))
            .await
    }

    /// Opens the details page of the `index`-th featured product.
    pub async fn click_view_product_page_link(&self, index: usize) -> Result<()> {
        self.base
            .click_nth(self.locator(HomeElement::ViewProductLink), index)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::PageDriver;
    use crate::testing::{FakeDriver, FakeElement, fake_base};

    fn render_home(driver: &FakeDriver, page: &HomePage) {
        for element in [
            HomeElement::Logo,
            HomeElement::HomeNavItem,
            HomeElement::ProductsNavItem,
        ] {
            driver.set(page.locator(element), vec![FakeElement::text("")]);
        }
        driver.set(
            page.locator(HomeElement::ViewProductLink),
            vec![
                FakeElement::text("View Product"),
                FakeElement::text("View Product"),
            ],
        );
    }

    #[test]
    fn test_locator_table_is_complete() {
        assert!(LocatorMap::new(LOCATORS).is_ok());
        assert_eq!(LOCATORS.len(), HomeElement::ALL.len());
    }

    #[tokio::test]
    async fn test_home_page_visible_requires_elements_and_root_path() {
        let driver = FakeDriver::new("about:blank");
        let page = HomePage::new(fake_base(driver.clone())).unwrap();
        render_home(&driver, &page);

        page.navigate_to_home_page().await.unwrap();
        assert_eq!(driver.url(), "https://shop.test/");
        assert!(page.is_home_page_visible().await);

        // Same markup on another route
        driver.set_url("https://shop.test/products");
        assert!(!page.is_home_page_visible().await);
    }

    #[tokio::test]
    async fn test_home_page_not_visible_without_logo() {
        let driver = FakeDriver::new("https://shop.test/");
        let page = HomePage::new(fake_base(driver.clone())).unwrap();
        render_home(&driver, &page);
        driver.set(page.locator(HomeElement::Logo), vec![FakeElement::hidden("")]);

        assert!(!page.is_home_page_visible().await);
    }

    #[tokio::test]
    async fn test_click_view_product_targets_index() {
        let driver = FakeDriver::new("https://shop.test/");
        let page = HomePage::new(fake_base(driver.clone())).unwrap();
        render_home(&driver, &page);

        page.click_view_product_page_link(1).await.unwrap();
        page.click_products_nav_item().await.unwrap();

        assert_eq!(
            driver.actions(),
            vec![
                r#"click(Single) a[href*="/product_details/"] >> nth=1"#.to_string(),
                r#"click(Single) ul[class*="navbar-nav"] a[href="/products"]"#.to_string(),
            ]
        );

        assert!(page.click_view_product_page_link(5).await.is_err());
    }
}
