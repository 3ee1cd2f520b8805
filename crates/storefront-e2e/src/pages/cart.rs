// CartPage - Shopping cart table

use crate::base_page::BasePage;
use crate::error::Result;
use crate::locators::{LocatorMap, PageElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartElement {
    CartInfoTable,
    ProceedToCheckout,
    /// One row per product line
    ProductInCartTable,
    ProductTitleInCartTable,
    ProductPriceInCartTable,
    ProductQuantityInCartTable,
    ProductTotalPriceInCartTable,
    ProductDeleteFromCartTable,
}

impl PageElement for CartElement {
    const PAGE: &'static str = "CartPage";
    const ALL: &'static [Self] = &[
        CartElement::CartInfoTable,
        CartElement::ProceedToCheckout,
        CartElement::ProductInCartTable,
        CartElement::ProductTitleInCartTable,
        CartElement::ProductPriceInCartTable,
        CartElement::ProductQuantityInCartTable,
        CartElement::ProductTotalPriceInCartTable,
        CartElement::ProductDeleteFromCartTable,
    ];
}

const LOCATORS: &[(CartElement, &str)] = &[
    (CartElement::CartInfoTable, "table#cart_info_table"),
    (CartElement::ProceedToCheckout, "#cart_items a.check_out"),
    (
        CartElement::ProductInCartTable,
        r#"#cart_info_table tr[id*="product"]"#,
    ),
    (
        CartElement::ProductTitleInCartTable,
        "#cart_info_table td.cart_description h4 a",
    ),
    (
        CartElement::ProductPriceInCartTable,
        "#cart_info_table td.cart_price p",
    ),
    (
        CartElement::ProductQuantityInCartTable,
        "#cart_info_table td.cart_quantity button",
    ),
    (
        CartElement::ProductTotalPriceInCartTable,
        "#cart_info_table td.cart_total p",
    ),
    (
        CartElement::ProductDeleteFromCartTable,
        "#cart_info_table td a.cart_quantity_delete",
    ),
];

#[derive(Debug, Clone)]
pub struct CartPage {
    base: BasePage,
    locators: LocatorMap<CartElement>,
}

impl CartPage {
    pub fn new(base: BasePage) -> Result<Self> {
        Ok(Self {
            base,
            locators: LocatorMap::new(LOCATORS)?,
        })
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub fn locator(&self, element: CartElement) -> &'static str {
        self.locators.get(element)
    }

    /// The cart table is visible and the URL contains `/view_cart`.
    pub async fn is_cart_page_visible(&self) -> bool {
        let table_visible = self
            .base
            .is_element_visible(self.locator(CartElement::CartInfoTable))
            .await;
        table_visible && self.base.url_contains("/view_cart")
    }

    /// Number of product lines in the cart.
    pub async fn get_product_count_in_cart(&self) -> Result<usize> {
        self.base
            .count_elements(self.locator(CartElement::ProductInCartTable))
            .await
    }

    pub async fn get_product_titles_in_cart(&self) -> Vec<String> {
        self.base
            .get_list_of_text(self.locator(CartElement::ProductTitleInCartTable))
            .await
    }

    pub async fn get_product_prices_in_cart(&self) -> Vec<String> {
        self.base
            .get_list_of_text(self.locator(CartElement::ProductPriceInCartTable))
            .await
    }

    pub async fn get_product_quantities_in_cart(&self) -> Vec<String> {
        self.base
            .get_list_of_text(self.locator(CartElement::ProductQuantityInCartTable))
            .await
    }

    pub async fn get_product_total_prices_in_cart(&self) -> Vec<String> {
        self.base
            .get_list_of_text(self.locator(CartElement::ProductTotalPriceInCartTable))
            .await
    }

    /// Removes the `index`-th product line.
    pub async fn delete_product_from_cart(&self, index: usize) -> Result<()> {
        self.base
            .click_nth(self.locator(CartElement::ProductDeleteFromCartTable), index)
            .await
    }
}
