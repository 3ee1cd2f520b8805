// ProductDetailsPage - Single product view with quantity and add-to-cart
//
// The add-to-cart action opens a modal offering "View Cart" and
// "Continue Shopping".

use crate::base_page::BasePage;
use crate::error::Result;
use crate::locators::{LocatorMap, PageElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductDetailsElement {
    ProductTitle,
    ProductPrice,
    ProductCategory,
    ProductAvailability,
    ProductCondition,
    ProductBrand,
    ProductQuantityInput,
    AddToCartButton,
    CartModal,
    ViewCartLink,
    ContinueShoppingButton,
}

impl PageElement for ProductDetailsElement {
    const PAGE: &'static str = "ProductDetailsPage";
    const ALL: &'static [Self] = &[
        ProductDetailsElement::ProductTitle,
        ProductDetailsElement::ProductPrice,
        ProductDetailsElement::ProductCategory,
        ProductDetailsElement::ProductAvailability,
        ProductDetailsElement::ProductCondition,
        ProductDetailsElement::ProductBrand,
        ProductDetailsElement::ProductQuantityInput,
        ProductDetailsElement::AddToCartButton,
        ProductDetailsElement::CartModal,
        ProductDetailsElement::ViewCartLink,
        ProductDetailsElement::ContinueShoppingButton,
    ];
}

const LOCATORS: &[(ProductDetailsElement, &str)] = &[
    (
        ProductDetailsElement::ProductTitle,
        "div.product-details div.product-information h2",
    ),
    (
        ProductDetailsElement::ProductPrice,
        "div.product-details div.product-information span span",
    ),
    (
        ProductDetailsElement::ProductCategory,
        r#"div.product-details div.product-information p:has-text("Category:")"#,
    ),
    (
        ProductDetailsElement::ProductAvailability,
        r#"div.product-details div.product-information p:has-text("Availability")"#,
    ),
    (
        ProductDetailsElement::ProductCondition,
        r#"div.product-details div.product-information p:has-text("Condition")"#,
    ),
    (
        ProductDetailsElement::ProductBrand,
        r#"div.product-details div.product-information p:has-text("Brand")"#,
    ),
    (
        ProductDetailsElement::ProductQuantityInput,
        "div.product-details input#quantity",
    ),
    (
        ProductDetailsElement::AddToCartButton,
        r#"div.product-details button[class*="cart"]"#,
    ),
    (
        ProductDetailsElement::CartModal,
        "div#cartModal div.modal-content",
    ),
    (
        ProductDetailsElement::ViewCartLink,
        r#"div#cartModal a[href="/view_cart"]"#,
    ),
    (
        ProductDetailsElement::ContinueShoppingButton,
        r#"div#cartModal button:has-text("Continue Shopping")"#,
    ),
];

/// The six descriptive fields of a product, as rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDetails {
    pub title: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub availability: Option<String>,
    pub condition: Option<String>,
    pub brand: Option<String>,
}

impl ProductDetails {
    /// Every field is present and non-blank.
    pub fn is_complete(&self) -> bool {
        [
            &self.title,
            &self.price,
            &self.category,
            &self.availability,
            &self.condition,
            &self.brand,
        ]
        .iter()
        .all(|field| matches!(field, Some(value) if !value.trim().is_empty()))
    }
}

#[derive(Debug, Clone)]
pub struct ProductDetailsPage {
    base: BasePage,
    locators: LocatorMap<ProductDetailsElement>,
}

impl ProductDetailsPage {
    pub fn new(base: BasePage) -> Result<Self> {
        Ok(Self {
            base,
            locators: LocatorMap::new(LOCATORS)?,
        })
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub fn locator(&self, element: ProductDetailsElement) -> &'static str {
        self.locators.get(element)
    }

    /// Title and add-to-cart button are visible and the URL contains
    /// `/product_details/`.
    pub async fn is_product_details_page_visible(&self) -> bool {
        let elements_visible = self
            .base
            .are_elements_visible(&[
                self.locator(ProductDetailsElement::ProductTitle),
                self.locator(ProductDetailsElement::AddToCartButton),
            ])
            .await;
        elements_visible && self.base.url_contains("/product_details/")
    }

    async fn text_of(&self, element: ProductDetailsElement) -> Option<String> {
        self.base.get_text(self.locator(element)).await
    }

    pub async fn get_product_title(&self) -> Option<String> {
        self.text_of(ProductDetailsElement::ProductTitle).await
    }

    pub async fn get_product_price(&self) -> Option<String> {
        self.text_of(ProductDetailsElement::ProductPrice).await
    }

    pub async fn get_product_category(&self) -> Option<String> {
        self.text_of(ProductDetailsElement::ProductCategory).await
    }

    pub async fn get_product_availability(&self) -> Option<String> {
        self.text_of(ProductDetailsElement::ProductAvailability)
            .await
    }

    pub async fn get_product_condition(&self) -> Option<String> {
        self.text_of(ProductDetailsElement::ProductCondition).await
    }

    pub async fn get_product_brand(&self) -> Option<String> {
        self.text_of(ProductDetailsElement::ProductBrand).await
    }

    /// Reads the six descriptive fields concurrently.
    pub async fn get_product_details(&self) -> ProductDetails {
        let (title, price, category, availability, condition, brand) = tokio::join!(
            self.get_product_title(),
            self.get_product_price(),
            self.get_product_category(),
            self.get_product_availability(),
            self.get_product_condition(),
            self.get_product_brand(),
        );
        ProductDetails {
            title,
            price,
            category,
            availability,
            condition,
            brand,
        }
    }

    /// True only if all six fields are present and non-blank.
    pub async fn are_product_details_available(&self) -> bool {
        let details = self.get_product_details().await;
        if !details.is_complete() {
            tracing::debug!("Incomplete product details: {:?}", details);
            return false;
        }
        true
    }

    /// Replaces the quantity input's value with `quantity`.
    pub async fn set_product_quantity(&self, quantity: u32) -> Result<()> {
        let input = self.locator(ProductDetailsElement::ProductQuantityInput);
        self.base.clear_field(input).await?;
        self.base
            .fill_input_field(input, &quantity.to_string())
            .await
    }

    pub async fn get_product_quantity(&self) -> Result<String> {
        self.base
            .get_input_value(self.locator(ProductDetailsElement::ProductQuantityInput))
            .await
    }

    pub async fn click_add_to_cart_button(&self) -> Result<()> {
        self.base
            .click_element(self.locator(ProductDetailsElement::AddToCartButton))
            .await
    }

    pub async fn is_cart_modal_visible(&self) -> bool {
        self.base
            .is_element_visible(self.locator(ProductDetailsElement::CartModal))
            .await
    }

    pub async fn click_view_cart_link(&self) -> Result<()> {
        self.base
            .click_element(self.locator(ProductDetailsElement::ViewCartLink))
            .await
    }

    pub async fn click_continue_shopping_button(&self) -> Result<()> {
        self.base
            .click_element(self.locator(ProductDetailsElement::ContinueShoppingButton))
            .await
    }
}
