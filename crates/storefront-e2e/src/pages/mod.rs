// Pages - Page objects of the storefront
//
// Each page object holds a `BasePage` bound to the test's page handle and a
// validated `LocatorMap` of its element enum. Predicates (`is_*_visible`)
// never fail: every check degrades to `false`.

pub mod cart;
pub mod home;
pub mod product_details;
pub mod products;

pub use cart::{CartElement, CartPage};
pub use home::{HomeElement, HomePage};
pub use product_details::{ProductDetailsElement, ProductDetails, ProductDetailsPage};
pub use products::{ProductsElement, ProductsPage};
