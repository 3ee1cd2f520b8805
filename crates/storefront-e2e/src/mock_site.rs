// Mock Site - Local rendition of the storefront pages
//
// Serves the subset of automationexercise.com the page objects touch, with
// the same markup hooks (ids, classes, hrefs), so the journeys can run
// offline and deterministically:
//
// - `/`                       logo, navbar, product cards
// - `/products?search=<term>` "All Products" listing, case-insensitive search
// - `/product_details/{id}`   product information, quantity, add-to-cart modal
// - `/view_cart`              cart table
//
// The cart lives in a `cart` cookie written by the details page script
// (`<id>:<qty>|<id>:<qty>`), so every browser context starts empty.

use axum::{
    Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::fmt::Write;

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    /// Price in rupees
    pub price: u32,
    pub category: &'static str,
    pub availability: &'static str,
    pub condition: &'static str,
    pub brand: &'static str,
}

const fn product(
    id: u32,
    name: &'static str,
    price: u32,
    category: &'static str,
    brand: &'static str,
) -> Product {
    Product {
        id,
        name,
        price,
        category,
        availability: "In Stock",
        condition: "New",
        brand,
    }
}

const CATALOG: &[Product] = &[
    product(1, "Blue Top", 500, "Women > Tops", "Polo"),
    product(2, "Men Tshirt", 400, "Men > Tshirts", "H&M"),
    product(3, "Sleeveless Dress", 1000, "Women > Dress", "Madame"),
    product(4, "Stylish Dress", 1500, "Women > Dress", "Madame"),
    product(5, "Winter Top", 600, "Women > Tops", "Mast & Harbour"),
    product(6, "Soft Stretch Jeans", 799, "Men > Jeans", "Levis"),
    product(7, "Regular Fit Straight Jeans", 1200, "Men > Jeans", "Levis"),
    product(8, "Grunt Blue Slim Fit Jeans", 1400, "Women > Jeans", "Allen Solly Junior"),
    product(9, "Pure Cotton V-Neck T-Shirt", 1299, "Men > Tshirts", "H&M"),
];

pub fn catalog() -> &'static [Product] {
    CATALOG
}

pub fn find_product(id: u32) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Products whose name contains `term`, ignoring case. An empty term lists
/// everything.
pub fn search(term: &str) -> Vec<&'static Product> {
    let needle = term.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Router serving the storefront pages.
pub fn router() -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/products", get(products_page))
        .route("/product_details/{id}", get(product_details_page))
        .route("/view_cart", get(cart_page))
        .route("/login", get(login_page))
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title>
<style>
  .modal {{ display: none; }}
  .product-image-wrapper {{ display: inline-block; width: 220px; margin: 8px; }}
</style>
</head>
<body>
<header id="header">
  <div class="logo pull-left">
    <a href="/"><img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" width="140" height="40" alt="Website for automation practice"></a>
  </div>
  <ul class="nav navbar-nav">
    <li><a href="/">Home</a></li>
    <li><a href="/products">Products</a></li>
    <li><a href="/view_cart">Cart</a></li>
    <li><a href="/login">Signup / Login</a></li>
  </ul>
</header>
{body}
</body>
</html>"#
    ))
}

fn product_card(p: &Product) -> String {
    format!(
        r#"<div class="product-image-wrapper">
  <div class="single-products">
    <div class="productinfo text-center">
      <h2>Rs. {price}</h2>
      <p>{name}</p>
    </div>
  </div>
  <div class="choose"><a href="/product_details/{id}">View Product</a></div>
</div>
"#,
        price = p.price,
        name = p.name,
        id = p.id
    )
}

async fn home_page() -> Html<String> {
    let cards: String = CATALOG.iter().map(product_card).collect();
    layout(
        "Automation Exercise",
        &format!(
            r#"<section><div class="features_items"><h2 class="title text-center">Features Items</h2>
{cards}</div></section>"#
        ),
    )
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    search: Option<String>,
}

async fn products_page(Query(query): Query<SearchQuery>) -> Html<String> {
    let (heading, products) = match query.search.as_deref() {
        Some(term) => ("Searched Products", search(term)),
        None => ("All Products", CATALOG.iter().collect()),
    };
    let cards: String = products.into_iter().map(product_card).collect();
    layout(
        "Automation Exercise - All Products",
        &format!(
            r#"<section id="advertisement"><h2>All Products</h2></section>
<section>
  <input type="text" id="search_product" name="search" placeholder="Search Product">
  <button type="button" id="submit_search" onclick="submitSearch()">Search</button>
  <div class="features_items"><h2 class="title text-center">{heading}</h2>
{cards}</div>
</section>
<script>
function submitSearch() {{
  var term = document.getElementById('search_product').value;
  window.location.href = '/products?search=' + encodeURIComponent(term);
}}
</script>"#
        ),
    )
}

async fn product_details_page(Path(id): Path<u32>) -> Response {
    let Some(p) = find_product(id) else {
        return (StatusCode::NOT_FOUND, "Product not found").into_response();
    };
    layout(
        &format!("Automation Exercise - Product Details - {}", p.name),
        &format!(
            r#"<section><div class="product-details">
  <div class="product-information">
    <h2>{name}</h2>
    <p>Category: {category}</p>
    <span>
      <span>Rs. {price}</span>
      <label>Quantity:</label>
      <input type="number" id="quantity" name="quantity" value="1" min="1">
      <button type="button" class="btn btn-default cart" onclick="addToCart({id})">Add to cart</button>
    </span>
    <p><b>Availability:</b> {availability}</p>
    <p><b>Condition:</b> {condition}</p>
    <p><b>Brand:</b> {brand}</p>
  </div>
</div></section>
<div class="modal" id="cartModal">
  <div class="modal-content">
    <h4>Added!</h4>
    <p>Your product has been added to cart.</p>
    <p><a href="/view_cart"><u>View Cart</u></a></p>
    <button class="btn btn-success close-modal" onclick="closeModal()">Continue Shopping</button>
  </div>
</div>
<script>
{CART_SCRIPT}
function addToCart(id) {{
  var qty = parseInt(document.getElementById('quantity').value, 10) || 1;
  var items = readCart();
  var line = items.find(function (item) {{ return item[0] === id; }});
  if (line) {{ line[1] += qty; }} else {{ items.push([id, qty]); }}
  writeCart(items);
  document.getElementById('cartModal').style.display = 'block';
}}
function closeModal() {{
  document.getElementById('cartModal').style.display = 'none';
}}
</script>"#,
            name = p.name,
            category = p.category,
            price = p.price,
            id = p.id,
            availability = p.availability,
            condition = p.condition,
            brand = p.brand,
        ),
    )
    .into_response()
}

const CART_SCRIPT: &str = r#"function readCart() {
  var match = document.cookie.match(/(?:^|; )cart=([^;]*)/);
  if (!match || !match[1]) { return []; }
  return match[1].split('|').map(function (pair) {
    var parts = pair.split(':');
    return [parseInt(parts[0], 10), parseInt(parts[1], 10)];
  });
}
function writeCart(items) {
  var value = items.map(function (item) { return item[0] + ':' + item[1]; }).join('|');
  document.cookie = 'cart=' + value + '; path=/';
}"#;

/// Cart lines (`(product id, quantity)`) from a `Cookie` header value, in
/// the order they were added. Malformed or unknown entries are skipped.
pub fn parse_cart_cookie(cookie_header: &str) -> Vec<(u32, u32)> {
    let Some(value) = cookie_header
        .split(';')
        .find_map(|pair| pair.trim().strip_prefix("cart="))
    else {
        return Vec::new();
    };
    value
        .split('|')
        .filter_map(|entry| {
            let (id, qty) = entry.split_once(':')?;
            let id = id.trim().parse().ok()?;
            let qty = qty.trim().parse().ok()?;
            (qty > 0 && find_product(id).is_some()).then_some((id, qty))
        })
        .collect()
}

fn write_cart_row(rows: &mut String, p: &Product, qty: u32) {
    // Widened so any cookie quantity renders
    let total = u64::from(p.price).saturating_mul(u64::from(qty));
    let _ = write!(
        rows,
        r##"<tr id="product-{id}">
  <td class="cart_description"><h4><a href="/product_details/{id}">{name}</a></h4><p>{category}</p></td>
  <td class="cart_price"><p>Rs. {price}</p></td>
  <td class="cart_quantity"><button class="disabled">{qty}</button></td>
  <td class="cart_total"><p class="cart_total_price">Rs. {total}</p></td>
  <td class="cart_delete"><a class="cart_quantity_delete" href="#" onclick="removeLine({id}); return false;">x</a></td>
</tr>
"##,
        id = p.id,
        name = p.name,
        category = p.category,
        price = p.price,
    );
}

async fn cart_page(headers: HeaderMap) -> Html<String> {
    let lines = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(parse_cart_cookie)
        .unwrap_or_default();

    let mut rows = String::new();
    for (id, qty) in &lines {
        if let Some(p) = find_product(*id) {
            write_cart_row(&mut rows, p, *qty);
        }
    }
    let empty = if lines.is_empty() {
        r#"<p id="empty_cart" class="text-center"><b>Cart is empty!</b></p>"#
    } else {
        ""
    };

    layout(
        "Automation Exercise - Checkout",
        &format!(
            r#"<section id="cart_items">
  <table class="table table-condensed" id="cart_info_table">
    <thead><tr><td>Item</td><td>Price</td><td>Quantity</td><td>Total</td><td></td></tr></thead>
    <tbody>
{rows}    </tbody>
  </table>
  {empty}
  <a class="btn btn-default check_out">Proceed To Checkout</a>
</section>
<script>
{CART_SCRIPT}
function removeLine(id) {{
  writeCart(readCart().filter(function (item) {{ return item[0] !== id; }}));
  window.location.reload();
}}
</script>"#
        ),
    )
}

async fn login_page() -> Html<String> {
    layout(
        "Automation Exercise - Signup / Login",
        r#"<section id="form"><h2>Login to your account</h2></section>"#,
    )
}
