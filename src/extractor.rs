use serde_json::Value;

use crate::config::PRICE_SCALE;
use crate::types::{Cell, ProductRow};

/// Flatten one raw listing into an output row stamped with `extraction_date`.
pub fn extract_row(item: &Value, extraction_date: &str) -> ProductRow {
    let field = |key: &str| Cell::from_json(item.get(key));

    let first_tier = item
        .get("tier_variations")
        .and_then(|t| t.as_array())
        .and_then(|a| a.first());
    let variation_type = first_tier
        .map(|t| Cell::from_json(t.get("name")))
        .unwrap_or(Cell::Null);
    let variation = first_tier
        .map(|t| Cell::from_json(t.get("options")))
        .unwrap_or(Cell::Null);

    let discount = match item.get("discount") {
        None | Some(Value::Null) => Cell::Integer(0),
        Some(d) => Cell::from_json(Some(d)),
    };

    let rating_star = Cell::from_json(item.get("item_rating").and_then(|r| r.get("rating_star")));

    ProductRow {
        product_name: field("name"),
        current_stock: field("stock"),
        shop_name: field("shop_name"),
        shop_id: field("shopid"),
        brand: field("brand"),
        unique_item_id: field("itemid"),
        sold_per_month: field("sold"),
        historical_sold: field("historical_sold"),
        liked_count: field("liked_count"),
        variation_type,
        variation,
        current_price: scaled_price(item.get("price")),
        min_price: scaled_price(item.get("price_min")),
        max_price: scaled_price(item.get("price_max")),
        lowest_price_guarantee: field("has_lowest_price_guarantee"),
        current_discount_percentage: discount,
        rating_star,
        shopee_verified: field("shopee_verified"),
        official_shop: field("is_official_shop"),
        cc_installment: field("is_cc_installment_payment_eligible"),
        none_cc_installment: field("is_non_cc_installment_payment_eligible"),
        preferred_seller: field("is_preferred_plus_seller"),
        shop_location: field("shop_location"),
        shop_rating: field("shop_rating"),
        cod: field("can_use_cod"),
        extraction_date: extraction_date.to_string(),
    }
}

/// Fixed-point price → currency units. Zero and negative values are "no price".
fn scaled_price(value: Option<&Value>) -> Option<f64> {
    let raw = value.and_then(|v| v.as_f64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))?;
    if raw <= 0.0 {
        return None;
    }
    Some(raw / PRICE_SCALE)
}
