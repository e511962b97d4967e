use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Endpoint envelope
// ---------------------------------------------------------------------------

/// `{ data: { sections: [ { data: { item: [ ... ] } } ] } }`
///
/// Every level is optional: the endpoint drops keys instead of sending empty
/// containers for shops without products.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub data: Option<RecommendData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendData {
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub data: Option<SectionData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SectionData {
    /// Listings are kept as raw JSON; the extractor decides what to read.
    #[serde(default)]
    pub item: Option<Vec<Value>>,
}

// ---------------------------------------------------------------------------
// Output row
// ---------------------------------------------------------------------------

/// Column names of the `Products` table and the CSV header, in row order.
pub const PRODUCT_COLUMNS: [&str; 26] = [
    "product_name",
    "current_stock",
    "shop_name",
    "shop_id",
    "brand",
    "unique_item_id",
    "sold_per_month",
    "historical_sold",
    "liked_count",
    "variation_type",
    "variation",
    "current_price",
    "min_price",
    "max_price",
    "lowest_price_guarantee",
    "current_discount_percentage",
    "rating_star",
    "shopee_verified",
    "official_shop",
    "cc_installment",
    "none_cc_installment",
    "preferred_seller",
    "shop_location",
    "shop_rating",
    "cod",
    "extraction_date",
];

/// One value of an output row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Pass-through conversion of a listing attribute. Arrays and objects are
    /// kept as their JSON text.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Cell::Null,
            Some(Value::Bool(b)) => Cell::Bool(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Cell::Integer(i),
                None => n.as_f64().map(Cell::Real).unwrap_or(Cell::Null),
            },
            Some(Value::String(s)) => Cell::Text(s.clone()),
            Some(other) => Cell::Text(other.to_string()),
        }
    }

    #[cfg(test)]
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(i) => write!(f, "{i}"),
            // Debug keeps the decimal point on whole numbers (5.0, not 5).
            Cell::Real(r) => write!(f, "{r:?}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// One flattened listing, stamped with the run's extraction timestamp.
/// Field order matches [`PRODUCT_COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub product_name: Cell,
    pub current_stock: Cell,
    pub shop_name: Cell,
    pub shop_id: Cell,
    pub brand: Cell,
    pub unique_item_id: Cell,
    pub sold_per_month: Cell,
    pub historical_sold: Cell,
    pub liked_count: Cell,
    pub variation_type: Cell,
    pub variation: Cell,
    /// Scaled down from the fixed-point listing price; null when absent, zero or negative.
    pub current_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub lowest_price_guarantee: Cell,
    pub current_discount_percentage: Cell,
    pub rating_star: Cell,
    pub shopee_verified: Cell,
    pub official_shop: Cell,
    pub cc_installment: Cell,
    pub none_cc_installment: Cell,
    pub preferred_seller: Cell,
    pub shop_location: Cell,
    pub shop_rating: Cell,
    pub cod: Cell,
    pub extraction_date: String,
}

impl ProductRow {
    /// The row as 26 cells in column order.
    pub fn cells(&self) -> [Cell; 26] {
        let price = |p: Option<f64>| p.map(Cell::Real).unwrap_or(Cell::Null);
        [
            self.product_name.clone(),
            self.current_stock.clone(),
            self.shop_name.clone(),
            self.shop_id.clone(),
            self.brand.clone(),
            self.unique_item_id.clone(),
            self.sold_per_month.clone(),
            self.historical_sold.clone(),
            self.liked_count.clone(),
            self.variation_type.clone(),
            self.variation.clone(),
            price(self.current_price),
            price(self.min_price),
            price(self.max_price),
            self.lowest_price_guarantee.clone(),
            self.current_discount_percentage.clone(),
            self.rating_star.clone(),
            self.shopee_verified.clone(),
            self.official_shop.clone(),
            self.cc_installment.clone(),
            self.none_cc_installment.clone(),
            self.preferred_seller.clone(),
            self.shop_location.clone(),
            self.shop_rating.clone(),
            self.cod.clone(),
            Cell::Text(self.extraction_date.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cell_from_json_maps_scalars() {
        assert_eq!(Cell::from_json(None), Cell::Null);
        assert_eq!(Cell::from_json(Some(&json!(null))), Cell::Null);
        assert_eq!(Cell::from_json(Some(&json!(42))), Cell::Integer(42));
        assert_eq!(Cell::from_json(Some(&json!(4.5))), Cell::Real(4.5));
        assert_eq!(Cell::from_json(Some(&json!(true))), Cell::Bool(true));
        assert_eq!(Cell::from_json(Some(&json!("Makati"))), Cell::Text("Makati".to_string()));
    }

    #[test]
    fn cell_from_json_keeps_containers_as_json_text() {
        let cell = Cell::from_json(Some(&json!(["700ml", "1L"])));
        assert_eq!(cell, Cell::Text(r#"["700ml","1L"]"#.to_string()));
    }

    #[test]
    fn cell_display_for_csv_fields() {
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::Real(5.0).to_string(), "5.0");
        assert_eq!(Cell::Real(1234.5).to_string(), "1234.5");
        assert_eq!(Cell::Integer(-3).to_string(), "-3");
        assert_eq!(Cell::Bool(false).to_string(), "false");
    }

    #[test]
    fn envelope_tolerates_missing_levels() {
        let resp: RecommendResponse = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(resp.data.unwrap().sections.is_none());

        let resp: RecommendResponse = serde_json::from_str(r#"{"error":90309999}"#).unwrap();
        assert!(resp.data.is_none());
    }
}
