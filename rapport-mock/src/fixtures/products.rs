use rapport_core::ProductRecord;
use rust_decimal::Decimal;

#[allow(clippy::too_many_arguments)]
fn p(
    name: &str,
    price: Option<&str>,
    units_in_stock: u32,
    units_on_order: u32,
    category_id: u32,
    supplier_country: &str,
    discontinued: bool,
) -> ProductRecord {
    ProductRecord {
        name: name.to_string(),
        unit_price: price.and_then(|s| s.parse::<Decimal>().ok()),
        units_in_stock,
        units_on_order,
        category_id: Some(category_id),
        supplier_country: supplier_country.to_string(),
        discontinued,
    }
}

/// Northwind product sample in catalog (product id) order.
pub fn catalog() -> Vec<ProductRecord> {
    vec![
        p("Chai", Some("18.00"), 39, 0, 1, "UK", false),
        p("Chang", Some("19.00"), 17, 40, 1, "UK", false),
        p("Aniseed Syrup", Some("10.00"), 13, 70, 2, "UK", false),
        p("Chef Anton's Cajun Seasoning", Some("22.00"), 53, 0, 2, "USA", false),
        p("Chef Anton's Gumbo Mix", Some("21.35"), 0, 0, 2, "USA", true),
        p("Grandma's Boysenberry Spread", Some("25.00"), 120, 0, 2, "USA", false),
        p("Uncle Bob's Organic Dried Pears", Some("30.00"), 15, 0, 7, "USA", false),
        p("Northwoods Cranberry Sauce", Some("40.00"), 6, 0, 2, "USA", false),
        p("Mishi Kobe Niku", Some("97.00"), 29, 0, 6, "Japan", true),
        p("Ikura", Some("31.00"), 31, 0, 8, "Japan", false),
        p("Queso Cabrales", Some("21.00"), 22, 30, 4, "Spain", false),
        p("Queso Manchego La Pastora", Some("38.00"), 86, 0, 4, "Spain", false),
        p("Konbu", Some("6.00"), 24, 0, 8, "Japan", false),
        p("Tofu", Some("23.25"), 35, 0, 7, "Japan", false),
        p("Genen Shouyu", Some("15.50"), 39, 0, 2, "Japan", false),
        p("Pavlova", Some("17.45"), 29, 0, 3, "Australia", false),
        p("Alice Mutton", Some("39.00"), 0, 0, 6, "Australia", true),
        p("Carnarvon Tigers", Some("62.50"), 42, 0, 8, "Australia", false),
        p("Teatime Chocolate Biscuits", Some("9.20"), 25, 0, 3, "UK", false),
        p("Sir Rodney's Marmalade", Some("81.00"), 40, 0, 3, "UK", false),
        p("Sir Rodney's Scones", Some("10.00"), 3, 40, 3, "UK", false),
        p("Gustaf's Knäckebröd", Some("21.00"), 104, 0, 5, "Sweden", false),
        p("Rössle Sauerkraut", Some("45.60"), 26, 0, 7, "Germany", true),
        p("Original Frankfurter grüne Soße", None, 32, 0, 2, "Germany", false),
    ]
}
