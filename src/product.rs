use serde::{Deserialize, Serialize};

const MAX_STARS: f64 = 5.0;

/// A catalog item as served by the product endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "id")]
    pub product_id: u32,
    #[serde(alias = "name")]
    pub product_name: String,
    #[serde(default)]
    pub product_code: String,
    /// Release date as published by the endpoint (e.g. "March 19, 2021").
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub star_rating: f64,
    #[serde(default)]
    pub image_url: String,
}

impl Product {
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Rating rendered as five filled/empty stars, rounded to the nearest star.
    pub fn stars(&self) -> String {
        let filled = self.star_rating.clamp(0.0, MAX_STARS).round() as usize;
        let empty = MAX_STARS as usize - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }

    /// Case-insensitive substring match on the product name.
    pub fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.trim();
        filter.is_empty()
            || self
                .product_name
                .to_lowercase()
                .contains(&filter.to_lowercase())
    }
}

#[cfg(test)]
pub(crate) fn sample(id: u32, name: &str) -> Product {
    Product {
        product_id: id,
        product_name: name.to_string(),
        product_code: format!("GDN-{:04}", id),
        release_date: "March 19, 2021".to_string(),
        description: String::new(),
        price: 19.95,
        star_rating: 3.2,
        image_url: format!("assets/images/{}.png", id),
    }
}
