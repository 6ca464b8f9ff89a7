use serde::{Deserialize, Serialize};

/// One priced ride option. Recomputed fresh for every comparison request,
/// never persisted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RidePrice {
    pub service: String,
    pub vehicle: String,
    pub base_fare: i64,
    pub price_per_km: f64,
    /// Kilometers, rounded to one decimal.
    pub distance: f64,
    pub base_price: i64,
    pub final_price: i64,
    /// Minutes.
    pub estimated_time: i64,
    pub rating: f64,
    pub discount: u32,
    pub discount_percentage: u32,
    pub benefits: Vec<String>,
}
