use serde::{Deserialize, Serialize};

/// Structured plan returned by the generative model. Deserializing into this
/// type is the schema validation step; a response missing a required field
/// fails the whole parse.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TripPlanResponse {
    pub trip_summary: String,
    pub budget_status: BudgetStatus,
    pub ml_comparison: String,
    #[serde(default)]
    pub transport_options: Vec<TransportOption>,
    pub cost_breakdown: CostBreakdown,
    pub itinerary: Vec<ItineraryItem>,
    pub local_pro_tip: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BudgetStatus {
    Ok,
    Warning,
    Critical,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransportOption {
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub name: String,
    pub cost: String,
    pub duration: String,
    pub comfort_rating: ComfortRating,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Train,
    Bus,
    Flight,
    Cab,
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ComfortRating {
    Low,
    Medium,
    High,
}

/// Four currency-formatted strings, e.g. "₹800".
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CostBreakdown {
    pub transport: String,
    pub stay: String,
    pub food: String,
    pub activities: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ItineraryItem {
    pub time: String,
    pub activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    pub cost_saving_tip: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_status_uses_uppercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&BudgetStatus::Critical).unwrap(),
            "\"CRITICAL\""
        );
        let status: BudgetStatus = serde_json::from_str("\"WARNING\"").unwrap();
        assert_eq!(status, BudgetStatus::Warning);
    }

    #[test]
    fn plan_parses_without_transport_options() {
        let raw = serde_json::json!({
            "trip_summary": "Two frugal days by the sea",
            "budget_status": "OK",
            "ml_comparison": "Your budget is 10% under the predicted baseline",
            "cost_breakdown": {
                "transport": "₹600",
                "stay": "₹1200",
                "food": "₹700",
                "activities": "₹500"
            },
            "itinerary": [
                {
                    "time": "06:00",
                    "activity": "Sunrise at the promenade",
                    "cost_saving_tip": "Walk instead of hiring an auto"
                }
            ],
            "local_pro_tip": "Rent a cycle for the day"
        })
        .to_string();

        let plan: TripPlanResponse = serde_json::from_str(&raw).unwrap();
        assert!(plan.transport_options.is_empty());
        assert_eq!(plan.itinerary.len(), 1);
        assert!(plan.itinerary[0].cost.is_none());
    }

    #[test]
    fn plan_missing_required_field_fails_parse() {
        let raw = serde_json::json!({
            "trip_summary": "Missing the rest",
            "budget_status": "OK"
        })
        .to_string();

        assert!(serde_json::from_str::<TripPlanResponse>(&raw).is_err());
    }
}
