use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserQuery {
    pub from: String,
    pub destination: String,
    pub duration: String,
    pub budget: i64,
    pub transport_type: TransportType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_breakdown: Option<BudgetBreakdown>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TransportType {
    Train,
    Bus,
    Flight,
    Any,
}

impl TransportType {
    pub fn as_str(&self) -> &str {
        match self {
            TransportType::Train => "Train",
            TransportType::Bus => "Bus",
            TransportType::Flight => "Flight",
            TransportType::Any => "Any",
        }
    }
}

/// Optional per-category allocation of the overall budget, in whole currency units.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BudgetBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<i64>,
}

impl BudgetBreakdown {
    pub fn is_empty(&self) -> bool {
        self.transport.is_none()
            && self.stay.is_none()
            && self.food.is_none()
            && self.activities.is_none()
    }
}
