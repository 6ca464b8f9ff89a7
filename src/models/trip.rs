use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::plan::TripPlanResponse;
use crate::models::query::UserQuery;

/// One saved plan. The whole list of these lives in a single encrypted blob
/// in the key-value store, most recent first.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SavedTrip {
    pub id: Uuid,
    /// Epoch milliseconds at save time.
    pub created_at: i64,
    pub query: UserQuery,
    pub plan: TripPlanResponse,
}
