//! End-to-end trip planning: baseline cost, live place names, prompt
//! assembly, then the model call.

use crate::models::plan::TripPlanResponse;
use crate::models::query::UserQuery;

use super::cost_estimator::CostEstimator;
use super::gemini::{GeminiClient, PlanError};
use super::places_service::{PlaceResult, PlacesService};

pub struct PlanningService {
    gemini: GeminiClient,
    places: Option<PlacesService>,
}

impl PlanningService {
    /// Fails only on a missing AI key; a missing maps key just means
    /// planning proceeds without live place names.
    pub fn new() -> Result<Self, PlanError> {
        let gemini = GeminiClient::new()?;

        let places = match PlacesService::new() {
            Ok(service) => Some(service),
            Err(e) => {
                println!(
                    "PlacesService not available: {}. Planning without live place names.",
                    e
                );
                None
            }
        };

        Ok(Self { gemini, places })
    }

    pub fn with_client(gemini: GeminiClient) -> Self {
        Self {
            gemini,
            places: None,
        }
    }

    pub async fn plan_trip(&self, query: &UserQuery) -> Result<TripPlanResponse, PlanError> {
        let base_cost = CostEstimator::predicted_base_cost(&query.destination, &query.duration);
        println!(
            "Predicted base cost for {} ({}): {} INR",
            query.destination, query.duration, base_cost
        );

        let (lodging, attractions, restaurants) = match &self.places {
            Some(places) => places.nearby_all(&query.destination).await,
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        let prompt = build_prompt(query, base_cost, &lodging, &attractions, &restaurants);
        self.gemini.generate_trip_plan(&prompt).await
    }
}

/// Assemble the planning prompt. The budget-status rule and the allocation
/// echo are contract-by-instruction: the model is told what to do, nothing
/// re-checks the answer locally.
pub fn build_prompt(
    query: &UserQuery,
    base_cost: i64,
    lodging: &[PlaceResult],
    attractions: &[PlaceResult],
    restaurants: &[PlaceResult],
) -> String {
    let mut prompt = format!(
        "You are the \"Agentic Wander Intelligence Engine,\" a hyper-efficient travel coordinator.\n\n\
         [USER_QUERY]: {} to {} for {} with {} INR budget.\n\
         [ML_PREDICTED_BASE_COST]: {} INR\n\
         [TRANSPORT_PREFERENCE]: {}\n",
        query.from,
        query.destination,
        query.duration,
        query.budget,
        base_cost,
        query.transport_type.as_str()
    );

    push_place_section(&mut prompt, "[REAL_STAY_OPTIONS]", lodging);
    push_place_section(&mut prompt, "[REAL_ATTRACTIONS]", attractions);
    push_place_section(&mut prompt, "[REAL_FOOD_SPOTS]", restaurants);

    if let Some(breakdown) = query.budget_breakdown.as_ref().filter(|b| !b.is_empty()) {
        prompt.push_str("\n[CUSTOM_BUDGET_ALLOCATION] (INR):\n");
        for (label, value) in [
            ("transport", breakdown.transport),
            ("stay", breakdown.stay),
            ("food", breakdown.food),
            ("activities", breakdown.activities),
        ] {
            if let Some(amount) = value {
                prompt.push_str(&format!("- {}: {}\n", label, amount));
            }
        }
        prompt.push_str(
            "- cost_breakdown MUST echo the allocations above exactly as provided.\n",
        );
    }

    prompt.push_str(
        "\nOPERATIONAL CONSTRAINTS:\n\
         - Focus on the most cost-effective local transit (State buses, Sleeper/General trains, shared autos).\n\
         - If the user's budget in the query is 20% lower than the [ML_PREDICTED_BASE_COST], budget_status MUST be \"CRITICAL\" (BUDGET_ALARM).\n\
         - Prioritize Frugal Engineering: finding the maximum experience for the minimum cost.\n\
         - Provide specific hacks for saving money on stays (hostels, guesthouses) and local food.\n",
    );

    prompt
}

fn push_place_section(prompt: &mut String, heading: &str, places: &[PlaceResult]) {
    if places.is_empty() {
        return;
    }

    prompt.push_str(&format!("{}:\n", heading));
    for place in places {
        match place.rating {
            Some(rating) => prompt.push_str(&format!("- {} ({:.1})\n", place.name, rating)),
            None => prompt.push_str(&format!("- {}\n", place.name)),
        }
    }
}
