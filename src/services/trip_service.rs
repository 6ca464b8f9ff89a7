//! Saved-trip persistence: the whole list lives in one encrypted blob,
//! most recent first. Reads never fail; anything unreadable becomes an
//! empty history rather than an error in the UI.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::models::plan::TripPlanResponse;
use crate::models::query::UserQuery;
use crate::models::trip::SavedTrip;
use crate::services::security_service::{decrypt_data, encrypt_data};
use crate::storage::KeyValueStore;

const STORAGE_KEY: &str = "saved_trips";

pub struct TripService {
    store: Arc<dyn KeyValueStore>,
}

impl TripService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn saved_trips(&self) -> Vec<SavedTrip> {
        match self.store.read(STORAGE_KEY) {
            Some(blob) => decrypt_data(&blob).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    pub fn save_trip(&self, query: UserQuery, plan: TripPlanResponse) -> SavedTrip {
        let new_trip = SavedTrip {
            id: Uuid::new_v4(),
            created_at: Utc::now().timestamp_millis(),
            query,
            plan,
        };

        let mut trips = self.saved_trips();
        trips.insert(0, new_trip.clone());
        self.persist(&trips);

        new_trip
    }

    pub fn delete_trip(&self, id: Uuid) -> Vec<SavedTrip> {
        let mut trips = self.saved_trips();
        trips.retain(|trip| trip.id != id);
        self.persist(&trips);
        trips
    }

    fn persist(&self, trips: &[SavedTrip]) {
        let blob = encrypt_data(&trips);
        if blob.is_empty() {
            eprintln!("Failed to encrypt saved trips; keeping previous contents");
            return;
        }
        self.store.write(STORAGE_KEY, &blob);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::{BudgetStatus, CostBreakdown, ItineraryItem};
    use crate::models::query::TransportType;
    use crate::storage::memory::InMemoryStore;
    use serial_test::serial;

    fn sample_query() -> UserQuery {
        UserQuery {
            from: "Chennai".to_string(),
            destination: "Pondicherry".to_string(),
            duration: "2 Days".to_string(),
            budget: 3000,
            transport_type: TransportType::Bus,
            budget_breakdown: None,
        }
    }

    fn sample_plan(summary: &str) -> TripPlanResponse {
        TripPlanResponse {
            trip_summary: summary.to_string(),
            budget_status: BudgetStatus::Ok,
            ml_comparison: "On par with the baseline".to_string(),
            transport_options: Vec::new(),
            cost_breakdown: CostBreakdown {
                transport: "₹600".to_string(),
                stay: "₹1200".to_string(),
                food: "₹700".to_string(),
                activities: "₹500".to_string(),
            },
            itinerary: vec![ItineraryItem {
                time: "06:00".to_string(),
                activity: "Beach walk".to_string(),
                cost: None,
                cost_saving_tip: "Go before the crowds".to_string(),
            }],
            local_pro_tip: "Rent a cycle".to_string(),
        }
    }

    fn service() -> TripService {
        TripService::new(Arc::new(InMemoryStore::new()))
    }

    #[test]
    #[serial]
    fn save_then_read_roundtrips() {
        let service = service();
        assert!(service.saved_trips().is_empty());

        let saved = service.save_trip(sample_query(), sample_plan("Two frugal days"));
        let trips = service.saved_trips();

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].id, saved.id);
        assert_eq!(trips[0].plan.trip_summary, "Two frugal days");
    }

    #[test]
    #[serial]
    fn newest_trip_comes_first() {
        let service = service();
        service.save_trip(sample_query(), sample_plan("first"));
        service.save_trip(sample_query(), sample_plan("second"));

        let trips = service.saved_trips();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].plan.trip_summary, "second");
        assert_eq!(trips[1].plan.trip_summary, "first");
    }

    #[test]
    #[serial]
    fn delete_filters_by_id() {
        let service = service();
        let keep = service.save_trip(sample_query(), sample_plan("keep"));
        let drop = service.save_trip(sample_query(), sample_plan("drop"));

        let remaining = service.delete_trip(drop.id);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
        assert_eq!(service.saved_trips().len(), 1);
    }

    #[test]
    #[serial]
    fn stored_blob_is_not_plaintext() {
        let store = Arc::new(InMemoryStore::new());
        let service = TripService::new(store.clone());
        service.save_trip(sample_query(), sample_plan("secret summary"));

        let blob = store.read("saved_trips").expect("blob should exist");
        assert!(!blob.contains("secret summary"));
    }

    #[test]
    #[serial]
    fn legacy_plaintext_blob_still_reads() {
        let store = Arc::new(InMemoryStore::new());
        let trips = vec![SavedTrip {
            id: Uuid::new_v4(),
            created_at: 1_700_000_000_000,
            query: sample_query(),
            plan: sample_plan("pre-encryption trip"),
        }];
        store.write(
            "saved_trips",
            &serde_json::to_string(&trips).expect("serialize"),
        );

        let service = TripService::new(store);
        let read = service.saved_trips();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].plan.trip_summary, "pre-encryption trip");
    }

    #[test]
    #[serial]
    fn corrupted_blob_reads_as_empty() {
        let store = Arc::new(InMemoryStore::new());
        store.write("saved_trips", "definitely not a valid blob");

        let service = TripService::new(store);
        assert!(service.saved_trips().is_empty());
    }
}
