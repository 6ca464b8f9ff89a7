//! Ride-fare comparison across four fixed provider profiles.
//!
//! Pricing is arithmetic over a static table; only the distance comes from
//! outside. A failed distance lookup degrades to a fixed fallback pair so a
//! comparison request always yields a full set of options.

use rand::Rng;

use crate::models::ride::RidePrice;
use crate::services::distance_service::DistanceService;

const FALLBACK_DISTANCE_KM: f64 = 15.0;
const FALLBACK_DURATION_MINUTES: f64 = 25.0;
const MIN_ETA_MINUTES: i64 = 5;

struct ProviderProfile {
    service: &'static str,
    vehicle: &'static str,
    base_fare: i64,
    price_per_km: f64,
    time_per_km: f64,
    rating: f64,
    discount: u32,
    benefits: [&'static str; 3],
}

// 2024-era metro cab pricing.
const PROVIDER_PROFILES: [ProviderProfile; 4] = [
    ProviderProfile {
        service: "Uber",
        vehicle: "UberGo",
        base_fare: 50,
        price_per_km: 12.0,
        time_per_km: 2.0,
        rating: 4.7,
        discount: 15,
        benefits: ["WiFi available", "Professional driver", "Real-time tracking"],
    },
    ProviderProfile {
        service: "Ola",
        vehicle: "Ola Prime",
        base_fare: 45,
        price_per_km: 10.0,
        time_per_km: 2.0,
        rating: 4.5,
        discount: 20,
        benefits: ["AC available", "Safety features", "Quick pickup"],
    },
    ProviderProfile {
        service: "Fastrack",
        vehicle: "Economy",
        base_fare: 40,
        price_per_km: 8.0,
        time_per_km: 2.5,
        rating: 4.3,
        discount: 10,
        benefits: ["Budget-friendly", "Local drivers", "No surge pricing"],
    },
    ProviderProfile {
        service: "Rapido",
        vehicle: "Bike Taxi",
        base_fare: 20,
        price_per_km: 6.0,
        time_per_km: 1.5,
        rating: 4.6,
        discount: 25,
        benefits: ["Fastest option", "Cheapest ride", "Easy booking"],
    },
];

pub struct RideService {
    distance_service: Option<DistanceService>,
}

impl RideService {
    pub fn new() -> Self {
        let distance_service = match DistanceService::new() {
            Ok(service) => Some(service),
            Err(e) => {
                println!(
                    "DistanceService not available: {}. Using fallback distance for ride pricing.",
                    e
                );
                None
            }
        };

        Self { distance_service }
    }

    /// Price all providers for the trip, cheapest first. Never empty, never
    /// an error; a failed distance lookup falls back to a fixed estimate.
    pub async fn compare_rides(&self, from: &str, to: &str) -> Vec<RidePrice> {
        let (distance_km, duration_minutes) = match &self.distance_service {
            Some(service) => match service.get_distance(from, to).await {
                Ok(result) => (result.distance_km(), result.duration_minutes()),
                Err(e) => {
                    eprintln!("Distance lookup failed: {}. Using fallback distance.", e);
                    (FALLBACK_DISTANCE_KM, FALLBACK_DURATION_MINUTES)
                }
            },
            None => (FALLBACK_DISTANCE_KM, FALLBACK_DURATION_MINUTES),
        };

        println!(
            "Pricing rides over {:.1} km (approx {:.0} min)",
            distance_km, duration_minutes
        );

        Self::price_for_distance(distance_km)
    }

    /// Pure pricing pass over the provider table for a known distance.
    pub fn price_for_distance(distance_km: f64) -> Vec<RidePrice> {
        let mut rng = rand::thread_rng();

        let mut rides: Vec<RidePrice> = PROVIDER_PROFILES
            .iter()
            .map(|profile| {
                let base_cost = profile.base_fare as f64 + distance_km * profile.price_per_km;
                let final_price = base_cost * (1.0 - f64::from(profile.discount) / 100.0);

                let jitter: f64 = rng.gen_range(-2.5..2.5);
                let estimated_time =
                    ((distance_km * profile.time_per_km + jitter).ceil() as i64).max(MIN_ETA_MINUTES);

                RidePrice {
                    service: profile.service.to_string(),
                    vehicle: profile.vehicle.to_string(),
                    base_fare: profile.base_fare,
                    price_per_km: profile.price_per_km,
                    distance: (distance_km * 10.0).round() / 10.0,
                    base_price: base_cost.round() as i64,
                    final_price: final_price.round() as i64,
                    estimated_time,
                    rating: profile.rating,
                    discount: profile.discount,
                    discount_percentage: profile.discount,
                    benefits: profile.benefits.iter().map(|b| b.to_string()).collect(),
                }
            })
            .collect();

        rides.sort_by_key(|ride| ride.final_price);
        rides
    }
}
