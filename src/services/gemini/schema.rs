use serde_json::{json, Value};

/// Structured-output contract attached to every generateContent request.
/// Field names and the required set line up with `TripPlanResponse`; the
/// model is constrained to emit JSON that deserializes straight into it.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "trip_summary": { "type": "STRING" },
            "budget_status": {
                "type": "STRING",
                "description": "OK, WARNING, or CRITICAL based on budget feasibility"
            },
            "ml_comparison": { "type": "STRING" },
            "transport_options": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": {
                            "type": "STRING",
                            "description": "Train, Bus, Flight, Cab, or Other"
                        },
                        "name": { "type": "STRING" },
                        "cost": { "type": "STRING" },
                        "duration": { "type": "STRING" },
                        "comfort_rating": {
                            "type": "STRING",
                            "description": "Low, Medium, or High"
                        }
                    },
                    "required": ["type", "name", "cost", "duration", "comfort_rating"]
                }
            },
            "cost_breakdown": {
                "type": "OBJECT",
                "properties": {
                    "transport": { "type": "STRING" },
                    "stay": { "type": "STRING" },
                    "food": { "type": "STRING" },
                    "activities": { "type": "STRING" }
                },
                "required": ["transport", "stay", "food", "activities"]
            },
            "itinerary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "time": { "type": "STRING" },
                        "activity": { "type": "STRING" },
                        "cost": { "type": "STRING" },
                        "cost_saving_tip": { "type": "STRING" }
                    },
                    "required": ["time", "activity", "cost_saving_tip"]
                }
            },
            "local_pro_tip": { "type": "STRING" }
        },
        "required": [
            "trip_summary",
            "budget_status",
            "ml_comparison",
            "cost_breakdown",
            "itinerary",
            "local_pro_tip"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_match_the_response_type() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();

        for field in [
            "trip_summary",
            "budget_status",
            "ml_comparison",
            "cost_breakdown",
            "itinerary",
            "local_pro_tip",
        ] {
            assert!(required.contains(&field), "missing required field {}", field);
        }
        // Degraded responses may omit transport options entirely.
        assert!(!required.contains(&"transport_options"));
    }

    #[test]
    fn itinerary_items_do_not_require_cost() {
        let schema = response_schema();
        let required = &schema["properties"]["itinerary"]["items"]["required"];
        let names: Vec<&str> = required
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(names, vec!["time", "activity", "cost_saving_tip"]);
    }
}
