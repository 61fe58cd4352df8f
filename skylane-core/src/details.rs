use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::flights::{Itinerary, Leg};

/// One leg of a details lookup, in the shape the provider expects inside
/// the `legs` query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsLeg {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
}

impl DetailsLeg {
    /// Derive the provider leg descriptor from a search-result leg. Origin
    /// and destination come from the leg's location identifiers; the
    /// departure timestamp's time of day is discarded.
    pub fn from_leg(leg: &Leg) -> Result<Self, ClientError> {
        let date = leg.departure_date().ok_or_else(|| {
            ClientError::InvalidArgument(format!(
                "leg {} has no parsable departure date",
                leg.id
            ))
        })?;
        Ok(Self {
            origin: leg.origin.id.clone(),
            destination: leg.destination.id.clone(),
            date,
        })
    }
}

/// Request for the full pricing breakdown of one itinerary.
#[derive(Debug, Clone, Default)]
pub struct FlightDetailsRequest {
    pub legs: Vec<DetailsLeg>,
    pub adults: Option<u32>,
    pub currency: Option<String>,
}

impl FlightDetailsRequest {
    /// Build the request for every leg of a search result itinerary.
    pub fn for_itinerary(itinerary: &Itinerary) -> Result<Self, ClientError> {
        let legs = itinerary
            .legs
            .iter()
            .map(DetailsLeg::from_leg)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            legs,
            adults: None,
            currency: None,
        })
    }
}

/// Expanded view of one itinerary: full leg/segment detail plus the booking
/// channels that can sell it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetailsResult {
    pub itinerary: DetailedItinerary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedItinerary {
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub pricing_options: Vec<PricingOption>,
    #[serde(default)]
    pub is_transfer_required: bool,
    #[serde(default)]
    pub destination_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOption {
    #[serde(default)]
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

/// A named booking channel offering the itinerary at a price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub rating: Option<AgentRating>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentRating {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flights::Location;

    fn leg(id: &str, origin: &str, destination: &str, departure: &str) -> Leg {
        Leg {
            id: id.to_string(),
            origin: Location {
                id: origin.to_string(),
                entity_id: None,
                name: String::new(),
                display_code: origin.to_string(),
                city: None,
            },
            destination: Location {
                id: destination.to_string(),
                entity_id: None,
                name: String::new(),
                display_code: destination.to_string(),
                city: None,
            },
            duration_in_minutes: 0,
            stop_count: 0,
            departure: departure.to_string(),
            arrival: departure.to_string(),
            carriers: None,
            segments: Vec::new(),
        }
    }

    #[test]
    fn test_details_leg_takes_identifiers_and_date_portion() {
        let leg = leg("leg-1", "LHR", "JFK", "2025-12-01T08:30:00");
        let details = DetailsLeg::from_leg(&leg).expect("should derive leg");
        assert_eq!(details.origin, "LHR");
        assert_eq!(details.destination, "JFK");
        assert_eq!(details.date, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
    }

    #[test]
    fn test_details_leg_rejects_unparsable_departure() {
        let leg = leg("leg-1", "LHR", "JFK", "whenever");
        let err = DetailsLeg::from_leg(&leg).expect_err("should reject");
        assert!(matches!(err, ClientError::InvalidArgument(_)));
    }

    #[test]
    fn test_request_for_two_leg_itinerary_keeps_leg_order() {
        let itinerary = Itinerary {
            id: "it-1".to_string(),
            price: crate::flights::Price {
                raw: 100.0,
                formatted: "$100".to_string(),
            },
            legs: vec![
                leg("leg-1", "LHR", "JFK", "2025-12-01T08:30:00"),
                leg("leg-2", "JFK", "LHR", "2025-12-10T19:45:00"),
            ],
            is_self_transfer: false,
            fare_policy: Default::default(),
            tags: Vec::new(),
            score: 0.0,
        };

        let request = FlightDetailsRequest::for_itinerary(&itinerary).expect("should build");
        assert_eq!(request.legs.len(), 2);
        assert_eq!(request.legs[0].origin, "LHR");
        assert_eq!(request.legs[1].origin, "JFK");
        assert_eq!(
            request.legs[1].date,
            NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()
        );
    }

    #[test]
    fn test_details_leg_wire_encoding() {
        let details = DetailsLeg {
            origin: "LHR".to_string(),
            destination: "JFK".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
        };
        let encoded = serde_json::to_string(&details).expect("should encode");
        assert_eq!(
            encoded,
            r#"{"origin":"LHR","destination":"JFK","date":"2025-12-01"}"#
        );
    }
}
