use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Cabin class requested for a flight search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// Wire value expected by the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::PremiumEconomy => "premium_economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }
}

/// Parameters for a one-way flight search.
///
/// The four identifiers are required and must name different places
/// (enforced by the caller). Optional fields fall back to operation
/// defaults when the outbound request is built.
#[derive(Debug, Clone, Default)]
pub struct FlightSearchQuery {
    pub origin_sky_id: String,
    pub destination_sky_id: String,
    pub origin_entity_id: String,
    pub destination_entity_id: String,
    pub date: Option<NaiveDate>,
    pub cabin_class: Option<CabinClass>,
    pub adults: Option<u32>,
    pub sort_by: Option<String>,
    pub currency: Option<String>,
    pub market: Option<String>,
    pub country_code: Option<String>,
}

impl FlightSearchQuery {
    pub fn new(
        origin_sky_id: impl Into<String>,
        destination_sky_id: impl Into<String>,
        origin_entity_id: impl Into<String>,
        destination_entity_id: impl Into<String>,
    ) -> Self {
        Self {
            origin_sky_id: origin_sky_id.into(),
            destination_sky_id: destination_sky_id.into(),
            origin_entity_id: origin_entity_id.into(),
            destination_entity_id: destination_entity_id.into(),
            ..Default::default()
        }
    }
}

/// Unwrapped payload of a flight search: priced itineraries plus the
/// provider's search context and filter statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchResult {
    pub context: SearchContext,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(default)]
    pub filter_stats: Option<FilterStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchContext {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u32>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl SearchContext {
    /// The provider accepted the request but could not execute the search.
    pub fn is_failure(&self) -> bool {
        self.status.eq_ignore_ascii_case("failure")
    }
}

/// One priced flight offer, immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    pub price: Price,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub is_self_transfer: bool,
    #[serde(default)]
    pub fare_policy: FarePolicy,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub raw: f64,
    #[serde(default)]
    pub formatted: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarePolicy {
    #[serde(default)]
    pub is_change_allowed: bool,
    #[serde(default)]
    pub is_partially_changeable: bool,
    #[serde(default)]
    pub is_cancellation_allowed: bool,
    #[serde(default)]
    pub is_partially_refundable: bool,
}

/// One directional origin -> destination trip, possibly with connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub id: String,
    pub origin: Location,
    pub destination: Location,
    #[serde(default)]
    pub duration_in_minutes: u32,
    #[serde(default)]
    pub stop_count: u32,
    pub departure: String,
    pub arrival: String,
    #[serde(default)]
    pub carriers: Option<Carriers>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Leg {
    /// Calendar date of departure, time of day discarded.
    pub fn departure_date(&self) -> Option<NaiveDate> {
        parse_date_portion(&self.departure)
    }
}

/// Departure/arrival timestamps come back in a handful of shapes depending
/// on the endpoint: RFC 3339 with offset, naive date-time, or bare date.
fn parse_date_portion(timestamp: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_code: String,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Carriers {
    #[serde(default)]
    pub marketing: Vec<Carrier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alternate_id: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// One physical flight within a leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub origin: SegmentPlace,
    pub destination: SegmentPlace,
    pub departure: String,
    pub arrival: String,
    #[serde(default)]
    pub duration_in_minutes: u32,
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub marketing_carrier: Option<Carrier>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPlace {
    #[serde(default)]
    pub flight_place_id: String,
    #[serde(default)]
    pub display_code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    #[serde(default)]
    pub duration: Option<DurationStats>,
    #[serde(default)]
    pub carriers: Vec<Carrier>,
    #[serde(default)]
    pub airports: Vec<CityAirports>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DurationStats {
    #[serde(default)]
    pub min: u32,
    #[serde(default)]
    pub max: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityAirports {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub airports: Vec<NamedAirport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedAirport {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cabin_class_wire_values() {
        assert_eq!(CabinClass::Economy.as_str(), "economy");
        assert_eq!(CabinClass::PremiumEconomy.as_str(), "premium_economy");
        assert_eq!(CabinClass::default(), CabinClass::Economy);
    }

    #[test]
    fn test_departure_date_accepts_provider_timestamp_shapes() {
        let mut leg = sample_leg("2025-12-01T10:05:00");
        assert_eq!(
            leg.departure_date(),
            NaiveDate::from_ymd_opt(2025, 12, 1)
        );

        leg.departure = "2025-12-01T10:05:00+02:00".to_string();
        assert_eq!(
            leg.departure_date(),
            NaiveDate::from_ymd_opt(2025, 12, 1)
        );

        leg.departure = "not a date".to_string();
        assert_eq!(leg.departure_date(), None);
    }

    #[test]
    fn test_search_context_failure_predicate() {
        let context = SearchContext {
            status: "failure".to_string(),
            total_results: None,
            session_id: None,
        };
        assert!(context.is_failure());

        let context = SearchContext {
            status: "complete".to_string(),
            total_results: Some(10),
            session_id: None,
        };
        assert!(!context.is_failure());
    }

    #[test]
    fn test_itinerary_deserialization_with_sparse_fields() {
        let json = r#"
            {
                "id": "it-1",
                "price": { "raw": 420.5, "formatted": "$421" },
                "legs": []
            }
        "#;
        let itinerary: Itinerary = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(itinerary.id, "it-1");
        assert_eq!(itinerary.price.raw, 420.5);
        assert!(!itinerary.is_self_transfer);
        assert!(itinerary.tags.is_empty());
        assert!(!itinerary.fare_policy.is_change_allowed);
    }

    fn sample_leg(departure: &str) -> Leg {
        Leg {
            id: "leg-1".to_string(),
            origin: Location {
                id: "LHR".to_string(),
                entity_id: None,
                name: "London Heathrow".to_string(),
                display_code: "LHR".to_string(),
                city: Some("London".to_string()),
            },
            destination: Location {
                id: "JFK".to_string(),
                entity_id: None,
                name: "New York JFK".to_string(),
                display_code: "JFK".to_string(),
                city: Some("New York".to_string()),
            },
            duration_in_minutes: 480,
            stop_count: 0,
            departure: departure.to_string(),
            arrival: "2025-12-01T18:05:00".to_string(),
            carriers: None,
            segments: Vec::new(),
        }
    }
}
