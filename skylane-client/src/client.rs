use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use skylane_core::airports::Airport;
use skylane_core::calendar::{PriceCalendar, PriceCalendarRequest};
use skylane_core::details::{FlightDetailsRequest, FlightDetailsResult};
use skylane_core::error::ClientError;
use skylane_core::flights::{CabinClass, FlightSearchQuery, FlightSearchResult};
use skylane_core::FlightApi;

use crate::gateway::{
    Gateway, AIRPORT_SEARCH_PATH, FLIGHT_DETAILS_PATH, FLIGHT_SEARCH_PATH, PRICE_CALENDAR_PATH,
};

pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_ADULTS: u32 = 1;
pub const DEFAULT_SORT: &str = "best";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_MARKET: &str = "en-US";
pub const DEFAULT_COUNTRY: &str = "US";
/// Departure date sent when a search query carries none.
pub const DEFAULT_DEPARTURE_DATE: &str = "2025-12-01";

/// Typed, validated operations layered on the gateway. Defaults are
/// injected here rather than in the gateway: they are per-operation
/// business policy, the gateway is transport only.
pub struct FlightDataClient {
    gateway: Arc<dyn Gateway>,
}

impl FlightDataClient {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl FlightApi for FlightDataClient {
    async fn search_airports(
        &self,
        query: &str,
        locale: Option<&str>,
    ) -> Result<Vec<Airport>, ClientError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidArgument(
                "airport query must not be empty".to_string(),
            ));
        }

        let params = vec![
            ("query", trimmed.to_string()),
            ("locale", locale.unwrap_or(DEFAULT_LOCALE).to_string()),
        ];
        let raw = self.gateway.request(AIRPORT_SEARCH_PATH, &params).await?;
        unwrap_envelope(raw, "airport search")
    }

    async fn search_flights(
        &self,
        query: &FlightSearchQuery,
    ) -> Result<FlightSearchResult, ClientError> {
        let params = flight_search_params(query);
        let raw = self.gateway.request(FLIGHT_SEARCH_PATH, &params).await?;
        let result: FlightSearchResult = unwrap_envelope(raw, "flight search")?;

        // A payload can exist even when the search itself did not run.
        if result.context.is_failure() {
            debug!("flight search context reported failure");
            return Err(ClientError::ProviderReportedFailure {
                operation: "flight search",
            });
        }
        Ok(result)
    }

    async fn get_flight_details(
        &self,
        request: &FlightDetailsRequest,
    ) -> Result<FlightDetailsResult, ClientError> {
        if request.legs.is_empty() {
            return Err(ClientError::InvalidArgument(
                "details request needs at least one leg".to_string(),
            ));
        }
        let legs = serde_json::to_string(&request.legs)
            .map_err(|err| ClientError::InvalidArgument(format!("legs could not be encoded: {err}")))?;

        let params = vec![
            ("legs", legs),
            (
                "adults",
                request.adults.unwrap_or(DEFAULT_ADULTS).to_string(),
            ),
            (
                "currency",
                request
                    .currency
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            ),
            ("locale", DEFAULT_LOCALE.to_string()),
            ("market", DEFAULT_MARKET.to_string()),
            ("cabinClass", CabinClass::Economy.as_str().to_string()),
            ("countryCode", DEFAULT_COUNTRY.to_string()),
        ];
        let raw = self.gateway.request(FLIGHT_DETAILS_PATH, &params).await?;
        unwrap_envelope(raw, "flight details")
    }

    async fn get_price_calendar(
        &self,
        request: &PriceCalendarRequest,
    ) -> Result<PriceCalendar, ClientError> {
        let params = vec![
            ("originSkyId", request.origin_sky_id.clone()),
            ("destinationSkyId", request.destination_sky_id.clone()),
            ("fromDate", request.from_date.to_string()),
            (
                "currency",
                request
                    .currency
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            ),
        ];
        let raw = self.gateway.request(PRICE_CALENDAR_PATH, &params).await?;
        unwrap_envelope(raw, "price calendar")
    }
}

/// Outbound parameter set for a flight search with every default applied.
fn flight_search_params(query: &FlightSearchQuery) -> Vec<(&'static str, String)> {
    let date = query
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| DEFAULT_DEPARTURE_DATE.to_string());

    vec![
        ("originSkyId", query.origin_sky_id.clone()),
        ("destinationSkyId", query.destination_sky_id.clone()),
        ("originEntityId", query.origin_entity_id.clone()),
        ("destinationEntityId", query.destination_entity_id.clone()),
        ("date", date),
        (
            "cabinClass",
            query.cabin_class.unwrap_or_default().as_str().to_string(),
        ),
        (
            "adults",
            query.adults.unwrap_or(DEFAULT_ADULTS).to_string(),
        ),
        (
            "sortBy",
            query
                .sort_by
                .clone()
                .unwrap_or_else(|| DEFAULT_SORT.to_string()),
        ),
        (
            "currency",
            query
                .currency
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        ),
        (
            "market",
            query
                .market
                .clone()
                .unwrap_or_else(|| DEFAULT_MARKET.to_string()),
        ),
        (
            "countryCode",
            query
                .country_code
                .clone()
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        ),
    ]
}

/// Shared envelope post-condition for all four operations: `status` must be
/// truthy, `data` must be present, and the payload must decode.
fn unwrap_envelope<T: DeserializeOwned>(raw: Value, operation: &'static str) -> Result<T, ClientError> {
    let status = raw.get("status").and_then(Value::as_bool).unwrap_or(false);
    if !status {
        return Err(ClientError::ProviderReportedFailure { operation });
    }

    let data = match raw.get("data") {
        None | Some(Value::Null) => return Err(ClientError::EmptyPayload { operation }),
        Some(data) => data.clone(),
    };

    serde_json::from_value(data).map_err(|source| ClientError::ResponseDecode { operation, source })
}
