use async_trait::async_trait;

use crate::airports::Airport;
use crate::calendar::{PriceCalendar, PriceCalendarRequest};
use crate::details::{FlightDetailsRequest, FlightDetailsResult};
use crate::error::ClientError;
use crate::flights::{FlightSearchQuery, FlightSearchResult};

/// Typed operations offered by the flight-data provider.
///
/// The session layer depends on this trait rather than the concrete HTTP
/// client so state behavior can be tested with scripted fakes.
#[async_trait]
pub trait FlightApi: Send + Sync {
    /// Free-text airport/city lookup. Provider relevance order is
    /// preserved. `locale` defaults to "en-US".
    async fn search_airports(
        &self,
        query: &str,
        locale: Option<&str>,
    ) -> Result<Vec<Airport>, ClientError>;

    /// One-way flight search between two resolved places.
    async fn search_flights(
        &self,
        query: &FlightSearchQuery,
    ) -> Result<FlightSearchResult, ClientError>;

    /// Expand one itinerary into full legs, segments and booking agents.
    async fn get_flight_details(
        &self,
        request: &FlightDetailsRequest,
    ) -> Result<FlightDetailsResult, ClientError>;

    /// Day-by-day fare calendar for a route.
    async fn get_price_calendar(
        &self,
        request: &PriceCalendarRequest,
    ) -> Result<PriceCalendar, ClientError>;
}
