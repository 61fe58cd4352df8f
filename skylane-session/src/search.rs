use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use skylane_core::airports::Airport;
use skylane_core::calendar::{PriceCalendar, PriceCalendarRequest};
use skylane_core::details::{FlightDetailsRequest, FlightDetailsResult};
use skylane_core::flights::{FlightSearchQuery, FlightSearchResult};
use skylane_core::FlightApi;

use crate::debounce::Debouncer;
use crate::state::{OperationCell, OperationState};

/// Keystroke inputs shorter than this clear the airport picker instead of
/// searching.
pub const MIN_AIRPORT_QUERY_LEN: usize = 2;
/// Quiet period between keystrokes before an airport search is issued.
pub const AIRPORT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// UI-facing facade over the flight-data client.
///
/// Holds one state cell per operation kind; the UI triggers operations and
/// observes snapshots. Errors never propagate out of a trigger: they land
/// in the operation's `error` field while the previous result stays
/// visible, so the UI can offer a retry without losing the last good view.
pub struct SearchSession {
    api: Arc<dyn FlightApi>,
    airports: OperationCell<Vec<Airport>>,
    flights: OperationCell<FlightSearchResult>,
    details: OperationCell<FlightDetailsResult>,
    calendar: OperationCell<PriceCalendar>,
}

impl SearchSession {
    pub fn new(api: Arc<dyn FlightApi>) -> Self {
        Self {
            api,
            airports: OperationCell::new(),
            flights: OperationCell::new(),
            details: OperationCell::new(),
            calendar: OperationCell::new(),
        }
    }

    pub async fn search_airports(&self, query: &str) {
        let token = self.airports.begin();
        let outcome = self.api.search_airports(query, None).await;
        if !self.airports.complete(token, outcome) {
            debug!(%query, "airport search superseded, outcome dropped");
        }
    }

    pub async fn search_flights(&self, query: &FlightSearchQuery) {
        let token = self.flights.begin();
        let outcome = self.api.search_flights(query).await;
        if !self.flights.complete(token, outcome) {
            debug!("flight search superseded, outcome dropped");
        }
    }

    pub async fn load_flight_details(&self, request: &FlightDetailsRequest) {
        let token = self.details.begin();
        let outcome = self.api.get_flight_details(request).await;
        if !self.details.complete(token, outcome) {
            debug!("flight details superseded, outcome dropped");
        }
    }

    pub async fn load_price_calendar(&self, request: &PriceCalendarRequest) {
        let token = self.calendar.begin();
        let outcome = self.api.get_price_calendar(request).await;
        if !self.calendar.complete(token, outcome) {
            debug!("price calendar superseded, outcome dropped");
        }
    }

    /// Typeahead entry point: applies the minimum-length policy, then
    /// pushes the actual trigger through the caller's debouncer.
    pub fn submit_airport_query(self: &Arc<Self>, debouncer: &mut Debouncer, input: &str) {
        let trimmed = input.trim();
        if trimmed.chars().count() < MIN_AIRPORT_QUERY_LEN {
            debouncer.cancel();
            self.clear_airports();
            return;
        }

        let session = Arc::clone(self);
        let query = trimmed.to_string();
        debouncer.call(async move {
            session.search_airports(&query).await;
        });
    }

    pub fn airports(&self) -> OperationState<Vec<Airport>> {
        self.airports.snapshot()
    }

    pub fn flights(&self) -> OperationState<FlightSearchResult> {
        self.flights.snapshot()
    }

    pub fn details(&self) -> OperationState<FlightDetailsResult> {
        self.details.snapshot()
    }

    pub fn calendar(&self) -> OperationState<PriceCalendar> {
        self.calendar.snapshot()
    }

    pub fn clear_airports(&self) {
        self.airports.clear();
    }

    pub fn clear_flights(&self) {
        self.flights.clear();
    }

    pub fn clear_details(&self) {
        self.details.clear();
    }

    pub fn clear_calendar(&self) {
        self.calendar.clear();
    }
}
