use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters for a fare-calendar lookup.
#[derive(Debug, Clone)]
pub struct PriceCalendarRequest {
    pub origin_sky_id: String,
    pub destination_sky_id: String,
    pub from_date: NaiveDate,
    pub currency: Option<String>,
}

/// Fare calendar for a route: one priced entry per day, bucketed into the
/// provider's low/medium/high groups. Day order is as given by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCalendar {
    pub flights: CalendarFlights,
}

impl PriceCalendar {
    pub fn days(&self) -> &[CalendarDay] {
        &self.flights.days
    }

    pub fn currency(&self) -> &str {
        &self.flights.currency
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFlights {
    #[serde(default)]
    pub no_price_label: Option<String>,
    #[serde(default)]
    pub groups: Vec<PriceGroup>,
    #[serde(default)]
    pub days: Vec<CalendarDay>,
    #[serde(default)]
    pub currency: String,
}

/// Legend entry mapping a group id to its label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceGroup {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
}

/// One calendar cell: a date, its price bucket, and the cheapest fare found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: NaiveDate,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub price: f64,
}
