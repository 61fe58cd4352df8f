use std::env;
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skylane_client::app_config::Config;
use skylane_client::client::FlightDataClient;
use skylane_client::gateway::HttpGateway;
use skylane_core::airports::Airport;
use skylane_core::calendar::PriceCalendarRequest;
use skylane_core::details::FlightDetailsRequest;
use skylane_core::flights::{FlightSearchQuery, Itinerary};
use skylane_session::credentials::{CredentialStore, InMemoryCredentialStore};
use skylane_session::search::SearchSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skylane_app=info,skylane_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: skylane-app <origin> <destination> [YYYY-MM-DD]");
    }
    let date: Option<chrono::NaiveDate> = match args.get(2) {
        Some(raw) => Some(raw.parse().context("date must be YYYY-MM-DD")?),
        None => None,
    };

    let config = Config::load().expect("Failed to load config");
    // Missing credential is fatal at startup, never a per-request error.
    let gateway = HttpGateway::new(&config.provider).expect("Provider credential missing");
    let client = Arc::new(FlightDataClient::new(Arc::new(gateway)));
    let session = Arc::new(SearchSession::new(client));

    // Mock auth boundary: the search flow runs as a logged-in user.
    let credentials = InMemoryCredentialStore::new();
    let user = credentials
        .register("demo@skylane.dev", "demo-password", "Demo Traveller")
        .await?;
    tracing::info!(user = %user.email, "session started");

    let origin = resolve_airport(&session, &args[0]).await?;
    let destination = resolve_airport(&session, &args[1]).await?;
    println!(
        "Searching flights {} -> {}",
        origin.display_title(),
        destination.display_title()
    );

    let query = FlightSearchQuery {
        date,
        ..FlightSearchQuery::new(
            origin.sky_id.clone(),
            destination.sky_id.clone(),
            origin.entity_id.clone(),
            destination.entity_id.clone(),
        )
    };
    session.search_flights(&query).await;

    let flights = session.flights();
    if let Some(error) = flights.error {
        bail!("flight search failed: {error}");
    }
    let result = flights.result.context("flight search returned nothing")?;
    println!(
        "{} of {} itineraries:",
        result.itineraries.len().min(5),
        result.context.total_results.unwrap_or(result.itineraries.len() as u32)
    );
    for itinerary in result.itineraries.iter().take(5) {
        print_itinerary(itinerary);
    }

    if let Some(first) = result.itineraries.first() {
        show_details(&session, first).await;
    }

    let from_date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    session
        .load_price_calendar(&PriceCalendarRequest {
            origin_sky_id: origin.sky_id.clone(),
            destination_sky_id: destination.sky_id.clone(),
            from_date,
            currency: None,
        })
        .await;

    let calendar = session.calendar();
    match (calendar.result, calendar.error) {
        (Some(calendar), _) => {
            println!("Fare calendar ({}):", calendar.currency());
            for day in calendar.days().iter().take(7) {
                println!("  {}  {:>8.2}  [{}]", day.day, day.price, day.group);
            }
        }
        (None, Some(error)) => eprintln!("price calendar unavailable: {error}"),
        (None, None) => {}
    }

    credentials.logout().await?;
    Ok(())
}

/// Resolve free text to the provider's best airport match.
async fn resolve_airport(session: &Arc<SearchSession>, text: &str) -> anyhow::Result<Airport> {
    session.search_airports(text).await;

    let state = session.airports();
    if let Some(error) = state.error {
        bail!("airport search for {text:?} failed: {error}");
    }
    state
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .with_context(|| format!("no airports match {text:?}"))
}

fn print_itinerary(itinerary: &Itinerary) {
    let route = itinerary
        .legs
        .iter()
        .map(|leg| format!("{} -> {} ({} stops)", leg.origin.display_code, leg.destination.display_code, leg.stop_count))
        .collect::<Vec<_>>()
        .join(", ");
    println!("  {:>10}  {}", itinerary.price.formatted, route);
}

async fn show_details(session: &Arc<SearchSession>, itinerary: &Itinerary) {
    let request = match FlightDetailsRequest::for_itinerary(itinerary) {
        Ok(request) => request,
        Err(error) => {
            eprintln!("cannot expand itinerary {}: {error}", itinerary.id);
            return;
        }
    };
    session.load_flight_details(&request).await;

    let details = session.details();
    match (details.result, details.error) {
        (Some(details), _) => {
            println!("Booking options for {}:", itinerary.id);
            for option in details.itinerary.pricing_options.iter().take(3) {
                for agent in option.agents.iter().take(1) {
                    println!("  {:>10.2}  {}", agent.price, agent.name);
                }
            }
        }
        (None, Some(error)) => eprintln!("details unavailable: {error}"),
        (None, None) => {}
    }
}
