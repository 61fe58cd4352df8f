use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use skylane_core::GatewayError;

use crate::app_config::{ConfigError, ProviderConfig};

pub const AIRPORT_SEARCH_PATH: &str = "/v1/flights/searchAirport";
pub const FLIGHT_SEARCH_PATH: &str = "/v2/flights/searchFlights";
pub const FLIGHT_DETAILS_PATH: &str = "/v1/flights/getFlightDetails";
pub const PRICE_CALENDAR_PATH: &str = "/v1/flights/getPriceCalendar";

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Transport seam between the typed client and the provider.
///
/// The reqwest implementation below is the only one used in production;
/// tests script envelopes through fakes of this trait.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issue a GET against one of the provider endpoints and return the
    /// decoded response envelope, unmodified.
    async fn request(&self, path: &str, query: &[(&str, String)]) -> Result<Value, GatewayError>;
}

/// Reqwest-backed gateway bound to one base URL. The credential pair rides
/// on every request as default headers.
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Fails when the api key is blank; callers treat that as a fatal
    /// startup error, not a per-request one.
    pub fn new(provider: &ProviderConfig) -> Result<Self, ConfigError> {
        if provider.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&provider.api_key)
                .map_err(|_| ConfigError::Invalid("api key is not a valid header value".into()))?,
        );
        headers.insert(
            API_HOST_HEADER,
            HeaderValue::from_str(&provider.api_host)
                .map_err(|_| ConfigError::Invalid("api host is not a valid header value".into()))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(Self {
            http,
            base_url: provider.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn request(&self, path: &str, query: &[(&str, String)]) -> Result<Value, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%path, "provider request");

        let response = match self.http.get(&url).query(query).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%path, error = %err, "provider unreachable");
                return Err(GatewayError::NetworkUnavailable);
            }
        };

        let status = response.status();
        info!(%path, status = status.as_u16(), "provider response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        response.json().await.map_err(|err| {
            warn!(%path, error = %err, "undecodable provider body");
            GatewayError::ProviderError("undecodable response body".to_string())
        })
    }
}

/// Map a non-2xx provider response onto the gateway error taxonomy.
/// Throttling and auth failures get fixed messages; everything else carries
/// the provider detail when the body has one.
fn classify_failure(status: StatusCode, body: &str) -> GatewayError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
        StatusCode::UNAUTHORIZED => GatewayError::Unauthorized,
        StatusCode::FORBIDDEN => GatewayError::Forbidden,
        StatusCode::BAD_REQUEST => GatewayError::BadRequest(
            provider_detail(body).unwrap_or_else(|| "invalid parameters".to_string()),
        ),
        other => GatewayError::ProviderError(
            provider_detail(body).unwrap_or_else(|| other.as_u16().to_string()),
        ),
    }
}

/// Pull a human-readable detail out of a provider error body, if there is
/// one. RapidAPI wraps details under `message`; some endpoints use `error`.
fn provider_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let detail = value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| value.get("error").and_then(Value::as_str))?;
    let detail = detail.trim();
    if detail.is_empty() {
        None
    } else {
        Some(detail.to_string())
    }
}
