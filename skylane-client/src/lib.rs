pub mod app_config;
pub mod client;
pub mod gateway;

pub use app_config::{Config, ConfigError, ProviderConfig};
pub use client::FlightDataClient;
pub use gateway::{Gateway, HttpGateway};
