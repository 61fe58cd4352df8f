pub mod airports;
pub mod api;
pub mod calendar;
pub mod details;
pub mod error;
pub mod flights;

pub use airports::Airport;
pub use api::FlightApi;
pub use error::{ClientError, GatewayError};

pub type ClientResult<T> = Result<T, ClientError>;
