pub mod client;
pub mod request;
pub mod response;

pub use client::{ApiClient, ClientError};
pub use request::Endpoint;
pub use response::ApiResponse;
