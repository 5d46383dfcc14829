pub mod client;
pub mod request;
pub mod response;
pub mod transport;
pub mod validation;

pub use client::PredictorClient;
pub use transport::{HttpResponse, NetworkLink, Transport};
