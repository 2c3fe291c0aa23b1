pub mod client;
pub mod error;
pub mod fields;
pub mod offline;
pub mod shapes;
pub mod source;

pub use client::{uniform_status, ProviderClient, ProviderConfig};
pub use error::ProviderError;
pub use shapes::parse_response;
pub use source::{FetchOutcome, ListingSource};
