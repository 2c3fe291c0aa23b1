use std::future::Future;

use valyux_core::{RawListing, StatusMap};

/// Listings gathered for one query, with the status of every platform.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub listings: Vec<RawListing>,
    pub platform_status: StatusMap,
}

/// Anything that can produce platform listings for a query.
///
/// Implementations must not fail: upstream problems are reported through
/// [`FetchOutcome::platform_status`] with an empty or partial listing set.
/// Dropping the returned future cancels any in-flight request.
pub trait ListingSource: Send + Sync {
    fn fetch_listings(
        &self,
        query: &str,
        locality: &str,
    ) -> impl Future<Output = FetchOutcome> + Send;
}
