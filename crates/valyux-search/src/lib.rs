pub mod cache;
pub mod clock;
pub mod matcher;
pub mod service;

pub use cache::{build_cache_key, CacheStats, SearchCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use matcher::{match_listings, MatchConfig};
pub use service::SearchService;
