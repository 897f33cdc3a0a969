#[cfg(any(test, feature = "fixture"))]
pub mod fixture;
pub mod provider;
pub mod types;

pub use provider::{FinnhubClient, MarketDataClient};
