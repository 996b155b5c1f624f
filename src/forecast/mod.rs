pub mod aggregator;
pub mod handlers;
pub mod models;

pub use aggregator::ForecastAggregator;
