pub mod analytics_client;
pub mod decode;

pub use analytics_client::AnalyticsClient;
