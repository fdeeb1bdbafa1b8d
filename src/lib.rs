//! # Evasion Gateway
//!
//! Intermediary layer between an identity-bearing web application and the
//! external analytics service that scores students for dropout ("evasion")
//! risk.
//!
//! Two core components:
//!
//! - [`services::MappingCache`] — loads the professor-name → course-names
//!   table from a configured JSON file once at startup and serves lookups
//!   from memory. A missing or broken file degrades to an empty table.
//! - [`clients::AnalyticsClient`] — typed client over the remote HTTP/JSON
//!   analytics API. Remote failures are logged at the boundary and surfaced
//!   as absent results, never as raised faults.
//!
//! Callers look up a professor's permitted courses first, then fetch risk
//! data and filter it themselves ([`app::filter_students_by_courses`]);
//! the gateway deliberately does no filtering of its own.

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;

// re-export the commonly used types
pub use app::App;
pub use clients::AnalyticsClient;
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, ConfigError, MappingError};
pub use models::{
    CourseDetail, CourseEvasionSummary, EvasionReport, RecentActionDetail, StudentDetail,
    StudentProfile,
};
pub use services::MappingCache;
