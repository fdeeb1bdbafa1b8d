pub mod report;
pub mod student;

pub use report::{CourseEvasionSummary, EvasionReport};
pub use student::{CourseDetail, RecentActionDetail, StudentDetail, StudentProfile};
