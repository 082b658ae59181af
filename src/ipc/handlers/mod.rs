pub mod analytics;
pub mod attendance;
pub mod core;
pub mod exams;
pub mod setup;
pub mod students;
