pub mod acquire;
pub mod age;
pub mod assess;
pub mod error;
pub mod export;
pub mod health;
pub mod model;
pub mod policy;
pub mod render;
pub mod score;

pub use acquire::{
    acquire_all, canonical_device_name, saved_report_name, ReportSource, SavedReports, Smartctl,
};
pub use age::{accumulated_power_on_hours, attribute_table_hours, extract_age};
pub use assess::{assess, assess_all};
pub use error::AcquireError;
pub use export::{build_life_report, write_life_report, DeviceEntry, DeviceStatus, LifeReport};
pub use health::{attribute_table, extract_health, parse_attribute_row, AttributeRow};
pub use model::{
    AgeHours, DeviceOutcome, DeviceReport, DeviceSummary, HealthAssessment, UNKNOWN_ATTRIBUTE,
};
pub use policy::{load_policy_file, ScoringPolicy};
pub use render::{summarize, ACQUISITION_ERROR_MARKER, UNKNOWN_AGE_MARKER};
pub use score::{rank_by_age, score_age, AgeBreakdown, AgeScore};
