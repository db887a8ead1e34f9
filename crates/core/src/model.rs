use std::cmp::Ordering;

use serde::Serialize;

use crate::error::AcquireError;

pub const UNKNOWN_ATTRIBUTE: &str = "UNKNOWN";

#[derive(Debug, Clone)]
pub struct DeviceReport {
    pub identifier: String,
    pub raw: Result<String, AcquireError>,
}

impl DeviceReport {
    pub fn new(identifier: impl Into<String>, raw: Result<String, AcquireError>) -> Self {
        Self {
            identifier: identifier.into(),
            raw,
        }
    }
}

/// `Unknown` orders after every known value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgeHours {
    Known(u64),
    Unknown,
}

impl AgeHours {
    pub fn hours(self) -> Option<u64> {
        match self {
            AgeHours::Known(hours) => Some(hours),
            AgeHours::Unknown => None,
        }
    }
}

/// `ratio` is `worst_value / threshold`; lower is worse. An infinite ratio
/// means no row qualified and the device is assumed healthy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAssessment {
    #[serde(serialize_with = "serialize_finite")]
    pub ratio: f64,
    pub attribute_id: Option<u16>,
    pub attribute_name: String,
    #[serde(serialize_with = "serialize_finite")]
    pub current_value: f64,
    #[serde(serialize_with = "serialize_finite")]
    pub worst_value: f64,
    #[serde(serialize_with = "serialize_finite")]
    pub threshold: f64,
}

impl HealthAssessment {
    pub fn indeterminate() -> Self {
        Self {
            ratio: f64::INFINITY,
            attribute_id: None,
            attribute_name: UNKNOWN_ATTRIBUTE.to_string(),
            current_value: f64::NAN,
            worst_value: f64::NAN,
            threshold: f64::NAN,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        !self.ratio.is_finite()
    }
}

fn serialize_finite<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.is_finite() {
        serializer.serialize_some(value)
    } else {
        serializer.serialize_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceOutcome {
    Assessed {
        age: AgeHours,
        health: HealthAssessment,
    },
    AcquisitionFailed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSummary {
    pub identifier: String,
    pub outcome: DeviceOutcome,
}

impl DeviceSummary {
    pub fn assessed(identifier: impl Into<String>, age: AgeHours, health: HealthAssessment) -> Self {
        Self {
            identifier: identifier.into(),
            outcome: DeviceOutcome::Assessed { age, health },
        }
    }

    pub fn failed(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            outcome: DeviceOutcome::AcquisitionFailed {
                reason: reason.into(),
            },
        }
    }

    /// Sort key: failed devices count as unknown age.
    pub fn age(&self) -> AgeHours {
        match &self.outcome {
            DeviceOutcome::Assessed { age, .. } => *age,
            DeviceOutcome::AcquisitionFailed { .. } => AgeHours::Unknown,
        }
    }

    pub fn health(&self) -> Option<&HealthAssessment> {
        match &self.outcome {
            DeviceOutcome::Assessed { health, .. } => Some(health),
            DeviceOutcome::AcquisitionFailed { .. } => None,
        }
    }

    pub fn cmp_by_age(&self, other: &Self) -> Ordering {
        self.age().cmp(&other.age())
    }
}

#[cfg(test)]
mod tests {
    use super::{AgeHours, DeviceSummary, HealthAssessment};

    #[test]
    fn unknown_age_orders_after_known() {
        assert!(AgeHours::Known(u64::MAX) < AgeHours::Unknown);
        assert!(AgeHours::Known(1) < AgeHours::Known(2));
    }

    #[test]
    fn failed_device_sorts_as_unknown() {
        let failed = DeviceSummary::failed("sdb", "exit status 2");
        let known = DeviceSummary::assessed(
            "sda",
            AgeHours::Known(10),
            HealthAssessment::indeterminate(),
        );
        assert_eq!(failed.age(), AgeHours::Unknown);
        assert!(known.cmp_by_age(&failed).is_lt());
        assert!(failed.health().is_none());
    }

    #[test]
    fn indeterminate_health_serializes_ratio_as_null() {
        let value = serde_json::to_value(HealthAssessment::indeterminate())
            .expect("assessment serializes");
        assert!(value["ratio"].is_null());
        assert_eq!(value["attribute_name"], "UNKNOWN");
    }
}
