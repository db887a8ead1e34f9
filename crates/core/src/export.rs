use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::model::{DeviceOutcome, DeviceSummary, HealthAssessment};
use crate::policy::ScoringPolicy;
use crate::score::{rank_by_age, score_age, AgeScore};

pub const REPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct LifeReport {
    pub report_version: String,
    pub generated_at: String,
    pub policy: ScoringPolicy,
    pub devices: Vec<DeviceEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceEntry {
    pub identifier: String,
    pub status: DeviceStatus,
    pub age: Option<AgeScore>,
    pub health: Option<HealthAssessment>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Assessed,
    UnknownAge,
    AcquisitionFailed,
}

pub fn build_life_report(devices: &[DeviceSummary], policy: &ScoringPolicy) -> LifeReport {
    let entries = rank_by_age(devices)
        .into_iter()
        .map(|device| match &device.outcome {
            DeviceOutcome::Assessed { age, health } => {
                let age = score_age(*age, policy);
                DeviceEntry {
                    identifier: device.identifier.clone(),
                    status: if age.is_some() {
                        DeviceStatus::Assessed
                    } else {
                        DeviceStatus::UnknownAge
                    },
                    age,
                    health: Some(health.clone()),
                    error: None,
                }
            }
            DeviceOutcome::AcquisitionFailed { reason } => DeviceEntry {
                identifier: device.identifier.clone(),
                status: DeviceStatus::AcquisitionFailed,
                age: None,
                health: None,
                error: Some(reason.clone()),
            },
        })
        .collect();

    LifeReport {
        report_version: REPORT_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        policy: *policy,
        devices: entries,
    }
}

pub fn write_life_report(report: &LifeReport, output_path: impl AsRef<Path>) -> Result<()> {
    let path = output_path.as_ref();
    let payload = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    fs::write(path, payload)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
