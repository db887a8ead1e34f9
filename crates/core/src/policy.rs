use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

const HOURS_PER_YEAR: f64 = 24.0 * 365.25;

// Sectors are assumed to start corrupting after 4 years powered on, and the
// device to fail outright after 14.
pub const DEFAULT_DEMENTIA_BUDGET_HOURS: f64 = HOURS_PER_YEAR * 4.0;
pub const DEFAULT_DEATH_BUDGET_HOURS: f64 = HOURS_PER_YEAR * 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default = "default_dementia_budget_hours")]
    pub dementia_budget_hours: f64,
    #[serde(default = "default_death_budget_hours")]
    pub death_budget_hours: f64,
}

fn default_dementia_budget_hours() -> f64 {
    DEFAULT_DEMENTIA_BUDGET_HOURS
}

fn default_death_budget_hours() -> f64 {
    DEFAULT_DEATH_BUDGET_HOURS
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            dementia_budget_hours: default_dementia_budget_hours(),
            death_budget_hours: default_death_budget_hours(),
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<()> {
        check_budget("dementia_budget_hours", self.dementia_budget_hours)?;
        check_budget("death_budget_hours", self.death_budget_hours)?;
        Ok(())
    }
}

fn check_budget(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{name} must be a positive number of hours, got {value}");
    }
    Ok(())
}

pub fn load_policy_file(path: &Path) -> Result<ScoringPolicy> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scoring policy {}", path.display()))?;
    let policy: ScoringPolicy = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse scoring policy {}", path.display()))?;
    policy
        .validate()
        .with_context(|| format!("invalid scoring policy {}", path.display()))?;
    Ok(policy)
}
