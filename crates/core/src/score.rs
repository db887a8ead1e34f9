use serde::Serialize;

use crate::model::{AgeHours, DeviceSummary};
use crate::policy::ScoringPolicy;

const HOURS_PER_DAY: u64 = 24;
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: u64,
    pub days: u64,
    pub hours: u64,
}

impl AgeBreakdown {
    pub fn from_hours(total_hours: u64) -> Self {
        let total_days = total_hours / HOURS_PER_DAY;
        let hours = total_hours % HOURS_PER_DAY;
        let years = (total_days as f64 / DAYS_PER_YEAR).floor();
        // Whole remaining days only: 10000h is 1y 50d 16h, never 51d.
        let days = (total_days as f64 - years * DAYS_PER_YEAR).floor();
        Self {
            years: years as u64,
            days: days as u64,
            hours,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeScore {
    pub power_on_hours: u64,
    pub breakdown: AgeBreakdown,
    pub dementia_percent: f64,
    pub death_percent: f64,
}

pub fn score_age(age: AgeHours, policy: &ScoringPolicy) -> Option<AgeScore> {
    let hours = age.hours()?;
    Some(AgeScore {
        power_on_hours: hours,
        breakdown: AgeBreakdown::from_hours(hours),
        dementia_percent: 100.0 * hours as f64 / policy.dementia_budget_hours,
        death_percent: 100.0 * hours as f64 / policy.death_budget_hours,
    })
}

/// Youngest first. Unknown ages and failed devices go last, keeping their
/// input order.
pub fn rank_by_age(devices: &[DeviceSummary]) -> Vec<&DeviceSummary> {
    let mut ranked = devices.iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| a.cmp_by_age(b));
    ranked
}

#[cfg(test)]
mod tests {
    use super::{rank_by_age, score_age, AgeBreakdown};
    use crate::model::{AgeHours, DeviceSummary, HealthAssessment};
    use crate::policy::ScoringPolicy;

    fn device(name: &str, age: AgeHours) -> DeviceSummary {
        DeviceSummary::assessed(name, age, HealthAssessment::indeterminate())
    }

    #[test]
    fn breaks_down_hours() {
        assert_eq!(
            AgeBreakdown::from_hours(10_000),
            AgeBreakdown {
                years: 1,
                days: 50,
                hours: 16
            }
        );
        assert_eq!(
            AgeBreakdown::from_hours(23),
            AgeBreakdown {
                years: 0,
                days: 0,
                hours: 23
            }
        );
    }

    #[test]
    fn percentages_use_policy_budgets() {
        let policy = ScoringPolicy::default();
        let score = score_age(AgeHours::Known(35_064), &policy).expect("known age scores");
        assert!((score.dementia_percent - 100.0).abs() < 1e-9);
        assert!((score.death_percent - 100.0 * 4.0 / 14.0).abs() < 1e-9);

        let custom = ScoringPolicy {
            dementia_budget_hours: 1_000.0,
            death_budget_hours: 2_000.0,
        };
        let score = score_age(AgeHours::Known(500), &custom).expect("known age scores");
        assert_eq!(score.dementia_percent, 50.0);
        assert_eq!(score.death_percent, 25.0);
    }

    #[test]
    fn unknown_age_has_no_score() {
        assert!(score_age(AgeHours::Unknown, &ScoringPolicy::default()).is_none());
    }

    #[test]
    fn ranking_is_stable_with_unknown_and_failed_last() {
        let devices = vec![
            device("unknown-a", AgeHours::Unknown),
            DeviceSummary::failed("failed", "boom"),
            device("old", AgeHours::Known(900)),
            device("young", AgeHours::Known(10)),
            device("tie-first", AgeHours::Known(500)),
            device("tie-second", AgeHours::Known(500)),
            device("unknown-b", AgeHours::Unknown),
        ];
        let order = rank_by_age(&devices)
            .into_iter()
            .map(|d| d.identifier.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                "young",
                "tie-first",
                "tie-second",
                "old",
                "unknown-a",
                "failed",
                "unknown-b"
            ]
        );
    }
}
