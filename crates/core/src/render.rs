use crate::model::{DeviceOutcome, DeviceSummary, HealthAssessment};
use crate::policy::ScoringPolicy;
use crate::score::{rank_by_age, score_age, AgeScore};

pub const ACQUISITION_ERROR_MARKER: &str = "ERROR_SMARTCTL";
pub const UNKNOWN_AGE_MARKER: &str = "unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ColumnWidths {
    identifier: usize,
    attribute: usize,
}

impl ColumnWidths {
    fn measure(devices: &[DeviceSummary]) -> Self {
        let identifier = devices
            .iter()
            .map(|device| device.identifier.chars().count())
            .max()
            .unwrap_or(0);
        let attribute = devices
            .iter()
            .filter_map(DeviceSummary::health)
            .map(|health| health.attribute_name.chars().count())
            .max()
            .unwrap_or(0);
        Self {
            identifier,
            attribute,
        }
    }
}

pub fn summarize(devices: &[DeviceSummary], policy: &ScoringPolicy) -> Vec<String> {
    let widths = ColumnWidths::measure(devices);
    rank_by_age(devices)
        .into_iter()
        .map(|device| render_line(device, policy, widths))
        .collect()
}

fn render_line(device: &DeviceSummary, policy: &ScoringPolicy, widths: ColumnWidths) -> String {
    let mut out = format!(
        "disk[{:<width$}]; ",
        device.identifier,
        width = widths.identifier
    );
    match &device.outcome {
        DeviceOutcome::AcquisitionFailed { reason } => {
            out.push_str(&format!("{ACQUISITION_ERROR_MARKER}: {reason}"));
        }
        DeviceOutcome::Assessed { age, health } => {
            out.push_str(&render_health(health, widths.attribute));
            out.push_str("; ");
            match score_age(*age, policy) {
                Some(score) => out.push_str(&render_age(&score)),
                None => out.push_str(&format!("age[{UNKNOWN_AGE_MARKER}]")),
            }
        }
    }
    out
}

fn render_health(health: &HealthAssessment, attribute_width: usize) -> String {
    if health.is_indeterminate() {
        return format!(
            "health[{:>8.3}: worst {:>3} / thresh {:>3} {:<width$}]",
            health.ratio,
            "-",
            "-",
            health.attribute_name,
            width = attribute_width
        );
    }
    format!(
        "health[{:>8.3}: worst {:>3.0} / thresh {:>3.0} {:<width$}]",
        health.ratio,
        health.worst_value,
        health.threshold,
        health.attribute_name,
        width = attribute_width
    )
}

fn render_age(score: &AgeScore) -> String {
    format!(
        "power_on[{:>6}h]; years[{:>2}], days[{:>3}], hours[{:>2}]; dementia[{:>7.2}%]; death[{:>7.2}%]",
        score.power_on_hours,
        score.breakdown.years,
        score.breakdown.days,
        score.breakdown.hours,
        score.dementia_percent,
        score.death_percent
    )
}
