use tracing::debug;

use crate::model::AgeHours;

const POWER_ON_HOURS_TOKEN: &str = "Power_On_Hours";
const ACCUMULATED_POWER_ON_PREFIX: &str = "Accumulated power on time, hours:minutes ";

pub fn extract_age(raw: &str) -> AgeHours {
    if let Some(hours) = attribute_table_hours(raw) {
        debug!(hours, "power-on hours read from attribute table");
        return AgeHours::Known(hours);
    }
    if let Some(hours) = accumulated_power_on_hours(raw) {
        debug!(hours, "power-on hours read from accumulated power on time");
        return AgeHours::Known(hours);
    }
    debug!("no recognized power-on hours layout");
    AgeHours::Unknown
}

// Raw values such as `24462 (64 151 0)` contain single spaces, so the value is
// first taken after the last double space, then after the last whitespace run.
pub fn attribute_table_hours(raw: &str) -> Option<u64> {
    let start = raw.find(POWER_ON_HOURS_TOKEN)?;
    let line = raw[start..].lines().next()?.trim_end();

    let spaced = line.rsplit("  ").next().and_then(parse_raw_hours);
    let hours = spaced.or_else(|| line.split_whitespace().last().and_then(parse_raw_hours));
    if hours.is_none() {
        debug!(line, "unparseable Power_On_Hours raw value");
    }
    hours
}

fn parse_raw_hours(value: &str) -> Option<u64> {
    let mut value = value.trim();
    if let Some(idx) = value.find("h+") {
        value = &value[..idx];
    }
    if let Some(idx) = value.find(" (") {
        value = &value[..idx];
    }
    value.trim().parse::<u64>().ok()
}

pub fn accumulated_power_on_hours(raw: &str) -> Option<u64> {
    let value = raw
        .lines()
        .find_map(|line| line.strip_prefix(ACCUMULATED_POWER_ON_PREFIX))?
        .trim();

    if value.matches(':').count() != 1 {
        debug!(value, "accumulated power on time is not H:MM");
        return None;
    }
    let (hours, _minutes) = value.split_once(':')?;
    hours.trim().parse::<u64>().ok()
}
