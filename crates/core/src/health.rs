use tracing::debug;

use crate::model::HealthAssessment;

const TABLE_TITLE: &str = "Vendor Specific SMART Attributes with Thresholds:";
const TABLE_COLUMNS: &str =
    "ID# ATTRIBUTE_NAME FLAG VALUE WORST THRESH TYPE UPDATED WHEN_FAILED RAW_VALUE";
const PRE_FAIL: &str = "pre-fail";
const MIN_ROW_FIELDS: usize = 9;

/// Only the first nine columns; the raw value may itself contain spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRow {
    pub id: Option<u16>,
    pub name: String,
    pub flag: String,
    pub current: f64,
    pub worst: f64,
    pub threshold: f64,
    pub kind: String,
    pub updated: String,
    pub when_failed: String,
}

impl AttributeRow {
    pub fn is_pre_fail(&self) -> bool {
        self.kind.eq_ignore_ascii_case(PRE_FAIL)
    }
}

pub fn extract_health(raw: &str) -> HealthAssessment {
    let Some(rows) = attribute_table(raw) else {
        debug!("no vendor attribute table");
        return HealthAssessment::indeterminate();
    };

    let mut worst = HealthAssessment::indeterminate();
    for row in rows {
        if !row.is_pre_fail() {
            continue;
        }
        if row.threshold == 0.0 {
            continue;
        }
        let ratio = row.worst / row.threshold;
        if ratio < worst.ratio {
            worst = HealthAssessment {
                ratio,
                attribute_id: row.id,
                attribute_name: row.name,
                current_value: row.current,
                worst_value: row.worst,
                threshold: row.threshold,
            };
        }
    }

    if worst.is_indeterminate() {
        debug!("no pre-fail attribute with a threshold");
    } else {
        debug!(
            attribute = %worst.attribute_name,
            ratio = worst.ratio,
            "worst pre-fail attribute"
        );
    }
    worst
}

pub fn attribute_table(raw: &str) -> Option<Vec<AttributeRow>> {
    let mut lines = raw.lines();
    loop {
        let line = lines.next()?;
        if line.trim() != TABLE_TITLE {
            continue;
        }
        let columns = lines.next()?;
        if collapse_whitespace(columns) == TABLE_COLUMNS {
            break;
        }
    }

    let rows = lines
        .take_while(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let row = parse_attribute_row(line);
            if row.is_none() {
                debug!(line, "skipping malformed attribute row");
            }
            row
        })
        .collect();
    Some(rows)
}

pub fn parse_attribute_row(line: &str) -> Option<AttributeRow> {
    let collapsed = collapse_whitespace(line);
    let fields = collapsed.split(' ').collect::<Vec<_>>();
    if fields.len() < MIN_ROW_FIELDS {
        return None;
    }

    Some(AttributeRow {
        id: fields[0].parse().ok(),
        name: fields[1].to_string(),
        flag: fields[2].to_string(),
        current: fields[3].parse().ok()?,
        worst: fields[4].parse().ok()?,
        threshold: fields[5].parse().ok()?,
        kind: fields[6].to_string(),
        updated: fields[7].to_string(),
        when_failed: fields[8].to_string(),
    })
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
