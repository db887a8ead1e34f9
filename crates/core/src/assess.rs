use crate::age::extract_age;
use crate::health::extract_health;
use crate::model::{DeviceReport, DeviceSummary};

pub fn assess(report: &DeviceReport) -> DeviceSummary {
    match &report.raw {
        Ok(raw) => DeviceSummary::assessed(
            report.identifier.clone(),
            extract_age(raw),
            extract_health(raw),
        ),
        Err(err) => DeviceSummary::failed(report.identifier.clone(), err.to_string()),
    }
}

pub fn assess_all(reports: &[DeviceReport]) -> Vec<DeviceSummary> {
    reports.iter().map(assess).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use super::assess_all;
    use crate::acquire::{acquire_all, ReportSource};
    use crate::error::AcquireError;
    use crate::model::AgeHours;

    struct FixedSource(HashMap<PathBuf, Result<String, AcquireError>>);

    impl ReportSource for FixedSource {
        fn fetch(&self, device: &Path) -> Result<String, AcquireError> {
            self.0.get(device).cloned().unwrap_or_else(|| {
                Err(AcquireError::SavedReport {
                    path: device.to_path_buf(),
                    message: "missing".to_string(),
                })
            })
        }
    }

    #[test]
    fn keeps_device_order_and_failures() {
        let source = FixedSource(HashMap::from([
            (
                PathBuf::from("/dev/sda"),
                Ok("Power_On_Hours  1200\n".to_string()),
            ),
            (
                PathBuf::from("/dev/sdb"),
                Err(AcquireError::ExitStatus {
                    program: "smartctl".to_string(),
                    code: Some(2),
                    stderr: "open failed".to_string(),
                }),
            ),
        ]));
        let devices = vec![PathBuf::from("/dev/sdb"), PathBuf::from("/dev/sda")];
        let reports = acquire_all(&source, &devices, |path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default()
        });
        let summaries = assess_all(&reports);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].identifier, "sdb");
        assert!(summaries[0].health().is_none());
        assert_eq!(summaries[1].identifier, "sda");
        assert_eq!(summaries[1].age(), AgeHours::Known(1200));
    }
}
