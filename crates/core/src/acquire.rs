use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::AcquireError;
use crate::model::DeviceReport;

/// smartctl exit bits 0-2: bad command line, device open failure, SMART
/// command failure. Higher bits describe disk state and come with a report.
const SMARTCTL_FATAL_EXIT_BITS: i32 = 0b111;

pub trait ReportSource {
    fn fetch(&self, device: &Path) -> Result<String, AcquireError>;
}

#[derive(Debug, Clone)]
pub struct Smartctl {
    pub program: String,
    pub use_sudo: bool,
}

impl Default for Smartctl {
    fn default() -> Self {
        Self {
            program: "smartctl".to_string(),
            use_sudo: true,
        }
    }
}

impl Smartctl {
    fn command(&self, device: &Path) -> Command {
        let mut command = if self.use_sudo {
            let mut sudo = Command::new("sudo");
            sudo.arg(&self.program);
            sudo
        } else {
            Command::new(&self.program)
        };
        command.arg("--all").arg(device);
        command
    }
}

impl ReportSource for Smartctl {
    fn fetch(&self, device: &Path) -> Result<String, AcquireError> {
        debug!(
            program = %self.program,
            device = %device.display(),
            sudo = self.use_sudo,
            "running smartctl"
        );
        let output = self
            .command(device)
            .output()
            .map_err(|err| AcquireError::Spawn {
                program: self.program.clone(),
                message: err.to_string(),
            })?;

        let fatal = match output.status.code() {
            Some(code) => code & SMARTCTL_FATAL_EXIT_BITS != 0,
            None => true,
        };
        if fatal {
            return Err(AcquireError::ExitStatus {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SavedReports;

impl ReportSource for SavedReports {
    fn fetch(&self, device: &Path) -> Result<String, AcquireError> {
        fs::read_to_string(device).map_err(|err| AcquireError::SavedReport {
            path: device.to_path_buf(),
            message: err.to_string(),
        })
    }
}

// `/dev/disk/by-id/ata-...` resolves to `/dev/sda`.
pub fn canonical_device_name(device: &Path) -> String {
    let resolved = fs::canonicalize(device).unwrap_or_else(|_| device.to_path_buf());
    basename(&resolved).unwrap_or_else(|| device.to_string_lossy().to_string())
}

pub fn saved_report_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn basename(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().to_string())
}

pub fn acquire_all(
    source: &dyn ReportSource,
    devices: &[PathBuf],
    name_of: impl Fn(&Path) -> String,
) -> Vec<DeviceReport> {
    devices
        .iter()
        .map(|device| {
            let raw = source.fetch(device);
            if let Err(err) = &raw {
                warn!(
                    device = %device.display(),
                    error = %err,
                    "could not acquire diagnostic report"
                );
            }
            DeviceReport::new(name_of(device), raw)
        })
        .collect()
}
