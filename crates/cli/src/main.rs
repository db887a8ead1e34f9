use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use disk_life_core::{
    acquire_all, assess_all, build_life_report, canonical_device_name, load_policy_file,
    saved_report_name, summarize, write_life_report, DeviceSummary, SavedReports, ScoringPolicy,
    Smartctl,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "disk-life",
    version,
    about = "Summarize power-on age and wear health of storage devices from smartctl reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run smartctl against each device and print a ranked summary.
    Summarize(SummarizeArgs),
    /// Summarize previously saved `smartctl --all` output files.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct SummarizeArgs {
    /// Devices to summarize, e.g. /dev/sda or /dev/disk/by-id/...
    #[arg(value_name = "DEVICE", required = true)]
    devices: Vec<PathBuf>,

    /// smartctl executable to run [default: smartctl].
    #[arg(long, value_name = "PROGRAM")]
    smartctl: Option<String>,

    /// Run smartctl directly instead of through sudo.
    #[arg(long)]
    no_sudo: bool,

    #[command(flatten)]
    output: OutputArgs,
}

impl SummarizeArgs {
    fn source(&self) -> Smartctl {
        let mut source = Smartctl::default();
        if let Some(program) = &self.smartctl {
            source.program = program.clone();
        }
        source.use_sudo = !self.no_sudo;
        source
    }
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Saved report files; each file stem names the device.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// JSON scoring policy with `dementia_budget_hours` and `death_budget_hours`.
    #[arg(long, value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Override the power-on hours after which sectors are expected to corrupt.
    #[arg(long, value_name = "HOURS")]
    dementia_hours: Option<f64>,

    /// Override the power-on hours after which the device is expected to fail.
    #[arg(long, value_name = "HOURS")]
    death_hours: Option<f64>,

    /// Also write the ranked summary as JSON.
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

impl OutputArgs {
    fn scoring_policy(&self) -> Result<ScoringPolicy> {
        let mut policy = match &self.policy {
            Some(path) => load_policy_file(path)?,
            None => ScoringPolicy::default(),
        };
        if let Some(hours) = self.dementia_hours {
            policy.dementia_budget_hours = hours;
        }
        if let Some(hours) = self.death_hours {
            policy.death_budget_hours = hours;
        }
        policy.validate()?;
        Ok(policy)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize(args) => run_summarize_command(args),
        Commands::Parse(args) => run_parse_command(args),
    }
}

fn run_summarize_command(args: SummarizeArgs) -> Result<()> {
    let policy = args.output.scoring_policy()?;
    let source = args.source();
    let reports = acquire_all(&source, &args.devices, canonical_device_name);
    emit(&assess_all(&reports), &policy, &args.output)
}

fn run_parse_command(args: ParseArgs) -> Result<()> {
    let policy = args.output.scoring_policy()?;
    let reports = acquire_all(&SavedReports, &args.files, saved_report_name);
    emit(&assess_all(&reports), &policy, &args.output)
}

fn emit(summaries: &[DeviceSummary], policy: &ScoringPolicy, output: &OutputArgs) -> Result<()> {
    for line in summarize(summaries, policy) {
        println!("{line}");
    }

    if let Some(path) = &output.json {
        let report = build_life_report(summaries, policy);
        write_life_report(&report, path)?;
        info!(path = %path.display(), devices = report.devices.len(), "JSON summary written");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn parses_summarize_with_overrides() {
        let cli = Cli::try_parse_from([
            "disk-life",
            "summarize",
            "/dev/sda",
            "/dev/sdb",
            "--no-sudo",
            "--death-hours",
            "100000",
        ])
        .expect("arguments parse");
        let Commands::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.devices.len(), 2);
        let source = args.source();
        assert_eq!(source.program, "smartctl");
        assert!(!source.use_sudo);

        let policy = args.output.scoring_policy().expect("policy valid");
        assert_eq!(policy.death_budget_hours, 100_000.0);
        assert_eq!(policy.dementia_budget_hours, 35_064.0);
    }

    #[test]
    fn custom_smartctl_keeps_sudo_by_default() {
        let cli = Cli::try_parse_from([
            "disk-life",
            "summarize",
            "/dev/sda",
            "--smartctl",
            "/usr/local/sbin/smartctl",
        ])
        .expect("arguments parse");
        let Commands::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        let source = args.source();
        assert_eq!(source.program, "/usr/local/sbin/smartctl");
        assert!(source.use_sudo);
    }

    #[test]
    fn rejects_negative_budget_override() {
        let cli = Cli::try_parse_from(["disk-life", "parse", "sda.txt", "--dementia-hours=-5"])
            .expect("arguments parse");
        let Commands::Parse(args) = cli.command else {
            panic!("expected parse");
        };
        assert!(args.output.scoring_policy().is_err());
    }

    #[test]
    fn requires_at_least_one_device() {
        assert!(Cli::try_parse_from(["disk-life", "summarize"]).is_err());
    }
}
