//! Dry-run the upload admission pipeline over a local directory.
//!
//! Reads every regular file in the given directory (non-recursive, the way a
//! bundle is selected in the upload dialog), runs the same admission checks
//! the publish path uses, and reports what would be accepted or rejected.
//! Exits non-zero when the bundle would not be publishable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ludia_admission::{
    AdmissionPipeline, AdmissionReport, CandidateFile, PatternScanner, RejectionReason,
    ValidationRules,
};
use ludia_core::Config;

#[derive(Parser, Debug)]
#[command(name = "admit")]
#[command(about = "Check a game bundle against the upload admission rules")]
struct Args {
    /// Directory containing the bundle files
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Treat as an update to an existing game (no entry-point requirement)
    #[arg(long)]
    merge: bool,

    /// File names already staged in the upload session
    #[arg(long = "staged", value_name = "NAME")]
    staged: Vec<String>,

    /// Output format: json or table (default: table)
    #[arg(long, default_value = "table")]
    format: String,
}

#[derive(serde::Serialize)]
struct ReportOutput {
    accepted: Vec<String>,
    rejected: Vec<RejectedOutput>,
    batch_rejection: Option<RejectionReason>,
    publishable: bool,
}

#[derive(serde::Serialize)]
struct RejectedOutput {
    name: String,
    reason: RejectionReason,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::from_env()?;
    let pipeline = AdmissionPipeline::new(
        ValidationRules::from_config(&config),
        PatternScanner::with_default_patterns()?,
    );

    let files = read_bundle(&args.dir).await?;
    if files.is_empty() {
        anyhow::bail!("No files found in {}", args.dir.display());
    }

    let report = if args.merge {
        pipeline.admit_merge(files, &args.staged)
    } else {
        pipeline.admit(files, &args.staged)
    };

    let publishable = report.is_publishable();
    let output = to_output(report);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&output)?),
        _ => print_report_table(&output),
    }

    if !publishable {
        std::process::exit(1);
    }
    Ok(())
}

/// Read every regular file in `dir` as a candidate. A file that cannot be
/// read becomes an unavailable candidate, which admission rejects
/// conservatively rather than skipping.
async fn read_bundle(dir: &PathBuf) -> Result<Vec<CandidateFile>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match tokio::fs::read(entry.path()).await {
            Ok(data) => files.push(CandidateFile::new(name, data)),
            Err(_) => files.push(CandidateFile::unavailable(name, metadata.len())),
        }
    }
    // Directory iteration order is platform-dependent; sort for stable output.
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

fn to_output(report: AdmissionReport) -> ReportOutput {
    ReportOutput {
        publishable: report.is_publishable(),
        accepted: report.accepted.iter().map(|f| f.name.clone()).collect(),
        rejected: report
            .rejected
            .into_iter()
            .map(|r| RejectedOutput {
                name: r.file.name,
                reason: r.reason,
            })
            .collect(),
        batch_rejection: report.batch_rejection,
    }
}

fn print_report_table(output: &ReportOutput) {
    println!("Accepted ({}):", output.accepted.len());
    for name in &output.accepted {
        println!("  {}", name);
    }
    println!("Rejected ({}):", output.rejected.len());
    for rejected in &output.rejected {
        println!("  {} - {}", rejected.name, rejected.reason);
    }
    if let Some(reason) = &output.batch_rejection {
        println!("Batch rejected: {}", reason);
    }
    println!(
        "Result: {}",
        if output.publishable {
            "publishable"
        } else {
            "not publishable"
        }
    );
}
