//! `modsync sync` — reconcile a mods directory against a manifest.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use modsync_core::{Config, Manifest};
use modsync_providers::{HttpClient, ProviderRegistry};
use modsync_sync::{
    DescriptorOutcome, HttpFetcher, IngestReport, ModSync, SyncEvent, SyncOptions, SyncReport,
};

/// Arguments for `modsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Mods directory to synchronize (created if missing).
    #[arg(long, short = 'd')]
    pub dir: PathBuf,

    /// Manifest JSON file.
    #[arg(long, conflicts_with = "manifest_url", required_unless_present = "manifest_url")]
    pub manifest: Option<PathBuf>,

    /// Manifest JSON document to download.
    #[arg(long)]
    pub manifest_url: Option<String>,

    /// Hash existing files and re-download on mismatch.
    #[arg(long)]
    pub verify_hash: bool,

    /// Delete files in the directory that the manifest does not name.
    #[arg(long)]
    pub remove_unlisted: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SyncJson<'a> {
    ingest: &'a IngestReport,
    sync: &'a SyncReport,
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "mod")]
    filename: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "detail")]
    detail: String,
}

impl SyncArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let client = HttpClient::new(&config.http);
        let manifest = match (&self.manifest, &self.manifest_url) {
            (Some(path), _) => Manifest::from_path(path)
                .with_context(|| format!("failed to read manifest {}", path.display()))?,
            (None, Some(url)) => client
                .fetch_manifest(url)
                .with_context(|| format!("failed to fetch manifest {url}"))?,
            (None, None) => bail!("provide --manifest or --manifest-url"),
        };

        let providers = ProviderRegistry::with_defaults(config);
        let mut engine =
            ModSync::with_fetcher(&self.dir, Box::new(HttpFetcher::from_client(&client)));
        let ingest = engine.load_from_manifest(&manifest, &providers);
        tracing::debug!(
            added = ingest.added,
            skipped = ingest.failures.len(),
            "manifest ingested"
        );

        let options = SyncOptions {
            verify_hash: self.verify_hash,
            remove_unlisted: self.remove_unlisted,
        };
        let progress = |event: &SyncEvent<'_>| {
            if let SyncEvent::Progress {
                index,
                total,
                filename,
            } = event
            {
                println!("{} {filename}", format!("[{}/{total}]", index + 1).bright_black());
            }
        };
        let result = if self.json {
            engine.synchronize(options)
        } else {
            engine.synchronize_with(options, &progress)
        };
        let report = result.with_context(|| format!("sync failed for {}", self.dir.display()))?;

        if self.json {
            let payload = SyncJson {
                ingest: &ingest,
                sync: &report,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize sync JSON")?
            );
        } else {
            print_results(&ingest, &report);
        }

        let failures = ingest.failures.len() + report.failed_count() + report.removal_failures.len();
        if failures > 0 {
            bail!("{failures} problem(s) during sync");
        }
        Ok(())
    }
}

fn print_results(ingest: &IngestReport, report: &SyncReport) {
    for failure in &ingest.failures {
        eprintln!(
            "{} skipped {}[{}]: {}",
            "✗".red(),
            failure.provider,
            failure.index,
            failure.message
        );
    }

    println!(
        "✓ '{}' synced ({} fetched, {} unchanged, {} failed, {} removed)",
        report.directory.display(),
        report.fetched_count(),
        report.unchanged_count(),
        report.failed_count(),
        report.removed.len(),
    );

    if !report.descriptors.is_empty() {
        let rows: Vec<OutcomeRow> = report
            .descriptors
            .iter()
            .map(|d| OutcomeRow {
                filename: d.filename.clone(),
                status: outcome_label(&d.outcome),
                detail: match &d.outcome {
                    DescriptorOutcome::Failed { message, .. } => message.clone(),
                    _ => String::new(),
                },
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }

    for name in &report.removed {
        println!("  {}  {name}", "-".red());
    }
    for failure in &report.removal_failures {
        eprintln!("{} could not remove {}: {}", "✗".red(), failure.filename, failure.message);
    }
}

fn outcome_label(outcome: &DescriptorOutcome) -> String {
    match outcome {
        DescriptorOutcome::Unchanged => "UNCHANGED".green().to_string(),
        DescriptorOutcome::Fetched => "FETCHED".cyan().to_string(),
        DescriptorOutcome::Failed { .. } => "FAILED".red().bold().to_string(),
    }
}
