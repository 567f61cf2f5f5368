use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use atlas_dashboard_lib::COMMANDS;
use atlas_region_core::{SelectedDistrict, duplicate_metric_rows, summarize, unmatched_metric_keys};
use atlas_region_store::{RegionCatalog, RegionSetId, open_catalog};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::CheckData(args) => check_data(args).await,
        Command::Drilldown(args) => drilldown(args).await,
        Command::IpcManifest(args) => export_ipc_manifest(args),
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Developer utilities for the enrollment atlas workspace"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load every configured region and report data-quality findings.
    CheckData(CheckDataArgs),
    /// Print the drilldown summary for one district as JSON.
    Drilldown(DrilldownArgs),
    /// Generate a manifest of host IPC command names (for contract tests).
    IpcManifest(IpcManifestArgs),
}

#[derive(Parser)]
struct CheckDataArgs {
    /// Directory holding atlas.json and the region data files.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Fail when any metric district has no matching boundary.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Parser)]
struct DrilldownArgs {
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Region set id as listed in atlas.json.
    #[arg(long)]
    region: String,
    #[arg(long)]
    district: String,
    #[arg(long)]
    regency: String,
}

#[derive(Parser)]
struct IpcManifestArgs {
    /// Path to write the manifest JSON to (relative to repo root by default).
    #[arg(long, default_value = "docs/contracts/ipc-manifest.json")]
    out: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct IpcManifest {
    schema_version: u32,
    commands: Vec<String>,
}

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

async fn load_catalog(data_dir: &Path) -> Result<RegionCatalog> {
    open_catalog(data_dir)
        .await
        .with_context(|| format!("open region catalog under {}", data_dir.display()))
}

async fn check_data(args: CheckDataArgs) -> Result<()> {
    let catalog = load_catalog(&args.data_dir).await?;

    let mut unmatched_total = 0usize;
    for entry in catalog.entries() {
        let Some(dataset) = &entry.dataset else {
            println!("{}: no data configured", entry.config.id);
            continue;
        };
        let unmatched = unmatched_metric_keys(&dataset.boundaries, &dataset.metrics);
        let duplicates = duplicate_metric_rows(&dataset.metrics);
        println!(
            "{}: boundaries={} metrics={} unmatched={} duplicates={}",
            entry.config.id,
            dataset.boundaries.len(),
            dataset.metrics.len(),
            unmatched.len(),
            duplicates.len()
        );
        for key in &unmatched {
            println!("  unmatched: {key}");
        }
        for row in &duplicates {
            println!("  duplicate row: {row}");
        }
        unmatched_total += unmatched.len();
    }

    if args.strict && unmatched_total > 0 {
        return Err(anyhow!(
            "{unmatched_total} metric districts have no matching boundary"
        ));
    }
    Ok(())
}

async fn drilldown(args: DrilldownArgs) -> Result<()> {
    let catalog = load_catalog(&args.data_dir).await?;
    let dataset = catalog
        .dataset(&RegionSetId::new(args.region.as_str()))
        .with_context(|| format!("region '{}'", args.region))?;
    let selected = SelectedDistrict {
        district: args.district,
        regency: args.regency,
    };
    let summary = summarize(&dataset.metrics, &selected);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn build_ipc_manifest() -> IpcManifest {
    let mut commands: Vec<String> = COMMANDS.iter().map(|name| name.to_string()).collect();
    commands.sort();
    IpcManifest {
        schema_version: 1,
        commands,
    }
}

fn export_ipc_manifest(args: IpcManifestArgs) -> Result<()> {
    let out = if args.out.is_absolute() {
        args.out
    } else {
        repo_root().join(args.out)
    };
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create_dir_all {}", parent.display()))?;
    }
    let manifest = build_ipc_manifest();
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(&out, format!("{json}\n")).with_context(|| format!("write {}", out.display()))?;
    println!("Wrote IPC manifest to {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_lists_every_host_command_sorted() {
        let manifest = build_ipc_manifest();
        assert_eq!(manifest.schema_version, 1);
        assert_eq!(manifest.commands.len(), COMMANDS.len());
        let mut sorted = manifest.commands.clone();
        sorted.sort();
        assert_eq!(manifest.commands, sorted);
        let json = serde_json::to_value(&manifest).expect("serialize");
        assert!(json.get("schemaVersion").is_some());
    }
}
